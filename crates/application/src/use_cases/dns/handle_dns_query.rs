use crate::ports::DomainRegistry;
use std::net::Ipv4Addr;
use std::sync::Arc;
use switchyard_domain::{DnsMessage, DnsQuery, Resolution, ResponseBuilder};
use tracing::{debug, warn};

/// Turns a validated query into its reply: registry lookup, then the
/// authoritative answer (or NXDOMAIN / NOTIMP / NODATA).
pub struct HandleDnsQueryUseCase {
    registry: Arc<dyn DomainRegistry>,
    answer_ttl: u32,
    answer_address: Option<Ipv4Addr>,
}

impl HandleDnsQueryUseCase {
    pub fn new(registry: Arc<dyn DomainRegistry>, answer_ttl: u32) -> Self {
        Self {
            registry,
            answer_ttl,
            answer_address: None,
        }
    }

    /// Answer every registered domain with `address` rather than the
    /// backend's own IPv4 address.
    pub fn with_answer_address(mut self, address: Option<Ipv4Addr>) -> Self {
        self.answer_address = address;
        self
    }

    pub async fn execute(&self, query: DnsQuery) -> DnsMessage {
        let builder = ResponseBuilder::new(query, self.answer_ttl);

        if !builder.query().is_supported() {
            debug!(
                domain = %builder.query().name,
                record_type = %builder.query().record_type,
                "Unsupported record type"
            );
            return builder.not_implemented();
        }

        let domain = builder.query().domain();
        let lookup = match self.registry.lookup(&domain).await {
            Ok(lookup) => lookup,
            Err(e) if e.is_unknown_domain() => {
                warn!(domain = %domain, error = %e, "Registry lookup failed closed");
                return builder.resolved(Resolution::NotFound);
            }
            Err(e) => {
                warn!(domain = %domain, error = %e, "Registry unavailable");
                return builder.server_failure();
            }
        };

        let resolution = match lookup.backend {
            Some(backend) => match self.answer_address.or_else(|| backend.ipv4()) {
                Some(address) => Resolution::Address(address),
                None => {
                    warn!(
                        domain = %domain,
                        backend = %backend,
                        "Registered backend has no IPv4 address to answer with"
                    );
                    Resolution::NoAddress
                }
            },
            None => Resolution::NotFound,
        };

        builder.resolved(resolution)
    }
}
