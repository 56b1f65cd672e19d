use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use switchyard_application::use_cases::HandleDnsQueryUseCase;
use switchyard_domain::dns_response::rejection;
use switchyard_domain::dns_validator::rejection_code;
use switchyard_domain::{decode, encode_with_limit, validate, DnsHeader, DnsMessage, ResponseCode};
use tracing::{debug, info, warn};

/// Wire-level handling of a single datagram: parse, validate, answer,
/// encode. Returns `None` when the datagram must be dropped unanswered.
pub struct DnsPacketHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
    max_udp_payload: usize,
}

impl DnsPacketHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>, max_udp_payload: usize) -> Self {
        Self {
            use_case,
            max_udp_payload,
        }
    }

    pub async fn handle(&self, packet: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let start = Instant::now();

        let header = match DnsHeader::parse(packet) {
            Ok(header) => header,
            Err(e) => {
                debug!(client = %client, len = packet.len(), error = %e, "Dropping unaddressable datagram");
                return None;
            }
        };

        if header.is_response() {
            debug!(client = %client, id = header.id, "Dropping inbound response");
            return None;
        }

        let message = match decode(packet) {
            Ok(message) => message,
            Err(e) => {
                info!(client = %client.ip(), id = header.id, rcode = %ResponseCode::FormErr, error = %e, "DNS query rejected");
                return self.send(rejection(&header, None, ResponseCode::FormErr), client, start);
            }
        };

        let query = match validate(&message) {
            Ok(query) => query,
            Err(e) => {
                let Some(code) = rejection_code(&e) else {
                    debug!(client = %client, id = header.id, error = %e, "Dropping invalid query");
                    return None;
                };
                info!(client = %client.ip(), id = header.id, rcode = %code, error = %e, "DNS query rejected");
                let echoed = (code != ResponseCode::FormErr).then_some(&message);
                return self.send(rejection(&header, echoed, code), client, start);
            }
        };

        let name = query.name.clone();
        let record_type = query.record_type;
        let response = self.use_case.execute(query).await;

        info!(
            domain = %name,
            record_type = %record_type,
            client = %client.ip(),
            rcode = %response.response_code(),
            answers = response.answers.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "DNS query"
        );

        self.send(response, client, start)
    }

    fn send(&self, response: DnsMessage, client: SocketAddr, start: Instant) -> Option<Vec<u8>> {
        match encode_with_limit(&response, self.max_udp_payload) {
            Ok(wire) => Some(wire),
            Err(e) => {
                warn!(
                    client = %client,
                    id = response.id,
                    error = %e,
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "Failed to encode response"
                );
                None
            }
        }
    }
}
