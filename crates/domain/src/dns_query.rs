use crate::dns_message::DnsQuestion;
use crate::dns_record::RecordType;

/// A validated inbound query. Immutable once built from a decoded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub id: u16,
    /// Question name exactly as received (case preserved for echoing).
    pub name: String,
    pub record_type: RecordType,
    pub class: u16,
    pub recursion_desired: bool,
}

impl DnsQuery {
    /// Lowercased name used for registry lookups.
    pub fn domain(&self) -> String {
        self.name.to_ascii_lowercase()
    }

    pub fn is_supported(&self) -> bool {
        self.record_type.is_supported()
    }

    /// The question section to echo back in the reply.
    pub fn question(&self) -> DnsQuestion {
        DnsQuestion {
            name: self.name.clone(),
            record_type: self.record_type,
            class: self.class,
        }
    }
}
