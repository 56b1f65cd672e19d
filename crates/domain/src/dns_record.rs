mod record_type;

pub use record_type::RecordType;

use std::net::Ipv4Addr;

/// The Internet class. No other class is served.
pub const CLASS_IN: u16 = 1;

/// A resource record in the answer section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsAnswer {
    pub name: String,
    pub record_type: RecordType,
    pub class: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

impl DnsAnswer {
    pub fn a(name: impl Into<String>, address: Ipv4Addr, ttl: u32) -> Self {
        Self {
            name: name.into(),
            record_type: RecordType::A,
            class: CLASS_IN,
            ttl,
            rdata: address.octets().to_vec(),
        }
    }

    /// The IPv4 address carried by an A record, if this is one.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        if self.record_type != RecordType::A {
            return None;
        }
        let octets: [u8; 4] = self.rdata.as_slice().try_into().ok()?;
        Some(Ipv4Addr::from(octets))
    }
}
