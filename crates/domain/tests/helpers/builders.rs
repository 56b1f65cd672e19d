#![allow(dead_code)]
use std::net::Ipv4Addr;
use switchyard_domain::dns_message::flags;
use switchyard_domain::{DnsAnswer, DnsMessage, DnsQuestion, RecordType};

pub struct DnsMessageBuilder {
    id: u16,
    flags: u16,
    questions: Vec<DnsQuestion>,
    answers: Vec<DnsAnswer>,
}

impl DnsMessageBuilder {
    pub fn query(name: &str) -> Self {
        Self {
            id: 1,
            flags: flags::RECURSION_DESIRED,
            questions: vec![DnsQuestion::new(name, RecordType::A)],
            answers: Vec::new(),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        if let Some(q) = self.questions.first_mut() {
            q.record_type = record_type;
        }
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn answer(mut self, address: Ipv4Addr, ttl: u32) -> Self {
        let name = self.questions[0].name.clone();
        self.answers.push(DnsAnswer::a(name, address, ttl));
        self
    }

    pub fn build(self) -> DnsMessage {
        DnsMessage {
            id: self.id,
            flags: self.flags,
            questions: self.questions,
            answers: self.answers,
        }
    }
}

/// Raw query bytes the way a stub resolver would send them.
pub fn raw_query(id: u16, name: &str, qtype: u16) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64);
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&[0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    for label in name.split('.') {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
    buf.extend_from_slice(&qtype.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x01]);
    buf
}
