use crate::dns_codec::DnsHeader;
use crate::dns_message::{flags, DnsMessage, ResponseCode};
use crate::dns_query::DnsQuery;
use crate::dns_record::DnsAnswer;
use std::net::Ipv4Addr;

/// What the registry said about the queried name, reduced to what the reply
/// needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Registered, answered with this address.
    Address(Ipv4Addr),
    /// Registered, but there is no IPv4 address to hand out.
    NoAddress,
    /// Not registered (or the registry could not confirm it).
    NotFound,
}

/// Builds the reply for a validated query. Every reply echoes the query id and
/// its question section, never offers recursion, and carries at most one
/// answer.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    query: DnsQuery,
    ttl: u32,
}

impl ResponseBuilder {
    pub fn new(query: DnsQuery, ttl: u32) -> Self {
        Self { query, ttl }
    }

    pub fn query(&self) -> &DnsQuery {
        &self.query
    }

    fn reply(&self, code: ResponseCode, authoritative: bool) -> DnsMessage {
        let mut message = DnsMessage {
            id: self.query.id,
            flags: flags::RESPONSE,
            questions: vec![self.query.question()],
            answers: Vec::new(),
        };
        message.set_flag(flags::RECURSION_DESIRED, self.query.recursion_desired);
        message.set_flag(flags::AUTHORITATIVE_ANSWER, authoritative);
        message.set_response_code(code);
        message
    }

    /// Reply for a query whose registry lookup has completed.
    pub fn resolved(self, resolution: Resolution) -> DnsMessage {
        match resolution {
            Resolution::Address(address) => {
                let mut message = self.reply(ResponseCode::NoError, true);
                message
                    .answers
                    .push(DnsAnswer::a(self.query.name.clone(), address, self.ttl));
                message
            }
            Resolution::NoAddress => self.reply(ResponseCode::NoError, true),
            Resolution::NotFound => self.reply(ResponseCode::NxDomain, true),
        }
    }

    /// Reply for a well-formed query of a type this responder does not serve.
    pub fn not_implemented(self) -> DnsMessage {
        self.reply(ResponseCode::NotImp, false)
    }

    /// Reply when the lookup itself failed for reasons other than absence.
    pub fn server_failure(self) -> DnsMessage {
        self.reply(ResponseCode::ServFail, false)
    }
}

/// Minimal reply for a message that was rejected before a query could be
/// built. Echoes the id and whatever questions were decoded.
pub fn rejection(header: &DnsHeader, questions: Option<&DnsMessage>, code: ResponseCode) -> DnsMessage {
    let mut message = DnsMessage {
        id: header.id,
        flags: flags::RESPONSE | (header.flags & (flags::OPCODE_MASK | flags::RECURSION_DESIRED)),
        questions: questions.map(|m| m.questions.clone()).unwrap_or_default(),
        answers: Vec::new(),
    };
    message.set_response_code(code);
    message
}
