use crate::dns_record::{DnsAnswer, RecordType, CLASS_IN};
use std::fmt;

/// Header flag bits, in wire order.
pub mod flags {
    pub const RESPONSE: u16 = 0x8000;
    pub const OPCODE_MASK: u16 = 0x7800;
    pub const AUTHORITATIVE_ANSWER: u16 = 0x0400;
    pub const TRUNCATED_RESPONSE: u16 = 0x0200;
    pub const RECURSION_DESIRED: u16 = 0x0100;
    pub const RECURSION_AVAILABLE: u16 = 0x0080;
    pub const AUTHENTIC_DATA: u16 = 0x0020;
    pub const CHECKING_DISABLED: u16 = 0x0010;
    pub const RCODE_MASK: u16 = 0x000F;
}

pub const OPCODE_QUERY: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Other(u8),
}

impl ResponseCode {
    pub fn to_u8(self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NxDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Other(code) => code & 0x0F,
        }
    }

    pub fn from_u8(code: u8) -> Self {
        match code & 0x0F {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NxDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Other(other),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NxDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Other(_) => "RCODE",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Other(code) => write!(f, "RCODE{}", code),
            other => f.write_str(other.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    /// Dot-separated labels exactly as received, without a trailing dot.
    pub name: String,
    pub record_type: RecordType,
    pub class: u16,
}

impl DnsQuestion {
    pub fn new(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            class: CLASS_IN,
        }
    }

    /// Lowercased name used for registry lookups.
    pub fn normalized_name(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

/// A DNS message. Queries and responses share the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DnsMessage {
    pub id: u16,
    pub flags: u16,
    pub questions: Vec<DnsQuestion>,
    pub answers: Vec<DnsAnswer>,
}

impl DnsMessage {
    /// A recursion-desired standard query with a single question.
    pub fn query(id: u16, question: DnsQuestion) -> Self {
        Self {
            id,
            flags: flags::RECURSION_DESIRED,
            questions: vec![question],
            answers: Vec::new(),
        }
    }

    pub fn is_response(&self) -> bool {
        self.flags & flags::RESPONSE != 0
    }

    pub fn opcode(&self) -> u8 {
        ((self.flags & flags::OPCODE_MASK) >> 11) as u8
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & flags::RECURSION_DESIRED != 0
    }

    pub fn authoritative(&self) -> bool {
        self.flags & flags::AUTHORITATIVE_ANSWER != 0
    }

    pub fn truncated(&self) -> bool {
        self.flags & flags::TRUNCATED_RESPONSE != 0
    }

    pub fn recursion_available(&self) -> bool {
        self.flags & flags::RECURSION_AVAILABLE != 0
    }

    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from_u8((self.flags & flags::RCODE_MASK) as u8)
    }

    pub fn set_response_code(&mut self, code: ResponseCode) {
        self.flags = (self.flags & !flags::RCODE_MASK) | u16::from(code.to_u8());
    }

    pub fn set_flag(&mut self, flag: u16, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    pub fn first_question(&self) -> Option<&DnsQuestion> {
        self.questions.first()
    }
}
