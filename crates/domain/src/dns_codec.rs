//! DNS wire format codec.
//!
//! Decodes a UDP payload into a [`DnsMessage`] and encodes one back. Names are
//! plain length-prefixed label sequences; compression pointers are rejected on
//! decode and never emitted on encode. Authority and additional records (such
//! as the EDNS0 OPT record most resolvers attach) are walked for structural
//! validity and dropped.

use crate::dns_message::{flags, DnsMessage, DnsQuestion};
use crate::dns_record::{DnsAnswer, RecordType};
use crate::errors::ProtocolError;

pub const HEADER_LEN: usize = 12;
const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;

/// The fixed 12-byte header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsHeader {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl DnsHeader {
    pub fn parse(buf: &[u8]) -> Result<Self, ProtocolError> {
        if buf.len() < HEADER_LEN {
            return Err(ProtocolError::Truncated {
                offset: 0,
                needed: HEADER_LEN,
            });
        }
        let word = |i: usize| u16::from_be_bytes([buf[i], buf[i + 1]]);
        Ok(Self {
            id: word(0),
            flags: word(2),
            qdcount: word(4),
            ancount: word(6),
            nscount: word(8),
            arcount: word(10),
        })
    }

    pub fn is_response(&self) -> bool {
        self.flags & flags::RESPONSE != 0
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ProtocolError> {
        let end = self.pos.checked_add(n).filter(|end| *end <= self.buf.len());
        match end {
            Some(end) => {
                let slice = &self.buf[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(ProtocolError::Truncated {
                offset: self.pos,
                needed: n,
            }),
        }
    }

    fn u8(&mut self) -> Result<u8, ProtocolError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ProtocolError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, ProtocolError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn name(&mut self) -> Result<String, ProtocolError> {
        let mut name = String::new();
        let mut wire_len = 0usize;

        loop {
            let offset = self.pos;
            let len = self.u8()?;
            wire_len += 1;
            if len == 0 {
                break;
            }
            match len & 0xC0 {
                0x00 => {}
                0xC0 => return Err(ProtocolError::CompressionUnsupported { offset }),
                _ => return Err(ProtocolError::InvalidLabelLength { offset, len }),
            }

            let label = self.take(len as usize)?;
            wire_len += label.len();
            if wire_len >= MAX_NAME_LEN {
                return Err(ProtocolError::NameTooLong);
            }
            if !label.iter().all(|b| b.is_ascii_graphic() && *b != b'.') {
                return Err(ProtocolError::InvalidLabel { offset: offset + 1 });
            }

            if !name.is_empty() {
                name.push('.');
            }
            name.extend(label.iter().map(|&b| b as char));
        }

        Ok(name)
    }

    fn question(&mut self) -> Result<DnsQuestion, ProtocolError> {
        let name = self.name()?;
        let record_type = RecordType::from_u16(self.u16()?);
        let class = self.u16()?;
        Ok(DnsQuestion {
            name,
            record_type,
            class,
        })
    }

    fn record(&mut self) -> Result<DnsAnswer, ProtocolError> {
        let name = self.name()?;
        let record_type = RecordType::from_u16(self.u16()?);
        let class = self.u16()?;
        let ttl = self.u32()?;
        let rdlen = self.u16()? as usize;
        let rdata = self.take(rdlen)?.to_vec();
        Ok(DnsAnswer {
            name,
            record_type,
            class,
            ttl,
            rdata,
        })
    }

    fn section<T>(
        &mut self,
        section: &'static str,
        declared: u16,
        mut read: impl FnMut(&mut Self) -> Result<T, ProtocolError>,
    ) -> Result<Vec<T>, ProtocolError> {
        let mut items = Vec::with_capacity(declared.min(16) as usize);
        for parsed in 0..declared {
            if self.at_end() {
                return Err(ProtocolError::CountMismatch {
                    section,
                    declared,
                    parsed,
                });
            }
            items.push(read(self)?);
        }
        Ok(items)
    }
}

/// Parses a complete DNS message.
pub fn decode(buf: &[u8]) -> Result<DnsMessage, ProtocolError> {
    let header = DnsHeader::parse(buf)?;
    let mut reader = Reader::new(buf, HEADER_LEN);

    let questions = reader.section("question", header.qdcount, Reader::question)?;
    let answers = reader.section("answer", header.ancount, Reader::record)?;
    reader.section("authority", header.nscount, Reader::record)?;
    reader.section("additional", header.arcount, Reader::record)?;

    Ok(DnsMessage {
        id: header.id,
        flags: header.flags,
        questions,
        answers,
    })
}

fn count(len: usize) -> Result<u16, ProtocolError> {
    u16::try_from(len).map_err(|_| ProtocolError::TooManyRecords(len))
}

fn write_name(out: &mut Vec<u8>, name: &str) -> Result<(), ProtocolError> {
    let start = out.len();
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if !trimmed.is_empty() {
        for label in trimmed.split('.') {
            let bytes = label.as_bytes();
            if bytes.is_empty() || bytes.len() > MAX_LABEL_LEN {
                return Err(ProtocolError::InvalidLabelLength {
                    offset: out.len(),
                    len: bytes.len().min(u8::MAX as usize) as u8,
                });
            }
            if !bytes.iter().all(u8::is_ascii_graphic) {
                return Err(ProtocolError::InvalidLabel { offset: out.len() });
            }
            out.push(bytes.len() as u8);
            out.extend_from_slice(bytes);
        }
    }
    out.push(0);
    if out.len() - start > MAX_NAME_LEN {
        return Err(ProtocolError::NameTooLong);
    }
    Ok(())
}

/// Serializes a message. Output is a pure function of the input.
pub fn encode(message: &DnsMessage) -> Result<Vec<u8>, ProtocolError> {
    let mut out = Vec::with_capacity(512);

    out.extend_from_slice(&message.id.to_be_bytes());
    out.extend_from_slice(&message.flags.to_be_bytes());
    out.extend_from_slice(&count(message.questions.len())?.to_be_bytes());
    out.extend_from_slice(&count(message.answers.len())?.to_be_bytes());
    out.extend_from_slice(&[0, 0, 0, 0]);

    for question in &message.questions {
        write_name(&mut out, &question.name)?;
        out.extend_from_slice(&question.record_type.to_u16().to_be_bytes());
        out.extend_from_slice(&question.class.to_be_bytes());
    }

    for answer in &message.answers {
        write_name(&mut out, &answer.name)?;
        out.extend_from_slice(&answer.record_type.to_u16().to_be_bytes());
        out.extend_from_slice(&answer.class.to_be_bytes());
        out.extend_from_slice(&answer.ttl.to_be_bytes());
        let rdlen = u16::try_from(answer.rdata.len())
            .map_err(|_| ProtocolError::RdataTooLong(answer.rdata.len()))?;
        out.extend_from_slice(&rdlen.to_be_bytes());
        out.extend_from_slice(&answer.rdata);
    }

    Ok(out)
}

/// Serializes a message for a transport that carries at most `max_len` bytes.
/// When the full message does not fit, the answer section is dropped and the
/// TC bit is set so the client knows to retry over another transport.
pub fn encode_with_limit(message: &DnsMessage, max_len: usize) -> Result<Vec<u8>, ProtocolError> {
    let wire = encode(message)?;
    if wire.len() <= max_len {
        return Ok(wire);
    }

    let mut truncated = DnsMessage {
        id: message.id,
        flags: message.flags,
        questions: message.questions.clone(),
        answers: Vec::new(),
    };
    truncated.set_flag(flags::TRUNCATED_RESPONSE, true);
    encode(&truncated)
}
