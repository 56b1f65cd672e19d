//! Switchyard Domain Layer
pub mod config;
pub mod dns_codec;
pub mod dns_message;
pub mod dns_query;
pub mod dns_record;
pub mod dns_response;
pub mod dns_validator;
pub mod errors;
pub mod project;
pub mod proxy;

pub use config::{CliOverrides, Config};
pub use dns_codec::{decode, encode, encode_with_limit, DnsHeader};
pub use dns_message::{DnsMessage, DnsQuestion, ResponseCode};
pub use dns_query::DnsQuery;
pub use dns_record::{DnsAnswer, RecordType, CLASS_IN};
pub use dns_response::{Resolution, ResponseBuilder};
pub use dns_validator::validate;
pub use errors::{DomainError, ProtocolError};
pub use project::{normalize_domain, BackendAddress, ProjectDomainRecord};
pub use proxy::{normalize_host, ResolvedTarget};
