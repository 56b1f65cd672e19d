use thiserror::Error;

/// Failures raised while routing a project domain, on either daemon.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid backend address: {0}")]
    InvalidBackendAddress(String),

    #[error("Request has no Host header")]
    MissingHost,

    #[error("Invalid Host header: {0}")]
    InvalidHost(String),

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    #[error("Registry lookup timed out for {0}")]
    RegistryTimeout(String),

    #[error("Registry unavailable: {0}")]
    RegistryUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Backend {backend} unavailable: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    #[error("Backend {backend} timed out")]
    BackendTimeout { backend: String },

    #[error("Outbound connection pool exhausted")]
    PoolExhausted,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Outcomes answered as "no such name / no route". A registry lookup that
    /// timed out fails closed and lands here too.
    pub fn is_unknown_domain(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownDomain(_) | DomainError::RegistryTimeout(_)
        )
    }
}

/// Malformed DNS wire data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Message truncated at offset {offset} (need {needed} bytes)")]
    Truncated { offset: usize, needed: usize },

    #[error("Invalid label length {len} at offset {offset}")]
    InvalidLabelLength { offset: usize, len: u8 },

    #[error("Invalid label bytes at offset {offset}")]
    InvalidLabel { offset: usize },

    #[error("Name compression pointer at offset {offset} is not supported")]
    CompressionUnsupported { offset: usize },

    #[error("Name exceeds 255 bytes")]
    NameTooLong,

    #[error("Header declares {declared} {section} records but only {parsed} were present")]
    CountMismatch {
        section: &'static str,
        declared: u16,
        parsed: u16,
    },

    #[error("Message has no question")]
    NoQuestion,

    #[error("Message has {0} questions, only one is supported")]
    TooManyQuestions(u16),

    #[error("Message is a response, not a query")]
    NotAQuery,

    #[error("Unsupported opcode {0}")]
    UnsupportedOpcode(u8),

    #[error("Unsupported query class {0}")]
    UnsupportedClass(u16),

    #[error("Record data of {0} bytes does not fit")]
    RdataTooLong(usize),

    #[error("Section of {0} records does not fit a 16-bit count")]
    TooManyRecords(usize),
}
