use crate::errors::DomainError;
use crate::project::{normalize_domain, BackendAddress};
use std::sync::Arc;

/// Extracts the virtual host from a raw `Host` header value: lowercased, any
/// `:port` suffix and trailing dot removed.
pub fn normalize_host(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    let invalid = || DomainError::InvalidHost(trimmed.to_string());

    let host = if let Some(rest) = trimmed.strip_prefix('[') {
        let (host, after) = rest.split_once(']').ok_or_else(invalid)?;
        if !after.is_empty() {
            after
                .strip_prefix(':')
                .and_then(|port| port.parse::<u16>().ok())
                .ok_or_else(invalid)?;
        }
        host
    } else {
        match trimmed.rsplit_once(':') {
            Some((host, port)) => {
                port.parse::<u16>().map_err(|_| invalid())?;
                host
            }
            None => trimmed,
        }
    };

    let host = normalize_domain(host);
    let forbidden = |c: char| c.is_whitespace() || matches!(c, '/' | '@' | ':');
    if host.is_empty() || host.contains(forbidden) {
        return Err(invalid());
    }
    Ok(host)
}

/// Backend chosen for one proxied request. Resolved fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub domain: Arc<str>,
    pub backend: BackendAddress,
}

impl ResolvedTarget {
    pub fn new(domain: impl Into<Arc<str>>, backend: BackendAddress) -> Self {
        Self {
            domain: domain.into(),
            backend,
        }
    }

    /// `http://<backend><path-and-query>`.
    pub fn url(&self, path_and_query: &str) -> String {
        let path = if path_and_query.starts_with('/') {
            path_and_query
        } else if path_and_query.is_empty() {
            "/"
        } else {
            return format!("http://{}/{}", self.backend.authority(), path_and_query);
        };
        format!("http://{}{}", self.backend.authority(), path)
    }
}
