use std::sync::Arc;
use switchyard_application::ports::BackendForwarder;
use switchyard_application::use_cases::ResolveHostUseCase;

#[derive(Clone)]
pub struct ProxyState {
    pub resolve_host: Arc<ResolveHostUseCase>,
    pub forwarder: Arc<dyn BackendForwarder>,
    /// Largest request body accepted, in bytes.
    pub body_limit: usize,
}
