pub mod dns;
pub mod proxy;

pub use dns::HandleDnsQueryUseCase;
pub use proxy::ResolveHostUseCase;
