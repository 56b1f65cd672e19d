#![allow(dead_code, unused_imports)]
mod backend;
mod dns_client;
mod mock_repositories;

pub use backend::*;
pub use dns_client::*;
pub use mock_repositories::*;
