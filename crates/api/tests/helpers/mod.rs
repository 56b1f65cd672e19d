#![allow(dead_code, unused_imports)]
mod mock_repositories;

pub use mock_repositories::*;
