pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod memory;
pub mod traits;

pub use client::*;
pub use error::*;
pub use http::*;
pub use memory::*;
pub use traits::*;
