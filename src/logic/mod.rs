pub mod aggregate;
pub mod fetch;

pub use aggregate::*;
pub use fetch::*;
