pub mod credentials;
pub mod record;

pub use credentials::*;
pub use record::*;
