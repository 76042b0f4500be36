pub mod flow;
pub mod session;

pub use flow::*;
pub use session::*;
