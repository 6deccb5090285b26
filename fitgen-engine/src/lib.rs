pub mod error;
pub mod relay;
pub mod session;
pub mod traits;
