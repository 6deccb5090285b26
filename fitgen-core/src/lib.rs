pub mod prompt;
pub mod request;
pub mod types;

pub use prompt::*;
pub use request::*;
pub use types::*;
