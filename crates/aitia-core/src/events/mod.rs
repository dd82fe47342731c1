//! Progress events emitted by the analysis stages.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::ProgressHandler;
pub use types::*;
