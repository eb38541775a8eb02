pub mod annotation;
pub mod config;
pub mod error;
pub mod kernel;
pub mod knowledge;
pub mod server;
pub mod services;

// Re-export specific items for convenient access
pub use config::Config;
pub use error::{PipelineError, PipelineResult};
pub use kernel::{ActionToken, Session};
