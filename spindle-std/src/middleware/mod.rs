//! Standard middleware.
//!
//! - [`RequestLogger`]: `tracing` span and status line per request
//! - `Timeout`: 503 for requests that run too long (`timeout` feature)

mod logging;
#[cfg(feature = "timeout")]
mod timeout;

pub use logging::RequestLogger;
#[cfg(feature = "timeout")]
pub use timeout::Timeout;
