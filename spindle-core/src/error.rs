//! Error types for Spindle.
//!
//! Errors here are *configuration* errors: programmer mistakes made while
//! wiring routes and middleware. They surface at the call that caused them
//! and are meant to abort service start-up.
//!
//! - [`ConfigError`] - Top-level registration error
//! - [`PatternError`] - A route pattern the store can't represent
//!
//! Request-time outcomes such as 404 and 405 are responses, not errors.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias defaulting to [`ConfigError`].
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

/// Errors raised while configuring a router.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Route patterns must be rooted at `/`.
    #[error("routing pattern must begin with '/' in '{0}'")]
    InvalidPattern(String),

    /// Middleware was added after the router's handler chain was built.
    #[error("all middlewares must be defined before routes on a router")]
    MiddlewareAfterSeal,

    /// A handler is already mounted on this pattern.
    #[error("attempting to mount a handler on an existing path, '{0}'")]
    DuplicateMount(String),

    /// The router was asked to serve before any route was registered.
    #[error("attempting to route to a router with no handlers")]
    NoRoutes,

    /// The pattern store rejected the pattern.
    #[error("invalid routing pattern: {0}")]
    Pattern(#[from] PatternError),
}

/// Errors produced by a pattern store when parsing a pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A `{` without a matching `}`.
    #[error("unclosed parameter in '{0}'")]
    UnclosedParam(String),

    /// A `{}` placeholder with no name.
    #[error("empty parameter name in '{0}'")]
    EmptyParamName(String),

    /// Text after a `{name}` placeholder within the same segment.
    #[error("parameter must end its path segment in '{0}'")]
    ParamSuffix(String),

    /// A `*` anywhere but the end of the pattern.
    #[error("wildcard '*' must be the last character in '{0}'")]
    MisplacedWildcard(String),

    /// The store can't express this pattern.
    #[error("unsupported pattern '{pattern}': {reason}")]
    Unsupported {
        /// The rejected pattern.
        pattern: String,
        /// Backend-specific explanation.
        reason: String,
    },
}
