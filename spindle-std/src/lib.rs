//! # spindle-std
//!
//! Standard implementations for the Spindle HTTP request router.
//!
//! This crate provides:
//! - **Router**: [`Router`], with mounting, grouping and route walking
//! - **Pattern stores**: [`Tree`], and `MatchitStore` behind the `matchit` feature
//! - **Context pooling**: [`ContextPool`]
//! - **Standard middleware**: [`RequestLogger`], and `Timeout` behind the `timeout` feature
//! - **Test helpers**: [`testing`]
//!
//! [`Router`]: router::Router
//! [`Tree`]: routing::Tree
//! [`ContextPool`]: pool::ContextPool
//! [`RequestLogger`]: middleware::RequestLogger

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use spindle_core;

// Modules
pub mod middleware;
pub mod pool;
pub mod router;
pub mod routing;
pub mod testing;
