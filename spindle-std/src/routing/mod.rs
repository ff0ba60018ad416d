//! # Pattern stores
//!
//! | Store | Feature | Notes |
//! |-------|---------|-------|
//! | [`Tree`] | always | Default. Backtracking trie, empty catch-all captures allowed |
//! | `MatchitStore` | `matchit` | Radix tree from the `matchit` crate |

#[cfg(feature = "matchit")]
mod matchit;
mod tree;

#[cfg(feature = "matchit")]
pub use self::matchit::MatchitStore;
pub use tree::Tree;
