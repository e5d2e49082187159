//! # domkit
//!
//! An in-process UI-construction toolkit: a stack-disciplined tree builder
//! over an arena document, a dropdown-widget manager driven by viewport
//! events, and the loose-value/storage plumbing around them.
//!
//! This crate just re-exports the workspace members; depend on the
//! individual crates directly when you only need one layer.

pub use builder;
pub use dom;
pub use dropdown;
pub use events;
pub use store;
pub use tools;
