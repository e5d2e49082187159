//! # dropdown
//!
//! Floating dropdown widgets anchored to other nodes.
//!
//! A [`DropdownManager`] builds each dropdown through a builder session,
//! tracks the live containers in its own registry, and recomputes every
//! dropdown's position and size from its anchor's rectangle on each fix
//! pass. The fix pass is the scheduled handler for viewport resizes and
//! document scrolls; [`hook_viewport_events`] registers it once per event
//! source.

mod manager;

pub use manager::{
    CONTAINER_CLASS, DropdownConfig, DropdownManager, ROW_CLASS, hook_viewport_events,
};
