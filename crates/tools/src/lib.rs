//! # tools
//!
//! Loose-value plumbing shared by the rest of the workspace: a [`Value`]
//! type for data that arrives untyped (attribute maps, option lists,
//! stored strings), total coercion functions that substitute a fallback
//! instead of failing, and a handful of text/address validators.
//!
//! This crate intentionally has NO dependencies on the document or widget
//! layers. It depends only on `std`, `memchr` and `url`.

mod coerce;
mod net;
mod text;
mod value;

pub use coerce::{as_boolean, as_number, as_string, as_unsigned, clamp, roll_clamp};
pub use net::{is_ip, is_ipv4, is_ipv6, is_valid_url};
pub use text::title_case;
pub use value::Value;
