//! Host-side utilities for the `windowed-list` crate.
//!
//! The `windowed-list` crate is UI-agnostic and focuses on the core math and state. This crate
//! provides the small, framework-neutral pieces a hosting screen needs around it:
//!
//! - A viewport event hub with RAII subscriptions (the scroll/resize listener)
//! - A frame controller that re-renders only when the visible range or layout changed
//! - Scroll anchoring across collection replacement (prepend, re-filter, re-sort)
//!
//! This crate is intentionally framework-agnostic (no bindings to any UI toolkit).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod controller;
mod listener;

#[cfg(test)]
mod tests;

pub use anchor::{ScrollAnchor, apply_anchor, apply_anchor_by_scan, capture_first_visible_anchor};
pub use controller::Controller;
pub use listener::{DEFAULT_QUEUE_CAPACITY, ScrollSubscription, ViewportEvent, ViewportEvents};
