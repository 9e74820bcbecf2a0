//! A headless windowed list engine.
//!
//! For host-side glue (scroll listening, frame driving, scroll anchoring), see the
//! `windowed-list-adapter` crate.
//!
//! This crate lets a screen show thousands of rows inside a fixed-height viewport while only
//! building the rows that are on screen. It covers:
//! - a per-list position cache holding an offset and size for every index, created lazily from
//!   a size estimate and corrected as real sizes are measured,
//! - binary-search resolution of the visible index range (plus overscan) for a scroll offset,
//! - an epsilon-guarded measurement feedback loop whose re-resolution is coalesced to the next
//!   frame,
//! - keyed render dispatch that never emits the same identity twice in one frame.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - the collection (replaced wholesale, as an `Arc<[T]>`),
//! - the container height and scroll offset,
//! - item size estimates and, once items are laid out, their measured sizes.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod dispatcher;
mod key;
mod list;
mod measurement;
mod options;
mod position_cache;
pub mod resolver;
mod state;
mod types;


pub use dispatcher::{Dispatch, RenderDispatcher};
pub use key::ListKey;
pub use list::WindowedList;
pub use measurement::{MeasureOutcome, MeasurementLoop};
pub use options::{GetItemKey, ListOptions, OnScrollCallback};
pub use position_cache::{EstimateSize, PositionCache};
pub use state::ViewportState;
pub use types::{Align, Frame, PositionRecord, RenderKey, RenderedItem, VisibleRange};
