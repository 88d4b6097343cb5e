//! Roster
//!
//! Source records for order and design-request rosters, and their normalization into one
//! per-player shape.

pub mod normalize;
pub mod records;

pub use normalize::{JerseyDisplay, LineRef, RosterMember, RosterSource, normalize, sort_for_display};
