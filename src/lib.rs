//! Kitline
//!
//! Kitline prices team apparel orders and turns team rosters into per-product, per-size
//! production breakdowns.
//!
//! - [`pricing`]: quantity tiers, fabric modifiers and bundle discounts.
//! - [`roster`]: order lines and design-request rows normalized into roster members.
//! - [`breakdown`]: roster members grouped by product and size.
//! - [`export`]: CSV rendering of designs and breakdowns.
//! - [`services`]: fetch, compute and publish with last-write-wins ordering.

pub mod breakdown;
pub mod catalog;
pub mod designs;
pub mod discounts;
pub mod export;
pub mod fixtures;
pub mod pricing;
pub mod products;
pub mod refresh;
pub mod roster;
pub mod services;
pub mod sizes;
pub mod store;
