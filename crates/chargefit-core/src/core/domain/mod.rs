//! # Charge Domains
//!
//! The admissible integer increments of every atom type.
//!
//! Two domain kinds exist. The **tight** domain encodes the chemically plausible choices
//! (a carbonyl carbon is `+1`, an amide nitrogen is one of `-2..=0`) and keeps the
//! Cartesian product small enough to enumerate. The **wide** domain opens carbons and
//! nitrogens to broad ranges so the evolutionary search can reach scoreable configurations
//! the tight domain excludes.
//!
//! - [`tables`] - The compiled-in tight, wide and reference tables.
//! - [`range`] - [`range::ChargeDomain`], validated against a vocabulary, and TOML loading.

pub mod range;
pub mod tables;
