#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter and per-zone aggregation of reference-rent records.
//!
//! Each dashboard interaction runs [`aggregate::aggregate`] over the shared
//! [`rent_map_dataset_models::RentTable`]: records are kept when all three
//! category dimensions are in the selected subsets, then grouped by zone
//! and averaged.

pub mod aggregate;
pub mod filter;

pub use aggregate::{aggregate, to_feature_collection};
pub use filter::matches;
