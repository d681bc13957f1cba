//! Core body representation for 2D rigid body simulation.

#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(clippy::cast_lossless)]

pub mod body;
pub mod body_types;
pub mod config;
pub mod error;
pub mod geometry;
pub mod quantities;
pub mod registry;
pub mod scratch;
pub mod state;

/// Floating point type used for physics simulation.
#[allow(non_camel_case_types)]
pub type fph = f64;
