//! Projection utilities for grid processing.
//!
//! This module handles coordinate transformations and interpolation
//! for re-projecting raster sources onto regular geographic grids.

pub mod interpolation;
pub mod reproject;

pub use interpolation::{bilinear_interpolate, interpolate, nearest_interpolate};
pub use reproject::reproject;
