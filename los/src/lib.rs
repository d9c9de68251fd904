//! # Line of Sight
//!
//! `los` decides whether a radio path between two points clears the
//! terrain, and provides Fresnel zone geometry for plotting and
//! reporting.

mod error;
pub mod fresnel;
mod visibility;

pub use crate::{
    error::LosError,
    visibility::{
        first_obstruction, is_visible, LineOfSight, LineOfSightBuilder, Obstruction,
        DEFAULT_ANTENNA_HEIGHT_M, DEFAULT_RMSE_M,
    },
};
pub use {geo, terrain};

/// Speed of light in m/s
const C: usize = 299_792_458;
