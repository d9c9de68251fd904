//! Geodesy and profile helpers.

mod curvature;
mod geodesy;
mod linspace;

pub use self::{
    curvature::{apply_earth_curvature, earth_curvature, level_earth_curvature},
    geodesy::{interpolate_points, line, line_distance, linear_interpolate},
    linspace::linspace,
};
