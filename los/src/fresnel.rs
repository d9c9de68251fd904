//! Fresnel zone geometry.

use num_traits::{AsPrimitive, Float, FloatConst, FromPrimitive};
use std::{iter::Iterator, ops::Range};
use terrain::math::linspace;

/// Default number of vertices in a [`fresnel_ellipse`] outline.
pub const ELLIPSE_POINTS: usize = 300;

/// Returns the wavelength, in meters, of a signal at `f_hz`.
pub fn wavelength<T>(f_hz: T) -> T
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    crate::C.as_() / f_hz
}

/// Represents the lower nth fresnel zone of a radio link.
#[derive(Debug)]
pub struct FresnelZone<T> {
    /// Which fresnel zone we're interested in.
    zone: u8,
    wavelength: T,
    distance_m: T,
}

impl<T> FresnelZone<T> {
    /// Returns the `zone`th fresnel zone of a `distance_m` long link
    /// at `f_hz`.
    pub fn new(zone: u8, f_hz: T, distance_m: T) -> Self
    where
        T: Float + 'static,
        usize: AsPrimitive<T>,
    {
        Self {
            zone,
            wavelength: wavelength(f_hz),
            distance_m,
        }
    }

    /// Returns the zone radius at `len` evenly spaced points, from
    /// one end of the link to the other.
    pub fn iter(&self, len: usize) -> FresnelZoneIter<T>
    where
        T: Copy + 'static,
        u8: AsPrimitive<T>,
    {
        FresnelZoneIter {
            zone: self.zone.as_(),
            wavelength: self.wavelength,
            distance_m: self.distance_m,
            range: 0..len,
        }
    }

    /// Returns the zone radius `d1` meters from one end of the link.
    pub fn radius_at(&self, d1: T) -> T
    where
        T: Float + 'static,
        u8: AsPrimitive<T>,
    {
        radius(self.zone.as_(), self.wavelength, d1, self.distance_m)
    }
}

/// Iterator over the radii of a [`FresnelZone`].
#[derive(Debug)]
pub struct FresnelZoneIter<T> {
    zone: T,
    wavelength: T,
    range: Range<usize>,
    distance_m: T,
}

impl<T> Iterator for FresnelZoneIter<T>
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.range.next().map(|n| {
            let steps = self.range.end.saturating_sub(1).max(1);
            let d1 = self.distance_m * (n.as_() / steps.as_());
            radius(self.zone, self.wavelength, d1, self.distance_m)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<T> ExactSizeIterator for FresnelZoneIter<T>
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
}

fn radius<T: Float>(zone: T, wavelength: T, d1: T, distance_m: T) -> T {
    let d2 = (distance_m - d1).max(T::zero());
    (zone * wavelength * d1 * d2 / distance_m).sqrt()
}

/// Returns the outline of the first Fresnel ellipse around the path
/// from `(x1, y1)` to `(x2, y2)`, as `n` vertices.
///
/// Coordinates are in meters: distance along the path on the x axis,
/// height on the y axis. The ellipse is centred on the midpoint,
/// its semi-major axis is half the path length, its semi-minor axis
/// is `sqrt(λ·a) / 2`, and it is rotated to the slope of the path.
/// The first and last vertices coincide with the far end of the
/// major axis.
pub fn fresnel_ellipse<T>(x1: T, y1: T, x2: T, y2: T, f_hz: T, n: usize) -> Vec<(T, T)>
where
    T: Float + FloatConst + FromPrimitive + 'static,
    usize: AsPrimitive<T>,
{
    let two = T::one() + T::one();
    let (dx, dy) = (x2 - x1, y2 - y1);
    let a = dx.hypot(dy) / two;
    let b = (wavelength(f_hz) * a).sqrt() / two;
    let (sin_w, cos_w) = dy.atan2(dx).sin_cos();
    let (cx, cy) = ((x1 + x2) / two, (y1 + y2) / two);

    linspace(T::zero(), T::TAU(), n)
        .map(|t| {
            let (sin_t, cos_t) = t.sin_cos();
            let (x, y) = (a * cos_t, b * sin_t);
            (cx + x * cos_w - y * sin_w, cy + x * sin_w + y * cos_w)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{fresnel_ellipse, wavelength, FresnelZone};
    use approx::assert_relative_eq;

    #[test]
    fn test_wavelength() {
        assert_relative_eq!(wavelength(144e6_f64), 2.081_892_069_444_444, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_len_fresnel_zone_iter() {
        let mut iter = FresnelZone::new(1, 1.0_f64, 10e3).iter(0);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_fresnel_zones() {
        for (zone, mid) in [
            (1, 9.125_551_094_469_735),
            (2, 12.905_478_121_927_74),
            (3, 15.805_918_142_687_355),
        ] {
            let radii: Vec<f64> = FresnelZone::new(zone, 900e6, 1e3).iter(3).collect();
            assert_eq!(radii.len(), 3);
            assert_relative_eq!(radii[0], 0.0);
            assert_relative_eq!(radii[1], mid, epsilon = 1e-9);
            assert_relative_eq!(radii[2], 0.0);
        }
    }

    #[test]
    fn test_radius_at_matches_iter() {
        let zone = FresnelZone::new(1, 144e6_f64, 20e3);
        let radii: Vec<f64> = zone.iter(5).collect();
        assert_relative_eq!(radii[1], zone.radius_at(5e3), epsilon = 1e-9);
        assert_relative_eq!(radii[2], zone.radius_at(10e3), epsilon = 1e-9);
        // Widest at the midpoint: sqrt(λ·D) / 2.
        assert_relative_eq!(radii[2], (wavelength(144e6_f64) * 20e3).sqrt() / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_level_ellipse() {
        let lambda = wavelength(300e6_f64);
        let b = (lambda * 500.0).sqrt() / 2.0;
        let outline: Vec<(f64, f64)> = fresnel_ellipse(0.0, 0.0, 1000.0, 0.0, 300e6, 5);
        assert_eq!(outline.len(), 5);

        let expected: [(f64, f64); 5] = [(1000.0, 0.0), (500.0, b), (0.0, 0.0), (500.0, -b), (1000.0, 0.0)];
        for ((x, y), (ex, ey)) in outline.into_iter().zip(expected) {
            assert_relative_eq!(x, ex, epsilon = 1e-9);
            assert_relative_eq!(y, ey, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_ellipse_follows_path_slope() {
        let outline: Vec<(f64, f64)> = fresnel_ellipse(0.0, 100.0, 0.0, 1100.0, 144e6, 300);
        assert_eq!(outline.len(), 300);
        // Major axis runs up the y axis, centred on (0, 600).
        assert_relative_eq!(outline[0].0, 0.0, epsilon = 1e-9);
        assert_relative_eq!(outline[0].1, 1100.0, epsilon = 1e-9);
        assert_relative_eq!(outline[299].1, 1100.0, epsilon = 1e-9);
        let b = (wavelength(144e6_f64) * 500.0).sqrt() / 2.0;
        for (x, y) in outline {
            assert!(x.abs() <= b + 1e-9);
            assert!((y - 600.0).abs() <= 500.0 + 1e-9);
        }
    }
}
