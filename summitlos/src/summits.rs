//! SOTA summit list.

use anyhow::{Context, Error as AnyError};
use geo::{
    geometry::{Coord, Point, Rect},
    GeodesicDestination, GeodesicDistance,
};
use log::debug;
use serde::Deserialize;
use std::{fs, io::Read, path::Path};
use terrain::CellId;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Summit {
    #[serde(rename = "SummitCode")]
    pub code: String,

    #[serde(rename = "Longitude")]
    pub longitude: f64,

    #[serde(rename = "Latitude")]
    pub latitude: f64,

    /// Published summit height.
    #[serde(rename = "AltM", default)]
    pub alt_m: Option<f64>,
}

impl Summit {
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

#[derive(Debug, Default)]
pub struct SummitList {
    summits: Vec<Summit>,
}

impl SummitList {
    pub fn from_path(path: &Path) -> Result<Self, AnyError> {
        let file = fs::File::open(path).with_context(|| format!("opening {path:?}"))?;
        Self::from_reader(file).with_context(|| format!("reading {path:?}"))
    }

    /// Parses a summit list, skipping the title line the SOTA
    /// database puts above the header.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, AnyError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let body = match text.split_once('\n') {
            Some((first, rest)) if !first.contains("SummitCode") => rest,
            _ => text.as_str(),
        };

        let csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(body.as_bytes());
        let mut summits = Vec::new();
        for entry_res in csv_reader.into_deserialize() {
            summits.push(entry_res?);
        }
        debug!("parsed {} summits", summits.len());
        Ok(Self { summits })
    }

    pub fn len(&self) -> usize {
        self.summits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summits.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&Summit> {
        self.summits
            .iter()
            .find(|summit| summit.code.eq_ignore_ascii_case(code))
    }

    /// Returns the summits no more than `radius_m` meters from
    /// `center`, in list order.
    pub fn within(&self, center: Coord<f64>, radius_m: f64) -> Vec<&Summit> {
        let center = Point::from(center);
        self.summits
            .iter()
            .filter(|summit| center.geodesic_distance(&Point::from(summit.coord())) <= radius_m)
            .collect()
    }
}

/// Returns the lon/lat rectangle enclosing the circle of `radius_m`
/// meters around `center`.
///
/// The circle is traced at every whole degree of bearing, slightly
/// enlarged so the extremes falling between two bearings stay inside.
/// Circles crossing a pole or the antimeridian are not handled.
pub fn bounding_square(center: Coord<f64>, radius_m: f64) -> Rect<f64> {
    let center = Point::from(center);
    let radius_m = radius_m * 1.001;
    let (mut min, mut max) = (center.0, center.0);
    for bearing in 0..360 {
        let Coord { x, y } = center
            .geodesic_destination(f64::from(bearing), radius_m)
            .0;
        min = Coord {
            x: min.x.min(x),
            y: min.y.min(y),
        };
        max = Coord {
            x: max.x.max(x),
            y: max.y.max(y),
        };
    }
    Rect::new(min, max)
}

/// Returns every cell overlapping `bounds`.
pub fn cells_in(bounds: &Rect<f64>) -> impl Iterator<Item = CellId> {
    let (min, max) = (bounds.min(), bounds.max());
    let (sw, ne) = (CellId::containing(min), CellId::containing(max));
    (sw.lat..=ne.lat).flat_map(move |lat| (sw.lon..=ne.lon).map(move |lon| CellId::new(lon, lat)))
}

#[cfg(test)]
mod tests {
    use super::{bounding_square, cells_in, Summit, SummitList};
    use geo::{
        geometry::{Coord, Point},
        GeodesicDestination, Intersects,
    };
    use terrain::CellId;

    const LIST: &str = "\
SOTA Summits List (Date=01/10/2026)
SummitCode,AssociationName,RegionName,SummitName,AltM,AltFt,Longitude,Latitude,Points
W1/HA-001,USA (W1),NH,Mount Washington,1916,6288,-71.3032,44.2705,10
W1/HA-002,USA (W1),NH,Mount Adams,1760,5774,-71.2913,44.3206,10
W1/HA-003,USA (W1),NH,Mount Jefferson,1741,5712,-71.3168,44.3043,10
W1/HA-050,USA (W1),NH,Mount Monadnock,965,3166,-72.1085,42.8612,8
";

    #[test]
    fn test_parse_with_title() {
        let summits = SummitList::from_reader(LIST.as_bytes()).unwrap();
        assert_eq!(summits.len(), 4);
        let washington = summits.get("W1/HA-001").unwrap();
        assert_eq!(washington.alt_m, Some(1916.0));
        assert_eq!(washington.coord(), Coord { x: -71.3032, y: 44.2705 });
        assert!(summits.get("w1/ha-002").is_some());
        assert!(summits.get("W7A/AW-001").is_none());
    }

    #[test]
    fn test_parse_without_title() {
        let body = LIST.split_once('\n').unwrap().1;
        let summits = SummitList::from_reader(body.as_bytes()).unwrap();
        assert_eq!(summits.len(), 4);
    }

    #[test]
    fn test_within_radius() {
        let summits = SummitList::from_reader(LIST.as_bytes()).unwrap();
        let washington = summits.get("W1/HA-001").unwrap().coord();

        let near: Vec<&str> = summits
            .within(washington, 10_000.0)
            .into_iter()
            .map(|summit| summit.code.as_str())
            .collect();
        assert_eq!(near, vec!["W1/HA-001", "W1/HA-002", "W1/HA-003"]);

        // Monadnock is about 170 km away.
        assert_eq!(summits.within(washington, 100_000.0).len(), 3);
        assert_eq!(summits.within(washington, 200_000.0).len(), 4);
    }

    #[test]
    fn test_bounding_square() {
        // Roughly one degree each way at the equator.
        let square = bounding_square(Coord { x: 0.0, y: 0.0 }, 111_195.0);
        for bound in [square.min().x, square.min().y, square.max().x, square.max().y] {
            assert!((0.99..1.01).contains(&bound.abs()), "{bound}");
        }
        assert!(square.min().x < 0.0 && square.min().y < 0.0);
    }

    #[test]
    fn test_high_latitude_circle_fits_square() {
        let center = Coord { x: -71.3, y: 64.0 };
        let radius_m = 100_000.0;
        let square = bounding_square(center, radius_m);

        let summits: Vec<Summit> = (0..72)
            .map(|i| {
                let point = Point::from(center)
                    .geodesic_destination(f64::from(i * 5), radius_m * 0.999);
                Summit {
                    code: format!("X/XX-{i:03}"),
                    longitude: point.x(),
                    latitude: point.y(),
                    alt_m: None,
                }
            })
            .collect();
        for summit in &summits {
            assert!(square.intersects(&summit.coord()), "{summit:?}");
        }

        let list = SummitList { summits };
        assert_eq!(list.within(center, radius_m).len(), 72);
    }

    #[test]
    fn test_cells_in() {
        let square = bounding_square(Coord { x: -71.3, y: 44.27 }, 100_000.0);
        let cells: Vec<CellId> = cells_in(&square).collect();
        assert!(cells.contains(&CellId::new(-72, 44)));
        assert!(cells.contains(&CellId::new(-71, 45)));
        assert!(cells.contains(&CellId::new(-73, 43)));
        assert_eq!(cells.len(), 9);
        assert!(cells.windows(2).all(|w| w[0] != w[1]));
    }
}
