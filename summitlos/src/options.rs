use anyhow::{anyhow, Error as AnyError};
use clap::{Args, Parser, Subcommand};
use geo::geometry::Coord;
use std::{path::PathBuf, str::FromStr};

/// Summit to summit line of sight over DEM terrain.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Directory of `.hgt` elevation tiles.
    #[arg(short, long)]
    pub tile_dir: PathBuf,

    /// Maximum distance between profile samples, in meters.
    #[arg(long, default_value_t = 30.0)]
    pub step: f64,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Check which summits within range are visible from a summit.
    Los(LosArgs),

    /// Inspect the path between two points.
    Profile(ProfileArgs),
}

/// Antenna and terrain model parameters.
#[derive(Args, Debug, Clone, Copy)]
pub struct Link {
    /// Transmitter height above ground, in meters.
    #[arg(long, default_value_t = 2.0)]
    pub tx_height: f64,

    /// Receiver height above ground, in meters.
    #[arg(long, default_value_t = 2.0)]
    pub rx_height: f64,

    /// Vertical uncertainty of the elevation data, in meters.
    #[arg(long, default_value_t = 5.0)]
    pub rmse: f64,
}

#[derive(Args, Debug, Clone)]
pub struct LosArgs {
    /// Code of the summit to look from, e.g. "W1/HA-001".
    pub summit_code: String,

    /// SOTA summit list CSV.
    #[arg(long, default_value = "summitslist.csv")]
    pub summits: PathBuf,

    /// Search radius around the summit, in kilometers.
    #[arg(long, default_value_t = 100.0)]
    pub max_distance: f64,

    #[command(flatten)]
    pub link: Link,

    /// Where to write "SummitCode,Visible" results.
    #[arg(short, long, default_value = "output.csv")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Start "lat,lon".
    #[arg(long)]
    pub start: LatLon,

    /// Destination "lat,lon".
    #[arg(long)]
    pub dest: LatLon,

    #[command(flatten)]
    pub link: Link,

    /// Signal frequency in Hz, for Fresnel zones.
    #[arg(long, default_value_t = 144e6)]
    pub freq: f64,

    #[command(subcommand)]
    pub format: Format,
}

#[derive(Debug, Subcommand, Clone, Copy)]
pub enum Format {
    /// Print profile values to stdout.
    Csv,

    /// Print profile values to stdout as JSON.
    Json,

    /// Plot to terminal.
    Plot,
}

#[derive(Clone, Debug, Copy, PartialEq)]
pub struct LatLon(pub Coord<f64>);

impl FromStr for LatLon {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (lat_str, lon_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid lat,lon"))?;
        let lat = f64::from_str(lat_str.trim())?;
        let lon = f64::from_str(lon_str.trim())?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(anyhow!("{lat},{lon} is out of range"));
        }
        Ok(Self(Coord { y: lat, x: lon }))
    }
}
