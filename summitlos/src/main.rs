#![allow(clippy::cast_possible_truncation)]

mod options;
mod progress;
mod summits;

use anyhow::{anyhow, ensure, Error as AnyError};
use clap::Parser;
use log::info;
use los::{
    fresnel::{fresnel_ellipse, ELLIPSE_POINTS},
    is_visible, LineOfSight,
};
use options::{Cli, Command as CliCmd, Format, Link, LosArgs, ProfileArgs};
use progress::make_progress_bar;
use serde::Serialize;
use summits::{bounding_square, cells_in, SummitList};
use terrain::{math::level_earth_curvature, TileDir, TileManager};
use textplots::{Chart, Plot, Shape};

fn main() -> Result<(), AnyError> {
    let Cli {
        tile_dir,
        step,
        cmd,
    } = Cli::parse();

    env_logger::init();

    ensure!(
        step.is_finite() && step > 0.0,
        "step must be a positive number of meters, got {step}"
    );
    let tiles = TileManager::new(TileDir::new(tile_dir)?).with_step_size(step);

    match cmd {
        CliCmd::Los(args) => run_los(&tiles, args),
        CliCmd::Profile(args) => run_profile(&tiles, args),
    }
}

#[derive(Serialize)]
struct VisibilityRow<'a> {
    #[serde(rename = "SummitCode")]
    code: &'a str,
    #[serde(rename = "Visible")]
    visible: bool,
}

/// Checks every summit within range of `summit_code` and writes one
/// "SummitCode,Visible" row per summit.
fn run_los(
    tiles: &TileManager<TileDir>,
    LosArgs {
        summit_code,
        summits,
        max_distance,
        link:
            Link {
                tx_height,
                rx_height,
                rmse,
            },
        output,
    }: LosArgs,
) -> Result<(), AnyError> {
    let summits = {
        let list = SummitList::from_path(&summits)?;
        ensure!(!list.is_empty(), "no summits in {summits:?}");
        info!("loaded {} summits from {summits:?}", list.len());
        list
    };
    let summit = summits
        .get(&summit_code)
        .ok_or_else(|| anyhow!("summit {summit_code} not found"))?;
    let center = summit.coord();
    let radius_m = max_distance * 1000.0;

    let fetched = tiles.load_cells(cells_in(&bounding_square(center, radius_m)))?;
    info!("preloaded {fetched} cells around {}", summit.code);

    let others: Vec<_> = summits
        .within(center, radius_m)
        .into_iter()
        .filter(|other| other.code != summit.code)
        .collect();
    info!(
        "{} summits within {max_distance} km of {}",
        others.len(),
        summit.code
    );

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&output)?;
    writer.write_record(["SummitCode", "Visible"])?;

    let pb = make_progress_bar(summit.code.clone(), others.len() as u64);
    let mut visible_count = 0_usize;
    for other in others {
        // Summits sharing a location trivially see each other.
        let visible = other.coord() == center
            || is_visible(center, other.coord(), tiles, tx_height, rx_height, rmse)?;
        visible_count += usize::from(visible);
        writer.serialize(VisibilityRow {
            code: &other.code,
            visible,
        })?;
        pb.inc(1);
    }
    writer.flush()?;
    pb.finish();

    info!("{visible_count} visible, results in {output:?}");
    Ok(())
}

fn run_profile(
    tiles: &TileManager<TileDir>,
    ProfileArgs {
        start,
        dest,
        link,
        freq,
        format,
    }: ProfileArgs,
) -> Result<(), AnyError> {
    let los = LineOfSight::builder()
        .start(start.0)
        .end(dest.0)
        .tx_height(link.tx_height)
        .rx_height(link.rx_height)
        .rmse(link.rmse)
        .build(tiles)?;

    match format {
        Format::Csv => print_csv(&los, freq)?,
        Format::Json => print_json(&los, freq)?,
        Format::Plot => plot_ascii(&los, link, freq),
    };
    Ok(())
}

/// # Example with gnuplot
///
/// ```sh
/// summitlos --tile-dir=data/nasadem/3arcsecond/ profile --start=44.27,-71.30 --dest=44.35,-71.10 csv | tr ',' ' ' > ~/.tmp/plot && gnuplot -p -e "plot for [col=5:6] '~/.tmp/plot' using 1:col with lines"
/// ```
fn print_csv(los: &LineOfSight, freq: f64) -> Result<(), AnyError> {
    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct CsvRow {
        distance: f64,
        longitude: f64,
        latitude: f64,
        elevation: f64,
        corrected: f64,
        #[serde(rename = "LOS")]
        los: f64,
        fresnel: f64,
    }

    let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
    for (i, fresnel) in los.fresnel_zone_m(freq).into_iter().enumerate() {
        writer.serialize(CsvRow {
            distance: los.distances_m[i],
            longitude: los.points[i].x(),
            latitude: los.points[i].y(),
            elevation: los.terrain_elev_m[i],
            corrected: los.corrected_elev_m[i],
            los: los.los_elev_m[i],
            fresnel,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn print_json(los: &LineOfSight, freq: f64) -> Result<(), AnyError> {
    #[derive(Serialize)]
    struct JsonEntry {
        location: [f64; 2],
        distance: f64,
        elevation: f64,
        los: f64,
        fresnel: f64,
    }

    #[derive(Serialize)]
    struct JsonProfile {
        distance: f64,
        visible: bool,
        obstruction: Option<f64>,
        samples: Vec<JsonEntry>,
    }

    let samples = los
        .points
        .iter()
        .zip(los.distances_m.iter())
        .zip(los.terrain_elev_m.iter())
        .zip(los.los_elev_m.iter())
        .zip(los.fresnel_zone_m(freq))
        .map(
            |((((point, distance), elevation), los_m), fresnel)| JsonEntry {
                location: [point.x(), point.y()],
                distance: *distance,
                elevation: *elevation,
                los: *los_m,
                fresnel,
            },
        )
        .collect();
    let json = serde_json::to_string(&JsonProfile {
        distance: los.distance(),
        visible: los.is_visible(),
        obstruction: los.obstruction.map(|hit| hit.distance_m),
        samples,
    })?;
    println!("{json}");
    Ok(())
}

/// Plots the terrain with the earth bulging between the endpoints,
/// the direct path, and its first Fresnel zone.
fn plot_ascii(los: &LineOfSight, link: Link, freq: f64) {
    let leveled = level_earth_curvature(&los.terrain_elev_m, &los.distances_m);
    let distance = los.distance();
    let (tx, rx) = (
        leveled.first().copied().unwrap_or_default() + link.tx_height,
        leveled.last().copied().unwrap_or_default() + link.rx_height,
    );

    let terrain: Vec<(f32, f32)> = los
        .distances_m
        .iter()
        .zip(leveled.iter())
        .map(|(d, e)| (*d as f32, *e as f32))
        .collect();
    let path = [(0.0, tx as f32), (distance as f32, rx as f32)];
    let zone: Vec<(f32, f32)> = fresnel_ellipse(0.0, tx, distance, rx, freq, ELLIPSE_POINTS)
        .into_iter()
        .map(|(d, e)| (d as f32, e as f32))
        .collect();

    Chart::new(300, 150, 0.0, distance as f32)
        .lineplot(&Shape::Lines(&terrain))
        .lineplot(&Shape::Lines(&path))
        .lineplot(&Shape::Lines(&zone))
        .display();

    match los.obstruction {
        None => println!("visible"),
        Some(hit) => println!("obstructed at {:.0} m", hit.distance_m),
    }
}
