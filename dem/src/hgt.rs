//! NASADEM/SRTM elevation (`.hgt`) file format.
//!
//! A height file is a square of big-endian `i16` samples, north row
//! first, with no header. Resolution is implied by the file length
//! and the southwest corner by the file name.

use crate::{CellId, DemError, Elev, ElevationGrid, TileLayout};
use byteorder::{BigEndian as BE, ReadBytesExt};
use log::debug;
use std::{fs::File, io::BufReader, mem::size_of, path::Path};

/// Reads the height file at `path` into memory.
pub fn load<P: AsRef<Path>>(path: P) -> Result<(CellId, ElevationGrid), DemError> {
    let layout = extract_layout(&path)?;
    let cell = parse_sw_corner(&path)?;
    let dim = layout.dimension();

    debug!("loading {:?} as {}", path.as_ref(), cell);

    let mut file = BufReader::new(File::open(path)?);
    let mut samples = vec![0; dim * dim];
    file.read_i16_into::<BE>(&mut samples)?;

    let grid = ElevationGrid::new(layout.transform(cell), (dim, dim), samples)?;
    Ok((cell, grid))
}

/// Returns the tile layout implied by the length of the file at `path`.
pub fn extract_layout<P: AsRef<Path>>(path: P) -> Result<TileLayout, DemError> {
    const RES_1_ARCSECOND_FILE_LEN: u64 = 3601 * 3601 * size_of::<Elev>() as u64;
    const RES_3_ARCSECOND_FILE_LEN: u64 = 1201 * 1201 * size_of::<Elev>() as u64;
    match path.as_ref().metadata().map(|m| m.len())? {
        RES_1_ARCSECOND_FILE_LEN => Ok(TileLayout::HGT_1_ARCSECOND),
        RES_3_ARCSECOND_FILE_LEN => Ok(TileLayout::HGT_3_ARCSECOND),
        invalid_len => Err(DemError::HgtLen(invalid_len, path.as_ref().to_owned())),
    }
}

/// Parses the cell from a file name such as `N44W072.hgt` or
/// `N44_00_W072_00.hgt`.
pub fn parse_sw_corner<P: AsRef<Path>>(path: P) -> Result<CellId, DemError> {
    let mk_err = || DemError::HgtName(path.as_ref().to_owned());
    let name = path
        .as_ref()
        .file_stem()
        .and_then(std::ffi::OsStr::to_str)
        .ok_or_else(mk_err)?
        .to_ascii_uppercase()
        .replace("_00_", "")
        .replace("_00", "");
    if name.len() != 7 {
        return Err(mk_err());
    }
    let lat_sign = match &name[0..1] {
        "N" => 1,
        "S" => -1,
        _ => return Err(mk_err()),
    };
    let lat = lat_sign * name[1..3].parse::<i16>().map_err(|_| mk_err())?;
    let lon_sign = match &name[3..4] {
        "E" => 1,
        "W" => -1,
        _ => return Err(mk_err()),
    };
    let lon = lon_sign * name[4..7].parse::<i16>().map_err(|_| mk_err())?;
    Ok(CellId::new(lon, lat))
}
