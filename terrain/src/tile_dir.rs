//! `.hgt` tiles from a local directory.

use crate::{TerrainError, TileStore};
use dem::{hgt, CellId, DemError, ElevationGrid, TileLayout};
use log::debug;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// A [`TileStore`] backed by a directory of SRTM/NASADEM height files.
#[derive(Debug, Clone)]
pub struct TileDir {
    /// Directory containing HGT tile files.
    tile_dir: PathBuf,

    /// Layout shared by every tile in `tile_dir`, and used for sea
    /// tiles standing in for missing files.
    layout: TileLayout,
}

impl TileDir {
    pub fn new(tile_dir: PathBuf) -> Result<Self, TerrainError> {
        // Fail early if tile_dir has no `hgt` file, and learn the
        // resolution from the first one we find.
        for entry in std::fs::read_dir(&tile_dir)? {
            let path = entry?.path();
            let is_hgt = path
                .extension()
                .and_then(std::ffi::OsStr::to_str)
                .is_some_and(|ext| ext.eq_ignore_ascii_case("hgt"));
            if is_hgt {
                match hgt::extract_layout(&path) {
                    Ok(layout) => {
                        debug!("{tile_dir:?} holds {}\" tiles", layout.arcseconds());
                        return Ok(Self { tile_dir, layout });
                    }
                    Err(DemError::HgtLen(len, path)) => {
                        debug!("skipping {path:?} with unexpected length {len}");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Err(TerrainError::Path(tile_dir))
    }

    /// Resolution of this directory's tiles.
    pub fn layout(&self) -> TileLayout {
        self.layout
    }
}

impl TileStore for TileDir {
    fn resolve_cell(&self, cell: CellId) -> Result<ElevationGrid, TerrainError> {
        for path in self.candidates(cell) {
            match hgt::load(&path) {
                Ok((_, grid)) if grid.transform() == &self.layout.transform(cell) => {
                    return Ok(grid);
                }
                Ok(_) => {
                    return Err(TerrainError::TileUnavailable {
                        cell,
                        reason: format!(
                            "{path:?} does not match the {}\" tiles in {:?}",
                            self.layout.arcseconds(),
                            self.tile_dir
                        ),
                    });
                }
                Err(DemError::Io(e)) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
        }
        debug!("loading sea tile in lieu of missing tile for {cell}");
        Ok(ElevationGrid::sea(cell, self.layout))
    }
}

/// Private API.
impl TileDir {
    /// File names `cell` may be stored under, in order of preference.
    fn candidates(&self, cell: CellId) -> [PathBuf; 3] {
        let file_name = cell.hgt_name();
        [
            [&self.tile_dir, Path::new(&file_name)].iter().collect(),
            [&self.tile_dir, Path::new(&file_name.to_lowercase())]
                .iter()
                .collect(),
            self.tile_dir.join(format!("{}.hgt", cell.stem())),
        ]
    }
}
