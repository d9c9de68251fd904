use criterion::{criterion_group, criterion_main, Criterion};
use geo::geometry::Coord;
use terrain::{CellId, ElevationGrid, TerrainError, TileLayout, TileManager, TileStore};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Sloped 3 arc-second terrain, generated instead of read from disk.
struct RampStore;

impl TileStore for RampStore {
    fn resolve_cell(&self, cell: CellId) -> Result<ElevationGrid, TerrainError> {
        let layout = TileLayout::HGT_3_ARCSECOND;
        let dim = layout.dimension();
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let samples = (0..dim * dim).map(|i| (i % dim) as i16).collect();
        Ok(ElevationGrid::new(
            layout.transform(cell),
            (dim, dim),
            samples,
        )?)
    }
}

fn terrain_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("Terrain Profile");

    let start = Coord {
        x: -71.30830716441369,
        y: 44.28309806603165,
    };

    let end = Coord {
        x: -71.2972073283768,
        y: 44.25628098424278,
    };

    let far_end = Coord {
        x: -70.51,
        y: 44.93,
    };

    let tiles = TileManager::new(RampStore).with_step_size(90.0);
    tiles.profile(start, far_end).unwrap();

    group.bench_with_input("short", &(&tiles, start, end), |b, (t, s, e)| {
        b.iter(|| t.profile(*s, *e).unwrap())
    });

    group.bench_with_input("long", &(&tiles, start, far_end), |b, (t, s, e)| {
        b.iter(|| t.profile(*s, *e).unwrap())
    });
}

criterion_group!(benches, terrain_profile);
criterion_main!(benches);
