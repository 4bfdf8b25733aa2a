//! Parallel row scheduling.
//!
//! Rows are the unit of work. Each row draws its samples from its own
//! generator, seeded from the base seed and the row index, so the image
//! does not depend on which thread rendered which row.

use crate::renderer::render_pixel;
use crate::{Camera, Color, Hittable, ImageBuffer, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::thread;

/// How rows are distributed over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// One OS thread per core, each owning a contiguous band of rows.
    RowBands,
    /// Rows handed out dynamically by the rayon pool.
    #[default]
    PerRow,
}

/// A contiguous run of image rows handled by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// First row of the band
    pub start_row: u32,
    /// Number of rows in the band
    pub rows: u32,
    /// Index of this band (worker number)
    pub index: usize,
}

/// Split `height` rows into at most `workers` bands of near-equal size.
///
/// Earlier bands take one extra row when the split is uneven. Never returns
/// an empty band.
pub fn generate_row_bands(height: u32, workers: usize) -> Vec<RowBand> {
    let workers = (workers.max(1) as u32).min(height.max(1));
    let base = height / workers;
    let extra = height % workers;

    let mut bands = Vec::with_capacity(workers as usize);
    let mut start_row = 0;
    for index in 0..workers {
        let rows = base + u32::from(index < extra);
        if rows == 0 {
            continue;
        }
        bands.push(RowBand {
            start_row,
            rows,
            index: index as usize,
        });
        start_row += rows;
    }

    bands
}

/// Seed for the generator of a single row.
pub fn row_seed(base_seed: u64, row: u32) -> u64 {
    base_seed ^ (row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Render one row into `out`, which must be `camera.image_width` long.
pub fn render_row(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    config: &RenderConfig,
    base_seed: u64,
    row: u32,
    out: &mut [Color],
) {
    let mut rng = StdRng::seed_from_u64(row_seed(base_seed, row));

    for (col, pixel) in out.iter_mut().enumerate() {
        *pixel = render_pixel(camera, world, lights, col as u32, row, config, &mut rng);
    }
}

/// Render every row of `image` using `config.schedule`.
pub fn render_rows(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    config: &RenderConfig,
    base_seed: u64,
    image: &mut ImageBuffer,
) {
    match config.schedule {
        Schedule::PerRow => {
            let width = (image.width as usize).max(1);
            image
                .pixels
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(row, out)| {
                    render_row(camera, world, lights, config, base_seed, row as u32, out);
                });
        }
        Schedule::RowBands => {
            let workers = thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1);
            let bands = generate_row_bands(image.height, workers);
            let width = image.width as usize;

            thread::scope(|scope| {
                let mut rest = image.pixels.as_mut_slice();

                for band in &bands {
                    let (pixels, tail) =
                        std::mem::take(&mut rest).split_at_mut(band.rows as usize * width);
                    rest = tail;

                    scope.spawn(move || {
                        log::debug!(
                            "Band {} rendering rows {}..{}",
                            band.index,
                            band.start_row,
                            band.start_row + band.rows
                        );
                        let rows = pixels.chunks_mut(width.max(1));
                        for (offset, out) in rows.enumerate() {
                            let row = band.start_row + offset as u32;
                            render_row(camera, world, lights, config, base_seed, row, out);
                        }
                    });
                }
            });
        }
    }
}
