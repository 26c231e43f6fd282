//! Destructible terrain as a solid/empty occupancy grid
//!
//! Row 0 is the top of the field; rows grow downward like screen pixels.
//! Generation fills everything at or below a procedural skyline. Craters
//! only ever clear cells, so the ground under a column can sink but never rise
//! until the next `generate`.

use rand::Rng;

/// Skyline baseline as a fraction of field height
const BASELINE_FRACTION: f32 = 0.65;
/// Highest row the skyline may reach
pub const SKYLINE_MIN_ROW: i32 = 120;
/// Per-column skyline noise amplitude (pixels)
const JITTER: f32 = 6.0;

/// (amplitude, frequency, phase) of each skyline wave
const WAVES: [(f32, f32, f32); 3] = [(30.0, 0.008, 0.0), (20.0, 0.022, 1.3), (45.0, 0.0045, 2.0)];

#[derive(Debug, Clone)]
pub struct Terrain {
    width: usize,
    height: usize,
    /// Row-major, `true` = solid
    cells: Vec<bool>,
}

impl Terrain {
    /// Create an empty (all air) terrain
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Create and immediately generate a terrain
    pub fn generated<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        let mut terrain = Self::new(width, height);
        terrain.generate(rng);
        terrain
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Replace the whole grid with a fresh skyline. Crater history is lost.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cells.fill(false);
        let baseline = (self.height as f32 * BASELINE_FRACTION) as i32;
        let lowest = self.height as i32 - 1;

        for x in 0..self.width {
            let fx = x as f32;
            let h: f32 = WAVES
                .iter()
                .map(|&(amp, freq, phase)| (fx * freq + phase).sin() * amp)
                .sum();
            let jitter = rng.random_range(-JITTER..JITTER);
            let skyline = (baseline - (h + jitter) as i32).clamp(SKYLINE_MIN_ROW.min(lowest), lowest);

            for y in skyline.max(0) as usize..self.height {
                self.cells[y * self.width + x] = true;
            }
        }
    }

    /// Topmost solid row in column `x` (clamped into the grid), or `height` if
    /// the column has been blasted clean.
    pub fn ground_y_at(&self, x: i32) -> i32 {
        if self.width == 0 {
            return self.height as i32;
        }
        let x = x.clamp(0, self.width as i32 - 1) as usize;
        (0..self.height)
            .find(|&y| self.cells[y * self.width + x])
            .unwrap_or(self.height) as i32
    }

    /// Whether (x, y) is inside the grid and solid. Out of bounds is air.
    pub fn collides(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) => self.cells[i],
            None => false,
        }
    }

    /// Clear a disc of `radius` around (cx, cy), clipped to the grid
    pub fn destroy(&mut self, cx: i32, cy: i32, radius: i32) {
        if radius < 0 {
            return;
        }
        let r2 = radius * radius;
        let x0 = (cx - radius).max(0);
        let x1 = (cx + radius).min(self.width as i32 - 1);
        let y0 = (cy - radius).max(0);
        let y1 = (cy + radius).min(self.height as i32 - 1);

        for y in y0..=y1 {
            let dy = y - cy;
            for x in x0..=x1 {
                let dx = x - cx;
                if dx * dx + dy * dy <= r2 {
                    self.cells[y as usize * self.width + x as usize] = false;
                }
            }
        }
    }

    /// Row-major solid flags, for renderers
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field(seed: u64) -> Terrain {
        Terrain::generated(FIELD_WIDTH, FIELD_HEIGHT, &mut Pcg32::seed_from_u64(seed))
    }

    #[test]
    fn test_generate_is_solid_below_skyline_only() {
        let terrain = field(7);
        for x in [0, 100, 480, 959] {
            let ground = terrain.ground_y_at(x);
            assert!(!terrain.collides(x, ground - 1));
            for y in ground..FIELD_HEIGHT as i32 {
                assert!(terrain.collides(x, y), "column {x} has a hole at {y}");
            }
        }
    }

    #[test]
    fn test_out_of_bounds_is_never_solid() {
        let terrain = field(1);
        assert!(!terrain.collides(-1, 500));
        assert!(!terrain.collides(FIELD_WIDTH as i32, 500));
        assert!(!terrain.collides(10, FIELD_HEIGHT as i32));
        assert!(!terrain.collides(10, -3));
    }

    #[test]
    fn test_ground_query_clamps_column() {
        let terrain = field(3);
        assert_eq!(terrain.ground_y_at(-50), terrain.ground_y_at(0));
        assert_eq!(
            terrain.ground_y_at(5000),
            terrain.ground_y_at(FIELD_WIDTH as i32 - 1)
        );
    }

    #[test]
    fn test_empty_column_reports_height() {
        let terrain = Terrain::new(16, 32);
        assert_eq!(terrain.ground_y_at(4), 32);
    }

    #[test]
    fn test_destroy_clears_disc() {
        let mut terrain = field(11);
        let ground = terrain.ground_y_at(300);
        terrain.destroy(300, ground + 10, 24);
        assert!(!terrain.collides(300, ground + 10));
        assert!(!terrain.collides(300 + 24, ground + 10));
        assert!(terrain.ground_y_at(300) >= ground + 34);
        // Just outside the rim is untouched
        assert!(terrain.collides(300, ground + 35));
    }

    #[test]
    fn test_destroy_clips_at_edges() {
        let mut terrain = field(5);
        terrain.destroy(0, FIELD_HEIGHT as i32 - 1, 24);
        terrain.destroy(FIELD_WIDTH as i32 + 10, -10, 30);
        assert!(!terrain.collides(0, FIELD_HEIGHT as i32 - 1));
    }

    #[test]
    fn test_generate_discards_craters() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut terrain = Terrain::generated(FIELD_WIDTH, FIELD_HEIGHT, &mut rng);
        terrain.destroy(480, 400, 60);
        terrain.generate(&mut rng);
        assert!(terrain.collides(480, 400));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_ground_stays_in_band(seed in any::<u64>()) {
            let terrain = field(seed);
            for x in 0..FIELD_WIDTH as i32 {
                let ground = terrain.ground_y_at(x);
                prop_assert!(ground >= SKYLINE_MIN_ROW);
                prop_assert!(ground < FIELD_HEIGHT as i32);
            }
        }

        #[test]
        fn prop_craters_never_raise_ground(
            seed in any::<u64>(),
            cx in 0i32..FIELD_WIDTH as i32,
            cy in 0i32..FIELD_HEIGHT as i32,
            radius in 1i32..60,
        ) {
            let mut terrain = field(seed);
            let before: Vec<i32> = (0..FIELD_WIDTH as i32).map(|x| terrain.ground_y_at(x)).collect();
            terrain.destroy(cx, cy, radius);
            for (x, prior) in before.iter().enumerate() {
                prop_assert!(terrain.ground_y_at(x as i32) >= *prior);
            }
        }
    }
}
