use std::fmt::Display;

use rand::Rng;

pub(crate) mod defaults {
    pub const PAD_WIDTH: f64 = 200.;
    pub const PAD_HEIGHT: f64 = 20.;
    pub const STEP_X_MIN: f64 = 70.;
    pub const STEP_X_MAX: f64 = 120.;
    pub const STEP_Y_MAX: f64 = 40.;
    pub const BAND_MIN: f64 = 400.;
    pub const BAND_MAX: f64 = 560.;
    pub const SHELF_MARGIN: usize = 1;
    pub const GEN_PAD_WIDTH: f64 = 64.;
}

#[derive(Debug)]
pub enum TerrainError {
    MismatchedProfile { xs: usize, ys: usize },
    TooFewVertices { count: usize },
    NonMonotonicProfile { index: usize },
    ProfileNotAnchored { first_x: f64 },
    PadOutOfBounds,
    PadOffGround,
    NoFlatShelf,
    InvalidStepRange,
    InvalidBand,
}

impl Display for TerrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Landing pad rectangle. `y` is the pad top; the pad rests on the local
/// ground, so `y + height` equals the ground height under it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PadBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Parameters for the random-walk profile generator.
#[derive(Clone, Debug)]
pub struct GenParams {
    pub width: f64,
    pub step_x_min: f64,
    pub step_x_max: f64,
    pub step_y_max: f64,
    pub band_min: f64,
    pub band_max: f64,
    pub shelf_margin: usize,
    pub pad_width: f64,
    pub pad_height: f64,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            width: 800.,
            step_x_min: defaults::STEP_X_MIN,
            step_x_max: defaults::STEP_X_MAX,
            step_y_max: defaults::STEP_Y_MAX,
            band_min: defaults::BAND_MIN,
            band_max: defaults::BAND_MAX,
            shelf_margin: defaults::SHELF_MARGIN,
            pad_width: defaults::GEN_PAD_WIDTH,
            pad_height: defaults::PAD_HEIGHT,
        }
    }
}

impl GenParams {
    pub fn with_width(self, width: f64) -> Self {
        Self { width, ..self }
    }
    pub fn with_step_x(self, step_x_min: f64, step_x_max: f64) -> Self {
        Self {
            step_x_min,
            step_x_max,
            ..self
        }
    }
    pub fn with_step_y_max(self, step_y_max: f64) -> Self {
        Self { step_y_max, ..self }
    }
    pub fn with_band(self, band_min: f64, band_max: f64) -> Self {
        Self {
            band_min,
            band_max,
            ..self
        }
    }
    pub fn with_shelf_margin(self, shelf_margin: usize) -> Self {
        Self {
            shelf_margin,
            ..self
        }
    }
    pub fn with_pad(self, pad_width: f64, pad_height: f64) -> Self {
        Self {
            pad_width,
            pad_height,
            ..self
        }
    }

    fn validate(&self) -> Result<(), TerrainError> {
        if self.width <= 0.
            || self.step_x_min <= 0.
            || self.step_x_min > self.step_x_max
            || self.step_y_max < 0.
        {
            return Err(TerrainError::InvalidStepRange);
        }
        if self.band_min >= self.band_max {
            return Err(TerrainError::InvalidBand);
        }
        Ok(())
    }
}

/// Ground profile plus landing pad for one level attempt. Immutable once
/// constructed; the vertices run from x = 0 to x = width with strictly
/// increasing x.
#[derive(Clone, Debug, PartialEq)]
pub struct Terrain {
    x: Vec<f64>,
    y: Vec<f64>,
    pad: PadBounds,
}

impl Terrain {
    /// Validated construction from an explicit vertex list.
    pub fn try_new(x: Vec<f64>, y: Vec<f64>, pad: PadBounds) -> Result<Self, TerrainError> {
        if x.len() != y.len() {
            return Err(TerrainError::MismatchedProfile {
                xs: x.len(),
                ys: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(TerrainError::TooFewVertices { count: x.len() });
        }
        if x[0] != 0. {
            return Err(TerrainError::ProfileNotAnchored { first_x: x[0] });
        }
        if let Some(index) = x.windows(2).position(|w| w[0] >= w[1]) {
            return Err(TerrainError::NonMonotonicProfile { index });
        }

        let width = x[x.len() - 1];
        if pad.x < 0. || pad.x + pad.width > width || pad.width <= 0. || pad.height <= 0. {
            return Err(TerrainError::PadOutOfBounds);
        }
        // The pad must rest on level ground across its whole span.
        let left = interpolate(&x, &y, pad.x);
        let right = interpolate(&x, &y, pad.x + pad.width);
        if left != right || pad.y != left - pad.height {
            return Err(TerrainError::PadOffGround);
        }

        Ok(Self { x, y, pad })
    }

    /// Flat strip at `ground_y` with the pad resting on it at `pad_x`.
    pub fn flat(width: f64, ground_y: f64, pad_x: f64) -> Result<Self, TerrainError> {
        Self::try_new(
            vec![0., width],
            vec![ground_y, ground_y],
            PadBounds {
                x: pad_x,
                y: ground_y - defaults::PAD_HEIGHT,
                width: defaults::PAD_WIDTH,
                height: defaults::PAD_HEIGHT,
            },
        )
    }

    /// Random-walk profile with a guaranteed flat shelf carrying the pad.
    ///
    /// Walks from x = 0 in random increments, perturbing y inside the
    /// vertical band, pins the last vertex to `width`, then levels one
    /// interior segment (chosen away from both ends) and centers the pad
    /// on it. Deterministic for a fixed RNG seed.
    pub fn generate(params: &GenParams, rng: &mut impl Rng) -> Result<Self, TerrainError> {
        params.validate()?;

        let mut xs = vec![0.];
        let mut ys = vec![rng.gen_range(params.band_min..=params.band_max)];
        loop {
            let next_x = xs[xs.len() - 1] + rng.gen_range(params.step_x_min..=params.step_x_max);
            let delta = rng.gen_range(-params.step_y_max..=params.step_y_max);
            let next_y = (ys[ys.len() - 1] + delta).clamp(params.band_min, params.band_max);
            if next_x >= params.width {
                xs.push(params.width);
                ys.push(next_y);
                break;
            }
            xs.push(next_x);
            ys.push(next_y);
        }

        // Level one interior segment to host the pad. Eligible segments
        // start `shelf_margin` vertices in from either end.
        let segments = xs.len() - 1;
        let lo = params.shelf_margin;
        if segments <= 2 * params.shelf_margin {
            return Err(TerrainError::NoFlatShelf);
        }
        let hi = segments - 1 - params.shelf_margin;
        let shelf = rng.gen_range(lo..=hi);
        ys[shelf + 1] = ys[shelf];

        let shelf_y = ys[shelf];
        let shelf_mid = (xs[shelf] + xs[shelf + 1]) / 2.;
        let pad = PadBounds {
            x: shelf_mid - params.pad_width / 2.,
            y: shelf_y - params.pad_height,
            width: params.pad_width,
            height: params.pad_height,
        };
        Self::try_new(xs, ys, pad)
    }

    /// Ground height under `x`. Linear scan over the segments; profiles
    /// are a handful of vertices, so no index structure is warranted.
    /// Outside the profile the end heights extend flat.
    pub fn height_at(&self, x: f64) -> f64 {
        interpolate(&self.x, &self.y, x)
    }

    pub fn is_over_pad(&self, x: f64) -> bool {
        self.pad.x <= x && x <= self.pad.x + self.pad.width
    }

    pub fn pad_bounds(&self) -> PadBounds {
        self.pad
    }

    pub fn width(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    /// Profile vertices for rendering the ground polygon.
    pub fn profile(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().zip(self.y.iter()).map(|(&x, &y)| (x, y))
    }
}

fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if x <= xs[0] {
        return ys[0];
    }
    for i in 1..xs.len() {
        if x <= xs[i] {
            let t = (x - xs[i - 1]) / (xs[i] - xs[i - 1]);
            return ys[i - 1] + t * (ys[i] - ys[i - 1]);
        }
    }
    ys[ys.len() - 1]
}
