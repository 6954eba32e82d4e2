use std::fmt::Display;

use rand::Rng;

use crate::{Craft, GenParams, Limits, PadBounds, Physics, Status, Terrain, TerrainError};

pub(crate) mod defaults {
    pub const WORLD_WIDTH: f64 = 800.;
    pub const WORLD_HEIGHT: f64 = 600.;
    pub const GROUND_LEVEL: f64 = 520.;
    pub const SPAWN_Y: f64 = 100.;
    pub const START_FUEL: f64 = 500.;
    pub const HALF_WIDTH: f64 = 20.;
    pub const HALF_HEIGHT: f64 = 20.;
}

#[derive(Debug)]
pub enum ConfigError {
    WorldTooSmall,
    SpawnOutOfBounds,
    NegativeFuel,
    Terrain(TerrainError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<TerrainError> for ConfigError {
    fn from(val: TerrainError) -> Self {
        ConfigError::Terrain(val)
    }
}

/// How a level obtains its ground.
#[derive(Clone, Debug)]
pub enum TerrainPlan {
    Flat { ground_y: f64, pad_x: f64 },
    Generated(GenParams),
    Explicit { x: Vec<f64>, y: Vec<f64>, pad: PadBounds },
}

/// Everything one attempt needs, as data. One configurable value type
/// covers every level; no per-level code.
#[derive(Clone, Debug)]
pub struct LevelConfig {
    pub name: String,
    pub world_width: f64,
    pub world_height: f64,
    pub physics: Physics,
    pub limits: Limits,
    pub spawn_x: f64,
    pub spawn_y: f64,
    pub start_fuel: f64,
    pub half_width: f64,
    pub half_height: f64,
    pub terrain: TerrainPlan,
}

impl LevelConfig {
    /// Flat training ground: one strip, pad left of center.
    pub fn flat_field(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            world_width: defaults::WORLD_WIDTH,
            world_height: defaults::WORLD_HEIGHT,
            physics: Physics::default(),
            limits: Limits::default(),
            spawn_x: defaults::WORLD_WIDTH / 2.,
            spawn_y: defaults::SPAWN_Y,
            start_fuel: defaults::START_FUEL,
            half_width: defaults::HALF_WIDTH,
            half_height: defaults::HALF_HEIGHT,
            terrain: TerrainPlan::Flat {
                ground_y: defaults::GROUND_LEVEL,
                pad_x: 300.,
            },
        }
    }

    /// Randomized highlands: jagged profile, shelf placed by the seed.
    pub fn highlands(name: &str) -> Self {
        Self {
            terrain: TerrainPlan::Generated(GenParams::default()),
            ..Self::flat_field(name)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width > 0. && self.world_height > 0.)
            || self.world_width < 2. * self.half_width
        {
            return Err(ConfigError::WorldTooSmall);
        }
        if !(self.half_width <= self.spawn_x
            && self.spawn_x <= self.world_width - self.half_width
            && 0. <= self.spawn_y
            && self.spawn_y <= self.world_height)
        {
            return Err(ConfigError::SpawnOutOfBounds);
        }
        if self.start_fuel < 0. {
            return Err(ConfigError::NegativeFuel);
        }
        Ok(())
    }

    /// Assemble one attempt: craft at the spawn point over fresh terrain.
    pub fn build(&self, rng: &mut impl Rng) -> Result<(Craft, Terrain), ConfigError> {
        self.validate()?;
        let terrain = match &self.terrain {
            TerrainPlan::Flat { ground_y, pad_x } => {
                Terrain::flat(self.world_width, *ground_y, *pad_x)?
            }
            TerrainPlan::Generated(params) => Terrain::generate(params, rng)?,
            TerrainPlan::Explicit { x, y, pad } => Terrain::try_new(x.clone(), y.clone(), *pad)?,
        };
        let craft = Craft::new(self.physics.clone(), self.limits.clone())
            .with_position(self.spawn_x, self.spawn_y)
            .with_fuel(self.start_fuel)
            .with_half_extents(self.half_width, self.half_height);
        Ok((craft, terrain))
    }
}

/// Ordered level lineup with in-memory unlock flags. The first level
/// starts unlocked; a safe landing on level n unlocks n + 1. Nothing is
/// persisted.
pub struct Campaign {
    levels: Vec<LevelConfig>,
    unlocked: Vec<bool>,
}

impl Campaign {
    pub fn new(levels: Vec<LevelConfig>) -> Self {
        let mut unlocked = vec![false; levels.len()];
        if let Some(first) = unlocked.first_mut() {
            *first = true;
        }
        Self { levels, unlocked }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            LevelConfig::flat_field("Flat Field"),
            LevelConfig::highlands("Highlands"),
        ])
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, index: usize) -> Option<&LevelConfig> {
        self.levels.get(index)
    }

    pub fn is_unlocked(&self, index: usize) -> bool {
        self.unlocked.get(index).copied().unwrap_or(false)
    }

    /// Record the terminal status of an attempt on `index`.
    pub fn record_result(&mut self, index: usize, status: Status) {
        if status == Status::LandedSafe {
            if let Some(next) = self.unlocked.get_mut(index + 1) {
                *next = true;
            }
        }
    }
}
