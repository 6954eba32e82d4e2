use std::fmt::Display;

use crate::{Craft, Input, Terrain};

#[derive(Debug)]
pub enum Error {
    InputGetError { tick: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug)]
pub enum ExecutionStatus {
    InProgress,
    Finished,
}

/// Supplies one tick's worth of input. Implemented by scripted input
/// tapes, autopilots, or the presentation layer's key state.
pub trait InputProvider {
    fn input_at(&self, tick: usize, craft: &Craft) -> Option<Input>;
}

/// Drives one attempt: one craft over one terrain, one `step` per tick.
pub struct AttemptRunner {
    craft: Craft,
    terrain: Terrain,
    tick: usize,
}

impl AttemptRunner {
    pub fn new(craft: Craft, terrain: Terrain) -> Self {
        Self {
            craft,
            terrain,
            tick: 0,
        }
    }

    pub fn craft(&self) -> &Craft {
        &self.craft
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn iterate(&mut self, provider: &impl InputProvider) -> Result<ExecutionStatus, Error> {
        if self.craft.status().is_terminal() {
            return Ok(ExecutionStatus::Finished);
        }
        let input = provider
            .input_at(self.tick, &self.craft)
            .ok_or(Error::InputGetError { tick: self.tick })?;
        self.craft.step(input, &self.terrain);
        self.tick += 1;
        Ok(ExecutionStatus::InProgress)
    }
}

/// One recorded kinematic sample.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub fuel: f64,
    pub angle: f64,
}

/// Per-tick trace of an attempt, column-per-channel.
#[derive(Clone)]
pub struct FlightHistory {
    x: Vec<f64>,
    y: Vec<f64>,
    vx: Vec<f64>,
    vy: Vec<f64>,
    fuel: Vec<f64>,
    angle: Vec<f64>,
}

impl FlightHistory {
    pub fn with_initial_state(craft: &Craft) -> Self {
        let (x, y) = craft.position();
        let (vx, vy) = craft.velocity();
        Self {
            x: vec![x],
            y: vec![y],
            vx: vec![vx],
            vy: vec![vy],
            fuel: vec![craft.fuel_remaining()],
            angle: vec![craft.angle()],
        }
    }

    pub fn append_craft_state(&mut self, craft: &Craft) {
        let (x, y) = craft.position();
        let (vx, vy) = craft.velocity();
        self.x.push(x);
        self.y.push(y);
        self.vx.push(vx);
        self.vy.push(vy);
        self.fuel.push(craft.fuel_remaining());
        self.angle.push(craft.angle());
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn iter_history(&self) -> impl Iterator<Item = Snapshot> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.vx)
            .zip(&self.vy)
            .zip(&self.fuel)
            .zip(&self.angle)
            .map(|(((((x, y), vx), vy), fuel), angle)| Snapshot {
                x: *x,
                y: *y,
                vx: *vx,
                vy: *vy,
                fuel: *fuel,
                angle: *angle,
            })
    }

    pub fn pretty_to_string(&self) -> String {
        self.iter_history().fold(
            format!(
                "{:8}{:8}{:8}{:8}{:8}{:8}",
                "X", "Y", "VX", "VY", "FUEL", "ANGLE"
            ),
            |out,
             Snapshot {
                 x,
                 y,
                 vx,
                 vy,
                 fuel,
                 angle,
             }| {
                out + &format!("\n{x:7.2} {y:7.2} {vx:6.2} {vy:6.2} {fuel:7.1} {angle:7.1}")
            },
        )
    }
}
