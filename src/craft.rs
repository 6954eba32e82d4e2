use crate::Terrain;

pub(crate) mod defaults {
    pub const GRAVITY: f64 = 0.1;
    pub const THRUST_POWER: f64 = 0.25;
    pub const ROTATION_SPEED: f64 = 1.5;
    pub const FUEL_BURN: f64 = 1.;
    pub const ANGLE_LIMIT: f64 = 90.;
    pub const SAFE_VY: f64 = 3.;
    pub const SAFE_VX: f64 = 2.;
    pub const SAFE_ANGLE: f64 = 10.;
    pub const START_FUEL: f64 = 500.;
    pub const HALF_WIDTH: f64 = 20.;
    pub const HALF_HEIGHT: f64 = 20.;
}

/// Per-tick pilot input. All three controls may be held at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub thrust: bool,
    pub left: bool,
    pub right: bool,
}

impl Input {
    pub fn coast() -> Self {
        Self::default()
    }

    pub fn thrusting() -> Self {
        Self {
            thrust: true,
            ..Self::default()
        }
    }
}

/// Life-cycle of one attempt. Transitions exactly once, out of `Flying`,
/// on the single ground-contact event; terminal states never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Flying,
    LandedSafe,
    Crashed,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Flying)
    }
}

/// Rendering hint derived from craft state. Pure; the booster frame
/// cadence and explosion frame timers live with the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageCue {
    Explosion,
    Thrusting,
    TurningLeft,
    TurningRight,
    Idle,
}

/// Tuning constants for the explicit-Euler update rule.
#[derive(Clone, Debug)]
pub struct Physics {
    gravity: f64,
    thrust_power: f64,
    rotation_speed: f64,
    fuel_burn: f64,
    angle_limit: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: defaults::GRAVITY,
            thrust_power: defaults::THRUST_POWER,
            rotation_speed: defaults::ROTATION_SPEED,
            fuel_burn: defaults::FUEL_BURN,
            angle_limit: defaults::ANGLE_LIMIT,
        }
    }
}

impl Physics {
    pub fn with_gravity(self, gravity: f64) -> Self {
        Self { gravity, ..self }
    }
    pub fn with_thrust_power(self, thrust_power: f64) -> Self {
        Self {
            thrust_power,
            ..self
        }
    }
    pub fn with_rotation_speed(self, rotation_speed: f64) -> Self {
        Self {
            rotation_speed,
            ..self
        }
    }
    pub fn with_fuel_burn(self, fuel_burn: f64) -> Self {
        Self { fuel_burn, ..self }
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }
}

/// Touchdown safety thresholds. All three comparisons are strict.
#[derive(Clone, Debug)]
pub struct Limits {
    safe_vy: f64,
    safe_vx: f64,
    safe_angle: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            safe_vy: defaults::SAFE_VY,
            safe_vx: defaults::SAFE_VX,
            safe_angle: defaults::SAFE_ANGLE,
        }
    }
}

impl Limits {
    pub fn with_safe_vy(self, safe_vy: f64) -> Self {
        assert!(safe_vy > 0.);
        Self { safe_vy, ..self }
    }

    pub fn with_safe_vx(self, safe_vx: f64) -> Self {
        assert!(safe_vx > 0.);
        Self { safe_vx, ..self }
    }

    pub fn with_safe_angle(self, safe_angle: f64) -> Self {
        assert!(safe_angle > 0.);
        Self { safe_angle, ..self }
    }

    /// The landing-safety predicate. Descending slower than `safe_vy`
    /// (rising counts as slow), drifting slower than `safe_vx`, near
    /// upright, and over the pad.
    pub fn is_safe(&self, on_pad: bool, vx: f64, vy: f64, angle: f64) -> bool {
        on_pad && vy < self.safe_vy && vx.abs() < self.safe_vx && angle.abs() < self.safe_angle
    }
}

/// The player-controlled lander. World coordinates, y grows downward.
#[derive(Clone, Debug)]
pub struct Craft {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    angle: f64,
    fuel: f64,
    status: Status,
    on_pad: bool,
    half_width: f64,
    half_height: f64,
    physics: Physics,
    limits: Limits,
}

impl Craft {
    pub fn new(physics: Physics, limits: Limits) -> Self {
        Self {
            x: 0.,
            y: 0.,
            vx: 0.,
            vy: 0.,
            angle: 0.,
            fuel: defaults::START_FUEL,
            status: Status::Flying,
            on_pad: false,
            half_width: defaults::HALF_WIDTH,
            half_height: defaults::HALF_HEIGHT,
            physics,
            limits,
        }
    }

    pub fn with_position(self, x: f64, y: f64) -> Self {
        Self { x, y, ..self }
    }

    pub fn with_velocity(self, vx: f64, vy: f64) -> Self {
        Self { vx, vy, ..self }
    }

    pub fn with_angle(self, angle: f64) -> Self {
        Self { angle, ..self }
    }

    pub fn with_fuel(self, fuel: f64) -> Self {
        Self { fuel, ..self }
    }

    pub fn with_half_extents(self, half_width: f64, half_height: f64) -> Self {
        Self {
            half_width,
            half_height,
            ..self
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn fuel_remaining(&self) -> f64 {
        self.fuel
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn on_pad(&self) -> bool {
        self.on_pad
    }

    pub fn half_extents(&self) -> (f64, f64) {
        (self.half_width, self.half_height)
    }

    /// Advance one fixed tick. No-op once the status is terminal.
    ///
    /// The update order is load-bearing: gravity, rotation, thrust,
    /// integration, wall clamp, ground contact.
    pub fn step(&mut self, input: Input, terrain: &Terrain) {
        if self.status != Status::Flying {
            return;
        }

        self.vy += self.physics.gravity;

        if input.left {
            self.angle -= self.physics.rotation_speed;
        }
        if input.right {
            self.angle += self.physics.rotation_speed;
        }
        self.angle = self
            .angle
            .clamp(-self.physics.angle_limit, self.physics.angle_limit);

        if input.thrust && self.fuel > 0. {
            let (sin, cos) = self.angle.to_radians().sin_cos();
            self.vx += self.physics.thrust_power * sin;
            self.vy -= self.physics.thrust_power * cos;
            self.fuel = (self.fuel - self.physics.fuel_burn).max(0.);
        }

        self.x += self.vx;
        self.y += self.vy;

        // Hard walls at the screen edges, no bounce.
        let left_wall = self.half_width;
        let right_wall = terrain.width() - self.half_width;
        if self.x < left_wall {
            self.x = left_wall;
            self.vx = 0.;
        } else if self.x > right_wall {
            self.x = right_wall;
            self.vx = 0.;
        }

        let ground = terrain.height_at(self.x);
        if self.y + self.half_height >= ground {
            self.y = ground - self.half_height;
            self.on_pad = terrain.is_over_pad(self.x);
            self.status = if self
                .limits
                .is_safe(self.on_pad, self.vx, self.vy, self.angle)
            {
                Status::LandedSafe
            } else {
                Status::Crashed
            };
            self.vx = 0.;
            self.vy = 0.;
        }
    }

    /// Which sprite the renderer should show this frame. Priority:
    /// terminal wreck, then booster, then turn jets, then idle.
    pub fn image_cue(&self, input: Input) -> ImageCue {
        match self.status {
            Status::Crashed => ImageCue::Explosion,
            Status::Flying if input.thrust && self.fuel > 0. => ImageCue::Thrusting,
            Status::Flying if input.left => ImageCue::TurningLeft,
            Status::Flying if input.right => ImageCue::TurningRight,
            _ => ImageCue::Idle,
        }
    }
}

#[cfg(test)]
mod craft_tests {
    use super::*;

    fn assert_feq(left: f64, right: f64) {
        if (left - right).abs() > 1e-9 {
            panic!("Float equal assertion failed, {left} != {right}");
        }
    }

    fn assert_close(left: f64, right: f64, range: f64) {
        if (left - right).abs() > range {
            panic!("Assertion failed {left} not close to {right} within a range {range}");
        }
    }

    fn flat_terrain() -> Terrain {
        Terrain::flat(800., 520., 300.).unwrap()
    }

    fn craft() -> Craft {
        Craft::new(Physics::default(), Limits::default()).with_position(400., 100.)
    }

    #[test]
    fn gravity_pulls_exactly() {
        let terrain = flat_terrain();
        let mut craft = craft();
        let vy_before = craft.velocity().1;
        craft.step(Input::coast(), &terrain);
        assert_feq(craft.velocity().1, vy_before + defaults::GRAVITY);
    }

    #[test]
    fn coasting_burns_no_fuel() {
        let terrain = flat_terrain();
        let mut craft = craft();
        craft.step(Input::coast(), &terrain);
        assert_feq(craft.fuel_remaining(), defaults::START_FUEL);
    }

    #[test]
    fn thrust_upright_pushes_up() {
        let terrain = flat_terrain();
        let mut craft = craft();
        craft.step(Input::thrusting(), &terrain);
        let (vx, vy) = craft.velocity();
        assert_feq(vx, 0.);
        assert_feq(vy, defaults::GRAVITY - defaults::THRUST_POWER);
        assert_feq(craft.fuel_remaining(), defaults::START_FUEL - 1.);
    }

    #[test]
    fn thrust_follows_the_nose() {
        let terrain = flat_terrain();
        let mut craft = craft().with_angle(30.);
        craft.step(Input::thrusting(), &terrain);
        let (vx, vy) = craft.velocity();
        assert_close(vx, defaults::THRUST_POWER * 0.5, 1e-9);
        assert_close(
            vy,
            defaults::GRAVITY - defaults::THRUST_POWER * 3f64.sqrt() / 2.,
            1e-9,
        );
    }

    #[test]
    fn rotation_signs() {
        let terrain = flat_terrain();
        let mut craft = craft();
        craft.step(
            Input {
                left: true,
                ..Input::default()
            },
            &terrain,
        );
        assert_feq(craft.angle(), -defaults::ROTATION_SPEED);
        craft.step(
            Input {
                right: true,
                ..Input::default()
            },
            &terrain,
        );
        craft.step(
            Input {
                right: true,
                ..Input::default()
            },
            &terrain,
        );
        assert_feq(craft.angle(), defaults::ROTATION_SPEED);
    }

    #[test]
    fn rotation_clamped_at_limit() {
        let terrain = flat_terrain();
        let mut craft = craft().with_angle(89.);
        for _ in 0..3 {
            craft.step(
                Input {
                    right: true,
                    ..Input::default()
                },
                &terrain,
            );
        }
        assert_feq(craft.angle(), defaults::ANGLE_LIMIT);
    }

    #[test]
    fn no_thrust_when_dry() {
        let terrain = flat_terrain();
        let mut craft = craft().with_fuel(0.5);
        craft.step(Input::thrusting(), &terrain);
        assert_feq(craft.fuel_remaining(), 0.);

        // Dry tank: holding thrust changes velocity by gravity alone.
        let vy_before = craft.velocity().1;
        craft.step(Input::thrusting(), &terrain);
        assert_feq(craft.velocity().1, vy_before + defaults::GRAVITY);
        assert_feq(craft.fuel_remaining(), 0.);
    }

    #[test]
    fn left_wall_clamps_and_kills_vx() {
        let terrain = flat_terrain();
        let mut craft = craft().with_position(25., 100.).with_velocity(-10., 0.);
        craft.step(Input::coast(), &terrain);
        let (x, _) = craft.position();
        assert_feq(x, defaults::HALF_WIDTH);
        assert_feq(craft.velocity().0, 0.);
    }

    #[test]
    fn right_wall_clamps_and_kills_vx() {
        let terrain = flat_terrain();
        let mut craft = craft().with_position(775., 100.).with_velocity(10., 0.);
        craft.step(Input::coast(), &terrain);
        let (x, _) = craft.position();
        assert_feq(x, 800. - defaults::HALF_WIDTH);
        assert_feq(craft.velocity().0, 0.);
    }

    #[test]
    fn safe_touchdown_on_pad() {
        let terrain = flat_terrain();
        // Pad spans x 300..500; contact happens this tick with
        // vy = 2.9, vx = 1.9, angle = 5 after the gravity update.
        let mut craft = craft()
            .with_position(400., 499.)
            .with_velocity(1.9, 2.8)
            .with_angle(5.);
        craft.step(Input::coast(), &terrain);
        assert_eq!(craft.status(), Status::LandedSafe);
        assert!(craft.on_pad());
        assert_feq(craft.velocity().0, 0.);
        assert_feq(craft.velocity().1, 0.);
        // Lower edge rests exactly on the ground.
        assert_feq(craft.position().1 + defaults::HALF_HEIGHT, 520.);
    }

    #[test]
    fn fast_touchdown_crashes() {
        let terrain = flat_terrain();
        let mut craft = craft().with_position(400., 499.).with_velocity(0., 3.1);
        craft.step(Input::coast(), &terrain);
        assert_eq!(craft.status(), Status::Crashed);
        assert!(craft.on_pad());
    }

    #[test]
    fn gentle_touchdown_off_pad_crashes() {
        let terrain = flat_terrain();
        let mut craft = craft().with_position(100., 499.9).with_velocity(0., 0.);
        craft.step(Input::coast(), &terrain);
        assert_eq!(craft.status(), Status::Crashed);
        assert!(!craft.on_pad());
    }

    #[test]
    fn status_is_monotonic() {
        let terrain = flat_terrain();
        let mut craft = craft().with_position(400., 499.).with_velocity(0., 5.);
        craft.step(Input::coast(), &terrain);
        assert_eq!(craft.status(), Status::Crashed);

        let pose = (craft.position(), craft.fuel_remaining());
        for _ in 0..10 {
            craft.step(Input::thrusting(), &terrain);
        }
        assert_eq!(craft.status(), Status::Crashed);
        assert_eq!((craft.position(), craft.fuel_remaining()), pose);
    }

    #[test]
    fn predicate_cases() {
        let limits = Limits::default();
        assert!(limits.is_safe(true, 1.9, 2.9, 5.));
        assert!(limits.is_safe(true, -1.9, -10., -5.));
        assert!(!limits.is_safe(true, 0., 3.1, 0.));
        assert!(!limits.is_safe(true, 0., 3., 0.));
        assert!(!limits.is_safe(true, 2., 0., 0.));
        assert!(!limits.is_safe(true, 0., 0., 10.));
        assert!(!limits.is_safe(false, 0., 0., 0.));
    }

    #[test]
    fn image_cue_priority() {
        let terrain = flat_terrain();
        let mut craft = craft();
        assert_eq!(craft.image_cue(Input::coast()), ImageCue::Idle);
        assert_eq!(craft.image_cue(Input::thrusting()), ImageCue::Thrusting);
        assert_eq!(
            craft.image_cue(Input {
                thrust: true,
                left: true,
                right: false
            }),
            ImageCue::Thrusting
        );
        assert_eq!(
            craft.image_cue(Input {
                left: true,
                ..Input::default()
            }),
            ImageCue::TurningLeft
        );
        assert_eq!(
            craft.image_cue(Input {
                right: true,
                ..Input::default()
            }),
            ImageCue::TurningRight
        );

        // A dry tank shows no booster flame.
        craft = craft.with_fuel(0.);
        assert_eq!(craft.image_cue(Input::thrusting()), ImageCue::Idle);

        let mut craft = Craft::new(Physics::default(), Limits::default())
            .with_position(100., 519.9)
            .with_velocity(0., 5.);
        craft.step(Input::coast(), &terrain);
        assert_eq!(craft.status(), Status::Crashed);
        assert_eq!(craft.image_cue(Input::thrusting()), ImageCue::Explosion);
    }
}
