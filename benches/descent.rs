use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lander::{init, AttemptRunner, Craft, ExecutionStatus, GenParams, Input, InputProvider, Terrain};
use rand::{rngs::StdRng, SeedableRng};

const FLAT_LEVEL: &str = r#"{
    "Name": "Flat Field",
    "World": { "Width": 800, "Height": 600 },
    "Physics": { "Gravity": 0.1, "Thrust": 0.25, "RotationSpeed": 1.5, "FuelBurn": 1 },
    "Safety": { "MaxVy": 3, "MaxVx": 2, "MaxAngle": 10 },
    "Craft": { "X": 400, "Y": 100, "Fuel": 500, "HalfWidth": 20, "HalfHeight": 20 },
    "Terrain": { "Ground": 520, "PadX": 300 }
}"#;

const HIGHLANDS_LEVEL: &str = r#"{
    "Name": "Highlands",
    "World": { "Width": 800, "Height": 600 },
    "Physics": { "Gravity": 0.1, "Thrust": 0.25, "RotationSpeed": 1.5, "FuelBurn": 1 },
    "Safety": { "MaxVy": 3, "MaxVx": 2, "MaxAngle": 10 },
    "Craft": { "X": 400, "Y": 100, "Fuel": 500, "HalfWidth": 20, "HalfHeight": 20 },
    "Terrain": { "Generate": { "StepYMax": 40, "PadWidth": 64 } }
}"#;

struct HoverThrottle {
    target_vy: f64,
}

impl InputProvider for HoverThrottle {
    fn input_at(&self, _: usize, craft: &Craft) -> Option<Input> {
        Some(Input {
            thrust: craft.velocity().1 > self.target_vy,
            ..Input::default()
        })
    }
}

fn run_attempt(content: &str, seed: u64) -> usize {
    let config = init::json::parse_level_str(content).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    let (craft, terrain) = config.build(&mut rng).unwrap();
    let mut runner = AttemptRunner::new(craft, terrain);
    let autopilot = HoverThrottle { target_vy: 2. };
    while let ExecutionStatus::InProgress = runner.iterate(&autopilot).unwrap() {}
    runner.tick()
}

fn descent_benchmark(c: &mut Criterion) {
    c.bench_function("flat field descent", |b| {
        b.iter(|| run_attempt(black_box(FLAT_LEVEL), 0))
    });
    c.bench_function("highlands descent", |b| {
        b.iter(|| run_attempt(black_box(HIGHLANDS_LEVEL), 7))
    });
}

fn generation_benchmark(c: &mut Criterion) {
    c.bench_function("terrain generation", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(black_box(42));
            Terrain::generate(&GenParams::default(), &mut rng).unwrap()
        })
    });
}

criterion_group!(benches, descent_benchmark, generation_benchmark);
criterion_main!(benches);
