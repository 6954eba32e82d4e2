use lander::{
    init, AttemptRunner, Craft, ExecutionStatus, FlightHistory, Input, InputProvider, Status,
};
use rand::{rngs::StdRng, SeedableRng};
use std::env;

/// Bang-bang descent autopilot: fire the booster whenever the craft
/// sinks faster than the target rate, and keep the nose upright.
struct DescentThrottle {
    target_vy: f64,
}

impl InputProvider for DescentThrottle {
    fn input_at(&self, _tick: usize, craft: &Craft) -> Option<Input> {
        let angle = craft.angle();
        Some(Input {
            thrust: craft.velocity().1 > self.target_vy,
            left: angle > 0.,
            right: angle < 0.,
        })
    }
}

struct App {
    runner: AttemptRunner,
    history: FlightHistory,
    autopilot: DescentThrottle,
}

impl App {
    fn try_new(level_file_path: String, seed: u64) -> Result<Self, String> {
        let config = init::json::parse_level(&level_file_path)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let (craft, terrain) = config.build(&mut rng).map_err(|e| e.to_string())?;
        let history = FlightHistory::with_initial_state(&craft);

        Ok(Self {
            runner: AttemptRunner::new(craft, terrain),
            history,
            autopilot: DescentThrottle { target_vy: 2. },
        })
    }

    fn run(&mut self) -> Result<Status, String> {
        loop {
            match self
                .runner
                .iterate(&self.autopilot)
                .map_err(|e| e.to_string())?
            {
                ExecutionStatus::InProgress => {
                    self.history.append_craft_state(self.runner.craft())
                }
                ExecutionStatus::Finished => break Ok(self.runner.craft().status()),
            }
        }
    }

    fn print_flight_results(&self) {
        println!("{}", self.history.pretty_to_string());

        let craft = self.runner.craft();
        println!(
            "Finished {:?} at x {:.1} after {} ticks, fuel left {:.0}, on pad: {}",
            craft.status(),
            craft.position().0,
            self.runner.tick(),
            craft.fuel_remaining(),
            craft.on_pad()
        );
    }
}

fn main() -> Result<(), String> {
    let level_file_path = env::args().nth(1).ok_or("Lacking level path argument")?;
    let seed = match env::args().nth(2) {
        Some(s) => s.parse().map_err(|e| format!("Bad seed argument: {e}"))?,
        None => 0,
    };

    let mut app = App::try_new(level_file_path, seed)?;

    let now = std::time::Instant::now();
    let result = app.run();
    let elapsed = now.elapsed();

    println!("Run ended with result: {result:?} time: {elapsed:?}");

    app.print_flight_results();
    Ok(())
}
