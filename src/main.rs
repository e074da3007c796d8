//! Flappy Dark entry point
//!
//! Native builds run a headless demo: the autopilot plays a few runs against
//! the simulation core and the best score is kept in a JSON file.
//!
//! Usage: flappy-dark [--seed N] [--runs N] [--frames N] [--tuning PATH] [--store PATH]

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use flappy_dark::consts::FRAME_DT;
    use flappy_dark::persistence::JsonFileStore;
    use flappy_dark::platform::FixedStep;
    use flappy_dark::sim::{GameEvent, GamePhase, autopilot};
    use flappy_dark::{Game, Tuning};

    /// Command line options
    struct Options {
        seed: u64,
        runs: u32,
        /// Host frames per run before giving up
        frames: u32,
        tuning: Option<PathBuf>,
        store: PathBuf,
    }

    impl Options {
        fn parse() -> Self {
            let mut options = Self {
                seed: SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or(0),
                runs: 3,
                frames: 60 * 60,
                tuning: None,
                store: PathBuf::from("max_score.json"),
            };

            let mut args = std::env::args().skip(1);
            while let Some(arg) = args.next() {
                let value = args.next();
                match (arg.as_str(), value) {
                    ("--seed", Some(v)) => options.seed = parse_or_warn(&arg, &v, options.seed),
                    ("--runs", Some(v)) => options.runs = parse_or_warn(&arg, &v, options.runs),
                    ("--frames", Some(v)) => {
                        options.frames = parse_or_warn(&arg, &v, options.frames)
                    }
                    ("--tuning", Some(v)) => options.tuning = Some(PathBuf::from(v)),
                    ("--store", Some(v)) => options.store = PathBuf::from(v),
                    (other, _) => log::warn!("Ignoring argument {}", other),
                }
            }
            options
        }
    }

    fn parse_or_warn<T: std::str::FromStr>(flag: &str, value: &str, fallback: T) -> T {
        value.parse().unwrap_or_else(|_| {
            log::warn!("Invalid value {:?} for {}", value, flag);
            fallback
        })
    }

    pub fn run() {
        let options = Options::parse();
        let tuning = match &options.tuning {
            Some(path) => Tuning::load(path),
            None => Tuning::default(),
        };

        let store = JsonFileStore::new(&options.store);
        let mut game = Game::new(tuning, options.seed, store);
        let mut clock = FixedStep::default();

        for run in 0..options.runs {
            if run == 0 {
                game.start();
            } else {
                game.reset();
            }
            clock.clear();

            let mut frames = 0;
            while game.phase() == GamePhase::Running && frames < options.frames {
                for _ in 0..clock.advance(FRAME_DT) {
                    if autopilot::should_flap(game.world()) {
                        game.apply_impulse();
                    }
                    for event in game.tick(1.0) {
                        if event == GameEvent::Score {
                            log::debug!("Passed pipe at tick {}", game.time_ticks());
                        }
                    }
                }
                frames += 1;
            }

            let score = game.state().score.unwrap_or(0);
            if game.phase() == GamePhase::Running {
                // Still alive at the frame budget; reset() needs a finished run
                log::info!("Run {} survived {} frames, score {}", run + 1, frames, score);
                break;
            }
            println!(
                "run {}: score {} in {} ticks (hit {:?})",
                run + 1,
                score,
                game.time_ticks(),
                game.last_hit()
            );
        }

        println!("max score: {}", game.state().max_score);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Dark (native demo) starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `flappy_dark::Game` directly
}
