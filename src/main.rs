//! Plinko Sim entry point
//!
//! Native command line front end over a ledger file. The browser build uses
//! the bindings in `plinko_sim::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use chrono::Utc;
    use clap::{Parser, Subcommand};
    use serde::Serialize;

    use plinko_sim::ledger::DEFAULT_LIMIT;
    use plinko_sim::seeder::seed_games;
    use plinko_sim::sim::{DropResult, PegLayout, RngState, random_drop_x, simulate_drop};
    use plinko_sim::{BoardSettings, FrameLimitPolicy, GameLedger};

    #[derive(Debug, Parser)]
    #[command(name = "plinko-sim", version, about = "Simulate Plinko drops and keep score")]
    struct Cli {
        /// Board settings JSON (defaults are used if the file is missing)
        #[arg(long, default_value = "board.json")]
        settings: PathBuf,

        /// Ledger snapshot the results are read from and written to
        #[arg(long, default_value = "plinko_games.json")]
        ledger: PathBuf,

        /// Frame budget per drop (overrides the settings file)
        #[arg(long)]
        max_frames: Option<u32>,

        /// What a drop that exceeds its frame budget does: fail or settle
        #[arg(long)]
        frame_limit: Option<FrameLimitPolicy>,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Debug, Subcommand)]
    enum Command {
        /// Drop one chip and store the result
        Drop {
            /// Release position in pixels (random if omitted)
            #[arg(long)]
            x: Option<f64>,
            /// RNG seed (time-based if omitted)
            #[arg(long)]
            seed: Option<u64>,
            /// Include the full trajectory in the output
            #[arg(long)]
            path: bool,
        },
        /// Fill the ledger with backdated simulated games
        Seed {
            #[arg(long, default_value_t = 1000)]
            count: usize,
            #[arg(long)]
            seed: Option<u64>,
        },
        /// Print statistics, recent games and high scores
        Stats {
            #[arg(long, default_value_t = DEFAULT_LIMIT)]
            limit: usize,
        },
        /// Remove every stored game
        Flush,
        /// Write the effective board settings to the settings file
        InitSettings,
    }

    /// Drop output without the (long) trajectory
    #[derive(Serialize)]
    struct DropSummary<'a> {
        id: u64,
        seed: u64,
        score: u32,
        final_slot: u32,
        drop_x: f64,
        final_x: f64,
        horizontal_distance: f64,
        fall_time_ms: u32,
        peg_collisions: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<&'a [plinko_sim::sim::PathPoint]>,
    }

    impl<'a> DropSummary<'a> {
        fn new(id: u64, seed: u64, result: &'a DropResult, with_path: bool) -> Self {
            Self {
                id,
                seed,
                score: result.score,
                final_slot: result.final_slot,
                drop_x: result.drop_x,
                final_x: result.final_x,
                horizontal_distance: result.horizontal_distance,
                fall_time_ms: result.fall_time_ms,
                peg_collisions: result.peg_collisions,
                path: with_path.then_some(result.path.as_slice()),
            }
        }
    }

    fn time_seed() -> u64 {
        Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::parse();
        let mut settings = BoardSettings::load(&cli.settings)?;
        if let Some(max_frames) = cli.max_frames {
            settings.max_frames = max_frames;
        }
        if let Some(policy) = cli.frame_limit {
            settings.frame_limit = policy;
        }
        settings.validate()?;

        match cli.command {
            Command::Drop { x, seed, path } => {
                let mut ledger = GameLedger::load(&cli.ledger)?;
                let seed = seed.unwrap_or_else(time_seed);
                let layout = PegLayout::from_settings(&settings);
                let mut rng = RngState::new(seed).to_rng();
                let drop_x = x.unwrap_or_else(|| random_drop_x(&settings, &mut rng));

                let result = simulate_drop(&layout, &settings, drop_x, &mut rng)?;
                let id = ledger.record_drop(&result, None, Utc::now());
                ledger.save(&cli.ledger)?;

                println!("{}", serde_json::to_string_pretty(&DropSummary::new(id, seed, &result, path))?);
            }
            Command::Seed { count, seed } => {
                let mut ledger = GameLedger::load(&cli.ledger)?;
                let seed = seed.unwrap_or_else(time_seed);
                let layout = PegLayout::from_settings(&settings);
                let mut rng = RngState::new(seed).to_rng();

                let written = seed_games(&mut ledger, &layout, &settings, count, &mut rng, Utc::now())?;
                ledger.save(&cli.ledger)?;
                println!("Seeded {written} games (seed {seed})");
            }
            Command::Stats { limit } => {
                let ledger = GameLedger::load(&cli.ledger)?;
                println!("{}", serde_json::to_string_pretty(&ledger.report(limit))?);
            }
            Command::Flush => {
                let mut ledger = GameLedger::load(&cli.ledger)?;
                let removed = ledger.flush();
                ledger.save(&cli.ledger)?;
                println!("The plinko games ledger has been flushed ({removed} games removed).");
            }
            Command::InitSettings => {
                settings.save(&cli.settings)?;
                println!("Board settings written to {}", cli.settings.display());
            }
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Plinko Sim (native) starting...");

    if let Err(e) = cli::run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is plinko_sim::web::start, this is just to satisfy the compiler
}
