use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use cubetimer::core::config::{CliOverrides, CubetimerConfig, load_config, resolve};
use cubetimer::core::history::load_or_backup_history;
use cubetimer::core::moves::format_sequence;
use cubetimer::core::scramble::{SCRAMBLE_LENGTH, generate_moves, scrambled_state};
use cubetimer::core::state::{App, SystemClock};
use cubetimer::tui;
use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "cubetimer", about = "Speedcube timer with WCA inspection")]
struct Args {
    /// Enable 15 second WCA inspection
    #[arg(long, conflicts_with = "no_inspection")]
    inspection: bool,

    /// Disable inspection even if the config enables it
    #[arg(long)]
    no_inspection: bool,

    /// How long the timer key must be held before release starts the clock
    #[arg(long, value_name = "MS")]
    hold_ms: Option<u64>,

    /// Seed the scramble generator (reproducible scrambles)
    #[arg(long)]
    seed: Option<u64>,

    /// Print one scramble and its cube net, then exit
    #[arg(long)]
    scramble: bool,

    /// Neither load nor save the solve history
    #[arg(long)]
    no_history: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        let use_inspection = match (self.inspection, self.no_inspection) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        CliOverrides {
            use_inspection,
            hold_duration_ms: self.hold_ms,
            persist_history: self.no_history.then_some(false),
        }
    }
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to cubetimer.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("cubetimer.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("cubetimer starting up");

    let file_config = load_config().unwrap_or_else(|e| {
        warn!("{}, using defaults", e);
        CubetimerConfig::default()
    });
    let config = resolve(&file_config, &args.overrides());
    log::debug!("Resolved config: {:?}", config);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if args.scramble {
        let moves = generate_moves(&mut rng, SCRAMBLE_LENGTH);
        println!("{}", format_sequence(&moves));
        println!();
        print!("{}", scrambled_state(&moves));
        return Ok(());
    }

    let mut app = App::new(Arc::new(SystemClock), &config, rng);
    let mut persist = config.persist_history;
    if persist {
        match load_or_backup_history() {
            Ok((history, backup)) => {
                app = app.with_history(history);
                if let Some(backup) = backup {
                    app.status_message =
                        format!("Unreadable history moved to {}", backup.display());
                }
            }
            Err(e) => {
                // Saving now would replace a file we could not read.
                warn!("Failed to load history, not saving this run: {}", e);
                app.status_message = format!("History not loaded ({}), solves won't be saved", e);
                persist = false;
            }
        }
    }

    tui::run(app, persist)
}
