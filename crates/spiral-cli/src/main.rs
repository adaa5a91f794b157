mod session;
mod shell;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spiral_core::Glyph;
use spiral_store::SpiralHome;

use session::{Session, SimulateOptions};

#[derive(Parser)]
#[command(name = "spiral", about = "SpiralOS symbolic runtime")]
struct Cli {
    /// Data directory (default: $SPIRAL_DATA_DIR, then ~/.spiralos)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Advance the glyph one step through the cycle
    Expand,

    /// Run the quantum glyph simulation and journal every record
    Simulate {
        /// Glyph to simulate (symbol or name); defaults to the current glyph
        #[arg(long)]
        glyph: Option<Glyph>,

        /// Initial mass in kg; defaults to the configured mass
        #[arg(long, value_parser = parse_mass)]
        mass: Option<f64>,

        /// Transmit every record
        #[arg(long)]
        transmit: bool,
    },

    /// Show glyph, history, stability score and recent journal entries
    Memory {
        /// Number of journal entries to show
        #[arg(long, default_value_t = 5)]
        recent: usize,
    },

    /// Print the most recent journal entries
    Journal {
        /// Number of entries
        #[arg(long, default_value_t = 10)]
        last: usize,
    },

    /// Transmit the latest reading for the current glyph
    Transmit {
        /// Message attached to the packet
        #[arg(default_value = "")]
        message: String,
    },

    /// Interactive prompt (the default when no command is given)
    Shell,
}

fn parse_mass(s: &str) -> std::result::Result<f64, String> {
    let mass: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !spiral_core::is_valid_mass(mass) {
        return Err(format!("mass must be a positive finite number, got {mass}"));
    }
    Ok(mass)
}

fn open_home(cli: &Cli) -> Result<SpiralHome> {
    let base_dir = cli
        .data_dir
        .clone()
        .or_else(|| std::env::var("SPIRAL_DATA_DIR").ok().map(PathBuf::from));
    SpiralHome::open(base_dir.as_deref()).context("failed to open data directory")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let home = open_home(&cli)?;
    tracing::debug!("data directory: {}", home.base_dir().display());
    let mut session = Session::open(home)?;
    let mut out = io::stdout().lock();

    match &cli.command {
        Some(Commands::Expand) => session.expand(&mut out),
        Some(Commands::Simulate {
            glyph,
            mass,
            transmit,
        }) => {
            let opts = SimulateOptions {
                glyph: *glyph,
                mass0: *mass,
                transmit: *transmit,
            };
            session.simulate(&opts, &mut out)
        }
        Some(Commands::Memory { recent }) => session.memory(*recent, &mut out),
        Some(Commands::Journal { last }) => session.journal(*last, &mut out),
        Some(Commands::Transmit { message }) => session.transmit(message, &mut out),
        Some(Commands::Shell) | None => shell::run(&mut session, io::stdin().lock(), &mut out),
    }
}
