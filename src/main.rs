//! queue-desk - line-oriented service-desk exercises
//!
//! Reads commands from stdin, writes replies to stdout. Logs go to stderr
//! (`RUST_LOG=debug` for every assignment).

use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use queue_desk::balancer::BalanceStrategy;
use queue_desk::config::Config;
use queue_desk::session::QueueSession;
use queue_desk::shell::{
    Console, QueueShell, ReportFormat, RosterShell, Shell, TrolleyShell, WarehouseShell,
};
use queue_desk::warehouse::Warehouse;
use queue_desk::workload;

/// Service-desk console exercises
#[derive(Parser, Debug)]
#[command(name = "queue-desk", version, about)]
struct Args {
    /// Path to TOML configuration file (falls back to $QUEUE_DESK_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not print prompts or greetings
    #[arg(long)]
    no_prompt: bool,

    #[command(subcommand)]
    exercise: Exercise,
}

#[derive(Subcommand, Debug)]
enum Exercise {
    /// Issue tickets and balance visitors across service windows
    Queue {
        /// Number of windows (asked interactively when omitted)
        #[arg(short, long)]
        windows: Option<NonZeroUsize>,

        /// Least-loaded window search (overrides the config file)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Print the distribution as JSON
        #[arg(long)]
        json: bool,
    },
    /// Balance a seeded random queue without reading stdin
    Simulate {
        /// Number of visitors to generate
        #[arg(long, default_value_t = 20)]
        visitors: usize,

        /// Number of windows
        #[arg(short, long, default_value = "3")]
        windows: NonZeroUsize,

        /// Longest visit in minutes
        #[arg(long, default_value_t = 30)]
        max_duration: u32,

        /// RNG seed for reproducible runs
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Least-loaded window search (overrides the config file)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Print the distribution as JSON
        #[arg(long)]
        json: bool,
    },
    /// Store and take products from warehouse cells
    Warehouse,
    /// Register trolleys and query their stops
    Trolley,
    /// Track enrolled, suspicious and immortal students
    Roster,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Linear,
    Heap,
}

impl From<StrategyArg> for BalanceStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Linear => BalanceStrategy::Linear,
            StrategyArg::Heap => BalanceStrategy::Heap,
        }
    }
}

fn report_format(json: bool) -> ReportFormat {
    if json {
        ReportFormat::Json
    } else {
        ReportFormat::Text
    }
}

fn main() -> anyhow::Result<()> {
    // stdout is the command channel; keep logs on stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if args.no_prompt {
        config = config.with_prompts(false);
    }
    info!(
        config_file = ?config.config_file(),
        prompts = config.prompts(),
        strategy = ?config.strategy(),
        "config_loaded"
    );

    let console = Console::new().with_prompts(config.prompts());
    match args.exercise {
        Exercise::Queue {
            windows,
            strategy,
            json,
        } => {
            let strategy = strategy.map_or(config.strategy(), BalanceStrategy::from);
            let mut shell = QueueShell::new()
                .with_strategy(strategy)
                .with_format(report_format(json));
            if let Some(windows) = windows {
                shell = shell.with_windows(windows);
            }
            run_interactive(&console, &mut shell)
        }
        Exercise::Simulate {
            visitors,
            windows,
            max_duration,
            seed,
            strategy,
            json,
        } => {
            let strategy = strategy.map_or(config.strategy(), BalanceStrategy::from);
            let mut session = QueueSession::new().with_strategy(strategy);
            let mut rng = SmallRng::seed_from_u64(seed);
            workload::random_visitors(&mut session, visitors, max_duration, &mut rng)
                .context("Failed to generate workload")?;
            info!(visitors, seed, "workload generated");

            let mut shell = QueueShell::new()
                .with_session(session)
                .with_windows(windows)
                .with_format(report_format(json));
            Console::new()
                .with_prompts(false)
                .run(&mut shell, io::empty(), io::stdout().lock())
                .context("Failed to write distribution")
        }
        Exercise::Warehouse => {
            let warehouse = Warehouse::new(config.warehouse().clone())
                .context("Invalid warehouse layout")?;
            run_interactive(&console, &mut WarehouseShell::new(warehouse))
        }
        Exercise::Trolley => run_interactive(&console, &mut TrolleyShell::new()),
        Exercise::Roster => run_interactive(&console, &mut RosterShell::new()),
    }
}

fn run_interactive(console: &Console, shell: &mut dyn Shell) -> anyhow::Result<()> {
    let name = shell.name();
    console
        .run(shell, io::stdin().lock(), io::stdout().lock())
        .with_context(|| format!("Console I/O failed in {name} exercise"))
}
