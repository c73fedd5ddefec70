use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use game::playtest::{AgentPlan, Mistake, run_playtest};
use game::settings::TimingSettings;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MissKind {
    Wrong,
    Short,
}

impl From<MissKind> for Mistake {
    fn from(kind: MissKind) -> Self {
        match kind {
            MissKind::Wrong => Mistake::Wrong,
            MissKind::Short => Mistake::Short,
        }
    }
}

/// Plays a game headlessly on a virtual clock and prints the outcome.
#[derive(Debug, Parser)]
#[command(name = "playtest")]
struct Cli {
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Stop after clearing this many rounds.
    #[arg(long, default_value_t = 10)]
    rounds: u32,
    /// Round on which the agent makes a mistake.
    #[arg(long)]
    miss_round: Option<u32>,
    #[arg(long, value_enum, default_value_t = MissKind::Wrong)]
    miss_kind: MissKind,
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.miss_round == Some(0) {
        bail!("--miss-round counts from 1");
    }

    let plan = AgentPlan {
        max_rounds: cli.rounds,
        miss: cli.miss_round.map(|round| (round, cli.miss_kind.into())),
    };
    let report = run_playtest(cli.seed, TimingSettings::default(), plan);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "seed {} cleared {} score {} highest_round {} game_over {} simulated {}ms",
            report.seed,
            report.rounds_cleared,
            report.score,
            report.highest_round,
            report.game_over,
            report.simulated_ms
        );
        println!("sequence lengths: {:?}", report.sequence_lengths);
    }
    Ok(())
}
