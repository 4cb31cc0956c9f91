mod miner;

use miner::Miner;
use powcheck::util::Saveable;
use powcheck::{check_hash, Difficulty, Hash, PowSchedule, RuleEpoch};

use anyhow::{Context, Result};   // anyhow - idiomatic error handling at the binary boundary
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::exit;
use tokio::time::Duration;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;


#[derive(Parser)]
#[command(author, version, about = "Check and grind proof-of-work hashes", long_about = None)]
struct Cli {

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {

    /// Check one hash against a difficulty; exits non-zero on reject
    Check(CheckArgs),

    /// Grind nonces over a payload until the hash meets the target
    Mine(MineArgs),
}

#[derive(Args)]
struct CheckArgs {

    /// Block hash as 64 hex characters, most significant byte first
    #[arg(long)]
    hash: Hash,

    #[arg(short, long)]
    difficulty: Difficulty,

    /// Rule to check under; overrides --schedule
    #[arg(short, long)]
    rule: Option<RuleEpoch>,

    /// Schedule file written by schedule_gen, used with --height
    #[arg(long, requires = "height")]
    schedule: Option<PathBuf>,

    #[arg(long)]
    height: Option<u64>,
}

#[derive(Args)]
struct MineArgs {

    #[arg(short, long)]
    payload: String,

    #[arg(short, long)]
    difficulty: Difficulty,

    /// The current rule needs about difficulty * 2^40 hashes; legacy needs about difficulty
    #[arg(short, long, default_value = "legacy")]
    rule: RuleEpoch,

    #[arg(short, long, default_value_t = 4)]
    threads: u64,

    #[arg(long, default_value_t = u64::MAX)]
    max_nonces: u64,

    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    report_secs: u64,
}


fn check(args: CheckArgs) -> Result<bool> {

    let epoch = match (args.rule, &args.schedule, args.height) {

        (Some(rule), _, _) => rule,

        (None, Some(path), Some(height)) => {

            let schedule = PowSchedule::load_from_file(path)
                .with_context(|| format!("failed to load schedule from {}", path.display()))?;

            debug!(current_rule_height = schedule.current_rule_height(), height, "loaded schedule");

            schedule.rule_at(height)
        }

        // clap requires --height alongside --schedule
        (None, _, _) => RuleEpoch::Current,
    };

    let accepted = check_hash(&args.hash, args.difficulty, epoch);

    let zero_bits = args.hash.leading_zero_bits();

    if accepted {

        info!(hash = %args.hash, zero_bits, difficulty = args.difficulty, %epoch, "hash accepted");
    } else {

        debug!(hash = %args.hash, zero_bits, difficulty = args.difficulty, %epoch, "hash rejected");
    }

    println!("{}", if accepted { "accept" } else { "reject" });

    Ok(accepted)
}


async fn mine(args: MineArgs) -> Result<bool> {

    info!(payload = %args.payload, difficulty = args.difficulty, rule = %args.rule, threads = args.threads, "mining");

    let miner = Miner::new(
        args.payload,
        args.difficulty,
        args.rule,
        args.threads,
        args.max_nonces,
        Duration::from_secs(args.report_secs),
    );

    match miner.run().await? {

        Some((template, hash)) => {

            info!(nonce = template.nonce, %hash, zero_bits = hash.leading_zero_bits(), hashes = miner.hashes(), "block mined");

            println!("{} {}", template.nonce, hash);

            Ok(true)
        }

        None => {

            info!(hashes = miner.hashes(), "nonce budget exhausted");

            Ok(false)
        }
    }
}


#[tokio::main]
async fn main() -> Result<()> {

    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let success = match cli.command {

        Command::Check(args) => check(args)?,

        Command::Mine(args) => mine(args).await?,
    };

    if !success {

        exit(1);
    }

    Ok(())
}
