//! objcache - demo and stress driver for the object cache

mod demo;
mod stress;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through int and heterogeneous caches while shrinking capacity
    Demo {
        /// Number of integers to cache
        #[arg(short, long, default_value_t = 10, env = "OBJCACHE_COUNT")]
        count: usize,
    },

    /// Hammer a synchronized cache from several threads
    Stress {
        /// Cache capacity in bytes
        #[arg(short, long, default_value_t = 20_000, env = "OBJCACHE_CAPACITY")]
        capacity: usize,

        /// Worker threads
        #[arg(short, long, default_value_t = 4, env = "OBJCACHE_THREADS")]
        threads: usize,

        /// Operations per worker
        #[arg(short, long, default_value_t = 10_000)]
        ops: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("objcache v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Demo { count } => demo::run(count),
        Command::Stress {
            capacity,
            threads,
            ops,
        } => stress::run(capacity, threads, ops),
    }
}
