use std::io::{self, Write};

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use flatfuzz_core::TableDef;
use flatfuzz_emit::{cpp, fbs};
use flatfuzz_generate::{TypeGen, datagen};

/// Depth budget for the root table of every fixture.
const ROOT_DEPTH: u32 = 2;

#[derive(Debug, Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "flatfuzz",
    version,
    about = "Randomized schema/code/data fixtures for serialization fuzzing"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the schema text for the seed's type tree.
    Fbs {
        #[arg(value_parser = parse_seed)]
        seed: u64,
    },
    /// Print the native-code header for the seed's type tree.
    Cpp {
        #[arg(value_parser = parse_seed)]
        seed: u64,
    },
    /// Print one random data instance matching the seed's type tree.
    Data {
        #[arg(value_parser = parse_seed)]
        seed: u64,
        /// Seed controlling only the data sampling.
        #[arg(value_parser = parse_seed)]
        data_seed: u64,
    },
    /// Dump the generated type tree itself as JSON.
    Tree {
        #[arg(value_parser = parse_seed)]
        seed: u64,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Fbs { seed } => {
            writeln!(stdout, "{}", fbs::schema_text(&root_for(seed)))?;
        }
        Command::Cpp { seed } => {
            writeln!(stdout, "{}", cpp::header_text(&root_for(seed)))?;
        }
        Command::Data { seed, data_seed } => {
            let root = root_for(seed);
            let mut rng = ChaCha8Rng::seed_from_u64(data_seed);
            let value = datagen::sample_table(&root, &mut rng);
            writeln!(stdout, "{}", value.to_json())?;
        }
        Command::Tree { seed } => {
            writeln!(stdout, "{}", serde_json::to_string_pretty(&root_for(seed))?)?;
        }
    }

    Ok(())
}

fn root_for(seed: u64) -> TableDef {
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let root = TypeGen::new(rng).root(ROOT_DEPTH);
    debug!(seed, root = %root.name, fields = root.fields.len(), "built type tree");
    root
}

/// Seeds accept decimal or 0x-prefixed hex.
fn parse_seed(raw: &str) -> Result<u64, String> {
    let raw = raw.trim();
    let parsed = if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        raw.parse()
    };
    parsed.map_err(|err| format!("invalid seed '{raw}': {err}"))
}
