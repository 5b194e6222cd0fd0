//! Command-line front end for the randomizer
//!
//! Seeds from `--seed <HEX>` or from a saved beacon pulse (`--pulse`), then
//! prints one result per line on stdout. Logs go to stderr.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pulse_randomizer_core::logging::init_logging;
use pulse_randomizer_core::rng::parse_seed_hex;
use pulse_randomizer_core::{PulseError, PulseRecord, Randomizer, SeedError, MAX_SEED_HEX_LEN};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),

    #[error(transparent)]
    Pulse(#[from] PulseError),

    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error("pulse output value has fewer than {0} characters")]
    ShortOutput(usize),

    #[error("pulse output value does not start with {0} hex digits")]
    NonHexOutput(usize),

    #[error("no seed source given; pass --seed or --pulse")]
    NoSeedSource,
}

#[derive(Parser)]
#[command(author, version, about = "Reproducible randomness from beacon pulses")]
struct Args {
    /// Hex seed material (up to 16 digits; 13 recommended).
    #[arg(long, env = "PULSE_SEED", global = true, conflicts_with = "pulse")]
    seed: Option<String>,

    /// Pulse JSON file; its output value seeds the randomizer.
    #[arg(long, global = true)]
    pulse: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG).
    #[arg(long, env = "PULSE_LOG", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Floats in [0, 1).
    Float {
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Integers in [MIN, MAX], inclusive.
    Int {
        #[arg(allow_negative_numbers = true)]
        min: i64,
        #[arg(allow_negative_numbers = true)]
        max: i64,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Shuffle the given items.
    Shuffle { items: Vec<String> },
    /// Pick N of the given items without repetition.
    Sample {
        #[arg(allow_negative_numbers = true)]
        n: i64,
        items: Vec<String>,
    },
    /// Print the seed hex in use, after validating it.
    Seed,
}

fn load_pulse(path: &Path) -> Result<PulseRecord, CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let pulse = PulseRecord::from_json(&json)?;
    info!(
        chain = pulse.chain_index,
        pulse = pulse.pulse_index,
        "loaded pulse"
    );
    Ok(pulse)
}

/// Leading hex digits of a pulse's output value, with the reason it failed
fn pulse_seed(pulse: &PulseRecord) -> Result<String, CliError> {
    match pulse.seed_hex(MAX_SEED_HEX_LEN) {
        Some(seed) => Ok(seed.to_string()),
        None if pulse.output_value.len() < MAX_SEED_HEX_LEN => {
            Err(CliError::ShortOutput(MAX_SEED_HEX_LEN))
        }
        None => Err(CliError::NonHexOutput(MAX_SEED_HEX_LEN)),
    }
}

/// Seed hex from `--seed`, or the pulse's output value prefix
fn seed_material(args: &Args) -> Result<Option<String>, CliError> {
    if let Some(path) = &args.pulse {
        let pulse = load_pulse(path)?;
        return pulse_seed(&pulse).map(Some);
    }
    Ok(args.seed.clone())
}

fn run(args: Args, out: &mut impl Write) -> Result<(), CliError> {
    let seed = seed_material(&args)?;

    if let Command::Seed = args.command {
        let seed = seed.ok_or(CliError::NoSeedSource)?;
        parse_seed_hex(&seed)?;
        writeln!(out, "{seed}")?;
        return Ok(());
    }

    let mut randomizer = Randomizer::new(seed.as_deref())?;
    debug!(seeded = randomizer.is_seeded(), "randomizer ready");

    match args.command {
        Command::Float { count } => {
            for _ in 0..count {
                writeln!(out, "{}", randomizer.random_float())?;
            }
        }
        Command::Int { min, max, count } => {
            for _ in 0..count {
                writeln!(out, "{}", randomizer.random_int_between(min, max))?;
            }
        }
        Command::Shuffle { items } => {
            for item in randomizer.shuffle(&items) {
                writeln!(out, "{item}")?;
            }
        }
        Command::Sample { n, items } => {
            for item in randomizer.random_members(n, &items) {
                writeln!(out, "{item}")?;
            }
        }
        Command::Seed => {}
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let stdout = std::io::stdout();
    match run(args, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const PULSE_JSON: &str = r#"{"pulse": {
        "uri": "https://beacon.example/beacon/2.0/chain/1/pulse/7",
        "version": "Version 2.0",
        "cipherSuite": 0,
        "period": 60000,
        "certificateId": "02ab",
        "chainIndex": 1,
        "pulseIndex": 7,
        "timeStamp": "2024-01-01T00:07:00.000Z",
        "localRandomValue": "AA",
        "external": {},
        "listValues": [],
        "precommitmentValue": "BB",
        "statusCode": 0,
        "signatureValue": "CC",
        "outputValue": "0A1B2C3D4E5F60718293",
        "trimmedRandomValue": "0A1B2C3D"
    }}"#;

    /// Write `json` to a per-test file in the temp dir
    fn write_pulse(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "pulse-randomizer-{}-{}.json",
            std::process::id(),
            name
        ));
        std::fs::write(&path, json).unwrap();
        path
    }

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["pulse-randomizer"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    fn run_to_string(argv: &[&str]) -> Result<String, CliError> {
        let mut out = Vec::new();
        run(parse(argv), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_seed_and_pulse_conflict() {
        let parsed = Args::try_parse_from([
            "pulse-randomizer",
            "--seed",
            "ff",
            "--pulse",
            "p.json",
            "float",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_negative_bounds_parse() {
        let args = parse(&["int", "-5", "5"]);
        assert!(matches!(args.command, Command::Int { min: -5, max: 5, count: 1 }));
    }

    #[test]
    fn test_seed_material_prefers_explicit_seed() {
        let args = parse(&["--seed", "1a2b3c", "float"]);
        assert_eq!(seed_material(&args).unwrap().as_deref(), Some("1a2b3c"));
    }

    #[test]
    fn test_missing_pulse_file_is_read_error() {
        let err = load_pulse(Path::new("/nonexistent/pulse.json")).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/pulse.json"));
    }

    #[test]
    fn test_pulse_file_seeds_from_output_prefix() {
        let path = write_pulse("seed", PULSE_JSON);
        let path_arg = path.to_str().unwrap();

        let printed = run_to_string(&["--pulse", path_arg, "seed"]).unwrap();
        let expected = PulseRecord::from_json(PULSE_JSON)
            .unwrap()
            .seed_hex(MAX_SEED_HEX_LEN)
            .unwrap()
            .to_string();
        assert_eq!(printed, format!("{expected}\n"));
        assert_eq!(expected, "0A1B2C3D4E5F6");

        // Sampling through the pulse matches sampling with that seed directly
        let from_pulse = run_to_string(&["--pulse", path_arg, "sample", "2", "a", "b", "c", "d"]);
        let from_seed = run_to_string(&["--seed", &expected, "sample", "2", "a", "b", "c", "d"]);
        assert_eq!(from_pulse.unwrap(), from_seed.unwrap());

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_shuffle_and_sample_output() {
        let shuffled = run_to_string(&["--seed", "1a2b3c", "shuffle", "1", "2", "3", "4", "5"]).unwrap();
        let mut lines: Vec<&str> = shuffled.lines().collect();
        lines.sort();
        assert_eq!(lines, vec!["1", "2", "3", "4", "5"]);

        let sampled = run_to_string(&["--seed", "1a2b3c", "sample", "2", "1", "2", "3", "4", "5"]).unwrap();
        assert_eq!(sampled, "3\n5\n");

        let none = run_to_string(&["--seed", "1a2b3c", "sample", "-1", "x", "y"]).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_non_hex_output_value_is_reported() {
        let json = PULSE_JSON.replace("0A1B2C3D4E5F60718293", "0A1B2C3D4E5FZZ718293");
        let path = write_pulse("nonhex", &json);

        let err = run_to_string(&["--pulse", path.to_str().unwrap(), "seed"]).unwrap_err();
        assert!(matches!(err, CliError::NonHexOutput(13)));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_short_output_value_is_reported() {
        let json = PULSE_JSON.replace("0A1B2C3D4E5F60718293", "0A1B");
        let path = write_pulse("short", &json);

        let err = run_to_string(&["--pulse", path.to_str().unwrap(), "float"]).unwrap_err();
        assert!(matches!(err, CliError::ShortOutput(13)));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_seed_subcommand_validates_explicit_seed() {
        let err = run_to_string(&["--seed", "xyz", "seed"]).unwrap_err();
        assert!(matches!(err, CliError::Seed(SeedError::InvalidDigit { .. })));

        assert_eq!(run_to_string(&["--seed", "ff", "seed"]).unwrap(), "ff\n");
    }
}
