//! `shmww` command-line front end
//!
//! ```text
//! shmww recover 1 1000          # attack the stored PARA-1 samples
//! shmww bench 2 5000 10         # ten simulated key recoveries on PARA-2
//! shmww generate 1 1000         # write a fresh PARA-1 sample directory
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use eyre::{bail, Result, WrapErr};
use log::{info, LevelFilter};
use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use shmww::api::{RngSampler, Signature};
use shmww::cryptanalysis::{RecoveryConfig, SimulatedCampaign, StoredAttack};
use shmww::params::ParameterSet;
use shmww::sign::pq::shmww::encoding;
use shmww::sign::{SampleFiles, Shmww};

const DEFAULT_SAMPLES_DIR: &str = "samples";

#[derive(Subcommand)]
enum Command {
    /// Recover the key of a stored instance from its first N signatures
    Recover {
        /// Parameter set (1 or 2)
        set: u32,
        /// Number of signatures to read
        signatures: u64,
    },
    /// Run repeated attacks on freshly generated keys and report timings
    Bench {
        /// Parameter set (1 or 2)
        set: u32,
        /// Signatures per key
        signatures: u64,
        /// Number of keys to break
        repeat: usize,
    },
    /// Write a key pair and N signatures to the samples directory
    Generate {
        /// Parameter set (1 or 2)
        set: u32,
        /// Number of signatures to write
        signatures: u64,
    },
}

/// Key recovery against the SHMWW signature scheme
#[derive(Parser)]
#[clap(name = "shmww")]
#[clap(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Seed of the random generator, drawn from the OS when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of information sets tried per key
    #[arg(long)]
    max_attempts: Option<u64>,

    /// Directory holding the PARA-<id>pk, PARA-<id>sigs and PARA-<id>sk files
    #[arg(long, default_value = DEFAULT_SAMPLES_DIR)]
    samples_dir: PathBuf,

    #[clap(subcommand)]
    command: Command,
}

impl Cli {
    fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn config(&self) -> RecoveryConfig {
        match self.max_attempts {
            Some(max) => RecoveryConfig::default().with_max_attempts(max),
            None => RecoveryConfig::default(),
        }
    }
}

fn init_logging(level: LevelFilter) {
    let mut builder = pretty_env_logger::formatted_timed_builder();
    builder.filter_level(level);
    // RUST_LOG, when set, takes over from -v
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn recover(cli: &Cli, set: u32, signatures: u64, rng: ChaCha20Rng) -> Result<()> {
    let attack = StoredAttack::new(set, &cli.samples_dir, signatures, cli.config())?;
    let start = Instant::now();
    let outcome = attack.run(&mut RngSampler::new(rng))?;
    println!("{outcome}");
    println!("Time = {:.3?}", start.elapsed());
    if !outcome.recovered {
        bail!("recovered key does not match PARA-{set}sk");
    }
    Ok(())
}

fn bench(cli: &Cli, set: u32, signatures: u64, repeat: usize, mut rng: ChaCha20Rng) -> Result<()> {
    let params = ParameterSet::from_instance(set)?;
    let campaign = SimulatedCampaign::new(params, signatures, repeat, cli.config())?;
    let report = campaign.run(&mut rng)?;
    println!("{report}");
    Ok(())
}

fn generate(cli: &Cli, set: u32, signatures: u64, mut rng: ChaCha20Rng) -> Result<()> {
    let scheme = Shmww::new(ParameterSet::from_instance(set)?)?;
    std::fs::create_dir_all(&cli.samples_dir)
        .wrap_err_with(|| format!("cannot create {}", cli.samples_dir.display()))?;
    let files = SampleFiles::new(&cli.samples_dir, set);

    let (pk, sk) = scheme.keypair(&mut rng)?;
    encoding::store_public_key(files.public_key(), &pk)?;
    encoding::store_secret_key(files.secret_key(), &sk)?;
    info!("{}: key pair written", scheme.name());

    let path = files.signatures();
    let mut out = encoding::create(&path)?;
    for _ in 0..signatures {
        let sig = scheme.sign(&pk, &sk, &mut rng)?;
        scheme.verify(&sig, &pk)?;
        encoding::write_response(&mut out, &sig)
            .wrap_err_with(|| format!("cannot write {}", path.display()))?;
    }
    out.flush()
        .wrap_err_with(|| format!("cannot write {}", path.display()))?;
    info!("{} signatures written to {}", signatures, path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.level());

    let seed = cli.seed.unwrap_or_else(|| OsRng.next_u64());
    info!("seed: {}", seed);
    let rng = ChaCha20Rng::seed_from_u64(seed);

    match &cli.command {
        Command::Recover { set, signatures } => recover(&cli, *set, *signatures, rng),
        Command::Bench {
            set,
            signatures,
            repeat,
        } => bench(&cli, *set, *signatures, *repeat, rng),
        Command::Generate { set, signatures } => generate(&cli, *set, *signatures, rng),
    }
}
