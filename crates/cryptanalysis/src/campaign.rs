//! Attack drivers
//!
//! [`StoredAttack`] runs the attack once against a key and corpus read from
//! a sample directory. [`SimulatedCampaign`] generates fresh keys and
//! signatures for every repetition and aggregates timings, the way the
//! attack is benchmarked.

use core::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use log::{info, warn};
use rand::{CryptoRng, RngCore};
use shmww_algorithms::BinaryMatrix;
use shmww_api::{Error, IndexSampler, Result, RngSampler, Signature};
use shmww_params::ParameterSet;
use shmww_sign::pq::shmww::encoding;
use shmww_sign::{SampleFiles, Shmww, ShmwwPublicKey};
use subtle::ConstantTimeEq;

use crate::distinguisher::{guess_columns, CorpusSource, WeightAccumulator};
use crate::isd::{IsdRecovery, RecoveryConfig, RecoveryStats};

/// Outcome of one attack against one key
#[derive(Clone, Debug)]
pub struct AttackOutcome {
    /// Threshold applied to the column counts
    pub threshold: u64,
    /// Number of guessed columns
    pub guessed_columns: usize,
    /// Whether the recovered key equals the real one bit for bit
    pub recovered: bool,
    /// Counters of the recovery run
    pub stats: RecoveryStats,
}

impl fmt::Display for AttackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Threshold = {}", self.threshold)?;
        writeln!(f, "Guessed columns = {}", self.guessed_columns)?;
        writeln!(
            f,
            "Attempts = {} ({} singular), random draws = {}",
            self.stats.attempts, self.stats.singular, self.stats.random_draws
        )?;
        if self.recovered {
            write!(f, "Secret key correctly recovered")
        } else {
            write!(f, "FAIL: recovered key differs from the real one")
        }
    }
}

fn same_key(guessed: &BinaryMatrix, real: &BinaryMatrix) -> bool {
    bool::from(guessed.ct_eq(real))
}

/// Distinguish, then search; the counters survive an exhausted search
fn break_key<S: IndexSampler + ?Sized>(
    params: &ParameterSet,
    pk: &ShmwwPublicKey,
    weights: &WeightAccumulator,
    threshold: u64,
    config: RecoveryConfig,
    sampler: &mut S,
) -> Result<(Result<BinaryMatrix>, RecoveryStats)> {
    let guess = guess_columns(weights, threshold);
    info!(
        "threshold {} over {} signatures: {} guessed columns",
        threshold,
        weights.signatures(),
        guess.count()
    );
    Ok(IsdRecovery::new(params, pk, config)?.search(&guess, sampler))
}

/// Attack against a key and corpus stored in a sample directory
#[derive(Clone, Debug)]
pub struct StoredAttack {
    params: ParameterSet,
    files: SampleFiles,
    signatures: u64,
    config: RecoveryConfig,
}

impl StoredAttack {
    /// Attack on published instance `id` using the first `signatures`
    /// responses of `dir/PARA-<id>sigs`
    pub fn new<P: AsRef<Path>>(
        id: u32,
        dir: P,
        signatures: u64,
        config: RecoveryConfig,
    ) -> Result<Self> {
        let params = ParameterSet::from_instance(id)?;
        Ok(Self::with_params(params, SampleFiles::new(dir, id), signatures, config))
    }

    /// Attack on an arbitrary parameter set
    pub fn with_params(
        params: ParameterSet,
        files: SampleFiles,
        signatures: u64,
        config: RecoveryConfig,
    ) -> Self {
        Self {
            params,
            files,
            signatures,
            config,
        }
    }

    /// Run the attack and compare with the stored secret key
    pub fn run<S: IndexSampler + ?Sized>(&self, sampler: &mut S) -> Result<AttackOutcome> {
        let params = &self.params;

        let path = self.files.public_key();
        info!("Reading pk in file {}", path.display());
        let pk = encoding::load_public_key(&path, params)?;

        let path = self.files.signatures();
        info!("Reading signatures in file {}", path.display());
        let mut corpus = encoding::open(&path)?;
        let mut weights = WeightAccumulator::new(params.n);
        for _ in 0..self.signatures {
            let z = encoding::read_response(&mut corpus, params).map_err(|e| e.in_file(&path))?;
            weights.accumulate(&z)?;
        }

        let threshold = CorpusSource::Stored.threshold(params, self.signatures);
        let (secret_key, stats) = break_key(params, &pk, &weights, threshold, self.config, sampler)?;
        let secret_key = secret_key?;

        let path = self.files.secret_key();
        info!("Reading sk in file {}", path.display());
        let sk = encoding::load_secret_key(&path, params)?;

        Ok(AttackOutcome {
            threshold,
            guessed_columns: stats.guessed_columns,
            recovered: same_key(&secret_key, sk.e()),
            stats,
        })
    }
}

/// Measurements of one repetition of a simulated campaign
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Whether the key was recovered bit for bit
    pub recovered: bool,
    /// Counters of the recovery run, also when the budget ran out
    pub stats: RecoveryStats,
    /// Accumulation, guessing and recovery time
    pub break_time: Duration,
}

/// Aggregated measurements of a simulated campaign
#[derive(Clone, Debug)]
pub struct CampaignReport {
    /// Name of the parameter set
    pub instance: &'static str,
    /// Signatures per repetition
    pub signatures: u64,
    /// Threshold applied in every repetition
    pub threshold: u64,
    /// Time spent generating keys
    pub keygen_time: Duration,
    /// Time spent signing
    pub signing_time: Duration,
    /// Signatures that verified
    pub verified: u64,
    /// Time spent verifying signatures that verified
    pub verified_time: Duration,
    /// Signatures that failed verification
    pub rejected: u64,
    /// Time spent verifying signatures that failed
    pub rejected_time: Duration,
    /// One entry per repetition
    pub runs: Vec<RunReport>,
}

impl CampaignReport {
    /// Number of repetitions where the key was not recovered
    pub fn recovery_failures(&self) -> usize {
        self.runs.iter().filter(|r| !r.recovered).count()
    }

    fn row<T: fmt::Display>(
        f: &mut fmt::Formatter<'_>,
        label: &str,
        values: impl Iterator<Item = T>,
    ) -> fmt::Result {
        let values: Vec<String> = values.map(|v| v.to_string()).collect();
        writeln!(f, "{:<18}\t[{}]", label, values.join("\t"))
    }
}

impl fmt::Display for CampaignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reps = self.runs.len() as u64;
        writeln!(f, "===== SHMWW {} =====", self.instance)?;
        writeln!(f, "Generated {} keys in {} ms", reps, self.keygen_time.as_millis())?;
        writeln!(
            f,
            "Generated {} signatures in {} ms",
            reps * self.signatures,
            self.signing_time.as_millis()
        )?;
        writeln!(
            f,
            "Signatures passed verification {} times in {} ms",
            self.verified,
            self.verified_time.as_millis()
        )?;
        if self.rejected > 0 {
            writeln!(
                f,
                "Signatures failed verification {} times in {} ms",
                self.rejected,
                self.rejected_time.as_millis()
            )?;
        }
        writeln!(f, "===== CRYPTANALYSIS =====")?;
        writeln!(
            f,
            "Recovered {}/{} keys: threshold={}",
            self.runs.len() - self.recovery_failures(),
            self.runs.len(),
            self.threshold
        )?;
        Self::row(f, "nbRandomColumns:", self.runs.iter().map(|r| r.stats.guessed_columns))?;
        Self::row(f, "nbRandomSampling:", self.runs.iter().map(|r| r.stats.random_draws))?;
        Self::row(f, "nbTryInvSubH:", self.runs.iter().map(|r| r.stats.attempts))?;
        Self::row(
            f,
            "time trandsamp:",
            self.runs.iter().map(|r| r.stats.sampling_time.as_millis()),
        )?;
        Self::row(
            f,
            "time trinv:",
            self.runs.iter().map(|r| r.stats.inversion_time.as_millis()),
        )?;
        writeln!(f, "-------------------------")?;
        Self::row(f, "time break:", self.runs.iter().map(|r| r.break_time.as_millis()))
    }
}

/// Repeated key generation, signing and recovery on fresh keys
#[derive(Clone, Debug)]
pub struct SimulatedCampaign {
    scheme: Shmww,
    signatures: u64,
    repetitions: usize,
    config: RecoveryConfig,
}

impl SimulatedCampaign {
    /// Campaign of `repetitions` runs with `signatures` signatures each
    pub fn new(
        params: ParameterSet,
        signatures: u64,
        repetitions: usize,
        config: RecoveryConfig,
    ) -> Result<Self> {
        if repetitions == 0 {
            return Err(Error::param("repetitions", "must be strictly positive"));
        }
        Ok(Self {
            scheme: Shmww::new(params)?,
            signatures,
            repetitions,
            config,
        })
    }

    /// Run every repetition, drawing all randomness from `rng`
    pub fn run<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<CampaignReport> {
        let params = *self.scheme.params();
        let threshold = CorpusSource::Simulated.threshold(&params, self.signatures);
        let mut report = CampaignReport {
            instance: params.name(),
            signatures: self.signatures,
            threshold,
            keygen_time: Duration::ZERO,
            signing_time: Duration::ZERO,
            verified: 0,
            verified_time: Duration::ZERO,
            rejected: 0,
            rejected_time: Duration::ZERO,
            runs: Vec::with_capacity(self.repetitions),
        };
        let mut weights = WeightAccumulator::new(params.n);

        for iteration in 0..self.repetitions {
            let t = Instant::now();
            let (pk, sk) = self.scheme.keypair(rng)?;
            report.keygen_time += t.elapsed();

            weights.reset();
            let mut break_time = Duration::ZERO;
            for _ in 0..self.signatures {
                let t = Instant::now();
                let sig = self.scheme.sign(&pk, &sk, rng)?;
                report.signing_time += t.elapsed();

                let t = Instant::now();
                let verdict = self.scheme.verify(&sig, &pk);
                match verdict {
                    Ok(()) => {
                        report.verified += 1;
                        report.verified_time += t.elapsed();
                    }
                    Err(e) => {
                        warn!("signature verification failed: {}", e);
                        report.rejected += 1;
                        report.rejected_time += t.elapsed();
                    }
                }

                let t = Instant::now();
                weights.accumulate(sig.z())?;
                break_time += t.elapsed();
            }

            let t = Instant::now();
            let mut sampler = RngSampler::new(&mut *rng);
            let (secret_key, stats) =
                break_key(&params, &pk, &weights, threshold, self.config, &mut sampler)?;
            let recovered = match secret_key {
                Ok(secret_key) => same_key(&secret_key, sk.e()),
                Err(Error::RecoveryExhausted { .. }) => false,
                Err(e) => return Err(e),
            };
            let run = RunReport {
                recovered,
                stats,
                break_time: Duration::ZERO,
            };
            break_time += t.elapsed();

            if !run.recovered {
                warn!("repetition {}: secret key not recovered", iteration);
            }
            report.runs.push(RunReport { break_time, ..run });
        }

        if report.rejected != 0 {
            warn!(
                "{}/{} verification failures",
                report.rejected,
                self.signatures * self.repetitions as u64
            );
        }
        Ok(report)
    }
}
