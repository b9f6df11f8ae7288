//! Full attack pipeline on the reduced instance

use std::io::Write;

use shmww_api::{Error, RngSampler};
use shmww_cryptanalysis::{
    guess_columns, ColumnGuess, CorpusSource, IsdRecovery, RecoveryConfig, SimulatedCampaign,
    StoredAttack, WeightAccumulator,
};
use shmww_sign::pq::shmww::encoding;
use shmww_sign::SampleFiles;
use shmww_tests::{
    scratch_dir, seeded_rng, toy_params, Fixture, TOY_MAX_ATTEMPTS, TOY_SIGNATURES,
};

fn config() -> RecoveryConfig {
    RecoveryConfig::default().with_max_attempts(TOY_MAX_ATTEMPTS)
}

#[test]
fn simulated_corpus_recovers_the_key_bit_for_bit() {
    let mut rng = seeded_rng(0x5348_4d57);
    let fixture = Fixture::new(&mut rng);
    let params = fixture.params;

    let weights = fixture.accumulate(TOY_SIGNATURES, &mut rng);
    let threshold = CorpusSource::Simulated.threshold(&params, TOY_SIGNATURES);
    assert_eq!(threshold, 42);

    let guess = guess_columns(&weights, threshold);
    // the guess should be close to the l * (n' - k') random columns
    assert!(guess.count() > 0);
    assert!(guess.count() <= params.syndrome_len());

    let engine = IsdRecovery::new(&params, &fixture.pk, config()).unwrap();
    let recovery = engine
        .recover(&guess, &mut RngSampler::new(seeded_rng(1)))
        .unwrap();

    assert_eq!(&recovery.secret_key, fixture.sk.e());
    assert_eq!(recovery.stats.guessed_columns, guess.count());
    assert_eq!(recovery.stats.rows_recovered, params.k_prime);
}

#[test]
fn zero_signatures_fall_back_to_pure_isd() {
    let mut rng = seeded_rng(77);
    let fixture = Fixture::new(&mut rng);
    let params = fixture.params;

    let weights = WeightAccumulator::new(params.n);
    let threshold = CorpusSource::Simulated.threshold(&params, 0);
    let guess = guess_columns(&weights, threshold);
    assert_eq!(guess.count(), 0);

    let engine = IsdRecovery::new(&params, &fixture.pk, config()).unwrap();
    let recovery = engine
        .recover(&guess, &mut RngSampler::new(seeded_rng(2)))
        .unwrap();
    assert_eq!(&recovery.secret_key, fixture.sk.e());
    assert_eq!(recovery.stats.guessed_columns, 0);
}

#[test]
fn misclassified_columns_cost_attempts_not_correctness() {
    let mut rng = seeded_rng(11);
    let fixture = Fixture::new(&mut rng);
    let params = fixture.params;
    let e = fixture.sk.e();

    // identity columns carry a single one, random columns about k'/2
    let (identity, random): (Vec<usize>, Vec<usize>) =
        (0..params.n).partition(|&j| e.column_weight(j) == 1);
    assert_eq!(random.len(), params.max_row_weight());

    // every other random column is missed, twenty identity columns are wrong
    let mut columns: Vec<usize> = random.iter().copied().step_by(2).collect();
    columns.extend(identity.iter().copied().take(20));
    let guess = ColumnGuess::from_indices(params.n, &columns);
    assert_eq!(guess.count(), 35);
    assert_eq!(guess.as_vector().weight(), 35);
    assert_eq!(identity.iter().filter(|&&j| guess.contains(j)).count(), 20);
    assert_eq!(random.iter().filter(|&&j| !guess.contains(j)).count(), 15);

    let engine = IsdRecovery::new(&params, &fixture.pk, config()).unwrap();
    let recovery = engine
        .recover(&guess, &mut RngSampler::new(seeded_rng(12)))
        .unwrap();
    assert_eq!(&recovery.secret_key, e);
    assert_eq!(recovery.stats.guessed_columns, 35);
    assert_eq!(recovery.stats.rows_recovered, params.k_prime);
}

#[test]
fn recovery_is_reproducible_for_a_fixed_seed() {
    let mut rng = seeded_rng(3);
    let fixture = Fixture::new(&mut rng);
    let guess = guess_columns(
        &fixture.accumulate(TOY_SIGNATURES, &mut rng),
        CorpusSource::Simulated.threshold(&fixture.params, TOY_SIGNATURES),
    );
    let engine = IsdRecovery::new(&fixture.params, &fixture.pk, config()).unwrap();

    let a = engine.recover(&guess, &mut RngSampler::new(seeded_rng(9))).unwrap();
    let b = engine.recover(&guess, &mut RngSampler::new(seeded_rng(9))).unwrap();
    assert_eq!(a.secret_key, b.secret_key);
    assert_eq!(a.stats.attempts, b.stats.attempts);
    assert_eq!(a.stats.random_draws, b.stats.random_draws);
}

#[test]
fn simulated_campaign_breaks_every_key() {
    let campaign = SimulatedCampaign::new(toy_params(), TOY_SIGNATURES, 2, config()).unwrap();
    let report = campaign.run(&mut seeded_rng(4)).unwrap();

    assert_eq!(report.runs.len(), 2);
    assert_eq!(report.recovery_failures(), 0);
    assert_eq!(report.verified, 2 * TOY_SIGNATURES);
    assert_eq!(report.rejected, 0);
    assert_eq!(report.threshold, 42);
    assert!(report.to_string().contains("Recovered 2/2 keys"));
}

#[test]
fn exhausted_runs_keep_their_counters() {
    let params = toy_params();
    let config = RecoveryConfig::default().with_max_attempts(3);
    let campaign = SimulatedCampaign::new(params, 0, 1, config).unwrap();
    let report = campaign.run(&mut seeded_rng(13)).unwrap();

    assert_eq!(report.recovery_failures(), 1);
    let stats = &report.runs[0].stats;
    assert_eq!(stats.attempts, 3);
    assert_eq!(stats.guessed_columns, 0);
    assert!(stats.random_draws >= stats.attempts * params.syndrome_len() as u64);
    assert!(stats.rows_recovered < params.k_prime);
    assert!(report.to_string().contains("Recovered 0/1 keys"));
}

fn write_samples(files: &SampleFiles, fixture: &Fixture, signatures: u64) {
    let mut rng = seeded_rng(6);
    encoding::store_public_key(files.public_key(), &fixture.pk).unwrap();
    encoding::store_secret_key(files.secret_key(), &fixture.sk).unwrap();
    let mut out = encoding::create(files.signatures()).unwrap();
    for sig in fixture.signatures(signatures, &mut rng) {
        encoding::write_response(&mut out, &sig).unwrap();
    }
    out.flush().unwrap();
}

#[test]
fn stored_attack_reads_the_sample_directory() {
    let dir = scratch_dir("stored-attack");
    let files = SampleFiles::new(&dir, 1);
    let fixture = Fixture::new(&mut seeded_rng(5));
    write_samples(&files, &fixture, TOY_SIGNATURES);

    let attack = StoredAttack::with_params(fixture.params, files, TOY_SIGNATURES, config());
    let outcome = attack.run(&mut RngSampler::new(seeded_rng(7))).unwrap();

    assert_eq!(outcome.threshold, 22);
    assert!(outcome.recovered, "{outcome}");
    assert!(outcome.guessed_columns <= fixture.params.syndrome_len());
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn stored_attack_rejects_a_short_corpus() {
    let dir = scratch_dir("short-corpus");
    let files = SampleFiles::new(&dir, 1);
    let fixture = Fixture::new(&mut seeded_rng(8));
    write_samples(&files, &fixture, 5);

    let attack = StoredAttack::with_params(fixture.params, files, 6, config());
    match attack.run(&mut RngSampler::new(seeded_rng(0))) {
        Err(Error::Format { context, message }) => {
            assert_eq!(context, "signature corpus");
            assert!(message.contains("PARA-1sigs"), "{message}");
        }
        other => panic!("expected a format error, got {other:?}"),
    }
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn stored_attack_reports_the_missing_file() {
    let dir = scratch_dir("missing-files");
    let attack = StoredAttack::with_params(toy_params(), SampleFiles::new(&dir, 2), 10, config());
    match attack.run(&mut RngSampler::new(seeded_rng(0))) {
        Err(Error::Io { path, .. }) => assert!(path.ends_with("PARA-2pk")),
        other => panic!("expected an I/O error, got {other:?}"),
    }
    let _ = std::fs::remove_dir_all(dir);
}
