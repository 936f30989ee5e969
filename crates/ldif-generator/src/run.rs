//! End-to-end generation runs.
//!
//! A run synthesizes the population, then writes the output files in a
//! fixed order: add chunks, organizational units, title modifications,
//! description modifications, deletions. The single generator is threaded
//! through every step in that order, so a seed fully determines the output.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::emitter::{Emitter, WrittenFile};
use crate::error::GeneratorError;
use crate::pools::WordPools;
use crate::sink::LineSink;
use crate::synthesizer::{SynthesisOptions, synthesize};

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Seed the generator was built from, when the run created it.
    pub seed: Option<u64>,
    /// Number of entries generated.
    pub population_size: usize,
    /// Candidates discarded as duplicate display names.
    pub duplicates: usize,
    /// Files written, in write order.
    pub files: Vec<WrittenFile>,
}

/// Runs a generation with a `ChaCha8` generator seeded from the
/// configuration, or from a fresh random seed when none is configured.
///
/// The seed in use is logged and returned so the run can be replayed.
///
/// # Errors
///
/// Returns [`GeneratorError`] if synthesis fails or a file cannot be
/// written. Files written before the failure are left in place.
pub fn generate<S>(
    config: &GeneratorConfig,
    pools: &WordPools,
    sink: &mut S,
) -> Result<RunSummary, GeneratorError>
where
    S: LineSink + ?Sized,
{
    let seed = config.seed().unwrap_or_else(random_seed);
    info!(seed, configured = config.seed().is_some(), "seeding generator");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let summary = generate_with_rng(config, pools, &mut rng, sink)?;
    Ok(RunSummary {
        seed: Some(seed),
        ..summary
    })
}

/// Runs a generation with a caller-supplied generator.
///
/// The configured seed is ignored; the summary reports no seed.
///
/// # Errors
///
/// See [`generate`].
///
/// # Example
///
/// ```
/// use ldif_generator::{
///     GeneratorConfig, LineEnding, MemorySink, OutputFile, PoolKind, WordPools,
///     generate_with_rng,
/// };
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let pools = WordPools::builder()
///     .pool(PoolKind::OrganizationalUnits, ["Sales"])
///     .pool(PoolKind::FamilyNames, ["Smith"])
///     .pool(PoolKind::GivenNames, ["Ann"])
///     .pool(PoolKind::EntryClasses, ["person"])
///     .pool(PoolKind::MailHosts, ["example.com"])
///     .pool(PoolKind::Positions, ["Engineer"])
///     .pool(PoolKind::TitleRanks, ["Senior"])
///     .pool(PoolKind::Localities, ["Paris"])
///     .build()
///     .expect("pools");
/// let config = GeneratorConfig::builder("people", "dc=example,dc=com", 1)
///     .build()
///     .expect("config");
/// let mut sink = MemorySink::new(LineEnding::Unix);
///
/// let summary = generate_with_rng(&config, &pools, &mut ChaCha8Rng::seed_from_u64(1), &mut sink)
///     .expect("generated");
///
/// assert_eq!(summary.files.len(), 5);
/// assert_eq!(
///     sink.contents(OutputFile::Deletions),
///     Some("cn=Smith Ann,ou=Sales,dc=example,dc=com\n\nou=Sales,dc=example,dc=com\n\n")
/// );
/// ```
pub fn generate_with_rng<R, S>(
    config: &GeneratorConfig,
    pools: &WordPools,
    rng: &mut R,
    sink: &mut S,
) -> Result<RunSummary, GeneratorError>
where
    R: Rng + ?Sized,
    S: LineSink + ?Sized,
{
    let options = SynthesisOptions {
        target_size: config.size(),
        base_dn: config.base_dn(),
        numbered_names: config.numbered_names(),
    };
    let synthesis = synthesize(&options, pools, rng)?;
    let population = &synthesis.population;
    info!(
        entries = population.len(),
        duplicates = synthesis.duplicates,
        "synthesized population"
    );

    let emitter = Emitter::new(pools, config.base_dn());
    let mut files =
        emitter.write_add_records(population, config.max_entries_per_file(), rng, sink)?;
    files.push(emitter.write_organizational_units(sink)?);
    files.push(emitter.write_title_modifications(population, rng, sink)?);
    files.push(emitter.write_description_modifications(population, rng, sink)?);
    files.push(emitter.write_deletions(population, sink)?);
    info!(files = files.len(), "generation complete");

    Ok(RunSummary {
        seed: None,
        population_size: population.len(),
        duplicates: synthesis.duplicates,
        files,
    })
}

fn random_seed() -> u64 {
    rand::rng().random()
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::error::ConfigurationError;
    use crate::pools::PoolKind;
    use crate::sink::{LineEnding, MemorySink, OutputFile};

    #[fixture]
    fn pools() -> WordPools {
        WordPools::builder()
            .pool(PoolKind::OrganizationalUnits, ["Sales", "Research"])
            .pool(PoolKind::FamilyNames, ["Smith", "Jones", "Martin"])
            .pool(PoolKind::GivenNames, ["Ann", "Bob", "Carol"])
            .pool(
                PoolKind::EntryClasses,
                ["person", "organizationalPerson", "inetOrgPerson"],
            )
            .pool(PoolKind::MailHosts, ["example.com", "example.org"])
            .pool(PoolKind::Positions, ["Engineer", "Analyst"])
            .pool(PoolKind::TitleRanks, ["Senior", "Junior"])
            .pool(PoolKind::Localities, ["Paris", "Lyon"])
            .build()
            .expect("valid pools")
    }

    #[rstest]
    fn configured_seed_reproduces_output(pools: WordPools) {
        let config = GeneratorConfig::builder("people", "dc=example,dc=com", 6)
            .seed(Some(2))
            .max_entries_per_file(Some(4))
            .build()
            .expect("config");
        let mut first = MemorySink::new(LineEnding::Unix);
        let mut second = MemorySink::new(LineEnding::Unix);

        let summary = generate(&config, &pools, &mut first).expect("first run");
        generate(&config, &pools, &mut second).expect("second run");

        assert_eq!(summary.seed, Some(2));
        assert_eq!(first, second);
    }

    #[rstest]
    fn unseeded_runs_report_the_seed_they_used(pools: WordPools) {
        let config = GeneratorConfig::builder("people", "dc=example,dc=com", 3)
            .build()
            .expect("config");
        let mut sink = MemorySink::new(LineEnding::Unix);

        let summary = generate(&config, &pools, &mut sink).expect("run");
        let seed = summary.seed.expect("seed reported");

        let replay_config = GeneratorConfig::builder("people", "dc=example,dc=com", 3)
            .seed(Some(seed))
            .build()
            .expect("config");
        let mut replay = MemorySink::new(LineEnding::Unix);
        generate(&replay_config, &pools, &mut replay).expect("replay");
        assert_eq!(sink, replay);
    }

    #[rstest]
    fn writes_files_in_a_fixed_order(pools: WordPools) {
        let config = GeneratorConfig::builder("people", "dc=example,dc=com", 5)
            .seed(Some(1))
            .max_entries_per_file(Some(2))
            .build()
            .expect("config");
        let mut sink = MemorySink::new(LineEnding::Unix);

        let summary = generate(&config, &pools, &mut sink).expect("run");

        let order: Vec<_> = summary.files.iter().map(|written| written.file).collect();
        assert_eq!(
            order,
            [
                OutputFile::Chunk(0),
                OutputFile::Chunk(1),
                OutputFile::Chunk(2),
                OutputFile::OrganizationalUnits,
                OutputFile::TitleModifications,
                OutputFile::DescriptionModifications,
                OutputFile::Deletions,
            ]
        );
        assert_eq!(summary.population_size, 5);
    }

    #[rstest]
    fn windows_line_endings_apply_to_every_line(pools: WordPools) {
        let config = GeneratorConfig::builder("people", "dc=example,dc=com", 4)
            .seed(Some(3))
            .line_ending(LineEnding::Windows)
            .build()
            .expect("config");
        let mut sink = MemorySink::new(config.line_ending());

        generate(&config, &pools, &mut sink).expect("run");

        for captured in sink.files() {
            let bare_newlines = captured
                .contents
                .split('\n')
                .filter(|segment| !segment.is_empty() && !segment.ends_with('\r'))
                .count();
            assert_eq!(bare_newlines, 0, "{} has bare newlines", captured.file);
            assert!(captured.contents.is_empty() || captured.contents.ends_with("\r\n"));
        }
    }

    #[rstest]
    fn oversized_targets_fail_before_writing(pools: WordPools) {
        let config = GeneratorConfig::builder("people", "dc=example,dc=com", 10)
            .seed(Some(3))
            .build()
            .expect("config");
        let mut sink = MemorySink::new(LineEnding::Unix);

        let result = generate(&config, &pools, &mut sink);

        assert_eq!(
            result,
            Err(GeneratorError::Configuration {
                source: ConfigurationError::PoolTooSmall {
                    requested: 10,
                    capacity: 9,
                }
            })
        );
        assert!(sink.files().is_empty());
    }
}
