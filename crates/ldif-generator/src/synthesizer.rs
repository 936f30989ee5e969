//! Population synthesis from the name and organization pools.
//!
//! Candidates are drawn until the population reaches the requested size.
//! The draw order per candidate (organizational unit, family name, given
//! name, entry class) is part of the reproducibility contract: changing it
//! changes every seeded output.

use std::num::NonZeroUsize;

use rand::Rng;

use crate::entry_class::EntryClass;
use crate::error::ConfigurationError;
use crate::pools::{PoolKind, WordPools};
use crate::population::{Identity, Population};

/// Lower bound on consecutive duplicate draws before giving up.
const MIN_RETRY_BUDGET: usize = 10_000;

/// Consecutive duplicate draws allowed per distinct display name.
///
/// Missing one specific name in `capacity * 32` uniform draws has
/// probability below `e^-32`.
const RETRY_FACTOR: usize = 32;

/// Parameters of one synthesis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisOptions<'a> {
    /// Number of identities to produce.
    pub target_size: NonZeroUsize,
    /// Suffix appended to every distinguished name.
    pub base_dn: &'a str,
    /// Prefix display names with the pre-insertion population size.
    pub numbered_names: bool,
}

/// Outcome of a synthesis pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    /// The synthesized identities, in insertion order.
    pub population: Population,
    /// Number of candidates discarded as duplicates.
    pub duplicates: usize,
}

/// Synthesizes a population of exactly `options.target_size` identities.
///
/// # Errors
///
/// Returns [`ConfigurationError::PoolTooSmall`] when, without numbering,
/// the family and given name pools cannot produce enough distinct display
/// names, and [`ConfigurationError::RetryBudgetExhausted`] when too many
/// consecutive candidates collide with existing names.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use ldif_generator::{PoolKind, SynthesisOptions, WordPools, synthesize};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let pools = WordPools::builder()
///     .pool(PoolKind::OrganizationalUnits, ["Sales"])
///     .pool(PoolKind::FamilyNames, ["Smith", "Jones"])
///     .pool(PoolKind::GivenNames, ["Ann", "Bob"])
///     .pool(PoolKind::EntryClasses, ["person"])
///     .pool(PoolKind::MailHosts, ["example.com"])
///     .pool(PoolKind::Positions, ["Engineer"])
///     .pool(PoolKind::TitleRanks, ["Senior"])
///     .pool(PoolKind::Localities, ["Paris"])
///     .build()
///     .expect("pools");
/// let options = SynthesisOptions {
///     target_size: NonZeroUsize::new(4).expect("non-zero"),
///     base_dn: "dc=example,dc=com",
///     numbered_names: false,
/// };
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
///
/// let synthesis = synthesize(&options, &pools, &mut rng).expect("synthesized");
/// assert_eq!(synthesis.population.len(), 4);
/// ```
pub fn synthesize<R>(
    options: &SynthesisOptions<'_>,
    pools: &WordPools,
    rng: &mut R,
) -> Result<Synthesis, ConfigurationError>
where
    R: Rng + ?Sized,
{
    let requested = options.target_size.get();
    let capacity = name_capacity(pools, options.numbered_names);
    if let Some(limit) = capacity
        && requested > limit
    {
        return Err(ConfigurationError::PoolTooSmall {
            requested,
            capacity: limit,
        });
    }
    let retry_budget = capacity.map_or(MIN_RETRY_BUDGET, |limit| {
        limit.saturating_mul(RETRY_FACTOR).max(MIN_RETRY_BUDGET)
    });

    let mut population = Population::with_capacity(requested);
    let mut duplicates = 0_usize;
    let mut consecutive = 0_usize;

    while population.len() < requested {
        let identity = draw_candidate(options, pools, population.len(), rng);
        if population.insert(identity) {
            consecutive = 0;
            continue;
        }
        duplicates = duplicates.saturating_add(1);
        consecutive = consecutive.saturating_add(1);
        if consecutive >= retry_budget {
            return Err(ConfigurationError::RetryBudgetExhausted {
                attempts: consecutive,
                generated: population.len(),
                requested,
            });
        }
    }

    Ok(Synthesis {
        population,
        duplicates,
    })
}

/// Draws one candidate identity.
fn draw_candidate<R>(
    options: &SynthesisOptions<'_>,
    pools: &WordPools,
    current_size: usize,
    rng: &mut R,
) -> Identity
where
    R: Rng + ?Sized,
{
    let organizational_unit = pools.pick(PoolKind::OrganizationalUnits, rng).to_owned();
    let family = pools.pick(PoolKind::FamilyNames, rng);
    let given = pools.pick(PoolKind::GivenNames, rng);
    let display_name = if options.numbered_names {
        format!("{current_size} {family} {given}")
    } else {
        format!("{family} {given}")
    };
    let entry_class = EntryClass::parse(pools.pick(PoolKind::EntryClasses, rng));

    Identity::new(
        display_name,
        organizational_unit,
        entry_class,
        options.base_dn,
    )
}

/// Returns how many distinct display names the pools can produce, or `None`
/// when numbering makes every candidate unique.
fn name_capacity(pools: &WordPools, numbered_names: bool) -> Option<usize> {
    if numbered_names {
        return None;
    }
    let family = pools.get(PoolKind::FamilyNames).distinct_len();
    let given = pools.get(PoolKind::GivenNames).distinct_len();
    Some(family.saturating_mul(given))
}
