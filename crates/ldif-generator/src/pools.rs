//! Word pools feeding entry synthesis and record emission.
//!
//! A [`WordPool`] is an ordered, non-empty list of candidate strings for one
//! semantic role. [`WordPools`] groups the eight roles the generator needs
//! and can be loaded from a directory of line-delimited word lists.

use std::collections::HashSet;
use std::fmt;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{ConfigurationError, PoolError};

/// Semantic role of a word pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    /// Organizational unit names.
    OrganizationalUnits,
    /// Family names.
    FamilyNames,
    /// Given names.
    GivenNames,
    /// Entry (object) classes.
    EntryClasses,
    /// Mail host domains.
    MailHosts,
    /// Position titles.
    Positions,
    /// Rank titles prefixed to positions.
    TitleRanks,
    /// Locality names.
    Localities,
}

impl PoolKind {
    /// Every pool role, in loading order.
    pub const ALL: [Self; 8] = [
        Self::OrganizationalUnits,
        Self::FamilyNames,
        Self::GivenNames,
        Self::EntryClasses,
        Self::MailHosts,
        Self::Positions,
        Self::TitleRanks,
        Self::Localities,
    ];

    /// Returns the word-list file name for this role.
    ///
    /// # Example
    ///
    /// ```
    /// use ldif_generator::PoolKind;
    ///
    /// assert_eq!(PoolKind::EntryClasses.file_name(), "person-classes.txt");
    /// ```
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::OrganizationalUnits => "organizational-units.txt",
            Self::FamilyNames => "family-names.txt",
            Self::GivenNames => "given-names.txt",
            Self::EntryClasses => "person-classes.txt",
            Self::MailHosts => "mail-hosts.txt",
            Self::Positions => "positions.txt",
            Self::TitleRanks => "title-ranks.txt",
            Self::Localities => "localities.txt",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::OrganizationalUnits => "organizational units",
            Self::FamilyNames => "family names",
            Self::GivenNames => "given names",
            Self::EntryClasses => "entry classes",
            Self::MailHosts => "mail hosts",
            Self::Positions => "positions",
            Self::TitleRanks => "title ranks",
            Self::Localities => "localities",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An ordered, non-empty sequence of candidate strings for one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    kind: PoolKind,
    entries: Vec<String>,
}

impl WordPool {
    /// Creates a pool from its entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyPool`] if `entries` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use ldif_generator::{PoolKind, WordPool};
    ///
    /// let pool = WordPool::new(PoolKind::Localities, vec!["Lyon".to_owned()])
    ///     .expect("non-empty pool");
    /// assert_eq!(pool.entries(), ["Lyon"]);
    /// assert!(WordPool::new(PoolKind::Localities, Vec::new()).is_err());
    /// ```
    pub fn new(kind: PoolKind, entries: Vec<String>) -> Result<Self, ConfigurationError> {
        if entries.is_empty() {
            return Err(ConfigurationError::EmptyPool { pool: kind });
        }
        Ok(Self { kind, entries })
    }

    /// Parses a line-delimited word list, skipping blank lines.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyPool`] if no non-blank line remains.
    pub fn from_lines(kind: PoolKind, text: &str) -> Result<Self, ConfigurationError> {
        let entries = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect();
        Self::new(kind, entries)
    }

    /// Returns the pool's role.
    #[must_use]
    pub const fn kind(&self) -> PoolKind {
        self.kind
    }

    /// Returns the pool entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns the number of distinct entries.
    #[must_use]
    pub fn distinct_len(&self) -> usize {
        self.entries.iter().collect::<HashSet<_>>().len()
    }

    /// Draws one entry uniformly at random.
    pub(crate) fn pick<R>(&self, rng: &mut R) -> &str
    where
        R: Rng + ?Sized,
    {
        // Construction guarantees at least one entry.
        self.entries.choose(rng).map_or("", String::as_str)
    }
}

/// The complete set of word pools used by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPools {
    organizational_units: WordPool,
    family_names: WordPool,
    given_names: WordPool,
    entry_classes: WordPool,
    mail_hosts: WordPool,
    positions: WordPool,
    title_ranks: WordPool,
    localities: WordPool,
}

impl WordPools {
    /// Starts building a pool set from in-memory lists.
    ///
    /// # Example
    ///
    /// ```
    /// use ldif_generator::{PoolKind, WordPools};
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
    ///     .expect("all pools supplied");
    ///
    /// assert_eq!(pools.get(PoolKind::FamilyNames).entries(), ["Smith"]);
    /// ```
    #[must_use]
    pub fn builder() -> WordPoolsBuilder {
        WordPoolsBuilder::default()
    }

    /// Loads every word list from `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Read`] if the directory or a file cannot be read,
    /// and [`PoolError::Invalid`] if a file holds no usable entries.
    pub fn load(data_dir: &Utf8Path) -> Result<Self, PoolError> {
        let dir = Dir::open_ambient_dir(data_dir, ambient_authority()).map_err(|err| {
            PoolError::Read {
                path: data_dir.to_path_buf(),
                message: err.to_string(),
            }
        })?;
        Self::load_from_dir(&dir, data_dir)
    }

    /// Loads every word list from an open directory handle.
    ///
    /// `display_root` is only used to build error paths.
    ///
    /// # Errors
    ///
    /// See [`WordPools::load`].
    pub fn load_from_dir(dir: &Dir, display_root: &Utf8Path) -> Result<Self, PoolError> {
        let mut builder = Self::builder();
        for kind in PoolKind::ALL {
            let text = dir
                .read_to_string(kind.file_name())
                .map_err(|err| PoolError::Read {
                    path: display_root.join(kind.file_name()),
                    message: err.to_string(),
                })?;
            builder = builder.with_pool(WordPool::from_lines(kind, &text)?);
        }
        Ok(builder.build()?)
    }

    /// Returns the pool for `kind`.
    #[must_use]
    pub const fn get(&self, kind: PoolKind) -> &WordPool {
        match kind {
            PoolKind::OrganizationalUnits => &self.organizational_units,
            PoolKind::FamilyNames => &self.family_names,
            PoolKind::GivenNames => &self.given_names,
            PoolKind::EntryClasses => &self.entry_classes,
            PoolKind::MailHosts => &self.mail_hosts,
            PoolKind::Positions => &self.positions,
            PoolKind::TitleRanks => &self.title_ranks,
            PoolKind::Localities => &self.localities,
        }
    }

    /// Returns the organizational unit names.
    #[must_use]
    pub fn organizational_units(&self) -> &[String] {
        self.organizational_units.entries()
    }

    pub(crate) fn pick<R>(&self, kind: PoolKind, rng: &mut R) -> &str
    where
        R: Rng + ?Sized,
    {
        self.get(kind).pick(rng)
    }
}

/// Collects pools for [`WordPools`]; see [`WordPools::builder`].
#[derive(Debug, Clone, Default)]
pub struct WordPoolsBuilder {
    pools: Vec<WordPool>,
    empty: Option<PoolKind>,
}

impl WordPoolsBuilder {
    /// Sets the entries of one pool, replacing any earlier value.
    #[must_use]
    pub fn pool<I, S>(self, kind: PoolKind, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let collected: Vec<String> = entries.into_iter().map(Into::into).collect();
        match WordPool::new(kind, collected) {
            Ok(pool) => self.with_pool(pool),
            Err(_) => Self {
                pools: self.pools.into_iter().filter(|p| p.kind != kind).collect(),
                empty: self.empty.or(Some(kind)),
            },
        }
    }

    /// Sets an already validated pool, replacing any earlier value.
    #[must_use]
    pub fn with_pool(self, pool: WordPool) -> Self {
        let mut pools: Vec<WordPool> = self
            .pools
            .into_iter()
            .filter(|existing| existing.kind != pool.kind)
            .collect();
        let empty = self.empty.filter(|kind| *kind != pool.kind);
        pools.push(pool);
        Self { pools, empty }
    }

    /// Finishes the pool set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyPool`] naming the first pool that
    /// was empty or never supplied.
    pub fn build(self) -> Result<WordPools, ConfigurationError> {
        if let Some(pool) = self.empty {
            return Err(ConfigurationError::EmptyPool { pool });
        }
        let mut pools = self.pools;
        let mut take = |kind: PoolKind| {
            let position = pools.iter().position(|pool| pool.kind == kind);
            position
                .map(|index| pools.swap_remove(index))
                .ok_or(ConfigurationError::EmptyPool { pool: kind })
        };
        Ok(WordPools {
            organizational_units: take(PoolKind::OrganizationalUnits)?,
            family_names: take(PoolKind::FamilyNames)?,
            given_names: take(PoolKind::GivenNames)?,
            entry_classes: take(PoolKind::EntryClasses)?,
            mail_hosts: take(PoolKind::MailHosts)?,
            positions: take(PoolKind::Positions)?,
            title_ranks: take(PoolKind::TitleRanks)?,
            localities: take(PoolKind::Localities)?,
        })
    }
}
