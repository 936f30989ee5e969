//! Rendering of the synthesized population into LDIF output files.
//!
//! The emitter is read-only over the population and the word pools. Random
//! ancillary values are drawn from the caller's generator in a fixed order
//! per record:
//!
//! - add records: mail host (for every record), then locality and telephone
//!   number for classes with contact attributes, then secretary and manager
//!   for classes with mail attributes;
//! - modify records: rank, then position.

use std::num::NonZeroUsize;

use rand::Rng;
use tracing::debug;

use crate::entry_class::EntryClass;
use crate::error::OutputError;
use crate::plan::ChunkPlan;
use crate::pools::{PoolKind, WordPools};
use crate::population::{Identity, Population};
use crate::record::LdifRecord;
use crate::sink::{LineSink, OutputFile};

/// Exclusive upper bound of the random telephone number suffix.
const TELEPHONE_SUFFIX_BOUND: u32 = 100_000_000;

/// Country prefix of generated telephone numbers.
const TELEPHONE_PREFIX: &str = "+33";

/// A file written by the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrittenFile {
    /// Role of the file.
    pub file: OutputFile,
    /// Number of LDIF blocks written to it.
    pub records: usize,
}

/// Renders LDIF records for one population.
#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    pools: &'a WordPools,
    base_dn: &'a str,
}

impl<'a> Emitter<'a> {
    /// Creates an emitter drawing ancillary values from `pools`.
    #[must_use]
    pub const fn new(pools: &'a WordPools, base_dn: &'a str) -> Self {
        Self { pools, base_dn }
    }

    /// Builds the add record of `identity`.
    ///
    /// Secretary and manager references are drawn from the whole
    /// `population`; an identity may reference itself.
    pub fn add_record<R>(
        &self,
        identity: &Identity,
        population: &Population,
        rng: &mut R,
    ) -> LdifRecord
    where
        R: Rng + ?Sized,
    {
        let host = self.pools.pick(PoolKind::MailHosts, rng);
        let name = identity.display_name();
        let mut record = LdifRecord::with_dn(identity.distinguished_name())
            .attribute("changetype", "add")
            .attribute("cn", name)
            .attribute("sn", name)
            .attribute("description", &format!("This is {name}'s description."));

        let groups = identity.entry_class().attribute_groups();
        if groups.contact {
            let locality = self.pools.pick(PoolKind::Localities, rng);
            let telephone = rng.random_range(0..TELEPHONE_SUFFIX_BOUND);
            record = record
                .attribute("ou", identity.organizational_unit())
                .attribute("l", locality)
                .attribute("telephoneNumber", &format!("{TELEPHONE_PREFIX}{telephone}"));
        }
        if groups.mail {
            record = record.attribute(
                "mail",
                &mail_address(name, identity.organizational_unit(), host),
            );
            if let Some(secretary) = population.choose(rng) {
                record = record.attribute("secretary", secretary.distinguished_name());
            }
            if let Some(manager) = population.choose(rng) {
                record = record.attribute("manager", manager.distinguished_name());
            }
        }

        record.attribute("objectclass", identity.entry_class().as_str())
    }

    /// Builds the add record of organizational unit `name`.
    #[must_use]
    pub fn organizational_unit_record(&self, name: &str) -> LdifRecord {
        LdifRecord::with_dn(&self.organizational_unit_dn(name))
            .attribute("objectclass", "organizationalUnit")
            .attribute("ou", name)
    }

    /// Builds a `title` addition for `identity`.
    pub fn title_modification<R>(&self, identity: &Identity, rng: &mut R) -> LdifRecord
    where
        R: Rng + ?Sized,
    {
        let title = self.random_title(rng);
        modify_record(identity.distinguished_name(), "add", "title", &title)
    }

    /// Builds a `description` replacement for `identity`.
    pub fn description_modification<R>(&self, identity: &Identity, rng: &mut R) -> LdifRecord
    where
        R: Rng + ?Sized,
    {
        let description = self.random_title(rng);
        modify_record(
            identity.distinguished_name(),
            "replace",
            "description",
            &description,
        )
    }

    /// Builds the deletion marker of `identity`: its bare DN.
    #[must_use]
    #[expect(
        clippy::unused_self,
        reason = "entry DNs already carry the base DN; kept beside the unit variant"
    )]
    pub fn identity_deletion(&self, identity: &Identity) -> LdifRecord {
        LdifRecord::default().raw(identity.distinguished_name())
    }

    /// Builds the deletion marker of organizational unit `name`.
    #[must_use]
    pub fn organizational_unit_deletion(&self, name: &str) -> LdifRecord {
        LdifRecord::default().raw(self.organizational_unit_dn(name))
    }

    /// Writes add records split across chunk files.
    ///
    /// `max_entries_per_file` of `None` puts every record in one file.
    ///
    /// # Errors
    ///
    /// Propagates any [`OutputError`] from the sink.
    pub fn write_add_records<R, S>(
        &self,
        population: &Population,
        max_entries_per_file: Option<NonZeroUsize>,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<Vec<WrittenFile>, OutputError>
    where
        R: Rng + ?Sized,
        S: LineSink + ?Sized,
    {
        let Some(total) = NonZeroUsize::new(population.len()) else {
            let file = OutputFile::Chunk(0);
            sink.start_file(file)?;
            sink.finish_file()?;
            return Ok(vec![WrittenFile { file, records: 0 }]);
        };

        let plan = ChunkPlan::new(total, max_entries_per_file);
        let mut identities = population.iter();
        let mut written = Vec::with_capacity(plan.file_count());
        for (index, size) in plan.sizes().enumerate() {
            let file = OutputFile::Chunk(index);
            sink.start_file(file)?;
            let mut records = 0_usize;
            for identity in identities.by_ref().take(size) {
                self.add_record(identity, population, rng).write_to(sink)?;
                records = records.saturating_add(1);
            }
            sink.finish_file()?;
            written.push(finished(file, records));
        }
        Ok(written)
    }

    /// Writes an add record for every organizational unit in the pool.
    ///
    /// # Errors
    ///
    /// Propagates any [`OutputError`] from the sink.
    pub fn write_organizational_units<S>(&self, sink: &mut S) -> Result<WrittenFile, OutputError>
    where
        S: LineSink + ?Sized,
    {
        let file = OutputFile::OrganizationalUnits;
        sink.start_file(file)?;
        let units = self.pools.organizational_units();
        for name in units {
            self.organizational_unit_record(name).write_to(sink)?;
        }
        sink.finish_file()?;
        Ok(finished(file, units.len()))
    }

    /// Writes `title` additions for `inetOrgPerson` entries only.
    ///
    /// # Errors
    ///
    /// Propagates any [`OutputError`] from the sink.
    pub fn write_title_modifications<R, S>(
        &self,
        population: &Population,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<WrittenFile, OutputError>
    where
        R: Rng + ?Sized,
        S: LineSink + ?Sized,
    {
        let file = OutputFile::TitleModifications;
        sink.start_file(file)?;
        let mut records = 0_usize;
        for identity in population
            .iter()
            .filter(|identity| *identity.entry_class() == EntryClass::InetOrgPerson)
        {
            self.title_modification(identity, rng).write_to(sink)?;
            records = records.saturating_add(1);
        }
        sink.finish_file()?;
        Ok(finished(file, records))
    }

    /// Writes `description` replacements for every entry.
    ///
    /// # Errors
    ///
    /// Propagates any [`OutputError`] from the sink.
    pub fn write_description_modifications<R, S>(
        &self,
        population: &Population,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<WrittenFile, OutputError>
    where
        R: Rng + ?Sized,
        S: LineSink + ?Sized,
    {
        let file = OutputFile::DescriptionModifications;
        sink.start_file(file)?;
        for identity in population {
            self.description_modification(identity, rng)
                .write_to(sink)?;
        }
        sink.finish_file()?;
        Ok(finished(file, population.len()))
    }

    /// Writes deletion markers: every entry, then every organizational unit.
    ///
    /// # Errors
    ///
    /// Propagates any [`OutputError`] from the sink.
    pub fn write_deletions<S>(
        &self,
        population: &Population,
        sink: &mut S,
    ) -> Result<WrittenFile, OutputError>
    where
        S: LineSink + ?Sized,
    {
        let file = OutputFile::Deletions;
        sink.start_file(file)?;
        for identity in population {
            self.identity_deletion(identity).write_to(sink)?;
        }
        let units = self.pools.organizational_units();
        for name in units {
            self.organizational_unit_deletion(name).write_to(sink)?;
        }
        sink.finish_file()?;
        Ok(finished(file, population.len().saturating_add(units.len())))
    }

    fn organizational_unit_dn(&self, name: &str) -> String {
        format!("ou={name},{}", self.base_dn)
    }

    fn random_title<R>(&self, rng: &mut R) -> String
    where
        R: Rng + ?Sized,
    {
        let rank = self.pools.pick(PoolKind::TitleRanks, rng);
        let position = self.pools.pick(PoolKind::Positions, rng);
        format!("{rank} {position}")
    }
}

/// Builds the mail address of an entry.
///
/// The display name has spaces replaced by dots, the organizational unit has
/// spaces removed, and the whole address is lowercased. The mail host is
/// lowercased too, so `Example.COM` is written as `example.com`.
///
/// # Example
///
/// ```
/// use ldif_generator::mail_address;
///
/// assert_eq!(
///     mail_address("Smith Ann", "Human Resources", "Example.COM"),
///     "smith.ann@humanresources.example.com"
/// );
/// ```
#[must_use]
pub fn mail_address(display_name: &str, organizational_unit: &str, host: &str) -> String {
    let local = display_name.replace(' ', ".");
    let domain = organizational_unit.replace(' ', "");
    format!("{local}@{domain}.{host}").to_lowercase()
}

fn modify_record(dn: &str, action: &str, attribute: &str, value: &str) -> LdifRecord {
    LdifRecord::with_dn(dn)
        .attribute("changetype", "modify")
        .attribute(action, attribute)
        .attribute(attribute, value)
}

fn finished(file: OutputFile, records: usize) -> WrittenFile {
    debug!(file = %file, records, "finished output file");
    WrittenFile { file, records }
}
