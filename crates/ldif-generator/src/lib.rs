//! Deterministic LDIF fixture generation for directory change-feed consumers.
//!
//! This crate synthesizes a population of unique person entries from word
//! pools and renders it as LDIF change records: bulk-add files (optionally
//! split across several files), organizational-unit creations, attribute
//! modifications and deletions.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading word pools from a directory of line-delimited lists
//! - Unique identity synthesis with class-conditional attributes
//! - Reproducible output from a seeded `ChaCha8` generator
//! - Chunked add files honouring a per-file entry limit
//!
//! # Example
//!
//! ```
//! use ldif_generator::{GeneratorConfig, LineEnding, MemorySink, OutputFile, PoolKind, WordPools, generate};
//!
//! let pools = WordPools::builder()
//!     .pool(PoolKind::OrganizationalUnits, ["Sales"])
//!     .pool(PoolKind::FamilyNames, ["Smith"])
//!     .pool(PoolKind::GivenNames, ["Ann"])
//!     .pool(PoolKind::EntryClasses, ["person"])
//!     .pool(PoolKind::MailHosts, ["example.com"])
//!     .pool(PoolKind::Positions, ["Engineer"])
//!     .pool(PoolKind::TitleRanks, ["Senior"])
//!     .pool(PoolKind::Localities, ["Paris"])
//!     .build()
//!     .expect("valid pools");
//! let config = GeneratorConfig::builder("people", "dc=example,dc=com", 1)
//!     .seed(Some(42))
//!     .build()
//!     .expect("valid configuration");
//! let mut sink = MemorySink::new(LineEnding::Unix);
//!
//! generate(&config, &pools, &mut sink).expect("generation succeeds");
//!
//! let adds = sink.contents(OutputFile::Chunk(0)).expect("add file");
//! assert!(adds.starts_with("dn: cn=Smith Ann,ou=Sales,dc=example,dc=com\nchangetype: add\n"));
//! ```

pub mod cli;
mod config;
mod emitter;
mod entry_class;
mod error;
mod plan;
mod pools;
mod population;
mod record;
mod run;
mod sink;
mod synthesizer;

pub use config::{GeneratorConfig, GeneratorConfigBuilder};
pub use emitter::{Emitter, WrittenFile, mail_address};
pub use entry_class::{AttributeGroups, EntryClass};
pub use error::{ConfigurationError, GeneratorError, OutputError, PoolError};
pub use plan::ChunkPlan;
pub use pools::{PoolKind, WordPool, WordPools, WordPoolsBuilder};
pub use population::{Identity, Population};
pub use record::LdifRecord;
pub use run::{RunSummary, generate, generate_with_rng};
pub use sink::{FileSink, LineEnding, LineSink, MemoryFile, MemorySink, OutputFile};
pub use synthesizer::{Synthesis, SynthesisOptions, synthesize};
