//! Command line support for the `ldif-generator` binary.
//!
//! Parsing and execution live here so they can be exercised in tests
//! without spawning a subprocess. Every long flag also accepts the
//! camel-case spelling, such as `--maxLineNumber`.

use std::path::PathBuf;

use camino::Utf8PathBuf;
use clap::Parser;

use crate::config::GeneratorConfig;
use crate::error::{ConfigurationError, GeneratorError};
use crate::pools::WordPools;
use crate::run::{RunSummary, generate};
use crate::sink::{FileSink, LineEnding};

/// `ldif-generator` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ldif-generator",
    about = "Generate LDIF add, modify and delete fixtures from word lists",
    version
)]
pub struct Cli {
    /// Output prefix; files are written as `<prefix>_<suffix>.ldif`.
    #[arg(
        short = 'o',
        long = "output-file",
        alias = "outputFile",
        value_name = "prefix"
    )]
    pub output_file: PathBuf,
    /// Base DN under which entries are created.
    #[arg(short = 'b', long = "base-dn", alias = "baseDN", value_name = "dn")]
    pub base_dn: String,
    /// Number of entries to generate.
    #[arg(short = 's', long = "size", value_name = "n")]
    pub size: usize,
    /// Seed for the random number generator; random when omitted.
    #[arg(long = "seed", value_name = "n")]
    pub seed: Option<u64>,
    /// Maximum number of add records per file; one file when omitted.
    #[arg(
        short = 'm',
        long = "max-entries-per-file",
        alias = "maxLineNumber",
        value_name = "n"
    )]
    pub max_entries_per_file: Option<usize>,
    /// Prefix every display name with its index, e.g. `cn=200 Smith Ann`.
    #[arg(short = 'p', long = "person-ids", alias = "personIds")]
    pub person_ids: bool,
    /// Terminate lines with `\r\n` instead of `\n`.
    #[arg(short = 'w', long = "windows-eol", alias = "UseWindowsEOL")]
    pub windows_eol: bool,
    /// Directory holding the word lists.
    #[arg(short = 'd', long = "data-dir", value_name = "dir", default_value = "data")]
    pub data_dir: PathBuf,
}

impl Cli {
    /// Validates the arguments into a run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if a path is not UTF-8 or a setting is
    /// invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use clap::Parser;
    /// use ldif_generator::cli::Cli;
    ///
    /// let cli = Cli::try_parse_from([
    ///     "ldif-generator", "-o", "out/people", "-b", "dc=example,dc=com", "-s", "10",
    /// ])
    /// .expect("parse");
    ///
    /// let config = cli.to_config().expect("valid");
    /// assert_eq!(config.size().get(), 10);
    /// ```
    pub fn to_config(&self) -> Result<GeneratorConfig, ConfigurationError> {
        let line_ending = if self.windows_eol {
            LineEnding::Windows
        } else {
            LineEnding::Unix
        };
        GeneratorConfig::builder(
            utf8_path(self.output_file.clone())?,
            self.base_dn.clone(),
            self.size,
        )
        .seed(self.seed)
        .max_entries_per_file(self.max_entries_per_file)
        .numbered_names(self.person_ids)
        .line_ending(line_ending)
        .build()
    }

    /// Returns the word-list directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NonUtf8Path`] if the path is not UTF-8.
    pub fn data_dir(&self) -> Result<Utf8PathBuf, ConfigurationError> {
        utf8_path(self.data_dir.clone())
    }
}

/// Validates the arguments, loads the word lists and writes every file.
///
/// The configuration is validated before any word list is read or file
/// created.
///
/// # Errors
///
/// Returns [`GeneratorError`] for invalid settings, unreadable word lists,
/// or output failures.
pub fn execute(cli: &Cli) -> Result<RunSummary, GeneratorError> {
    let config = cli.to_config()?;
    let data_dir = cli.data_dir()?;
    let pools = WordPools::load(&data_dir)?;
    let mut sink = FileSink::create(config.output_prefix(), config.line_ending())?;
    generate(&config, &pools, &mut sink)
}

/// Formats the one-line report printed after a successful run.
///
/// # Example
///
/// ```
/// use ldif_generator::RunSummary;
/// use ldif_generator::cli::success_message;
///
/// let summary = RunSummary {
///     seed: Some(2),
///     population_size: 200,
///     duplicates: 3,
///     files: Vec::new(),
/// };
///
/// assert_eq!(
///     success_message(&summary),
///     "Generated 200 entries in 0 files (3 duplicates discarded, seed 2)"
/// );
/// ```
#[must_use]
pub fn success_message(summary: &RunSummary) -> String {
    let seed = summary
        .seed
        .map_or_else(|| "caller-supplied generator".to_owned(), |seed| format!("seed {seed}"));
    format!(
        "Generated {} entries in {} files ({} duplicates discarded, {seed})",
        summary.population_size,
        summary.files.len(),
        summary.duplicates,
    )
}

fn utf8_path(path: PathBuf) -> Result<Utf8PathBuf, ConfigurationError> {
    Utf8PathBuf::from_path_buf(path).map_err(|original| ConfigurationError::NonUtf8Path {
        value: original.to_string_lossy().into_owned(),
    })
}

#[cfg(test)]
mod tests;
