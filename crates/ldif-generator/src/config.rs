//! Validated run configuration.

use std::num::NonZeroUsize;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::ConfigurationError;
use crate::sink::LineEnding;

/// Validated settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    output_prefix: Utf8PathBuf,
    base_dn: String,
    size: NonZeroUsize,
    seed: Option<u64>,
    max_entries_per_file: Option<NonZeroUsize>,
    numbered_names: bool,
    line_ending: LineEnding,
}

impl GeneratorConfig {
    /// Starts a configuration with its three required settings.
    ///
    /// # Example
    ///
    /// ```
    /// use ldif_generator::{GeneratorConfig, LineEnding};
    ///
    /// let config = GeneratorConfig::builder("out/people", "dc=example,dc=com", 100)
    ///     .seed(Some(7))
    ///     .max_entries_per_file(Some(30))
    ///     .line_ending(LineEnding::Windows)
    ///     .build()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.size().get(), 100);
    /// assert_eq!(config.seed(), Some(7));
    /// ```
    #[must_use]
    pub fn builder(
        output_prefix: impl Into<Utf8PathBuf>,
        base_dn: impl Into<String>,
        size: usize,
    ) -> GeneratorConfigBuilder {
        GeneratorConfigBuilder {
            output_prefix: output_prefix.into(),
            base_dn: base_dn.into(),
            size,
            seed: None,
            max_entries_per_file: None,
            numbered_names: false,
            line_ending: LineEnding::default(),
        }
    }

    /// Returns the base path of every output file.
    #[must_use]
    pub fn output_prefix(&self) -> &Utf8Path {
        &self.output_prefix
    }

    /// Returns the suffix of every distinguished name.
    #[must_use]
    pub fn base_dn(&self) -> &str {
        &self.base_dn
    }

    /// Returns the number of entries to generate.
    #[must_use]
    pub const fn size(&self) -> NonZeroUsize {
        self.size
    }

    /// Returns the RNG seed; `None` draws a fresh one per run.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the add-record limit per file; `None` means one file.
    #[must_use]
    pub const fn max_entries_per_file(&self) -> Option<NonZeroUsize> {
        self.max_entries_per_file
    }

    /// Returns whether display names are prefixed with their index.
    #[must_use]
    pub const fn numbered_names(&self) -> bool {
        self.numbered_names
    }

    /// Returns the line terminator of every output file.
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}

/// Builder for [`GeneratorConfig`]; see [`GeneratorConfig::builder`].
#[derive(Debug, Clone)]
pub struct GeneratorConfigBuilder {
    output_prefix: Utf8PathBuf,
    base_dn: String,
    size: usize,
    seed: Option<u64>,
    max_entries_per_file: Option<usize>,
    numbered_names: bool,
    line_ending: LineEnding,
}

impl GeneratorConfigBuilder {
    /// Sets the RNG seed.
    #[must_use]
    pub const fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the add-record limit per file.
    #[must_use]
    pub const fn max_entries_per_file(mut self, max: Option<usize>) -> Self {
        self.max_entries_per_file = max;
        self
    }

    /// Enables index-prefixed display names.
    #[must_use]
    pub const fn numbered_names(mut self, enabled: bool) -> Self {
        self.numbered_names = enabled;
        self
    }

    /// Sets the line terminator.
    #[must_use]
    pub const fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the size or the per-file limit is
    /// zero, the base DN is blank, or the output prefix does not name a file.
    pub fn build(self) -> Result<GeneratorConfig, ConfigurationError> {
        let size = NonZeroUsize::new(self.size)
            .ok_or(ConfigurationError::InvalidSize { value: self.size })?;
        let max_entries_per_file = self
            .max_entries_per_file
            .map(|value| {
                NonZeroUsize::new(value)
                    .ok_or(ConfigurationError::InvalidMaxEntriesPerFile { value })
            })
            .transpose()?;
        if self.base_dn.trim().is_empty() {
            return Err(ConfigurationError::EmptyBaseDn);
        }
        if self.output_prefix.file_name().is_none() {
            return Err(ConfigurationError::EmptyOutputPrefix {
                value: self.output_prefix.into_string(),
            });
        }

        Ok(GeneratorConfig {
            output_prefix: self.output_prefix,
            base_dn: self.base_dn,
            size,
            seed: self.seed,
            max_entries_per_file,
            numbered_names: self.numbered_names,
            line_ending: self.line_ending,
        })
    }
}
