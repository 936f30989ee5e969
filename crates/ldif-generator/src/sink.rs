//! Line-oriented output sinks.
//!
//! The emitter writes one line at a time into a [`LineSink`], which appends
//! the configured [`LineEnding`] and routes lines into the current
//! [`OutputFile`]. [`FileSink`] writes real files next to an output prefix;
//! [`MemorySink`] keeps everything in memory for tests and embedding.

use std::fmt;
use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, File};
use tracing::debug;

use crate::error::OutputError;

/// Line terminator appended to every written line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// `"\n"`.
    #[default]
    Unix,
    /// `"\r\n"`.
    Windows,
}

impl LineEnding {
    /// Returns the terminator characters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unix => "\n",
            Self::Windows => "\r\n",
        }
    }
}

/// Role of one output file; rendered as `{prefix}_{suffix}.ldif`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFile {
    /// Add records, chunk `n` (0-based).
    Chunk(usize),
    /// Organizational-unit add records.
    OrganizationalUnits,
    /// Title additions for `inetOrgPerson` entries.
    TitleModifications,
    /// Description replacements for every entry.
    DescriptionModifications,
    /// Deletions, entries then organizational units.
    Deletions,
}

impl OutputFile {
    /// Returns the file name for output prefix stem `stem`.
    ///
    /// # Example
    ///
    /// ```
    /// use ldif_generator::OutputFile;
    ///
    /// assert_eq!(OutputFile::Chunk(2).file_name("people"), "people_2.ldif");
    /// assert_eq!(
    ///     OutputFile::TitleModifications.file_name("people"),
    ///     "people_mod_inetOrgPerson.ldif"
    /// );
    /// ```
    #[must_use]
    pub fn file_name(self, stem: &str) -> String {
        format!("{stem}_{self}.ldif")
    }
}

impl fmt::Display for OutputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chunk(index) => write!(f, "{index}"),
            Self::OrganizationalUnits => f.write_str("ou"),
            Self::TitleModifications => f.write_str("mod_inetOrgPerson"),
            Self::DescriptionModifications => f.write_str("mod_all"),
            Self::Deletions => f.write_str("del"),
        }
    }
}

/// Destination for generated lines.
pub trait LineSink {
    /// Closes any open file and starts `file`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if the previous file cannot be finished or the
    /// new one cannot be created.
    fn start_file(&mut self, file: OutputFile) -> Result<(), OutputError>;

    /// Writes `line` followed by the configured line ending.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::NoOpenFile`] before the first
    /// [`LineSink::start_file`], or a write error.
    fn write_line(&mut self, line: &str) -> Result<(), OutputError>;

    /// Flushes and closes the current file, if any.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Write`] if buffered data cannot be flushed.
    fn finish_file(&mut self) -> Result<(), OutputError>;
}

/// Writes output files beside an output prefix such as `out/people`.
///
/// Files are created, or truncated, in the prefix's parent directory,
/// which must already exist. A failed run leaves partially written files in
/// place.
#[derive(Debug)]
pub struct FileSink {
    dir: Dir,
    dir_path: Utf8PathBuf,
    stem: String,
    line_ending: LineEnding,
    current: Option<OpenFile>,
}

#[derive(Debug)]
struct OpenFile {
    path: Utf8PathBuf,
    writer: BufWriter<File>,
}

impl FileSink {
    /// Opens the parent directory of `prefix` for writing.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Create`] if `prefix` has no file name or its
    /// parent directory cannot be opened.
    pub fn create(prefix: &Utf8Path, line_ending: LineEnding) -> Result<Self, OutputError> {
        let Some(stem) = prefix.file_name() else {
            return Err(OutputError::Create {
                path: prefix.to_path_buf(),
                message: "output prefix must name a file".to_owned(),
            });
        };
        let dir_path = prefix
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."))
            .to_path_buf();
        let dir = Dir::open_ambient_dir(&dir_path, ambient_authority()).map_err(|err| {
            OutputError::Create {
                path: dir_path.clone(),
                message: err.to_string(),
            }
        })?;
        Ok(Self {
            dir,
            dir_path,
            stem: stem.to_owned(),
            line_ending,
            current: None,
        })
    }

    /// Returns the path `file` is written to.
    #[must_use]
    pub fn path_of(&self, file: OutputFile) -> Utf8PathBuf {
        self.dir_path.join(file.file_name(&self.stem))
    }
}

impl LineSink for FileSink {
    fn start_file(&mut self, file: OutputFile) -> Result<(), OutputError> {
        self.finish_file()?;
        let name = file.file_name(&self.stem);
        let path = self.path_of(file);
        let handle = self.dir.create(&name).map_err(|err| OutputError::Create {
            path: path.clone(),
            message: err.to_string(),
        })?;
        debug!(path = %path, "opened output file");
        self.current = Some(OpenFile {
            path,
            writer: BufWriter::new(handle),
        });
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<(), OutputError> {
        let ending = self.line_ending.as_str();
        let open = self.current.as_mut().ok_or(OutputError::NoOpenFile)?;
        open.writer
            .write_all(line.as_bytes())
            .and_then(|()| open.writer.write_all(ending.as_bytes()))
            .map_err(|err| OutputError::Write {
                path: open.path.clone(),
                message: err.to_string(),
            })
    }

    fn finish_file(&mut self) -> Result<(), OutputError> {
        let Some(mut open) = self.current.take() else {
            return Ok(());
        };
        open.writer.flush().map_err(|err| OutputError::Write {
            path: open.path.clone(),
            message: err.to_string(),
        })
    }
}

/// One file captured by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    /// Role of the file.
    pub file: OutputFile,
    /// Text written, line endings included.
    pub contents: String,
}

/// Keeps output files in memory, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    line_ending: LineEnding,
    files: Vec<MemoryFile>,
    open: bool,
}

impl MemorySink {
    /// Creates an empty sink using `line_ending`.
    #[must_use]
    pub const fn new(line_ending: LineEnding) -> Self {
        Self {
            line_ending,
            files: Vec::new(),
            open: false,
        }
    }

    /// Returns every captured file in creation order.
    #[must_use]
    pub fn files(&self) -> &[MemoryFile] {
        &self.files
    }

    /// Returns the contents of the most recent file with role `file`.
    #[must_use]
    pub fn contents(&self, file: OutputFile) -> Option<&str> {
        self.files
            .iter()
            .rev()
            .find(|captured| captured.file == file)
            .map(|captured| captured.contents.as_str())
    }
}

impl LineSink for MemorySink {
    fn start_file(&mut self, file: OutputFile) -> Result<(), OutputError> {
        self.files.push(MemoryFile {
            file,
            contents: String::new(),
        });
        self.open = true;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<(), OutputError> {
        let current = self
            .files
            .last_mut()
            .filter(|_| self.open)
            .ok_or(OutputError::NoOpenFile)?;
        current.contents.push_str(line);
        current.contents.push_str(self.line_ending.as_str());
        Ok(())
    }

    fn finish_file(&mut self) -> Result<(), OutputError> {
        self.open = false;
        Ok(())
    }
}
