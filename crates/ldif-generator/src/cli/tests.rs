//! Unit tests for the command line helpers.

use std::sync::atomic::{AtomicUsize, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use rstest::{fixture, rstest};

use super::*;
use crate::error::{OutputError, PoolError};
use crate::pools::PoolKind;
use crate::sink::OutputFile;

const WORD_LISTS: [(PoolKind, &str); 8] = [
    (PoolKind::OrganizationalUnits, "Sales\nResearch\n"),
    (PoolKind::FamilyNames, "Smith\nJones\nMartin\n"),
    (PoolKind::GivenNames, "Ann\nBob\nCarol\n"),
    (
        PoolKind::EntryClasses,
        "person\norganizationalPerson\ninetOrgPerson\n",
    ),
    (PoolKind::MailHosts, "example.com\n"),
    (PoolKind::Positions, "Engineer\nAnalyst\n"),
    (PoolKind::TitleRanks, "Senior\nJunior\n"),
    (PoolKind::Localities, "Paris\nLyon\n"),
];

/// Scratch directory under `target/` removed on drop.
struct Workspace {
    root: Utf8PathBuf,
}

impl Workspace {
    fn data_dir(&self) -> Utf8PathBuf {
        self.root.join("data")
    }

    fn prefix(&self) -> Utf8PathBuf {
        self.root.join("out").join("people")
    }

    fn write_word_list(&self, kind: PoolKind, contents: &str) {
        let dir = open(&self.data_dir());
        dir.write(kind.file_name(), contents).expect("write word list");
    }

    fn read_output(&self, file: OutputFile) -> String {
        let dir = open(&self.root.join("out"));
        dir.read_to_string(file.file_name("people"))
            .expect("read output file")
    }

    fn cli(&self, extra: &[&str]) -> Cli {
        let prefix = self.prefix();
        let data_dir = self.data_dir();
        let mut args = vec![
            "ldif-generator",
            "-o",
            prefix.as_str(),
            "-b",
            "dc=example,dc=com",
            "-d",
            data_dir.as_str(),
        ];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).expect("parse arguments")
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Ok(dir) = Dir::open_ambient_dir(".", ambient_authority()) {
            drop(dir.remove_dir_all(&self.root));
        }
    }
}

fn open(path: &Utf8Path) -> Dir {
    Dir::open_ambient_dir(path, ambient_authority()).expect("open directory")
}

#[fixture]
fn workspace() -> Workspace {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    let root = Utf8PathBuf::from("target")
        .join("ldif-generator-tests")
        .join(format!("cli-{}-{counter}", std::process::id()));
    let cwd = open(Utf8Path::new("."));
    cwd.create_dir_all(root.join("data")).expect("create data dir");
    cwd.create_dir_all(root.join("out")).expect("create output dir");
    let workspace = Workspace { root };
    for (kind, contents) in WORD_LISTS {
        workspace.write_word_list(kind, contents);
    }
    workspace
}

#[test]
fn parses_the_full_flag_set() {
    let cli = Cli::try_parse_from([
        "ldif-generator",
        "-o",
        "out/people",
        "-b",
        "dc=example,dc=com",
        "-s",
        "200",
        "--seed",
        "2",
        "-m",
        "50",
        "-p",
        "-w",
    ])
    .expect("parse arguments");

    let config = cli.to_config().expect("valid configuration");

    assert_eq!(config.output_prefix().as_str(), "out/people");
    assert_eq!(config.size().get(), 200);
    assert_eq!(config.seed(), Some(2));
    assert_eq!(config.max_entries_per_file().map(|max| max.get()), Some(50));
    assert!(config.numbered_names());
    assert_eq!(config.line_ending(), LineEnding::Windows);
    assert_eq!(cli.data_dir().expect("utf-8").as_str(), "data");
}

#[test]
fn accepts_camel_case_flag_spellings() {
    let cli = Cli::try_parse_from([
        "ldif-generator",
        "--outputFile",
        "people",
        "--baseDN",
        "dc=example,dc=com",
        "-s",
        "10",
        "--maxLineNumber",
        "3",
        "--personIds",
        "--UseWindowsEOL",
    ])
    .expect("parse arguments");

    assert_eq!(cli.output_file, PathBuf::from("people"));
    assert_eq!(cli.base_dn, "dc=example,dc=com");
    assert_eq!(cli.max_entries_per_file, Some(3));
    assert!(cli.person_ids);
    assert!(cli.windows_eol);
}

#[rstest]
#[case::missing_size(&["ldif-generator", "-o", "people", "-b", "dc=x"])]
#[case::missing_base_dn(&["ldif-generator", "-o", "people", "-s", "1"])]
#[case::missing_output(&["ldif-generator", "-b", "dc=x", "-s", "1"])]
#[case::negative_size(&["ldif-generator", "-o", "people", "-b", "dc=x", "-s", "-1"])]
#[case::unknown_flag(&["ldif-generator", "-o", "people", "-b", "dc=x", "-s", "1", "--nope"])]
fn rejects_malformed_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn rejects_a_zero_size() {
    let cli = Cli::try_parse_from(["ldif-generator", "-o", "people", "-b", "dc=x", "-s", "0"])
        .expect("parse arguments");

    assert_eq!(
        cli.to_config(),
        Err(ConfigurationError::InvalidSize { value: 0 })
    );
}

#[rstest]
fn execute_writes_every_output_file(workspace: Workspace) {
    let cli = workspace.cli(&["-s", "7", "-m", "3", "--seed", "11"]);

    let summary = execute(&cli).expect("run succeeds");

    assert_eq!(summary.population_size, 7);
    assert_eq!(summary.files.len(), 7);
    let chunk_blocks: Vec<_> = (0..3)
        .map(|index| {
            workspace
                .read_output(OutputFile::Chunk(index))
                .matches("changetype: add")
                .count()
        })
        .collect();
    assert_eq!(chunk_blocks, [3, 3, 1]);
    let ou = workspace.read_output(OutputFile::OrganizationalUnits);
    assert!(ou.starts_with("dn: ou=Sales,dc=example,dc=com\n"));
    let deletions = workspace.read_output(OutputFile::Deletions);
    assert!(deletions.ends_with("ou=Research,dc=example,dc=com\n\n"));
    workspace.read_output(OutputFile::TitleModifications);
    workspace.read_output(OutputFile::DescriptionModifications);
}

#[rstest]
fn execute_reports_missing_word_lists(workspace: Workspace) {
    let missing = workspace.root.join("missing");
    let cli = Cli::try_parse_from([
        "ldif-generator",
        "-o",
        workspace.prefix().as_str(),
        "-b",
        "dc=example,dc=com",
        "-s",
        "1",
        "-d",
        missing.as_str(),
    ])
    .expect("parse arguments");

    let err = execute(&cli).expect_err("expected error");

    assert!(matches!(
        err,
        GeneratorError::Pools {
            source: PoolError::Read { .. }
        }
    ));
}

#[rstest]
fn execute_reports_empty_word_lists(workspace: Workspace) {
    workspace.write_word_list(PoolKind::Localities, "\n\n");
    let cli = workspace.cli(&["-s", "1"]);

    let err = execute(&cli).expect_err("expected error");

    assert_eq!(
        err,
        GeneratorError::Pools {
            source: PoolError::Invalid {
                source: ConfigurationError::EmptyPool {
                    pool: PoolKind::Localities
                }
            }
        }
    );
}

#[rstest]
fn execute_reports_a_missing_output_directory(workspace: Workspace) {
    let prefix = workspace.root.join("absent").join("people");
    let data_dir = workspace.data_dir();
    let cli = Cli::try_parse_from([
        "ldif-generator",
        "-o",
        prefix.as_str(),
        "-b",
        "dc=example,dc=com",
        "-s",
        "1",
        "-d",
        data_dir.as_str(),
    ])
    .expect("parse arguments");

    let err = execute(&cli).expect_err("expected error");

    assert!(matches!(
        err,
        GeneratorError::Output {
            source: OutputError::Create { .. }
        }
    ));
}

#[test]
fn success_message_mentions_caller_supplied_generators() {
    let summary = RunSummary {
        seed: None,
        population_size: 1,
        duplicates: 0,
        files: Vec::new(),
    };

    assert_eq!(
        success_message(&summary),
        "Generated 1 entries in 0 files (0 duplicates discarded, caller-supplied generator)"
    );
}
