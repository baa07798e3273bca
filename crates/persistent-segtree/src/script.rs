//! Line-oriented command interpreter over a `PersistentTree<Sum<i64>>`.
//!
//! One command per line; blank lines and lines starting with `#` are
//! skipped. Arguments are signed integers so that negative indices and
//! versions surface as tree errors rather than parse errors.
//!
//! | Command | Output |
//! |---------|--------|
//! | `build v0 v1 ...` | `version 0` |
//! | `apply <version> <index> <value>` | `version <id>` |
//! | `get <version> <index>` | value |
//! | `range <version> <lo> <hi>` | aggregate of `[lo, hi]` |
//! | `latest` | latest version id |
//! | `lineage <version>` | version ids back to 0 |
//! | `dump <version>` | tree dump |

use std::io::{BufRead, Write};

use thiserror::Error;

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::monoid::Sum;
use crate::snapshot::Snapshot;
use crate::tree::PersistentTree;
use crate::types::VersionId;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: {source}")]
    Tree {
        line: usize,
        #[source]
        source: TreeError,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScriptError {
    pub fn tree_error(&self) -> Option<&TreeError> {
        match self {
            ScriptError::Tree { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Build(Vec<i64>),
    Apply { version: i64, index: i64, value: i64 },
    Get { version: i64, index: i64 },
    Range { version: i64, lo: i64, hi: i64 },
    Latest,
    Lineage { version: i64 },
    Dump { version: i64 },
}

impl Command {
    fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args = words
            .map(|w| w.parse::<i64>().map_err(|_| format!("invalid integer `{w}`")))
            .collect::<Result<Vec<_>, _>>()?;

        if name == "build" {
            if args.is_empty() {
                return Err("build needs at least one value".to_string());
            }
            return Ok(Some(Command::Build(args)));
        }

        let command = match (name, args.as_slice()) {
            ("apply", &[version, index, value]) => Command::Apply {
                version,
                index,
                value,
            },
            ("get", &[version, index]) => Command::Get { version, index },
            ("range", &[version, lo, hi]) => Command::Range { version, lo, hi },
            ("latest", []) => Command::Latest,
            ("lineage", &[version]) => Command::Lineage { version },
            ("dump", &[version]) => Command::Dump { version },
            ("apply" | "get" | "range" | "latest" | "lineage" | "dump", _) => {
                return Err(format!("wrong number of arguments for `{name}`"))
            }
            _ => return Err(format!("unknown command `{name}`")),
        };
        Ok(Some(command))
    }
}

fn version_arg(version: i64) -> Result<VersionId, TreeError> {
    u64::try_from(version)
        .map(VersionId::from_u64)
        .map_err(|_| TreeError::VersionNotFound(version))
}

fn index_arg(index: i64, len: usize) -> Result<usize, TreeError> {
    usize::try_from(index).map_err(|_| TreeError::IndexOutOfRange {
        lo: index,
        hi: index,
        len,
    })
}

fn range_args(lo: i64, hi: i64, len: usize) -> Result<(usize, usize), TreeError> {
    match (usize::try_from(lo), usize::try_from(hi)) {
        (Ok(lo), Ok(hi)) => Ok((lo, hi)),
        _ => Err(TreeError::IndexOutOfRange { lo, hi, len }),
    }
}

/// Interpreter state: one tree, built by the first `build` command.
#[derive(Debug, Default)]
pub struct Script {
    tree: PersistentTree<Sum<i64>>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            tree: PersistentTree::with_config(Sum::new(), config),
        }
    }

    pub fn tree(&self) -> &PersistentTree<Sum<i64>> {
        &self.tree
    }

    /// Executes one line; `line_no` is only used in error reports. Returns
    /// `None` for blank and comment lines.
    pub fn execute_line(&self, line_no: usize, line: &str) -> Result<Option<String>, ScriptError> {
        let command = Command::parse(line).map_err(|message| ScriptError::Parse {
            line: line_no,
            message,
        })?;
        match command {
            None => Ok(None),
            Some(command) => self
                .execute(command)
                .map(Some)
                .map_err(|source| ScriptError::Tree { line: line_no, source }),
        }
    }

    fn execute(&self, command: Command) -> Result<String, TreeError> {
        match command {
            Command::Build(values) => {
                let version = self.tree.build(&values)?;
                Ok(format!("version {version}"))
            }
            Command::Apply {
                version,
                index,
                value,
            } => {
                let snapshot = self.snapshot(version)?;
                let index = index_arg(index, snapshot.len())?;
                let version = self.tree.apply(snapshot.version(), index, value)?;
                Ok(format!("version {version}"))
            }
            Command::Get { version, index } => {
                let snapshot = self.snapshot(version)?;
                let index = index_arg(index, snapshot.len())?;
                Ok(snapshot.get(index)?.to_string())
            }
            Command::Range { version, lo, hi } => {
                let snapshot = self.snapshot(version)?;
                let (lo, hi) = range_args(lo, hi, snapshot.len())?;
                Ok(snapshot.range(lo, hi)?.to_string())
            }
            Command::Latest => Ok(self.tree.latest_version()?.to_string()),
            Command::Lineage { version } => {
                let chain = self.tree.lineage(version_arg(version)?)?;
                let chain: Vec<String> = chain.iter().map(VersionId::to_string).collect();
                Ok(chain.join(" "))
            }
            Command::Dump { version } => Ok(self.snapshot(version)?.dump()),
        }
    }

    fn snapshot(&self, version: i64) -> Result<Snapshot<Sum<i64>>, TreeError> {
        if self.tree.version_count() == 0 {
            return Err(TreeError::NoVersions);
        }
        self.tree.snapshot(version_arg(version)?)
    }

    /// Runs every line of `input`, writing one line per result to `output`.
    /// Stops at the first error. Returns the number of executed commands.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<usize, ScriptError> {
        let mut executed = 0;
        for (i, line) in input.lines().enumerate() {
            let line = line?;
            if let Some(result) = self.execute_line(i + 1, &line)? {
                writeln!(output, "{result}")?;
                executed += 1;
            }
        }
        output.flush()?;
        Ok(executed)
    }

    /// Runs `text` and collects the results.
    pub fn run_str(&self, text: &str) -> Result<Vec<String>, ScriptError> {
        text.lines()
            .enumerate()
            .filter_map(|(i, line)| self.execute_line(i + 1, line).transpose())
            .collect()
    }
}
