//! File-backed JSONL match log.
//!
//! The file format is line-delimited JSON (`.jsonl`):
//! - Line 1: header with `format_version` and the match `config`.
//! - Lines 2+: one record per round, `{round, field}`, where `field` is the
//!   snapshot exactly as the engine ingested it. Rounds count up from 1.
//!
//! Writing flushes each record immediately so the file survives crashes.
//! Loading validates every line and stops at the first bad one.

use std::error::Error;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::error::ConfigurationError;

pub const MATCH_LOG_FORMAT_VERSION: u16 = 1;

/// First line of the JSONL match log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct FileHeader {
    format_version: u16,
    config: MatchConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub round: u64,
    pub field: String,
}

/// A whole match held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLog {
    pub format_version: u16,
    pub config: MatchConfig,
    pub rounds: Vec<RoundRecord>,
}

impl MatchLog {
    pub fn new(config: MatchConfig) -> Self {
        Self { format_version: MATCH_LOG_FORMAT_VERSION, config, rounds: Vec::new() }
    }

    /// Appends `field` as the next round.
    pub fn push_round(&mut self, field: impl Into<String>) {
        let round = self.rounds.len() as u64 + 1;
        self.rounds.push(RoundRecord { round, field: field.into() });
    }
}

/// Appends rounds to a JSONL match log.
pub struct MatchLogWriter {
    writer: BufWriter<File>,
    next_round: u64,
}

impl MatchLogWriter {
    /// Create a new log file, writing the header line immediately.
    pub fn create(path: &Path, config: &MatchConfig) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let header = FileHeader { format_version: MATCH_LOG_FORMAT_VERSION, config: config.clone() };
        let header_json = serde_json::to_string(&header).map_err(io::Error::other)?;
        writeln!(writer, "{header_json}")?;
        writer.flush()?;

        Ok(Self { writer, next_round: 1 })
    }

    /// Resume appending to a log after loading it.
    pub fn resume(path: &Path, log: &MatchLog) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Self { writer: BufWriter::new(file), next_round: log.rounds.len() as u64 + 1 })
    }

    /// Append one round and flush immediately. Returns the round number written.
    pub fn append(&mut self, field: &str) -> io::Result<u64> {
        let record = RoundRecord { round: self.next_round, field: field.trim().to_string() };
        let record_json = serde_json::to_string(&record).map_err(io::Error::other)?;
        writeln!(self.writer, "{record_json}")?;
        self.writer.flush()?;

        self.next_round += 1;
        Ok(record.round)
    }

    /// Writes every round of `log` to a fresh file at `path`.
    pub fn write_all(path: &Path, log: &MatchLog) -> io::Result<()> {
        let mut writer = Self::create(path, &log.config)?;
        for record in &log.rounds {
            writer.append(&record.field)?;
        }
        Ok(())
    }
}

/// Describes why a match log could not be fully loaded.
#[derive(Debug)]
pub enum MatchLogError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// The file contains no lines at all.
    EmptyFile,
    /// The header line could not be parsed as valid JSON.
    InvalidHeader { line: usize, message: String },
    UnsupportedVersion { found: u16 },
    /// The header parsed but its config does not validate.
    InvalidConfig(ConfigurationError),
    /// A round line could not be parsed or is out of sequence.
    InvalidRound { line: usize, message: String },
    /// The file ended without a trailing newline.
    IncompleteLine { line: usize },
}

impl fmt::Display for MatchLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "match log I/O error: {e}"),
            Self::EmptyFile => write!(f, "match log is empty"),
            Self::InvalidHeader { line, message } => {
                write!(f, "invalid match log header at line {line}: {message}")
            }
            Self::UnsupportedVersion { found } => {
                write!(
                    f,
                    "unsupported match log version {found} (expected {MATCH_LOG_FORMAT_VERSION})"
                )
            }
            Self::InvalidConfig(e) => write!(f, "match log config is invalid: {e}"),
            Self::InvalidRound { line, message } => {
                write!(f, "invalid match log round at line {line}: {message}")
            }
            Self::IncompleteLine { line } => write!(f, "incomplete match log line at line {line}"),
        }
    }
}

impl Error for MatchLogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidConfig(e) => Some(e),
            _ => None,
        }
    }
}

/// Load and validate a JSONL match log.
///
/// Stops at the first invalid or incomplete line and returns an error
/// describing the problem.
pub fn load_match_log(path: &Path) -> Result<MatchLog, MatchLogError> {
    let content = fs::read_to_string(path).map_err(MatchLogError::Io)?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(MatchLogError::EmptyFile);
    }
    if !content.ends_with('\n') {
        return Err(MatchLogError::IncompleteLine { line: lines.len() });
    }

    let header: FileHeader = serde_json::from_str(lines[0])
        .map_err(|e| MatchLogError::InvalidHeader { line: 1, message: e.to_string() })?;
    if header.format_version != MATCH_LOG_FORMAT_VERSION {
        return Err(MatchLogError::UnsupportedVersion { found: header.format_version });
    }
    header.config.validate().map_err(MatchLogError::InvalidConfig)?;

    let mut log = MatchLog::new(header.config);
    for (line_index, line) in lines.iter().skip(1).enumerate() {
        let line_number = line_index + 2;

        if line.is_empty() {
            return Err(MatchLogError::InvalidRound {
                line: line_number,
                message: "empty line".to_string(),
            });
        }

        let record: RoundRecord = serde_json::from_str(line).map_err(|e| {
            MatchLogError::InvalidRound { line: line_number, message: e.to_string() }
        })?;

        let expected = log.rounds.len() as u64 + 1;
        if record.round != expected {
            return Err(MatchLogError::InvalidRound {
                line: line_number,
                message: format!("expected round {expected}, found {}", record.round),
            });
        }
        log.rounds.push(record);
    }

    Ok(log)
}
