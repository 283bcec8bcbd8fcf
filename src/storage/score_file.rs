//! The scores file: a pretty-printed JSON document holding every match.
//!
//! Older files carry records without an `id`. Those get a deterministic id
//! derived from their content and position, which is written back the first
//! time the file is rewritten so it stays stable afterwards.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};
use crate::calculate::validate_new_match;
use crate::models::{MatchError, MatchId, MatchRecord, NewMatch, RawMatchRecord, Roster};

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    matches: Vec<RawMatchRecord>,
}

/// Append/delete access to the match log.
#[derive(Debug, Clone)]
pub struct MatchStore {
    path: PathBuf,
    strict: bool,
}

impl MatchStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            strict: false,
        }
    }

    pub fn for_config(config: &StorageConfig) -> Self {
        Self::new(config.scores_path()).with_strict(config.strict)
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the records as stored, with missing ids filled in.
    pub fn read_raw(&self) -> Result<Vec<RawMatchRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let doc: ScoreFile = serde_json::from_reader(BufReader::new(file))?;
        let mut records = doc.matches;
        assign_missing_ids(&mut records);

        debug!("Read {} records from {:?}", records.len(), self.path);
        Ok(records)
    }

    /// Load all valid matches in stored order.
    ///
    /// Malformed records are skipped with a warning, or abort the load in
    /// strict mode.
    pub fn load(&self) -> Result<Vec<MatchRecord>, StorageError> {
        let mut matches = Vec::new();

        for (index, raw) in self.read_raw()?.into_iter().enumerate() {
            match MatchRecord::try_from(raw) {
                Ok(m) => matches.push(m),
                Err(source) if self.strict => {
                    return Err(StorageError::Malformed { index, source });
                }
                Err(e) => {
                    warn!("Skipping record {} in {:?}: {}", index, self.path, e);
                }
            }
        }

        Ok(matches)
    }

    /// Validate and record a new match.
    ///
    /// The match gets a fresh id, and `today` unless it names its own date.
    pub fn append(
        &self,
        new_match: NewMatch,
        roster: &Roster,
        today: NaiveDate,
    ) -> Result<MatchRecord, StorageError> {
        validate_new_match(&new_match, roster)?;

        let to_score = |s: i64| {
            u32::try_from(s).map_err(|_| MatchError::InvalidScore("score out of range".to_string()))
        };
        let score_a = to_score(new_match.score1)?;
        let score_b = to_score(new_match.score2)?;

        let record = MatchRecord::new(
            MatchId::fresh(),
            new_match.p1,
            new_match.p2,
            score_a,
            score_b,
            new_match.date.unwrap_or(today),
        );

        let mut records = self.read_raw()?;
        records.push(RawMatchRecord::from(&record));
        self.write_raw(&records)?;

        info!(
            "Recorded match {}: {} {}-{} {}",
            record.id, record.player_a, record.score_a, record.score_b, record.player_b
        );
        Ok(record)
    }

    /// Remove the match with the given id.
    pub fn delete(&self, id: &MatchId) -> Result<RawMatchRecord, StorageError> {
        let mut records = self.read_raw()?;
        let position = records
            .iter()
            .position(|r| r.id.as_deref() == Some(id.as_str()))
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;

        let removed = records.remove(position);
        self.write_raw(&records)?;

        info!("Deleted match {} from {:?}", id, self.path);
        Ok(removed)
    }

    /// Replace the whole file with the given matches.
    pub fn write_all(&self, matches: &[MatchRecord]) -> Result<usize, StorageError> {
        let records: Vec<RawMatchRecord> = matches.iter().map(RawMatchRecord::from).collect();
        self.write_raw(&records)
    }

    /// Directory holding the scores file, created if needed.
    fn ensure_dir(&self) -> Result<&Path, StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        Ok(dir)
    }

    /// Write the document to a sibling temp file, then rename it over the
    /// scores file. Readers see either the old log or the new one.
    fn write_raw(&self, records: &[RawMatchRecord]) -> Result<usize, StorageError> {
        let dir = self.ensure_dir()?;

        let doc = ScoreFile {
            matches: records.to_vec(),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(&mut temp);
            serde_json::to_writer_pretty(&mut writer, &doc)?;
            writeln!(writer)?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        debug!("Wrote {} records to {:?}", records.len(), self.path);
        Ok(records.len())
    }
}

fn assign_missing_ids(records: &mut [RawMatchRecord]) {
    for (index, record) in records.iter_mut().enumerate() {
        if record.id.is_none() {
            let mut fields = record.fingerprint();
            fields.push(index.to_string());
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            record.id = Some(MatchId::derive(&fields).as_str().to_string());
        }
    }
}
