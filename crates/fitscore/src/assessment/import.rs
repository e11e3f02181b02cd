//! Import of candidate exports (CSV) so the dashboard can be produced offline.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{AnswerSet, CandidateId, CandidateRecord, Rating};
use super::scoring::compute_fit;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read candidate export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid candidate CSV data: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads candidate exports and rescores every row from its answers.
///
/// Stored score columns in the export are ignored. Rows without an `id` get a positional
/// one and rows without `submitted_at` take `imported_at`. Row order is preserved.
pub struct CandidateCsvImporter;

impl CandidateCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        imported_at: DateTime<Utc>,
    ) -> Result<Vec<CandidateRecord>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, imported_at)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        imported_at: DateTime<Utc>,
    ) -> Result<Vec<CandidateRecord>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (index, row) in csv_reader.deserialize::<CandidateRow>().enumerate() {
            let row = row?;
            let answers = row.answers();
            let id = row
                .id
                .map(CandidateId)
                .unwrap_or_else(|| CandidateId(format!("row-{:04}", index + 1)));
            let submitted_at = row
                .submitted_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or(imported_at);

            records.push(CandidateRecord {
                id,
                name: row.name,
                email: row.email,
                submitted_at,
                score: compute_fit(&answers),
                answers,
            });
        }

        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct CandidateRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    name: String,
    email: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    submitted_at: Option<String>,
    p_experience: Rating,
    p_delivery: Rating,
    p_skills: Rating,
    e_availability: Rating,
    e_deadlines: Rating,
    e_pressure: Rating,
    e_proactivity: Rating,
    c_values: Rating,
    c_communication: Rating,
    c_collaboration: Rating,
}

impl CandidateRow {
    fn answers(&self) -> AnswerSet {
        AnswerSet {
            p_experience: self.p_experience,
            p_delivery: self.p_delivery,
            p_skills: self.p_skills,
            e_availability: self.e_availability,
            e_deadlines: self.e_deadlines,
            e_pressure: self.e_pressure,
            e_proactivity: self.e_proactivity,
            c_values: self.c_values,
            c_communication: self.c_communication,
            c_collaboration: self.c_collaboration,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
