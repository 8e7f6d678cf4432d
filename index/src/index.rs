use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::warn;
use withdrawer_types::record::WithdrawalRecord;
use withdrawer_types::{Address, Hash};

use crate::{IndexError, NotFound};

/// Immutable snapshot of every known withdrawal, keyed by withdrawal hash.
///
/// Records keep the order of the source document.
#[derive(Debug, Default)]
pub struct WithdrawalIndex {
    records: Vec<WithdrawalRecord>,
    by_hash: HashMap<Hash, usize>,
}

impl WithdrawalIndex {
    /// Parses a JSON object mapping withdrawal hash to record.
    ///
    /// Entries with a malformed hash or a non-object record are skipped.
    pub fn from_json(bytes: &[u8]) -> Result<Self, IndexError> {
        let document: Map<String, Value> = serde_json::from_slice(bytes)?;
        let mut index = Self {
            records: Vec::with_capacity(document.len()),
            by_hash: HashMap::with_capacity(document.len()),
        };

        for (key, value) in document {
            let Ok(hash) = key.parse::<Hash>() else {
                warn!(%key, "Skipping withdrawal with malformed hash");
                continue;
            };
            let Value::Object(fields) = value else {
                warn!(%hash, "Skipping withdrawal that is not a JSON object");
                continue;
            };
            index.insert(WithdrawalRecord::new(hash, fields));
        }
        Ok(index)
    }

    pub async fn load(path: &Path) -> Result<Self, IndexError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| IndexError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&bytes)
    }

    fn insert(&mut self, record: WithdrawalRecord) {
        match self.by_hash.get(&record.hash) {
            Some(&position) => self.records[position] = record,
            None => {
                self.by_hash.insert(record.hash, self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn lookup(&self, hash: &Hash) -> Result<&WithdrawalRecord, NotFound> {
        self.by_hash
            .get(hash)
            .map(|&position| &self.records[position])
            .ok_or_else(|| NotFound(hash.to_string()))
    }

    /// First `limit` records in document order.
    pub fn list(&self, limit: usize) -> &[WithdrawalRecord] {
        &self.records[..limit.min(self.records.len())]
    }

    /// Resolves a withdrawal hash or an address to matching records, newest first.
    ///
    /// A known hash short-circuits to that single record. Otherwise every record whose
    /// `from`, `to`, `sender` or `target` equals the query is returned, compared as
    /// addresses when both sides parse and as lowercase text otherwise. Equal timestamps
    /// keep document order.
    pub fn search(&self, query: &str) -> Result<Vec<&WithdrawalRecord>, NotFound> {
        let query = query.trim();
        let not_found = || NotFound(query.to_string());

        if let Some(record) = query
            .parse::<Hash>()
            .ok()
            .and_then(|hash| self.lookup(&hash).ok())
        {
            return Ok(vec![record]);
        }

        if query.is_empty() {
            return Err(not_found());
        }
        let address = query.parse::<Address>().ok();
        let mut matches: Vec<_> = self
            .records
            .iter()
            .filter(|record| {
                address.is_some_and(|address| record.parties.contains(&address))
                    || record.parties.contains_text(query)
            })
            .collect();
        if matches.is_empty() {
            return Err(not_found());
        }

        matches.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(matches)
    }
}
