use super::ErrorLog;
use crate::core::{Clock, format_timestamp};
use anyhow::Result;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub const USAGE_HEADER: &str = "=== Currency Pair Usage Statistics ===";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsagePairCount {
    pub pair_key: String,
    pub count: u64,
}

pub fn pair_key(from: &str, to: &str) -> String {
    format!("{from}->{to}")
}

/// Counts conversions per ordered currency pair and rewrites the whole
/// statistics file after every change.
pub struct UsageTracker {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    errors: ErrorLog,
    /// Pairs in first-seen order; ties in the file keep this order.
    counts: Vec<UsagePairCount>,
    index: HashMap<String, usize>,
}

impl UsageTracker {
    pub fn new<P: Into<PathBuf>>(path: P, clock: Arc<dyn Clock>, errors: ErrorLog) -> Self {
        Self {
            path: path.into(),
            clock,
            errors,
            counts: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&mut self, from: &str, to: &str) {
        let key = pair_key(from, to);
        let count = self.increment(key.clone());
        debug!(pair = %key, count, "Usage RECORD");

        if let Err(e) = self.save() {
            self.errors
                .record("USER_BEHAVIOR", &format!("Error saving user behavior: {e}"));
        }
    }

    /// Replaces the in-memory counts with the contents of the statistics file.
    ///
    /// Only lines containing both `->` and `:` are read; a count that is not an
    /// integer makes the line be skipped without an error entry.
    pub fn load_all(&mut self) {
        self.counts.clear();
        self.index.clear();

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No usage statistics file");
                return;
            }
            Err(e) => {
                self.errors
                    .record("LOAD_BEHAVIOR", &format!("Error loading user behavior: {e}"));
                return;
            }
        };

        for line in content.lines() {
            if let Some((pair, count)) = parse_usage_line(line) {
                self.set(pair, count);
            }
        }
        debug!(pairs = self.counts.len(), "Usage LOAD");
    }

    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.pair_key.clone(), entry.count))
            .collect()
    }

    /// Pairs by descending count, first-seen order among equal counts.
    pub fn ranked(&self) -> Vec<UsagePairCount> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    fn increment(&mut self, key: String) -> u64 {
        match self.index.get(&key) {
            Some(&i) => {
                self.counts[i].count += 1;
                self.counts[i].count
            }
            None => {
                self.index.insert(key.clone(), self.counts.len());
                self.counts.push(UsagePairCount {
                    pair_key: key,
                    count: 1,
                });
                1
            }
        }
    }

    fn set(&mut self, key: String, count: u64) {
        match self.index.get(&key) {
            Some(&i) => self.counts[i].count = count,
            None => {
                self.index.insert(key.clone(), self.counts.len());
                self.counts.push(UsagePairCount {
                    pair_key: key,
                    count,
                });
            }
        }
    }

    fn save(&self) -> Result<()> {
        let mut out = BufWriter::new(File::create(&self.path)?);
        writeln!(out, "{USAGE_HEADER}")?;
        writeln!(out, "Updated: {}", format_timestamp(&self.clock.now()))?;
        writeln!(out)?;
        for entry in self.ranked() {
            writeln!(out, "{}: {} conversions", entry.pair_key, entry.count)?;
        }
        out.flush()?;
        Ok(())
    }
}

fn parse_usage_line(line: &str) -> Option<(String, u64)> {
    if !(line.contains("->") && line.contains(':')) {
        return None;
    }
    let parts: Vec<&str> = line.split(':').collect();
    let [pair, rest] = parts.as_slice() else {
        return None;
    };
    let count = rest.trim().split(' ').next()?.parse().ok()?;
    Some((pair.trim().to_string(), count))
}
