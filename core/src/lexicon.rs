//! Scheme dictionary for scripa-core
//!
//! This module provides the in-memory dictionary mapping an ASCII input code
//! to an ordered list of Unicode transcriptions. Dictionaries are built from
//! scheme files, one mapping per line:
//!
//! ```text
//! # comment
//! th     θ
//! qg,qz  ɢ
//! ```
//!
//! The parser is tolerant: a line that does not split into exactly two
//! whitespace-separated tokens is skipped, and stray bytes in a value are
//! dropped by the lenient decoder. Only a file that cannot be read fails a
//! load.
//!
//! Public API:
//! - `Dictionary` - load/lookup/insert API, bincode snapshot helpers
//! - `LoadStats` - per-file parse summary

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::ops::Bound;
use std::path::Path;

use crate::utf8::decode_lenient;

/// Summary of one parsed scheme source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read, including comments and blanks.
    pub lines: usize,
    /// `(key, value)` pairs appended to the dictionary.
    pub entries: usize,
    /// Non-comment lines that did not have exactly two tokens.
    pub skipped: usize,
}

/// In-memory dictionary mapping an input code -> Vec<transcription>.
///
/// Values for a key keep their insertion order across lines and files.
/// A `BTreeMap` keeps keys ordered, which makes prefix scans a range walk and
/// keeps dumps stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dictionary {
    map: BTreeMap<String, Vec<String>>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Load a scheme file, appending its entries.
    ///
    /// Returns `false` only when the file cannot be read; the failure is
    /// reported through `tracing` and the dictionary is left untouched.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match self.try_load(path) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("failed to load scheme file: {e:#}");
                false
            }
        }
    }

    /// Fallible form of [`Dictionary::load`].
    ///
    /// The file is read as raw bytes so that invalid UTF-8 inside a value
    /// reaches the lenient decoder rather than failing the read.
    pub fn try_load<P: AsRef<Path>>(&mut self, path: P) -> anyhow::Result<LoadStats> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("open scheme file {}", path.display()))?;
        let stats = self.load_bytes(&bytes);
        tracing::debug!(
            path = %path.display(),
            lines = stats.lines,
            entries = stats.entries,
            skipped = stats.skipped,
            "parsed scheme file"
        );
        Ok(stats)
    }

    /// Parse scheme text already held in memory.
    pub fn load_str(&mut self, text: &str) -> LoadStats {
        self.load_bytes(text.as_bytes())
    }

    fn load_bytes(&mut self, bytes: &[u8]) -> LoadStats {
        let mut stats = LoadStats::default();
        if bytes.is_empty() {
            return stats;
        }

        let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
        for (lineno, raw) in body.split(|&b| b == b'\n').enumerate() {
            stats.lines += 1;
            let line = raw.strip_suffix(b"\r").unwrap_or(raw);
            let trimmed = line.trim_ascii_start();
            if trimmed.is_empty() || trimmed[0] == b'#' {
                continue;
            }

            let mut tokens = line.split(u8::is_ascii_whitespace).filter(|t| !t.is_empty());
            let (Some(keyspec), Some(value), None) = (tokens.next(), tokens.next(), tokens.next())
            else {
                tracing::trace!(line = lineno + 1, "skipping malformed scheme line");
                stats.skipped += 1;
                continue;
            };

            let value = decode_lenient(value);
            for key in keyspec
                .split(|&b| b == b',')
                .map(<[u8]>::trim_ascii)
                .filter(|k| !k.is_empty())
            {
                // Keys are codes typed on the keyboard; a non-ASCII key can
                // never be reached from the input buffer.
                let Ok(key) = std::str::from_utf8(key) else {
                    continue;
                };
                self.insert(key, value.clone());
                stats.entries += 1;
            }
        }
        stats
    }

    /// Append a transcription for `key`. Empty keys are ignored.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        self.map.entry(key).or_default().push(value.into());
    }

    /// Exact lookup. Returns the values in insertion order, or an empty
    /// vector when the key is absent.
    pub fn lookup(&self, key: &str) -> Vec<String> {
        self.map.get(key).cloned().unwrap_or_default()
    }

    /// Borrowing form of [`Dictionary::lookup`] used on the hot path.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.map.get(key).map(Vec::as_slice)
    }

    /// Union of the values of every key equal to or starting with `prefix`,
    /// deduplicated and sorted.
    pub fn lookup_by_prefix(&self, prefix: &str) -> Vec<String> {
        let mut out = BTreeSet::new();
        let from = (Bound::Included(prefix), Bound::Unbounded);
        for (key, values) in self.map.range::<str, _>(from) {
            if !key.starts_with(prefix) {
                break;
            }
            out.extend(values.iter().cloned());
        }
        out.into_iter().collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Return the number of keys in the dictionary.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Return true if the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop every entry. A reload is `clear` followed by fresh loads.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Save the dictionary to a file using bincode serialization.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("create snapshot {}", path.display()))?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self).context("serialize dictionary snapshot")?;
        Ok(())
    }

    /// Load a dictionary from a bincode file produced by `save_bincode`.
    pub fn load_bincode<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("open snapshot {}", path.display()))?;
        let reader = BufReader::new(file);
        let dict: Self =
            bincode::deserialize_from(reader).context("deserialize dictionary snapshot")?;
        Ok(dict)
    }
}

/// One `key : value value ...` line per key.
impl fmt::Display for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, values) in &self.map {
            write!(f, "{key} :")?;
            for value in values {
                write!(f, " {value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
