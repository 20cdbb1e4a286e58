//! scripa-core
//!
//! Scheme dictionary, segmentation search and candidate ranking for the
//! Scripa phonetic input method. Typed ASCII codes (`th`, `qg`, `T35`) are
//! transcribed into IPA-style Unicode through user-editable scheme files.
//!
//! Public API:
//! - `Dictionary` - Scheme file parsing and code -> transcription lookup
//! - `SchemeLoader` - Loads every scheme file of a directory
//! - `Engine` - Composition buffer, input mode and ranked candidates
//! - `Session` - Key event handling on top of an `Engine`
//! - `CandidateRecord` / `CandidateList` - Ranked and paginated candidates
//! - `Config` - Search limits and session options
use anyhow::Context;
use serde::{Deserialize, Serialize};

pub mod utf8;

pub mod tone;
pub use tone::{is_tone_code, tone_digits};

pub mod lexicon;
pub use lexicon::{Dictionary, LoadStats};

pub mod loader;
pub use loader::SchemeLoader;

pub mod candidate;
pub use candidate::{CandidateList, CandidateRecord};

pub mod input_buffer;
pub use input_buffer::InputBuffer;

pub mod segmentation;
pub use segmentation::Partitions;

pub mod engine;
pub use engine::{Engine, Mode};

pub mod session;
pub use session::{KeyEvent, KeyResult, Session};

/// Engine and session configuration.
///
/// The defaults reproduce the shipped input method; the limits only bound
/// the cost of the search and are not part of the ranking order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Cap on candidates when the buffer was segmented (length >= 2).
    pub segmented_limit: usize,
    /// Cap on candidates for a single-character buffer.
    pub exact_limit: usize,

    // Long-buffer heuristic
    /// Buffers at least this long are ranked head-first instead of
    /// enumerating every partition.
    pub long_buffer_threshold: usize,
    /// Length of the head ranked exhaustively.
    pub head_len: usize,
    /// The head may be stretched over dictionary codes up to this position.
    pub max_boundary: usize,

    // Session
    /// Candidates per page; row digits 1..=page_size select on a page.
    pub page_size: usize,

    // Loader
    /// File extension of scheme files, without the dot.
    pub scheme_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            segmented_limit: 60,
            exact_limit: 100,
            long_buffer_threshold: 10,
            head_len: 9,
            max_boundary: 12,
            page_size: 9,
            scheme_extension: "txt".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content)
            .with_context(|| format!("write config {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
