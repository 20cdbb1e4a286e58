//! Scheme directory loading.
//!
//! A scheme directory holds one text file per transcription scheme (IPA
//! consonants, vowels, tone letters, user additions...). Every regular file
//! with the scheme extension is loaded into one shared `Dictionary`.

use std::path::{Path, PathBuf};

use crate::lexicon::Dictionary;

/// Loads scheme files from a directory into a dictionary.
#[derive(Debug, Clone)]
pub struct SchemeLoader {
    extension: String,
}

impl Default for SchemeLoader {
    fn default() -> Self {
        Self::new("txt")
    }
}

impl SchemeLoader {
    /// Loader for files ending in `.{extension}`.
    pub fn new<E: Into<String>>(extension: E) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &crate::Config) -> Self {
        Self::new(config.scheme_extension.clone())
    }

    pub fn is_scheme_file(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }

    /// Scheme files directly inside `dir`, sorted by path so repeated keys
    /// append their values in a stable order.
    pub fn scheme_files<P: AsRef<Path>>(&self, dir: P) -> std::io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_file() && self.is_scheme_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Load every scheme file of `dir` into `dict`.
    ///
    /// Returns the number of files loaded. An unreadable directory is
    /// reported and counts as zero files.
    pub fn load_dir<P: AsRef<Path>>(&self, dir: P, dict: &mut Dictionary) -> usize {
        let dir = dir.as_ref();
        let files = match self.scheme_files(dir) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), "cannot read scheme directory: {e}");
                return 0;
            }
        };

        let mut loaded = 0;
        for path in files {
            tracing::info!(path = %path.display(), "loading scheme");
            if dict.load(&path) {
                loaded += 1;
            }
        }
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scripa_{name}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_only_matching_files() {
        let dir = scratch_dir("loader_ext");
        std::fs::write(dir.join("consonants.txt"), "th θ\n").unwrap();
        std::fs::write(dir.join("vowels.txt"), "ae æ\n").unwrap();
        std::fs::write(dir.join("notes.md"), "xx χ\n").unwrap();
        std::fs::create_dir(dir.join("nested.txt")).unwrap();

        let mut dict = Dictionary::new();
        let loaded = SchemeLoader::default().load_dir(&dir, &mut dict);
        assert_eq!(loaded, 2);
        assert_eq!(dict.lookup("th"), vec!["θ".to_string()]);
        assert_eq!(dict.lookup("ae"), vec!["æ".to_string()]);
        assert!(dict.lookup("xx").is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn files_load_in_path_order() {
        let dir = scratch_dir("loader_order");
        std::fs::write(dir.join("b.txt"), "a ɐ\n").unwrap();
        std::fs::write(dir.join("a.txt"), "a ɑ\n").unwrap();

        let mut dict = Dictionary::new();
        SchemeLoader::default().load_dir(&dir, &mut dict);
        assert_eq!(dict.lookup("a"), vec!["ɑ", "ɐ"]);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn custom_extension() {
        let dir = scratch_dir("loader_custom");
        std::fs::write(dir.join("ipa.scheme"), "ng ŋ\n").unwrap();
        std::fs::write(dir.join("ipa.txt"), "sh ʃ\n").unwrap();

        let mut dict = Dictionary::new();
        assert_eq!(SchemeLoader::new("scheme").load_dir(&dir, &mut dict), 1);
        assert!(dict.contains_key("ng"));
        assert!(!dict.contains_key("sh"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_directory_loads_nothing() {
        let mut dict = Dictionary::new();
        let missing = std::env::temp_dir().join("scripa_no_such_scheme_dir");
        assert_eq!(SchemeLoader::default().load_dir(missing, &mut dict), 0);
        assert!(dict.is_empty());
    }
}
