//! Corpus index: locates and disambiguates candidate source files.
//!
//! The corpus is scanned once per run in a stable order (see
//! [`crate::fs::FileSystem::walk_files`]). Decompiled dumps often contain near-duplicate
//! copies of a class saved as `Foo_1.as`, `Foo_2.as`; those share a
//! *variant key* with `Foo.as` and at most one of them is canonical.

use crate::catalog;
use crate::error::{ExtractionError, ExtractionResult};
use crate::fs::FileSystem;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

fn duplicate_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+?)_([1-9][0-9]?)$").expect("valid regex"))
}

/// Split a file stem into its base name and an optional duplicate-suffix number.
pub fn split_duplicate_suffix(stem: &str) -> (&str, Option<u32>) {
    match duplicate_suffix_re().captures(stem) {
        Some(caps) => {
            let base = caps.get(1).map(|m| m.as_str()).unwrap_or(stem);
            let n = caps.get(2).and_then(|m| m.as_str().parse().ok());
            (base, n)
        }
        None => (stem, None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute (or fs-rooted) path
    pub path: PathBuf,

    /// Path relative to the corpus root
    pub relative: PathBuf,

    pub file_name: String,
    pub stem: String,
    pub extension: String,

    /// Base name with any duplicate suffix stripped, extension kept: `Foo_2.as` -> `Foo.as`
    pub variant_key: String,

    /// `Some(n)` for a `_n` duplicate marker
    pub duplicate_suffix: Option<u32>,
}

impl SourceFile {
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();

        let (base, duplicate_suffix) = split_duplicate_suffix(&stem);
        let variant_key = if extension.is_empty() {
            base.to_string()
        } else {
            format!("{}.{}", base, extension)
        };

        Self {
            path,
            relative,
            file_name,
            stem,
            extension,
            variant_key,
            duplicate_suffix,
        }
    }

    /// Relative path with forward slashes, as recorded in artifacts
    pub fn display_path(&self) -> String {
        self.relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn is_duplicate_variant(&self) -> bool {
        self.duplicate_suffix.is_some()
    }

    pub fn is_source(&self) -> bool {
        catalog::is_source_extension(&self.extension)
    }

    /// Read the file as text, dropping invalid UTF-8 sequences.
    ///
    /// Fails with [`ExtractionError::Decode`] only when the bytes cannot be read.
    pub fn read_text(&self, fs: &dyn FileSystem) -> ExtractionResult<String> {
        let bytes = fs.read_bytes(&self.path).map_err(|e| ExtractionError::Decode {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        Ok(decode_lossy(&self.path, bytes))
    }
}

/// UTF-8 text with invalid byte sequences removed
pub fn decode_lossy(path: &Path, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!(
                path = %path.display(),
                valid_up_to = e.utf8_error().valid_up_to(),
                "Dropping invalid UTF-8 sequences"
            );
            String::from_utf8_lossy(e.as_bytes())
                .chars()
                .filter(|c| *c != char::REPLACEMENT_CHARACTER)
                .collect()
        }
    }
}

/// Every file of one corpus snapshot, in scan order
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    root: PathBuf,
    files: Vec<SourceFile>,
}

impl CorpusIndex {
    pub fn scan(fs: &dyn FileSystem, root: &Path) -> Self {
        let files: Vec<SourceFile> = fs.walk_files(root)
            .into_iter()
            .map(|p| SourceFile::new(root, p))
            .collect();
        debug!(root = %root.display(), files = files.len(), "Corpus scanned");

        Self {
            root: root.to_path_buf(),
            files,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All files, any extension
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Files of a recognized source family
    pub fn sources(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().filter(|f| f.is_source())
    }

    /// Source files whose stem starts with `prefix`, in scan order
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&SourceFile> {
        self.sources()
            .filter(|f| f.stem.starts_with(prefix))
            .collect()
    }

    /// Candidate files for a symbol
    pub fn candidates(&self, symbol: &str) -> Vec<&SourceFile> {
        self.find_by_prefix(symbol)
    }

    /// Pick the canonical file for `symbol`.
    ///
    /// In order of preference: an exact `Symbol.ext` without a duplicate
    /// marker, then the first unmarked prefix match, then the first candidate
    /// in scan order.
    pub fn resolve(&self, symbol: &str) -> ExtractionResult<&SourceFile> {
        let candidates = self.candidates(symbol);
        pick_canonical(symbol, &candidates)
            .ok_or_else(|| ExtractionError::NotFound(symbol.to_string()))
    }

    /// Recognized source files grouped by variant key
    pub fn variant_groups(&self) -> BTreeMap<&str, Vec<&SourceFile>> {
        let mut groups: BTreeMap<&str, Vec<&SourceFile>> = BTreeMap::new();
        for file in self.sources() {
            groups.entry(file.variant_key.as_str()).or_default().push(file);
        }
        groups
    }
}

pub fn pick_canonical<'a>(symbol: &str, candidates: &[&'a SourceFile]) -> Option<&'a SourceFile> {
    candidates
        .iter()
        .find(|f| !f.is_duplicate_variant() && f.stem == symbol)
        .or_else(|| candidates.iter().find(|f| !f.is_duplicate_variant()))
        .or_else(|| candidates.first())
        .copied()
}
