//! Dataset quality sweeps
//!
//! Each sweep only counts; nothing is removed or rewritten.

use crate::catalog::{ARTIFACT_EXTENSIONS, EXCLUDE_PATTERNS};
use crate::corpus::CorpusIndex;
use crate::fs::FileSystem;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

fn exclusion_res() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        EXCLUDE_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("valid regex"))
            .collect()
    })
}

/// Whether a corpus path is a generated, compiled, or test-double artifact
pub fn is_excluded(relative: &str, file_name: &str) -> bool {
    exclusion_res()
        .iter()
        .any(|re| re.is_match(relative) || re.is_match(file_name))
}

/// Paths behind each count, relative to the swept root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaDetails {
    pub duplicate_variants: Vec<String>,
    pub empty_artifacts: Vec<String>,
    pub excluded_files: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaReport {
    pub duplicate_variants: usize,
    pub empty_artifacts: usize,
    pub excluded_files: usize,
    /// Advisory only; no phase is skipped because of it
    pub halt_recommended: bool,
    pub details: QaDetails,
}

impl QaReport {
    pub fn from_details(details: QaDetails) -> Self {
        Self {
            duplicate_variants: details.duplicate_variants.len(),
            empty_artifacts: details.empty_artifacts.len(),
            excluded_files: details.excluded_files.len(),
            halt_recommended: !details.empty_artifacts.is_empty(),
            details,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.duplicate_variants == 0 && self.empty_artifacts == 0 && self.excluded_files == 0
    }
}

pub struct QualityAuditor<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> QualityAuditor<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    pub fn audit(&self, index: &CorpusIndex, output_dir: &Path) -> QaReport {
        let report = QaReport::from_details(QaDetails {
            duplicate_variants: self.duplicate_variants(index),
            empty_artifacts: self.empty_artifacts(output_dir),
            excluded_files: self.excluded_files(index),
        });

        if report.halt_recommended {
            warn!(
                empty_artifacts = report.empty_artifacts,
                "Empty artifacts found, downstream consumers should not trust this run"
            );
        }
        info!(
            duplicates = report.duplicate_variants,
            empty = report.empty_artifacts,
            excluded = report.excluded_files,
            "Quality audit complete"
        );
        report
    }

    /// Source files sharing their variant key with at least one other file
    pub fn duplicate_variants(&self, index: &CorpusIndex) -> Vec<String> {
        index
            .variant_groups()
            .into_values()
            .filter(|group| group.len() > 1)
            .flatten()
            .map(|f| f.display_path())
            .collect()
    }

    /// Zero-length artifacts under `output_dir`
    pub fn empty_artifacts(&self, output_dir: &Path) -> Vec<String> {
        self.fs.walk_files(output_dir)
            .into_iter()
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| ARTIFACT_EXTENSIONS.contains(&e))
            })
            .filter(|p| match self.fs.metadata(p) {
                Ok(meta) => meta.is_empty(),
                Err(e) => {
                    debug!(path = %p.display(), "Skipping artifact without metadata: {}", e);
                    false
                }
            })
            .map(|p| {
                p.strip_prefix(output_dir)
                    .unwrap_or(&p)
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    /// Corpus files of any extension that match an exclusion pattern
    pub fn excluded_files(&self, index: &CorpusIndex) -> Vec<String> {
        index
            .files()
            .iter()
            .map(|f| (f.display_path(), f))
            .filter(|(rel, f)| is_excluded(rel, &f.file_name))
            .map(|(rel, _)| rel)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use yare::parameterized;

    #[parameterized(
        topics = { "net/topics.py", "topics.py", true },
        mx_framework = { "mx.core.UIComponent.as", "mx.core.UIComponent.as", true },
        flash_framework = { "lib/flash.events.Event.as", "flash.events.Event.as", true },
        test_double = { "beans/CastleBean_Tests.as", "CastleBean_Tests.as", true },
        bytecode = { "x/y.pyc", "y.pyc", true },
        movie = { "client.swf", "client.swf", true },
        cache_dir = { "__pycache__/a.py", "a.py", true },
        plain_bean = { "beans/CastleBean.as", "CastleBean.as", false },
    )]
    fn test_exclusion_patterns(relative: &str, name: &str, expected: bool) {
        assert_eq!(is_excluded(relative, name), expected);
    }

    #[test]
    fn test_clean_corpus_reports_zero() {
        let fs = MockFileSystem::new();
        fs.add_file("/mock/src/CastleBean.as", "class CastleBean {}");
        fs.add_file("/mock/out/game_data/troops.json", "{}\n");
        let index = CorpusIndex::scan(&fs, Path::new("/mock/src"));

        let report = QualityAuditor::new(&fs).audit(&index, Path::new("/mock/out"));
        assert!(report.is_clean());
        assert!(!report.halt_recommended);
    }

    #[test]
    fn test_counts_each_sweep() {
        let fs = MockFileSystem::new();
        fs.add_file("/mock/src/HeroBean.as", "a");
        fs.add_file("/mock/src/HeroBean_1.as", "b");
        fs.add_file("/mock/src/HeroBean_2.as", "c");
        fs.add_file("/mock/src/TechBean_1.py", "d");
        fs.add_file("/mock/src/nested/flash.display.Sprite.as", "e");
        fs.add_file("/mock/src/__pycache__/protocol.cpython.pyc", "f");
        fs.add_file("/mock/out/game_data/npcs.json", "");
        fs.add_file("/mock/out/documentation/API_REFERENCE.md", "");
        fs.add_file("/mock/out/notes.txt", "");
        let index = CorpusIndex::scan(&fs, Path::new("/mock/src"));

        let report = QualityAuditor::new(&fs).audit(&index, Path::new("/mock/out"));
        assert_eq!(report.duplicate_variants, 3);
        assert_eq!(
            report.details.empty_artifacts,
            vec!["documentation/API_REFERENCE.md", "game_data/npcs.json"]
        );
        assert_eq!(report.excluded_files, 2);
        assert!(report.halt_recommended);
    }

    #[test]
    fn test_missing_output_dir_counts_nothing() {
        let fs = MockFileSystem::new();
        let index = CorpusIndex::scan(&fs, Path::new("/mock/src"));
        assert!(QualityAuditor::new(&fs).empty_artifacts(Path::new("/mock/none")).is_empty());
        assert!(QualityAuditor::new(&fs).audit(&index, Path::new("/mock/none")).is_clean());
    }
}
