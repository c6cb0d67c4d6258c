//! Error handling integration tests
//!
//! Recoverable conditions degrade to empty or fallback output and the run
//! continues. Only artifact write failures fail a phase.

mod support;

use dataforge::config::{ConfigError, DataforgeConfig};
use dataforge::corpus::CorpusIndex;
use dataforge::error::ExtractionError;
use dataforge::extract::{CommandExtractor, FieldExtractor};
use dataforge::fs::{MockFileSystem, RealFileSystem};
use dataforge::pipeline::{Phase, PhaseStatus, PipelineOrchestrator};
use dataforge::search::{MockSearch, SearchBackend, SearchError};
use std::sync::Arc;
use support::Workspace;

#[test]
fn test_stray_latin1_byte_keeps_fields() {
    let ws = Workspace::new();
    let mut bytes = b"// Ch\xe2teau fort\n".to_vec();
    bytes.extend_from_slice(support::CASTLE_BEAN.as_bytes());
    ws.write_bytes("beans/CastleBean.as", &bytes);
    let fs = RealFileSystem::new();
    let index = CorpusIndex::scan(&fs, ws.source.path());

    let registry = FieldExtractor::new(&fs, &index).extract_all(&["CastleBean"]);
    let names: Vec<&str> = registry["CastleBean"].fields.iter().map(|f| f.name.as_str()).collect();
    assert!(names.contains(&"name"));
    assert!(names.contains(&"level"));
}

#[test]
fn test_binary_file_yields_empty_symbol() {
    let ws = Workspace::new();
    ws.write_bytes("beans/CastleBean.as", &[0xff, 0xfe, 0x00, 0x41]);
    let fs = RealFileSystem::new();
    let index = CorpusIndex::scan(&fs, ws.source.path());

    let registry = FieldExtractor::new(&fs, &index).extract_all(&["CastleBean"]);
    assert!(registry["CastleBean"].fields.is_empty());
}

#[test]
fn test_missing_symbol_is_not_found() {
    let ws = Workspace::standard();
    let fs = RealFileSystem::new();
    let index = CorpusIndex::scan(&fs, ws.source.path());

    let err = FieldExtractor::new(&fs, &index).extract("GhostBean").unwrap_err();
    assert!(matches!(err, ExtractionError::NotFound(_)));
}

#[test]
fn test_missing_mapping_file_still_extracts() {
    let ws = Workspace::new();
    ws.write("commands/ArmyCommands.as", support::ARMY_COMMANDS);
    let fs = RealFileSystem::new();
    let index = CorpusIndex::scan(&fs, ws.source.path());

    let registry = CommandExtractor::new(&fs, &index)
        .with_fallback_file(&ws.source.path().join("protocol.py"))
        .extract_all();
    assert_eq!(registry.len(), 2);
    assert!(registry.in_category("quest").next().is_none());
}

#[test]
fn test_search_failure_disables_enrichment_only() {
    let ws = Workspace::standard();
    let search = MockSearch::failing(SearchError::Status(503));
    let summary = PipelineOrchestrator::new(
        Arc::new(RealFileSystem::new()),
        ws.config(),
        SearchBackend::Available(Arc::new(search)),
    )
    .run(&[Phase::Protocols]);

    let report = summary.report(Phase::Protocols).unwrap();
    assert_eq!(report.status, PhaseStatus::Succeeded);
    assert_eq!(report.items, 5);
}

#[test]
fn test_unwritable_output_fails_only_that_phase() {
    let fs = MockFileSystem::new();
    fs.add_file("/corpus/beans/CastleBean.as", support::CASTLE_BEAN);
    fs.deny_writes("/out/documentation");
    let config = DataforgeConfig::with_dirs("/corpus", "/out");

    let summary = PipelineOrchestrator::new(Arc::new(fs), config, SearchBackend::unavailable("test"))
        .run(&[Phase::All]);

    let docs = summary.report(Phase::Docs).unwrap();
    assert_eq!(docs.status, PhaseStatus::Failed);
    assert!(docs.error.is_some());
    assert_eq!(summary.failed(), 1);
    assert!(!summary.all_failed());
}

#[test]
fn test_invalid_search_url_is_rejected() {
    let mut config = DataforgeConfig::with_dirs("/corpus", "/out");
    config.search_url = Some("ftp://search.local".to_string());
    assert!(matches!(config.validate(), Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_missing_source_dir_yields_empty_run() {
    let config = DataforgeConfig::with_dirs("/nonexistent/corpus", "/out");
    let fs = MockFileSystem::new();
    let summary = PipelineOrchestrator::new(Arc::new(fs), config, SearchBackend::unavailable("test"))
        .run(&[Phase::Beans, Phase::Qa]);

    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.report(Phase::Beans).unwrap().items, 0);
}
