//! Ingestion Worker Integration Tests
//!
//! One-shot cycle behavior: publish on success, no event on extraction
//! failure, and cancellation right before publish.

use termflow::config::Config;
use termflow::extract::ExtractError;
use termflow::handlers::default_mediator;
use termflow::ingest::{run_cycle, CycleOutcome, ShutdownFlag};
use tempfile::TempDir;

const FULL_DOC: &str = r#"<IBTTermSheet xmlns="http://schemas.vontobel.com/dataservice/v1.0">
  <Events><Event><EventType>9097</EventType></Event></Events>
  <Instrument>
    <ProductNameFull>Acme Bond</ProductNameFull>
    <IBTTypeCode>T1</IBTTypeCode>
    <InstrumentIds>
      <InstrumentId><IdSchemeCode>I-</IdSchemeCode><IdValue>CH0000000000</IdValue></InstrumentId>
    </InstrumentIds>
  </Instrument>
</IBTTermSheet>"#;

fn config_in(dir: &TempDir, input_name: &str) -> Config {
    Config::default().with_overrides(
        Some(dir.path().join(input_name)),
        Some(dir.path().join("InstrumentNotification.xml")),
    )
}

#[tokio::test]
async fn test_successful_cycle_publishes_and_writes_output() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("IBT.xml"), FULL_DOC).unwrap();
    let config = config_in(&dir, "IBT.xml");
    let mediator = default_mediator(config.output_path.clone());

    let outcome = run_cycle(&config, &mediator, &ShutdownFlag::new()).await;

    assert!(outcome.published());
    assert!(dir.path().join("InstrumentNotification.xml").exists());
}

#[tokio::test]
async fn test_extraction_failure_publishes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, "absent.xml");
    let mediator = default_mediator(config.output_path.clone());

    let outcome = run_cycle(&config, &mediator, &ShutdownFlag::new()).await;

    match outcome {
        CycleOutcome::ExtractionFailed(ExtractError::FileNotFound(path)) => {
            assert_eq!(path, dir.path().join("absent.xml"));
        }
        other => panic!("expected FileNotFound, got {other:?}"),
    }
    assert!(!dir.path().join("InstrumentNotification.xml").exists());
}

#[tokio::test]
async fn test_incomplete_document_publishes_nothing() {
    let dir = TempDir::new().unwrap();
    let doc = FULL_DOC.replace("I-", "X-");
    std::fs::write(dir.path().join("IBT.xml"), doc).unwrap();
    let config = config_in(&dir, "IBT.xml");
    let mediator = default_mediator(config.output_path.clone());

    let outcome = run_cycle(&config, &mediator, &ShutdownFlag::new()).await;

    assert!(matches!(
        outcome,
        CycleOutcome::ExtractionFailed(ExtractError::IncompleteFields { .. })
    ));
    assert!(!dir.path().join("InstrumentNotification.xml").exists());
}

#[tokio::test]
async fn test_shutdown_before_publish_skips_fan_out() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("IBT.xml"), FULL_DOC).unwrap();
    let config = config_in(&dir, "IBT.xml");
    let mediator = default_mediator(config.output_path.clone());

    let shutdown = ShutdownFlag::new();
    shutdown.request();
    let outcome = run_cycle(&config, &mediator, &shutdown).await;

    assert!(matches!(outcome, CycleOutcome::Cancelled));
    assert!(!dir.path().join("InstrumentNotification.xml").exists());
}

#[tokio::test]
async fn test_each_cycle_gets_its_own_correlation_id() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("IBT.xml"), FULL_DOC).unwrap();
    let config = config_in(&dir, "IBT.xml");
    let mediator = default_mediator(config.output_path.clone());
    let shutdown = ShutdownFlag::new();

    let first = run_cycle(&config, &mediator, &shutdown).await;
    let second = run_cycle(&config, &mediator, &shutdown).await;

    match (first, second) {
        (
            CycleOutcome::Published { correlation_id: a },
            CycleOutcome::Published { correlation_id: b },
        ) => assert_ne!(a, b),
        other => panic!("expected two published cycles, got {other:?}"),
    }
}
