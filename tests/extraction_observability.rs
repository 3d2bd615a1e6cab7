use std::path::Path;
use std::sync::{Arc, Mutex};

use invoice_extract::ExtractError;
use invoice_extract::observe::{ExtractObserver, ExtractSeverity};
use invoice_extract::pipeline::{ExtractionOptions, extract_from_paths};

#[derive(Default)]
struct RecordingObserver {
    invoices_loaded: Mutex<Vec<usize>>,
    expired_loaded: Mutex<Vec<usize>>,
    processed: Mutex<Vec<i64>>,
    invoice_skips: Mutex<Vec<serde_json::Value>>,
    item_skips: Mutex<Vec<i64>>,
    shapes: Mutex<Vec<(usize, usize)>>,
    failures: Mutex<Vec<ExtractSeverity>>,
    alerts: Mutex<Vec<ExtractSeverity>>,
}

impl ExtractObserver for RecordingObserver {
    fn on_invoices_loaded(&self, _path: &Path, count: usize) {
        self.invoices_loaded.lock().unwrap().push(count);
    }

    fn on_expired_loaded(&self, _path: &Path, count: usize) {
        self.expired_loaded.lock().unwrap().push(count);
    }

    fn on_invoice(&self, invoice_id: i64) {
        self.processed.lock().unwrap().push(invoice_id);
    }

    fn on_invoice_skipped(&self, raw: &serde_json::Value) {
        self.invoice_skips.lock().unwrap().push(raw.clone());
    }

    fn on_item_skipped(&self, invoice_id: i64, _raw: &serde_json::Value) {
        self.item_skips.lock().unwrap().push(invoice_id);
    }

    fn on_complete(&self, shape: (usize, usize)) {
        self.shapes.lock().unwrap().push(shape);
    }

    fn on_load_failure(&self, severity: ExtractSeverity, _error: &ExtractError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, severity: ExtractSeverity, _error: &ExtractError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn with_observer(obs: Arc<RecordingObserver>) -> ExtractionOptions {
    ExtractionOptions {
        observer: Some(obs),
        ..Default::default()
    }
}

#[test]
fn observer_sees_loads_skips_and_final_shape() {
    let obs = Arc::new(RecordingObserver::default());
    let table = extract_from_paths(
        "tests/fixtures/invoices.json",
        "tests/fixtures/expired_invoices.txt",
        &with_observer(obs.clone()),
    )
    .unwrap();

    assert_eq!(*obs.invoices_loaded.lock().unwrap(), vec![5]);
    assert_eq!(*obs.expired_loaded.lock().unwrap(), vec![2]);
    // Input order: 12, 7, then 5 (the two invalid invoices are skipped).
    assert_eq!(*obs.processed.lock().unwrap(), vec![12, 7, 5]);
    assert_eq!(obs.invoice_skips.lock().unwrap().len(), 2);
    assert_eq!(*obs.item_skips.lock().unwrap(), vec![5]);
    assert_eq!(*obs.shapes.lock().unwrap(), vec![table.shape()]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn suppressing_the_observer_leaves_the_table_identical() {
    let obs = Arc::new(RecordingObserver::default());
    let observed = extract_from_paths(
        "tests/fixtures/invoices.json",
        "tests/fixtures/expired_invoices.txt",
        &with_observer(obs),
    )
    .unwrap();
    let silent = extract_from_paths(
        "tests/fixtures/invoices.json",
        "tests/fixtures/expired_invoices.txt",
        &ExtractionOptions::default(),
    )
    .unwrap();

    assert_eq!(observed, silent);
}

#[test]
fn missing_file_reports_critical_failure_and_alert() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = extract_from_paths(
        "tests/fixtures/does_not_exist.json",
        "tests/fixtures/expired_invoices.txt",
        &with_observer(obs.clone()),
    )
    .unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![ExtractSeverity::Critical]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![ExtractSeverity::Critical]);
}

#[test]
fn deserialize_failure_is_error_severity_and_below_default_alert_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let bad_expired = dir.path().join("expired.txt");
    std::fs::write(&bad_expired, "1,nope").unwrap();

    let obs = Arc::new(RecordingObserver::default());
    let _ = extract_from_paths(
        "tests/fixtures/invoices.json",
        &bad_expired,
        &with_observer(obs.clone()),
    )
    .unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![ExtractSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());

    // Lowering the threshold makes the same failure alert.
    let obs2 = Arc::new(RecordingObserver::default());
    let opts = ExtractionOptions {
        observer: Some(obs2.clone()),
        alert_at_or_above: ExtractSeverity::Error,
    };
    let _ = extract_from_paths("tests/fixtures/invoices.json", &bad_expired, &opts).unwrap_err();
    assert_eq!(*obs2.alerts.lock().unwrap(), vec![ExtractSeverity::Error]);
}
