//! Progress/side-channel observation for extraction runs.
//!
//! Observers receive the informational events of a run (sources loaded,
//! invoices skipped, final shape) and load failures. This channel is purely
//! observational: suppressing it (no observer configured) must not change
//! the produced table.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ExtractError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExtractSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (a source deserialized incorrectly).
    Error,
    /// Critical error (I/O and other infrastructure failures).
    Critical,
}

/// Observer interface for extraction progress and load failures.
///
/// All methods default to no-ops, so implementors pick the events they care
/// about.
pub trait ExtractObserver: Send + Sync {
    /// Invoice batch loaded; `count` records.
    fn on_invoices_loaded(&self, _path: &Path, _count: usize) {}

    /// Expired-id list loaded; `count` distinct ids.
    fn on_expired_loaded(&self, _path: &Path, _count: usize) {}

    /// An invoice with a usable id and timestamp is being processed.
    fn on_invoice(&self, _invoice_id: i64) {}

    /// A whole invoice was dropped (unusable id or timestamp).
    fn on_invoice_skipped(&self, _raw: &serde_json::Value) {}

    /// A single line item was dropped (unusable item id); siblings survive.
    fn on_item_skipped(&self, _invoice_id: i64, _raw: &serde_json::Value) {}

    /// The run produced a table of the given `(rows, columns)` shape.
    fn on_complete(&self, _shape: (usize, usize)) {}

    /// A source could not be loaded; the run aborts.
    fn on_load_failure(&self, _severity: ExtractSeverity, _error: &ExtractError) {}

    /// A load failure met the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_load_failure`].
    fn on_alert(&self, severity: ExtractSeverity, error: &ExtractError) {
        self.on_load_failure(severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ExtractObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ExtractObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ExtractObserver for CompositeObserver {
    fn on_invoices_loaded(&self, path: &Path, count: usize) {
        for o in &self.observers {
            o.on_invoices_loaded(path, count);
        }
    }

    fn on_expired_loaded(&self, path: &Path, count: usize) {
        for o in &self.observers {
            o.on_expired_loaded(path, count);
        }
    }

    fn on_invoice(&self, invoice_id: i64) {
        for o in &self.observers {
            o.on_invoice(invoice_id);
        }
    }

    fn on_invoice_skipped(&self, raw: &serde_json::Value) {
        for o in &self.observers {
            o.on_invoice_skipped(raw);
        }
    }

    fn on_item_skipped(&self, invoice_id: i64, raw: &serde_json::Value) {
        for o in &self.observers {
            o.on_item_skipped(invoice_id, raw);
        }
    }

    fn on_complete(&self, shape: (usize, usize)) {
        for o in &self.observers {
            o.on_complete(shape);
        }
    }

    fn on_load_failure(&self, severity: ExtractSeverity, error: &ExtractError) {
        for o in &self.observers {
            o.on_load_failure(severity, error);
        }
    }

    fn on_alert(&self, severity: ExtractSeverity, error: &ExtractError) {
        for o in &self.observers {
            o.on_alert(severity, error);
        }
    }
}

/// Logs extraction events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ExtractObserver for StdErrObserver {
    fn on_invoices_loaded(&self, path: &Path, count: usize) {
        eprintln!("[extract] invoices loaded path={} count={}", path.display(), count);
    }

    fn on_expired_loaded(&self, path: &Path, count: usize) {
        eprintln!("[extract] expired ids loaded path={} count={}", path.display(), count);
    }

    fn on_invoice(&self, invoice_id: i64) {
        eprintln!("[extract] processing invoice id={invoice_id}");
    }

    fn on_invoice_skipped(&self, raw: &serde_json::Value) {
        eprintln!("[extract] skipping invalid invoice: {raw}");
    }

    fn on_item_skipped(&self, invoice_id: i64, raw: &serde_json::Value) {
        eprintln!("[extract] skipping invalid item invoice_id={invoice_id}: {raw}");
    }

    fn on_complete(&self, shape: (usize, usize)) {
        eprintln!("[extract][ok] shape={}x{}", shape.0, shape.1);
    }

    fn on_load_failure(&self, severity: ExtractSeverity, error: &ExtractError) {
        eprintln!("[extract][{severity:?}] err={error}");
    }

    fn on_alert(&self, severity: ExtractSeverity, error: &ExtractError) {
        eprintln!("[ALERT][extract][{severity:?}] err={error}");
    }
}

/// Appends extraction events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ExtractObserver for FileObserver {
    fn on_invoices_loaded(&self, path: &Path, count: usize) {
        self.append_line(&format!(
            "{} invoices_loaded path={} count={}",
            unix_ts(),
            path.display(),
            count
        ));
    }

    fn on_expired_loaded(&self, path: &Path, count: usize) {
        self.append_line(&format!(
            "{} expired_loaded path={} count={}",
            unix_ts(),
            path.display(),
            count
        ));
    }

    fn on_invoice_skipped(&self, raw: &serde_json::Value) {
        self.append_line(&format!("{} invoice_skipped raw={}", unix_ts(), raw));
    }

    fn on_item_skipped(&self, invoice_id: i64, raw: &serde_json::Value) {
        self.append_line(&format!(
            "{} item_skipped invoice_id={} raw={}",
            unix_ts(),
            invoice_id,
            raw
        ));
    }

    fn on_complete(&self, shape: (usize, usize)) {
        self.append_line(&format!("{} ok shape={}x{}", unix_ts(), shape.0, shape.1));
    }

    fn on_load_failure(&self, severity: ExtractSeverity, error: &ExtractError) {
        self.append_line(&format!("{} fail severity={:?} err={}", unix_ts(), severity, error));
    }

    fn on_alert(&self, severity: ExtractSeverity, error: &ExtractError) {
        self.append_line(&format!("{} ALERT severity={:?} err={}", unix_ts(), severity, error));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
