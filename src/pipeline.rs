//! End-to-end extraction entrypoint.
//!
//! [`extract_from_paths`] loads both sources sequentially, flattens, and
//! returns the ordered table; [`extract_csv_to_path`] additionally writes
//! the CSV artifact. Load failures are classified by severity and reported
//! to the configured observer before the error is returned.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ExtractError, ExtractResult};
use crate::export::write_csv_to_path;
use crate::ingestion::{load_expired_from_path, load_invoices_from_path};
use crate::observe::{ExtractObserver, ExtractSeverity};
use crate::transform::flatten;
use crate::types::InvoiceTable;

/// Options controlling an extraction run.
///
/// Use [`Default`] for common cases (no observer, alert only on Critical).
#[derive(Clone)]
pub struct ExtractionOptions {
    /// Optional observer for progress messages and load failures.
    pub observer: Option<Arc<dyn ExtractObserver>>,
    /// Severity threshold at which `on_alert` is invoked for load failures.
    pub alert_at_or_above: ExtractSeverity,
}

impl fmt::Debug for ExtractionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: ExtractSeverity::Critical,
        }
    }
}

/// Run the full pipeline: load both sources, flatten, sort.
///
/// The two reads happen sequentially; either failing aborts the run with no
/// partial result. The returned table is ordered by
/// `(invoice_id, invoiceitem_id)` ascending.
///
/// # Examples
///
/// ```no_run
/// use invoice_extract::pipeline::{extract_from_paths, ExtractionOptions};
///
/// # fn main() -> Result<(), invoice_extract::ExtractError> {
/// let table = extract_from_paths(
///     "invoices.json",
///     "expired_invoices.txt",
///     &ExtractionOptions::default(),
/// )?;
/// println!("rows={}", table.row_count());
/// # Ok(())
/// # }
/// ```
pub fn extract_from_paths(
    invoice_path: impl AsRef<Path>,
    expired_path: impl AsRef<Path>,
    options: &ExtractionOptions,
) -> ExtractResult<InvoiceTable> {
    let invoice_path = invoice_path.as_ref();
    let expired_path = expired_path.as_ref();
    let obs = options.observer.as_deref();

    let invoices =
        load_invoices_from_path(invoice_path).map_err(|e| report_failure(options, e))?;
    if let Some(obs) = obs {
        obs.on_invoices_loaded(invoice_path, invoices.len());
    }

    let expired =
        load_expired_from_path(expired_path).map_err(|e| report_failure(options, e))?;
    if let Some(obs) = obs {
        obs.on_expired_loaded(expired_path, expired.len());
    }

    let table = flatten(&invoices, &expired, obs);
    if let Some(obs) = obs {
        obs.on_complete(table.shape());
    }
    Ok(table)
}

/// Run the full pipeline and write the CSV artifact to `output_path`.
///
/// No artifact is produced when loading fails.
pub fn extract_csv_to_path(
    invoice_path: impl AsRef<Path>,
    expired_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    options: &ExtractionOptions,
) -> ExtractResult<InvoiceTable> {
    let table = extract_from_paths(invoice_path, expired_path, options)?;
    write_csv_to_path(&table, output_path).map_err(|e| report_failure(options, e))?;
    Ok(table)
}

fn report_failure(options: &ExtractionOptions, error: ExtractError) -> ExtractError {
    if let Some(obs) = options.observer.as_deref() {
        let sev = severity_for_error(&error);
        obs.on_load_failure(sev, &error);
        if sev >= options.alert_at_or_above {
            obs.on_alert(sev, &error);
        }
    }
    error
}

fn severity_for_error(e: &ExtractError) -> ExtractSeverity {
    match e {
        ExtractError::Io(_) => ExtractSeverity::Critical,
        ExtractError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => ExtractSeverity::Critical,
            _ => ExtractSeverity::Error,
        },
        ExtractError::Json(_) => ExtractSeverity::Error,
        ExtractError::InvalidBatch { .. } => ExtractSeverity::Error,
        ExtractError::ExpiredList { .. } => ExtractSeverity::Error,
    }
}

/// Convenience helper for callers that want an owned request object.
///
/// Useful when enqueueing extraction work in a job system.
#[derive(Clone)]
pub struct ExtractionRequest {
    /// Path to the invoice batch.
    pub invoice_path: PathBuf,
    /// Path to the expired-id list.
    pub expired_path: PathBuf,
    /// Options controlling the run.
    pub options: ExtractionOptions,
}

impl fmt::Debug for ExtractionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionRequest")
            .field("invoice_path", &self.invoice_path)
            .field("expired_path", &self.expired_path)
            .field("options", &self.options)
            .finish()
    }
}

impl ExtractionRequest {
    /// Execute the request by calling [`extract_from_paths`].
    pub fn run(&self) -> ExtractResult<InvoiceTable> {
        extract_from_paths(&self.invoice_path, &self.expired_path, &self.options)
    }
}
