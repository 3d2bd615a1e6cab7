//! `invoice-extract` flattens a loosely-typed batch of invoice records (each
//! with nested line items) plus an expired-id list into a strict nine-column
//! table, one row per surviving line item.
//!
//! The primary entrypoint is [`pipeline::extract_from_paths`]; use
//! [`pipeline::extract_csv_to_path`] to also write the CSV artifact.
//!
//! ## What it tolerates
//!
//! Input fields may be absent, wrong-typed, or malformed; the pipeline
//! recovers per field rather than failing the run:
//!
//! - ids with OCR zero confusions (`"1O0"` -> `100`) are normalized
//! - an invoice with an unusable `id` or `created_on` is silently dropped
//!   whole
//! - a line item with an unusable `id` is dropped alone; its siblings
//!   survive
//! - other garbage numeric fields coerce to `0`; an unmapped `type` code
//!   becomes `Other`
//!
//! Only the two source loads (and the artifact write) are fatal: a file that
//! cannot be opened or deserialized aborts the run with an [`ExtractError`]
//! and no output is produced.
//!
//! ## Quick example
//!
//! ```rust
//! use std::collections::HashSet;
//!
//! use invoice_extract::ingestion::load_invoices_from_str;
//! use invoice_extract::transform::flatten;
//! use invoice_extract::types::ItemType;
//!
//! let invoices = load_invoices_from_str(
//!     r#"[{
//!         "id": 7,
//!         "created_on": "2023-01-01",
//!         "items": [
//!             {"id": 1, "type": 0, "unit_price": "1O", "quantity": 2},
//!             {"id": 2, "type": 9, "unit_price": 5, "quantity": 1}
//!         ]
//!     }]"#,
//! )
//! .unwrap();
//! let expired = HashSet::from([7]);
//!
//! let table = flatten(&invoices, &expired, None);
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.rows[0].unit_price, 10);
//! assert_eq!(table.rows[1].item_type, ItemType::Other);
//! assert!(table.rows.iter().all(|r| r.is_expired));
//! ```
//!
//! ## End-to-end from files
//!
//! ```no_run
//! use invoice_extract::pipeline::{extract_csv_to_path, ExtractionOptions};
//!
//! # fn main() -> Result<(), invoice_extract::ExtractError> {
//! let table = extract_csv_to_path(
//!     "invoices.json",
//!     "expired_invoices.txt",
//!     "output.csv",
//!     &ExtractionOptions::default(),
//! )?;
//! println!("shape={:?}", table.shape());
//! # Ok(())
//! # }
//! ```
//!
//! ## Progress messages
//!
//! Loading and skipping are reported through an optional
//! [`observe::ExtractObserver`]; suppressing the observer never changes the
//! produced table.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use invoice_extract::observe::StdErrObserver;
//! use invoice_extract::pipeline::{extract_from_paths, ExtractionOptions};
//!
//! # fn main() -> Result<(), invoice_extract::ExtractError> {
//! let opts = ExtractionOptions {
//!     observer: Some(Arc::new(StdErrObserver)),
//!     ..Default::default()
//! };
//! let _table = extract_from_paths("invoices.json", "expired_invoices.txt", &opts)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: loaders for the invoice batch and the expired-id list
//! - [`coerce`]: defensive scalar coercion (safe integers, permissive
//!   timestamps)
//! - [`transform`]: the flattening core
//! - [`types`]: the typed output table
//! - [`export`]: CSV artifact writer
//! - [`observe`]: progress/side-channel observers
//! - [`pipeline`]: end-to-end entrypoints
//! - [`error`]: error types for the fatal tier

pub mod coerce;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod observe;
pub mod pipeline;
pub mod transform;
pub mod types;

pub use error::{ExtractError, ExtractResult};
