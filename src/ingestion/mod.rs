//! Loaders for the two external sources.
//!
//! Both loaders are the fatal tier of the pipeline: a source that cannot be
//! opened or deserialized aborts the run with an [`crate::ExtractError`].
//! They do no per-field recovery; tolerating malformed values inside an
//! otherwise loadable batch is the job of [`crate::coerce`] and
//! [`crate::transform`].
//!
//! - [`invoices`]: the invoice batch (JSON array of objects or NDJSON)
//! - [`expired`]: the expired-id list (comma-separated integers)

pub mod expired;
pub mod invoices;

pub use expired::{load_expired_from_path, load_expired_from_str};
pub use invoices::{load_invoices_from_path, load_invoices_from_str};
