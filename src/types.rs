//! Core data model for the flattened invoice table.
//!
//! The input side of the pipeline is deliberately untyped (`serde_json::Value`
//! records, any key may be absent or garbage); this module is the typed output
//! side. A [`InvoiceRow`] can only hold well-formed values, so the defensive
//! "re-cast every column" pass of loosely-typed table libraries is enforced
//! here by construction.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Column header of the output artifact, in emission order.
pub const COLUMNS: [&str; 9] = [
    "invoice_id",
    "created_on",
    "invoiceitem_id",
    "invoiceitem_name",
    "type",
    "unit_price",
    "total_price",
    "percentage_in_invoice",
    "is_expired",
];

/// Render format for the `created_on` column.
pub const CREATED_ON_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Categorical line-item type.
///
/// Codes 0..=2 map to the named categories; code 3 and every unmapped or
/// unparsable code collapse to [`ItemType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemType {
    /// Code 0.
    Material,
    /// Code 1.
    Equipment,
    /// Code 2.
    Service,
    /// Code 3, and the fallback for everything else.
    Other,
}

impl ItemType {
    /// Map a raw integer type code onto a category.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Material,
            1 => Self::Equipment,
            2 => Self::Service,
            _ => Self::Other,
        }
    }

    /// Categorical label as emitted in the output artifact.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Material => "Material",
            Self::Equipment => "Equipment",
            Self::Service => "Service",
            Self::Other => "Other",
        }
    }
}

/// One flattened line item: invoice-level fields duplicated across the
/// invoice's items, plus the per-item derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRow {
    /// Parsed invoice id.
    pub invoice_id: i64,
    /// Invoice creation timestamp, shared by every row of the invoice.
    #[serde(serialize_with = "ser_created_on")]
    pub created_on: NaiveDateTime,
    /// Parsed line-item id.
    pub invoiceitem_id: i64,
    /// Item name; empty string when absent.
    pub invoiceitem_name: String,
    /// Categorical item type.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Coerced unit price (garbage -> 0).
    pub unit_price: i64,
    /// `unit_price * quantity` for this item.
    pub total_price: i64,
    /// This item's share of the invoice total, in `[0, 1]`; `0.0` when the
    /// invoice total is zero.
    pub percentage_in_invoice: f64,
    /// Whether the owning invoice id appears in the expired-id set.
    pub is_expired: bool,
}

fn ser_created_on<S>(dt: &NaiveDateTime, ser: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    ser.collect_str(&dt.format(CREATED_ON_FORMAT))
}

/// In-memory flattened table: an ordered collection of [`InvoiceRow`]s under
/// the fixed [`COLUMNS`] header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InvoiceTable {
    /// Row storage, ordered by `(invoice_id, invoiceitem_id)` after
    /// [`InvoiceTable::sort_rows`].
    pub rows: Vec<InvoiceRow>,
}

impl InvoiceTable {
    /// Create a table from rows (order as given; call [`Self::sort_rows`]
    /// to establish the output ordering).
    pub fn new(rows: Vec<InvoiceRow>) -> Self {
        Self { rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// `(rows, columns)` shape of the table.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), COLUMNS.len())
    }

    /// Sort rows by `(invoice_id, invoiceitem_id)` ascending.
    ///
    /// The sort is stable, so rows with equal keys keep their original
    /// relative order.
    pub fn sort_rows(&mut self) {
        self.rows
            .sort_by_key(|r| (r.invoice_id, r.invoiceitem_id));
    }
}
