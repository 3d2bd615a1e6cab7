//! The flattening core: raw invoice records plus the expired-id set in, one
//! ordered [`InvoiceRow`] per surviving line item out.
//!
//! Per-record recovery policy (see [`crate::coerce`]):
//!
//! - an invoice whose `id` or `created_on` is unusable is dropped whole
//! - an item whose `id` is unusable is dropped alone; siblings survive
//! - every other numeric field coerces garbage to `0`
//! - price arithmetic saturates at the `i64` bounds; once loading succeeds,
//!   no input value can fail the run
//!
//! The invoice total is summed over ALL of the invoice's items, including
//! items that are then excluded for an unusable id. An excluded item with
//! nonzero value therefore lowers the surviving items' percentage shares
//! below a 1.0 sum. This mirrors the upstream system and is covered by a
//! test; do not "fix" it here without changing the contract.

use std::collections::HashSet;

use serde_json::Value as Json;

use crate::coerce::{parse_timestamp, safe_int, safe_int_or_zero};
use crate::observe::ExtractObserver;
use crate::types::{InvoiceRow, InvoiceTable, ItemType};

const NO_ITEMS: &[Json] = &[];

/// Flatten raw invoices into the ordered output table.
///
/// Pure with respect to its inputs; the observer only receives progress
/// notifications and never influences the result. The returned table is
/// sorted by `(invoice_id, invoiceitem_id)` ascending.
pub fn flatten(
    invoices: &[Json],
    expired: &HashSet<i64>,
    observer: Option<&dyn ExtractObserver>,
) -> InvoiceTable {
    let mut rows = Vec::new();

    for invoice in invoices {
        let invoice_id = safe_int(invoice.get("id"));
        let created_on = parse_timestamp(invoice.get("created_on"));
        let (Some(invoice_id), Some(created_on)) = (invoice_id, created_on) else {
            if let Some(obs) = observer {
                obs.on_invoice_skipped(invoice);
            }
            continue;
        };
        if let Some(obs) = observer {
            obs.on_invoice(invoice_id);
        }

        let items = items_of(invoice);
        let invoice_total: i64 = items
            .iter()
            .map(|item| {
                safe_int_or_zero(item.get("unit_price"))
                    .saturating_mul(safe_int_or_zero(item.get("quantity")))
            })
            .fold(0, i64::saturating_add);

        for item in items {
            let Some(invoiceitem_id) = safe_int(item.get("id")) else {
                if let Some(obs) = observer {
                    obs.on_item_skipped(invoice_id, item);
                }
                continue;
            };

            let unit_price = safe_int_or_zero(item.get("unit_price"));
            let quantity = safe_int_or_zero(item.get("quantity"));
            let total_price = unit_price.saturating_mul(quantity);
            let percentage_in_invoice = if invoice_total > 0 {
                total_price as f64 / invoice_total as f64
            } else {
                0.0
            };

            rows.push(InvoiceRow {
                invoice_id,
                created_on,
                invoiceitem_id,
                invoiceitem_name: name_of(item.get("name")),
                item_type: ItemType::from_code(safe_int(item.get("type")).unwrap_or(3)),
                unit_price,
                total_price,
                percentage_in_invoice,
                is_expired: expired.contains(&invoice_id),
            });
        }
    }

    let mut table = InvoiceTable::new(rows);
    table.sort_rows();
    table
}

/// A missing or non-array `items` field means "no items", not a dropped
/// invoice.
fn items_of(invoice: &Json) -> &[Json] {
    invoice
        .get("items")
        .and_then(Json::as_array)
        .map(Vec::as_slice)
        .unwrap_or(NO_ITEMS)
}

/// Item name: strings as-is, numbers and booleans stringified, anything
/// else (absent, null, containers) empty.
fn name_of(value: Option<&Json>) -> String {
    match value {
        Some(Json::String(s)) => s.clone(),
        Some(Json::Number(n)) => n.to_string(),
        Some(Json::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
