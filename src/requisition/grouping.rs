use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CotizaError, LineItem, checked_sum, compute_line_total, compute_subtotal};

/// Group name for lines without a supplier.
pub const UNASSIGNED_SUPPLIER: &str = "Unassigned";

/// Requisition lines dispatched to one supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierGroup {
    pub supplier_name: String,
    /// Lines in their original order.
    pub items: Vec<LineItem>,
    /// Sum of line totals, IVA included on flagged lines.
    pub group_subtotal: Decimal,
}

/// Partition requisition lines by supplier.
///
/// Groups appear in the order their supplier is first seen. Blank supplier
/// names fall into [`UNASSIGNED_SUPPLIER`]. Names are matched exactly:
/// "Herver" and "herver " form two groups.
pub fn group_by_supplier(items: &[LineItem]) -> Result<Vec<SupplierGroup>, CotizaError> {
    // Rejects negative quantities and prices.
    compute_subtotal(items)?;

    let mut groups: Vec<SupplierGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let name = supplier_key(&item.supplier_name);
        let slot = *index.entry(name).or_insert_with(|| {
            groups.push(SupplierGroup {
                supplier_name: name.to_string(),
                items: Vec::new(),
                group_subtotal: Decimal::ZERO,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.group_subtotal = checked_sum(
            group.group_subtotal,
            compute_line_total(item)?,
            "supplier group subtotal",
        )?;
        group.items.push(item.clone());
    }

    debug!(items = items.len(), groups = groups.len(), "grouped requisition by supplier");
    Ok(groups)
}

/// Look up a group by exact supplier name.
pub fn find_group<'a>(groups: &'a [SupplierGroup], supplier_name: &str) -> Option<&'a SupplierGroup> {
    groups.iter().find(|g| g.supplier_name == supplier_name)
}

fn supplier_key(name: &str) -> &str {
    if name.trim().is_empty() {
        UNASSIGNED_SUPPLIER
    } else {
        name
    }
}
