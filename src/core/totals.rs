//! Totals engine: subtotal, discount, IVA, advance and grand total.
//!
//! Order of operations is fixed: the discount is taken from the pre-tax
//! subtotal, then IVA is computed on the discounted base. All arithmetic
//! uses [`Decimal`] at full precision; round with
//! [`PricingResult::rounded`] only for display.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::error::CotizaError;
use super::policy::PricingOptions;
use super::types::{LineItem, PricingResult, TaxMode};

/// Mexican value-added tax (IVA), in percent.
pub const IVA_RATE: Decimal = dec!(16);

const HUNDRED: Decimal = dec!(100);

/// Line amount as shown on a requisition: `quantity * unit_price`,
/// multiplied by 1.16 when the line carries IVA.
pub fn compute_line_total(item: &LineItem) -> Result<Decimal, CotizaError> {
    let base = checked_product(item.quantity, item.unit_price, "line amount")?;
    if item.has_tax {
        checked_product(base, Decimal::ONE + IVA_RATE / HUNDRED, "line amount with IVA")
    } else {
        Ok(base)
    }
}

/// Sum of `quantity * unit_price` over all items, before any tax.
pub fn compute_subtotal(items: &[LineItem]) -> Result<Decimal, CotizaError> {
    let mut subtotal = Decimal::ZERO;
    for (i, item) in items.iter().enumerate() {
        check_item(item, i)?;
        let amount = checked_product(item.quantity, item.unit_price, "line amount")?;
        subtotal = checked_sum(subtotal, amount, "subtotal")?;
    }
    Ok(subtotal)
}

/// Sum of [`compute_line_total`] over all items (per-line tax applied).
pub fn compute_line_totals_sum(items: &[LineItem]) -> Result<Decimal, CotizaError> {
    let mut sum = Decimal::ZERO;
    for (i, item) in items.iter().enumerate() {
        check_item(item, i)?;
        sum = checked_sum(sum, compute_line_total(item)?, "sum of line totals")?;
    }
    Ok(sum)
}

/// `subtotal * discount_percent / 100`.
pub fn compute_discount(subtotal: Decimal, discount_percent: Decimal) -> Result<Decimal, CotizaError> {
    check_non_negative("subtotal", subtotal)?;
    check_percent("discount_percent", discount_percent)?;
    percent_of(subtotal, discount_percent, "discount")
}

/// `base * tax_rate / 100`. Pass [`IVA_RATE`] for the standard rate.
pub fn compute_tax(base: Decimal, tax_rate: Decimal) -> Result<Decimal, CotizaError> {
    check_non_negative("tax base", base)?;
    check_non_negative("tax_rate", tax_rate)?;
    percent_of(base, tax_rate, "tax")
}

/// `total * advance_percent / 100`.
///
/// An advance larger than the total is reported, never clamped.
pub fn compute_advance(total: Decimal, advance_percent: Decimal) -> Result<Decimal, CotizaError> {
    check_non_negative("total", total)?;
    check_percent("advance_percent", advance_percent)?;
    let advance = percent_of(total, advance_percent, "advance")?;
    if advance > total {
        return Err(CotizaError::invalid(format!(
            "advance {advance} exceeds total {total}"
        )));
    }
    Ok(advance)
}

/// `subtotal - discount_amount + tax_amount`. Fails if the result is negative.
pub fn compute_grand_total(
    subtotal: Decimal,
    discount_amount: Decimal,
    tax_amount: Decimal,
) -> Result<Decimal, CotizaError> {
    check_non_negative("subtotal", subtotal)?;
    check_non_negative("discount_amount", discount_amount)?;
    check_non_negative("tax_amount", tax_amount)?;
    if discount_amount > subtotal {
        return Err(CotizaError::invalid(format!(
            "discount {discount_amount} exceeds subtotal {subtotal}"
        )));
    }
    checked_sum(subtotal - discount_amount, tax_amount, "total")
}

/// Price a list of items under the given options.
///
/// An empty list yields [`PricingResult::zero`] (after the options are checked).
pub fn compute_pricing(
    items: &[LineItem],
    options: &PricingOptions,
) -> Result<PricingResult, CotizaError> {
    check_percent("discount_percent", options.discount_percent)?;
    check_percent("advance_percent", options.advance_percent)?;
    check_non_negative("tax_rate", options.tax_rate)?;
    if options.tax_mode == TaxMode::PerLine && options.tax_rate != IVA_RATE {
        // Line totals and supplier groups are always priced at IVA.
        return Err(CotizaError::invalid(format!(
            "per-line pricing uses the {IVA_RATE}% IVA rate, got {}",
            options.tax_rate
        )));
    }

    if items.is_empty() {
        return Ok(PricingResult::zero());
    }

    let subtotal = compute_subtotal(items)?;
    let discount_amount = compute_discount(subtotal, options.discount_percent)?;

    let tax_amount = match options.tax_mode {
        TaxMode::Document { include_tax: true } => {
            compute_tax(subtotal - discount_amount, options.tax_rate)?
        }
        TaxMode::Document { include_tax: false } => Decimal::ZERO,
        TaxMode::PerLine => {
            // The discount reduces the taxed lines in proportion to their share.
            let mut taxable = Decimal::ZERO;
            for item in items.iter().filter(|item| item.has_tax) {
                let amount = checked_product(item.quantity, item.unit_price, "line amount")?;
                taxable = checked_sum(taxable, amount, "taxable subtotal")?;
            }
            let taxable_discount = compute_discount(taxable, options.discount_percent)?;
            compute_tax(taxable - taxable_discount, options.tax_rate)?
        }
    };

    let total = compute_grand_total(subtotal, discount_amount, tax_amount)?;
    let advance_amount = compute_advance(total, options.advance_percent)?;

    debug!(
        items = items.len(),
        %subtotal,
        %discount_amount,
        %tax_amount,
        %total,
        "priced line items"
    );

    Ok(PricingResult {
        subtotal,
        discount_percent: options.discount_percent,
        discount_amount,
        tax_amount,
        advance_percent: options.advance_percent,
        advance_amount,
        total,
    })
}

/// Checked `value * percent / 100`.
pub(crate) fn percent_of(value: Decimal, percent: Decimal, what: &str) -> Result<Decimal, CotizaError> {
    let product = checked_product(value, percent, what)?;
    product
        .checked_div(HUNDRED)
        .ok_or_else(|| overflow(what))
}

pub(crate) fn checked_product(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, CotizaError> {
    a.checked_mul(b).ok_or_else(|| overflow(what))
}

pub(crate) fn checked_sum(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, CotizaError> {
    a.checked_add(b).ok_or_else(|| overflow(what))
}

fn overflow(what: &str) -> CotizaError {
    CotizaError::invalid(format!("{what} overflows the decimal range"))
}

fn check_item(item: &LineItem, index: usize) -> Result<(), CotizaError> {
    if item.quantity < Decimal::ZERO {
        return Err(CotizaError::invalid(format!(
            "items[{index}].quantity must not be negative, got {}",
            item.quantity
        )));
    }
    if item.unit_price < Decimal::ZERO {
        return Err(CotizaError::invalid(format!(
            "items[{index}].unit_price must not be negative, got {}",
            item.unit_price
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: Decimal) -> Result<(), CotizaError> {
    if value < Decimal::ZERO {
        return Err(CotizaError::invalid(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn check_percent(name: &str, value: Decimal) -> Result<(), CotizaError> {
    if value < Decimal::ZERO || value > HUNDRED {
        return Err(CotizaError::invalid(format!(
            "{name} must be between 0 and 100, got {value}"
        )));
    }
    Ok(())
}
