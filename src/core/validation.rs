use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::policy::is_known_currency_code;
use super::types::*;

/// Validate a quotation before it is issued.
/// Returns all validation errors found (not just the first).
pub fn validate_quotation(quotation: &Quotation) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if quotation.folio.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "folio",
            "folio must not be empty",
            "COT-01",
        ));
    }

    if quotation.client.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "client.name",
            "client name must not be empty",
            "COT-02",
        ));
    }

    if quotation.seller.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "seller",
            "seller must not be empty",
            "COT-03",
        ));
    }

    if quotation.items.is_empty() {
        errors.push(ValidationError::with_rule(
            "items",
            "quotation must have at least one item",
            "COT-04",
        ));
    }

    for (i, item) in quotation.items.iter().enumerate() {
        validate_line_item(item, i, &mut errors);
    }

    if quotation.tax_mode == TaxMode::PerLine {
        errors.push(ValidationError::with_rule(
            "tax_mode",
            "quotations apply IVA at document level",
            "COT-05",
        ));
    }

    if !is_known_currency_code(&quotation.currency_code) {
        errors.push(ValidationError::with_rule(
            "currency_code",
            format!(
                "currency code '{}' is not supported",
                quotation.currency_code
            ),
            "COT-06",
        ));
    }

    if quotation.validity_days == 0 {
        errors.push(ValidationError::with_rule(
            "validity_days",
            "quotation must be valid for at least one day",
            "COT-07",
        ));
    }

    errors.extend(validate_arithmetic(&quotation.pricing));

    errors
}

/// Validate a single line. Errors are appended to `errors` with the field
/// path `items[index]`.
pub fn validate_line_item(item: &LineItem, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("items[{index}]");

    if item.description.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.description"),
            "description must not be empty",
            "LIN-01",
        ));
    }

    if item.quantity <= Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.quantity"),
            format!("quantity must be greater than zero, got {}", item.quantity),
            "LIN-02",
        ));
    }

    if item.unit_price < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.unit_price"),
            format!("unit price must not be negative, got {}", item.unit_price),
            "LIN-03",
        ));
    }
}

/// Check that a pricing result is internally consistent.
///
/// A recomputation that leaves the decimal range counts as a mismatch.
pub fn validate_arithmetic(pricing: &PricingResult) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let expected_discount = percent_of(pricing.subtotal, pricing.discount_percent);
    if expected_discount != Some(pricing.discount_amount) {
        errors.push(ValidationError::with_rule(
            "pricing.discount_amount",
            format!(
                "discount {} does not match {}% of subtotal {}",
                pricing.discount_amount, pricing.discount_percent, pricing.subtotal
            ),
            "ARI-01",
        ));
    }

    let expected_total = pricing
        .subtotal
        .checked_sub(pricing.discount_amount)
        .and_then(|net| net.checked_add(pricing.tax_amount));
    if expected_total != Some(pricing.total) {
        errors.push(ValidationError::with_rule(
            "pricing.total",
            format!(
                "total {} does not match subtotal {} - discount {} + tax {}",
                pricing.total, pricing.subtotal, pricing.discount_amount, pricing.tax_amount
            ),
            "ARI-02",
        ));
    }

    if pricing.total < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            "pricing.total",
            "total must not be negative",
            "ARI-03",
        ));
    }

    if pricing.advance_amount > pricing.total {
        errors.push(ValidationError::with_rule(
            "pricing.advance_amount",
            format!(
                "advance {} exceeds total {}",
                pricing.advance_amount, pricing.total
            ),
            "ARI-04",
        ));
    }

    let expected_advance = percent_of(pricing.total, pricing.advance_percent);
    if expected_advance != Some(pricing.advance_amount) {
        errors.push(ValidationError::with_rule(
            "pricing.advance_amount",
            format!(
                "advance {} does not match {}% of total {}",
                pricing.advance_amount, pricing.advance_percent, pricing.total
            ),
            "ARI-05",
        ));
    }

    errors
}

fn percent_of(value: Decimal, percent: Decimal) -> Option<Decimal> {
    value.checked_mul(percent)?.checked_div(dec!(100))
}
