//! Pricing configuration.
//!
//! [`PricingPolicy`] holds the company-wide defaults and deserializes from
//! any serde format with every field optional. [`PricingOptions`] is the
//! per-call input to [`compute_pricing`](super::compute_pricing).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::totals::IVA_RATE;
use super::types::TaxMode;

/// Advance required before fabrication starts, in percent of the total.
pub const DEFAULT_ADVANCE_PERCENT: Decimal = dec!(60);

/// Days a quotation stays valid when none is given.
pub const DEFAULT_VALIDITY_DAYS: u32 = 30;

/// Company-wide pricing defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Tax rate in percent.
    pub tax_rate: Decimal,
    /// Advance requested on quotations, in percent.
    pub advance_percent: Decimal,
    /// Quotation validity in days.
    pub validity_days: u32,
    /// ISO 4217 currency code used on documents.
    pub currency_code: String,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: IVA_RATE,
            advance_percent: DEFAULT_ADVANCE_PERCENT,
            validity_days: DEFAULT_VALIDITY_DAYS,
            currency_code: "MXN".to_string(),
        }
    }
}

impl PricingPolicy {
    /// Options for a quotation priced under this policy.
    pub fn quotation_options(&self, include_tax: bool) -> PricingOptions {
        PricingOptions::quotation(include_tax)
            .tax_rate(self.tax_rate)
            .advance(self.advance_percent)
    }

    /// Check the policy values. Returns all problems found.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.tax_rate < Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                "tax_rate",
                format!("tax rate must not be negative, got {}", self.tax_rate),
                "POL-01",
            ));
        }
        if self.advance_percent < Decimal::ZERO || self.advance_percent > dec!(100) {
            errors.push(ValidationError::with_rule(
                "advance_percent",
                format!(
                    "advance must be between 0 and 100 percent, got {}",
                    self.advance_percent
                ),
                "POL-02",
            ));
        }
        if self.validity_days == 0 {
            errors.push(ValidationError::with_rule(
                "validity_days",
                "quotation validity must be at least one day",
                "POL-03",
            ));
        }
        if !is_known_currency_code(&self.currency_code) {
            errors.push(ValidationError::with_rule(
                "currency_code",
                format!("currency code '{}' is not supported", self.currency_code),
                "POL-04",
            ));
        }

        errors
    }
}

/// Per-call pricing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingOptions {
    pub tax_mode: TaxMode,
    /// Tax rate in percent.
    pub tax_rate: Decimal,
    /// Discount on the pre-tax subtotal, 0-100.
    pub discount_percent: Decimal,
    /// Advance requested against the grand total, 0-100.
    pub advance_percent: Decimal,
}

impl PricingOptions {
    /// Document-level tax, no discount, no advance.
    pub fn quotation(include_tax: bool) -> Self {
        Self {
            tax_mode: TaxMode::Document { include_tax },
            tax_rate: IVA_RATE,
            discount_percent: Decimal::ZERO,
            advance_percent: Decimal::ZERO,
        }
    }

    /// Per-line tax, no discount, no advance.
    pub fn requisition() -> Self {
        Self {
            tax_mode: TaxMode::PerLine,
            tax_rate: IVA_RATE,
            discount_percent: Decimal::ZERO,
            advance_percent: Decimal::ZERO,
        }
    }

    pub fn discount(mut self, percent: Decimal) -> Self {
        self.discount_percent = percent;
        self
    }

    pub fn advance(mut self, percent: Decimal) -> Self {
        self.advance_percent = percent;
        self
    }

    /// Document-mode only. Per-line pricing rejects any rate other than
    /// [`IVA_RATE`](crate::core::IVA_RATE).
    pub fn tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = rate;
        self
    }
}

/// Check whether `code` is a currency the company issues documents in.
pub fn is_known_currency_code(code: &str) -> bool {
    CURRENCY_CODES.binary_search(&code).is_ok()
}

/// Sorted for binary search.
static CURRENCY_CODES: &[&str] = &[
    "CAD", // Canadian Dollar
    "EUR", // Euro
    "MXN", // Mexican Peso
    "USD", // US Dollar
];
