use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A priced line on a quotation or requisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free-text description (equipment name or component).
    pub description: String,
    /// Ordered quantity.
    pub quantity: Decimal,
    /// Net price per unit, before IVA.
    pub unit_price: Decimal,
    /// Whether IVA applies to this line. Only consulted in [`TaxMode::PerLine`].
    pub has_tax: bool,
    /// Assigned supplier. Empty when not yet assigned.
    pub supplier_name: String,
    /// Unit of measure as typed by the user (e.g. "pza", "m", "kg").
    pub unit: Option<String>,
}

/// How IVA is applied to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// Each line carries its own tax flag (requisitions).
    PerLine,
    /// One tax line on the whole discounted subtotal (quotations).
    Document {
        /// Whether the quotation is issued with IVA.
        include_tax: bool,
    },
}

/// Totals computed for a set of line items.
///
/// Values keep full precision. Use [`PricingResult::rounded`] for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Sum of `quantity * unit_price`, before discount and tax.
    pub subtotal: Decimal,
    /// Discount percentage (0-100) applied to the subtotal.
    pub discount_percent: Decimal,
    /// Discount amount = subtotal * discount_percent / 100.
    pub discount_amount: Decimal,
    /// IVA computed on the discounted base.
    pub tax_amount: Decimal,
    /// Advance percentage (0-100) requested against the total.
    pub advance_percent: Decimal,
    /// Advance amount = total * advance_percent / 100.
    pub advance_amount: Decimal,
    /// Grand total = subtotal - discount_amount + tax_amount.
    pub total: Decimal,
}

impl PricingResult {
    /// All-zero result, returned for an empty item list.
    pub fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            advance_percent: Decimal::ZERO,
            advance_amount: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    /// Amount left to pay after the advance.
    pub fn balance_due(&self) -> Decimal {
        self.total - self.advance_amount
    }

    /// Copy with every amount rounded half-up to 2 fraction digits.
    /// Percentages are left untouched.
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: round_currency(self.subtotal),
            discount_percent: self.discount_percent,
            discount_amount: round_currency(self.discount_amount),
            tax_amount: round_currency(self.tax_amount),
            advance_percent: self.advance_percent,
            advance_amount: round_currency(self.advance_amount),
            total: round_currency(self.total),
        }
    }
}

/// Round a currency amount to 2 decimal places using half-up (commercial rounding).
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Client data printed on a quotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Quotation (cotización) issued to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    /// Human-readable sequential identifier, e.g. "COT-2024-001".
    pub folio: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Days the quoted prices stay valid.
    pub validity_days: u32,
    /// Salesperson issuing the quotation.
    pub seller: String,
    pub client: Client,
    pub items: Vec<LineItem>,
    /// Always [`TaxMode::Document`] for quotations built through the builder.
    pub tax_mode: TaxMode,
    /// ISO 4217 currency code.
    pub currency_code: String,
    /// Reason recorded for the discount, if any.
    pub discount_reason: Option<String>,
    pub notes: Option<String>,
    /// Totals, computed when the quotation is built.
    pub pricing: PricingResult,
}

impl Quotation {
    /// Whether IVA is itemized on this quotation.
    pub fn includes_tax(&self) -> bool {
        matches!(self.tax_mode, TaxMode::Document { include_tax: true })
    }

    /// Last day the quotation is valid. `None` on calendar overflow.
    pub fn valid_until(&self) -> Option<NaiveDate> {
        self.issue_date
            .checked_add_days(Days::new(u64::from(self.validity_days)))
    }

    /// Whether the quotation has expired on `date`.
    pub fn is_expired(&self, date: NaiveDate) -> bool {
        self.valid_until().is_none_or(|until| date > until)
    }
}

/// Supplier (proveedor) contacted for pricing and fulfillment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Option<i64>,
    /// Legal business name. Requisition items refer to suppliers by this name.
    pub legal_name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
}

/// Catalog entry (equipo) for a piece of equipment the company sells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: Option<i64>,
    /// Unique catalog code.
    pub code: String,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    /// Published price.
    pub list_price: Decimal,
    /// Lowest price a salesperson may accept without manager authorization.
    pub minimum_price: Decimal,
    pub cost_price: Option<Decimal>,
    pub motor_power: Option<String>,
    pub capacity: Option<String>,
    pub dimensions: Option<String>,
    pub weight: Option<String>,
}

impl Equipment {
    /// Description used when the equipment is picked on a quotation row:
    /// `"{name} - {brand} {model}"`, omitting absent parts.
    pub fn quotation_description(&self) -> String {
        let mut desc = self.name.clone();
        if let Some(brand) = self.brand.as_deref().filter(|b| !b.is_empty()) {
            desc.push_str(" - ");
            desc.push_str(brand);
        }
        if let Some(model) = self.model.as_deref().filter(|m| !m.is_empty()) {
            desc.push(' ');
            desc.push_str(model);
        }
        desc
    }

    /// Quotation line for `quantity` units at list price.
    pub fn to_line_item(&self, quantity: Decimal) -> LineItem {
        LineItem {
            description: self.quotation_description(),
            quantity,
            unit_price: self.list_price,
            has_tax: false,
            supplier_name: String::new(),
            unit: None,
        }
    }
}
