use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::{CotizaError, join_errors};
use super::policy::PricingPolicy;
use super::totals::compute_pricing;
use super::types::*;
use super::validation;

/// Builder for priced, validated quotations.
///
/// ```
/// use cotiza::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let quotation = QuotationBuilder::new("COT-2024-001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .seller("Ana Torres")
///     .client(ClientBuilder::new("Minera del Norte").company("MdN SA de CV").build())
///     .add_item(LineItemBuilder::new("Molino de Bolas 3x4", dec!(1), dec!(328900)).build())
///     .discount(dec!(5))
///     .build()
///     .unwrap();
///
/// assert_eq!(quotation.pricing.total, dec!(362447.80));
/// ```
pub struct QuotationBuilder {
    folio: String,
    issue_date: NaiveDate,
    policy: PricingPolicy,
    validity_days: Option<u32>,
    seller: String,
    client: Option<Client>,
    items: Vec<LineItem>,
    include_tax: bool,
    discount_percent: Decimal,
    discount_reason: Option<String>,
    advance_percent: Option<Decimal>,
    currency_code: Option<String>,
    notes: Option<String>,
}

impl QuotationBuilder {
    pub fn new(folio: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            folio: folio.into(),
            issue_date,
            policy: PricingPolicy::default(),
            validity_days: None,
            seller: String::new(),
            client: None,
            items: Vec::new(),
            include_tax: true,
            discount_percent: Decimal::ZERO,
            discount_reason: None,
            advance_percent: None,
            currency_code: None,
            notes: None,
        }
    }

    /// Company defaults for tax rate, advance, validity and currency.
    pub fn policy(mut self, policy: PricingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn seller(mut self, seller: impl Into<String>) -> Self {
        self.seller = seller.into();
        self
    }

    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Add catalog equipment at list price.
    pub fn add_equipment(mut self, equipment: &Equipment, quantity: Decimal) -> Self {
        self.items.push(equipment.to_line_item(quantity));
        self
    }

    /// Whether IVA is added on top of the discounted subtotal (default: true).
    pub fn include_tax(mut self, include: bool) -> Self {
        self.include_tax = include;
        self
    }

    pub fn discount(mut self, percent: Decimal) -> Self {
        self.discount_percent = percent;
        self
    }

    pub fn discount_reason(mut self, reason: impl Into<String>) -> Self {
        self.discount_reason = Some(reason.into());
        self
    }

    /// Override the policy's advance percentage.
    pub fn advance(mut self, percent: Decimal) -> Self {
        self.advance_percent = Some(percent);
        self
    }

    /// Override the policy's validity.
    pub fn validity_days(mut self, days: u32) -> Self {
        self.validity_days = Some(days);
        self
    }

    /// Override the policy's currency.
    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = Some(code.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Build the quotation, computing totals and running validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Quotation, CotizaError> {
        if self.items.is_empty() {
            return Err(CotizaError::Builder(
                "at least one item is required".into(),
            ));
        }

        // Input limits to prevent abuse
        if self.items.len() > 10_000 {
            return Err(CotizaError::Builder(
                "quotation cannot have more than 10,000 items".into(),
            ));
        }
        if self.folio.len() > 200 {
            return Err(CotizaError::Builder(
                "folio cannot exceed 200 characters".into(),
            ));
        }

        let policy_errors = self.policy.validate();
        if !policy_errors.is_empty() {
            return Err(join_errors(&policy_errors));
        }

        let quotation = self.assemble()?;

        let errors = validation::validate_quotation(&quotation);
        if !errors.is_empty() {
            return Err(join_errors(&errors));
        }

        debug!(folio = %quotation.folio, total = %quotation.pricing.total, "built quotation");
        Ok(quotation)
    }

    /// Build without validation. Pricing still runs and may fail.
    pub fn build_unchecked(self) -> Result<Quotation, CotizaError> {
        self.assemble()
    }

    fn assemble(self) -> Result<Quotation, CotizaError> {
        let client = self
            .client
            .ok_or_else(|| CotizaError::Builder("client is required".into()))?;

        let mut options = self
            .policy
            .quotation_options(self.include_tax)
            .discount(self.discount_percent);
        if let Some(advance) = self.advance_percent {
            options = options.advance(advance);
        }
        let pricing = compute_pricing(&self.items, &options)?;

        Ok(Quotation {
            folio: self.folio,
            issue_date: self.issue_date,
            validity_days: self.validity_days.unwrap_or(self.policy.validity_days),
            seller: self.seller,
            client,
            items: self.items,
            tax_mode: options.tax_mode,
            currency_code: self.currency_code.unwrap_or(self.policy.currency_code),
            discount_reason: self.discount_reason,
            notes: self.notes,
            pricing,
        })
    }
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    name: String,
    company: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
}

impl ClientBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: None,
            phone: None,
            email: None,
            address: None,
        }
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn build(self) -> Client {
        Client {
            name: self.name,
            company: self.company,
            phone: self.phone,
            email: self.email,
            address: self.address,
        }
    }
}

/// Builder for [`LineItem`]. Lines default to no tax and no supplier.
pub struct LineItemBuilder {
    description: String,
    quantity: Decimal,
    unit_price: Decimal,
    has_tax: bool,
    supplier_name: String,
    unit: Option<String>,
}

impl LineItemBuilder {
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            has_tax: false,
            supplier_name: String::new(),
            unit: None,
        }
    }

    /// Mark the line as carrying IVA (per-line tax mode).
    pub fn tax(mut self, has_tax: bool) -> Self {
        self.has_tax = has_tax;
        self
    }

    pub fn supplier(mut self, name: impl Into<String>) -> Self {
        self.supplier_name = name.into();
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            has_tax: self.has_tax,
            supplier_name: self.supplier_name,
            unit: self.unit,
        }
    }
}
