use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    CotizaError, LineItem, PricingOptions, PricingResult, ValidationError, compute_pricing,
    join_errors, validate_line_item,
};

use super::assignment::SupplierRules;
use super::grouping::{SupplierGroup, group_by_supplier};

/// Lifecycle of a purchase requisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequisitionStatus {
    #[default]
    #[serde(rename = "Pendiente")]
    Pending,
    /// Sent to the suppliers.
    #[serde(rename = "Enviada")]
    Sent,
    #[serde(rename = "Recibida")]
    Received,
    #[serde(rename = "Cancelada")]
    Cancelled,
}

/// Purchase requisition (requisición): components needed for a project,
/// from one or more suppliers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requisition {
    /// Human-readable sequential identifier, e.g. "REQ-2024-001".
    pub folio: String,
    /// Equipment or project the components are for.
    pub project_name: String,
    pub date: NaiveDate,
    pub status: RequisitionStatus,
    pub items: Vec<LineItem>,
    /// Items partitioned by supplier, first-seen order.
    pub groups: Vec<SupplierGroup>,
    /// Totals with per-line IVA.
    pub pricing: PricingResult,
}

impl Requisition {
    /// Suppliers this requisition must be sent to, in group order.
    pub fn supplier_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.supplier_name.as_str())
    }

    /// Lines assigned to `supplier_name` (exact match).
    pub fn items_for(&self, supplier_name: &str) -> &[LineItem] {
        super::grouping::find_group(&self.groups, supplier_name)
            .map(|g| g.items.as_slice())
            .unwrap_or(&[])
    }
}

/// Validate a requisition before it is dispatched.
pub fn validate_requisition(requisition: &Requisition) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if requisition.folio.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "folio",
            "folio must not be empty",
            "REQ-01",
        ));
    }

    if requisition.project_name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "project_name",
            "project name must not be empty",
            "REQ-02",
        ));
    }

    if requisition.items.is_empty() {
        errors.push(ValidationError::with_rule(
            "items",
            "requisition must have at least one item",
            "REQ-03",
        ));
    }

    for (i, item) in requisition.items.iter().enumerate() {
        validate_line_item(item, i, &mut errors);
    }

    let grouped: usize = requisition.groups.iter().map(|g| g.items.len()).sum();
    if grouped != requisition.items.len() {
        errors.push(ValidationError::with_rule(
            "groups",
            format!(
                "supplier groups hold {grouped} items, requisition has {}",
                requisition.items.len()
            ),
            "REQ-04",
        ));
    }

    errors.extend(crate::core::validate_arithmetic(&requisition.pricing));

    errors
}

/// Builder for [`Requisition`].
///
/// Lines without a supplier are auto-assigned from [`SupplierRules`]
/// unless [`auto_assign(false)`](Self::auto_assign) is set.
pub struct RequisitionBuilder {
    folio: String,
    date: NaiveDate,
    project_name: String,
    status: RequisitionStatus,
    items: Vec<LineItem>,
    rules: SupplierRules,
    auto_assign: bool,
}

impl RequisitionBuilder {
    pub fn new(folio: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            folio: folio.into(),
            date,
            project_name: String::new(),
            status: RequisitionStatus::Pending,
            items: Vec::new(),
            rules: SupplierRules::default(),
            auto_assign: true,
        }
    }

    pub fn project(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    pub fn status(mut self, status: RequisitionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Replace the default supplier rule table.
    pub fn rules(mut self, rules: SupplierRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn auto_assign(mut self, enabled: bool) -> Self {
        self.auto_assign = enabled;
        self
    }

    /// Build the requisition, pricing and grouping its lines, then validate.
    pub fn build(self) -> Result<Requisition, CotizaError> {
        if self.items.is_empty() {
            return Err(CotizaError::Builder(
                "at least one item is required".into(),
            ));
        }
        if self.items.len() > 10_000 {
            return Err(CotizaError::Builder(
                "requisition cannot have more than 10,000 items".into(),
            ));
        }

        let requisition = self.assemble()?;

        let errors = validate_requisition(&requisition);
        if !errors.is_empty() {
            return Err(join_errors(&errors));
        }

        debug!(
            folio = %requisition.folio,
            suppliers = requisition.groups.len(),
            total = %requisition.pricing.total,
            "built requisition"
        );
        Ok(requisition)
    }

    /// Build without validation. Pricing and grouping still run and may fail.
    pub fn build_unchecked(self) -> Result<Requisition, CotizaError> {
        self.assemble()
    }

    fn assemble(self) -> Result<Requisition, CotizaError> {
        let mut items = self.items;
        if self.auto_assign {
            for item in &mut items {
                item.supplier_name = self.rules.assign(&item.description, &item.supplier_name);
            }
        }

        let pricing = compute_pricing(&items, &PricingOptions::requisition())?;
        let groups = group_by_supplier(&items)?;

        Ok(Requisition {
            folio: self.folio,
            project_name: self.project_name,
            date: self.date,
            status: self.status,
            items,
            groups,
            pricing,
        })
    }
}
