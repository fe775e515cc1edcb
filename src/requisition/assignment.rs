//! Default supplier suggestion for requisition components.
//!
//! When a component is typed with the supplier field left blank, its
//! lower-cased description is matched against an ordered keyword table.
//! The first matching rule wins. A non-blank supplier is never replaced.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One keyword rule: any keyword found in the description selects `supplier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRule {
    /// Substrings, matched case-insensitively.
    pub keywords: Vec<String>,
    pub supplier: String,
}

impl SupplierRule {
    pub fn new(keywords: &[&str], supplier: impl Into<String>) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            supplier: supplier.into(),
        }
    }

    fn matches(&self, description: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| description.contains(k.to_lowercase().as_str()))
    }
}

/// Ordered rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierRules {
    rules: Vec<SupplierRule>,
}

/// Steel to Levinson, pulleys and belts to Maposa, bearings to Herver,
/// motors to HAB. Keywords are lower-case.
static DEFAULT_RULES: &[(&[&str], &str)] = &[
    (&["acero", "4140", "1045", "estirad", "lamina"], "Levinson"),
    (&["polea", "banda"], "Maposa"),
    (&["chumacera", "rodamiento"], "Herver"),
    (&["motor"], "HAB"),
];

impl Default for SupplierRules {
    fn default() -> Self {
        Self::new(
            DEFAULT_RULES
                .iter()
                .map(|(keywords, supplier)| SupplierRule::new(keywords, *supplier))
                .collect(),
        )
    }
}

impl SupplierRules {
    pub fn new(rules: Vec<SupplierRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SupplierRule] {
        &self.rules
    }

    /// Supplier of the first rule matching `description`, case-insensitive.
    pub fn suggest(&self, description: &str) -> Option<&str> {
        let lowered = description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.supplier.as_str())
    }

    /// Supplier to store for a component: `current` when it is not blank,
    /// otherwise the suggestion, otherwise `current` unchanged.
    pub fn assign(&self, description: &str, current: &str) -> String {
        assign_with(description, current, |d| self.suggest(d))
    }
}

/// Suggest a supplier from the default rule table.
pub fn suggest_supplier(description: &str) -> Option<&'static str> {
    let lowered = description.to_lowercase();
    DEFAULT_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, supplier)| *supplier)
}

/// [`SupplierRules::assign`] with the default rule table.
pub fn assign_default_supplier(description: &str, current_supplier: &str) -> String {
    assign_with(description, current_supplier, suggest_supplier)
}

fn assign_with<'a>(
    description: &str,
    current: &str,
    suggest: impl FnOnce(&str) -> Option<&'a str>,
) -> String {
    if !current.trim().is_empty() {
        return current.to_string();
    }
    match suggest(description) {
        Some(supplier) => {
            debug!(description, supplier, "auto-assigned supplier");
            supplier.to_string()
        }
        None => current.to_string(),
    }
}
