//! Purchase requisitions: supplier grouping and supplier auto-assignment.
//!
//! # Example
//!
//! ```
//! use cotiza::core::LineItemBuilder;
//! use cotiza::requisition::*;
//! use rust_decimal_macros::dec;
//!
//! let items = vec![
//!     LineItemBuilder::new("Motor 5HP", dec!(2), dec!(5000)).tax(true).supplier("Acme Steel").build(),
//!     LineItemBuilder::new("Tornillos", dec!(100), dec!(5)).supplier("Local Hardware").build(),
//! ];
//! let groups = group_by_supplier(&items).unwrap();
//! assert_eq!(groups[0].group_subtotal, dec!(11600));
//!
//! assert_eq!(assign_default_supplier("Placa de Acero 4140", ""), "Levinson");
//! ```

mod assignment;
mod document;
mod grouping;

pub use assignment::{
    SupplierRule, SupplierRules, assign_default_supplier, suggest_supplier,
};
pub use document::{Requisition, RequisitionBuilder, RequisitionStatus, validate_requisition};
pub use grouping::{SupplierGroup, UNASSIGNED_SUPPLIER, find_group, group_by_supplier};
