//! # cotiza
//!
//! Pricing for industrial equipment quotations and purchase requisitions:
//! subtotal, discount, IVA (16%), advance payment (anticipo), grand total,
//! and per-supplier grouping of requisition lines.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Discounts are applied to the pre-tax subtotal and IVA is computed on the
//! discounted base.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cotiza::core::*;
//! use rust_decimal_macros::dec;
//!
//! let items = vec![
//!     LineItemBuilder::new("Motor 5HP", dec!(2), dec!(5000)).tax(true).build(),
//!     LineItemBuilder::new("Tornillos", dec!(100), dec!(5)).build(),
//! ];
//!
//! let pricing = compute_pricing(&items, &PricingOptions::quotation(true).discount(dec!(10))).unwrap();
//! assert_eq!(pricing.subtotal, dec!(10500));
//! assert_eq!(pricing.tax_amount, dec!(1512));
//! assert_eq!(pricing.total, dec!(10962));
//!
//! let quotation = QuotationBuilder::new("COT-2024-001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .seller("Ana Torres")
//!     .client(ClientBuilder::new("Minera del Norte").build())
//!     .add_item(items[0].clone())
//!     .build()
//!     .unwrap();
//! assert_eq!(quotation.pricing.advance_amount, dec!(6960));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Records, totals engine, pricing policy, quotation builder, validation, folios |
//! | `requisition` | Supplier grouping, supplier auto-assignment, requisition builder |
//! | `sales` | Sale discount assessment, sellable statuses, revenue by period |
//! | `api` | Typed JSON boundary for the dashboard backend |
//! | `all` | Everything (same as default) |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "requisition")]
pub mod requisition;

#[cfg(feature = "sales")]
pub mod sales;

#[cfg(feature = "api")]
pub mod api;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
