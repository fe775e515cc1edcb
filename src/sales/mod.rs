//! Equipment sales: price authorization, sellable statuses, revenue figures.
//!
//! # Example
//!
//! ```
//! use cotiza::sales::*;
//! use rust_decimal_macros::dec;
//!
//! let a = assess_sale(dec!(109900), dec!(98910), dec!(95000)).unwrap();
//! assert!(a.requires_authorization());
//! assert_eq!(a.discount_amount, dec!(14900));
//! ```

mod assessment;
mod summary;

pub use assessment::{
    Authorization, InventoryStatus, PaymentMethod, Sale, SaleAssessment, assess_sale,
};
pub use summary::{Granularity, PeriodSummary, count_by_status, summarize_sales};
