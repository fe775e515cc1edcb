//! Core records, totals engine, configuration, validation and numbering.
//!
//! This module provides the foundational types for pricing quotations and
//! requisitions with Mexican IVA (16%).

mod builder;
mod error;
mod numbering;
mod policy;
mod totals;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use numbering::*;
pub use policy::*;
pub use totals::*;
pub use types::*;
pub use validation::*;
