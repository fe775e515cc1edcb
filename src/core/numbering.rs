use chrono::{Datelike, NaiveDate};

use super::error::CotizaError;

/// Prefix for quotation folios.
pub const QUOTATION_PREFIX: &str = "COT-";

/// Prefix for purchase requisition folios.
pub const REQUISITION_PREFIX: &str = "REQ-";

/// Gapless folio generator.
///
/// Produces folios in the format `{prefix}{year}-{sequential}`,
/// e.g. "COT-2024-001", "COT-2024-002". The counter restarts at 1
/// every year.
#[derive(Debug, Clone)]
pub struct FolioSequence {
    prefix: String,
    year: i32,
    next_number: u64,
    zero_pad: usize,
}

impl FolioSequence {
    /// Create a new sequence starting at 1.
    pub fn new(prefix: impl Into<String>, year: i32) -> Self {
        Self::starting_at(prefix, year, 1)
    }

    /// Quotation sequence ("COT-{year}-001").
    pub fn quotations(year: i32) -> Self {
        Self::new(QUOTATION_PREFIX, year)
    }

    /// Requisition sequence ("REQ-{year}-001").
    pub fn requisitions(year: i32) -> Self {
        Self::new(REQUISITION_PREFIX, year)
    }

    /// Continue a sequence, e.g. after reading the last folio from the backend.
    pub fn starting_at(prefix: impl Into<String>, year: i32, next_number: u64) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            next_number,
            zero_pad: 3,
        }
    }

    /// Set zero-padding width (default: 3, so "001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Issue the next folio.
    pub fn next_folio(&mut self) -> String {
        let folio = self.peek();
        self.next_number += 1;
        folio
    }

    /// Preview the next folio without consuming it.
    pub fn peek(&self) -> String {
        format!(
            "{}{}-{:0>width$}",
            self.prefix,
            self.year,
            self.next_number,
            width = self.zero_pad
        )
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Next number that will be issued, unformatted.
    pub fn next_raw(&self) -> u64 {
        self.next_number
    }

    /// Move to a new year, resetting the counter to 1.
    pub fn advance_year(&mut self, new_year: i32) -> Result<(), CotizaError> {
        if new_year <= self.year {
            return Err(CotizaError::Numbering(format!(
                "new year {new_year} must be greater than current year {}",
                self.year
            )));
        }
        self.year = new_year;
        self.next_number = 1;
        Ok(())
    }

    /// Move to the year of `date` if it is later. Returns true if the year changed.
    pub fn auto_advance(&mut self, date: NaiveDate) -> bool {
        self.advance_year(date.year()).is_ok()
    }
}

/// Serial number stamped on a sold unit: `DUR-{model}-{year}-{n:04}`,
/// where `n` follows the `existing_count` units of that model already
/// sold in `year`.
pub fn equipment_serial(model: &str, year: i32, existing_count: u64) -> String {
    format!("DUR-{}-{}-{:04}", model.trim(), year, existing_count + 1)
}
