use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::CotizaError;

/// Stock status of a physical unit. Serialized with the dashboard's labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InventoryStatus {
    #[serde(rename = "Disponible")]
    Available,
    #[serde(rename = "En Planta 1")]
    AtPlant1,
    #[serde(rename = "En Planta 2")]
    AtPlant2,
    /// Reserved for a client.
    #[serde(rename = "Apartada")]
    Reserved,
    /// Client paid an advance.
    #[serde(rename = "Anticipo")]
    AdvancePaid,
    #[serde(rename = "Vendida")]
    Sold,
    #[serde(rename = "En Tránsito")]
    InTransit,
    /// Any label this version does not know.
    #[serde(other)]
    Other,
}

impl InventoryStatus {
    /// Whether a unit in this status may be sold.
    pub fn can_sell(&self) -> bool {
        matches!(
            self,
            Self::Available | Self::AtPlant1 | Self::AtPlant2 | Self::Reserved | Self::AdvancePaid
        )
    }
}

/// Payment methods offered at sale time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Efectivo")]
    Cash,
    #[serde(rename = "Transferencia Bancaria")]
    BankTransfer,
    #[serde(rename = "Cheque")]
    Check,
    #[serde(rename = "Tarjeta de Crédito")]
    CreditCard,
    #[serde(rename = "Financiamiento")]
    Financing,
}

/// Who approved the sale price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Authorization {
    /// At or above the minimum price.
    #[serde(rename = "Automático")]
    Automatic,
    /// Below the minimum price.
    #[serde(rename = "Gerente")]
    Manager,
}

/// A recorded sale (venta) of one equipment unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: Option<i64>,
    pub equipment_id: i64,
    pub seller: String,
    pub client_name: String,
    /// Net sale price, IVA excluded.
    pub sale_price: Decimal,
    /// List price minus sale price.
    pub discount_amount: Decimal,
    pub discount_percent: Decimal,
    pub discount_reason: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub authorized_by: Authorization,
    pub sale_date: NaiveDate,
    pub serial_number: Option<String>,
}

/// Outcome of checking a proposed sale price against the catalog prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleAssessment {
    pub list_price: Decimal,
    pub minimum_price: Decimal,
    pub sale_price: Decimal,
    /// `list_price - sale_price`. Negative when selling above list.
    pub discount_amount: Decimal,
    /// Discount relative to list price, in percent. Zero when the list price is zero.
    pub discount_percent: Decimal,
    pub authorization: Authorization,
}

impl SaleAssessment {
    pub fn requires_authorization(&self) -> bool {
        self.authorization == Authorization::Manager
    }
}

/// Compute the discount a sale price represents and whether it needs a
/// manager's approval (sale price below the minimum price).
pub fn assess_sale(
    list_price: Decimal,
    minimum_price: Decimal,
    sale_price: Decimal,
) -> Result<SaleAssessment, CotizaError> {
    for (name, value) in [
        ("list_price", list_price),
        ("minimum_price", minimum_price),
        ("sale_price", sale_price),
    ] {
        if value < Decimal::ZERO {
            return Err(CotizaError::InvalidInput(format!(
                "{name} must not be negative, got {value}"
            )));
        }
    }

    let discount_amount = list_price - sale_price;
    let discount_percent = if list_price > Decimal::ZERO {
        discount_amount
            .checked_div(list_price)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .ok_or_else(|| {
                CotizaError::invalid(format!(
                    "discount percent of {sale_price} against list {list_price} overflows"
                ))
            })?
    } else {
        Decimal::ZERO
    };

    let authorization = if sale_price < minimum_price {
        warn!(%sale_price, %minimum_price, "sale price below minimum, manager authorization required");
        Authorization::Manager
    } else {
        Authorization::Automatic
    };

    Ok(SaleAssessment {
        list_price,
        minimum_price,
        sale_price,
        discount_amount,
        discount_percent,
        authorization,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_at_list_price() {
        let a = assess_sale(dec!(109900), dec!(98910), dec!(109900)).unwrap();
        assert_eq!(a.discount_amount, dec!(0));
        assert_eq!(a.discount_percent, dec!(0));
        assert!(!a.requires_authorization());
    }

    #[test]
    fn sale_at_minimum_is_automatic() {
        let a = assess_sale(dec!(109900), dec!(98910), dec!(98910)).unwrap();
        assert_eq!(a.discount_amount, dec!(10990));
        assert_eq!(a.discount_percent, dec!(10));
        assert_eq!(a.authorization, Authorization::Automatic);
    }

    #[test]
    fn below_minimum_needs_manager() {
        let a = assess_sale(dec!(109900), dec!(98910), dec!(98909.99)).unwrap();
        assert!(a.requires_authorization());
    }

    #[test]
    fn zero_list_price_has_no_percent() {
        let a = assess_sale(dec!(0), dec!(0), dec!(500)).unwrap();
        assert_eq!(a.discount_percent, dec!(0));
        assert_eq!(a.discount_amount, dec!(-500));
    }

    #[test]
    fn negative_price_rejected() {
        assert!(assess_sale(dec!(100), dec!(90), dec!(-1)).is_err());
        assert!(assess_sale(dec!(-100), dec!(90), dec!(1)).is_err());
    }

    #[test]
    fn sellable_statuses() {
        assert!(InventoryStatus::Available.can_sell());
        assert!(InventoryStatus::AtPlant2.can_sell());
        assert!(InventoryStatus::AdvancePaid.can_sell());
        assert!(!InventoryStatus::Sold.can_sell());
        assert!(!InventoryStatus::InTransit.can_sell());
        assert!(!InventoryStatus::Other.can_sell());
    }

    #[test]
    fn status_labels_round_trip() {
        let s: InventoryStatus = serde_json::from_str("\"En Planta 1\"").unwrap();
        assert_eq!(s, InventoryStatus::AtPlant1);
        let s: InventoryStatus = serde_json::from_str("\"Vendida - Entregada\"").unwrap();
        assert_eq!(s, InventoryStatus::Other);
        assert_eq!(
            serde_json::to_string(&InventoryStatus::InTransit).unwrap(),
            "\"En Tránsito\""
        );
    }

    #[test]
    fn discount_percent_overflow_is_invalid_input() {
        let err = assess_sale(dec!(0.0000001), dec!(0), Decimal::MAX).unwrap_err();
        assert!(matches!(err, CotizaError::InvalidInput(_)));
    }
}
