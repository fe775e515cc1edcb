//! JSON records as the dashboard backend sends and receives them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::requisition::RequisitionStatus;
use crate::sales::{Authorization, PaymentMethod};

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(super) struct QuotationRecord {
    pub folio: String,
    pub fecha_cotizacion: String,
    pub vigencia_dias: Option<u32>,
    pub vendedor: Option<String>,
    pub cliente_nombre: Option<String>,
    pub cliente_empresa: Option<String>,
    pub cliente_telefono: Option<String>,
    pub cliente_email: Option<String>,
    pub cliente_direccion: Option<String>,
    #[serde(default = "default_true")]
    pub incluye_iva: bool,
    pub descuento_porcentaje: Option<Decimal>,
    pub anticipo_porcentaje: Option<Decimal>,
    pub motivo_descuento: Option<String>,
    pub notas: Option<String>,
    /// Total as stored by the backend, compared against the recomputed one.
    pub total: Option<Decimal>,
    #[serde(default)]
    pub items: Vec<QuotationItemRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct QuotationItemRecord {
    pub descripcion: String,
    pub cantidad: Decimal,
    pub precio_unitario: Decimal,
}

/// Body of `POST /api/cotizaciones`.
#[derive(Debug, Serialize)]
pub(super) struct QuotationRequest<'a> {
    pub folio: &'a str,
    pub vendedor: &'a str,
    pub cliente_nombre: &'a str,
    pub cliente_empresa: Option<&'a str>,
    pub cliente_telefono: Option<&'a str>,
    pub cliente_email: Option<&'a str>,
    pub cliente_direccion: Option<&'a str>,
    pub incluye_iva: bool,
    pub vigencia_dias: u32,
    pub descuento_porcentaje: Decimal,
    pub anticipo_porcentaje: Decimal,
    pub motivo_descuento: Option<&'a str>,
    pub notas: Option<&'a str>,
    pub subtotal: Decimal,
    pub iva: Decimal,
    pub total: Decimal,
    pub items: Vec<QuotationItemRecord>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RequisitionRecord {
    pub folio: String,
    pub equipo_nombre: Option<String>,
    pub estado: Option<RequisitionStatus>,
    pub created_at: String,
    #[serde(default)]
    pub items: Vec<RequisitionItemRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct RequisitionItemRecord {
    pub componente: String,
    #[serde(default)]
    pub proveedor_nombre: Option<String>,
    pub cantidad: Decimal,
    pub unidad: Option<String>,
    pub precio_unitario: Decimal,
    #[serde(default)]
    pub tiene_iva: bool,
}

/// Body of `POST /api/requisiciones`.
#[derive(Debug, Serialize)]
pub(super) struct RequisitionRequest<'a> {
    pub folio: &'a str,
    pub equipo_nombre: &'a str,
    pub estado: RequisitionStatus,
    pub total: Decimal,
    pub items: Vec<RequisitionItemRecord>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SupplierRecord {
    pub id: Option<i64>,
    pub razon_social: String,
    pub contacto_nombre: Option<String>,
    pub correo: Option<String>,
    pub whatsapp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EquipmentRecord {
    pub id: Option<i64>,
    pub codigo: String,
    pub nombre: String,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub categoria: Option<String>,
    pub precio_lista: Decimal,
    pub precio_minimo: Decimal,
    pub precio_costo: Option<Decimal>,
    pub potencia_motor: Option<String>,
    pub capacidad: Option<String>,
    pub dimensiones: Option<String>,
    pub peso: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SaleRecord {
    pub id: Option<i64>,
    pub equipo_id: i64,
    pub vendedor: String,
    pub cliente_nombre: String,
    pub precio_venta: Decimal,
    #[serde(default)]
    pub descuento_monto: Decimal,
    #[serde(default)]
    pub descuento_porcentaje: Decimal,
    pub motivo_descuento: Option<String>,
    pub forma_pago: Option<PaymentMethod>,
    pub autorizado_por: Option<Authorization>,
    pub fecha_venta: String,
    pub numero_serie: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decimals_accept_numbers_and_strings() {
        let json = r#"{"componente":"Motor","cantidad":2,"precio_unitario":"5000.50","tiene_iva":true}"#;
        let item: RequisitionItemRecord = serde_json::from_str(json).unwrap();
        assert_eq!(item.cantidad, dec!(2));
        assert_eq!(item.precio_unitario, dec!(5000.50));
        assert!(item.proveedor_nombre.is_none());
    }

    #[test]
    fn missing_tax_flag_defaults_to_false() {
        let json = r#"{"componente":"Tornillos","cantidad":100,"precio_unitario":5}"#;
        let item: RequisitionItemRecord = serde_json::from_str(json).unwrap();
        assert!(!item.tiene_iva);
    }

    #[test]
    fn sale_record_labels() {
        let json = r#"{"equipo_id":3,"vendedor":"Luis","cliente_nombre":"Agregados SA",
            "precio_venta":"98000","forma_pago":"Transferencia Bancaria",
            "autorizado_por":"Gerente","fecha_venta":"2024-05-02"}"#;
        let sale: SaleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(sale.forma_pago, Some(PaymentMethod::BankTransfer));
        assert_eq!(sale.autorizado_por, Some(Authorization::Manager));
        assert_eq!(sale.descuento_monto, dec!(0));
    }
}
