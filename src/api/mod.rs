//! JSON boundary with the dashboard backend.
//!
//! The backend stores quotations, requisitions, suppliers, catalog
//! equipment and sales with Spanish field names. Records are decoded
//! here, mapped onto the crate's types and re-priced by the engine; the
//! backend's own totals are never trusted.
//!
//! ```
//! use cotiza::api::parse_requisition;
//! use rust_decimal_macros::dec;
//!
//! let json = r#"{
//!     "folio": "REQ-2024-007",
//!     "equipo_nombre": "Criba 5x12",
//!     "estado": "Pendiente",
//!     "created_at": "2024-03-04T18:22:10.000Z",
//!     "items": [
//!         {"componente": "Motor 5HP", "proveedor_nombre": "Acme Steel",
//!          "cantidad": 2, "unidad": "pza", "precio_unitario": "5000", "tiene_iva": true},
//!         {"componente": "Tornillos", "proveedor_nombre": "",
//!          "cantidad": 100, "unidad": "pza", "precio_unitario": "5", "tiene_iva": false}
//!     ]
//! }"#;
//!
//! let requisition = parse_requisition(json).unwrap();
//! assert_eq!(requisition.pricing.total, dec!(12100));
//! assert_eq!(requisition.groups.len(), 2);
//! ```

mod records;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::core::{
    ClientBuilder, CotizaError, Equipment, LineItemBuilder, PricingPolicy, Quotation,
    QuotationBuilder, Supplier, round_currency,
};
use crate::requisition::{Requisition, RequisitionBuilder};
use crate::sales::{Authorization, Sale};

use records::*;

/// Decode a quotation record and re-price it with the default policy.
pub fn parse_quotation(json: &str) -> Result<Quotation, CotizaError> {
    parse_quotation_with_policy(json, &PricingPolicy::default())
}

/// Decode a quotation record and re-price it with `policy`.
///
/// Missing discount means none; missing advance or validity fall back to
/// the policy. The result is fully validated.
pub fn parse_quotation_with_policy(
    json: &str,
    policy: &PricingPolicy,
) -> Result<Quotation, CotizaError> {
    let record: QuotationRecord = decode(json, "quotation")?;
    let issue_date = parse_date(&record.fecha_cotizacion)?;

    let mut client = ClientBuilder::new(record.cliente_nombre.unwrap_or_default());
    if let Some(company) = non_blank(record.cliente_empresa) {
        client = client.company(company);
    }
    if let Some(phone) = non_blank(record.cliente_telefono) {
        client = client.phone(phone);
    }
    if let Some(email) = non_blank(record.cliente_email) {
        client = client.email(email);
    }
    if let Some(address) = non_blank(record.cliente_direccion) {
        client = client.address(address);
    }

    let mut builder = QuotationBuilder::new(record.folio, issue_date)
        .policy(policy.clone())
        .seller(record.vendedor.unwrap_or_default())
        .client(client.build())
        .include_tax(record.incluye_iva)
        .discount(record.descuento_porcentaje.unwrap_or(Decimal::ZERO));
    if let Some(advance) = record.anticipo_porcentaje {
        builder = builder.advance(advance);
    }
    if let Some(days) = record.vigencia_dias {
        builder = builder.validity_days(days);
    }
    if let Some(reason) = non_blank(record.motivo_descuento) {
        builder = builder.discount_reason(reason);
    }
    if let Some(notes) = non_blank(record.notas) {
        builder = builder.notes(notes);
    }
    for item in record.items {
        builder = builder.add_item(
            LineItemBuilder::new(item.descripcion, item.cantidad, item.precio_unitario).build(),
        );
    }

    let quotation = builder.build()?;

    if let Some(stored) = record.total {
        let computed = round_currency(quotation.pricing.total);
        if round_currency(stored) != computed {
            warn!(
                folio = %quotation.folio,
                %stored,
                %computed,
                "stored quotation total differs from recomputed total"
            );
        }
    }

    Ok(quotation)
}

/// Decode a requisition record. Supplier names are taken as stored;
/// blank ones group under the unassigned bucket.
pub fn parse_requisition(json: &str) -> Result<Requisition, CotizaError> {
    let record: RequisitionRecord = decode(json, "requisition")?;
    let date = parse_date(&record.created_at)?;

    let mut builder = RequisitionBuilder::new(record.folio, date)
        .project(record.equipo_nombre.unwrap_or_default())
        .status(record.estado.unwrap_or_default())
        .auto_assign(false);
    for item in record.items {
        let mut line = LineItemBuilder::new(item.componente, item.cantidad, item.precio_unitario)
            .tax(item.tiene_iva)
            .supplier(item.proveedor_nombre.unwrap_or_default());
        if let Some(unit) = non_blank(item.unidad) {
            line = line.unit(unit);
        }
        builder = builder.add_item(line.build());
    }

    builder.build()
}

/// Decode the supplier directory.
pub fn parse_suppliers(json: &str) -> Result<Vec<Supplier>, CotizaError> {
    let records: Vec<SupplierRecord> = decode(json, "supplier list")?;
    records
        .into_iter()
        .map(|r| {
            if r.razon_social.trim().is_empty() {
                return Err(CotizaError::Parse("supplier without legal name".into()));
            }
            Ok(Supplier {
                id: r.id,
                legal_name: r.razon_social,
                contact_name: non_blank(r.contacto_nombre),
                email: non_blank(r.correo),
                whatsapp: non_blank(r.whatsapp),
            })
        })
        .collect()
}

/// Decode the equipment catalog. Negative prices are rejected.
pub fn parse_catalog(json: &str) -> Result<Vec<Equipment>, CotizaError> {
    let records: Vec<EquipmentRecord> = decode(json, "catalog")?;
    let mut catalog = Vec::with_capacity(records.len());

    for r in records {
        let prices = [Some(r.precio_lista), Some(r.precio_minimo), r.precio_costo];
        if prices.into_iter().flatten().any(|p| p < Decimal::ZERO) {
            return Err(CotizaError::invalid(format!(
                "equipment {} has a negative price",
                r.codigo
            )));
        }
        if r.precio_minimo > r.precio_lista {
            warn!(
                code = %r.codigo,
                list = %r.precio_lista,
                minimum = %r.precio_minimo,
                "minimum price above list price"
            );
        }
        catalog.push(Equipment {
            id: r.id,
            code: r.codigo,
            name: r.nombre,
            brand: non_blank(r.marca),
            model: non_blank(r.modelo),
            category: non_blank(r.categoria),
            list_price: r.precio_lista,
            minimum_price: r.precio_minimo,
            cost_price: r.precio_costo,
            motor_power: non_blank(r.potencia_motor),
            capacity: non_blank(r.capacidad),
            dimensions: non_blank(r.dimensiones),
            weight: non_blank(r.peso),
        });
    }

    debug!(count = catalog.len(), "parsed catalog");
    Ok(catalog)
}

/// Decode recorded sales. A sale without an authorization label was
/// approved automatically.
pub fn parse_sales(json: &str) -> Result<Vec<Sale>, CotizaError> {
    let records: Vec<SaleRecord> = decode(json, "sales")?;
    records
        .into_iter()
        .map(|r| {
            Ok(Sale {
                id: r.id,
                equipment_id: r.equipo_id,
                seller: r.vendedor,
                client_name: r.cliente_nombre,
                sale_price: r.precio_venta,
                discount_amount: r.descuento_monto,
                discount_percent: r.descuento_porcentaje,
                discount_reason: non_blank(r.motivo_descuento),
                payment_method: r.forma_pago,
                authorized_by: r.autorizado_por.unwrap_or(Authorization::Automatic),
                sale_date: parse_date(&r.fecha_venta)?,
                serial_number: non_blank(r.numero_serie),
            })
        })
        .collect()
}

/// Encode a quotation as the backend's create request, amounts rounded
/// to cents.
pub fn to_quotation_request(quotation: &Quotation) -> Result<String, CotizaError> {
    let pricing = quotation.pricing.rounded();
    let client = &quotation.client;
    let request = QuotationRequest {
        folio: &quotation.folio,
        vendedor: &quotation.seller,
        cliente_nombre: &client.name,
        cliente_empresa: client.company.as_deref(),
        cliente_telefono: client.phone.as_deref(),
        cliente_email: client.email.as_deref(),
        cliente_direccion: client.address.as_deref(),
        incluye_iva: quotation.includes_tax(),
        vigencia_dias: quotation.validity_days,
        descuento_porcentaje: pricing.discount_percent,
        anticipo_porcentaje: pricing.advance_percent,
        motivo_descuento: quotation.discount_reason.as_deref(),
        notas: quotation.notes.as_deref(),
        subtotal: pricing.subtotal,
        iva: pricing.tax_amount,
        total: pricing.total,
        items: quotation
            .items
            .iter()
            .map(|i| QuotationItemRecord {
                descripcion: i.description.clone(),
                cantidad: i.quantity,
                precio_unitario: i.unit_price,
            })
            .collect(),
    };
    encode(&request)
}

/// Encode a requisition as the backend's create request.
pub fn to_requisition_request(requisition: &Requisition) -> Result<String, CotizaError> {
    let request = RequisitionRequest {
        folio: &requisition.folio,
        equipo_nombre: &requisition.project_name,
        estado: requisition.status,
        total: round_currency(requisition.pricing.total),
        items: requisition
            .items
            .iter()
            .map(|i| RequisitionItemRecord {
                componente: i.description.clone(),
                proveedor_nombre: Some(i.supplier_name.clone()),
                cantidad: i.quantity,
                unidad: i.unit.clone(),
                precio_unitario: i.unit_price,
                tiene_iva: i.has_tax,
            })
            .collect(),
    };
    encode(&request)
}

/// Parse a backend date: a plain `YYYY-MM-DD`, an RFC 3339 timestamp, or
/// any string starting with a `YYYY-MM-DD` prefix.
pub fn parse_date(value: &str) -> Result<NaiveDate, CotizaError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .ok_or_else(|| CotizaError::Parse(format!("unrecognized date: {value:?}")))
}

fn decode<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, CotizaError> {
    serde_json::from_str(json)
        .map_err(|e: serde_json::Error| CotizaError::Parse(format!("{what}: {e}")))
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, CotizaError> {
    serde_json::to_string(value).map_err(|e| CotizaError::Parse(e.to_string()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requisition::{RequisitionStatus, UNASSIGNED_SUPPLIER};
    use crate::sales::PaymentMethod;
    use rust_decimal_macros::dec;

    fn amount(value: &serde_json::Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    const QUOTATION: &str = r#"{
        "id": 12,
        "folio": "COT-2024-015",
        "fecha_cotizacion": "2024-06-15",
        "vigencia_dias": 15,
        "vendedor": "Ana Torres",
        "cliente_nombre": "Minera del Norte",
        "cliente_empresa": "MdN SA de CV",
        "cliente_telefono": "",
        "cliente_email": null,
        "incluye_iva": true,
        "descuento_porcentaje": "10",
        "anticipo_porcentaje": "60",
        "motivo_descuento": "Cliente frecuente",
        "total": "10962.00",
        "items": [
            {"equipo_id": 4, "descripcion": "Motor 5HP", "cantidad": 2, "precio_unitario": "5000"},
            {"descripcion": "Tornillos", "cantidad": 100, "precio_unitario": 5}
        ]
    }"#;

    #[test]
    fn quotation_is_repriced() {
        let q = parse_quotation(QUOTATION).unwrap();
        assert_eq!(q.folio, "COT-2024-015");
        assert_eq!(q.validity_days, 15);
        assert!(q.includes_tax());
        assert_eq!(q.pricing.subtotal, dec!(10500));
        assert_eq!(q.pricing.discount_amount, dec!(1050));
        assert_eq!(q.pricing.tax_amount, dec!(1512));
        assert_eq!(q.pricing.total, dec!(10962));
        assert_eq!(q.pricing.advance_amount, dec!(6577.2));
        assert_eq!(q.client.company.as_deref(), Some("MdN SA de CV"));
        assert!(q.client.phone.is_none());
        assert!(q.notes.is_none());
    }

    #[test]
    fn quotation_defaults_come_from_policy() {
        let json = r#"{"folio":"COT-2024-016","fecha_cotizacion":"2024-06-15T00:00:00.000Z",
            "vendedor":"Ana","cliente_nombre":"Agregados SA",
            "items":[{"descripcion":"Tolva","cantidad":1,"precio_unitario":"1000"}]}"#;
        let q = parse_quotation(json).unwrap();
        assert_eq!(q.validity_days, 30);
        assert_eq!(q.pricing.advance_percent, dec!(60));
        assert_eq!(q.pricing.discount_percent, dec!(0));
        assert_eq!(q.pricing.total, dec!(1160));
    }

    #[test]
    fn quotation_without_items_is_rejected() {
        let json = r#"{"folio":"COT-2024-017","fecha_cotizacion":"2024-06-15",
            "vendedor":"Ana","cliente_nombre":"Agregados SA","items":[]}"#;
        assert!(matches!(parse_quotation(json), Err(CotizaError::Builder(_))));
    }

    #[test]
    fn quotation_with_bad_discount_is_rejected() {
        let json = r#"{"folio":"COT-2024-018","fecha_cotizacion":"2024-06-15",
            "vendedor":"Ana","cliente_nombre":"Agregados SA","descuento_porcentaje":150,
            "items":[{"descripcion":"Tolva","cantidad":1,"precio_unitario":"1000"}]}"#;
        assert!(matches!(parse_quotation(json), Err(CotizaError::InvalidInput(_))));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = parse_quotation("{\"folio\": ").unwrap_err();
        assert!(matches!(err, CotizaError::Parse(_)));
        assert!(err.to_string().contains("quotation"));
    }

    #[test]
    fn requisition_keeps_stored_suppliers() {
        let json = r#"{"folio":"REQ-2024-003","equipo_nombre":"Quebradora 1020","estado":"Enviada",
            "created_at":"2024-03-04",
            "items":[
                {"componente":"Placa de Acero 4140","proveedor_nombre":null,"cantidad":1,
                 "unidad":"pza","precio_unitario":2500,"tiene_iva":true},
                {"componente":"Motor 5HP","proveedor_nombre":"Acme","cantidad":2,
                 "unidad":"","precio_unitario":5000,"tiene_iva":true}
            ]}"#;
        let r = parse_requisition(json).unwrap();
        assert_eq!(r.status, RequisitionStatus::Sent);
        let names: Vec<_> = r.supplier_names().collect();
        assert_eq!(names, vec![UNASSIGNED_SUPPLIER, "Acme"]);
        assert_eq!(r.items[0].unit.as_deref(), Some("pza"));
        assert!(r.items[1].unit.is_none());
        assert_eq!(r.pricing.total, dec!(14500));
    }

    #[test]
    fn unknown_requisition_status_is_parse_error() {
        let json = r#"{"folio":"REQ-1","equipo_nombre":"X","estado":"Perdida",
            "created_at":"2024-03-04","items":[]}"#;
        assert!(matches!(parse_requisition(json), Err(CotizaError::Parse(_))));
    }

    #[test]
    fn suppliers_blank_fields_become_none() {
        let json = r#"[
            {"id":1,"razon_social":"Aceros Levinson SA","contacto_nombre":"Jorge","correo":"","whatsapp":"6181234567"},
            {"id":2,"razon_social":"Maposa","contacto_nombre":null,"correo":"ventas@maposa.mx","whatsapp":null}
        ]"#;
        let s = parse_suppliers(json).unwrap();
        assert_eq!(s.len(), 2);
        assert!(s[0].email.is_none());
        assert_eq!(s[0].whatsapp.as_deref(), Some("6181234567"));
        assert_eq!(s[1].email.as_deref(), Some("ventas@maposa.mx"));
    }

    #[test]
    fn supplier_without_name_is_rejected() {
        let json = r#"[{"id":1,"razon_social":"  "}]"#;
        assert!(parse_suppliers(json).is_err());
    }

    #[test]
    fn catalog_maps_equipment() {
        let json = r#"[{"id":7,"codigo":"QM-1020","nombre":"Quebradora de Quijada","marca":"Durango",
            "modelo":"1020","categoria":"Trituración","precio_lista":"328900","precio_minimo":"296010",
            "precio_costo":null,"potencia_motor":"75 HP","capacidad":"","dimensiones":null,"peso":"8 ton"}]"#;
        let c = parse_catalog(json).unwrap();
        assert_eq!(c[0].code, "QM-1020");
        assert_eq!(c[0].quotation_description(), "Quebradora de Quijada - Durango 1020");
        assert!(c[0].capacity.is_none());
        assert_eq!(c[0].minimum_price, dec!(296010));
    }

    #[test]
    fn catalog_rejects_negative_prices() {
        let json = r#"[{"codigo":"X","nombre":"X","precio_lista":"-1","precio_minimo":"0"}]"#;
        assert!(matches!(parse_catalog(json), Err(CotizaError::InvalidInput(_))));
    }

    #[test]
    fn sales_default_to_automatic_authorization() {
        let json = r#"[{"id":1,"equipo_id":7,"vendedor":"Luis","cliente_nombre":"Agregados SA",
            "precio_venta":"300000","descuento_monto":"28900","descuento_porcentaje":"8.79",
            "forma_pago":"Efectivo","fecha_venta":"2024-05-02T16:00:00.000Z","numero_serie":"DUR-1020-2024-0001"}]"#;
        let s = parse_sales(json).unwrap();
        assert_eq!(s[0].authorized_by, Authorization::Automatic);
        assert_eq!(s[0].payment_method, Some(PaymentMethod::Cash));
        assert_eq!(s[0].sale_date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn quotation_request_uses_backend_names() {
        let q = parse_quotation(QUOTATION).unwrap();
        let body: serde_json::Value = serde_json::from_str(&to_quotation_request(&q).unwrap()).unwrap();
        assert_eq!(body["folio"], "COT-2024-015");
        assert_eq!(body["incluye_iva"], true);
        assert_eq!(amount(&body["total"]), dec!(10962));
        assert_eq!(amount(&body["iva"]), dec!(1512));
        assert_eq!(body["items"][0]["descripcion"], "Motor 5HP");
    }

    #[test]
    fn requisition_request_carries_status_label() {
        let json = r#"{"folio":"REQ-2024-004","equipo_nombre":"Criba","created_at":"2024-03-04",
            "items":[{"componente":"Malla","proveedor_nombre":"Herver","cantidad":3,
            "unidad":"m2","precio_unitario":"100.005","tiene_iva":false}]}"#;
        let r = parse_requisition(json).unwrap();
        let body: serde_json::Value =
            serde_json::from_str(&to_requisition_request(&r).unwrap()).unwrap();
        assert_eq!(body["estado"], "Pendiente");
        assert_eq!(amount(&body["total"]), dec!(300.02));
        assert_eq!(body["items"][0]["proveedor_nombre"], "Herver");
    }

    #[test]
    fn date_formats() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(parse_date("2024-03-04").unwrap(), d);
        assert_eq!(parse_date("2024-03-04T23:10:00-06:00").unwrap(), d);
        assert_eq!(parse_date("2024-03-04 10:00:00").unwrap(), d);
        assert!(matches!(parse_date("04/03/2024"), Err(CotizaError::Parse(_))));
        assert!(parse_date("").is_err());
    }
}
