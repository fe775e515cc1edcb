#![cfg(feature = "requisition")]

use chrono::NaiveDate;
use cotiza::core::*;
use cotiza::requisition::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

fn crusher_parts() -> RequisitionBuilder {
    RequisitionBuilder::new("REQ-2024-001", date())
        .project("Quebradora 1020")
        .add_item(
            LineItemBuilder::new("Placa de Acero 4140 1\"", dec!(2), dec!(4800))
                .tax(true)
                .unit("pza")
                .build(),
        )
        .add_item(
            LineItemBuilder::new("Motor 75HP", dec!(1), dec!(86500))
                .tax(true)
                .supplier("Motores del Bajío")
                .build(),
        )
        .add_item(LineItemBuilder::new("Polea 12\"", dec!(2), dec!(1350)).tax(true).build())
        .add_item(LineItemBuilder::new("Chumacera 3\"", dec!(4), dec!(890)).tax(true).build())
        .add_item(LineItemBuilder::new("Soldadura 7018", dec!(20), dec!(65)).unit("kg").build())
        .add_item(LineItemBuilder::new("Banda B-52", dec!(3), dec!(215)).tax(true).build())
}

fn summary(requisition: &Requisition) -> String {
    let mut lines = vec![format!("{} {}", requisition.folio, requisition.project_name)];
    for group in &requisition.groups {
        lines.push(format!(
            "{}: {} items, {:.2}",
            group.supplier_name,
            group.items.len(),
            group.group_subtotal
        ));
    }
    lines.push(format!("total {:.2}", requisition.pricing.total));
    lines.join("\n")
}

#[test]
fn grouped_requisition_summary() {
    let requisition = crusher_parts().build().unwrap();
    insta::assert_snapshot!(summary(&requisition), @r"
    REQ-2024-001 Quebradora 1020
    Levinson: 1 items, 11136.00
    Motores del Bajío: 1 items, 100340.00
    Maposa: 2 items, 3880.20
    Herver: 1 items, 4129.60
    Unassigned: 1 items, 1300.00
    total 120785.80
    ");
}

#[test]
fn requisition_pricing_is_per_line() {
    let r = crusher_parts().build().unwrap();
    assert_eq!(r.pricing.subtotal, dec!(104305));
    assert_eq!(r.pricing.tax_amount, dec!(16480.8));
    assert_eq!(r.pricing.discount_amount, dec!(0));
    assert_eq!(r.pricing.advance_amount, dec!(0));
    let grouped: Decimal = r.groups.iter().map(|g| g.group_subtotal).sum();
    assert_eq!(grouped, r.pricing.total);
}

#[test]
fn lines_for_a_supplier_keep_their_order() {
    let r = crusher_parts().build().unwrap();
    let maposa: Vec<_> = r.items_for("Maposa").iter().map(|i| i.description.as_str()).collect();
    assert_eq!(maposa, vec!["Polea 12\"", "Banda B-52"]);
    assert_eq!(r.items_for(UNASSIGNED_SUPPLIER)[0].unit.as_deref(), Some("kg"));
}

#[test]
fn concrete_grouping_scenario() {
    let items = vec![
        LineItemBuilder::new("Motor 5HP", dec!(2), dec!(5000)).tax(true).supplier("Acme Steel").build(),
        LineItemBuilder::new("Tornillos", dec!(100), dec!(5)).supplier("Local Hardware").build(),
        LineItemBuilder::new("Placa", dec!(1), dec!(2500)).tax(false).supplier("Acme Steel").build(),
    ];
    let groups = group_by_supplier(&items).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].supplier_name, "Acme Steel");
    assert_eq!(groups[0].items.len(), 2);
    assert_eq!(groups[0].group_subtotal, dec!(14100));
    assert_eq!(groups[1].group_subtotal, dec!(500));
    assert!(find_group(&groups, "acme steel").is_none());
}

#[test]
fn near_duplicate_names_form_separate_groups() {
    let items = vec![
        LineItemBuilder::new("Chumacera", dec!(1), dec!(100)).supplier("Herver").build(),
        LineItemBuilder::new("Rodamiento", dec!(1), dec!(100)).supplier("Herver ").build(),
        LineItemBuilder::new("Retén", dec!(1), dec!(100)).supplier("HERVER").build(),
    ];
    assert_eq!(group_by_supplier(&items).unwrap().len(), 3);
}

#[test]
fn default_rules() {
    assert_eq!(assign_default_supplier("Placa de Acero 4140", ""), "Levinson");
    assert_eq!(assign_default_supplier("Placa de Acero 4140", "Aceros del Norte"), "Aceros del Norte");
    assert_eq!(assign_default_supplier("Tornillo 1/2", ""), "");
    assert_eq!(assign_default_supplier("Tornillo 1/2", "  "), "  ");
    assert_eq!(suggest_supplier("BANDA en V"), Some("Maposa"));
    // First rule wins: steel beats motor.
    assert_eq!(suggest_supplier("Base de acero para motor"), Some("Levinson"));
    assert_eq!(suggest_supplier("Motorreductor"), Some("HAB"));
}

#[test]
fn custom_rules_from_config() {
    let rules: SupplierRules = serde_json::from_str(
        r#"[
            {"keywords": ["Tornillo", "tuerca"], "supplier": "Ferretería Central"},
            {"keywords": ["acero"], "supplier": "Aceros del Norte"}
        ]"#,
    )
    .unwrap();
    assert_eq!(rules.rules().len(), 2);

    let r = RequisitionBuilder::new("REQ-2024-002", date())
        .project("Criba 5x12")
        .rules(rules)
        .add_item(LineItemBuilder::new("TORNILLO 3/8", dec!(50), dec!(3)).build())
        .add_item(LineItemBuilder::new("Placa de acero", dec!(1), dec!(900)).build())
        .add_item(LineItemBuilder::new("Motor 10HP", dec!(1), dec!(15000)).build())
        .build()
        .unwrap();

    let names: Vec<_> = r.supplier_names().collect();
    assert_eq!(names, vec!["Ferretería Central", "Aceros del Norte", UNASSIGNED_SUPPLIER]);
}

#[test]
fn status_and_serialization() {
    let r = crusher_parts().status(RequisitionStatus::Sent).build().unwrap();
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["status"], "Enviada");
    assert_eq!(json["groups"][0]["supplier_name"], "Levinson");

    let back: Requisition = serde_json::from_value(json).unwrap();
    assert_eq!(back.groups, r.groups);
    assert_eq!(back.status, RequisitionStatus::Sent);
}

#[test]
fn empty_requisition_is_rejected() {
    let err = RequisitionBuilder::new("REQ-2024-003", date())
        .project("Criba")
        .build()
        .unwrap_err();
    assert!(matches!(err, CotizaError::Builder(_)));
}

#[test]
fn validation_reports_rules() {
    let mut r = crusher_parts().build().unwrap();
    r.project_name.clear();
    r.groups.pop();
    let rules: Vec<_> = validate_requisition(&r).into_iter().filter_map(|e| e.rule).collect();
    assert!(rules.contains(&"REQ-02".to_string()));
    assert!(rules.contains(&"REQ-04".to_string()));
}

#[test]
fn folios_feed_the_builder() {
    let mut folios = FolioSequence::requisitions(2024);
    let first = RequisitionBuilder::new(folios.next_folio(), date())
        .project("Criba")
        .add_item(LineItemBuilder::new("Malla", dec!(1), dec!(100)).build())
        .build()
        .unwrap();
    assert_eq!(first.folio, "REQ-2024-001");
    assert_eq!(folios.peek(), "REQ-2024-002");
}
