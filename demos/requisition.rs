use chrono::NaiveDate;
use cotiza::core::*;
use cotiza::requisition::*;
use rust_decimal_macros::dec;

fn main() {
    let mut folios = FolioSequence::requisitions(2024);

    let requisition = RequisitionBuilder::new(folios.next_folio(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
        .project("Quebradora 1020")
        .add_item(LineItemBuilder::new("Placa de Acero 4140 1\"", dec!(2), dec!(4800)).tax(true).unit("pza").build())
        .add_item(LineItemBuilder::new("Motor 75HP", dec!(1), dec!(86500)).tax(true).supplier("Motores del Bajío").build())
        .add_item(LineItemBuilder::new("Polea 12\"", dec!(2), dec!(1350)).tax(true).build())
        .add_item(LineItemBuilder::new("Chumacera 3\"", dec!(4), dec!(890)).tax(true).build())
        .add_item(LineItemBuilder::new("Soldadura 7018", dec!(20), dec!(65)).unit("kg").build())
        .build()
        .expect("requisition should be valid");

    println!("Requisición: {} ({})", requisition.folio, requisition.project_name);
    for group in &requisition.groups {
        println!("{}:", group.supplier_name);
        for item in &group.items {
            println!(
                "  {} x {}{} = {}",
                item.quantity,
                item.description,
                if item.has_tax { " (+IVA)" } else { "" },
                round_currency(compute_line_total(item).expect("line total"))
            );
        }
        println!("  Subtotal proveedor: {}", round_currency(group.group_subtotal));
    }
    println!("---");
    println!("Total: {}", round_currency(requisition.pricing.total));
}
