use chrono::NaiveDate;
use cotiza::core::*;
use rust_decimal_macros::dec;

fn main() {
    let issue_date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let mut folios = FolioSequence::starting_at(QUOTATION_PREFIX, 2024, 15);

    let crusher = Equipment {
        id: Some(7),
        code: "QM-1020".into(),
        name: "Quebradora de Quijada".into(),
        brand: Some("Durango".into()),
        model: Some("1020".into()),
        category: Some("Trituración".into()),
        list_price: dec!(328900),
        minimum_price: dec!(296010),
        cost_price: None,
        motor_power: Some("75 HP".into()),
        capacity: Some("80 ton/h".into()),
        dimensions: None,
        weight: Some("8 ton".into()),
    };

    let quotation = QuotationBuilder::new(folios.next_folio(), issue_date)
        .seller("Ana Torres")
        .client(
            ClientBuilder::new("Ing. Roberto Salas")
                .company("Minera del Norte SA de CV")
                .phone("618 123 4567")
                .email("compras@mineranorte.mx")
                .build(),
        )
        .add_equipment(&crusher, dec!(1))
        .add_item(LineItemBuilder::new("Tolva de alimentación 2 m3", dec!(1), dec!(78900)).build())
        .add_item(LineItemBuilder::new("Instalación y puesta en marcha", dec!(1), dec!(25000)).build())
        .discount(dec!(5))
        .discount_reason("Cliente frecuente")
        .notes("Precios LAB planta Durango")
        .build()
        .expect("quotation should be valid");

    let pricing = quotation.pricing.rounded();
    println!("Cotización: {}", quotation.folio);
    println!("Fecha:      {}", quotation.issue_date);
    if let Some(until) = quotation.valid_until() {
        println!("Vigencia:   {until}");
    }
    println!("Cliente:    {}", quotation.client.name);
    println!("---");
    for item in &quotation.items {
        println!(
            "  {} x {} @ {} = {}",
            item.quantity,
            item.description,
            item.unit_price,
            round_currency(item.quantity * item.unit_price)
        );
    }
    println!("---");
    println!("Subtotal:   {} {}", pricing.subtotal, quotation.currency_code);
    println!("Descuento:  {} ({}%)", pricing.discount_amount, pricing.discount_percent);
    println!("IVA:        {}", pricing.tax_amount);
    println!("Total:      {} {}", pricing.total, quotation.currency_code);
    println!("Anticipo:   {} ({}%)", pricing.advance_amount, pricing.advance_percent);
    println!("Saldo:      {}", pricing.balance_due());
    println!("Siguiente folio: {}", folios.peek());
}
