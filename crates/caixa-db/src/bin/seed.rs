//! # Seed Data Generator
//!
//! Populates the database with a sample shift for development: opens a
//! morning shift, records a plausible run of sales and a mid-shift sangria,
//! then closes the shift and prints the conference report.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p caixa-db --bin seed
//!
//! # Specify database path
//! cargo run -p caixa-db --bin seed -- --db ./data/caixa.db
//!
//! # Leave the shift open instead of closing it
//! cargo run -p caixa-db --bin seed -- --open
//! ```

use std::env;

use caixa_core::{Money, PaymentMethod, ShiftKind};
use caixa_db::{Database, DbConfig};

/// Sample sales: amount in centavos, payment method, note.
const SALES: &[(i64, PaymentMethod, Option<&str>)] = &[
    (2_550, PaymentMethod::Cash, Some("balcão")),
    (4_800, PaymentMethod::Pix, None),
    (12_990, PaymentMethod::Credit, Some("mesa 4")),
    (3_200, PaymentMethod::Debit, None),
    (1_500, PaymentMethod::Cash, Some("café e pão de queijo")),
    (8_750, PaymentMethod::MealVoucher, Some("almoço executivo")),
    (6_400, PaymentMethod::Online, Some("pedido delivery")),
    (2_000, PaymentMethod::Cash, None),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./caixa_dev.db");
    let mut leave_open = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--open" | "-o" => {
                leave_open = true;
            }
            "--help" | "-h" => {
                println!("Caixa Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./caixa_dev.db)");
                println!("  -o, --open         Leave the seeded shift open");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Caixa Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let ledger = db.ledger();

    // Refuse to stack a demo shift on top of a real open one
    if let Some(open) = ledger.current_shift().await? {
        println!("⚠ A shift is already open (operator: {})", open.operator);
        println!("  Close it first or point --db at a fresh file.");
        return Ok(());
    }

    // Open the shift with a starting float
    let shift = ledger
        .open_shift("maria", ShiftKind::Morning, 10_000)
        .await?;
    println!();
    println!(
        "Opened shift for {} with {} in the drawer",
        shift.operator,
        shift.opening_cash()
    );

    // Record the sample movements
    for &(amount, method, note) in SALES {
        ledger.record_sale(&shift.id, amount, method, note).await?;
    }
    ledger
        .record_withdrawal(&shift.id, 3_000, Some("troco para o motoboy"))
        .await?;
    println!("Recorded {} sales and 1 sangria", SALES.len());

    if !leave_open {
        ledger.close_shift(&shift.id, "maria", Some(2_000)).await?;
    }

    // Print the conference report
    let report = ledger.report(&shift.id).await?;
    let totals = &report.totals;

    println!();
    println!("Shift report");
    println!("------------");
    println!("Opening cash:     {}", shift.opening_cash());
    println!(
        "Sales:            {} ({} movements)",
        Money::from_centavos(totals.total_sales_cents),
        totals.sale_count
    );
    println!(
        "  in cash:        {}",
        Money::from_centavos(totals.cash_sales_cents)
    );
    println!(
        "  electronic:     {}",
        Money::from_centavos(totals.electronic_sales_cents)
    );
    println!(
        "Withdrawals:      {} ({} movements)",
        Money::from_centavos(totals.total_withdrawals_cents),
        totals.withdrawal_count
    );
    println!(
        "Expected in drawer: {}",
        Money::from_centavos(totals.expected_cash_cents)
    );
    println!("Net result:       {}", Money::from_centavos(totals.net_cents));
    println!();
    println!("By payment method:");
    for payment in &report.payments {
        println!(
            "  {:?}: {} ({} sales)",
            payment.method,
            Money::from_centavos(payment.amount_cents),
            payment.count
        );
    }

    println!();
    if leave_open {
        println!("✅ Seed complete - shift left open");
    } else {
        println!("✅ Seed complete - shift closed");
    }

    Ok(())
}
