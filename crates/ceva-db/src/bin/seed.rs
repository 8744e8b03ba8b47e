//! # Seed Data Generator
//!
//! Populates the database with a small fleet for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p ceva-db --bin seed
//!
//! # Specify database path
//! cargo run -p ceva-db --bin seed -- --db ./data/ceva.db
//! ```
//!
//! ## Generated Data
//! - Two locations (Matriz, Filial Norte)
//! - A handful of vehicles across categories, split between the locations
//! - One customer and one admin
//!
//! Skips everything if the database already has vehicles.

use ceva_core::validation::{
    validate_daily_rate_cents, validate_email, validate_model_year, validate_name, validate_plate,
    ValidationResult,
};
use ceva_core::{Admin, Customer, Location, User, UserIdentity, Vehicle};
use ceva_db::repository::generate_id;
use ceva_db::{Database, DbConfig};
use chrono::Utc;
use std::env;

/// (plate, make, model, year, color, daily rate in cents, category)
const FLEET: &[(&str, &str, &str, i64, &str, i64, &str)] = &[
    ("ABC-1234", "Toyota", "Corolla", 2022, "Prata", 18_000, "sedan"),
    ("BRA-2E19", "Volkswagen", "Gol", 2021, "Branco", 9_900, "economy"),
    ("CEV-0A01", "Fiat", "Mobi", 2023, "Vermelho", 8_500, "economy"),
    ("JEP-4C22", "Jeep", "Compass", 2023, "Preto", 32_000, "suv"),
    ("HYN-7F30", "Hyundai", "HB20", 2022, "Azul", 11_000, "economy"),
    ("TOY-9H88", "Toyota", "Hilux", 2021, "Cinza", 38_500, "pickup"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./ceva.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Ceva Rental Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./ceva.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Ceva Rental Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.vehicles().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} vehicles", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Locations
    let now = Utc::now();
    let mut location_ids = Vec::new();
    for (name, address) in [
        ("Matriz", "Av. Paulista, 1000 - São Paulo"),
        ("Filial Norte", "Rua Voluntários da Pátria, 450 - São Paulo"),
    ] {
        validate_name("name", name)?;
        let location = Location {
            id: generate_id(),
            name: name.to_string(),
            address: address.to_string(),
            created_at: now,
            updated_at: now,
        };
        db.locations().insert(&location).await?;
        location_ids.push(location.id);
    }
    println!("✓ Created {} locations", location_ids.len());

    // Vehicles
    let mut generated = 0;
    for (idx, &(plate, make, model, year, color, rate, category)) in FLEET.iter().enumerate() {
        if let Err(e) = check_vehicle(plate, make, model, year, rate) {
            eprintln!("Skipping {}: {}", plate, e);
            continue;
        }

        let vehicle = Vehicle {
            id: generate_id(),
            plate: plate.to_string(),
            make: make.to_string(),
            model: model.to_string(),
            year,
            color: color.to_string(),
            daily_rate_cents: rate,
            category: category.to_string(),
            description: None,
            available: true,
            featured: idx == 0,
            location_id: Some(location_ids[idx % location_ids.len()].clone()),
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = db.vehicles().insert(&vehicle).await {
            eprintln!("Failed to insert {}: {}", plate, e);
            continue;
        }
        generated += 1;
    }
    println!("✓ Created {} vehicles", generated);

    // Users
    let customer = User::Customer(Customer {
        identity: identity("Joana Silva", "joana@ceva.test", Some("+55 11 98765-4321"))?,
        driver_license: "04512345678".to_string(),
        tax_id: "123.456.789-09".to_string(),
    });
    let admin = User::Admin(Admin {
        identity: identity("Carlos Souza", "carlos@ceva.test", None)?,
        role: "manager".to_string(),
    });
    for user in [&customer, &admin] {
        db.users().insert(user).await?;
    }
    println!("✓ Created customer {} and admin {}", customer.id(), admin.id());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn check_vehicle(plate: &str, make: &str, model: &str, year: i64, rate: i64) -> ValidationResult<()> {
    validate_plate(plate)?;
    validate_name("make", make)?;
    validate_name("model", model)?;
    validate_model_year(year)?;
    validate_daily_rate_cents(rate)
}

fn identity(name: &str, email: &str, phone: Option<&str>) -> ValidationResult<UserIdentity> {
    validate_name("name", name)?;
    validate_email(email)?;

    let now = Utc::now();
    Ok(UserIdentity {
        id: generate_id(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.map(str::to_string),
        created_at: now,
        updated_at: now,
    })
}
