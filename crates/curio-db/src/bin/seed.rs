//! # Seed Data Generator
//!
//! Populates a catalog with sample collectibles for development.
//!
//! ## Usage
//! ```bash
//! # Generate 60 items (default)
//! cargo run -p curio-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p curio-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p curio-db --bin seed -- --db ./data/curio.db
//! ```
//!
//! Every item goes through the same form validation as a user submission.
//! Roughly one in ten items is a favorite and one in fifteen is a draft.

use chrono::{Duration, Utc};
use curio_core::form::{ItemForm, PriceField, SaveMode};
use curio_core::{ItemStatus, ItemType, Rarity};
use curio_db::{Catalog, Database, DbConfig};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// (brand, series, figures)
const LINES: &[(&str, &str, &[&str])] = &[
    (
        "POP MART",
        "The Monsters",
        &["Labubu", "Zimomo", "Tycoco", "Spooky", "Pato"],
    ),
    (
        "POP MART",
        "Skullpanda",
        &["The Ink Plum", "Warmth", "Image of Reality", "Everyday Wonderland"],
    ),
    (
        "POP MART",
        "Crybaby",
        &["Crying Again", "Sad Club", "Monster's Tears", "Powerpuff"],
    ),
    (
        "Sonny Angel",
        "Animal Series",
        &["Rabbit", "Elephant", "Frog", "Koala", "Lion", "Tiger"],
    ),
    (
        "52TOYS",
        "Sleep Elf",
        &["Night Owl", "Cloud", "Moonlight", "Starlight"],
    ),
];

const STATUSES: &[ItemStatus] = &[
    ItemStatus::Owned,
    ItemStatus::Owned,
    ItemStatus::Wishlist,
    ItemStatus::Tradeable,
    ItemStatus::Sold,
];

const RARITIES: &[Rarity] = &[
    Rarity::Common,
    Rarity::Common,
    Rarity::Common,
    Rarity::Rare,
    Rarity::Secret,
    Rarity::Limited,
];

const TAGS: &[&str] = &["favorite pose", "gift", "box damaged", "pastel", "glow"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 60;
    let mut db_path = String::from("./curio_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Curio Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of items to generate (default: 60)");
                println!("  -d, --db <PATH>    Database file path (default: ./curio_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Curio Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Items:    {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let mut catalog = Catalog::open(&db).await?;

    println!("✓ Connected to database");

    if !catalog.items().is_empty() {
        println!("⚠ Catalog already has {} items", catalog.items().len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let figures: Vec<(&str, &str, &str)> = LINES
        .iter()
        .flat_map(|(brand, series, names)| names.iter().map(move |name| (*brand, *series, *name)))
        .collect();

    let mut generated = 0;
    for seed in 0..count {
        let (brand, series, name) = figures[seed % figures.len()];
        let (form, mode) = sample_form(seed, brand, series, name)?;

        let item = catalog.save(None, form.into_payload(mode)?, mode).await?;
        if seed % 10 == 3 && !item.is_draft {
            catalog.set_favorite(&item.id, true).await?;
        }

        generated += 1;
        if generated % 25 == 0 {
            println!("  Generated {} items...", generated);
        }
    }

    info!(
        generated,
        drafts = catalog.store().draft_count(),
        "Seed complete"
    );

    println!();
    println!("✓ Generated {} items in {:?}", generated, start.elapsed());
    println!("  Drafts: {}", catalog.store().draft_count());
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,curio=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Builds the form a user would have filled in for sample item `seed`.
fn sample_form(
    seed: usize,
    brand: &str,
    series: &str,
    name: &str,
) -> Result<(ItemForm, SaveMode), Box<dyn std::error::Error>> {
    let acquired = Utc::now().date_naive() - Duration::days((seed * 7 % 900) as i64);
    let status = STATUSES[seed % STATUSES.len()];

    let mut form = ItemForm::blank(acquired);
    form.name = if seed < 40 {
        name.to_string()
    } else {
        format!("{} #{}", name, seed / 40 + 1)
    };
    form.brand = brand.to_string();
    form.series = series.to_string();
    form.status = status;
    form.rarity = RARITIES[seed % RARITIES.len()];
    form.item_type = if seed % 9 == 0 {
        ItemType::BlindBoxSet
    } else {
        ItemType::BlindBoxSingle
    };
    if form.shows_total_boxes() {
        form.set_total_boxes_input(if seed % 9 == 0 { "12" } else { "" })?;
    }

    let price = format!("{}.{:02}", 10 + seed % 20, seed * 13 % 100);
    if form.shows_purchase_price() {
        form.set_price_input(PriceField::Purchase, &price)?;
    }
    if form.shows_sold_price() {
        form.set_price_input(PriceField::Sold, &format!("{}.00", 25 + seed % 30))?;
    }
    if form.shows_estimated_value() {
        form.set_price_input(PriceField::Estimated, &format!("{}.50", 20 + seed % 40))?;
    }

    for tag in TAGS.iter().skip(seed % TAGS.len()).take(seed % 3) {
        form.add_tag(tag)?;
    }

    let mode = if seed % 15 == 14 {
        form.name.clear();
        SaveMode::Draft
    } else {
        SaveMode::Final
    };

    Ok((form, mode))
}
