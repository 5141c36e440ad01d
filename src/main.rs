use anyhow::{Context, Result};
use std::env;
use std::fs;

use wealth_compass::{render_report, snapshot_from_store, RecordStore, SqliteStore, StorageKeys};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("import") => run_import(&args[2..])?,
        Some("report") => run_report()?,
        Some("json") => run_json()?,
        _ => run_ui_mode()?,
    }

    Ok(())
}

fn db_path() -> String {
    env::var("COMPASS_DB").unwrap_or_else(|_| "compass.db".to_string())
}

/// Seed the store from raw survey JSON files:
///   wealth-compass import basic.json [design.json]
fn run_import(files: &[String]) -> Result<()> {
    println!("🗄️  Importing survey records → {}", db_path());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if files.is_empty() {
        anyhow::bail!("Usage: wealth-compass import <basic.json> [design.json]");
    }

    let store = SqliteStore::open(db_path())?;
    let keys = StorageKeys::default();

    let basic = fs::read_to_string(&files[0])
        .with_context(|| format!("Failed to read {}", files[0]))?;
    if serde_json::from_str::<serde_json::Value>(&basic).is_err() {
        println!("⚠️  {} is not valid JSON; stored anyway, loader will skip it", files[0]);
    }
    store.write(&keys.basic_final, &basic)?;
    println!("✓ {} → '{}'", files[0], keys.basic_final);

    if let Some(design_file) = files.get(1) {
        let design = fs::read_to_string(design_file)
            .with_context(|| format!("Failed to read {}", design_file))?;
        if serde_json::from_str::<serde_json::Value>(&design).is_err() {
            println!("⚠️  {} is not valid JSON; stored anyway, loader will skip it", design_file);
        }
        store.write(&keys.design, &design)?;
        println!("✓ {} → '{}'", design_file, keys.design);
    }

    println!("\n✅ Import complete ({} records in store)", store.count()?);
    println!("   Run: wealth-compass report");

    Ok(())
}

fn run_report() -> Result<()> {
    let store = SqliteStore::open(db_path())?;
    let snapshot = snapshot_from_store(&store, &StorageKeys::default());

    print!("{}", render_report(&snapshot));
    Ok(())
}

fn run_json() -> Result<()> {
    let store = SqliteStore::open(db_path())?;
    let snapshot = snapshot_from_store(&store, &StorageKeys::default());

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    use std::path::Path;
    use wealth_compass::ui;

    let path = db_path();
    if !Path::new(&path).exists() {
        eprintln!("❌ Store not found: {}", path);
        eprintln!("   Run: wealth-compass import <basic.json> [design.json]");
        eprintln!("   to seed the survey records first.");
        std::process::exit(1);
    }

    let store = SqliteStore::open(&path)?;
    let keys = StorageKeys::default();

    println!("📊 Computing snapshot...");
    let snapshot = snapshot_from_store(&store, &keys);
    println!("✓ Diagnosis ready. Starting dashboard... (Press 'q' to quit)\n");

    let mut app = ui::App::new(snapshot);
    ui::run_ui(&mut app, || snapshot_from_store(&store, &keys))?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ Dashboard mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: wealth-compass report");
    std::process::exit(1);
}
