use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use platekit::{
    init_logging, Config, EditorSession, JsonDirectorySink, MaterialCatalog, BUILD_DATE, VERSION,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "platekit")]
#[command(about = "Quote and submit custom plate orders from saved editing sessions")]
struct Cmd {
    /// Config file (JSON or TOML); defaults to the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Material catalog JSON, as served by the catalog endpoint
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print measurements, validation issues and the price breakdown
    Quote { session: PathBuf },
    /// Validate the session and write the order into a directory
    Submit { session: PathBuf, out: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let cmd = Cmd::parse();
    info!("platekit {} (built {})", VERSION, BUILD_DATE);

    let config = match &cmd.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_or_default()?,
    };
    let catalog = load_catalog(cmd.catalog.as_deref())?;

    match cmd.action {
        Action::Quote { session } => quote(&session, config, &catalog),
        Action::Submit { session, out } => submit(&session, &out, config, &catalog).await,
    }
}

fn load_catalog(path: Option<&Path>) -> Result<MaterialCatalog> {
    let Some(path) = path else {
        return Ok(MaterialCatalog::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    MaterialCatalog::from_json(&json).context("Failed to parse material catalog")
}

fn quote(path: &Path, config: Config, catalog: &MaterialCatalog) -> Result<()> {
    let session = EditorSession::load_from_file(path, config)?;
    let measurements = session.measurements();
    println!("Area:      {:.4} m²", measurements.area_m2);
    println!("Perimeter: {:.3} m", measurements.perimeter_m);
    println!("Holes:     {}", session.document().holes.len());

    let report = session.validate();
    if report.is_valid() {
        println!("\nReady to order");
    } else {
        println!("\nIssues:");
        for message in report.messages() {
            println!("  - {}", message);
        }
    }

    let currency = session.config().pricing.currency.clone();
    let breakdown = session.quote(catalog)?;
    println!("\nPrice:");
    for line in &breakdown.lines {
        println!(
            "  {:<28} {:>10}  {}",
            line.label,
            format!("{}{:.2}", currency, line.amount),
            line.detail
        );
    }
    println!("  {:<28} {:>10}", "Subtotal", format!("{}{:.2}", currency, breakdown.subtotal));
    if breakdown.minimum_applied {
        println!("  (minimum order price applied)");
    }
    println!("  {:<28} {:>10}", "Total", format!("{}{:.2}", currency, breakdown.final_total));
    Ok(())
}

async fn submit(path: &Path, out: &Path, config: Config, catalog: &MaterialCatalog) -> Result<()> {
    let session = EditorSession::load_from_file(path, config)?;
    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create order directory {}", out.display()))?;
    let sink = JsonDirectorySink::new(out);
    let id = session.submit_order(&sink, catalog).await?;
    println!("Order {} written to {}", id, sink.order_path(&id).display());
    Ok(())
}
