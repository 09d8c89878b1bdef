//! CLI runner - executes commands

use crate::cancel::deadline;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::DcTrackClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::pagination::Filter;
use crate::record::Item;
use crate::summary::{vendor_distribution, PowerSummary, VendorShare};
use serde::Serialize;
use serde_json::json;
use std::fmt::Write as _;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command until it finishes, fails, or `cancel` fires
    pub async fn run(&self, cancel: &CancellationToken) -> Result<()> {
        let config = self.load_config()?;
        debug!("Using config: {config:?}");

        let client = DcTrackClient::new(config)?;
        let cancel = deadline(cancel, Duration::from_secs(self.cli.timeout));

        match &self.cli.command {
            Commands::Check => self.check(&client, &cancel).await,
            Commands::Search { query, limit } => {
                self.search(&client, query, *limit, &cancel).await
            }
            Commands::List { location } => self.list(&client, location, &cancel).await,
            Commands::Item { id } => self.item(&client, id, &cancel).await,
            Commands::Power { location } => self.power(&client, location, &cancel).await,
        }
    }

    /// Load config from `--config`, else the environment
    fn load_config(&self) -> Result<ClientConfig> {
        match &self.cli.config {
            Some(path) => ClientConfig::from_file(path),
            None => ClientConfig::from_env(),
        }
    }

    async fn check(&self, client: &DcTrackClient, cancel: &CancellationToken) -> Result<()> {
        let token = client.login(cancel).await?;
        let url = &client.config().url;
        match self.cli.format {
            OutputFormat::Json => print_json(&json!({
                "status": "SUCCEEDED",
                "url": url,
                "token_length": token.len(),
            })),
            OutputFormat::Text => {
                println!("Connected to {url} ({} byte token)", token.len());
                Ok(())
            }
        }
    }

    async fn search(
        &self,
        client: &DcTrackClient,
        query: &str,
        limit: usize,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let items = client.search_items(query, cancel).await?;
        match self.cli.format {
            OutputFormat::Json => print_json(&items),
            OutputFormat::Text => {
                print!("{}", render_search(query, &items, limit));
                Ok(())
            }
        }
    }

    async fn list(
        &self,
        client: &DcTrackClient,
        location: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let items = client
            .get_items_with_params(&Filter::by_location(location), cancel)
            .await?;
        let vendors = vendor_distribution(&items);
        let power = PowerSummary::from_items(location, &items);

        match self.cli.format {
            OutputFormat::Json => print_json(&json!({
                "location": location,
                "count": items.len(),
                "vendors": vendors,
                "power": power,
            })),
            OutputFormat::Text => {
                print!("{}", render_list(location, &vendors, &power));
                Ok(())
            }
        }
    }

    async fn item(&self, client: &DcTrackClient, id: &str, cancel: &CancellationToken) -> Result<()> {
        let item = client.get_item_by_id(id, cancel).await?;
        match self.cli.format {
            OutputFormat::Json => print_json(&item),
            OutputFormat::Text => {
                print!("{}", render_item_details(&item));
                Ok(())
            }
        }
    }

    async fn power(
        &self,
        client: &DcTrackClient,
        location: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let items = client
            .get_items_with_params(&Filter::by_location(location), cancel)
            .await?;
        let summary = PowerSummary::from_items(location, &items);

        match self.cli.format {
            OutputFormat::Json => print_json(&summary),
            OutputFormat::Text => {
                print!("{}", render_power(&summary));
                Ok(())
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{text}");
    Ok(())
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

fn render_search(query: &str, items: &[Item], limit: usize) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Search results for: {query}"));

    if items.is_empty() {
        out.push_str("No items found\n");
        return out;
    }

    let _ = writeln!(out, "Found {} items:\n", items.len());
    let shown = if limit == 0 { items.len() } else { limit };
    for item in items.iter().take(shown) {
        out.push_str(&render_item_summary(item));
    }
    if items.len() > shown {
        let _ = writeln!(out, "... and {} more items", items.len() - shown);
    }
    out
}

fn render_item_summary(item: &Item) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID: {}", item.id);
    let _ = writeln!(out, "Name: {}", item.name);
    let _ = writeln!(out, "Location: {}", item.location);
    let _ = writeln!(out, "Make/Model: {} {}", item.make, item.model);
    if item.has_power() {
        let _ = writeln!(out, "Power: {:.0} W", item.original_power);
    }
    out.push('\n');
    out
}

fn render_item_details(item: &Item) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Item {}", item.id));

    let _ = writeln!(out, "Name: {}", item.name);
    let _ = writeln!(out, "Status: {}", item.status);
    let _ = writeln!(out, "Class: {} / {}", item.item_class, item.subclass);
    let _ = writeln!(out, "Location: {}", item.location);
    let _ = writeln!(out, "Cabinet: {}", item.cabinet);
    let _ = writeln!(out, "Position: {} (Height: {} RU)", item.position, item.height);
    let _ = writeln!(out, "Make/Model: {} {}", item.make, item.model);
    let _ = writeln!(out, "Serial Number: {}", item.serial_number);

    if item.has_power() {
        let _ = writeln!(out, "Power: {:.0} W", item.original_power);
    }
    let optional = [
        ("Asset Tag", &item.asset_tag),
        ("Primary Contact", &item.primary_contact),
        ("Admin Team", &item.admin_team),
    ];
    for (label, value) in optional {
        if !value.is_empty() {
            let _ = writeln!(out, "{label}: {value}");
        }
    }
    if let Some(date) = item.install_date {
        let _ = writeln!(out, "Install Date: {}", date.format("%Y-%m-%d"));
    }
    if let Some(date) = item.contract_end_date {
        let _ = writeln!(out, "Contract End: {}", date.format("%Y-%m-%d"));
    }
    out
}

fn render_list(location: &str, vendors: &[VendorShare], power: &PowerSummary) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Items in location: {location}"));

    if power.asset_count == 0 {
        let _ = writeln!(out, "No items found in location: {location}");
        return out;
    }

    let _ = writeln!(out, "Found {} items\n", power.asset_count);
    out.push_str("Vendor Distribution:\n");
    for share in vendors {
        let _ = writeln!(
            out,
            "  {}: {} assets ({:.1}%)",
            share.make, share.count, share.percentage
        );
    }
    let _ = writeln!(out, "\nTotal Power: {:.2} kW", power.total_kw());
    let _ = writeln!(out, "Average Power per Asset: {:.2} W", power.density);
    out
}

fn render_power(summary: &PowerSummary) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        &format!("Power analysis for location: {}", summary.location),
    );

    if summary.asset_count == 0 {
        let _ = writeln!(out, "No items found in location: {}", summary.location);
        return out;
    }

    let _ = writeln!(out, "Total Assets: {}", summary.asset_count);
    let _ = writeln!(out, "Assets with Power Data: {}", summary.powered_count);
    let _ = writeln!(out, "Total Power: {:.2} kW", summary.total_kw());
    let _ = writeln!(out, "Average Power: {:.2} W", summary.average_power);
    let _ = writeln!(out, "Maximum Power: {:.2} W", summary.max_power);
    if let Some(min) = summary.min_power {
        let _ = writeln!(out, "Minimum Power: {min:.2} W");
    }
    let _ = writeln!(out, "Power Density: {:.2} W/asset", summary.density);
    out
}
