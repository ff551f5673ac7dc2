use std::io;
use std::path::Path;

use clap::Parser;
use tracing::{debug, info, warn};

use fuel_planner_rs::cli::{Cli, Command, OutputFormat, ReportArgs};
use fuel_planner_rs::config::PlannerConfig;
use fuel_planner_rs::error::{FuelError, Result};
use fuel_planner_rs::interface::{
    display_bars, display_catalog, prompt_product, prompt_rates, prompt_selection_action,
    prompt_yes_no, render_bar, write_csv, write_json, SelectionAction,
};
use fuel_planner_rs::planner::{derive_targets, item_label, plan_bars};
use fuel_planner_rs::state::{parse_entry, Catalog, Selection};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };
    if let Some(policy) = cli.color_policy {
        config.color_policy = policy;
    }
    debug!(?config, "planner config");

    let command = cli.command.unwrap_or_default();

    match command {
        Command::Plan => cmd_plan(&cli.data_dir, &config),
        Command::Catalog { search } => cmd_catalog(&cli.data_dir, search.as_deref()),
        Command::Report(args) => cmd_report(&cli.data_dir, &config, &args),
    }
}

/// Load the catalog, or explain why there is nothing to plan with.
fn load_catalog(data_dir: &str) -> Result<Option<Catalog>> {
    let path = Path::new(data_dir);

    if !path.is_dir() {
        eprintln!("Data directory not found: {}", data_dir);
        eprintln!("Expected drink-mixes.json, drinks.json, gels.json, and caps.json inside it.");
        return Ok(None);
    }

    let catalog = Catalog::load_dir(path)?;
    if catalog.is_empty() {
        println!("No products found in {}.", data_dir);
        return Ok(None);
    }

    Ok(Some(catalog))
}

/// Interactive planning session.
fn cmd_plan(data_dir: &str, config: &PlannerConfig) -> Result<()> {
    let Some(catalog) = load_catalog(data_dir)? else {
        return Ok(());
    };

    println!("Loaded {} products", catalog.len());
    println!();

    let rates = prompt_rates(&config.default_rates(), &config.ranges)?;
    info!(?rates, "session rates");

    let mut selection = Selection::new();
    display_bars(
        &plan_bars(catalog.products(), &selection, &rates, config.color_policy),
        &rates,
    );

    while let Some(key) = prompt_product(&catalog)? {
        let label = catalog
            .get(&key)
            .map(item_label)
            .ok_or_else(|| FuelError::ProductNotFound(key.clone()))?;

        match prompt_selection_action(&label, selection.count(&key))? {
            SelectionAction::Add => selection.add(&key),
            SelectionAction::Remove => selection.remove(&key),
            SelectionAction::Set(count) => selection.set(&key, count),
            SelectionAction::Cancel => continue,
        }
        debug!(key = %key, count = selection.count(&key), "selection changed");

        display_bars(
            &plan_bars(catalog.products(), &selection, &rates, config.color_policy),
            &rates,
        );
    }

    println!("--- Summary ---");
    println!("Products selected: {}", selection.entries().len());
    println!("Total items: {}", selection.total_items());
    for (key, count) in selection.entries() {
        let label = catalog.get(key).map(item_label).unwrap_or_else(|| key.to_string());
        println!("  {:>3} x {}", count, label);
    }
    println!();

    if !selection.is_empty() && prompt_yes_no("Print the plan as JSON?", false)? {
        let bars = plan_bars(catalog.products(), &selection, &rates, config.color_policy);
        write_json(io::stdout().lock(), &bars, &rates, &derive_targets(&rates))?;
        println!();
    }

    Ok(())
}

/// List catalog products, optionally filtered by a search query.
fn cmd_catalog(data_dir: &str, search: Option<&str>) -> Result<()> {
    let Some(catalog) = load_catalog(data_dir)? else {
        return Ok(());
    };

    match search {
        Some(query) => {
            let hits = catalog.search(query);
            display_catalog(&hits, &format!("Matches for '{}'", query));
        }
        None => {
            let all: Vec<_> = catalog.products().iter().collect();
            display_catalog(&all, "Catalog");
        }
    }

    Ok(())
}

/// Non-interactive report for a fixed selection.
fn cmd_report(data_dir: &str, config: &PlannerConfig, args: &ReportArgs) -> Result<()> {
    let Some(catalog) = load_catalog(data_dir)? else {
        return Ok(());
    };

    let mut rates = config.default_rates();
    let ranges = &config.ranges;
    if let Some(raw) = &args.carbs_per_hour {
        rates.carbs_per_hour = ranges.carbs_per_hour.parse(raw);
    }
    if let Some(raw) = &args.sodium_per_liter {
        rates.sodium_per_liter = ranges.sodium_per_liter.parse(raw);
    }
    if let Some(raw) = &args.fluid_per_hour {
        rates.fluid_per_hour = ranges.fluid_per_hour.parse(raw);
    }
    if let Some(raw) = &args.duration {
        rates.duration_minutes = ranges.duration_minutes.parse(raw);
    }

    let selection = build_selection(&catalog, &args.selections)?;
    let bars = plan_bars(catalog.products(), &selection, &rates, config.color_policy);

    match args.format {
        OutputFormat::Text => {
            for bar in &bars {
                print!("{}", render_bar(bar));
                println!();
            }
        }
        OutputFormat::Json => {
            write_json(io::stdout().lock(), &bars, &rates, &derive_targets(&rates))?;
            println!();
        }
        OutputFormat::Csv => write_csv(io::stdout().lock(), &bars)?,
    }

    Ok(())
}

/// Turn `KEY=COUNT` arguments into a selection, rejecting unknown keys.
fn build_selection(catalog: &Catalog, entries: &[String]) -> Result<Selection> {
    let mut selection = Selection::new();

    for entry in entries {
        let (key, count) = parse_entry(entry)?;
        if !catalog.contains_key(&key) {
            return Err(FuelError::ProductNotFound(key));
        }
        if selection.count(&key) > 0 {
            warn!("'{}' selected more than once, using the last count", key);
        }
        selection.set(&key, count);
    }

    Ok(selection)
}
