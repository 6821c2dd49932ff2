use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use homedeck::config::{DashboardConfig, ItemConfig};
use homedeck::core::SchemaRegistry;
use homedeck::forms::{ExistingSecrets, FormSession, SlotPanel};
use homedeck_types::{DualWidgetConfig, SlotId, WidgetConfig};
use log::warn;

/// homedeck - configuration engine for a self-hosted home server dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "homedeck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Validate the config and exit non-zero if any widget fails
    #[arg(short = 'c', long = "check")]
    check: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Dashboard config file to inspect (defaults to the per-user config location)
    #[arg(value_name = "CONFIG_FILE")]
    config_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logger with verbosity based on -d/--debug flag
    // Level 0 (default): warn only
    // Level 1: info (normal verbosity)
    // Level 2: debug (detailed)
    // Level 3+: trace (very detailed)
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting homedeck v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config_file {
        Some(path) => DashboardConfig::load_from_path(path),
        None => DashboardConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load dashboard config: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let registry = SchemaRegistry::with_builtins();
    let mut failures = 0usize;

    println!("Dashboard config v{} ({} items)", config.version, config.items.len());
    for item in &config.items {
        match &item.item {
            ItemConfig::DualWidget(dual) => {
                println!("  {} dual-widget", item.id);
                failures += report_dual(&registry, dual);
            }
            ItemConfig::Widget(widget) => {
                println!("  {} widget: {}", item.id, widget.widget_type().id());
                failures += report_slot(&registry, SlotId::Top, widget);
            }
        }
    }

    if failures > 0 {
        println!("{failures} widget(s) failed validation");
        if cli.check {
            return ExitCode::FAILURE;
        }
    } else {
        println!("All widgets valid");
    }
    ExitCode::SUCCESS
}

/// Validate both slots of a dual widget, printing per-field problems.
/// Returns the number of slots that failed.
fn report_dual(registry: &SchemaRegistry, dual: &DualWidgetConfig) -> usize {
    let mut failures = 0;
    for slot in [SlotId::Top, SlotId::Bottom] {
        match dual.slot(slot) {
            Some(widget) => {
                println!("    {}: {}", slot.label(), widget.widget_type().id());
                failures += report_slot(registry, slot, widget);
            }
            None => println!("    {}: empty", slot.label()),
        }
    }
    failures
}

/// Run one widget config through the schema validation path.
fn report_slot(registry: &SchemaRegistry, slot: SlotId, widget: &WidgetConfig) -> usize {
    let schema = match registry.schema_for(widget.widget_type()) {
        Ok(schema) => schema,
        Err(err) => {
            println!("      {err:#}");
            return 1;
        }
    };
    let panel = SlotPanel::new(schema, slot);
    let mut session = FormSession::new();
    let mut existing = ExistingSecrets::default();
    panel.load_config(&mut session, &mut existing, widget);
    panel.apply_defaults(&mut session);
    let failed = panel.validate(&mut session);
    for field_ref in &failed {
        match session.error(*field_ref) {
            Some(kind) => println!("      {:?}: {kind}", field_ref.field),
            None => println!("      {:?}: invalid", field_ref.field),
        }
    }
    usize::from(!failed.is_empty())
}
