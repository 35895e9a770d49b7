use std::error::Error;

use clap::ArgMatches;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use barkeep_core::events;
use barkeep_core::relocation::Destination;
use barkeep_core::{
    BarkeepConfig, BarkeepResult, ItemKey, MenuBarItem, MoveOutcome, RelocationSettings,
};

use crate::platform;
use crate::table::{TableFormatter, print_displays_table};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
fn load_config_with_warning() -> BarkeepConfig {
    match BarkeepConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.barkeep/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            BarkeepConfig::default()
        }
    }
}

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    events::log_app_startup();

    let result = match matches.subcommand() {
        Some(("list", sub_matches)) => match sub_matches.subcommand() {
            Some(("displays", list_matches)) => handle_list_displays_command(list_matches),
            Some(("items", list_matches)) => handle_list_items_command(list_matches),
            _ => {
                error!(event = "cli.list_target_unknown");
                Err("Unknown list target".into())
            }
        },
        Some(("move", sub_matches)) => handle_move_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_app_shutdown();
    result
}

fn handle_list_displays_command(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_displays_started", json_output = json_output);

    match platform::displays() {
        Ok(displays) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&displays)?);
            } else if displays.is_empty() {
                println!("No active displays found.");
            } else {
                print_displays_table(&displays);
            }

            info!(event = "cli.list_displays_completed", count = displays.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to list displays: {}", e);

            error!(event = "cli.list_displays_failed", error = %e);

            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

/// An item as printed by `list items --json`
#[derive(Serialize)]
struct ItemEntry<'a> {
    key: String,
    #[serde(flatten)]
    item: &'a MenuBarItem,
}

fn handle_list_items_command(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let json_output = matches.get_flag("json");
    let display_id = matches.get_one::<u32>("display").copied();

    let config = load_config_with_warning();
    let scope = if matches.get_flag("on-screen") {
        barkeep_core::SnapshotScope::OnScreenOnly
    } else {
        config.directory.scope()
    };

    info!(
        event = "cli.list_items_started",
        json_output = json_output,
        display_id = ?display_id,
        scope = scope.as_str()
    );

    match platform::list_items(display_id, scope) {
        Ok((display, items)) => {
            let display_id = display.id();
            if json_output {
                let entries: Vec<ItemEntry> = items
                    .iter()
                    .map(|item| ItemEntry {
                        key: item.key().to_string(),
                        item,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if items.is_empty() {
                println!("No menu bar items found on display {}.", display_id);
            } else {
                println!("Menu bar items on display {}:", display_id);
                let formatter = TableFormatter::new(&items);
                formatter.print_table(&items);
            }

            info!(
                event = "cli.list_items_completed",
                display_id = display_id,
                count = items.len()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to list menu bar items: {}", e);

            error!(event = "cli.list_items_failed", error = %e);

            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn handle_move_command(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let item_token = matches
        .get_one::<String>("item")
        .ok_or("Item argument is required")?;
    let display_id = matches.get_one::<u32>("display").copied();

    // Malformed keys are rejected before touching the window server
    let (item, destination) = match parse_move_target(item_token, matches) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("❌ {}", e);
            error!(event = "cli.move_invalid_item", error = %e);
            return Err(e);
        }
    };

    let config = load_config_with_warning();

    info!(
        event = "cli.move_started",
        item = %item,
        destination = %destination,
        display_id = ?display_id
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run_move(
        item.clone(),
        destination.clone(),
        display_id,
        config.relocation.settings(),
    ));

    match result {
        Ok(Some(outcome)) => {
            match outcome {
                MoveOutcome::Moved => println!("✅ Moved '{}' {}", item, destination),
                MoveOutcome::AlreadyInPlace => {
                    println!("'{}' is already {}", item, destination)
                }
            }

            info!(
                event = "cli.move_completed",
                item = %item,
                outcome = outcome.as_str()
            );
            Ok(())
        }
        Ok(None) => {
            eprintln!("Move of '{}' cancelled.", item);
            warn!(event = "cli.move_cancelled", item = %item);
            Err("Move cancelled".into())
        }
        Err(e) => {
            eprintln!("❌ Failed to move '{}': {}", item, e);

            error!(
                event = "cli.move_failed",
                item = %item,
                error = %e,
                error_code = e.error_code()
            );

            events::log_app_error(e.as_ref());
            Err(e.to_string().into())
        }
    }
}

fn parse_move_target(
    item_token: &str,
    matches: &ArgMatches,
) -> Result<(ItemKey, Destination), Box<dyn Error>> {
    let item = ItemKey::parse(item_token)?;

    let destination = if let Some(token) = matches.get_one::<String>("left-of") {
        Destination::LeftOf(ItemKey::parse(token)?)
    } else if let Some(token) = matches.get_one::<String>("right-of") {
        Destination::RightOf(ItemKey::parse(token)?)
    } else {
        return Err("One of --left-of or --right-of is required".into());
    };

    Ok((item, destination))
}

/// Run a move until it finishes or Ctrl-C arrives.
///
/// Returns `Ok(None)` when interrupted; dropping the move restores the
/// pointer and removes its event monitor.
async fn run_move(
    item: ItemKey,
    destination: Destination,
    display_id: Option<u32>,
    settings: RelocationSettings,
) -> BarkeepResult<Option<MoveOutcome>> {
    let shutdown = CancellationToken::new();

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    tokio::select! {
        result = platform::move_item(item, destination, display_id, settings) => result.map(Some),
        _ = shutdown.cancelled() => {
            info!(event = "cli.move_interrupted");
            Ok(None)
        }
    }
}
