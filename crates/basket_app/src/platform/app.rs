use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use basket_core::{Msg, SheetView};
use basket_engine::EngineHandle;
use basket_logging::{basket_error, basket_info, basket_warn};

use super::config::{load_config, DEFAULT_CONFIG_PATH};
use super::effects::EffectRunner;
use super::logging;
use super::store::BasketStore;
use super::ui::command::{parse_command, CommandError, UserCommand, HELP};
use super::ui::render::render;

const INPUT_POLL: Duration = Duration::from_millis(50);
const STARTUP_WAIT: Duration = Duration::from_secs(2);

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = load_config(&config_path)?;
    logging::initialize(config.log_destination);
    basket_info!("Starting shopping basket, catalog endpoint {}", config.catalog_url);

    let engine =
        EngineHandle::new(config.fetch_settings()).context("failed to start catalog engine")?;
    let mut store = BasketStore::new(EffectRunner::new(engine));

    let currency = config.currency_symbol.clone();
    store.subscribe(move |view| print_lines(&render(view, &currency)));

    let input_rx = spawn_input_reader();
    println!("Type `help` for commands.");
    store.load_products();
    // Give the first catalog fetch a head start; later results arrive via `pump`.
    store.wait_for_engine(STARTUP_WAIT);

    loop {
        match input_rx.recv_timeout(INPUT_POLL) {
            Ok(line) => match parse_command(&line) {
                Ok(UserCommand::Quit) => break,
                Ok(command) => handle_command(&mut store, command, &config.currency_symbol),
                Err(CommandError::Empty) => {}
                Err(err) => println!("{err}. Type `help` for commands."),
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
        store.pump();
    }

    basket_info!("Shutting down");
    Ok(())
}

fn handle_command(store: &mut BasketStore, command: UserCommand, currency: &str) {
    match command {
        UserCommand::Load => store.load_products(),
        UserCommand::Catalog => store.dispatch(Msg::ShowCatalog),
        UserCommand::Add(ids) => add_products(store, ids),
        UserCommand::Item(line_id) => {
            store.dispatch(Msg::ShowItemDetail(line_id));
            let shown = matches!(
                &store.snapshot().sheet,
                SheetView::ItemDetail(item) if item.line_id == line_id
            );
            if !shown {
                println!("No basket line {line_id}.");
            }
        }
        UserCommand::Back => {
            if store.snapshot().sheet == SheetView::Catalog {
                store.dispatch(Msg::CatalogClosed {
                    added: Vec::new(),
                    cancelled: true,
                });
            } else {
                store.dispatch(Msg::DismissSheet);
            }
        }
        UserCommand::Clear => {
            if store.snapshot().clear_enabled {
                store.dispatch(Msg::ClearRequested);
            } else {
                println!("The basket is already empty.");
            }
        }
        UserCommand::Confirm => {
            if store.snapshot().confirm_clear {
                store.clear_items();
            } else {
                println!("Nothing to confirm.");
            }
        }
        UserCommand::Cancel => store.dispatch(Msg::ClearDismissed),
        UserCommand::Show => print_lines(&render(&store.snapshot(), currency)),
        UserCommand::Help => println!("{HELP}"),
        UserCommand::Quit => {}
    }
}

/// With the product list open, ids go through the picker; otherwise each id
/// is resolved against the loaded catalog and added directly.
fn add_products(store: &mut BasketStore, ids: Vec<u64>) {
    let view = store.snapshot();
    let (known, unknown): (Vec<_>, Vec<_>) = ids
        .into_iter()
        .partition(|id| view.catalog.iter().any(|product| product.id == *id));
    for id in &unknown {
        basket_warn!("Ignoring unknown product id {}", id);
        println!("No product #{id} in the catalog.");
    }

    if view.sheet == SheetView::Catalog {
        store.dispatch(Msg::CatalogClosed {
            added: known,
            cancelled: false,
        });
        return;
    }
    for id in known {
        if let Some(product) = view.catalog.iter().find(|product| product.id == id) {
            store.add_to_basket(product.clone());
        }
    }
}

fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    basket_error!("Failed to read terminal input: {}", err);
                    break;
                }
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
