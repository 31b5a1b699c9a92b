//! Terminal front end for the booking workflow.
//!
//! Reads one command per line from stdin and drives the booking store.
//! Links are printed instead of opened; receipts are saved as HTML in
//! `RECEIPT_DIR` when it is set.

use chrono::Datelike;
use composable_rust_core::environment::{Clock, SystemClock};
use composable_rust_runtime::Store;
use puja_booking::message::receipt_message;
use puja_booking::view::render_page;
use puja_booking::{
    BookingAction, BookingEnvironment, BookingReducer, FormField, OfferingId, RandomCodeSource,
    SiteConfig, TerminalConfig, TerminalHost,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EFFECT_TIMEOUT: Duration = Duration::from_secs(5);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

const HELP: &str = "\
commands:
  search <text>          filter the catalog
  book <puja-id>         pick a puja from the catalog
  set <field> <value>    name, phone, address, puja, date, time, festival, amount, notes, captcha
  refresh                show a new code
  submit                 submit the form
  print                  print the receipt
  send                   send the receipt to the customer
  pay                    confirm an advance payment
  show                   show code, form status and receipt
  page <path>            write the rendered page to a file
  quit";

enum Command {
    Send(BookingAction),
    Show,
    Page(String),
    Help,
    Quit,
}

fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb {
        "search" => Command::Send(BookingAction::SearchChanged {
            query: rest.to_string(),
        }),
        "book" if !rest.is_empty() => Command::Send(BookingAction::OfferingChosen {
            id: OfferingId::new(rest),
        }),
        "set" => {
            let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
            let field = field.parse::<FormField>().map_err(|e| e.to_string())?;
            Command::Send(BookingAction::FieldChanged {
                field,
                value: value.to_string(),
            })
        },
        "refresh" => Command::Send(BookingAction::RefreshCode),
        "submit" => Command::Send(BookingAction::Submit),
        "print" => Command::Send(BookingAction::PrintReceipt),
        "send" => Command::Send(BookingAction::SendReceiptToCustomer),
        "pay" => Command::Send(BookingAction::ConfirmPayment),
        "show" => Command::Show,
        "page" if !rest.is_empty() => Command::Page(rest.to_string()),
        "help" | "" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(command)
}

type BookingStore = Store<
    puja_booking::BookingState,
    BookingAction,
    BookingEnvironment,
    BookingReducer,
>;

async fn show(store: &BookingStore) {
    let config = Arc::clone(&store.environment().config);
    let snapshot = store.state(Clone::clone).await;

    println!("code: {}", snapshot.code);
    for offering in snapshot.visible_offerings(&config.catalog) {
        println!("  {:<20} {:<32} {}", offering.id, offering.name, offering.price_label());
    }
    for field in [
        FormField::Name,
        FormField::Phone,
        FormField::Address,
        FormField::Offering,
        FormField::Date,
        FormField::Time,
        FormField::Festival,
        FormField::Advance,
        FormField::Notes,
        FormField::CodeEntry,
    ] {
        println!("  {field:<9} {}", snapshot.form.value(field));
    }
    if let Some(reason) = &snapshot.last_rejection {
        println!("! {reason}");
    }
    if let Some(booking) = &snapshot.current_booking {
        println!("\n{}", receipt_message(booking, &config.contact));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let terminal = TerminalConfig::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&terminal.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SiteConfig::from_env();
    config.validate()?;
    info!(
        provider = %config.contact.provider_name,
        offerings = config.catalog.len(),
        receipt_dir = ?terminal.receipt_dir,
        "Configuration loaded"
    );

    let env = BookingEnvironment::new(
        Arc::new(SystemClock),
        Arc::new(TerminalHost::new(std::io::stdout(), terminal.receipt_dir.clone())),
        Arc::new(RandomCodeSource::new(config.code_length)),
        Arc::new(config),
    );
    let store = Store::new(env.initial_state(), BookingReducer::new(), env);

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse(&line) {
            Ok(Command::Send(action)) => {
                let submitted = action == BookingAction::Submit;
                let mut handle = store.send(action).await?;
                if handle.wait_with_timeout(EFFECT_TIMEOUT).await.is_err() {
                    warn!("Effects still running after {EFFECT_TIMEOUT:?}");
                }
                if submitted {
                    match store.state(|s| s.last_rejection.clone()).await {
                        Some(reason) => println!("! {reason}"),
                        None => println!("booking accepted"),
                    }
                }
            },
            Ok(Command::Show) => show(&store).await,
            Ok(Command::Page(path)) => {
                let year = store.environment().clock.now().year();
                let config = Arc::clone(&store.environment().config);
                let page = store.state(|s| render_page(s, &config, year)).await;
                tokio::fs::write(&path, page).await?;
                println!("page written to {path}");
            },
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Quit) => break,
            Err(message) => println!("{message}"),
        }
    }

    store.shutdown(SHUTDOWN_TIMEOUT).await?;
    info!("Bye");
    Ok(())
}
