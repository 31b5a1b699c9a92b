//! Integration tests for the booking workflow running inside a Store
//!
//! Drives the reducer through the runtime the way a front end does and checks
//! what reached the host.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use composable_rust_runtime::{Store, StoreError};
use composable_rust_testing::FixedClock;
use puja_booking::mocks::{HostCall, RecordingHost, ScriptedCodes};
use puja_booking::view::render_page;
use puja_booking::{
    BookingAction, BookingEnvironment, BookingReducer, BookingRejection, BookingState, FormField,
    OfferingId, SiteConfig,
};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

const SUBMITTED_AT: i64 = 1_730_456_789_123;

type BookingStore = Store<BookingState, BookingAction, BookingEnvironment, BookingReducer>;

fn setup(host: &RecordingHost, codes: &[&str]) -> BookingStore {
    let env = BookingEnvironment::new(
        Arc::new(FixedClock::from_millis(SUBMITTED_AT)),
        Arc::new(host.clone()),
        Arc::new(ScriptedCodes::new(codes)),
        Arc::new(SiteConfig::default()),
    );
    Store::new(env.initial_state(), BookingReducer::new(), env)
}

async fn dispatch(store: &BookingStore, action: BookingAction) {
    let mut handle = store.send(action).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .expect("effects should finish");
}

async fn set(store: &BookingStore, field: FormField, value: &str) {
    dispatch(
        store,
        BookingAction::FieldChanged {
            field,
            value: value.to_string(),
        },
    )
    .await;
}

async fn fill_asha(store: &BookingStore) {
    set(store, FormField::Name, "Asha").await;
    set(store, FormField::Phone, "98123 45678").await;
    set(store, FormField::Address, "12 MG Road").await;
    set(store, FormField::Offering, "griha-pravesh").await;
    set(store, FormField::Date, "2024-11-01").await;
    set(store, FormField::Time, "18:00").await;
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn accepted_booking_reaches_provider_and_shows_receipt() {
    let host = RecordingHost::new();
    let store = setup(&host, &["K7PQ2M", "X9AB3C"]);

    fill_asha(&store).await;
    set(&store, FormField::CodeEntry, "k7pq2m").await;
    dispatch(&store, BookingAction::Submit).await;

    let state = store.state(Clone::clone).await;
    let booking = state.current_booking.as_ref().unwrap();
    assert_eq!(booking.offering_name, "Griha Pravesh Puja");
    assert_eq!(booking.order_id, "PJ-56789123");
    assert_eq!(state.code.as_str(), "X9AB3C");
    assert!(state.form.code_entry.is_empty());
    assert_eq!(state.form.name, "Asha");

    let opened = host.opened();
    assert_eq!(opened.len(), 1);
    let url = &opened[0];
    assert!(url.starts_with("https://wa.me/919876543210?text="));
    for line in [
        "New%20Puja%20Booking",
        "Name%3A%20Asha",
        "Puja%3A%20Griha%20Pravesh%20Puja",
        "Festival%3A%20-",
        "Advance%20%28%E2%82%B9%29%3A%200",
        "Notes%3A%20-",
    ] {
        assert!(url.contains(line), "missing {line} in {url}");
    }

    let page = render_page(&state, &store.environment().config, 2025);
    assert!(page.contains("Receipt – Puja Booking"));
}

#[tokio::test]
async fn empty_code_entry_is_rejected_and_code_changes() {
    let host = RecordingHost::new();
    let store = setup(&host, &["K7PQ2M", "X9AB3C"]);

    fill_asha(&store).await;
    dispatch(&store, BookingAction::Submit).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.last_rejection, Some(BookingRejection::CodeMismatch));
    assert!(state.current_booking.is_none());
    assert_eq!(state.code.as_str(), "X9AB3C");
    assert_eq!(state.form.address, "12 MG Road");
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn stale_guess_fails_twice() {
    let host = RecordingHost::new();
    let store = setup(&host, &["AAAAAA", "BBBBBB", "CCCCCC"]);

    fill_asha(&store).await;
    for _ in 0..2 {
        set(&store, FormField::CodeEntry, "ZZZZZZ").await;
        dispatch(&store, BookingAction::Submit).await;
        let rejection = store.state(|s| s.last_rejection.clone()).await;
        assert_eq!(rejection, Some(BookingRejection::CodeMismatch));
    }

    assert_eq!(store.state(|s| s.code.to_string()).await, "CCCCCC");
    assert!(host.opened().is_empty());
}

#[tokio::test]
async fn catalog_pick_then_receipt_actions() {
    let host = RecordingHost::new();
    let store = setup(&host, &["AAAAAA", "BBBBBB"]);

    dispatch(&store, BookingAction::SearchChanged { query: "bilva".to_string() }).await;
    dispatch(
        &store,
        BookingAction::OfferingChosen {
            id: OfferingId::new("rudrabhishek"),
        },
    )
    .await;
    set(&store, FormField::Name, "Ravi").await;
    set(&store, FormField::Phone, "+91 90000-11111").await;
    set(&store, FormField::Address, "Jaipur").await;
    set(&store, FormField::Date, "2025-03-01").await;
    set(&store, FormField::Time, "07:30").await;
    set(&store, FormField::Advance, "500").await;
    set(&store, FormField::CodeEntry, "aaaaaa").await;
    dispatch(&store, BookingAction::Submit).await;
    dispatch(&store, BookingAction::PrintReceipt).await;
    dispatch(&store, BookingAction::SendReceiptToCustomer).await;

    let calls = host.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0], HostCall::ScrolledToTop);
    assert!(matches!(&calls[1], HostCall::Opened(url) if url.contains("Puja%3A%20Rudrabhishek")));
    assert!(matches!(&calls[2], HostCall::Printed(doc) if doc.contains("Advance Paid: ₹ 500")));
    assert!(matches!(&calls[3], HostCall::Opened(url) if url.starts_with("https://wa.me/919000011111?text=")));
}

#[tokio::test]
async fn missing_name_is_reported_first() {
    let store = setup(&RecordingHost::new(), &["AAAAAA"]);

    dispatch(&store, BookingAction::Submit).await;

    let rejection = store.state(|s| s.last_rejection.clone()).await.unwrap();
    assert_eq!(rejection, BookingRejection::MissingField(FormField::Name));
    assert_eq!(rejection.to_string(), "Please fill name.");
}

#[tokio::test]
async fn shutdown_rejects_further_actions() {
    let store = setup(&RecordingHost::new(), &["AAAAAA"]);

    store.shutdown(Duration::from_secs(1)).await.unwrap();

    let result = store.send(BookingAction::RefreshCode).await;
    assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
}
