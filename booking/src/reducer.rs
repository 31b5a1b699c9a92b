//! Reducer for the booking page.
//!
//! Commands are validated against the current state; submissions produce a
//! `BookingAccepted` or `SubmissionRejected` event which is then applied.
//! Everything that leaves the page (chat links, printing, scrolling) is an
//! [`Effect::Future`] that calls the injected [`Host`] and feeds nothing back.

use crate::actions::BookingAction;
use crate::code::CodeSource;
use crate::config::SiteConfig;
use crate::error::BookingRejection;
use crate::form::FormField;
use crate::host::Host;
use crate::message::{payment_confirmation_link, provider_link};
use crate::receipt::{customer_link, print_document, receipt_markup};
use crate::state::{Booking, BookingState, order_id};
use composable_rust_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Environment dependencies for the booking reducer
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for order ids
    pub clock: Arc<dyn Clock>,
    /// Where links are opened and receipts printed
    pub host: Arc<dyn Host>,
    /// Source of display codes
    pub codes: Arc<dyn CodeSource>,
    /// Catalog, contact and payment details
    pub config: Arc<SiteConfig>,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        host: Arc<dyn Host>,
        codes: Arc<dyn CodeSource>,
        config: Arc<SiteConfig>,
    ) -> Self {
        Self {
            clock,
            host,
            codes,
            config,
        }
    }

    /// Page state at load time, showing a freshly generated code
    #[must_use]
    pub fn initial_state(&self) -> BookingState {
        BookingState::new(self.codes.next_code())
    }
}

/// Reducer for the booking page
#[derive(Clone, Debug, Default)]
pub struct BookingReducer;

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Turns a submission into the event describing its outcome
    fn evaluate_submission(state: &BookingState, env: &BookingEnvironment) -> BookingAction {
        let catalog = &env.config.catalog;
        match state.form.validate(state.selected.as_ref(), catalog, &state.code) {
            Ok(offering) => BookingAction::BookingAccepted {
                booking: Booking::from_form(order_id(env.clock.now()), &state.form, offering),
                next_code: env.codes.next_code(),
            },
            Err(reason) => {
                // Only a code check consumes the displayed code.
                let next_code =
                    matches!(reason, BookingRejection::CodeMismatch).then(|| env.codes.next_code());
                BookingAction::SubmissionRejected { reason, next_code }
            },
        }
    }

    /// Applies a submission outcome to state
    fn apply_event(state: &mut BookingState, action: &BookingAction) {
        match action {
            BookingAction::BookingAccepted { booking, next_code } => {
                state.current_booking = Some(booking.clone());
                state.last_rejection = None;
                state.code = next_code.clone();
                state.form.code_entry.clear();
            },
            BookingAction::SubmissionRejected { reason, next_code } => {
                state.last_rejection = Some(reason.clone());
                if let Some(code) = next_code {
                    state.code = code.clone();
                    state.form.code_entry.clear();
                }
            },
            // Commands are not applied to state
            _ => {},
        }
    }

    fn open(host: &Arc<dyn Host>, url: String) -> Effect<BookingAction> {
        let host = Arc::clone(host);
        Effect::Future(Box::pin(async move {
            host.open_in_new_context(&url);
            None
        }))
    }

    fn scroll_to_top(host: &Arc<dyn Host>) -> Effect<BookingAction> {
        let host = Arc::clone(host);
        Effect::Future(Box::pin(async move {
            host.scroll_to_top();
            None
        }))
    }

    fn print(host: &Arc<dyn Host>, document: String) -> Effect<BookingAction> {
        let host = Arc::clone(host);
        Effect::Future(Box::pin(async move {
            if let Err(error) = host.print_document(&document) {
                tracing::debug!(%error, "Print view unavailable");
            }
            None
        }))
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            BookingAction::SearchChanged { query } => {
                state.query = query;
                SmallVec::new()
            },

            BookingAction::OfferingChosen { id } => {
                if env.config.catalog.get(&id).is_none() {
                    tracing::debug!(offering = %id, "Ignoring unknown offering");
                    return SmallVec::new();
                }
                state.form.offering_id = Some(id.clone());
                state.selected = Some(id);
                smallvec![Self::scroll_to_top(&env.host)]
            },

            BookingAction::FieldChanged { field, value } => {
                if let Err(error) = state.form.apply_edit(field, value, &env.config) {
                    tracing::debug!(%field, %error, "Field edit refused");
                }
                SmallVec::new()
            },

            BookingAction::RefreshCode => {
                state.code = env.codes.next_code();
                SmallVec::new()
            },

            BookingAction::Submit => {
                let event = Self::evaluate_submission(state, env);
                Self::apply_event(state, &event);

                match event {
                    BookingAction::BookingAccepted { booking, .. } => {
                        tracing::info!(
                            order_id = %booking.order_id,
                            offering = %booking.offering_id,
                            "Booking accepted"
                        );
                        smallvec![Self::open(
                            &env.host,
                            provider_link(&booking, &env.config.contact)
                        )]
                    },
                    BookingAction::SubmissionRejected { reason, .. } => {
                        tracing::debug!(%reason, "Submission rejected");
                        SmallVec::new()
                    },
                    _ => SmallVec::new(),
                }
            },

            BookingAction::PrintReceipt => {
                let Some(booking) = &state.current_booking else {
                    tracing::debug!("No receipt to print");
                    return SmallVec::new();
                };
                let markup = receipt_markup(booking, &env.config.contact);
                smallvec![Self::print(&env.host, print_document(&markup))]
            },

            BookingAction::SendReceiptToCustomer => {
                let link = state
                    .current_booking
                    .as_ref()
                    .and_then(|booking| customer_link(booking, &env.config.contact));
                match link {
                    Some(url) => smallvec![Self::open(&env.host, url)],
                    None => {
                        tracing::debug!(
                            field = %FormField::Phone,
                            "No receipt or customer phone to send to"
                        );
                        SmallVec::new()
                    },
                }
            },

            BookingAction::ConfirmPayment => {
                smallvec![Self::open(
                    &env.host,
                    payment_confirmation_link(&env.config.contact)
                )]
            },

            // ========== Events ==========
            BookingAction::BookingAccepted { .. } | BookingAction::SubmissionRejected { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            },
        }
    }
}
