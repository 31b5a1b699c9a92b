//! # Puja Booking
//!
//! Booking workflow for a pandit's ritual services: a searchable puja
//! catalog, a booking form guarded by a display code, a receipt that can be
//! printed or sent to the customer, and chat deep links to the provider.
//!
//! ## Architecture
//!
//! - [`BookingState`]: everything the page shows that changes
//! - [`BookingAction`]: visitor commands plus submission events
//! - [`BookingReducer`]: validation and state transitions
//! - [`BookingEnvironment`]: clock, host, code source and site configuration
//! - [`view::render_page`]: the page as a pure function of state
//!
//! Side effects (opening links, scrolling, printing) go through the
//! [`Host`] trait and are fire-and-forget.
//!
//! ## Example
//!
//! ```ignore
//! use composable_rust_runtime::Store;
//! use puja_booking::{BookingAction, BookingEnvironment, BookingReducer};
//!
//! let initial = env.initial_state();
//! let store = Store::new(initial, BookingReducer::new(), env);
//! store.send(BookingAction::SearchChanged { query: "bilva".into() }).await?;
//! ```

pub mod actions;
pub mod catalog;
pub mod code;
pub mod config;
pub mod error;
pub mod form;
pub mod host;
pub mod message;
pub mod mocks;
pub mod receipt;
pub mod reducer;
pub mod state;
pub mod view;

pub use actions::BookingAction;
pub use catalog::{Catalog, OfferingId, ServiceOffering};
pub use code::{CodeSource, DisplayCode, RandomCodeSource};
pub use config::{ContactInfo, PaymentInfo, SiteConfig, TerminalConfig};
pub use error::{BookingRejection, ConfigError, FieldEditError, HostError, UnknownField};
pub use form::{BookingForm, FormField};
pub use host::{Host, TerminalHost};
pub use reducer::{BookingEnvironment, BookingReducer};
pub use state::{Booking, BookingState};
