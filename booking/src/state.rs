//! View state owned by the booking store.

use crate::catalog::{Catalog, OfferingId, ServiceOffering};
use crate::code::DisplayCode;
use crate::error::BookingRejection;
use crate::form::BookingForm;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of every order id
pub const ORDER_ID_PREFIX: &str = "PJ-";

/// An accepted submission, rendered as the receipt
///
/// Created only after validation passed; replaced by the next acceptance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// `PJ-` followed by the last 8 digits of the submission's millisecond timestamp
    pub order_id: String,
    /// Customer's name
    pub name: String,
    /// Customer's phone as entered
    pub phone: String,
    /// Address
    pub address: String,
    /// Booked puja's id
    pub offering_id: OfferingId,
    /// Booked puja's display name
    pub offering_name: String,
    /// Date as entered
    pub date: String,
    /// Time as entered
    pub time: String,
    /// Festival, if one was chosen
    pub festival: Option<String>,
    /// Advance amount in rupees (0 when left empty)
    pub advance: u64,
    /// Special instructions (may be empty)
    pub notes: String,
}

impl Booking {
    /// Snapshot of a validated form
    #[must_use]
    pub fn from_form(order_id: String, form: &BookingForm, offering: &ServiceOffering) -> Self {
        Self {
            order_id,
            name: form.name.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
            offering_id: offering.id.clone(),
            offering_name: offering.name.clone(),
            date: form.date.clone(),
            time: form.time.clone(),
            festival: form.festival.clone(),
            advance: form.advance.unwrap_or(0),
            notes: form.notes.clone(),
        }
    }
}

/// Order id for a submission made at `submitted_at`
///
/// Deterministic: the last 8 digits of the millisecond epoch timestamp,
/// prefixed with [`ORDER_ID_PREFIX`].
#[must_use]
pub fn order_id(submitted_at: DateTime<Utc>) -> String {
    let millis = submitted_at.timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(8)..];
    format!("{ORDER_ID_PREFIX}{tail}")
}

/// Everything the page shows that changes while the visitor uses it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingState {
    /// Catalog search box contents
    pub query: String,
    /// Offering picked from a catalog card, carried into the form
    pub selected: Option<OfferingId>,
    /// Booking form contents
    pub form: BookingForm,
    /// The one active display code
    pub code: DisplayCode,
    /// Last accepted booking, shown as the receipt
    pub current_booking: Option<Booking>,
    /// Reason the last submission was refused, until the next acceptance
    pub last_rejection: Option<BookingRejection>,
}

impl BookingState {
    /// Fresh page state showing `code`
    #[must_use]
    pub fn new(code: DisplayCode) -> Self {
        Self {
            query: String::new(),
            selected: None,
            form: BookingForm::new(),
            code,
            current_booking: None,
            last_rejection: None,
        }
    }

    /// Catalog cards currently visible for the search box contents
    #[must_use]
    pub fn visible_offerings<'c>(&self, catalog: &'c Catalog) -> Vec<&'c ServiceOffering> {
        catalog.filter(&self.query)
    }

    /// The puja a submission would book right now
    #[must_use]
    pub fn current_offering<'c>(&self, catalog: &'c Catalog) -> Option<&'c ServiceOffering> {
        self.form.resolve_offering(self.selected.as_ref(), catalog)
    }

    /// Whether the receipt section is shown
    #[must_use]
    pub const fn has_receipt(&self) -> bool {
        self.current_booking.is_some()
    }
}
