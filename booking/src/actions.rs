//! Actions accepted by the booking reducer.

use crate::catalog::OfferingId;
use crate::code::DisplayCode;
use crate::error::BookingRejection;
use crate::form::FormField;
use crate::state::Booking;

/// Everything that can happen on the booking page
///
/// Commands come from the visitor. Events record the outcome of a submission
/// and are what actually change the booking and rejection state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookingAction {
    // ========== Commands ==========
    /// Catalog search box changed
    SearchChanged {
        /// New search text
        query: String,
    },

    /// "Book <name>" pressed on a catalog card
    OfferingChosen {
        /// Chosen offering
        id: OfferingId,
    },

    /// A form input changed
    FieldChanged {
        /// Which input
        field: FormField,
        /// Its new value
        value: String,
    },

    /// Visitor asked for a new display code
    RefreshCode,

    /// Form submitted
    Submit,

    /// Print the current receipt
    PrintReceipt,

    /// Send the current receipt to the customer's phone
    SendReceiptToCustomer,

    /// Tell the provider the advance was paid
    ConfirmPayment,

    // ========== Events ==========
    /// Submission passed validation
    BookingAccepted {
        /// The new receipt
        booking: Booking,
        /// Code displayed from now on
        next_code: DisplayCode,
    },

    /// Submission failed validation
    SubmissionRejected {
        /// First failing rule
        reason: BookingRejection,
        /// Replacement code, when the failure consumed the current one
        next_code: Option<DisplayCode>,
    },
}

impl BookingAction {
    /// Whether this action records a submission outcome
    #[must_use]
    pub const fn is_event(&self) -> bool {
        matches!(
            self,
            Self::BookingAccepted { .. } | Self::SubmissionRejected { .. }
        )
    }
}
