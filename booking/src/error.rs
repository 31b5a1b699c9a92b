//! Error types for the booking workflow.

use crate::form::FormField;
use thiserror::Error;

/// Why a submission was turned down
///
/// Only the first failing rule is reported, in validation order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingRejection {
    /// A required field is empty
    #[error("Please fill {0}.")]
    MissingField(FormField),

    /// Neither the form nor the catalog browser selected a puja
    #[error("Please select a puja.")]
    NoOfferingSelected,

    /// The entered code does not match the displayed one
    #[error("Captcha incorrect. Please try again.")]
    CodeMismatch,
}

/// A field edit that the form refused
///
/// Select-style fields only take values from their option list, and the
/// advance amount only takes non-negative whole numbers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldEditError {
    /// No offering has this id
    #[error("unknown puja: {0}")]
    UnknownOffering(String),

    /// Not one of the listed festivals
    #[error("unknown festival: {0}")]
    UnknownFestival(String),

    /// Not a non-negative whole number
    #[error("invalid advance amount: {0}")]
    InvalidAdvance(String),
}

/// Field name that does not exist on the form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

/// Failures reported by the host environment
///
/// The workflow never surfaces these to the visitor; effects log and move on.
#[derive(Error, Debug)]
pub enum HostError {
    /// The host refused to open a new browsing context
    #[error("new browsing context was blocked")]
    PopupBlocked,

    /// Writing the document failed
    #[error("host I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid site configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Messaging contact must be digits only (country code + number)
    #[error("messaging contact must be digits only, got {0:?}")]
    InvalidMessagingContact(String),

    /// Two catalog entries share an id
    #[error("duplicate puja id: {0}")]
    DuplicateOffering(String),

    /// An offering lists an empty material name
    #[error("puja {0} has an empty material name")]
    EmptyMaterial(String),

    /// Codes shorter than one character cannot be typed
    #[error("display code length must be at least 1")]
    InvalidCodeLength,
}
