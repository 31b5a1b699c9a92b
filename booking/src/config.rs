//! Site configuration.
//!
//! Contact and payment details are meant to be edited per deployment. The
//! defaults are the published ones; `from_env` overrides them from
//! environment variables.

use crate::catalog::{Catalog, FESTIVALS};
use crate::code::DEFAULT_CODE_LENGTH;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

/// Everything the page shows that is not visitor input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Provider contact details
    pub contact: ContactInfo,
    /// Payment panel details
    pub payment: PaymentInfo,
    /// Bookable pujas
    pub catalog: Catalog,
    /// Festivals offered for advance booking
    pub festivals: Vec<String>,
    /// Length of the display code
    pub code_length: usize,
}

/// Provider contact details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Display name of the pandit
    pub provider_name: String,
    /// Published phone number, as displayed
    pub phone: String,
    /// Messaging contact: country code + number, digits only
    pub whatsapp: String,
    /// Postal address
    pub address: String,
    /// Email address
    pub email: String,
}

/// Payment panel details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// UPI id shown as text
    pub upi_id: String,
    /// Static QR image to scan
    pub qr_image_url: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            provider_name: "Pandit Vinod Sharma".to_string(),
            phone: "+91 98765 43210".to_string(),
            whatsapp: "919876543210".to_string(),
            address: "Shree Mandir Marg, Jaipur, Rajasthan".to_string(),
            email: "bookings@panditji.example".to_string(),
        }
    }
}

impl Default for PaymentInfo {
    fn default() -> Self {
        Self {
            upi_id: "panditji@upi".to_string(),
            qr_image_url: "https://api.qrserver.com/v1/create-qr-code/?size=220x220&data=upi%3A%2F%2Fpay%3Fpa%3Dpanditji%40upi%26pn%3DPandit%2520Ji%26cu%3DINR".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact: ContactInfo::default(),
            payment: PaymentInfo::default(),
            catalog: Catalog::standard(),
            festivals: FESTIVALS.iter().map(ToString::to_string).collect(),
            code_length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl SiteConfig {
    /// Load configuration, overriding defaults from environment variables.
    ///
    /// Recognised variables: `PANDIT_NAME`, `PANDIT_PHONE`, `PANDIT_WHATSAPP`,
    /// `PANDIT_ADDRESS`, `PANDIT_EMAIL`, `PAYMENT_UPI_ID`, `PAYMENT_QR_URL`,
    /// `CAPTCHA_LENGTH`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            contact: ContactInfo {
                provider_name: env::var("PANDIT_NAME")
                    .unwrap_or(defaults.contact.provider_name),
                phone: env::var("PANDIT_PHONE").unwrap_or(defaults.contact.phone),
                whatsapp: env::var("PANDIT_WHATSAPP").unwrap_or(defaults.contact.whatsapp),
                address: env::var("PANDIT_ADDRESS").unwrap_or(defaults.contact.address),
                email: env::var("PANDIT_EMAIL").unwrap_or(defaults.contact.email),
            },
            payment: PaymentInfo {
                upi_id: env::var("PAYMENT_UPI_ID").unwrap_or(defaults.payment.upi_id),
                qr_image_url: env::var("PAYMENT_QR_URL")
                    .unwrap_or(defaults.payment.qr_image_url),
            },
            catalog: defaults.catalog,
            festivals: defaults.festivals,
            code_length: env::var("CAPTCHA_LENGTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.code_length),
        }
    }

    /// Check the invariants the workflow relies on.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found: a messaging contact that is
    /// not digits only, a duplicate puja id, an empty material name, or a
    /// zero code length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let whatsapp = &self.contact.whatsapp;
        if whatsapp.is_empty() || !whatsapp.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidMessagingContact(whatsapp.clone()));
        }

        let mut seen = HashSet::new();
        for offering in self.catalog.iter() {
            if !seen.insert(offering.id.as_str()) {
                return Err(ConfigError::DuplicateOffering(offering.id.to_string()));
            }
            if offering.materials.iter().any(|m| m.trim().is_empty()) {
                return Err(ConfigError::EmptyMaterial(offering.id.to_string()));
            }
        }

        if self.code_length == 0 {
            return Err(ConfigError::InvalidCodeLength);
        }

        Ok(())
    }

    /// Whether `name` is one of the listed festivals
    #[must_use]
    pub fn is_festival(&self, name: &str) -> bool {
        self.festivals.iter().any(|f| f == name)
    }
}

/// Settings for the terminal front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Directory print documents are written to; printing is refused when unset
    pub receipt_dir: Option<PathBuf>,
    /// Log filter (trace, debug, info, warn, error or an `EnvFilter` directive)
    pub log_level: String,
}

impl TerminalConfig {
    /// Load from `RECEIPT_DIR` and `RUST_LOG`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            receipt_dir: env::var("RECEIPT_DIR").ok().map(PathBuf::from),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| {
                "puja_booking=info,composable_rust_runtime=warn".to_string()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceOffering;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SiteConfig::default().validate(), Ok(()));
        assert_eq!(SiteConfig::default().festivals.len(), 9);
    }

    #[test]
    fn messaging_contact_must_be_digits() {
        let mut config = SiteConfig::default();
        config.contact.whatsapp = "+91 98765".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidMessagingContact("+91 98765".to_string()))
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut config = SiteConfig::default();
        let mut offerings: Vec<ServiceOffering> = config.catalog.iter().cloned().collect();
        offerings.push(offerings[0].clone());
        config.catalog = Catalog::new(offerings);
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateOffering("satyanarayan-katha".to_string()))
        );
    }

    #[test]
    fn empty_material_is_rejected() {
        let mut config = SiteConfig::default();
        let mut offerings: Vec<ServiceOffering> = config.catalog.iter().cloned().collect();
        offerings[2].materials.push("  ".to_string());
        config.catalog = Catalog::new(offerings);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyMaterial("rudrabhishek".to_string()))
        );
    }

    #[test]
    fn zero_code_length_is_rejected() {
        let config = SiteConfig {
            code_length: 0,
            ..SiteConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidCodeLength));
    }

    #[test]
    fn festival_lookup_is_exact() {
        let config = SiteConfig::default();
        assert!(config.is_festival("Diwali"));
        assert!(!config.is_festival("diwali"));
    }
}
