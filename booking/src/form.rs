//! Booking form fields, edits and submission validation.

use crate::catalog::{Catalog, OfferingId, ServiceOffering};
use crate::code::DisplayCode;
use crate::config::SiteConfig;
use crate::error::{BookingRejection, FieldEditError, UnknownField};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Every input on the booking form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormField {
    /// Customer's full name
    Name,
    /// Customer's mobile number
    Phone,
    /// Where the puja takes place
    Address,
    /// Selected puja
    Offering,
    /// Puja date
    Date,
    /// Puja time
    Time,
    /// Optional festival
    Festival,
    /// Optional advance amount in rupees
    Advance,
    /// Optional special instructions
    Notes,
    /// The retyped display code
    CodeEntry,
}

impl FormField {
    /// Fields that must be non-empty, in the order they are checked
    pub const REQUIRED: [Self; 5] = [Self::Name, Self::Phone, Self::Address, Self::Date, Self::Time];

    /// Short name used in messages and on the command line
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Offering => "puja",
            Self::Date => "date",
            Self::Time => "time",
            Self::Festival => "festival",
            Self::Advance => "amount",
            Self::Notes => "notes",
            Self::CodeEntry => "captcha",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "phone" | "mobile" => Ok(Self::Phone),
            "address" => Ok(Self::Address),
            "puja" | "offering" => Ok(Self::Offering),
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "festival" => Ok(Self::Festival),
            "amount" | "advance" => Ok(Self::Advance),
            "notes" => Ok(Self::Notes),
            "captcha" | "code" => Ok(Self::CodeEntry),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Current contents of the booking form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    /// Customer's full name
    pub name: String,
    /// Mobile number; free text, only checked for presence
    pub phone: String,
    /// Address
    pub address: String,
    /// Selected puja, if any
    pub offering_id: Option<OfferingId>,
    /// Date as entered
    pub date: String,
    /// Time as entered
    pub time: String,
    /// Festival from the fixed list, if any
    pub festival: Option<String>,
    /// Advance amount in rupees, if any
    pub advance: Option<u64>,
    /// Special instructions
    pub notes: String,
    /// Retyped display code
    pub code_entry: String,
}

impl BookingForm {
    /// Creates an empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a field as the input would show it
    #[must_use]
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Phone => self.phone.clone(),
            FormField::Address => self.address.clone(),
            FormField::Offering => self
                .offering_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            FormField::Date => self.date.clone(),
            FormField::Time => self.time.clone(),
            FormField::Festival => self.festival.clone().unwrap_or_default(),
            FormField::Advance => self.advance.map(|a| a.to_string()).unwrap_or_default(),
            FormField::Notes => self.notes.clone(),
            FormField::CodeEntry => self.code_entry.clone(),
        }
    }

    /// Applies one input change
    ///
    /// Free-text fields take any value. The puja and festival selects take
    /// an empty value or one of their options; the advance amount takes an
    /// empty value or a non-negative whole number.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldEditError`] and leaves the form untouched when the
    /// value is outside the field's domain.
    pub fn apply_edit(
        &mut self,
        field: FormField,
        value: String,
        config: &SiteConfig,
    ) -> Result<(), FieldEditError> {
        match field {
            FormField::Name => self.name = value,
            FormField::Phone => self.phone = value,
            FormField::Address => self.address = value,
            FormField::Date => self.date = value,
            FormField::Time => self.time = value,
            FormField::Notes => self.notes = value,
            FormField::CodeEntry => self.code_entry = value,
            FormField::Offering => {
                self.offering_id = if value.is_empty() {
                    None
                } else {
                    let offering = config
                        .catalog
                        .find(&value)
                        .ok_or(FieldEditError::UnknownOffering(value))?;
                    Some(offering.id.clone())
                };
            },
            FormField::Festival => {
                if !value.is_empty() && !config.is_festival(&value) {
                    return Err(FieldEditError::UnknownFestival(value));
                }
                self.festival = (!value.is_empty()).then_some(value);
            },
            FormField::Advance => {
                let trimmed = value.trim();
                self.advance = if trimmed.is_empty() {
                    None
                } else {
                    Some(
                        trimmed
                            .parse::<u64>()
                            .map_err(|_| FieldEditError::InvalidAdvance(value.clone()))?,
                    )
                };
            },
        }
        Ok(())
    }

    /// First required field that is still empty, in check order
    #[must_use]
    pub fn first_missing(&self) -> Option<FormField> {
        FormField::REQUIRED
            .into_iter()
            .find(|field| self.value(*field).is_empty())
    }

    /// The puja this form would book
    ///
    /// The form's own selection wins; otherwise the offering carried over
    /// from the catalog browser is used.
    #[must_use]
    pub fn resolve_offering<'c>(
        &self,
        carried: Option<&OfferingId>,
        catalog: &'c Catalog,
    ) -> Option<&'c ServiceOffering> {
        self.offering_id
            .as_ref()
            .and_then(|id| catalog.get(id))
            .or_else(|| carried.and_then(|id| catalog.get(id)))
    }

    /// Runs the submission checks in order; the first failure wins
    ///
    /// 1. name, phone, address, date and time are non-empty
    /// 2. a puja is resolvable
    /// 3. the code entry matches the active code
    ///
    /// # Errors
    ///
    /// Returns the [`BookingRejection`] for the first failing rule.
    pub fn validate<'c>(
        &self,
        carried: Option<&OfferingId>,
        catalog: &'c Catalog,
        code: &DisplayCode,
    ) -> Result<&'c ServiceOffering, BookingRejection> {
        if let Some(field) = self.first_missing() {
            return Err(BookingRejection::MissingField(field));
        }

        let offering = self
            .resolve_offering(carried, catalog)
            .ok_or(BookingRejection::NoOfferingSelected)?;

        if !code.accepts(&self.code_entry) {
            return Err(BookingRejection::CodeMismatch);
        }

        Ok(offering)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled_form(code: &str) -> BookingForm {
        BookingForm {
            name: "Asha".to_string(),
            phone: "9812345678".to_string(),
            address: "12 MG Road".to_string(),
            offering_id: Some(OfferingId::new("griha-pravesh")),
            date: "2024-11-01".to_string(),
            time: "18:00".to_string(),
            code_entry: code.to_string(),
            ..BookingForm::default()
        }
    }

    #[test]
    fn complete_form_resolves_offering() {
        let catalog = Catalog::standard();
        let code = DisplayCode::from_static("K7PQ2M");
        let offering = filled_form("k7pq2m").validate(None, &catalog, &code).unwrap();
        assert_eq!(offering.name, "Griha Pravesh Puja");
    }

    #[test]
    fn each_required_field_is_checked_in_order() {
        let catalog = Catalog::standard();
        let code = DisplayCode::from_static("K7PQ2M");
        for field in FormField::REQUIRED {
            let mut form = filled_form("K7PQ2M");
            form.apply_edit(field, String::new(), &SiteConfig::default()).unwrap();
            assert_eq!(
                form.validate(None, &catalog, &code),
                Err(BookingRejection::MissingField(field))
            );
        }

        let empty = BookingForm::new();
        assert_eq!(
            empty.validate(None, &catalog, &code),
            Err(BookingRejection::MissingField(FormField::Name))
        );
    }

    #[test]
    fn missing_field_wins_over_bad_code() {
        let catalog = Catalog::standard();
        let code = DisplayCode::from_static("K7PQ2M");
        let mut form = filled_form("WRONG1");
        form.time.clear();
        assert_eq!(
            form.validate(None, &catalog, &code),
            Err(BookingRejection::MissingField(FormField::Time))
        );
    }

    #[test]
    fn carried_selection_is_used_when_form_has_none() {
        let catalog = Catalog::standard();
        let code = DisplayCode::from_static("K7PQ2M");
        let mut form = filled_form("K7PQ2M");
        form.offering_id = None;

        assert_eq!(
            form.validate(None, &catalog, &code),
            Err(BookingRejection::NoOfferingSelected)
        );

        let carried = OfferingId::new("rudrabhishek");
        let offering = form.validate(Some(&carried), &catalog, &code).unwrap();
        assert_eq!(offering.name, "Rudrabhishek");
    }

    #[test]
    fn form_selection_beats_carried_selection() {
        let catalog = Catalog::standard();
        let carried = OfferingId::new("rudrabhishek");
        let form = filled_form("");
        let offering = form.resolve_offering(Some(&carried), &catalog).unwrap();
        assert_eq!(offering.id.as_str(), "griha-pravesh");
    }

    #[test]
    fn empty_code_entry_is_a_mismatch() {
        let catalog = Catalog::standard();
        let code = DisplayCode::from_static("K7PQ2M");
        assert_eq!(
            filled_form("").validate(None, &catalog, &code),
            Err(BookingRejection::CodeMismatch)
        );
    }

    #[test]
    fn select_fields_refuse_unknown_values() {
        let config = SiteConfig::default();
        let mut form = filled_form("");

        let err = form
            .apply_edit(FormField::Offering, "kirtan".to_string(), &config)
            .unwrap_err();
        assert_eq!(err, FieldEditError::UnknownOffering("kirtan".to_string()));
        assert_eq!(form.value(FormField::Offering), "griha-pravesh");

        form.apply_edit(FormField::Festival, "Diwali".to_string(), &config).unwrap();
        assert!(form.apply_edit(FormField::Festival, "Lohri".to_string(), &config).is_err());
        assert_eq!(form.festival.as_deref(), Some("Diwali"));

        form.apply_edit(FormField::Festival, String::new(), &config).unwrap();
        assert_eq!(form.festival, None);

        form.apply_edit(FormField::Offering, String::new(), &config).unwrap();
        assert_eq!(form.offering_id, None);
    }

    #[test]
    fn advance_takes_whole_non_negative_numbers() {
        let config = SiteConfig::default();
        let mut form = BookingForm::new();

        form.apply_edit(FormField::Advance, " 1100 ".to_string(), &config).unwrap();
        assert_eq!(form.advance, Some(1100));

        for bad in ["-5", "abc", "10.5"] {
            assert_eq!(
                form.apply_edit(FormField::Advance, bad.to_string(), &config),
                Err(FieldEditError::InvalidAdvance(bad.to_string()))
            );
        }
        assert_eq!(form.advance, Some(1100));

        form.apply_edit(FormField::Advance, String::new(), &config).unwrap();
        assert_eq!(form.advance, None);
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("Name".parse::<FormField>(), Ok(FormField::Name));
        assert_eq!("mobile".parse::<FormField>(), Ok(FormField::Phone));
        assert_eq!("code".parse::<FormField>(), Ok(FormField::CodeEntry));
        assert_eq!(
            "colour".parse::<FormField>(),
            Err(UnknownField("colour".to_string()))
        );
        assert_eq!(FormField::Advance.to_string(), "amount");
    }
}
