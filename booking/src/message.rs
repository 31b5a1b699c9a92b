//! Message texts and the deep links that carry them.
//!
//! Every outbound action ends in a URL the host opens: a chat link with a
//! pre-filled message, a dialer link or a mail link.

use crate::catalog::format_amount;
use crate::config::ContactInfo;
use crate::state::Booking;

/// Base URL of the messaging app's click-to-chat links
pub const MESSAGING_HOST: &str = "https://wa.me";

/// Pre-filled text of the payment confirmation link
pub const PAYMENT_CONFIRMATION_TEXT: &str =
    "Hello Pandit Ji, I have paid the advance. My name is ";

/// Placeholder for optional fields left empty
const EMPTY_PLACEHOLDER: &str = "-";

/// Keeps only ASCII digits (`+91 98123-45678` → `919812345678`)
#[must_use]
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// `https://wa.me/<contact>` with an optional URL-encoded `text` parameter
#[must_use]
pub fn chat_link(contact: &str, text: Option<&str>) -> String {
    match text {
        Some(text) => format!(
            "{MESSAGING_HOST}/{contact}?text={}",
            urlencoding::encode(text)
        ),
        None => format!("{MESSAGING_HOST}/{contact}"),
    }
}

/// Dialer link for a published number; whitespace is dropped
#[must_use]
pub fn tel_link(phone: &str) -> String {
    let number: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{number}")
}

/// Mail client link
#[must_use]
pub fn mailto_link(email: &str) -> String {
    format!("mailto:{email}")
}

/// Text sent to the provider when a booking is accepted
#[must_use]
pub fn provider_message(booking: &Booking) -> String {
    let festival = booking.festival.as_deref().unwrap_or(EMPTY_PLACEHOLDER);
    let notes = if booking.notes.is_empty() {
        EMPTY_PLACEHOLDER
    } else {
        booking.notes.as_str()
    };

    [
        "New Puja Booking".to_string(),
        format!("Order ID: {}", booking.order_id),
        format!("Name: {}", booking.name),
        format!("Phone: {}", booking.phone),
        format!("Address: {}", booking.address),
        format!("Puja: {}", booking.offering_name),
        format!("Date: {}", booking.date),
        format!("Time: {}", booking.time),
        format!("Festival: {festival}"),
        format!("Advance (₹): {}", booking.advance),
        format!("Notes: {notes}"),
    ]
    .join("\n")
}

/// Chat link that delivers the booking to the provider
#[must_use]
pub fn provider_link(booking: &Booking, contact: &ContactInfo) -> String {
    chat_link(&contact.whatsapp, Some(&provider_message(booking)))
}

/// Receipt text sent to the customer's own number
#[must_use]
pub fn receipt_message(booking: &Booking, contact: &ContactInfo) -> String {
    [
        "Receipt – Puja Booking".to_string(),
        format!("Order ID: {}", booking.order_id),
        format!("Name: {}", booking.name),
        format!("Phone: {}", booking.phone),
        format!("Address: {}", booking.address),
        format!("Puja: {}", booking.offering_name),
        format!("Date: {}", booking.date),
        format!("Time: {}", booking.time),
        format!("Advance Paid: ₹ {}", format_amount(booking.advance)),
        format!("Thank you for booking with {}.", contact.provider_name),
    ]
    .join("\n")
}

/// Link the visitor uses to tell the provider an advance was paid
#[must_use]
pub fn payment_confirmation_link(contact: &ContactInfo) -> String {
    chat_link(&contact.whatsapp, Some(PAYMENT_CONFIRMATION_TEXT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OfferingId;

    fn booking() -> Booking {
        Booking {
            order_id: "PJ-56789123".to_string(),
            name: "Asha".to_string(),
            phone: "98123 45678".to_string(),
            address: "12 MG Road".to_string(),
            offering_id: OfferingId::new("griha-pravesh"),
            offering_name: "Griha Pravesh Puja".to_string(),
            date: "2024-11-01".to_string(),
            time: "18:00".to_string(),
            festival: None,
            advance: 0,
            notes: String::new(),
        }
    }

    #[test]
    fn provider_message_uses_placeholders() {
        let text = provider_message(&booking());
        assert_eq!(
            text,
            "New Puja Booking\nOrder ID: PJ-56789123\nName: Asha\nPhone: 98123 45678\n\
             Address: 12 MG Road\nPuja: Griha Pravesh Puja\nDate: 2024-11-01\nTime: 18:00\n\
             Festival: -\nAdvance (₹): 0\nNotes: -"
        );
    }

    #[test]
    fn provider_message_includes_optional_fields() {
        let mut booking = booking();
        booking.festival = Some("Diwali".to_string());
        booking.advance = 1100;
        booking.notes = "Gate 2".to_string();
        let text = provider_message(&booking);
        assert!(text.contains("Festival: Diwali"));
        assert!(text.contains("Advance (₹): 1100"));
        assert!(text.ends_with("Notes: Gate 2"));
    }

    #[test]
    fn chat_link_encodes_text() {
        assert_eq!(
            chat_link("919876543210", Some("Hi & bye\nok")),
            "https://wa.me/919876543210?text=Hi%20%26%20bye%0Aok"
        );
        assert_eq!(chat_link("919876543210", None), "https://wa.me/919876543210");
    }

    #[test]
    fn provider_link_targets_configured_contact() {
        let link = provider_link(&booking(), &ContactInfo::default());
        assert!(link.starts_with("https://wa.me/919876543210?text=New%20Puja%20Booking%0A"));
        assert!(link.contains("Order%20ID%3A%20PJ-56789123"));
    }

    #[test]
    fn receipt_message_thanks_provider() {
        let mut booking = booking();
        booking.advance = 2500;
        let text = receipt_message(&booking, &ContactInfo::default());
        assert!(text.starts_with("Receipt – Puja Booking\nOrder ID: PJ-56789123\n"));
        assert!(text.contains("Advance Paid: ₹ 2,500"));
        assert!(text.ends_with("Thank you for booking with Pandit Vinod Sharma."));
    }

    #[test]
    fn contact_links() {
        assert_eq!(digits_only("+91 98123-45678"), "919812345678");
        assert_eq!(tel_link("+91 98765 43210"), "tel:+919876543210");
        assert_eq!(mailto_link("a@b.example"), "mailto:a@b.example");
        assert!(
            payment_confirmation_link(&ContactInfo::default())
                .ends_with("?text=Hello%20Pandit%20Ji%2C%20I%20have%20paid%20the%20advance.%20My%20name%20is%20")
        );
    }
}
