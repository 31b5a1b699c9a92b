//! Receipt markup, the printable document and the customer's chat link.

use crate::catalog::format_amount;
use crate::config::ContactInfo;
use crate::message::{chat_link, digits_only, receipt_message};
use crate::state::Booking;
use std::fmt::Write as _;

/// Inline stylesheet of the print view
pub const PRINT_STYLESHEET: &str = "body{font-family:ui-sans-serif,system-ui,Segoe UI,Roboto,Helvetica,Arial;padding:24px} .box{border:1px solid #ddd;border-radius:12px;padding:16px} .muted{color:#475569}";

/// Escapes text for use inside HTML element content and attribute values
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Receipt body as rendered on the page and copied into the print view
#[must_use]
pub fn receipt_markup(booking: &Booking, contact: &ContactInfo) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"box\">");
    html.push_str("<h3>Receipt – Puja Booking</h3>");
    let _ = write!(html, "<p class=\"muted\">Order ID: {}</p><hr>", escape_html(&booking.order_id));

    html.push_str("<div><div><strong>Customer</strong>");
    for line in [&booking.name, &booking.phone, &booking.address] {
        let _ = write!(html, "<div class=\"muted\">{}</div>", escape_html(line));
    }
    html.push_str("</div>");

    html.push_str("<div><strong>Booking Details</strong>");
    let _ = write!(html, "<div class=\"muted\">Puja: {}</div>", escape_html(&booking.offering_name));
    let _ = write!(html, "<div class=\"muted\">Date: {}</div>", escape_html(&booking.date));
    let _ = write!(html, "<div class=\"muted\">Time: {}</div>", escape_html(&booking.time));
    let _ = write!(
        html,
        "<div class=\"muted\">Advance Paid: ₹ {}</div>",
        format_amount(booking.advance)
    );
    html.push_str("</div></div>");

    if !booking.notes.is_empty() {
        let _ = write!(
            html,
            "<div><strong>Notes</strong><div class=\"muted\">{}</div></div>",
            escape_html(&booking.notes)
        );
    }

    html.push_str("<hr><div><strong>Pandit Ji</strong>");
    let _ = write!(html, "<div class=\"muted\">{}</div>", escape_html(&contact.provider_name));
    let _ = write!(html, "<div class=\"muted\">Phone: {}</div>", escape_html(&contact.phone));
    let _ = write!(html, "<div class=\"muted\">Address: {}</div>", escape_html(&contact.address));
    html.push_str("</div></div>");
    html
}

/// Standalone document handed to the host's print dialog
#[must_use]
pub fn print_document(markup: &str) -> String {
    format!(
        "<!doctype html><html><head><title>Receipt</title><style>{PRINT_STYLESHEET}</style></head><body>{markup}</body></html>"
    )
}

/// Chat link that sends the receipt to the customer's own number
///
/// `None` when the booking has no phone, in which case the action is not offered.
#[must_use]
pub fn customer_link(booking: &Booking, contact: &ContactInfo) -> Option<String> {
    if booking.phone.is_empty() {
        return None;
    }
    Some(chat_link(
        &digits_only(&booking.phone),
        Some(&receipt_message(booking, contact)),
    ))
}
