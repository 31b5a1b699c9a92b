//! HTML rendering of the booking page.
//!
//! The page is a pure function of [`BookingState`] and [`SiteConfig`]. All
//! visitor and configuration text is escaped.

use crate::catalog::ServiceOffering;
use crate::config::SiteConfig;
use crate::message::{chat_link, mailto_link, payment_confirmation_link, tel_link};
use crate::receipt::{escape_html, receipt_markup};
use crate::state::BookingState;
use std::fmt::Write as _;

const SITE_TITLE: &str = "Puja & Pandit Ji Services";

/// Renders the whole page
///
/// `year` is shown in the footer.
#[must_use]
pub fn render_page(state: &BookingState, config: &SiteConfig, year: i32) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{}</title></head><body>",
        escape_html(SITE_TITLE)
    );
    render_header(&mut html);
    render_hero(&mut html, config);
    render_catalog(&mut html, state, config);
    render_booking(&mut html, state, config);
    render_payment(&mut html, config);
    render_contact(&mut html, config);
    let _ = write!(
        html,
        "<footer>© {year} {}. All rights reserved.</footer></body></html>",
        escape_html(SITE_TITLE)
    );
    html
}

fn render_header(html: &mut String) {
    let _ = write!(
        html,
        "<header><div><strong>{}</strong><div>Spiritual rituals • Trusted guidance</div></div>\
         <nav><a href=\"#pujas\">Pujas</a><a href=\"#booking\">Booking</a>\
         <a href=\"#payment\">Payment</a><a href=\"#contact\">Contact</a></nav></header>",
        escape_html(SITE_TITLE)
    );
}

fn render_hero(html: &mut String, config: &SiteConfig) {
    let contact = &config.contact;
    let _ = write!(
        html,
        "<section id=\"hero\"><h1>Book Trusted Puja &amp; Rituals with {}</h1>\
         <p>Authentic Vedic rituals for your home, office, and auspicious occasions. \
         Clear pricing, materials list, and instant WhatsApp booking.</p>\
         <a href=\"#booking\">Book Now</a><a href=\"{}\">Call {}</a>",
        escape_html(&contact.provider_name),
        escape_html(&tel_link(&contact.phone)),
        escape_html(&contact.phone)
    );
    html.push_str("<div><div>Festival Advance Booking</div><ul class=\"festivals\">");
    for festival in &config.festivals {
        let _ = write!(html, "<li>{}</li>", escape_html(festival));
    }
    html.push_str(
        "</ul><p>Book early to secure your preferred date during peak seasons like Navratri and Diwali.</p></div></section>",
    );
}

fn render_catalog(html: &mut String, state: &BookingState, config: &SiteConfig) {
    let _ = write!(
        html,
        "<section id=\"pujas\"><h2>Available Pujas</h2><p>Transparent pricing with full materials list</p>\
         <input type=\"text\" name=\"query\" placeholder=\"Search puja or material…\" value=\"{}\">\
         <a href=\"#booking\">Go to Booking</a><div class=\"cards\">",
        escape_html(&state.query)
    );
    for offering in state.visible_offerings(&config.catalog) {
        render_card(html, offering);
    }
    html.push_str("</div></section>");
}

fn render_card(html: &mut String, offering: &ServiceOffering) {
    let _ = write!(
        html,
        "<article class=\"card\" data-id=\"{}\"><h3>{}</h3><p>{}</p>\
         <div class=\"price\">{}</div><div>Duration: {}</div><div>Materials:</div><ul>",
        escape_html(offering.id.as_str()),
        escape_html(&offering.name),
        escape_html(&offering.description),
        offering.price_label(),
        escape_html(&offering.duration)
    );
    for material in &offering.materials {
        let _ = write!(html, "<li>{}</li>", escape_html(material));
    }
    let _ = write!(
        html,
        "</ul><button name=\"book\" value=\"{}\">Book {}</button></article>",
        escape_html(offering.id.as_str()),
        escape_html(&offering.name)
    );
}

fn text_input(html: &mut String, label: &str, name: &str, kind: &str, value: &str) {
    let _ = write!(
        html,
        "<label>{label}<input type=\"{kind}\" name=\"{name}\" value=\"{}\"></label>",
        escape_html(value)
    );
}

fn render_booking(html: &mut String, state: &BookingState, config: &SiteConfig) {
    let form = &state.form;
    html.push_str(
        "<section id=\"booking\"><h2>Book a Puja</h2>\
         <p>Fill details, confirm captcha, and send to WhatsApp instantly</p>",
    );

    if let Some(reason) = &state.last_rejection {
        let _ = write!(html, "<div role=\"alert\">{}</div>", escape_html(&reason.to_string()));
    }

    html.push_str("<form>");
    text_input(html, "Full Name", "name", "text", &form.name);
    text_input(html, "Mobile Number", "phone", "tel", &form.phone);
    let _ = write!(
        html,
        "<label>Address<textarea name=\"address\">{}</textarea></label>",
        escape_html(&form.address)
    );
    text_input(html, "Date", "date", "date", &form.date);
    text_input(html, "Time", "time", "time", &form.time);

    let current = state.current_offering(&config.catalog);
    html.push_str("<label>Select Puja<select name=\"puja\"><option value=\"\">-- Select --</option>");
    for offering in config.catalog.iter() {
        let selected = if current.is_some_and(|c| c.id == offering.id) {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            html,
            "<option value=\"{}\"{selected}>{} – {}</option>",
            escape_html(offering.id.as_str()),
            escape_html(&offering.name),
            offering.price_label()
        );
    }
    html.push_str("</select></label>");
    if let Some(offering) = current {
        let _ = write!(
            html,
            "<p class=\"hint\">Materials: {}</p>",
            escape_html(&offering.materials.join(", "))
        );
    }

    html.push_str("<label>Festival (optional)<select name=\"festival\"><option value=\"\">-- None --</option>");
    for festival in &config.festivals {
        let selected = if form.festival.as_deref() == Some(festival.as_str()) {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            html,
            "<option{selected}>{}</option>",
            escape_html(festival)
        );
    }
    html.push_str("</select></label>");

    let advance = form.advance.map(|a| a.to_string()).unwrap_or_default();
    text_input(html, "Advance Amount (₹)", "amount", "number", &advance);
    let _ = write!(
        html,
        "<label>Special Instructions<textarea name=\"notes\">{}</textarea></label>",
        escape_html(&form.notes)
    );

    let _ = write!(
        html,
        "<label>Enter Captcha<input type=\"text\" name=\"captcha\" placeholder=\"Type the code shown\" value=\"{}\"></label>\
         <div class=\"code\">{}</div><button type=\"button\" name=\"refresh\">Refresh</button>\
         <button type=\"submit\">Confirm &amp; Send to WhatsApp</button></form>",
        escape_html(&form.code_entry),
        escape_html(state.code.as_str())
    );

    if let Some(booking) = &state.current_booking {
        html.push_str("<div id=\"receipt\">");
        html.push_str(&receipt_markup(booking, &config.contact));
        html.push_str("<button name=\"print\">Print / Save PDF</button>");
        if !booking.phone.is_empty() {
            html.push_str("<button name=\"send\">Send to Customer WhatsApp</button>");
        }
        html.push_str("</div>");
    }
    html.push_str("</section>");
}

fn render_payment(html: &mut String, config: &SiteConfig) {
    let payment = &config.payment;
    let _ = write!(
        html,
        "<section id=\"payment\"><h2>Payment – UPI / QR</h2>\
         <p>Scan and pay advance. Share transaction reference on WhatsApp for instant confirmation.</p>\
         <div>Scan QR to Pay</div><img src=\"{}\" alt=\"Payment QR\">\
         <div>UPI ID: <strong>{}</strong></div>\
         <ul><li>Pay advance to confirm your date during festivals.</li>\
         <li>Keep payment reference ID for receipt.</li>\
         <li>For any payment issue, message us on WhatsApp.</li></ul>\
         <a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">WhatsApp Payment Confirmation</a></section>",
        escape_html(&payment.qr_image_url),
        escape_html(&payment.upi_id),
        escape_html(&payment_confirmation_link(&config.contact))
    );
}

fn render_contact(html: &mut String, config: &SiteConfig) {
    let contact = &config.contact;
    let _ = write!(
        html,
        "<section id=\"contact\"><h2>Contact</h2><p>Reach out for muhurat &amp; custom rituals</p>\
         <div>Pandit Ji</div><div><strong>{name}</strong></div>\
         <div>Phone: <a href=\"{tel}\">{phone}</a></div>\
         <div>WhatsApp: <a href=\"{chat}\" target=\"_blank\" rel=\"noreferrer\">wa.me/{whatsapp}</a></div>\
         <div>Email: <a href=\"{mail}\">{email}</a></div>\
         <div>Address: {address}</div></section>",
        name = escape_html(&contact.provider_name),
        tel = escape_html(&tel_link(&contact.phone)),
        phone = escape_html(&contact.phone),
        chat = escape_html(&chat_link(&contact.whatsapp, None)),
        whatsapp = escape_html(&contact.whatsapp),
        mail = escape_html(&mailto_link(&contact.email)),
        email = escape_html(&contact.email),
        address = escape_html(&contact.address),
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::OfferingId;
    use crate::code::DisplayCode;
    use crate::error::BookingRejection;
    use crate::state::Booking;

    fn state() -> BookingState {
        BookingState::new(DisplayCode::from_static("K7PQ2M"))
    }

    #[test]
    fn page_lists_every_offering_and_festival() {
        let config = SiteConfig::default();
        let page = render_page(&state(), &config, 2025);
        for offering in config.catalog.iter() {
            assert!(page.contains(&format!("Book {}", escape_html(&offering.name))));
        }
        assert!(page.contains("<li>Makar Sankranti</li>"));
        assert!(page.contains("₹ 11,000"));
        assert!(page.contains("© 2025 Puja &amp; Pandit Ji Services."));
        assert!(page.contains("href=\"tel:+919876543210\""));
        assert!(page.contains("href=\"mailto:bookings@panditji.example\""));
        assert!(page.contains("href=\"https://wa.me/919876543210\""));
        assert!(page.contains("<div class=\"code\">K7PQ2M</div>"));
    }

    #[test]
    fn search_hides_non_matching_cards() {
        let mut state = state();
        state.query = "bilva".to_string();
        let page = render_page(&state, &SiteConfig::default(), 2025);
        assert!(page.contains("Book Rudrabhishek"));
        assert!(!page.contains("Book Griha Pravesh Puja"));
        assert!(page.contains("value=\"bilva\""));
    }

    #[test]
    fn selected_offering_shows_materials_hint() {
        let mut state = state();
        state.selected = Some(OfferingId::new("rudrabhishek"));
        let page = render_page(&state, &SiteConfig::default(), 2025);
        assert!(page.contains("<option value=\"rudrabhishek\" selected>"));
        assert!(page.contains("<p class=\"hint\">Materials: "));
    }

    #[test]
    fn receipt_and_rejection_render_when_present() {
        let config = SiteConfig::default();
        let mut state = state();
        assert!(!render_page(&state, &config, 2025).contains("id=\"receipt\""));

        state.last_rejection = Some(BookingRejection::CodeMismatch);
        let offering = config.catalog.find("griha-pravesh").unwrap();
        state.form.name = "<b>Asha</b>".to_string();
        state.current_booking = Some(Booking::from_form("PJ-1".to_string(), &state.form, offering));

        let page = render_page(&state, &config, 2025);
        assert!(page.contains("<div role=\"alert\">Captcha incorrect. Please try again.</div>"));
        assert!(page.contains("id=\"receipt\""));
        assert!(page.contains("&lt;b&gt;Asha&lt;/b&gt;"));
        assert!(!page.contains("<b>Asha</b>"));
        assert!(!page.contains("name=\"send\""));
    }
}
