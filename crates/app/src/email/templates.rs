//! Email templates.

use jiff::{Timestamp, tz::TimeZone};

use crate::email::{EmailMessage, EmailTemplate};

pub const CLIENT_PORTAL_LINK_SUBJECT: &str = "Your client portal access link";

/// Render the client portal link email.
#[must_use]
pub fn client_portal_link(
    to: &str,
    customer_name: &str,
    access_link: &str,
    expires_at: Timestamp,
) -> EmailMessage {
    let expires_on = expires_at.to_zoned(TimeZone::UTC).strftime("%B %-d, %Y");
    let name = escape_html(customer_name);
    let link = escape_html(access_link);

    let html = format!(
        "<p>Hello {name},</p>\
         <p>You can view your invoices and account details in the client portal:</p>\
         <p><a href=\"{link}\">Open client portal</a></p>\
         <p>This link expires on {expires_on}.</p>"
    );

    let text = format!(
        "Hello {customer_name},\n\n\
         You can view your invoices and account details in the client portal:\n\n\
         {access_link}\n\n\
         This link expires on {expires_on}.\n"
    );

    EmailMessage {
        to: to.to_string(),
        subject: CLIENT_PORTAL_LINK_SUBJECT.to_string(),
        html,
        text,
        template: EmailTemplate::ClientPortalLink,
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }

    escaped
}
