use chrono::{DateTime, Utc};
use url::form_urlencoded::byte_serialize;

use super::OutgoingEmail;
use db::models::{event, user};
use util::time::civil_zone;

/// Reminders go out with the standing venue and slot.
pub const REMINDER_VENUE: &str = "PTP - HALL";
pub const REMINDER_TIME: &str = "3:00 PM";

const CHANGE_PASSWORD_HINT: &str =
    "Please change it from your dashboard after your first login.";

const QR_IMAGE_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Remote-rendered QR image for embedding in HTML mail.
pub fn qr_image_url(qr_code: &str) -> String {
    format!("{QR_IMAGE_ENDPOINT}?data={}&size=200x200", encode(qr_code))
}

pub fn dashboard_url(app_url: &str, email: &str) -> String {
    format!("{app_url}/student-dashboard?email={}", encode(email))
}

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// `title` and `from_name` are escaped here; `body` must already be safe HTML.
fn wrap_html(title: &str, body: &str, from_name: &str) -> String {
    let title = escape_html(title);
    let from_name = escape_html(from_name);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; text-align: center; }}
        .button {{
            display: inline-block;
            padding: 10px 20px;
            background-color: #007bff;
            color: #ffffff !important;
            text-decoration: none;
            border-radius: 5px;
            margin: 20px 0;
            font-weight: bold;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h2>{title}</h2>
        {body}
        <p>Best regards,<br>{from_name}</p>
    </div>
</body>
</html>"#
    )
}

/// Sent after self-service registration and administrator bulk-add.
///
/// `initial_password` is included only for bulk-added accounts, which receive the
/// shared default password.
pub fn registration_welcome(
    user: &user::Model,
    app_url: &str,
    from_name: &str,
    initial_password: Option<&str>,
) -> OutgoingEmail {
    let qr_image = qr_image_url(&user.qr_code);
    let dashboard = dashboard_url(app_url, &user.email);
    let password_line = initial_password
        .map(|p| format!("Your initial password is: {p}\n{CHANGE_PASSWORD_HINT}\n\n"))
        .unwrap_or_default();
    let password_html = initial_password
        .map(|p| {
            format!(
                "<p>Your initial password is <strong>{}</strong>. {CHANGE_PASSWORD_HINT}</p>",
                escape_html(p)
            )
        })
        .unwrap_or_default();

    let text = format!(
        "Hello {name},\n\n\
         Your registration is complete. Show your QR code at every session to have your attendance recorded:\n\n\
         {qr}\n\n\
         {password_line}\
         Your dashboard: {dashboard}\n\n\
         Best regards,\n\
         {from_name}",
        name = user.name,
        qr = user.qr_code,
    );

    let html = wrap_html(
        &format!("Welcome, {}!", user.name),
        &format!(
            r#"<p>Your registration is complete. Show this QR code at every session to have your attendance recorded.</p>
        <img src="{qr_image}" alt="Your QR code" width="200" height="200" />
        <p>Roll number: <strong>{roll}</strong></p>
        {password_html}
        <a href="{dashboard}" class="button">Open your dashboard</a>"#,
            qr_image = escape_html(&qr_image),
            roll = escape_html(&user.roll_number),
            dashboard = escape_html(&dashboard),
        ),
        from_name,
    );

    OutgoingEmail {
        to: user.email.clone(),
        subject: format!("Welcome to {from_name}"),
        text,
        html,
    }
}

/// Sent once per civil day, on the first successful mark.
pub fn attendance_confirmation(
    user: &user::Model,
    taken_at: DateTime<Utc>,
    civil_offset_minutes: i32,
    from_name: &str,
) -> OutgoingEmail {
    let local = taken_at.with_timezone(&civil_zone(civil_offset_minutes));
    let when = local.format("%d %b %Y, %I:%M %p").to_string();

    let text = format!(
        "Hello {name},\n\n\
         Thanks for attending. Your attendance was recorded on {when}.\n\n\
         Best regards,\n\
         {from_name}",
        name = user.name,
    );

    let html = wrap_html(
        "Thanks For Attending the Event",
        &format!(
            "<p>Hello {name},</p>\n        \
             <p>Your attendance was recorded on <strong>{when}</strong>.</p>",
            name = escape_html(&user.name),
        ),
        from_name,
    );

    OutgoingEmail {
        to: user.email.clone(),
        subject: "Thanks For Attending the Event".to_string(),
        text,
        html,
    }
}

pub fn event_reminder(user: &user::Model, event: &event::Model, from_name: &str) -> OutgoingEmail {
    let text = format!(
        "Hello {name},\n\n\
         This is a reminder for {event}.\n\
         Date: {date}\n\
         Time: {REMINDER_TIME}\n\
         Venue: {REMINDER_VENUE}\n\n\
         Please bring your QR code.\n\n\
         Best regards,\n\
         {from_name}",
        name = user.name,
        event = event.name,
        date = event.event_date,
    );

    let html = wrap_html(
        &format!("Reminder: {}", event.name),
        &format!(
            r#"<p>Hello {name},</p>
        <p>This is a reminder for <strong>{event}</strong>.</p>
        <p>Date: {date}<br>Time: {REMINDER_TIME}<br>Venue: {REMINDER_VENUE}</p>
        <p>Please bring your QR code.</p>"#,
            name = escape_html(&user.name),
            event = escape_html(&event.name),
            date = escape_html(&event.event_date),
        ),
        from_name,
    );

    OutgoingEmail {
        to: user.email.clone(),
        subject: format!("Reminder: PTP - {}", event.name),
        text,
        html,
    }
}
