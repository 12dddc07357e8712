//! Session notification email rendering.
//!
//! [`render_session_email`] produces the subject line, HTML body and
//! plain-text body for one recipient. It is total: missing optional session
//! fields drop their section instead of failing.

use crate::campaign::{NotificationKind, Recipient, SessionDetails};
use crate::types::Timestamp;

/// Date layout used in message bodies, e.g. `Saturday, March 14, 2026 at 7:30 PM UTC`.
const DATE_FORMAT: &str = "%A, %B %-d, %Y at %-I:%M %p UTC";

/// A fully rendered notification, ready to hand to a mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Render the notification for `recipient` about `session` in `campaign_name`.
///
/// `campaign_url`, when present, adds a "View campaign" link.
pub fn render_session_email(
    kind: NotificationKind,
    campaign_name: &str,
    session: &SessionDetails,
    recipient: &Recipient,
    campaign_url: Option<&str>,
) -> RenderedEmail {
    let title = non_blank(session.title.as_deref());
    let summary = non_blank(session.summary.as_deref());
    let date = session.date.as_ref().map(format_date);
    let duration = session
        .duration_hours
        .filter(|h| h.is_finite() && *h > 0.0)
        .map(format_duration);

    let (headline, lead) = match kind {
        NotificationKind::Created => (
            "New session scheduled",
            format!("A new session has been scheduled for your campaign {campaign_name}."),
        ),
        NotificationKind::Updated => (
            "Session updated",
            format!("A session in your campaign {campaign_name} has been updated."),
        ),
    };

    let subject = match title {
        Some(title) => format!(
            "{headline}: {campaign_name} - Session {}: {title}",
            session.session_number
        ),
        None => format!("{headline}: {campaign_name} - Session {}", session.session_number),
    };

    let mut details: Vec<(&str, String)> =
        vec![("Session", session.session_number.to_string())];
    if let Some(title) = title {
        details.push(("Title", title.to_string()));
    }
    if let Some(date) = date {
        details.push(("Date", date));
    }
    if let Some(duration) = duration {
        details.push(("Duration", duration));
    }

    let footer = format!(
        "You are receiving this because you are a member of {campaign_name}. \
         You can change your notification preferences in your profile settings."
    );

    RenderedEmail {
        subject,
        text: render_text(recipient, &lead, &details, summary, campaign_url, &footer),
        html: render_html(
            recipient,
            headline,
            &lead,
            &details,
            summary,
            campaign_url,
            &footer,
        ),
    }
}

fn render_text(
    recipient: &Recipient,
    lead: &str,
    details: &[(&str, String)],
    summary: Option<&str>,
    campaign_url: Option<&str>,
    footer: &str,
) -> String {
    let mut lines = vec![
        format!("Hi {},", recipient.greeting_name()),
        String::new(),
        lead.to_string(),
        String::new(),
    ];
    lines.extend(details.iter().map(|(label, value)| format!("{label}: {value}")));
    if let Some(summary) = summary {
        lines.extend([String::new(), "Summary:".to_string(), summary.to_string()]);
    }
    if let Some(url) = campaign_url {
        lines.extend([String::new(), format!("View campaign: {url}")]);
    }
    lines.extend([
        String::new(),
        "Happy adventuring!".to_string(),
        footer.to_string(),
    ]);
    lines.join("\n")
}

fn render_html(
    recipient: &Recipient,
    headline: &str,
    lead: &str,
    details: &[(&str, String)],
    summary: Option<&str>,
    campaign_url: Option<&str>,
    footer: &str,
) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<body style=\"font-family: sans-serif; color: #222;\">\n",
    );
    html.push_str(&format!("<h2>{}</h2>\n", escape_html(headline)));
    html.push_str(&format!(
        "<p>Hi {},</p>\n",
        escape_html(recipient.greeting_name())
    ));
    html.push_str(&format!("<p>{}</p>\n", escape_html(lead)));

    html.push_str("<table cellpadding=\"4\">\n");
    for (label, value) in details {
        html.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td>{}</td></tr>\n",
            escape_html(label),
            escape_html(value)
        ));
    }
    html.push_str("</table>\n");

    if let Some(summary) = summary {
        html.push_str(&format!(
            "<h3>Summary</h3>\n<p>{}</p>\n",
            escape_html(summary).replace('\n', "<br>")
        ));
    }
    if let Some(url) = campaign_url {
        html.push_str(&format!(
            "<p><a href=\"{}\">View campaign</a></p>\n",
            escape_html(url)
        ));
    }
    html.push_str("<p>Happy adventuring!</p>\n");
    html.push_str(&format!(
        "<p style=\"font-size: 12px; color: #777;\">{}</p>\n",
        escape_html(footer)
    ));
    html.push_str("</body>\n</html>\n");
    html
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn format_date(date: &Timestamp) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_duration(hours: f64) -> String {
    if hours == 1.0 {
        "1 hour".to_string()
    } else {
        format!("{hours} hours")
    }
}

/// Escape the five HTML-significant characters.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::campaign::NotificationPreferences;

    fn recipient() -> Recipient {
        Recipient {
            id: 1,
            username: "vex".to_string(),
            display_name: Some("Vex'ahlia".to_string()),
            email: "vex@example.com".to_string(),
            preferences: NotificationPreferences::default(),
        }
    }

    fn full_session() -> SessionDetails {
        SessionDetails {
            session_number: 12,
            title: Some("The Sunken Tomb".to_string()),
            date: Some(chrono::Utc.with_ymd_and_hms(2026, 3, 14, 19, 30, 0).unwrap()),
            duration_hours: Some(3.5),
            summary: Some("Descend into the tomb.\nBring torches.".to_string()),
        }
    }

    #[test]
    fn created_subject_includes_campaign_number_and_title() {
        let email = render_session_email(
            NotificationKind::Created,
            "Vox Machina",
            &full_session(),
            &recipient(),
            None,
        );
        assert_eq!(
            email.subject,
            "New session scheduled: Vox Machina - Session 12: The Sunken Tomb"
        );
    }

    #[test]
    fn updated_subject_without_title() {
        let session = SessionDetails {
            session_number: 4,
            ..Default::default()
        };
        let email = render_session_email(
            NotificationKind::Updated,
            "Vox Machina",
            &session,
            &recipient(),
            None,
        );
        assert_eq!(email.subject, "Session updated: Vox Machina - Session 4");
    }

    #[test]
    fn full_session_renders_every_section() {
        let email = render_session_email(
            NotificationKind::Created,
            "Vox Machina",
            &full_session(),
            &recipient(),
            Some("https://questlog.example.com/campaigns/1"),
        );

        assert!(email.text.starts_with("Hi Vex'ahlia,"));
        assert!(email.text.contains("Title: The Sunken Tomb"));
        assert!(email.text.contains("Date: Saturday, March 14, 2026 at 7:30 PM UTC"));
        assert!(email.text.contains("Duration: 3.5 hours"));
        assert!(email.text.contains("Summary:\nDescend into the tomb.\nBring torches."));
        assert!(email.text.contains("View campaign: https://questlog.example.com/campaigns/1"));

        assert!(email.html.contains("<p>Hi Vex&#39;ahlia,</p>"));
        assert!(email.html.contains("Descend into the tomb.<br>Bring torches."));
        assert!(email.html.contains("href=\"https://questlog.example.com/campaigns/1\""));
    }

    #[test]
    fn missing_optional_fields_are_omitted() {
        let session = SessionDetails {
            session_number: 1,
            title: Some("   ".to_string()),
            ..Default::default()
        };
        let email = render_session_email(
            NotificationKind::Created,
            "Vox Machina",
            &session,
            &recipient(),
            None,
        );

        for body in [&email.text, &email.html] {
            assert!(!body.contains("Title"));
            assert!(!body.contains("Date"));
            assert!(!body.contains("Duration"));
            assert!(!body.contains("Summary"));
            assert!(!body.contains("View campaign"));
        }
        assert!(email.text.contains("Session: 1"));
    }

    #[test]
    fn single_hour_is_singular() {
        let session = SessionDetails {
            session_number: 2,
            duration_hours: Some(1.0),
            ..Default::default()
        };
        let email = render_session_email(
            NotificationKind::Updated,
            "Vox Machina",
            &session,
            &recipient(),
            None,
        );
        assert!(email.text.contains("Duration: 1 hour\n"));
    }

    #[test]
    fn html_escapes_user_content() {
        let session = SessionDetails {
            session_number: 3,
            title: Some("<script>alert(1)</script>".to_string()),
            ..Default::default()
        };
        let email = render_session_email(
            NotificationKind::Created,
            "Tom & Jerry",
            &session,
            &recipient(),
            None,
        );
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;"));
        assert!(email.html.contains("Tom &amp; Jerry"));
        // Plain text is left as-is.
        assert!(email.text.contains("Tom & Jerry"));
    }
}
