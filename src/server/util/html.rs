//! Minimal HTML rendering for pages opened straight from Discord.

use axum::response::Html;

use crate::server::model::rp_application::{ModerationOutcome, RpApplicationStatus};

/// Escapes text for safe inclusion in HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Heading shown after following a moderation link.
pub fn moderation_heading(outcome: &ModerationOutcome) -> &'static str {
    if !outcome.applied {
        return "Application already processed";
    }

    match outcome.application.status {
        RpApplicationStatus::Accepted => "Application accepted",
        RpApplicationStatus::Canceled => "Application canceled",
        RpApplicationStatus::Pending => "Application returned to review",
    }
}

/// Renders the confirmation page for a followed moderation link.
pub fn render_moderation_page(outcome: &ModerationOutcome) -> Html<String> {
    let heading = moderation_heading(outcome);
    let action = if outcome.applied {
        outcome.action.as_str()
    } else {
        "already-processed"
    };

    Html(format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{heading}</title>
    <style>
      body{{font-family:system-ui;background:#0f1118;color:#fff;margin:0;padding:40px}}
      .card{{max-width:760px;margin:0 auto;padding:24px;border-radius:14px;background:#171a26;border:1px solid rgba(255,255,255,.12)}}
      .muted{{color:#b4b6c7}}
    </style>
  </head>
  <body>
    <div class="card">
      <h1>{heading}</h1>
      <p class="muted">Nickname: {nickname}</p>
      <p class="muted">Status: {status}</p>
      <p class="muted">Action: {action}</p>
    </div>
  </body>
</html>"#,
        heading = heading,
        nickname = escape(&outcome.application.fields.nickname),
        status = outcome.application.status.as_str(),
        action = action,
    ))
}
