//! Terminal formatting for listing rows and chat details

use chrono::{DateTime, Datelike, Utc};

use crate::models::{Chat, ChatListRow};
use crate::parsers::timestamps::parse_timestamp;
use crate::utils::terminal::strip_ansi_codes;

const MAX_TITLE_CHARS: usize = 60;
const UNDATED: &str = "-";

/// Format timestamp with tiered display:
/// - Relative for <7 days: "2h ago", "3d ago"
/// - Absolute for ≥7 days: "Jan 15", "Dec 3, 2024"
pub fn format_timestamp(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(*timestamp);

    if duration.num_seconds() >= 0 && duration.num_days() < 7 {
        format_relative(duration.num_seconds())
    } else {
        format_absolute(timestamp, now)
    }
}

fn format_relative(seconds: i64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "just now".to_string()
    }
}

fn format_absolute(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    if timestamp.year() == now.year() {
        timestamp.format("%b %-d").to_string()
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}

/// Display form of a stored `created_at`; stored values are naive and read as UTC
pub fn format_created(created_at: Option<&str>, now: &DateTime<Utc>) -> String {
    created_at
        .and_then(parse_timestamp)
        .map(|naive| format_timestamp(&naive.and_utc(), now))
        .unwrap_or_else(|| UNDATED.to_string())
}

/// Single-line, escape-free title cut to a fixed width
fn display_title(title: &str) -> String {
    let clean: String = strip_ansi_codes(title)
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();

    if clean.chars().count() > MAX_TITLE_CHARS {
        let cut: String = clean.chars().take(MAX_TITLE_CHARS - 1).collect();
        format!("{}…", cut)
    } else {
        clean
    }
}

/// `id  when  title  [categories]`
pub fn format_list_row(row: &ChatListRow, now: &DateTime<Utc>) -> String {
    let mut line = format!(
        "{}  {:>12}  {}",
        strip_ansi_codes(&row.id),
        format_created(row.created_at.as_deref(), now),
        display_title(&row.title)
    );
    if !row.categories.is_empty() {
        line.push_str(&format!("  [{}]", strip_ansi_codes(&row.categories)));
    }
    line
}

/// Header block plus full content
pub fn format_chat(chat: &Chat, categories: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!("ID:         {}\n", strip_ansi_codes(&chat.id)));
    out.push_str(&format!("Title:      {}\n", strip_ansi_codes(&chat.title)));
    out.push_str(&format!("Created:    {}\n", strip_ansi_codes(chat.created_at.as_deref().unwrap_or(UNDATED))));
    if !chat.model.is_empty() {
        out.push_str(&format!("Model:      {}\n", strip_ansi_codes(&chat.model)));
    }
    if !categories.is_empty() {
        out.push_str(&format!("Categories: {}\n", strip_ansi_codes(&categories.join(", "))));
    }
    out.push('\n');
    out.push_str(&strip_ansi_codes(&chat.content));
    out
}
