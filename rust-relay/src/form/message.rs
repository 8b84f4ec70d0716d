//! Discord message rendering.

use std::fmt;

use tracing::warn;

use super::{Category, Submission, FORM_FIELD};
use crate::pricing::{quote_from_choices, MissionType, Quote};

/// Discord rejects `content` longer than this many characters.
pub const DISCORD_CONTENT_LIMIT: usize = 2000;

const PSN_FIELDS: [&str; 2] = ["client_psn", "applicant_psn"];
const DISCORD_FIELDS: [&str; 2] = ["discord_name", "applicant_discord"];

/// Client-sent fields that would shadow the server's own price lines.
const PRICE_FIELD_PREFIXES: [&str; 3] = ["total", "deposit", "cost"];

/// One line of the outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Bold title with optional sequence tag
    Header { tag: Option<String>, form_name: String },
    /// Field the relay knows about and renders with a fixed label
    Known { label: &'static str, value: String },
    /// Server-computed price
    Price { label: &'static str, caps: u64 },
    /// Any other submitted field, labelled from its name
    PassThrough { label: String, value: String },
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Header { tag: Some(tag), form_name } => write!(f, "**{tag} | {form_name}**"),
            Line::Header { tag: None, form_name } => write!(f, "**{form_name}**"),
            Line::Known { label, value } => write!(f, "**{label}:** {value}"),
            Line::Price { label, caps } => write!(f, "**{label}:** {caps} caps"),
            Line::PassThrough { label, value } => write!(f, "**{label}:** {value}"),
        }
    }
}

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub lines: Vec<Line>,
    /// Authoritative quote, present for contracts only
    pub quote: Option<Quote>,
}

impl RenderedMessage {
    /// Message text, newline-joined and clipped to Discord's limit.
    pub fn content(&self) -> String {
        let joined = self
            .lines
            .iter()
            .map(Line::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        truncate_chars(joined, DISCORD_CONTENT_LIMIT)
    }
}

/// Build the message for a classified submission.
///
/// `sequence` is the number shown in the `C-###`/`R-###` tag; generic
/// submissions carry no tag regardless.
pub fn render_message(
    submission: &Submission,
    category: Category,
    sequence: Option<u32>,
) -> RenderedMessage {
    let mut lines = Vec::new();
    let mut surfaced: Vec<String> = vec![FORM_FIELD.to_string()];
    surfaced.extend(PSN_FIELDS.iter().map(|s| s.to_string()));
    surfaced.extend(DISCORD_FIELDS.iter().map(|s| s.to_string()));

    let tag = match (category, sequence) {
        (Category::Contract(_), Some(n)) => Some(format!("C-{n:03}")),
        (Category::Recruitment, Some(n)) => Some(format!("R-{n:03}")),
        _ => None,
    };
    let form_name = submission
        .non_empty(FORM_FIELD)
        .unwrap_or("Submission")
        .to_string();
    lines.push(Line::Header { tag, form_name });

    if let Some(psn) = submission.first_non_empty(&PSN_FIELDS) {
        lines.push(Line::Known { label: "PSN", value: psn.to_string() });
    }
    if let Some(discord) = submission.first_non_empty(&DISCORD_FIELDS) {
        lines.push(Line::Known { label: "Discord", value: discord.to_string() });
    }

    let mut quote = None;
    if let Category::Contract(mission) = category {
        let q = contract_lines(submission, mission, &mut lines, &mut surfaced);
        quote = Some(q);
    }

    for (name, value) in submission.iter() {
        if value.trim().is_empty() || surfaced.iter().any(|s| s == name) {
            continue;
        }
        if quote.is_some() && is_price_field(name) {
            warn!(field = name, "client_price_field_ignored");
            continue;
        }
        lines.push(Line::PassThrough {
            label: title_case(name),
            value: value.to_string(),
        });
    }

    RenderedMessage { lines, quote }
}

/// Append the price lines and the raw choices behind them.
fn contract_lines(
    submission: &Submission,
    mission: MissionType,
    lines: &mut Vec<Line>,
    surfaced: &mut Vec<String>,
) -> Quote {
    let key = mission.key();
    let value_field = format!("value_{key}");
    let duration_field = format!("duration_{key}");
    let operators_field = format!("operators_{key}");

    let value = submission.non_empty(&value_field);
    let duration = submission.non_empty(&duration_field);
    let operators = submission.non_empty(&operators_field);

    let q = quote_from_choices(mission, value, duration, operators);

    lines.push(Line::Price { label: "Total", caps: q.total });
    lines.push(Line::Price { label: "Deposit", caps: q.deposit });

    for (label, choice) in [("Value", value), ("Duration", duration), ("Operators", operators)] {
        if let Some(choice) = choice {
            lines.push(Line::Known { label, value: choice.to_string() });
        }
    }

    surfaced.extend([value_field, duration_field, operators_field]);
    q
}

fn is_price_field(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    PRICE_FIELD_PREFIXES.iter().any(|prefix| {
        name == *prefix
            || name
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('_'))
    })
}

/// `snake_case` field name to a Title Case label.
///
/// Underscores become spaces and every ASCII letter or digit that starts a
/// word is uppercased (`pickup_location` → `Pickup Location`).
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;

    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric();
        if is_word && at_word_start {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !is_word;
    }
    out
}

fn truncate_chars(text: String, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text;
    }
    let mut clipped: String = text.chars().take(limit - 1).collect();
    clipped.push('…');
    clipped
}
