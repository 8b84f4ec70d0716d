//! Form submission handling.
//!
//! ## Flow
//!
//! ```text
//! body → Submission::parse() → Category::classify() → render_message() → webhook
//! ```

pub mod message;
pub mod submission;

use crate::pricing::MissionType;

pub use message::{render_message, title_case, Line, RenderedMessage, DISCORD_CONTENT_LIMIT};
pub use submission::Submission;

/// Field carrying the human-readable form name.
pub const FORM_FIELD: &str = "form";

/// What kind of request a submission is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Priced contract for a mission
    Contract(MissionType),
    /// Application to join the company
    Recruitment,
    /// Anything else: relayed as-is without pricing or numbering
    Generic,
}

impl Category {
    /// Classify a submission by its form name, case-insensitively.
    ///
    /// "recruitment" anywhere in the name wins; otherwise the first mission
    /// whose key appears in the name makes it a contract.
    pub fn classify(form_name: Option<&str>) -> Self {
        let Some(name) = form_name else {
            return Category::Generic;
        };
        let name = name.to_lowercase();

        if name.contains("recruitment") {
            return Category::Recruitment;
        }

        MissionType::ALL
            .into_iter()
            .find(|m| name.contains(m.key()))
            .map(Category::Contract)
            .unwrap_or(Category::Generic)
    }

    /// Short name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Contract(_) => "contract",
            Category::Recruitment => "recruitment",
            Category::Generic => "generic",
        }
    }
}
