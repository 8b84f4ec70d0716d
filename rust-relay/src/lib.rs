//! Vultures Relay - contract and recruitment form relay.
//!
//! Receives form posts from the Vultures Mercenary Company site, prices
//! contracts, formats a Discord message and forwards it to a webhook.
//!
//! ## Architecture
//!
//! ```text
//! Form POST → web::submit → relay::Relay → Discord webhook
//!                              ├── form (parse, classify, render)
//!                              └── pricing (authoritative quote)
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod pricing;
pub mod relay;
pub mod web;

// Re-export commonly used types
pub use config::{Config, WebhookConfig};
pub use error::SubmitError;
pub use form::{Category, Submission};
pub use pricing::{quote, MissionType, OperatorCount, Quote, ValueTier};
pub use relay::{Relay, SequenceCounters};
pub use web::{router, AppState};
