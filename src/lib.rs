// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # DCTrack Client
//!
//! An async client for the DCTrack datacenter asset API.
//!
//! ## Features
//!
//! - **Per-operation login**: basic-auth exchange for a bearer token that
//!   lives only as long as the call that asked for it
//! - **Page loop**: page-number pagination that stops on an empty or short
//!   page, or after a single pinned page
//! - **Fixed-delay retries**: transport failures and non-200 statuses are
//!   retried with a constant, cancellable pause
//! - **Tolerant mapping**: loosely-typed wire records with inconsistent
//!   field names become typed [`Item`]s
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dctrack_client::{ClientConfig, DcTrackClient, Filter, Result};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::new("https://dctrack.example.com/api/v2", "user", "pass");
//!     let client = DcTrackClient::new(config)?;
//!     let cancel = CancellationToken::new();
//!
//!     let items = client
//!         .get_items_with_params(&Filter::by_location("RDU2"), &cancel)
//!         .await?;
//!
//!     for item in &items {
//!         println!("{} {} {:.0} W", item.id, item.name, item.original_power);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        DcTrackClient                         │
//! │  get_items · get_items_with_params · get_item_by_id · search │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬──────────┐
//! │   Auth   │ Paginate  │     Fetch     │  Decode   │  Record  │
//! ├──────────┼───────────┼───────────────┼───────────┼──────────┤
//! │ Login    │ Filter    │ HTTP + retry  │ Flat      │ Coercion │
//! │ Token    │ Page loop │ Cancellation  │ Nested    │ Aliases  │
//! └──────────┴───────────┴───────────────┴───────────┴──────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
#[allow(missing_docs)]
pub mod error;

/// Login and tokens
pub mod auth;

/// HTTP client with fixed-delay retry
pub mod http;

/// Page envelope decoding
pub mod decode;

/// Wire records and the normalized item model
#[allow(missing_docs)]
pub mod record;

/// Column selection
pub mod fields;

/// Single-page fetch
pub mod fetch;

/// Filters and the page loop
pub mod pagination;

/// Deadlines as cancellation
pub mod cancel;

/// Client configuration
pub mod config;

/// High-level client
pub mod client;

/// Power and vendor roll-ups
pub mod summary;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

// Re-export commonly used types
pub use auth::{AuthSession, Credentials, Token};
pub use client::DcTrackClient;
pub use config::ClientConfig;
pub use fields::FieldSelection;
pub use pagination::{Filter, FilterBuilder, Paginator};
pub use record::{Item, RawRecord, RecordMapper, WireValue};
pub use summary::{vendor_distribution, PowerSummary, VendorShare};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
