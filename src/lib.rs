//! # Conneg
//!
//! HTTP content negotiation for Rust servers.
//!
//! Conneg picks, from the representations a server can produce, the one a
//! client prefers according to its `Accept` header (RFC 7231 §5.3.2). Matches
//! are ranked by specificity (exact type and subtype over subtype wildcard
//! over `*/*`, plus shared parameters), then by the product of both quality
//! factors, then by the order of the server's offers.
//!
//! ## Feature Flags
//!
//! - `conf` (default) - Load negotiator settings from TOML files and
//!   environment variables
//!
//! ## Quick Example
//!
//! ```
//! use conneg::{ContentNegotiator, NegotiationError};
//! use http::StatusCode;
//!
//! let negotiator = ContentNegotiator::from_strs([
//!     "application/json",
//!     "application/yaml",
//!     "text/plain",
//! ])
//! .unwrap();
//!
//! let chosen = negotiator.negotiate(Some("*/*, application/yaml")).unwrap();
//! assert_eq!(chosen.to_string(), "application/yaml");
//! assert_eq!(chosen.encoding(), "yaml");
//!
//! let err = negotiator.negotiate(Some("image/png")).unwrap_err();
//! assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);
//! ```

#[cfg(feature = "conf")]
pub mod conf;
pub mod negotiation;

// Re-export negotiation types
pub use conneg_negotiation::{
	ANY, APPLICATION_JSON, APPLICATION_XML, APPLICATION_YAML, Accepts, ContentNegotiator,
	MediaType, NegotiationError, ParseError, ParseResult, Score, TEXT_HTML, TEXT_PLAIN,
};

// Re-export settings from dedicated crate
#[cfg(feature = "conf")]
pub use conneg_conf::{NegotiationSettings, SettingsBuilder, SettingsError};
