//! # Conneg Negotiation
//!
//! HTTP content negotiation for media types (RFC 7231 §5.3.2).
//!
//! Given a client's `Accept` header and the representations a server can
//! produce, this crate picks the representation the client prefers most:
//!
//! - [`MediaType`] parses and formats `type/subtype; name=value` expressions
//! - [`fitness`] scores a pair of media types by specificity and quality
//! - [`Accepts`] parses an `Accept` header and selects the best offer
//! - [`ContentNegotiator`] wraps a server's offers and maps failures to HTTP
//!   status codes
//!
//! ## Scoring
//!
//! Equal types add 100, equal subtypes add 10 and every shared parameter other
//! than `q` adds 1. Scores are ranked by that value, then by the product of
//! both quality factors (rounded to three decimals), and finally by offer
//! order, earliest first.
//!
//! ## Example
//!
//! ```
//! use conneg_negotiation::{Accepts, MediaType};
//!
//! let offers: Vec<MediaType> = ["application/json", "application/yaml", "text/plain"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//!
//! let accept = Accepts::parse("application/json;q=0.001, application/yaml").unwrap();
//! let chosen = accept.best_match(&offers).unwrap();
//! assert_eq!(chosen.to_string(), "application/yaml");
//! assert_eq!(chosen.encoding(), "yaml");
//! ```

pub mod accept;
pub mod error;
pub mod fitness;
pub mod media_type;
pub mod negotiator;
mod params;

pub use accept::Accepts;
pub use error::{NegotiationError, ParseError, ParseResult};
pub use fitness::Score;
pub use media_type::{
	ANY, APPLICATION_JSON, APPLICATION_XML, APPLICATION_YAML, MediaType, TEXT_HTML, TEXT_PLAIN,
};
pub use negotiator::ContentNegotiator;
