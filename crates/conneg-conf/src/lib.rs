//! # Conneg Conf
//!
//! Layered configuration for content negotiation.
//!
//! Settings are read from a TOML file and from environment variables
//! (`CONNEG_OFFERS`, `CONNEG_DEFAULT_ACCEPT`), with the environment taking
//! precedence, and turned into a
//! [`ContentNegotiator`](conneg_negotiation::ContentNegotiator).
//!
//! ```
//! use conneg_conf::SettingsBuilder;
//! use conneg_conf::sources::EnvSource;
//!
//! let negotiator = SettingsBuilder::new()
//!     .add_source(EnvSource::from_vars([("CONNEG_OFFERS", "application/json, text/plain")]))
//!     .build()
//!     .unwrap()
//!     .into_negotiator()
//!     .unwrap();
//!
//! let chosen = negotiator.negotiate(Some("text/*")).unwrap();
//! assert_eq!(chosen.essence(), "text/plain");
//! ```

pub mod settings;
pub mod sources;

pub use settings::{NegotiationSettings, SettingsBuilder, SettingsError};
pub use sources::{ConfigSource, EnvSource, SourceError, TomlFileSource};
