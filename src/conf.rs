//! Negotiation settings module.
//!
//! # Examples
//!
//! ```
//! use conneg::conf::NegotiationSettings;
//!
//! let settings = NegotiationSettings::from_toml_str(r#"offers = ["application/json"]"#).unwrap();
//! assert_eq!(settings.default_accept, "*/*");
//! ```

pub use conneg_conf::*;
