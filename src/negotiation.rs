//! Media type parsing, scoring and selection.
//!
//! # Examples
//!
//! ```
//! use conneg::negotiation::fitness;
//! use conneg::negotiation::MediaType;
//!
//! let a = MediaType::parse("text/*").unwrap();
//! let b = MediaType::parse("text/plain").unwrap();
//! assert_eq!(fitness::score(&a, &b).unwrap().value, 100);
//! ```

pub use conneg_negotiation::*;
