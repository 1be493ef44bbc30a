//! Accept header parsing and selection

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use http::HeaderValue;

use crate::error::{ParseError, ParseResult};
use crate::fitness::{self, Score};
use crate::media_type::MediaType;

/// The media types listed in an `Accept` header, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepts {
	media_types: Vec<MediaType>,
}

impl Accepts {
	/// Parses an Accept header value.
	///
	/// Each comma-separated clause must be a valid media type; the first
	/// malformed clause rejects the whole header.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::{Accepts, ParseError};
	///
	/// let accept = Accepts::parse("application/json, text/html; q=0.9").unwrap();
	/// assert_eq!(accept.len(), 2);
	/// assert_eq!(accept.media_types()[1].quality(), 0.9);
	///
	/// assert_eq!(
	///     Accepts::parse("application/json, a/").unwrap_err(),
	///     ParseError::ExpectedTokenAfterSlash,
	/// );
	/// ```
	pub fn parse(header: &str) -> ParseResult<Self> {
		let media_types = header
			.split(',')
			.map(|clause| MediaType::parse(clause.trim()))
			.collect::<ParseResult<Vec<_>>>()?;

		Ok(Self { media_types })
	}

	/// An Accept value that admits anything (`*/*`).
	pub fn any() -> Self {
		Self::from(vec![MediaType::any()])
	}

	/// The accepted media types, in header order.
	pub fn media_types(&self) -> &[MediaType] {
		&self.media_types
	}

	/// Iterates over the accepted media types.
	pub fn iter(&self) -> std::slice::Iter<'_, MediaType> {
		self.media_types.iter()
	}

	/// Number of comma-separated clauses.
	pub fn len(&self) -> usize {
		self.media_types.len()
	}

	/// Returns true if there are no clauses.
	pub fn is_empty(&self) -> bool {
		self.media_types.is_empty()
	}

	/// Returns the best score of any accepted media type against `offers`.
	///
	/// Each accepted entry is scored on its own, so a specific entry anywhere in
	/// the header outranks a wildcard entry.
	pub fn best_score(&self, offers: &[MediaType]) -> Option<Score> {
		let mut best: Option<Score> = None;
		for accepted in &self.media_types {
			let Some(score) = fitness::best_match(accepted, offers) else {
				continue;
			};
			if score.compare(best.as_ref()) == Ordering::Greater {
				best = Some(score);
			}
		}
		best
	}

	/// Returns the position in `offers` of the best match.
	pub fn best_match_index(&self, offers: &[MediaType]) -> Option<usize> {
		self.best_score(offers).map(|score| score.index)
	}

	/// Finds the offer the client prefers most, if any is acceptable.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::{Accepts, MediaType};
	///
	/// let offers: Vec<MediaType> = ["application/json", "application/yaml", "text/plain"]
	///     .iter()
	///     .map(|s| s.parse().unwrap())
	///     .collect();
	///
	/// let accept = Accepts::parse("*/*, application/yaml").unwrap();
	/// assert_eq!(accept.best_match(&offers).unwrap().to_string(), "application/yaml");
	///
	/// let no_match = Accepts::parse("image/png").unwrap();
	/// assert!(no_match.best_match(&offers).is_none());
	/// ```
	pub fn best_match<'a>(&self, offers: &'a [MediaType]) -> Option<&'a MediaType> {
		self.best_match_index(offers).map(|index| &offers[index])
	}
}

impl From<Vec<MediaType>> for Accepts {
	fn from(media_types: Vec<MediaType>) -> Self {
		Self { media_types }
	}
}

impl FromStr for Accepts {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl TryFrom<&HeaderValue> for Accepts {
	type Error = ParseError;

	fn try_from(value: &HeaderValue) -> Result<Self, Self::Error> {
		let value = value.to_str().map_err(|_| ParseError::InvalidHeaderValue)?;
		Self::parse(value)
	}
}

impl fmt::Display for Accepts {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, media_type) in self.media_types.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{media_type}")?;
		}
		Ok(())
	}
}

impl<'a> IntoIterator for &'a Accepts {
	type Item = &'a MediaType;
	type IntoIter = std::slice::Iter<'a, MediaType>;

	fn into_iter(self) -> Self::IntoIter {
		self.media_types.iter()
	}
}
