//! Request-level content negotiation.

use http::HeaderMap;
use http::header::ACCEPT;
use tracing::debug;

use crate::accept::Accepts;
use crate::error::{NegotiationError, ParseError, ParseResult};
use crate::media_type::MediaType;

/// Chooses one of a server's representations for each request.
///
/// Requests without an `Accept` header are negotiated against a default value,
/// `*/*` unless configured otherwise, which selects the first offer.
#[derive(Debug, Clone)]
pub struct ContentNegotiator {
	offers: Vec<MediaType>,
	default_accept: Accepts,
}

impl ContentNegotiator {
	/// Creates a negotiator over `offers`, in order of server preference.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::{ContentNegotiator, MediaType};
	///
	/// let negotiator = ContentNegotiator::new(vec![
	///     MediaType::parse("application/json").unwrap(),
	///     MediaType::parse("application/yaml").unwrap(),
	/// ]);
	/// let chosen = negotiator.negotiate(Some("application/yaml")).unwrap();
	/// assert_eq!(chosen.essence(), "application/yaml");
	/// ```
	pub fn new(offers: Vec<MediaType>) -> Self {
		Self {
			offers,
			default_accept: Accepts::any(),
		}
	}

	/// Creates a negotiator by parsing each offer.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::ContentNegotiator;
	///
	/// let negotiator = ContentNegotiator::from_strs(["application/json", "text/plain"]).unwrap();
	/// assert_eq!(negotiator.offers().len(), 2);
	///
	/// assert!(ContentNegotiator::from_strs(["text/"]).is_err());
	/// ```
	pub fn from_strs<I, S>(offers: I) -> ParseResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let offers = offers
			.into_iter()
			.map(|offer| MediaType::parse(offer.as_ref()))
			.collect::<ParseResult<Vec<_>>>()?;
		Ok(Self::new(offers))
	}

	/// Sets the Accept value used when a request has none.
	pub fn with_default_accept(mut self, accept: &str) -> ParseResult<Self> {
		self.default_accept = Accepts::parse(accept)?;
		Ok(self)
	}

	/// The offered representations, most preferred first.
	pub fn offers(&self) -> &[MediaType] {
		&self.offers
	}

	/// The Accept value used for requests without one.
	pub fn default_accept(&self) -> &Accepts {
		&self.default_accept
	}

	/// Negotiates against a raw Accept header value.
	///
	/// A missing or blank header falls back to the default Accept value.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::{ContentNegotiator, NegotiationError};
	/// use http::StatusCode;
	///
	/// let negotiator = ContentNegotiator::from_strs(["application/json", "text/plain"]).unwrap();
	///
	/// assert_eq!(negotiator.negotiate(None).unwrap().essence(), "application/json");
	/// assert_eq!(negotiator.negotiate(Some("text/*")).unwrap().essence(), "text/plain");
	///
	/// let err = negotiator.negotiate(Some("image/png")).unwrap_err();
	/// assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);
	///
	/// let err = negotiator.negotiate(Some("/png")).unwrap_err();
	/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
	/// ```
	pub fn negotiate(&self, accept: Option<&str>) -> Result<&MediaType, NegotiationError> {
		match accept.map(str::trim).filter(|value| !value.is_empty()) {
			Some(value) => {
				let accepts = Accepts::parse(value).inspect_err(|err| {
					debug!(accept = value, error = %err, "rejecting malformed Accept header");
				})?;
				self.negotiate_accepts(&accepts)
			}
			None => self.negotiate_accepts(&self.default_accept),
		}
	}

	/// Negotiates against an already parsed Accept value.
	pub fn negotiate_accepts(&self, accepts: &Accepts) -> Result<&MediaType, NegotiationError> {
		match accepts.best_match(&self.offers) {
			Some(chosen) => {
				debug!(accept = %accepts, chosen = %chosen, "negotiated representation");
				Ok(chosen)
			}
			None => {
				debug!(accept = %accepts, offers = self.offers.len(), "no acceptable representation");
				Err(NegotiationError::NotAcceptable {
					accept: accepts.to_string(),
				})
			}
		}
	}

	/// Negotiates against the `Accept` fields of a request's headers.
	///
	/// Multiple `Accept` fields are combined as one comma-separated list.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::ContentNegotiator;
	/// use http::{HeaderMap, HeaderValue, header::ACCEPT};
	///
	/// let negotiator = ContentNegotiator::from_strs(["application/json", "application/yaml"]).unwrap();
	///
	/// let mut headers = HeaderMap::new();
	/// headers.append(ACCEPT, HeaderValue::from_static("text/html"));
	/// headers.append(ACCEPT, HeaderValue::from_static("application/yaml"));
	///
	/// let chosen = negotiator.negotiate_headers(&headers).unwrap();
	/// assert_eq!(chosen.essence(), "application/yaml");
	/// ```
	pub fn negotiate_headers(&self, headers: &HeaderMap) -> Result<&MediaType, NegotiationError> {
		let values = headers
			.get_all(ACCEPT)
			.iter()
			.map(|value| value.to_str().map_err(|_| ParseError::InvalidHeaderValue))
			.collect::<ParseResult<Vec<_>>>()?;

		if values.is_empty() {
			return self.negotiate(None);
		}
		let joined = values.join(", ");
		self.negotiate(Some(joined.as_str()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use http::{HeaderValue, StatusCode};
	use rstest::{fixture, rstest};

	#[fixture]
	fn negotiator() -> ContentNegotiator {
		ContentNegotiator::from_strs(["application/json", "application/yaml", "text/plain"]).unwrap()
	}

	#[rstest]
	#[case(None, "application/json")]
	#[case(Some(""), "application/json")]
	#[case(Some("   "), "application/json")]
	#[case(Some("text/plain"), "text/plain")]
	#[case(Some("application/json;q=0.001, application/yaml"), "application/yaml")]
	fn test_negotiate(
		negotiator: ContentNegotiator,
		#[case] accept: Option<&str>,
		#[case] expected: &str,
	) {
		assert_eq!(negotiator.negotiate(accept).unwrap().to_string(), expected);
	}

	#[rstest]
	fn test_negotiate_not_acceptable(negotiator: ContentNegotiator) {
		// Act
		let err = negotiator.negotiate(Some("image/png, audio/*")).unwrap_err();

		// Assert
		assert_eq!(
			err,
			NegotiationError::NotAcceptable {
				accept: "image/png, audio/*".to_string()
			}
		);
		assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);
	}

	#[rstest]
	fn test_negotiate_invalid_header(negotiator: ContentNegotiator) {
		let err = negotiator.negotiate(Some("application/json, text/")).unwrap_err();
		assert_eq!(
			err,
			NegotiationError::InvalidHeader(ParseError::ExpectedTokenAfterSlash)
		);
	}

	#[rstest]
	fn test_custom_default_accept(negotiator: ContentNegotiator) {
		// Arrange
		let negotiator = negotiator.with_default_accept("text/*").unwrap();

		// Act
		let chosen = negotiator.negotiate(None).unwrap();

		// Assert
		assert_eq!(chosen.essence(), "text/plain");
	}

	#[rstest]
	fn test_no_offers_is_not_acceptable() {
		let negotiator = ContentNegotiator::new(Vec::new());
		assert!(matches!(
			negotiator.negotiate(None),
			Err(NegotiationError::NotAcceptable { .. })
		));
	}

	#[rstest]
	fn test_negotiate_headers_without_accept(negotiator: ContentNegotiator) {
		let chosen = negotiator.negotiate_headers(&HeaderMap::new()).unwrap();
		assert_eq!(chosen.essence(), "application/json");
	}

	#[rstest]
	fn test_negotiate_headers_rejects_opaque_value(negotiator: ContentNegotiator) {
		// Arrange
		let mut headers = HeaderMap::new();
		headers.insert(ACCEPT, HeaderValue::from_bytes(b"text/\xffplain").unwrap());

		// Act
		let err = negotiator.negotiate_headers(&headers).unwrap_err();

		// Assert
		assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
	}
}
