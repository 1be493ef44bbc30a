//! Error types for media type and `Accept` header handling.

use http::StatusCode;

/// Errors produced while parsing a media type or an `Accept` header.
///
/// Parsing is all-or-nothing: the first malformed clause aborts the parse and
/// its error is returned unchanged.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
	/// The type token is missing, e.g. `"/json"` or `""`.
	#[error("no media type")]
	NoMediaType,

	/// The first token is followed by something other than `/`, e.g. `"text plain"`.
	#[error("expected slash after first token")]
	ExpectedSlashAfterType,

	/// A `/` is present but no subtype token follows it, e.g. `"text/"`.
	#[error("expected token after slash")]
	ExpectedTokenAfterSlash,

	/// Content remains after the subtype, e.g. `"text/plain/extra"`.
	#[error("unexpected content after media subtype")]
	UnexpectedContentAfterSubtype,

	/// A parameter is not of the form `name=value`.
	#[error("invalid media parameter")]
	InvalidMediaParameter,

	/// The same parameter name appears twice.
	#[error("duplicate parameter name: '{0}'")]
	DuplicateParameterName(String),

	/// The `q` parameter is not a number.
	#[error("invalid quality factor: '{0}'")]
	InvalidQualityFactor(String),

	/// A header value contains bytes outside visible ASCII.
	#[error("header value is not visible ASCII")]
	InvalidHeaderValue,
}

/// Result type alias for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Outcome of a failed negotiation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NegotiationError {
	/// The client sent an `Accept` header that could not be parsed.
	#[error("invalid Accept header: {0}")]
	InvalidHeader(#[from] ParseError),

	/// None of the offered representations is acceptable to the client.
	#[error("no acceptable representation for '{accept}'")]
	NotAcceptable {
		/// The `Accept` value that was negotiated against.
		accept: String,
	},
}

impl NegotiationError {
	/// Returns the HTTP status a server should answer with.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::{NegotiationError, ParseError};
	/// use http::StatusCode;
	///
	/// let err = NegotiationError::InvalidHeader(ParseError::NoMediaType);
	/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
	///
	/// let err = NegotiationError::NotAcceptable { accept: "image/png".into() };
	/// assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);
	/// ```
	pub fn status_code(&self) -> StatusCode {
		match self {
			Self::InvalidHeader(_) => StatusCode::BAD_REQUEST,
			Self::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
		}
	}
}
