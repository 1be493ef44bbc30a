//! Media type representation and parsing.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ParseError, ParseResult};
use crate::params;

/// `application/json`
pub const APPLICATION_JSON: &str = "application/json";
/// `application/yaml`
pub const APPLICATION_YAML: &str = "application/yaml";
/// `application/xml`
pub const APPLICATION_XML: &str = "application/xml";
/// `text/plain`
pub const TEXT_PLAIN: &str = "text/plain";
/// `text/html`
pub const TEXT_HTML: &str = "text/html";
/// `*/*`
pub const ANY: &str = "*/*";

const WILDCARD: &str = "*";
const QUALITY_PARAM: &str = "q";

/// A parsed media type such as `text/html; charset=utf-8; q=0.8`.
///
/// Type, subtype and parameter names are stored lowercase. The quality factor
/// is kept both as the `q` entry of [`params`](Self::params) and as the parsed
/// [`quality`](Self::quality). Equality and hashing ignore the raw input.
#[derive(Debug, Clone)]
pub struct MediaType {
	type_: String,
	subtype: String,
	params: BTreeMap<String, String>,
	q: f64,
	raw: String,
}

impl MediaType {
	/// Creates a media type without parameters and with quality 1.0.
	///
	/// Both halves must be MIME tokens; an empty subtype yields a bare type.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::{MediaType, ParseError};
	///
	/// let json = MediaType::new("application", "json").unwrap();
	/// assert_eq!(json.to_string(), "application/json");
	/// assert_eq!(json.quality(), 1.0);
	///
	/// assert_eq!(
	///     MediaType::new("text/plain", "x").unwrap_err(),
	///     ParseError::UnexpectedContentAfterSubtype,
	/// );
	/// ```
	pub fn new(type_: impl AsRef<str>, subtype: impl AsRef<str>) -> ParseResult<Self> {
		let (type_, subtype) = (type_.as_ref(), subtype.as_ref());
		let (type_, subtype) = if subtype.is_empty() {
			params::parse_essence(type_)?
		} else {
			params::parse_essence(&format!("{type_}/{subtype}"))?
		};
		Ok(Self::from_essence(type_, subtype))
	}

	/// The `*/*` media type.
	pub fn any() -> Self {
		Self::from_essence(WILDCARD.to_string(), WILDCARD.to_string())
	}

	fn from_essence(type_: String, subtype: String) -> Self {
		let mut media_type = Self {
			type_,
			subtype,
			params: BTreeMap::new(),
			q: 1.0,
			raw: String::new(),
		};
		media_type.raw = media_type.to_string();
		media_type
	}

	/// Parses a single media type expression.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::{MediaType, ParseError};
	///
	/// let mt = MediaType::parse("text/plain; version=1; q=0.3").unwrap();
	/// assert_eq!(mt.type_(), "text");
	/// assert_eq!(mt.subtype(), "plain");
	/// assert_eq!(mt.param("version"), Some("1"));
	/// assert_eq!(mt.quality(), 0.3);
	///
	/// assert_eq!(MediaType::parse("/a").unwrap_err(), ParseError::NoMediaType);
	/// assert_eq!(MediaType::parse("a/").unwrap_err(), ParseError::ExpectedTokenAfterSlash);
	/// ```
	pub fn parse(s: &str) -> ParseResult<Self> {
		let (essence, rest) = match s.find(';') {
			Some(i) => s.split_at(i),
			None => (s, ""),
		};

		let (type_, subtype) = params::parse_essence(essence)?;
		let params = params::parse_params(rest)?;
		let q = match params.get(QUALITY_PARAM) {
			Some(value) => parse_quality(value)?,
			None => 1.0,
		};

		Ok(Self {
			type_,
			subtype,
			params,
			q,
			raw: s.to_string(),
		})
	}

	/// Adds or replaces a parameter.
	///
	/// Setting `q` also updates the quality factor. Values may not contain CR or LF.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::MediaType;
	///
	/// let mt = MediaType::new("text", "plain")
	///     .and_then(|mt| mt.with_param("charset", "utf-8"))
	///     .unwrap();
	/// assert_eq!(mt.to_string(), "text/plain; charset=utf-8");
	///
	/// let plain = MediaType::new("text", "plain").unwrap();
	/// assert!(plain.clone().with_param("q", "high").is_err());
	/// assert!(plain.with_param("title", "a\nb").is_err());
	/// ```
	pub fn with_param(
		mut self,
		name: impl AsRef<str>,
		value: impl Into<String>,
	) -> ParseResult<Self> {
		let name = name.as_ref();
		if !params::is_token(name) {
			return Err(ParseError::InvalidMediaParameter);
		}
		let name = name.to_ascii_lowercase();
		let value: String = value.into();
		if value.contains(['\r', '\n']) {
			return Err(ParseError::InvalidMediaParameter);
		}
		if name == QUALITY_PARAM {
			self.q = parse_quality(&value)?;
		}
		self.params.insert(name, value);
		self.raw = self.to_string();
		Ok(self)
	}

	/// Sets the quality factor, recording it as the `q` parameter.
	///
	/// Fails with [`ParseError::InvalidQualityFactor`] if `q` is not finite.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::MediaType;
	///
	/// let mt = MediaType::new("application", "yaml")
	///     .and_then(|mt| mt.with_quality(0.4))
	///     .unwrap();
	/// assert_eq!(mt.quality(), 0.4);
	/// assert_eq!(mt.to_string(), "application/yaml; q=0.4");
	///
	/// assert!(MediaType::any().with_quality(f64::NAN).is_err());
	/// ```
	pub fn with_quality(mut self, q: f64) -> ParseResult<Self> {
		if !q.is_finite() {
			return Err(ParseError::InvalidQualityFactor(q.to_string()));
		}
		self.q = q;
		self.params.insert(QUALITY_PARAM.to_string(), q.to_string());
		self.raw = self.to_string();
		Ok(self)
	}

	/// The primary type, e.g. `text`, or `*`.
	pub fn type_(&self) -> &str {
		&self.type_
	}

	/// The subtype, e.g. `plain`, or `*`. Empty if the input had no slash.
	pub fn subtype(&self) -> &str {
		&self.subtype
	}

	/// All parameters, including `q`, keyed by lowercase name.
	pub fn params(&self) -> &BTreeMap<String, String> {
		&self.params
	}

	/// Looks up a parameter by name (case-insensitive).
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params
			.get(&name.to_ascii_lowercase())
			.map(String::as_str)
	}

	/// The quality factor; 1.0 unless a `q` parameter was given.
	pub fn quality(&self) -> f64 {
		self.q
	}

	/// The input this media type was parsed from.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Returns true if the type or subtype is `*`.
	pub fn is_wildcard(&self) -> bool {
		self.type_ == WILDCARD || self.subtype == WILDCARD
	}

	/// The media type without parameters, e.g. `text/plain`.
	pub fn essence(&self) -> String {
		if self.subtype.is_empty() {
			self.type_.clone()
		} else {
			format!("{}/{}", self.type_, self.subtype)
		}
	}

	/// Returns the structured syntax suffix, or the whole subtype if there is none.
	///
	/// Serialization layers use this to pick a codec for vendor types.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::MediaType;
	///
	/// let vendor = MediaType::parse("application/vnd.foo+json").unwrap();
	/// assert_eq!(vendor.encoding(), "json");
	///
	/// let yaml = MediaType::parse("application/yaml").unwrap();
	/// assert_eq!(yaml.encoding(), "yaml");
	/// ```
	pub fn encoding(&self) -> &str {
		match self.subtype.rsplit_once('+') {
			Some((_, suffix)) => suffix,
			None => self.subtype.as_str(),
		}
	}
}

// NaN, infinities and out-of-range literals such as `1e400` are rejected.
fn parse_quality(value: &str) -> ParseResult<f64> {
	value
		.trim()
		.parse::<f64>()
		.ok()
		.filter(|q| q.is_finite())
		.ok_or_else(|| ParseError::InvalidQualityFactor(value.to_string()))
}

impl fmt::Display for MediaType {
	/// Formats as `type/subtype; name=value`, with parameters sorted by name.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.type_)?;
		if !self.subtype.is_empty() {
			write!(f, "/{}", self.subtype)?;
		}
		for (name, value) in &self.params {
			write!(f, "; {name}=")?;
			params::write_value(f, value)?;
		}
		Ok(())
	}
}

impl FromStr for MediaType {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

// `q` is derived from `params`, so comparing params covers it.
impl PartialEq for MediaType {
	fn eq(&self, other: &Self) -> bool {
		self.type_ == other.type_ && self.subtype == other.subtype && self.params == other.params
	}
}

impl Eq for MediaType {}

impl Hash for MediaType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.type_.hash(state);
		self.subtype.hash(state);
		self.params.hash(state);
	}
}

impl Serialize for MediaType {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for MediaType {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		Self::parse(&s).map_err(serde::de::Error::custom)
	}
}
