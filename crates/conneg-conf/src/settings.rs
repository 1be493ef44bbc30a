//! Negotiation settings

use std::path::Path;

use conneg_negotiation::{ANY, Accepts, ContentNegotiator, MediaType, ParseError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sources::{ConfigSource, SettingsLayer, SourceError};

/// Errors raised while loading or validating settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Source error: {0}")]
	Source(#[from] SourceError),

	#[error("Invalid value for {field}: {source}")]
	InvalidMediaType { field: String, source: ParseError },

	#[error("{0} must not be empty")]
	Empty(String),
}

/// Configuration for a [`ContentNegotiator`]
///
/// ```toml
/// offers = ["application/json", "application/yaml"]
/// default_accept = "*/*"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationSettings {
	/// Representations the server can produce, most preferred first
	pub offers: Vec<MediaType>,
	/// Accept value used for requests without an Accept header
	pub default_accept: String,
}

impl Default for NegotiationSettings {
	fn default() -> Self {
		Self {
			offers: Vec::new(),
			default_accept: ANY.to_string(),
		}
	}
}

impl NegotiationSettings {
	/// Parses and validates settings from a TOML document.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_conf::NegotiationSettings;
	///
	/// let settings = NegotiationSettings::from_toml_str(
	///     r#"offers = ["application/json", "text/plain"]"#,
	/// ).unwrap();
	/// assert_eq!(settings.offers.len(), 2);
	/// assert_eq!(settings.default_accept, "*/*");
	/// ```
	pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Reads and validates settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let content = std::fs::read_to_string(path)?;
		Self::from_toml_str(&content)
	}

	/// Checks that there is at least one offer and that the default Accept value parses.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.offers.is_empty() {
			return Err(SettingsError::Empty("offers".to_string()));
		}
		Accepts::parse(&self.default_accept).map_err(|source| SettingsError::InvalidMediaType {
			field: "default_accept".to_string(),
			source,
		})?;
		Ok(())
	}

	/// Builds a negotiator from these settings.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_conf::NegotiationSettings;
	///
	/// let negotiator = NegotiationSettings::from_toml_str(
	///     r#"
	///     offers = ["application/json", "text/plain"]
	///     default_accept = "text/*"
	///     "#,
	/// )
	/// .unwrap()
	/// .into_negotiator()
	/// .unwrap();
	///
	/// assert_eq!(negotiator.negotiate(None).unwrap().essence(), "text/plain");
	/// ```
	pub fn into_negotiator(self) -> Result<ContentNegotiator, SettingsError> {
		ContentNegotiator::new(self.offers)
			.with_default_accept(&self.default_accept)
			.map_err(|source| SettingsError::InvalidMediaType {
				field: "default_accept".to_string(),
				source,
			})
	}

	fn apply(&mut self, layer: SettingsLayer) -> Result<(), SettingsError> {
		if let Some(offers) = layer.offers {
			self.offers = offers
				.iter()
				.map(|offer| MediaType::parse(offer))
				.collect::<Result<_, _>>()
				.map_err(|source| SettingsError::InvalidMediaType {
					field: "offers".to_string(),
					source,
				})?;
		}
		if let Some(default_accept) = layer.default_accept {
			self.default_accept = default_accept;
		}
		Ok(())
	}
}

/// Merges configuration sources into validated [`NegotiationSettings`]
///
/// # Examples
///
/// ```
/// use conneg_conf::SettingsBuilder;
/// use conneg_conf::sources::{EnvSource, TomlFileSource};
///
/// let settings = SettingsBuilder::new()
///     .add_source(TomlFileSource::new("does-not-exist.toml"))
///     .add_source(EnvSource::from_vars([("CONNEG_OFFERS", "application/json,application/yaml")]))
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.offers.len(), 2);
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	/// Creates a builder with no sources.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a configuration source
	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Load every source, lowest priority first, and validate the result
	pub fn build(mut self) -> Result<NegotiationSettings, SettingsError> {
		self.sources.sort_by_key(|source| source.priority());

		let mut merged = SettingsLayer::default();
		for source in &self.sources {
			let layer = source.load()?;
			debug!(
				source = %source.description(),
				offers = layer.offers.is_some(),
				default_accept = layer.default_accept.is_some(),
				"loaded negotiation settings layer"
			);
			merged.merge(layer);
		}

		let mut settings = NegotiationSettings::default();
		settings.apply(merged)?;
		settings.validate()?;
		Ok(settings)
	}
}
