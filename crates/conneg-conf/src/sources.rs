//! Configuration sources for layered negotiation settings
//!
//! Sources are merged in priority order (environment variables > TOML file >
//! defaults). Each source yields a [`SettingsLayer`] whose present fields
//! override lower-priority layers.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// Default prefix for environment variables.
pub const DEFAULT_ENV_PREFIX: &str = "CONNEG_";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load the settings this source provides
	fn load(&self) -> Result<SettingsLayer, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Unvalidated settings as read from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SettingsLayer {
	/// Offered media types, unparsed
	pub offers: Option<Vec<String>>,
	/// Accept value for requests without one
	pub default_accept: Option<String>,
}

impl SettingsLayer {
	/// Overlays `other` on top of `self`.
	pub fn merge(&mut self, other: SettingsLayer) {
		if other.offers.is_some() {
			self.offers = other.offers;
		}
		if other.default_accept.is_some() {
			self.default_accept = other.default_accept;
		}
	}
}

/// Environment variable configuration source
///
/// Reads `{prefix}OFFERS` as a comma-separated list of media types and
/// `{prefix}DEFAULT_ACCEPT` as an Accept header value.
pub struct EnvSource {
	prefix: String,
	vars: Option<HashMap<String, String>>,
}

impl EnvSource {
	/// Create a source reading the process environment with the `CONNEG_` prefix
	///
	/// # Examples
	///
	/// ```
	/// use conneg_conf::sources::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::new().with_prefix("MYAPP_");
	/// assert_eq!(source.description(), "Environment variables (prefix: MYAPP_)");
	/// ```
	pub fn new() -> Self {
		Self {
			prefix: DEFAULT_ENV_PREFIX.to_string(),
			vars: None,
		}
	}

	/// Create a source reading from an explicit set of variables
	///
	/// # Examples
	///
	/// ```
	/// use conneg_conf::sources::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::from_vars([("CONNEG_DEFAULT_ACCEPT", "text/*")]);
	/// let layer = source.load().unwrap();
	/// assert_eq!(layer.default_accept.as_deref(), Some("text/*"));
	/// ```
	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			prefix: DEFAULT_ENV_PREFIX.to_string(),
			vars: Some(
				vars.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
		}
	}

	/// Set the prefix for environment variable names
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	fn var(&self, name: &str) -> Option<String> {
		let key = format!("{}{}", self.prefix, name);
		match &self.vars {
			Some(vars) => vars.get(&key).cloned(),
			None => std::env::var(&key).ok(),
		}
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<SettingsLayer, SourceError> {
		let offers = self.var("OFFERS").map(|value| {
			value
				.split(',')
				.map(str::trim)
				.filter(|offer| !offer.is_empty())
				.map(str::to_string)
				.collect()
		});

		Ok(SettingsLayer {
			offers,
			default_accept: self.var("DEFAULT_ACCEPT"),
		})
	}

	fn priority(&self) -> u8 {
		100 // Highest priority
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

/// TOML file configuration source
///
/// A missing file contributes nothing.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a new TOML file configuration source
	///
	/// # Examples
	///
	/// ```
	/// use conneg_conf::sources::TomlFileSource;
	/// use std::path::PathBuf;
	///
	/// let source = TomlFileSource::new(PathBuf::from("negotiation.toml"));
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<SettingsLayer, SourceError> {
		if !self.path.exists() {
			return Ok(SettingsLayer::default());
		}

		let content = fs::read_to_string(&self.path)?;
		Ok(toml::from_str(&content)?)
	}

	fn priority(&self) -> u8 {
		50 // Medium priority
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}
