//! Values that come either from the environment or straight from the config file

use qp_types::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A setting that is read from an environment variable or given inline
///
/// In config files this is written as `{ type = "env", value = "ZEROX_API_KEY" }`
/// or `{ type = "plain", value = "3001" }`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ConfigurableValue {
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// Environment variable name for `Env`, the literal value for `Plain`
	pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	Env,
	Plain,
}

impl ConfigurableValue {
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	/// Resolve to the concrete string
	///
	/// An environment variable that is set but blank counts as missing.
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		let resolved = match self.value_type {
			ValueType::Env => std::env::var(&self.value).map_err(|_| {
				ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
			})?,
			ValueType::Plain => self.value.clone(),
		};

		if resolved.trim().is_empty() {
			return Err(ConfigurableValueError::Empty(self.description()));
		}
		Ok(resolved)
	}

	pub fn resolve_secret(&self) -> Result<SecretString, ConfigurableValueError> {
		self.resolve().map(SecretString::from)
	}

	/// Resolve and parse, e.g. a port number from `PORT`
	pub fn resolve_parsed<T>(&self) -> Result<T, ConfigurableValueError>
	where
		T: FromStr,
		T::Err: fmt::Display,
	{
		let raw = self.resolve()?;
		raw.trim()
			.parse::<T>()
			.map_err(|e| ConfigurableValueError::Parse {
				source_description: self.description(),
				reason: e.to_string(),
			})
	}

	/// Where the value comes from, safe to log
	pub fn description(&self) -> String {
		match self.value_type {
			ValueType::Env => format!("environment variable '{}'", self.value),
			ValueType::Plain => "configured plain value".to_string(),
		}
	}
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),

	#[error("Value from {0} is empty")]
	Empty(String),

	#[error("Value from {source_description} could not be parsed: {reason}")]
	Parse {
		source_description: String,
		reason: String,
	},
}

// Plain values may be secrets, so they are never displayed.
impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

/// `"env:NAME"` references an environment variable, anything else is plain
impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		match value.strip_prefix("env:") {
			Some(env_var) => Self::from_env(env_var),
			None => Self::from_plain(value),
		}
	}
}
