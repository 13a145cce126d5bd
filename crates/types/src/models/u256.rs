//! Arbitrary-precision token amounts carried as decimal strings

/// Unsigned integer amount represented as a decimal string to preserve precision
///
/// Token amounts in the smallest unit routinely exceed the 53-bit safe range of
/// JSON numbers, so they never pass through a float.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct U256(String);

impl U256 {
	/// Create a new U256 from a string without validation
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Parse and validate a decimal string
	pub fn parse(value: &str) -> Result<Self, String> {
		let amount = Self(value.trim().to_string());
		amount.validate()?;
		Ok(amount)
	}

	/// Get the raw string value
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Try to parse as u128 (for smaller values)
	pub fn as_u128(&self) -> Result<u128, std::num::ParseIntError> {
		self.0.parse()
	}

	/// Check if the value is zero
	pub fn is_zero(&self) -> bool {
		self.0.chars().all(|c| c == '0')
	}

	/// Validate that the string is a non-empty run of ASCII digits
	pub fn validate(&self) -> Result<(), String> {
		if self.0.is_empty() {
			return Err("amount cannot be empty".to_string());
		}

		if !self.0.chars().all(|c| c.is_ascii_digit()) {
			return Err(format!("amount '{}' must contain only digits", self.0));
		}

		Ok(())
	}
}

impl std::fmt::Display for U256 {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<u128> for U256 {
	fn from(value: u128) -> Self {
		Self(value.to_string())
	}
}

impl From<u64> for U256 {
	fn from(value: u64) -> Self {
		Self(value.to_string())
	}
}

impl serde::Serialize for U256 {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

impl<'de> serde::Deserialize<'de> for U256 {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let value = String::deserialize(deserializer)?;
		U256::parse(&value).map_err(serde::de::Error::custom)
	}
}
