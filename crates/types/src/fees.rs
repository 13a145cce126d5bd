//! Platform fee policy applied to every quote request

use serde::Serialize;
use thiserror::Error;

/// Upper bound for a basis-point fee (100%)
pub const MAX_FEE_BPS: u32 = 10_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeePolicyError {
	#[error("feeBps {0} is out of range (0..=10000)")]
	OutOfRange(u32),

	#[error("fee recipient address is empty")]
	MissingRecipient,
}

/// Fixed fee and recipient, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeePolicy {
	fee_bps: u16,
	recipient: String,
}

impl FeePolicy {
	pub fn new(fee_bps: u32, recipient: impl Into<String>) -> Result<Self, FeePolicyError> {
		if fee_bps > MAX_FEE_BPS {
			return Err(FeePolicyError::OutOfRange(fee_bps));
		}
		let recipient = recipient.into();
		if recipient.trim().is_empty() {
			return Err(FeePolicyError::MissingRecipient);
		}
		Ok(Self {
			fee_bps: fee_bps as u16,
			recipient,
		})
	}

	pub fn fee_bps(&self) -> u16 {
		self.fee_bps
	}

	pub fn recipient(&self) -> &str {
		&self.recipient
	}

	/// Fee parameters for one request; the fee is taken in the buy token
	pub fn params_for(&self, normalized_buy_token: &str) -> FeeParams {
		FeeParams {
			swap_fee_bps: self.fee_bps,
			swap_fee_recipient: self.recipient.clone(),
			swap_fee_token: normalized_buy_token.to_string(),
		}
	}
}

/// Fee annotations sent upstream as query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeParams {
	pub swap_fee_bps: u16,
	pub swap_fee_recipient: String,
	pub swap_fee_token: String,
}
