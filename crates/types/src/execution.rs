//! Transaction fields a wallet needs to sign a prepared swap

use serde::{Deserialize, Serialize};

use crate::models::U256;
use crate::quotes::Quote;

/// Signable projection of a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPayload {
	pub success: bool,
	pub to: String,
	pub data: String,
	pub value: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas_price: Option<String>,
	pub allowance_target: Option<String>,
	pub buy_amount: U256,
	pub sell_amount: U256,
}

impl From<&Quote> for ExecutionPayload {
	fn from(quote: &Quote) -> Self {
		let tx = &quote.upstream.transaction;
		Self {
			success: true,
			to: tx.to.clone(),
			data: tx.data.clone(),
			value: tx.value.clone().unwrap_or_else(|| "0".to_string()),
			gas: tx.gas.clone(),
			gas_price: tx.gas_price.clone(),
			allowance_target: quote.upstream.allowance_target.clone(),
			buy_amount: quote.upstream.buy_amount.clone(),
			sell_amount: quote.upstream.sell_amount.clone(),
		}
	}
}

/// Payload returned by the single round-trip quote-and-execute flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreshExecutionPayload {
	#[serde(flatten)]
	pub payload: ExecutionPayload,
	/// Sell token as the aggregator understood it
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sell_token: Option<String>,
	pub fresh_quote: bool,
	/// Issue time, epoch milliseconds
	pub timestamp: i64,
}
