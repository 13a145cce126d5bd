//! Request bodies and settings used across the integration suites

use quote_proxy::serde_json::{json, Value};
use quote_proxy::{ConfigurableValue, Settings};

#[allow(dead_code)]
pub struct ApiFixtures;

pub const NATIVE: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";
pub const WETH: &str = "0x4200000000000000000000000000000000000006";
pub const USDC: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
pub const TAKER: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const FEE_RECIPIENT: &str = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";
pub const ONE_FINNEY: &str = "1000000000000000";

#[allow(dead_code)]
impl ApiFixtures {
	/// Sell 0.001 native ETH for USDC
	pub fn native_to_usdc() -> Value {
		Self::swap(NATIVE, USDC, ONE_FINNEY)
	}

	pub fn swap(sell_token: &str, buy_token: &str, sell_amount: &str) -> Value {
		json!({
			"sellToken": sell_token,
			"buyToken": buy_token,
			"sellAmount": sell_amount,
			"taker": TAKER
		})
	}

	/// Default settings with every required value given inline
	pub fn settings() -> Settings {
		let mut settings = Settings::default();
		settings.server.port = ConfigurableValue::from_plain("0");
		settings.upstream.api_key = ConfigurableValue::from_plain("test-0x-key");
		settings.fees.recipient = ConfigurableValue::from_plain(FEE_RECIPIENT);
		settings
	}
}
