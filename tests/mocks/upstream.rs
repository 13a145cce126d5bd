//! Fake 0x Swap API serving allowance-holder quotes on an ephemeral port

use axum::{
	extract::{Query, State},
	http::{HeaderMap, StatusCode},
	routing::get,
	Json, Router,
};
use quote_proxy::serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct UpstreamCall {
	pub params: HashMap<String, String>,
	pub api_key: Option<String>,
	pub version: Option<String>,
}

#[derive(Clone, Default)]
struct UpstreamState {
	calls: Arc<Mutex<Vec<UpstreamCall>>>,
	delay: Option<Duration>,
	failure: Option<(StatusCode, Value)>,
}

pub struct FakeUpstream {
	pub base_url: String,
	calls: Arc<Mutex<Vec<UpstreamCall>>>,
	handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl FakeUpstream {
	pub async fn spawn() -> Self {
		Self::spawn_with(UpstreamState::default()).await
	}

	pub async fn spawn_slow(delay: Duration) -> Self {
		Self::spawn_with(UpstreamState {
			delay: Some(delay),
			..Default::default()
		})
		.await
	}

	pub async fn spawn_failing(status: StatusCode, body: Value) -> Self {
		Self::spawn_with(UpstreamState {
			failure: Some((status, body)),
			..Default::default()
		})
		.await
	}

	async fn spawn_with(state: UpstreamState) -> Self {
		let calls = state.calls.clone();
		let app = Router::new()
			.route("/swap/allowance-holder/quote", get(quote))
			.with_state(state);

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
			.await
			.expect("bind upstream port");
		let addr = listener.local_addr().unwrap();
		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		Self {
			base_url: format!("http://{}", addr),
			calls,
			handle,
		}
	}

	pub fn calls(&self) -> Vec<UpstreamCall> {
		self.calls.lock().unwrap().clone()
	}
}

impl Drop for FakeUpstream {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

async fn quote(
	State(state): State<UpstreamState>,
	Query(params): Query<HashMap<String, String>>,
	headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
	let header = |name: &str| {
		headers
			.get(name)
			.and_then(|v| v.to_str().ok())
			.map(str::to_string)
	};
	state.calls.lock().unwrap().push(UpstreamCall {
		params: params.clone(),
		api_key: header("0x-api-key"),
		version: header("0x-version"),
	});

	if let Some(delay) = state.delay {
		tokio::time::sleep(delay).await;
	}
	if let Some((status, body)) = state.failure {
		return (status, Json(body));
	}

	let sell_token = params.get("sellToken").cloned().unwrap_or_default();
	let buy_token = params.get("buyToken").cloned().unwrap_or_default();
	let sell_amount = params.get("sellAmount").cloned().unwrap_or_default();
	let native_sell = sell_token.eq_ignore_ascii_case(super::api_fixtures::NATIVE);

	(
		StatusCode::OK,
		Json(json!({
			"allowanceTarget": if native_sell { Value::Null } else { json!("0x0000000000001fF3684f28c67538d4D072C22734") },
			"blockNumber": "24150000",
			"buyAmount": "2512340",
			"buyToken": buy_token,
			"fees": {
				"integratorFee": {
					"amount": "2010",
					"token": params.get("swapFeeToken"),
					"type": "volume"
				},
				"zeroExFee": null,
				"gasFee": null
			},
			"issues": { "allowance": null, "balance": null, "simulationIncomplete": false },
			"liquidityAvailable": true,
			"minBuyAmount": "2462093",
			"route": { "fills": [], "tokens": [] },
			"sellAmount": sell_amount,
			"sellToken": sell_token,
			"transaction": {
				"to": "0x0000000000001fF3684f28c67538d4D072C22734",
				"data": "0x2213bc0b",
				"gas": "181250",
				"gasPrice": "6010000",
				"value": if native_sell { sell_amount.clone() } else { "0".to_string() }
			},
			"zid": "0x9a5b2f6e1c"
		})),
	)
}
