//! Proxy with the real 0x client against a fake 0x API

mod mocks;

use crate::mocks::api_fixtures::{ApiFixtures, FEE_RECIPIENT, NATIVE, ONE_FINNEY, TAKER, USDC, WETH};
use crate::mocks::{FakeUpstream, TestServer};
use axum::http::StatusCode as UpstreamStatus;
use quote_proxy::NativeAssetMode;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

#[tokio::test]
async fn test_upstream_request_carries_fee_and_headers() {
	let upstream = FakeUpstream::spawn().await;
	let server = TestServer::spawn_against_upstream(&upstream.base_url, |_| {})
		.await
		.unwrap();

	let resp = Client::new()
		.post(server.url("/quote"))
		.json(&ApiFixtures::native_to_usdc())
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), StatusCode::OK);
	let quote: Value = resp.json().await.unwrap();
	assert_eq!(quote["fees"]["integratorFee"]["token"], USDC);
	assert_eq!(quote["zid"], "0x9a5b2f6e1c");

	let calls = upstream.calls();
	assert_eq!(calls.len(), 1);
	let params = &calls[0].params;
	assert_eq!(params["chainId"], "8453");
	assert_eq!(params["sellToken"], NATIVE);
	assert_eq!(params["buyToken"], USDC);
	assert_eq!(params["sellAmount"], ONE_FINNEY);
	assert_eq!(params["taker"], TAKER);
	assert_eq!(params["swapFeeBps"], "8");
	assert_eq!(params["swapFeeRecipient"], FEE_RECIPIENT);
	assert_eq!(params["swapFeeToken"], USDC);
	assert_eq!(params["slippageBps"], "200");
	assert_eq!(calls[0].api_key.as_deref(), Some("test-0x-key"));
	assert_eq!(calls[0].version.as_deref(), Some("v2"));

	server.abort();
}

#[tokio::test]
async fn test_wrap_mode_sends_weth_on_every_endpoint() {
	let upstream = FakeUpstream::spawn().await;
	let server = TestServer::spawn_against_upstream(&upstream.base_url, |settings| {
		settings.tokens.native_asset_mode = NativeAssetMode::Wrap;
	})
	.await
	.unwrap();
	let client = Client::new();

	for path in ["/quote", "/quote-and-execute"] {
		let resp = client
			.post(server.url(path))
			.json(&ApiFixtures::native_to_usdc())
			.send()
			.await
			.unwrap();
		assert_eq!(resp.status(), StatusCode::OK);
	}

	let calls = upstream.calls();
	assert_eq!(calls.len(), 2);
	assert!(calls.iter().all(|call| call.params["sellToken"] == WETH));

	server.abort();
}

#[tokio::test]
async fn test_upstream_rejection_surfaces_status_and_body() {
	let upstream = FakeUpstream::spawn_failing(
		UpstreamStatus::BAD_REQUEST,
		json!({ "name": "INPUT_INVALID", "message": "sellAmount too small" }),
	)
	.await;
	let server = TestServer::spawn_against_upstream(&upstream.base_url, |_| {})
		.await
		.unwrap();

	let resp = Client::new()
		.post(server.url("/quote"))
		.json(&ApiFixtures::native_to_usdc())
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
	let body: Value = resp.json().await.unwrap();
	let details = body["details"].as_str().unwrap();
	assert!(details.contains("400"));
	assert!(details.contains("sellAmount too small"));

	server.abort();
}

#[tokio::test]
async fn test_slow_upstream_hits_execute_timeout() {
	let upstream = FakeUpstream::spawn_slow(Duration::from_millis(400)).await;
	let server = TestServer::spawn_against_upstream(&upstream.base_url, |settings| {
		settings.timeouts.quote_ms = 2_000;
		settings.timeouts.execute_ms = 100;
	})
	.await
	.unwrap();
	let client = Client::new();

	let execute = client
		.post(server.url("/quote-and-execute"))
		.json(&ApiFixtures::native_to_usdc())
		.send()
		.await
		.unwrap();
	assert_eq!(execute.status(), StatusCode::INTERNAL_SERVER_ERROR);
	let body: Value = execute.json().await.unwrap();
	assert!(body["details"].as_str().unwrap().contains("timed out after 100ms"));

	let quote = client
		.post(server.url("/quote"))
		.json(&ApiFixtures::native_to_usdc())
		.send()
		.await
		.unwrap();
	assert_eq!(quote.status(), StatusCode::OK);

	server.abort();
}
