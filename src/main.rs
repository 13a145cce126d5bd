//! Quote Proxy Server
//!
//! Main entry point for the quote proxy

use quote_proxy::{ProxyBuilder, ProxyStartupError};

#[tokio::main]
async fn main() -> Result<(), ProxyStartupError> {
	ProxyBuilder::new().start_server().await
}
