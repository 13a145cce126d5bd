use std::sync::Arc;

use qp_service::{ExecutionPreparer, QuoteServiceTrait};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub quote_service: Arc<dyn QuoteServiceTrait>,
	pub execution_preparer: ExecutionPreparer,
}

impl AppState {
	pub fn new(
		quote_service: Arc<dyn QuoteServiceTrait>,
		execution_preparer: ExecutionPreparer,
	) -> Self {
		Self {
			quote_service,
			execution_preparer,
		}
	}
}

impl std::fmt::Debug for AppState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AppState").finish_non_exhaustive()
	}
}
