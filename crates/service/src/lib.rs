//! Quote Proxy Service
//!
//! Token normalization, quote orchestration and execution preparation.

pub mod clock;
pub mod execution;
pub mod normalizer;
pub mod quote;

pub use clock::{Clock, SystemClock};
pub use execution::{ExecutionError, ExecutionPreparer};
pub use normalizer::TokenNormalizer;
pub use quote::{QuoteService, QuoteServiceError, QuoteServiceOptions, QuoteServiceTrait};
