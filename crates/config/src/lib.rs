//! Quote Proxy Configuration
//!
//! Settings, config loading and startup logging for the swap quote proxy.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, ConfigLoadError, DEFAULT_CONFIG_PATH};
pub use settings::{ConfigValidationError, LogFormat, Settings};
pub use startup_logger::{log_service_info, log_service_shutdown, log_startup_complete};
