pub mod app;
pub mod config;
pub mod loader;

pub use app::{SubmitContractError, build_calculator, render_totals, seed_defaults, submit_contract};
pub use config::{AppConfig, ConfigError, FinanceConfig, WebhookConfig};
pub use loader::{FieldLoader, FieldLoaderError, FieldRecord};
