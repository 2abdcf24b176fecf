pub mod config;
pub mod validation;

pub use config::{get_config_dir, get_config_path, load_config, save_config};
pub use validation::{validate_month, validate_working_days, validate_year};
