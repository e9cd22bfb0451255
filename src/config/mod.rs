pub mod config;

pub use config::{
    config_path, get_api_root, load_config, load_config_from, save_config, save_config_to, Config,
    StoredCredentials,
};
