pub const BITBUCKET_API_ROOT: &str = "https://api.bitbucket.org/2.0";
pub const CONFIG_FILE: &str = ".bbissues-config.json";

pub const ENV_USERNAME: &str = "BB_USERNAME";
pub const ENV_APP_PASSWORD: &str = "BB_APP_PASSWORD";
pub const ENV_API_ROOT: &str = "BB_API_ROOT";

/// Query parameter of the hosting page that carries the active status filter.
pub const STATUS_PARAM: &str = "status";

pub const NOTIFICATION_TIMEOUT_MS: u64 = 10_000;
pub const SUCCESS_BACKGROUND: &str = "lightgreen";
pub const SUCCESS_FOREGROUND: &str = "black";
pub const ERROR_BACKGROUND: &str = "orangered";
pub const ERROR_FOREGROUND: &str = "white";

pub const ACTION_CANCEL: &str = "btn-cancel";
pub const ACTION_DELETE: &str = "btn-delete";
pub const ACTION_SPAM: &str = "btn-spam";
