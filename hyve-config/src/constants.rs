use std::time::Duration;

pub const ENV_API_URL: &str = "HYVE_API_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "HYVE_REQUEST_TIMEOUT";
pub const ENV_CONFIG_PATH: &str = "HYVE_CONFIG";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Hard ceiling on the submission wait bound.
pub const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(5 * 60);
/// Above this the front end will look hung to a user; warn only.
pub const SLOW_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
