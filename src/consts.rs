pub const fn get_user_agent() -> &'static str {
    concat!("hk/", env!("CARGO_PKG_VERSION"))
}

pub const CLI_NAME: &str = "hk";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_API_URL: &str = "https://api.heroku.com";
pub const DEFAULT_UPDATE_URL: &str = "https://github.com/downloads/kr/hk/";

pub const API_URL_ENV: &str = "HEROKU_API_URL";
pub const UPDATE_URL_ENV: &str = "HK_UPDATE_URL";
pub const NO_UPDATE_ENV: &str = "HK_NO_UPDATE";
pub const LOG_ENV: &str = "HK_LOG";

pub const NETRC_FILE: &str = ".netrc";
pub const HK_HOME_DIR: &str = ".hk";
pub const UPDATE_DIR: &str = "update";

pub const NO_APP_SPECIFIED: &str = "No app specified. Use -a <app>";
