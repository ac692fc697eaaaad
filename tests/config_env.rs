//! Environment-driven configuration tests.

mod test_helpers;

use std::time::Duration;

use recovery_board::{
    board::services::ServerMovePolicy,
    config::{
        API_URL_ENV, BoardConfig, ConfigError, MOVE_POLICY_ENV, STORE_DIR_ENV, TIMEOUT_SECS_ENV,
    },
};
use rstest::rstest;
use test_helpers::BoardEnv;

#[rstest]
fn empty_environment_gives_defaults() {
    let _env = BoardEnv::cleared();

    let config = BoardConfig::from_env().expect("defaults should load");

    assert_eq!(config.api_base_url(), "http://localhost:8001");
    assert_eq!(config.store_key(), "kanban_manual_tasks");
    assert_eq!(config.log_filter(), "info");
}

#[rstest]
fn environment_overrides_defaults() {
    let _env = BoardEnv::with(&[
        (API_URL_ENV, "http://backend:9000"),
        (STORE_DIR_ENV, "/var/lib/recovery-board"),
        (TIMEOUT_SECS_ENV, "30"),
        (MOVE_POLICY_ENV, "pessimistic"),
    ]);

    let config = BoardConfig::from_env().expect("overrides should load");

    assert_eq!(config.api_base_url(), "http://backend:9000");
    assert_eq!(config.store_dir().as_str(), "/var/lib/recovery-board");
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
    assert_eq!(config.move_policy(), ServerMovePolicy::Pessimistic);
}

#[rstest]
fn invalid_timeout_is_rejected() {
    let _env = BoardEnv::with(&[(TIMEOUT_SECS_ENV, "-5")]);

    let result = BoardConfig::from_env();

    assert_eq!(
        result,
        Err(ConfigError::InvalidTimeout {
            value: "-5".to_owned()
        })
    );
}

#[rstest]
fn configured_gateway_uses_api_root() {
    let config = BoardConfig::default().with_api_base_url("http://backend:9000/");

    let gateway = config.http_gateway().expect("client should build");

    assert_eq!(gateway.base_url(), "http://backend:9000");
}
