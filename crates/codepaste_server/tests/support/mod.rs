//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use codepaste_server::{create_app, AppState, Config, PasteService};

pub(crate) fn test_config() -> Config {
    Config {
        port: 0,
        ..Config::default()
    }
}

pub(crate) fn test_server_for_config(config: Config) -> TestServer {
    test_server_for_state(AppState::new(config))
}

pub(crate) fn test_server_for_service(config: Config, service: PasteService) -> TestServer {
    test_server_for_state(AppState::with_service(config, service))
}

fn test_server_for_state(state: AppState) -> TestServer {
    let app = create_app(state, false);
    TestServer::new(app).expect("server")
}

pub(crate) fn setup_test_server() -> TestServer {
    test_server_for_config(test_config())
}
