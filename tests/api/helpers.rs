use reqwest::Response;
use serde_json::Value;
use wiremock::MockServer;

use campaign_relay::app::{
    setup_tracing,
    ApplicationSettings,
    AuthSettings,
    CampaignSettings,
    RelayApp,
    Settings,
};

// ensure the `tracing` is instantiated only once
lazy_static::lazy_static! {
 static ref TRACING: () = setup_tracing("test".into(),"debug".into());
}

pub struct TestApp {
    pub address: String,
    pub campaign_server: MockServer,
    pub token_server: MockServer,
}

pub enum TestAuth {
    Refreshable,
    Static,
    Unconfigured,
}

/// When a `tokio` runtime is shut down all tasks spawned on it are dropped.
///
/// `actix_rt::test` spins up a new runtime at the beginning of each test case
/// and they shut down at the end of each test case.
pub async fn spawn_app() -> TestApp {
    spawn_configured_app(TestAuth::Refreshable, Some("test-list-key".into())).await
}

pub async fn spawn_configured_app(auth: TestAuth, list_key: Option<String>) -> TestApp {
    lazy_static::initialize(&TRACING);
    let campaign_server = MockServer::start().await;
    let token_server = MockServer::start().await;

    let auth = match auth {
        TestAuth::Refreshable => AuthSettings {
            token_url: token_server.uri(),
            static_token: None,
            client_id: Some("client-id".into()),
            client_secret: Some("client-secret".into()),
            refresh_token: Some("refresh-token".into()),
        },
        TestAuth::Static => AuthSettings {
            token_url: token_server.uri(),
            static_token: Some("static-token".into()),
            client_id: None,
            client_secret: None,
            refresh_token: None,
        },
        TestAuth::Unconfigured => AuthSettings {
            token_url: token_server.uri(),
            static_token: None,
            client_id: None,
            client_secret: None,
            refresh_token: None,
        },
    };

    let configuration = Settings {
        application: ApplicationSettings {
            host: "127.0.0.1".into(),
            max_pending_connections: 128,
            port: 0,
        },
        campaign: CampaignSettings {
            base_url: campaign_server.uri(),
            list_key,
            timeout_secs: 2,
        },
        auth,
    };

    let app = RelayApp::from(configuration)
        .await
        .expect("error building app");

    tokio::spawn(app.server.expect("error building server"));

    TestApp {
        // the request is done with the protocol:ip:port
        address: format!("http://127.0.0.1:{}", app.port),
        campaign_server,
        token_server,
    }
}

pub async fn send_json_post_request(endpoint: &str, body: &Value) -> Response {
    reqwest::Client::new()
        .post(endpoint)
        .json(&body)
        .send()
        .await
        .expect("Fail to execute post request")
}

pub async fn send_get_request(endpoint: &str) -> Response {
    reqwest::Client::new()
        .get(endpoint)
        .send()
        .await
        .expect("Fail to execute get request")
}

pub fn success_body() -> Value {
    serde_json::json!({"status": "success", "message": "subscribed"})
}

pub fn fresh_token_body() -> Value {
    serde_json::json!({"access_token": "fresh-token", "expires_in": 3600})
}
