use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{
    web,
    App,
    HttpServer,
};
use tracing_actix_web::TracingLogger;
use url::Url;

use crate::app::configuration::{
    AuthSettings,
    CampaignSettings,
    Settings,
};
use crate::campaign_client::CampaignClient;
use crate::routes::*;
use crate::subscription::SubscriptionForwarder;
use crate::token::{
    TokenManager,
    TokenSource,
};

pub struct RelayApp {
    pub server: Result<Server, std::io::Error>,
    pub port: u16,
}

impl RelayApp {
    pub async fn from(configuration: Settings) -> Result<RelayApp, std::io::Error> {
        let tcp_listener = TcpListener::bind(configuration.application.binding_address())?;
        let port = tcp_listener.local_addr()?.port();

        let timeout_secs = configuration.campaign.timeout_secs;
        let token_manager =
            web::Data::new(RelayApp::token_manager(configuration.auth, timeout_secs));
        let forwarder = web::Data::new(SubscriptionForwarder::new(
            RelayApp::campaign_client(configuration.campaign),
            token_manager.clone().into_inner(),
        ));

        // HttpServer handles all transport level concerns
        let server = HttpServer::new(move || {
            // App is where all the application logic lives: routing, middlewares, request
            // handlers, etc.
            App::new()
                .wrap(TracingLogger::default())
                .route("/health_check", web::get().to(health_check))
                .route("/subscriptions", web::post().to(subscribe))
                .route("/token/refresh", web::post().to(refresh_token))
                .app_data(token_manager.clone())
                .app_data(forwarder.clone())
        })
        .backlog(configuration.application.max_pending_connections)
        .listen(tcp_listener)
        .map(HttpServer::run);
        Ok(RelayApp { port, server })
    }

    pub fn campaign_client(campaign_config: CampaignSettings) -> CampaignClient {
        let base_url = Url::parse(&campaign_config.base_url).unwrap_or_else(|e| {
            panic!(
                "invalid base url: {} for campaign client: {}",
                campaign_config.base_url, e
            )
        });
        CampaignClient::new(base_url, campaign_config.list_key, campaign_config.timeout_secs)
            .unwrap_or_else(|e| panic!("error creating campaign client: {}", e))
    }

    /// Turn the auth settings into a token manager.
    ///
    /// Refreshable credentials win over a static token; a static token
    /// configured alongside them only seeds the initial held token.
    pub fn token_manager(auth_config: AuthSettings, timeout_secs: u64) -> TokenManager {
        let token_url = Url::parse(&auth_config.token_url).unwrap_or_else(|e| {
            panic!(
                "invalid token url: {} for token manager: {}",
                auth_config.token_url, e
            )
        });

        let (source, initial_token) = match (
            auth_config.client_id,
            auth_config.client_secret,
            auth_config.refresh_token,
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => (
                Some(TokenSource::Refreshable {
                    client_id,
                    client_secret,
                    refresh_token,
                }),
                auth_config.static_token,
            ),
            _ => (
                auth_config
                    .static_token
                    .map(|token| TokenSource::Static { token }),
                None,
            ),
        };

        TokenManager::new(token_url, source, initial_token, timeout_secs)
            .unwrap_or_else(|e| panic!("error creating token manager: {}", e))
    }
}
