use campaign_relay::app::{
    load_configuration,
    setup_tracing,
    RelayApp,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    setup_tracing("campaign-relay".into(), "info".into());

    let configuration = load_configuration().expect("error loading configuration");
    let app = RelayApp::from(configuration).await?;
    app.server?.await
}
