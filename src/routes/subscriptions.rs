use actix_web::{
    web,
    HttpResponse,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::subscription::SubscriptionForwarder;

#[derive(Deserialize)]
pub struct SubscribeRequest {
    email: String,
}

#[derive(Serialize)]
struct SubscribeResponse {
    success: bool,
    message: String,
}

#[tracing::instrument(
    name = "handling subscription request",
    skip(body, forwarder),
    fields(email = %body.email)
)]
pub async fn subscribe(
    body: web::Json<SubscribeRequest>,
    forwarder: web::Data<SubscriptionForwarder>,
) -> HttpResponse {
    let result = forwarder.subscribe(body.into_inner().email).await;

    HttpResponse::build(result.status_code()).json(SubscribeResponse {
        success: result.is_success(),
        message: result.message().to_string(),
    })
}
