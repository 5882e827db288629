use actix_web::{
    web,
    HttpResponse,
};
use serde::Serialize;

use crate::token::TokenManager;

#[derive(Serialize)]
struct RefreshResponse {
    success: bool,
    message: String,
    remaining_secs: Option<i64>,
}

/// Manual trigger for the OAuth refresh, useful to verify credentials
/// without waiting for the next subscription.
#[tracing::instrument(name = "manual token refresh", skip(token_manager))]
pub async fn refresh_token(token_manager: web::Data<TokenManager>) -> HttpResponse {
    if !token_manager.can_refresh() {
        return HttpResponse::BadRequest().json(RefreshResponse {
            success: false,
            message: "no refresh credentials are configured".into(),
            remaining_secs: None,
        });
    }

    match token_manager.refresh().await {
        Ok(_) => HttpResponse::Ok().json(RefreshResponse {
            success: true,
            message: "token refreshed".into(),
            remaining_secs: token_manager.remaining_lifetime().await,
        }),
        Err(e) => {
            tracing::error!("manual token refresh failed: {}", e);
            HttpResponse::BadGateway().json(RefreshResponse {
                success: false,
                message: "token refresh failed".into(),
                remaining_secs: None,
            })
        }
    }
}
