use crate::helpers::*;

#[actix_rt::test]
async fn health_check_works() {
    let health_check_endpoint = format!("{}/health_check", spawn_app().await.address);

    let response = send_get_request(&health_check_endpoint).await;

    assert!(response.status().is_success());
    let payload: serde_json::Value = response.json().await.expect("invalid payload");
    assert_eq!(serde_json::json!({"status": "ok"}), payload);
}
