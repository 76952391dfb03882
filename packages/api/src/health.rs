use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "knowledge-base"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_reports_service() {
        let value = health_check().await.0;

        assert_eq!(value["status"], "healthy");
        assert_eq!(value["service"], "knowledge-base");
        assert!(value["version"].is_string());
        // After Jan 1, 2020
        assert!(value["timestamp"].as_i64().unwrap() > 1_577_836_800);
    }
}
