use super::AppState;
use crate::error::AppError;
use crate::migrate::StepStatus;
use axum::{extract::State, Json};

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready unless startup initialization ran and left steps unapplied.
pub async fn ready(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(report) = &state.initialization {
        let pending: Vec<&str> = report
            .steps
            .iter()
            .filter(|s| s.status != StepStatus::Applied)
            .map(|s| s.name.as_str())
            .collect();
        if !pending.is_empty() {
            return Err(AppError::Unavailable(format!(
                "schema initialization incomplete: {}",
                pending.join(", ")
            )));
        }
    }
    Ok(Json(serde_json::json!({"status": "ready"})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_returns_ok() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }
}
