use axum::{Json, body::Bytes, extract::State};
use blogwright_agents::{PipelineReport, Topic};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::{ApiResult, AppError, PIPELINE_AGENT};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PipelineRequest {
    #[serde(default)]
    pub topic: Option<String>,
}

/// An empty body means "generate a topic first".
fn parse_request(body: &[u8]) -> ApiResult<PipelineRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(PipelineRequest::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        AppError::bad_request(PIPELINE_AGENT, format!("Invalid pipeline request: {err}"))
    })
}

#[instrument(skip_all)]
pub async fn run_pipeline(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<PipelineReport>> {
    let request = parse_request(&body)?;
    let seed = match request.topic.map(Topic::new) {
        Some(topic) if topic.is_blank() => {
            return Err(AppError::bad_request(
                PIPELINE_AGENT,
                "topic must not be empty when provided",
            ));
        }
        seed => seed,
    };

    let _permit = state.try_acquire_run()?;
    let report = state
        .pipeline()
        .run_with_report(seed)
        .await
        .map_err(AppError::pipeline)?;

    info!(run_id = %report.run_id, title = %report.post.title, "pipeline request served");
    Ok(Json(report))
}
