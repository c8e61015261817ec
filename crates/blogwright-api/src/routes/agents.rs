use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    routing::{get, post},
};
use blogwright_agents::{ResearchOutput, ScriptwriterOutput, Topic};
use blogwright_core::Stage;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ApiResult, AppError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TopicResponse {
    pub agent: &'static str,
    pub output: Topic,
}

#[derive(Debug, Serialize)]
pub struct AgentResponse<T> {
    pub agent: &'static str,
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct ResearchQuery {
    #[serde(default)]
    pub topic: Option<String>,
}

pub fn agents_router() -> Router<AppState> {
    Router::new()
        .route("/topic", get(generate_topic))
        .route("/researcher", get(research_topic))
        .route("/scriptwriter", post(write_post))
}

#[instrument(skip_all)]
async fn generate_topic(State(state): State<AppState>) -> ApiResult<Json<TopicResponse>> {
    let output = state
        .pipeline()
        .topic_agent()
        .generate_topic()
        .await
        .map_err(AppError::agent)?;

    Ok(Json(TopicResponse {
        agent: Stage::Topic.agent_name(),
        output,
    }))
}

#[instrument(skip_all)]
async fn research_topic(
    State(state): State<AppState>,
    Query(query): Query<ResearchQuery>,
) -> ApiResult<Json<AgentResponse<ResearchOutput>>> {
    let agent = Stage::Research.agent_name();
    let topic = query
        .topic
        .map(Topic::new)
        .filter(|topic| !topic.is_blank())
        .ok_or_else(|| AppError::bad_request(agent, "Missing topic parameter"))?;

    let data = state
        .pipeline()
        .research_agent()
        .research(&topic)
        .await
        .map_err(AppError::agent)?;

    Ok(Json(AgentResponse { agent, data }))
}

#[instrument(skip_all)]
async fn write_post(
    State(state): State<AppState>,
    payload: Result<Json<ResearchOutput>, JsonRejection>,
) -> ApiResult<Json<AgentResponse<ScriptwriterOutput>>> {
    let agent = Stage::Scriptwriter.agent_name();
    let Json(research) = payload.map_err(|rejection| {
        AppError::bad_request(agent, format!("Invalid research payload: {rejection}"))
    })?;

    let data = state
        .pipeline()
        .scriptwriter_agent()
        .write_script(&research)
        .await
        .map_err(AppError::agent)?;

    Ok(Json(AgentResponse { agent, data }))
}
