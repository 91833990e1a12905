//! Song lookup routes.
//!
//! Three endpoints relay a chart question to the configured chat-completion
//! backend:
//!
//! - `GET /songs/stringprompt/topSong` — fixed question about 1984, raw text
//! - `GET /songs/stringprompt/topSong/{year}` — parameterized question, raw text
//! - `GET /songs/objectreturn/topsong/{year}` — structured [`TopSong`] record

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use top_songs_ai::{LlmRequest, OutputConverter, PromptTemplate};

/// System instruction submitted with every chart question.
const SYSTEM_PROMPT: &str = "You are a music expert.";

/// The chart question, with the year left as a placeholder.
const TOP_SONG_PROMPT: &str =
    "What was the Billboard number one year-end top 100 single for {{year}}?";

/// A chart-topping song.
///
/// Request-scoped: produced by decoding model output, returned to the caller,
/// then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSong {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: i32,
}

impl TopSong {
    /// JSON schema the model is instructed to follow.
    #[must_use]
    pub fn schema() -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "artist": { "type": "string" },
                "album": { "type": "string" },
                "year": { "type": "integer" }
            },
            "required": ["title", "artist", "album", "year"]
        })
    }
}

/// Builds the router for the song endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/songs/stringprompt/topSong", get(top_song))
        .route("/songs/stringprompt/topSong/{year}", get(top_song_for_year))
        .route(
            "/songs/objectreturn/topsong/{year}",
            get(top_song_record_for_year),
        )
}

fn top_song_template() -> PromptTemplate {
    PromptTemplate::new("top_song", TOP_SONG_PROMPT).with_required_variable("year")
}

fn render_prompt(year: JsonValue) -> String {
    let mut vars = HashMap::new();
    vars.insert("year".to_string(), year);
    top_song_template().render(&vars)
}

fn llm_request(state: &AppState, prompt: String) -> LlmRequest {
    let mut request = LlmRequest::new(prompt).with_system(SYSTEM_PROMPT);
    if let Some(temperature) = state.temperature {
        request = request.with_temperature(temperature);
    }
    request
}

async fn ask(state: &AppState, prompt: String) -> Result<String, ApiError> {
    tracing::debug!(%prompt, "submitting chart question");
    let response = state.backend.complete(&llm_request(state, prompt)).await?;
    let text = response.text()?;
    tracing::debug!(
        model = %response.model,
        prompt_tokens = response.usage.prompt_tokens,
        total_tokens = response.usage.total(),
        "chart answer received"
    );
    Ok(text.to_string())
}

/// The 1984 chart topper, as freeform text.
pub async fn top_song(State(state): State<AppState>) -> Result<String, ApiError> {
    ask(&state, render_prompt(serde_json::json!("1984"))).await
}

/// The chart topper for an arbitrary year, as freeform text.
///
/// The year is taken verbatim; any string renders into a valid prompt.
pub async fn top_song_for_year(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<String, ApiError> {
    ask(&state, render_prompt(JsonValue::String(year))).await
}

/// The chart topper for a year, decoded into a [`TopSong`] record.
///
/// The year must be numeric; non-numeric input is rejected by extraction
/// before any model call.
pub async fn top_song_record_for_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<TopSong>, ApiError> {
    let converter = OutputConverter::<TopSong>::new(TopSong::schema());
    let prompt = format!(
        "{}\n{}",
        render_prompt(serde_json::json!(year)),
        converter.format()
    );

    let answer = ask(&state, prompt).await?;
    let song = converter.convert(&answer)?;
    Ok(Json(song))
}
