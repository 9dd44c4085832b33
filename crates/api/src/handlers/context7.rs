//! Handler for documentation search via Context7.
//!
//! When Context7 is unconfigured or fails, the answer comes from the
//! static best-practices table and the response `source` says
//! `fallback` so clients can label it.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use inflio_core::best_practices;
use inflio_core::error::CoreError;

use crate::auth::CurrentUser;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for a documentation search.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub library_name: Option<String>,
}

/// Answer a search from the static best-practices table.
fn fallback_results(query: &str) -> serde_json::Value {
    let practice = best_practices::lookup(query);
    json!({
        "source": "fallback",
        "results": practice,
    })
}

/// POST /api/v1/context7/search
pub async fn search(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(input): Json<SearchRequest>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    if input.query.trim().is_empty() {
        return Err(CoreError::Validation("query must not be empty".into()).into());
    }

    if !state.context7.is_configured() {
        return Ok(Json(DataResponse {
            data: fallback_results(&input.query),
        }));
    }

    let data = match state
        .context7
        .search(&input.query, input.library_name.as_deref())
        .await
    {
        Ok(results) => json!({
            "source": "context7",
            "results": results,
        }),
        Err(err) => {
            tracing::warn!(error = %err, "Context7 search failed, using fallback");
            fallback_results(&input.query)
        }
    };

    Ok(Json(DataResponse { data }))
}
