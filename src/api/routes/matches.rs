use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{load_matches, ApiError};
use crate::calculate;
use crate::models::{BiggestWin, MatchId, MatchRecord, NewMatch};

#[derive(Debug, Deserialize)]
pub struct ListMatchesParams {
    /// Most recent N matches; all matches when absent
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchRecord>,
    pub total: u32,
}

pub async fn list_matches(
    State(state): State<AppState>,
    Query(params): Query<ListMatchesParams>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let matches = load_matches(&state)?;
    let ordered = match params.limit {
        Some(limit) => calculate::recent_matches(&matches, limit),
        None => calculate::matches_by_date_desc(&matches),
    };

    Ok(Json(MatchListResponse {
        matches: ordered.into_iter().cloned().collect(),
        total: matches.len() as u32,
    }))
}

pub async fn longest_match(State(state): State<AppState>) -> Result<Json<MatchRecord>, ApiError> {
    let matches = load_matches(&state)?;
    calculate::longest_match(&matches)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("no matches recorded".to_string()))
}

#[derive(Debug, Serialize)]
pub struct BiggestWinResponse {
    pub player: String,
    pub biggest_win: Option<BiggestWin>,
}

pub async fn biggest_win(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<BiggestWinResponse>, ApiError> {
    let matches = load_matches(&state)?;
    let known = state.roster.contains(&name) || matches.iter().any(|m| m.involves(&name));
    if !known {
        return Err(ApiError::NotFound(format!("player {}", name)));
    }

    Ok(Json(BiggestWinResponse {
        biggest_win: calculate::biggest_win_for(&name, &matches),
        player: name,
    }))
}

pub async fn create_match(
    State(state): State<AppState>,
    Json(new_match): Json<NewMatch>,
) -> Result<(StatusCode, Json<MatchRecord>), ApiError> {
    let _guard = state.write_lock.lock().await;
    let today = chrono::Local::now().date_naive();
    let record = state.store.append(new_match, &state.roster, today)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn delete_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let _guard = state.write_lock.lock().await;
    state.store.delete(&MatchId::from(id))?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::routes::test_support::{get_json, scenario, send, setup_state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_matches_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path(), &scenario()));

        let (status, json) = get_json(app, "/api/matches").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 3);
        assert_eq!(json["matches"][0]["id"], "m3");
        assert_eq!(json["matches"][2]["id"], "m1");
    }

    #[tokio::test]
    async fn test_list_matches_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path(), &scenario()));

        let (status, json) = get_json(app, "/api/matches?limit=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["matches"].as_array().unwrap().len(), 2);
        assert_eq!(json["total"], 3);
    }

    #[tokio::test]
    async fn test_longest_match() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path(), &scenario()));

        let (status, json) = get_json(app, "/api/matches/longest").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], "m2");
        assert_eq!(json["score1"], 12);
    }

    #[tokio::test]
    async fn test_longest_match_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path(), &[]));

        let (status, json) = get_json(app, "/api/matches/longest").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_biggest_win() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path(), &scenario()));

        let (status, json) = get_json(app.clone(), "/api/players/A/biggest-win").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["biggest_win"]["margin"], 6);
        assert_eq!(json["biggest_win"]["opponent"], "B");

        let (status, json) = get_json(app.clone(), "/api/players/C/biggest-win").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["biggest_win"].is_null());

        let (status, _) = get_json(app, "/api/players/Nobody/biggest-win").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_match() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path(), &[]));

        let (status, json) = send(
            app.clone(),
            post_json(
                "/api/matches",
                json!({"p1": "A", "p2": "C", "score1": 15, "score2": 13, "date": "2025-08-01"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["p1"], "A");
        assert_eq!(json["date"], "2025-08-01");
        assert!(!json["id"].as_str().unwrap().is_empty());

        let (_, list) = get_json(app, "/api/matches").await;
        assert_eq!(list["total"], 1);
    }

    #[tokio::test]
    async fn test_create_match_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path(), &[]));

        let (status, json) = send(
            app.clone(),
            post_json(
                "/api/matches",
                json!({"p1": "A", "p2": "B", "score1": 11, "score2": 10}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("margin is below two"));

        let (status, _) = send(
            app,
            post_json(
                "/api/matches",
                json!({"p1": "A", "p2": "Zed", "score1": 11, "score2": 3}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_match() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path(), &scenario()));

        let delete = |id: &str| {
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/matches/{}", id))
                .body(Body::empty())
                .unwrap()
        };

        let resp = send(app.clone(), delete("m2")).await;
        assert_eq!(resp.0, StatusCode::NO_CONTENT);

        let (_, list) = get_json(app.clone(), "/api/matches").await;
        assert_eq!(list["total"], 2);

        let (status, _) = send(app, delete("m2")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
