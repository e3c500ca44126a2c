use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::data::Dataset;
use crate::error::AppError;
use crate::models::{ApiResponse, HeadToHead, Player, TeamSummary};
use crate::screens::{
    format_answer, AnswerBlock, ListItem, MatchesScreen, PlayersScreen, PredictScreen,
    PredictionForm, ResultView, TeamComparison,
};
use crate::services::{head_to_head_lookup, match_prediction, team_summary, GuruClient, PredictionClient};

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub predictor: PredictionClient,
    pub guru: GuruClient,
}

impl AppState {
    pub fn new(config: &Config, dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            predictor: PredictionClient::new(config.prediction_api_url.clone()),
            guru: GuruClient::new(config.gemini_api_url.clone(), config.gemini_api_key.clone()),
        }
    }
}

pub async fn serve(config: &Config, port: u16) -> anyhow::Result<()> {
    let dataset = Dataset::load(config).await?;
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; /ask will return the fallback answer");
    }

    let state = AppState::new(config, dataset);
    let state_url = state.predictor.base_url().to_string();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!(
        "IPL Insights API server listening on port {} (prediction service: {})",
        port,
        state_url
    );

    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/players", get(players_handler))
        .route("/matches", get(matches_handler))
        .route("/matches/{index}", get(match_detail_handler))
        .route("/teams/{name}/summary", get(team_summary_handler))
        .route("/compare", get(compare_handler))
        .route("/head-to-head", get(head_to_head_handler))
        .route("/predict/teams", get(predict_teams_handler))
        .route("/predict/venues", get(predict_venues_handler))
        .route("/predict", post(predict_handler))
        .route("/ask", post(ask_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

/// Every failure becomes a message body; none escape as a bare status.
fn failure<T>(err: AppError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = match &err {
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::InsufficientData(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Network { .. } => StatusCode::BAD_GATEWAY,
    };
    tracing::warn!("Request failed: {}", err);
    (status, Json(ApiResponse::error(err.user_message())))
}

/// Malformed bodies, queries and paths go through the same envelope.
fn rejected<T>(field: &'static str, reason: String) -> (StatusCode, Json<ApiResponse<T>>) {
    failure(AppError::validation(field, reason))
}

// Health check endpoint
async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("IPL Insights API is running"))
}

// GET /players?search= - Player list, optionally filtered by name
#[derive(Deserialize)]
struct PlayersQuery {
    search: Option<String>,
}

async fn players_handler(
    State(state): State<AppState>,
    Query(params): Query<PlayersQuery>,
) -> Json<ApiResponse<Vec<Player>>> {
    let mut screen = PlayersScreen::new(&state.dataset);
    if let Some(search) = params.search {
        screen.set_query(search);
    }
    Json(ApiResponse::success(screen.visible().into_iter().cloned().collect()))
}

// GET /matches - Upcoming fixtures grouped under date headers
async fn matches_handler(State(state): State<AppState>) -> Json<ApiResponse<Vec<ListItem>>> {
    Json(ApiResponse::success(MatchesScreen::new(&state.dataset).items()))
}

// GET /matches/{index} - Fixture detail: head-to-head, prediction, top players
async fn match_detail_handler(
    State(state): State<AppState>,
    index: Result<Path<usize>, PathRejection>,
) -> ApiResult<Vec<ListItem>> {
    let Path(index) = index.map_err(|e| rejected("index", e.body_text()))?;
    let mut screen = MatchesScreen::new(&state.dataset);
    screen.select(index).map_err(failure)?;
    Ok(Json(ApiResponse::success(screen.items())))
}

// GET /teams/{name}/summary - Total, average and top scorer for one team
async fn team_summary_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<TeamSummary> {
    let summary = team_summary(&state.dataset.players, &name);
    if summary.player_count == 0 {
        return Err(failure(AppError::InsufficientData(format!("no players for team '{}'", name))));
    }
    Ok(Json(ApiResponse::success(summary)))
}

#[derive(Deserialize)]
struct TeamPairQuery {
    team1: String,
    team2: String,
}

// GET /compare?team1=&team2= - Side-by-side team analysis
async fn compare_handler(
    State(state): State<AppState>,
    params: Result<Query<TeamPairQuery>, QueryRejection>,
) -> ApiResult<TeamComparison> {
    let Query(params) = params.map_err(|e| rejected("query", e.body_text()))?;
    Ok(Json(ApiResponse::success(TeamComparison::build(
        &state.dataset.players,
        &params.team1,
        &params.team2,
    ))))
}

#[derive(Serialize)]
struct HeadToHeadResponse {
    record: Option<HeadToHead>,
    prediction: String,
}

// GET /head-to-head?team1=&team2= - Historical record and verdict
async fn head_to_head_handler(
    State(state): State<AppState>,
    params: Result<Query<TeamPairQuery>, QueryRejection>,
) -> ApiResult<HeadToHeadResponse> {
    let Query(params) = params.map_err(|e| rejected("query", e.body_text()))?;
    let records = &state.dataset.head_to_head;
    Ok(Json(ApiResponse::success(HeadToHeadResponse {
        record: head_to_head_lookup(records, &params.team1, &params.team2).cloned(),
        prediction: match_prediction(records, &params.team1, &params.team2),
    })))
}

// GET /predict/teams - Team options from the prediction service
async fn predict_teams_handler(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let teams = state.predictor.list_teams().await.map_err(failure)?;
    Ok(Json(ApiResponse::success(teams)))
}

// GET /predict/venues - Venue options from the prediction service
async fn predict_venues_handler(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let venues = state.predictor.list_venues().await.map_err(failure)?;
    Ok(Json(ApiResponse::success(venues)))
}

// POST /predict - Validate the raw form, forward it, normalize the answer
async fn predict_handler(
    State(state): State<AppState>,
    form: Result<Json<PredictionForm>, JsonRejection>,
) -> ApiResult<ResultView> {
    let Json(form) = form.map_err(|e| rejected("request body", e.body_text()))?;
    // Options are not re-fetched here; the upstream service rejects unknown names itself.
    let screen = PredictScreen {
        form,
        ..PredictScreen::default()
    };
    let view = screen.submit(&state.predictor).await.map_err(failure)?;
    Ok(Json(ApiResponse::success(view)))
}

#[derive(Deserialize)]
struct AskRequest {
    question: String,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
    blocks: Vec<AnswerBlock>,
}

// POST /ask - Server-side relay to the generative Q&A service
async fn ask_handler(
    State(state): State<AppState>,
    request: Result<Json<AskRequest>, JsonRejection>,
) -> ApiResult<AskResponse> {
    let Json(request) = request.map_err(|e| rejected("request body", e.body_text()))?;
    if request.question.trim().is_empty() {
        return Err(failure(AppError::validation("question", "must not be empty")));
    }
    let answer = state.guru.ask(&request.question).await;
    Ok(Json(ApiResponse::success(AskResponse {
        blocks: format_answer(&answer),
        answer,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn test_app(prediction_url: &str) -> Router {
        let config = Config {
            prediction_api_url: prediction_url.to_string(),
            gemini_api_url: "http://127.0.0.1:9/unused".to_string(),
            ..Config::default()
        };
        create_router(AppState::new(&config, Dataset::bundled().unwrap()))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(request).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, json) = get_json(test_app("http://127.0.0.1:9"), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
    }

    #[tokio::test]
    async fn test_players_search() {
        let (status, json) = get_json(test_app("http://127.0.0.1:9"), "/players?search=kohli").await;
        assert_eq!(status, StatusCode::OK);
        let players = json["data"].as_array().unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0]["Player"], "Virat Kohli");
    }

    #[tokio::test]
    async fn test_matches_list_and_detail() {
        let (_, json) = get_json(test_app("http://127.0.0.1:9"), "/matches").await;
        let items = json["data"].as_array().unwrap();
        assert_eq!(items[0]["type"], "dateHeader");
        assert_eq!(items[1]["type"], "match");

        let (status, json) = get_json(test_app("http://127.0.0.1:9"), "/matches/0").await;
        assert_eq!(status, StatusCode::OK);
        let items = json["data"].as_array().unwrap();
        assert_eq!(items[1]["type"], "headToHead");
        assert_eq!(items[1]["matches"], 33);

        let (status, json) = get_json(test_app("http://127.0.0.1:9"), "/matches/500").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "fixture 500 not found");

        let (status, json) = get_json(test_app("http://127.0.0.1:9"), "/matches/first").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_team_summary_and_unknown_team() {
        let (status, json) =
            get_json(test_app("http://127.0.0.1:9"), "/teams/Mumbai%20Indians/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["player_count"], 3);
        assert_eq!(json["data"]["top_player"]["Player"], "Jasprit Bumrah");

        let (status, json) = get_json(test_app("http://127.0.0.1:9"), "/teams/Nobody/summary").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_head_to_head_symmetric() {
        let app = test_app("http://127.0.0.1:9");
        let (_, forward) = get_json(
            app.clone(),
            "/head-to-head?team1=Gujarat%20Titans&team2=Mumbai%20Indians",
        )
        .await;
        let (_, reverse) = get_json(app, "/head-to-head?team1=Mumbai%20Indians&team2=Gujarat%20Titans").await;
        assert_eq!(forward["data"], reverse["data"]);
        assert_eq!(forward["data"]["prediction"], "Gujarat Titans is likely to win (60.00% chance)");
    }

    #[tokio::test]
    async fn test_compare() {
        let (_, json) = get_json(
            test_app("http://127.0.0.1:9"),
            "/compare?team1=Delhi%20Capitals&team2=Punjab%20Kings",
        )
        .await;
        assert_eq!(json["data"]["team1"]["top_player_label"], "Top Player: Rishabh Pant");
        assert_eq!(json["data"]["players"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_predict_validation_error() {
        let (status, json) = post_json(
            test_app("http://127.0.0.1:9"),
            "/predict",
            json!({"batting_team": "A", "bowling_team": "B", "venue": "V",
                   "target": "abc", "current_score": "1", "wickets_left": "1", "balls_left": "1"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("target"));
    }

    #[tokio::test]
    async fn test_predict_forwards_and_normalizes() {
        let upstream = Router::new().route(
            "/predict",
            post(|| async {
                Json(json!({"batting_team": "A", "bowling_team": "B",
                            "batting_prob": 3.0, "bowling_prob": 1.0,
                            "batting_impact": 0.5, "bowling_impact": 0.1}))
            }),
        );
        let url = spawn_upstream(upstream).await;

        let (status, json) = post_json(
            test_app(&url),
            "/predict",
            json!({"batting_team": "A", "bowling_team": "B", "venue": "V",
                   "target": "150", "current_score": "80", "wickets_left": "7", "balls_left": "48"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["batting_pct"], 75.0);
        assert_eq!(json["data"]["legend"][1], "B Win: 25.00%");
    }

    #[tokio::test]
    async fn test_predict_accepts_numeric_fields() {
        let upstream = Router::new().route(
            "/predict",
            post(|Json(req): Json<crate::models::PredictionRequest>| async move {
                Json(json!({"batting_team": req.batting_team, "bowling_team": req.bowling_team,
                            "batting_prob": req.target as f64, "bowling_prob": req.current_score as f64,
                            "batting_impact": 0.0, "bowling_impact": 0.0}))
            }),
        );
        let url = spawn_upstream(upstream).await;

        let (status, json) = post_json(
            test_app(&url),
            "/predict",
            json!({"batting_team": "A", "bowling_team": "B", "venue": "V",
                   "target": 150, "current_score": 50, "wickets_left": 7, "balls_left": 48}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["batting_pct"], 75.0);

        let (status, json) = post_json(
            test_app(&url),
            "/predict",
            json!({"batting_team": "A", "bowling_team": "B", "venue": "V",
                   "target": 150, "current_score": 50, "wickets_left": 11, "balls_left": 48}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("wickets_left"));
    }

    #[tokio::test]
    async fn test_malformed_requests_use_error_envelope() {
        let app = test_app("http://127.0.0.1:9");

        let (status, json) = get_json(app.clone(), "/compare?team1=A").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("team2"));

        let (status, json) = get_json(app.clone(), "/head-to-head").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);

        let (status, json) = post_json(app.clone(), "/predict", json!({"target": [1, 2]})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);

        let (status, json) = post_json(app, "/ask", json!({"query": "wrong field"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let upstream = Router::new().route(
            "/teams",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let url = spawn_upstream(upstream).await;

        let (status, json) = get_json(test_app(&url), "/predict/teams").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("try again"));
    }

    #[tokio::test]
    async fn test_ask_blank_and_fallback() {
        let (status, _) = post_json(test_app("http://127.0.0.1:9"), "/ask", json!({"question": "  "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // No key configured, so the relay answers with the fallback.
        let (status, json) =
            post_json(test_app("http://127.0.0.1:9"), "/ask", json!({"question": "Who has most titles?"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["answer"], crate::services::FALLBACK_ANSWER);
        assert_eq!(json["data"]["blocks"][0]["type"], "text");
    }
}
