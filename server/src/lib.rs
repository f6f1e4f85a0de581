pub mod cookie;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use cookie::{read_cookie, PendingCookie, LAST_SEARCH};
use jobcore::persist::{load_jobs_file, load_seed_list};
use jobcore::quiz::{find_card, Answer, QuizCard, DEFAULT_DECK};
use jobcore::view::job_views;
use jobcore::{
    EmptyReason, FilterController, FilterState, JobCollection, JobView, SectionsView, SuggestionSet,
    DEFAULT_RETENTION_DAYS, DEFAULT_SEEDS,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct ServerConfig {
    pub jobs_path: PathBuf,
    pub seeds_path: Option<PathBuf>,
    pub retention_days: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { jobs_path: PathBuf::from("./data/jobs.json"), seeds_path: None, retention_days: DEFAULT_RETENTION_DAYS }
    }
}

#[derive(Deserialize, Default)]
pub struct FilterParams {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub category: String,
    /// Absent means "replay the lastSearch cookie"; present but blank clears it.
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct JobsResponse {
    pub filters: FilterState,
    pub active: bool,
    pub total: usize,
    pub empty: Option<EmptyReason>,
    pub jobs: Vec<JobView>,
}

#[derive(Serialize)]
pub struct SuggestResponse {
    pub query: String,
    pub suggestions: Vec<String>,
}

#[derive(Serialize)]
pub struct QuizCardView {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Deserialize)]
pub struct AnswerRequest {
    pub option: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<JobCollection>,
    pub suggestions: Arc<SuggestionSet>,
    pub deck: Arc<Vec<QuizCard>>,
    pub retention_days: u32,
}

impl AppState {
    pub fn new<S: AsRef<str>>(jobs: JobCollection, seeds: &[S], retention_days: u32) -> Self {
        let suggestions = SuggestionSet::generate(jobs.jobs(), seeds);
        Self {
            jobs: Arc::new(jobs),
            suggestions: Arc::new(suggestions),
            deck: Arc::new(DEFAULT_DECK.clone()),
            retention_days,
        }
    }
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    // Load jobs and derive suggestions once at startup
    let jobs = load_jobs_file(&config.jobs_path)?;
    let state = match &config.seeds_path {
        Some(path) => {
            let seeds = load_seed_list(path)?;
            AppState::new(jobs, seeds.as_slice(), config.retention_days)
        }
        None => AppState::new(jobs, DEFAULT_SEEDS, config.retention_days),
    };
    tracing::info!(jobs = state.jobs.len(), suggestions = state.suggestions.len(), "board state ready");
    Ok(build_router(state))
}

pub fn build_router(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/jobs", get(jobs_handler))
        .route("/sections", get(sections_handler))
        .route("/suggestions", get(suggestions_handler))
        .route("/last-search", get(last_search_handler))
        .route("/quiz", get(quiz_handler))
        .route("/quiz/:id/answer", post(answer_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the request's filters through a fresh controller in one recompute.
/// Returns the controller and the `Set-Cookie` value, if the search was
/// remembered. A query replayed from the cookie is not written back.
fn run_filters(state: &AppState, headers: &HeaderMap, params: &FilterParams) -> (FilterController, Option<String>) {
    let pending = PendingCookie::default();
    let mut controller =
        FilterController::new(state.jobs.clone()).with_memory(pending.clone(), state.retention_days);
    let filters = FilterState::new()
        .with_state(&params.state)
        .with_qualification(&params.qualification)
        .with_category(&params.category);
    match &params.q {
        Some(q) => controller.apply(filters, Some(q)),
        None => match read_cookie(headers, LAST_SEARCH) {
            Some(last) => {
                tracing::debug!(query = %last, "replaying last search");
                controller.apply(filters.with_search(&last), None);
            }
            None => controller.apply(filters, None),
        },
    }
    (controller, pending.take())
}

fn with_cookie(body: impl IntoResponse, set_cookie: Option<String>) -> Response {
    let mut resp = body.into_response();
    if let Some(value) = set_cookie {
        match HeaderValue::from_str(&value) {
            Ok(v) => {
                resp.headers_mut().insert(header::SET_COOKIE, v);
            }
            Err(err) => tracing::warn!(%err, "dropping unencodable cookie"),
        }
    }
    resp
}

pub async fn jobs_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<FilterParams>,
) -> Response {
    let (controller, set_cookie) = run_filters(&state, &headers, &params);
    let visible = controller.visible();
    let body = JobsResponse {
        filters: controller.filters().clone(),
        active: controller.is_active(),
        total: visible.len(),
        empty: controller.empty_reason(),
        jobs: job_views(&visible, controller.filters()),
    };
    with_cookie(Json(body), set_cookie)
}

pub async fn sections_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<FilterParams>,
) -> Response {
    let (controller, set_cookie) = run_filters(&state, &headers, &params);
    let view = SectionsView::build(&controller.visible(), controller.jobs().len(), controller.filters());
    with_cookie(Json(view), set_cookie)
}

pub async fn suggestions_handler(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Json<SuggestResponse> {
    let suggestions = state.suggestions.matching(&params.q).into_iter().map(str::to_string).collect();
    Json(SuggestResponse { query: params.q, suggestions })
}

pub async fn last_search_handler(headers: HeaderMap) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "query": read_cookie(&headers, LAST_SEARCH) }))
}

pub async fn quiz_handler(State(state): State<AppState>) -> Json<Vec<QuizCardView>> {
    Json(
        state
            .deck
            .iter()
            .map(|c| QuizCardView { id: c.id, question: c.question.clone(), options: c.lettered_options() })
            .collect(),
    )
}

pub async fn answer_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<Answer>, (StatusCode, String)> {
    let card = find_card(&state.deck, id).ok_or((StatusCode::NOT_FOUND, format!("no quiz card {id}")))?;
    card.answer(req.option)
        .map(Json)
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))
}
