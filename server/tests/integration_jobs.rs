use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use jobcore::persist::{save_jobs, DataPaths};
use jobcore::{Job, JobCollection, Section, DEFAULT_SEEDS};
use serde_json::{json, Value};
use server::{build_app, build_router, AppState, ServerConfig};
use tempfile::tempdir;
use tower::ServiceExt;

fn sample_jobs() -> Vec<Job> {
    vec![
        Job {
            id: 1,
            title: "Railway Clerk".into(),
            state: "assam".into(),
            qualification: "10th".into(),
            category: "railway".into(),
            section: Some(Section::Northeast),
            tag: Some("Northeast".into()),
            last_date: "2026-02-01".into(),
            ..Default::default()
        },
        Job {
            id: 2,
            title: "Bank PO".into(),
            organization: Some("State Bank".into()),
            state: "all-india".into(),
            qualification: "graduate".into(),
            category: "banking".into(),
            section: Some(Section::Featured),
            tag: Some("Hot".into()),
            ..Default::default()
        },
    ]
}

fn app() -> Router {
    build_router(AppState::new(JobCollection::new(sample_jobs()), DEFAULT_SEEDS, 7))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, cookie, json)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

fn ids(json: &Value) -> Vec<u64> {
    json["jobs"].as_array().unwrap().iter().map(|j| j["id"].as_u64().unwrap()).collect()
}

#[tokio::test]
async fn unfiltered_jobs_are_all_visible() {
    let (status, cookie, json) = get(app(), "/jobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cookie, None);
    assert_eq!(ids(&json), vec![1, 2]);
    assert_eq!(json["active"], json!(false));
    assert_eq!(json["empty"], Value::Null);
    assert_eq!(json["jobs"][0]["state"], json!("Assam"));
    assert_eq!(json["jobs"][0]["last_date"], json!("Feb 1, 2026"));
}

#[tokio::test]
async fn search_sets_last_search_cookie() {
    let (status, cookie, json) = get(app(), "/jobs?q=RAILWAY").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json), vec![1]);
    assert_eq!(json["jobs"][0]["title_html"], json!("<mark>Railway</mark> Clerk"));
    assert_eq!(cookie.as_deref(), Some("lastSearch=RAILWAY; Max-Age=604800; Path=/"));
}

#[tokio::test]
async fn cookie_seeds_search_when_q_is_absent() {
    let req = Request::get("/jobs")
        .header(header::COOKIE, "lastSearch=bank")
        .body(Body::empty())
        .unwrap();
    let (_, cookie, json) = send(app(), req).await;
    assert_eq!(ids(&json), vec![2]);
    assert_eq!(cookie, None);

    let req = Request::get("/jobs?q=")
        .header(header::COOKIE, "lastSearch=bank")
        .body(Body::empty())
        .unwrap();
    let (_, cookie, json) = send(app(), req).await;
    assert_eq!(ids(&json), vec![1, 2]);
    assert_eq!(cookie, None);
}

#[tokio::test]
async fn no_match_is_distinguished_from_no_data() {
    let (_, _, json) = get(app(), "/jobs?state=assam&category=banking").await;
    assert_eq!(json["total"], json!(0));
    assert_eq!(json["empty"], json!("no_matches"));

    let empty = build_router(AppState::new(JobCollection::empty(), DEFAULT_SEEDS, 7));
    let (_, _, json) = get(empty, "/jobs?state=assam").await;
    assert_eq!(json["empty"], json!("no_data"));
}

#[tokio::test]
async fn sections_group_and_summarize() {
    let (_, _, json) = get(app(), "/sections").await;
    assert_eq!(json["featured"]["jobs"][0]["id"], json!(2));
    assert_eq!(json["northeast"]["jobs"][0]["id"], json!(1));
    assert_eq!(json["closing_soon"]["empty"], json!("no_data"));

    let (_, _, json) = get(app(), "/sections?qualification=graduate").await;
    assert_eq!(json["summary"], json!("Showing filtered results: Graduate"));
    assert_eq!(json["all_india"]["jobs"][0]["id"], json!(2));
    assert_eq!(json["northeast"]["empty"], json!("no_matches"));
}

#[tokio::test]
async fn suggestions_match_typed_text() {
    let (_, _, json) = get(app(), "/suggestions?q=bank").await;
    let list: Vec<&str> = json["suggestions"].as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect();
    assert_eq!(list, vec!["Banking", "Bank PO", "State Bank", "BANKING"]);

    let (_, _, json) = get(app(), "/suggestions").await;
    assert_eq!(json["suggestions"], json!([]));
}

#[tokio::test]
async fn last_search_reads_cookie() {
    let req = Request::get("/last-search")
        .header(header::COOKIE, "lastSearch=police+jobs")
        .body(Body::empty())
        .unwrap();
    let (_, _, json) = send(app(), req).await;
    assert_eq!(json["query"], json!("police jobs"));
}

#[tokio::test]
async fn quiz_answers() {
    let (_, _, json) = get(app(), "/quiz").await;
    assert_eq!(json.as_array().unwrap().len(), 5);
    assert!(json[0].get("correct").is_none());

    let answer = |id: u32, option: usize| {
        Request::post(format!("/quiz/{id}/answer"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "option": option }).to_string()))
            .unwrap()
    };
    let (status, _, json) = send(app(), answer(5, 2)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_correct"], json!(true));

    let (status, _, _) = send(app(), answer(5, 9)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _, _) = send(app(), answer(99, 0)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn build_app_loads_job_file() {
    let dir = tempdir().unwrap();
    let paths = DataPaths::new(dir.path());
    save_jobs(&paths, &sample_jobs()).unwrap();
    let app = build_app(ServerConfig { jobs_path: paths.jobs(), ..Default::default() }).unwrap();
    let (_, _, json) = get(app, "/jobs?category=banking").await;
    assert_eq!(ids(&json), vec![2]);

    let missing = build_app(ServerConfig { jobs_path: dir.path().join("none.json"), ..Default::default() }).unwrap();
    let (status, _, body) = get(missing, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}
