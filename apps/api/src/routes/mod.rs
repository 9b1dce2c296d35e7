pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::evaluation::handlers as evaluation;
use crate::interview::handlers as interview;
use crate::market::handlers as jobs;
use crate::plan::handlers as plan;
use crate::progress::handlers as progress;
use crate::quiz::handlers as quiz;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Upload ceiling for résumé PDFs.
const RESUME_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Auth
        .route("/auth/register", post(auth::handle_register))
        .route("/auth/login", post(auth::handle_login))
        .route("/auth/forgot-password", post(auth::handle_forgot_password))
        .route("/auth/reset-password", post(auth::handle_reset_password))
        .route("/auth/me", get(auth::handle_me))
        // Résumé
        .route(
            "/resume/parse",
            post(resume::handle_parse_resume).layer(DefaultBodyLimit::max(RESUME_UPLOAD_LIMIT)),
        )
        .route("/resume/generate", post(resume::handle_generate_pdf))
        // Evaluation
        .route("/evaluate", post(evaluation::handle_evaluate))
        .route("/evaluate/", post(evaluation::handle_evaluate))
        // Learning plans
        .route("/plan", post(plan::handle_generate_plan))
        .route("/plan/", post(plan::handle_generate_plan))
        .route("/plan/complete-week", post(plan::handle_complete_week))
        .route("/plan/complete/:plan_id", patch(plan::handle_complete_module))
        // Quizzes
        .route("/quiz", post(quiz::handle_generate_quiz))
        .route("/quiz/", post(quiz::handle_generate_quiz))
        .route("/quiz/submit", post(quiz::handle_submit_quiz))
        // Interviews
        .route("/interview", post(interview::handle_interview_turn))
        .route("/interview/", post(interview::handle_interview_turn))
        .route("/interview/evaluate", post(interview::handle_evaluate_interview))
        // Jobs and market data
        .route("/jobs/search", get(jobs::handle_search_jobs))
        .route("/jobs/news", get(jobs::handle_market_news))
        .route("/jobs/exchange-rates", get(jobs::handle_exchange_rates))
        .route("/jobs/listings", get(jobs::handle_job_listings))
        // Progress
        .route("/progress/:user_id", get(progress::handle_get_progress))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::llm_client::testing::ScriptedLlm;
    use crate::market::jobs::testing::CountingSource;
    use crate::state::testing::test_state;
    use crate::store::memory::MemoryStore;
    use crate::store::Store;

    fn app(store: Option<Arc<dyn Store>>, llm: ScriptedLlm, jobs: CountingSource) -> Router {
        build_router(test_state(store, Arc::new(llm), Arc::new(jobs)))
    }

    fn offline_app() -> Router {
        app(None, ScriptedLlm::failing(), CountingSource::failing())
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_health_reports_no_database() {
        let (status, body) = send(&offline_app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], false);
        assert_eq!(body["integrations"]["llm"], false);
    }

    #[tokio::test]
    async fn test_evaluate_falls_back_and_persists() {
        let (store, user_id) = MemoryStore::default().with_user("ada@example.com", "ada");
        let store = Arc::new(store);
        let app = app(Some(store.clone()), ScriptedLlm::failing(), CountingSource::failing());

        let request = json_request(
            Method::POST,
            &format!("/evaluate?user_id={user_id}"),
            json!({
                "resume_skills": ["Python"],
                "job_description": "We need Python and Docker",
                "job_role": "Backend"
            }),
        );
        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 100.0);
        assert_eq!(body["match_score"], 100.0);
        assert_eq!(body["matched_skills"], json!(["Python"]));
        assert_eq!(body["missing_skills"].as_array().unwrap().len(), 4);
        assert_eq!(body["top_topics"], body["missing_skills"]);
        assert_eq!(body["job_role"], "Backend");

        let saved = store.evaluations.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].user_id, user_id);
        assert_eq!(saved[0].match_score, 100);
    }

    #[tokio::test]
    async fn test_evaluate_with_mock_user_id_is_not_persisted() {
        let store = Arc::new(MemoryStore::default());
        let app = app(Some(store.clone()), ScriptedLlm::failing(), CountingSource::failing());

        let request = json_request(
            Method::POST,
            "/evaluate/?user_id=mock_id",
            json!({ "resume_skills": ["Go"], "job_description": "Go" }),
        );
        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_role"], "General");
        assert!(store.evaluations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resume_upload_rejects_non_pdf() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"cv.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             hello\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri("/resume/parse")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, body) = send(&offline_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Only PDF files are supported");
    }

    #[tokio::test]
    async fn test_resume_generate_returns_pdf_attachment() {
        let request = json_request(
            Method::POST,
            "/resume/generate",
            json!({
                "personal": { "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com" },
                "skills": ["Rust", "SQL"]
            }),
        );
        let response = offline_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=resume.pdf"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_quiz_submit_without_database_is_unavailable() {
        let request = json_request(
            Method::POST,
            "/quiz/submit",
            json!({
                "user_id": Uuid::new_v4(),
                "domain": "Rust",
                "difficulty": "Medium",
                "score": 4,
                "total_questions": 5
            }),
        );
        let (status, body) = send(&offline_app(), request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "DATABASE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_quiz_generation_failure_returns_empty_list() {
        let request = json_request(Method::POST, "/quiz", json!({ "topic": "Rust" }));
        let (status, body) = send(&offline_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["questions"], json!([]));
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_progress_without_database() {
        let (status, body) = send(&offline_app(), get(&format!("/progress/{}", Uuid::new_v4()))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "Database not connected" }));
    }

    #[tokio::test]
    async fn test_job_search_serves_samples_when_upstream_fails() {
        let (status, body) = send(&offline_app(), get("/jobs/search?query=Rust%20Developer")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["page"], 1);
        assert!(body["total"].as_u64().unwrap() > 0);
        assert_eq!(body["total"].as_u64().unwrap() as usize, body["jobs"].as_array().unwrap().len());
    }

    #[tokio::test]
    async fn test_job_search_formats_upstream_payload() {
        let payload = json!({
            "data": [{
                "job_id": "j1",
                "job_title": "Rust Engineer",
                "employer_name": "Ferrous",
                "job_city": "Pune",
                "job_country": "IN",
                "job_employment_type": "FULLTIME",
                "job_description": "Build services",
                "job_apply_link": "https://example.com/apply"
            }]
        });
        let app = app(None, ScriptedLlm::failing(), CountingSource::ok(payload));
        let (status, body) = send(&app, get("/jobs/search?query=rust&location=Pune")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["total"], 1);
        assert_eq!(body["jobs"][0]["title"], "Rust Engineer");
    }

    #[tokio::test]
    async fn test_news_and_rates_report_missing_keys() {
        let app = offline_app();
        let (_, news) = send(&app, get("/jobs/news")).await;
        assert_eq!(news["error"], "News API not configured");
        let (_, rates) = send(&app, get("/jobs/exchange-rates")).await;
        assert_eq!(rates["error"], "Exchange API not configured");
    }

    #[tokio::test]
    async fn test_static_listings_use_requested_role() {
        let (status, body) = send(&offline_app(), get("/jobs/listings?role=Data%20Engineer")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_completing_every_week_awards_badge_once() {
        let (store, user_id) = MemoryStore::default().with_user("ada@example.com", "ada");
        let store = Arc::new(store);
        let app = app(Some(store.clone()), ScriptedLlm::failing(), CountingSource::failing());

        let plan = json_request(
            Method::POST,
            &format!("/plan?user_id={user_id}"),
            json!({ "role": "Backend", "missing_skills": ["Kafka"] }),
        );
        let (status, body) = send(&app, plan).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weeks"].as_array().unwrap().len(), 4);
        assert!(body["plan_id"].is_string());

        let mut last = Value::Null;
        for week in 1..=4 {
            let request = json_request(
                Method::POST,
                &format!("/plan/complete-week?user_id={user_id}"),
                json!({ "week_number": week, "topic": "Kafka" }),
            );
            let (status, body) = send(&app, request).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["success"], true);
            last = body;
        }
        assert_eq!(last["completed_weeks"], 4);
        assert_eq!(last["badge_awarded"], true);

        let again = json_request(
            Method::POST,
            &format!("/plan/complete-week?user_id={user_id}"),
            json!({ "week_number": 4 }),
        );
        let (_, body) = send(&app, again).await;
        assert_eq!(body["badge_awarded"], false);

        let (status, progress) = send(&app, get(&format!("/progress/{user_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(progress["stats"]["completed_modules"], 4);
        assert_eq!(progress["stats"]["badges"], json!(["Course Crusader"]));
        assert_eq!(progress["insights"]["news"], json!([]));
        assert_eq!(progress["insights"]["market"], json!({}));
    }

    #[tokio::test]
    async fn test_complete_week_rejects_out_of_range_week() {
        let request = json_request(
            Method::POST,
            "/plan/complete-week?user_id=mock_id",
            json!({ "week_number": 5 }),
        );
        let (status, _) = send(&offline_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_complete_module_without_database() {
        let uri = format!(
            "/plan/complete/{}?week_num=2&user_id={}",
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let request = Request::builder()
            .method(Method::PATCH)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&offline_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Database not connected");
    }

    #[tokio::test]
    async fn test_complete_module_for_unknown_plan_reports_failure() {
        let (store, user_id) = MemoryStore::default().with_user("ada@example.com", "ada");
        let app = app(Some(Arc::new(store)), ScriptedLlm::failing(), CountingSource::failing());
        let request = Request::builder()
            .method(Method::PATCH)
            .uri(format!("/plan/complete/{}?week_num=1&user_id={user_id}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Plan not found");
    }

    #[tokio::test]
    async fn test_me_requires_bearer_token() {
        let (status, _) = send(&offline_app(), get("/auth/me")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_then_login_and_fetch_identity() {
        let app = app(
            Some(Arc::new(MemoryStore::default())),
            ScriptedLlm::failing(),
            CountingSource::failing(),
        );

        let register = json_request(
            Method::POST,
            "/auth/register",
            json!({
                "email": "grace@example.com",
                "password": "hopper",
                "first_name": "Grace",
                "last_name": "Hopper"
            }),
        );
        let (status, body) = send(&app, register).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "bearer");

        let duplicate = json_request(
            Method::POST,
            "/auth/register",
            json!({ "email": "grace@example.com", "password": "x" }),
        );
        let (status, _) = send(&app, duplicate).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let login = json_request(
            Method::POST,
            "/auth/login",
            json!({ "username_or_email": "grace", "password": "hopper" }),
        );
        let (status, body) = send(&app, login).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_name"], "Grace");
        let token = body["access_token"].as_str().unwrap().to_string();

        let me = Request::builder()
            .uri("/auth/me")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, claims) = send(&app, me).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(claims["sub"], "grace@example.com");

        let wrong = json_request(
            Method::POST,
            "/auth/login",
            json!({ "username_or_email": "grace", "password": "nope" }),
        );
        let (status, _) = send(&app, wrong).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mock_login_without_database() {
        let login = json_request(
            Method::POST,
            "/auth/login",
            json!({ "username_or_email": "sam@example.com", "password": "password" }),
        );
        let (status, body) = send(&offline_app(), login).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_name"], "sam");
    }

    #[tokio::test]
    async fn test_interview_evaluation_without_answers_uses_fallback() {
        let llm = ScriptedLlm::failing();
        let app = app(None, llm, CountingSource::failing());
        let request = json_request(
            Method::POST,
            "/interview/evaluate",
            json!({
                "role": "Backend",
                "transcript": [{ "sender": "ai", "text": "Tell me about yourself" }]
            }),
        );
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 50);
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 3);
    }
}
