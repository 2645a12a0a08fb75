// tests/common/mod.rs

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use frontend::ApiClient;
use serde_json::{Value, json};
use url::Url;

pub const PASSWORD: &str = "password123";
const SESSION_COOKIE: &str = "session=test-token";

/// State of the fake REST API.
pub struct MockState {
    hits: Mutex<HashMap<String, usize>>,
    pub like_status: Mutex<String>,
    pub like_delay_ms: AtomicU64,
    pub submissions: Mutex<Vec<Value>>,
    pub comments: Mutex<Vec<Value>>,
    pub leaderboard_limit: Mutex<Option<u32>>,
    pub fail_recommended: AtomicBool,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            hits: Mutex::new(HashMap::new()),
            like_status: Mutex::new("liked".to_string()),
            like_delay_ms: AtomicU64::new(0),
            submissions: Mutex::new(Vec::new()),
            comments: Mutex::new(Vec::new()),
            leaderboard_limit: Mutex::new(None),
            fail_recommended: AtomicBool::new(false),
        }
    }
}

impl MockState {
    fn hit(&self, key: &str) {
        *self.hits.lock().unwrap().entry(key.to_string()).or_default() += 1;
    }
}

type Shared = State<Arc<MockState>>;

pub struct TestApp {
    pub address: String,
    pub state: Arc<MockState>,
}

impl TestApp {
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("{}/api", self.address)).unwrap()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::builder(self.base_url()).build().unwrap()
    }

    pub fn hits(&self, key: &str) -> usize {
        self.state.hits.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    pub fn set_like_status(&self, status: &str) {
        *self.state.like_status.lock().unwrap() = status.to_string();
    }
}

/// Spawns the fake API on a random port.
pub async fn spawn_app() -> TestApp {
    let state = Arc::new(MockState::default());

    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/users/me", get(me))
        .route("/users/{id}/stats", get(user_stats))
        .route("/quizzes", post(create_quiz))
        .route("/quizzes/trending", get(trending))
        .route("/quizzes/attempts/{id}/results", get(results))
        .route("/quizzes/{id}", get(quiz_detail))
        .route("/quizzes/{id}/take", get(take))
        .route("/quizzes/{id}/submit", post(submit))
        .route("/quizzes/{id}/like", post(like))
        .route("/quizzes/{id}/leaderboard", get(leaderboard))
        .route("/questions/{id}/comments", post(add_comment))
        .route("/communities/recommended", get(recommended))
        .route("/communities/{id}", get(community))
        .route("/communities/{id}/join", post(join))
        .route("/communities/{id}/leave", post(leave))
        .route("/echo", get(echo))
        .route("/boom", get(boom))
        .route("/empty", post(empty));

    let app = Router::new().nest("/api", api).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { address, state }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn signed_in(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains(SESSION_COOKIE))
}

pub fn profile_json() -> Value {
    json!({
        "id": "u1",
        "email": "alice@example.com",
        "username": "alice",
        "avatar": "/uploads/alice.png",
        "banner": null,
        "communities": [
            {"id": "c-member", "name": "Green Campus", "numberOfQuizzes": 3, "memberCount": 40, "role": "MEMBER"}
        ],
        "attempts": [
            {"quiz": {"id": "quiz-1", "title": "Recycling", "questionsCount": 3}, "score": 2,
             "timeTakenMinutes": 4, "attemptNumber": 1, "percentage": 66.7, "completedAt": "2025-03-04T10:00:00Z"}
        ],
        "createdAt": "2025-01-01T00:00:00Z"
    })
}

async fn login(State(state): Shared, Json(body): Json<Value>) -> Response {
    state.hit("POST /auth/login");
    if body["password"] != PASSWORD {
        return error(StatusCode::UNAUTHORIZED, "Invalid email or password");
    }
    (
        [(header::SET_COOKIE, format!("{SESSION_COOKIE}; Path=/; HttpOnly"))],
        Json(json!({
            "success": true,
            "data": {"id": "u1", "username": "alice", "email": body["email"], "avatar": null}
        })),
    )
        .into_response()
}

async fn logout(State(state): Shared) -> Response {
    state.hit("POST /auth/logout");
    (
        [(header::SET_COOKIE, "session=; Path=/; Max-Age=0".to_string())],
        Json(json!({"success": true})),
    )
        .into_response()
}

async fn me(State(state): Shared, headers: HeaderMap) -> Response {
    state.hit("GET /users/me");
    if !signed_in(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    Json(json!({ "res": profile_json() })).into_response()
}

async fn user_stats(Path(id): Path<String>) -> Response {
    Json(json!({
        "success": true,
        "data": {"user_id": id, "total_quizzes_taken": 4, "average_score": 72.5, "best_score": 100.0}
    }))
    .into_response()
}

async fn create_quiz(State(state): Shared) -> Response {
    state.hit("POST /quizzes");
    error(StatusCode::BAD_REQUEST, "Community not found")
}

fn quiz_card(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "community": {"id": "c-member", "name": "Green Campus", "banner": null, "is_joined": "JOINED"},
        "creator": {"id": "u2", "username": "bob", "avatar": null},
        "title": title,
        "description": "",
        "duration_minutes": 10,
        "likes_count": 3,
        "is_like": false,
        "number_of_questions": 3
    })
}

async fn trending() -> Response {
    Json(json!({
        "success": true,
        "data": [quiz_card("quiz-1", "Recycling"), quiz_card("quiz-2", "Water cycle")]
    }))
    .into_response()
}

async fn recommended(State(state): Shared) -> Response {
    if state.fail_recommended.load(Ordering::SeqCst) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "db down");
    }
    Json(json!({
        "success": true,
        "data": [{"id": "c-member", "name": "Green Campus", "member_role": "MEMBER"}]
    }))
    .into_response()
}

async fn quiz_detail(Path(id): Path<String>) -> Response {
    if id == "missing" {
        return error(StatusCode::NOT_FOUND, "Quiz not found");
    }
    let mut quiz = quiz_card(&id, "Recycling");
    quiz["number_of_questions"] = json!(8);
    quiz["current_attempt_id"] = Value::Null;
    Json(json!({ "quiz": quiz })).into_response()
}

async fn take(State(state): Shared, Path(id): Path<String>) -> Response {
    state.hit("GET /quizzes/take");
    if id == "missing" {
        return error(StatusCode::NOT_FOUND, "Quiz not found");
    }
    let questions: Vec<Value> = (1..=3)
        .map(|q| {
            json!({
                "question_id": format!("q{q}"),
                "question_text": format!("Question {q}?"),
                "options": (1..=4).map(|o| json!({
                    "option_id": format!("q{q}o{o}"),
                    "text": format!("Answer {q}.{o}")
                })).collect::<Vec<_>>()
            })
        })
        .collect();
    Json(json!({
        "quiz": {"quiz_id": id, "title": "Recycling", "duration": 10, "questions": questions}
    }))
    .into_response()
}

async fn submit(State(state): Shared, Json(body): Json<Value>) -> Response {
    state.hit("POST /quizzes/submit");
    let mut submissions = state.submissions.lock().unwrap();
    submissions.push(body);
    Json(json!({ "result": format!("attempt-{}", submissions.len()) })).into_response()
}

async fn results(State(state): Shared, Path(id): Path<String>) -> Response {
    state.hit("GET /quizzes/attempts/results");
    let comments = state.comments.lock().unwrap().clone();
    let question = |q: u32, comments: Vec<Value>| {
        json!({
            "question_id": format!("q{q}"),
            "question_text": format!("Question {q}?"),
            "explanation": "",
            "correct_answer": format!("q{q}o1"),
            "user_answer": if q == 3 { Value::Null } else { json!(format!("q{q}o1")) },
            "is_correct": q != 3,
            "options": [
                {"option_id": format!("q{q}o1"), "text": "Right", "is_correct": true, "selection_count": 3, "percentage": 75.0},
                {"option_id": format!("q{q}o2"), "text": "Wrong", "is_correct": false, "selection_count": 1, "percentage": 25.0}
            ],
            "comments": comments
        })
    };
    Json(json!({
        "attempt_id": id,
        "quiz_id": "quiz-1",
        "quiz_title": "Recycling",
        "score": 2,
        "total_questions": 3,
        "percentage": 66.67,
        "time_taken_minutes": 4,
        "completed_at": "2025-03-04T10:00:00Z",
        "questions": [question(1, comments), question(2, vec![]), question(3, vec![])]
    }))
    .into_response()
}

async fn add_comment(State(state): Shared, Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    state.hit("POST /questions/comments");
    let mut comments = state.comments.lock().unwrap();
    let comment_id = format!("c{}", comments.len() + 1);
    comments.push(json!({
        "id": comment_id,
        "user_id": "u1",
        "username": "alice",
        "avatar": null,
        "comment_text": body["comment_text"],
        "created_at": "2025-03-04T10:05:00Z",
        "question_id": id
    }));
    (StatusCode::CREATED, Json(json!({ "id": comment_id }))).into_response()
}

async fn like(State(state): Shared) -> Response {
    let delay = state.like_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    state.hit("POST /quizzes/like");
    let status = state.like_status.lock().unwrap().clone();
    if status == "error" {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to toggle like");
    }
    Json(json!({ "status": status })).into_response()
}

#[derive(serde::Deserialize)]
struct LimitQuery {
    limit: Option<u32>,
}

async fn leaderboard(State(state): Shared, Query(query): Query<LimitQuery>) -> Response {
    *state.leaderboard_limit.lock().unwrap() = query.limit;
    let entry = |name: &str, score: u32, percentage: f64, secs: u32| {
        json!({
            "user": {"id": name, "username": name, "avatar": null},
            "score": score,
            "percentage": percentage,
            "time_taken_seconds": secs,
            "completed_at": "2025-03-04T10:00:00Z"
        })
    };
    Json(json!({
        "success": true,
        "data": [
            entry("ann", 8, 100.0, 95),
            entry("bob", 6, 75.0, 247),
            entry("cy", 4, 50.0, 300)
        ]
    }))
    .into_response()
}

async fn community(Path(id): Path<String>) -> Response {
    let role = match id.as_str() {
        "c-creator" => "CREATOR",
        "c-member" => "MEMBER",
        "c-admin" => "ADMIN",
        _ => "NON_MEMBER",
    };
    Json(json!({
        "community": {
            "id": id,
            "name": "Green Campus",
            "description": "Sustainability on campus",
            "subject": "Environment",
            "banner": "/uploads/banner.jpg",
            "member_role": role,
            "creator": {"id": "u2", "username": "bob", "avatar": null},
            "members": [
                {"id": "u2", "username": "bob", "avatar": null, "email": "bob@example.com", "role": "creator"},
                {"id": "u1", "username": "alice", "avatar": null, "email": "alice@example.com", "role": "member"}
            ],
            "allow_public_quiz_submission": false,
            "created_at": "2025-01-15T08:00:00Z"
        },
        "quizzes": [quiz_card("quiz-1", "Recycling")]
    }))
    .into_response()
}

async fn join(State(state): Shared) -> Response {
    state.hit("POST /communities/join");
    Json(json!({ "status": "joined" })).into_response()
}

async fn leave(State(state): Shared) -> Response {
    state.hit("POST /communities/leave");
    Json(json!({ "status": "left" })).into_response()
}

async fn echo(headers: HeaderMap) -> Response {
    let client = headers
        .get("x-client")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(json!({ "x_client": client, "content_type": content_type })).into_response()
}

async fn boom() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "database unavailable" })),
    )
        .into_response()
}

async fn empty() -> StatusCode {
    StatusCode::NO_CONTENT
}
