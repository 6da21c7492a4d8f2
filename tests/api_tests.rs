// tests/api_tests.rs

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use quiz_console::{
    client::{FetchError, Fetcher, HttpFetcher, Resource},
    config::Config,
    routes,
    state::AppState,
};
use serde_json::{Value, json};
use tower::ServiceExt;
use url::Url;

/// Records held by the fake upstream, in the wire format.
#[derive(Default)]
struct Db {
    perguntas: Vec<Value>,
    respostas: Vec<Value>,
    alunos: Vec<Value>,
    next_id: i64,
    /// When set, every `resposta` request fails with 500.
    respostas_down: bool,
}

type SharedDb = Arc<Mutex<Db>>;

fn with_id(mut body: Value, id: i64) -> Value {
    body["id"] = json!(id);
    body
}

async fn list_perguntas(State(db): State<SharedDb>) -> Json<Value> {
    Json(json!(db.lock().unwrap().perguntas))
}

async fn create_pergunta(State(db): State<SharedDb>, Json(body): Json<Value>) -> StatusCode {
    let mut db = db.lock().unwrap();
    db.next_id += 1;
    let id = db.next_id;
    db.perguntas.push(with_id(body, id));
    StatusCode::CREATED
}

async fn delete_perguntas(State(db): State<SharedDb>) -> StatusCode {
    db.lock().unwrap().perguntas.clear();
    StatusCode::NO_CONTENT
}

async fn get_pergunta(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    db.lock()
        .unwrap()
        .perguntas
        .iter()
        .find(|p| p["id"] == json!(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn put_pergunta(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut db = db.lock().unwrap();
    match db.perguntas.iter_mut().find(|p| p["id"] == json!(id)) {
        Some(p) => {
            *p = with_id(body, id);
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_pergunta(State(db): State<SharedDb>, Path(id): Path<i64>) -> StatusCode {
    db.lock().unwrap().perguntas.retain(|p| p["id"] != json!(id));
    StatusCode::OK
}

async fn list_respostas(State(db): State<SharedDb>) -> Result<Json<Value>, StatusCode> {
    let db = db.lock().unwrap();
    if db.respostas_down {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(json!(db.respostas)))
}

async fn delete_respostas(State(db): State<SharedDb>) -> StatusCode {
    let mut db = db.lock().unwrap();
    if db.respostas_down {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    db.respostas.clear();
    StatusCode::NO_CONTENT
}

async fn list_alunos(State(db): State<SharedDb>) -> Json<Value> {
    Json(json!(db.lock().unwrap().alunos))
}

async fn create_aluno(State(db): State<SharedDb>, Json(body): Json<Value>) -> StatusCode {
    let mut db = db.lock().unwrap();
    db.next_id += 1;
    let id = db.next_id;
    db.alunos.push(with_id(body, id));
    StatusCode::CREATED
}

async fn get_aluno(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    db.lock()
        .unwrap()
        .alunos
        .iter()
        .find(|a| a["id"] == json!(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn put_aluno(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut db = db.lock().unwrap();
    match db.alunos.iter_mut().find(|a| a["id"] == json!(id)) {
        Some(a) => {
            *a = with_id(body, id);
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_aluno(State(db): State<SharedDb>, Path(id): Path<i64>) -> StatusCode {
    db.lock().unwrap().alunos.retain(|a| a["id"] != json!(id));
    StatusCode::OK
}

/// Spawns the fake upstream on a random port and returns its base URL.
async fn spawn_upstream(db: SharedDb) -> String {
    let app = Router::new()
        .route(
            "/api/pergunta",
            get(list_perguntas)
                .post(create_pergunta)
                .delete(delete_perguntas),
        )
        .route(
            "/api/pergunta/{id}",
            get(get_pergunta).put(put_pergunta).delete(delete_pergunta),
        )
        .route("/api/resposta", get(list_respostas).delete(delete_respostas))
        .route("/alunos", get(list_alunos).post(create_aluno))
        .route(
            "/alunos/{id}",
            get(get_aluno).put(put_aluno).delete(delete_aluno),
        )
        .with_state(db);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

fn config_for(upstream: &str) -> Config {
    Config::with_upstreams(
        Url::parse(&format!("{}/api", upstream)).unwrap(),
        Url::parse(upstream).unwrap(),
    )
}

/// Spawns the service against a seeded upstream.
/// Returns (service base URL, upstream handle).
async fn spawn_app(db: Db) -> (String, SharedDb) {
    let db = Arc::new(Mutex::new(db));
    let upstream = spawn_upstream(db.clone()).await;

    let fetcher = Arc::new(HttpFetcher::new(&config_for(&upstream)).unwrap());
    let app = routes::create_router(AppState::new(fetcher));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, db)
}

fn seeded_db() -> Db {
    Db {
        perguntas: (1..=7)
            .map(|i| json!({"id": i, "question": format!("Pergunta {}", i), "chemicalElement": "Hidrogênio"}))
            .collect(),
        respostas: vec![
            json!({"id": 1, "alunoId": 1, "score": 1}),
            json!({"id": 2, "alunoId": 2, "score": 0}),
            json!({"id": 3, "alunoId": 1, "score": 1}),
            json!({"id": 4, "alunoId": 2, "score": "1"}),
            json!({"id": 5, "alunoId": 1, "score": 0}),
        ],
        alunos: vec![
            json!({"id": 1, "nome": "Ana", "email": "ana@escola.br", "senha": "1", "turma": "3A"}),
            json!({"id": 2, "nome": "Bruno", "email": "bruno@escola.br", "senha": "2", "turma": 301}),
        ],
        next_id: 100,
        respostas_down: false,
    }
}

#[tokio::test]
async fn unknown_route_is_404() {
    // Arrange
    let (address, _db) = spawn_app(seeded_db()).await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn questions_reload_and_paginate_over_http() {
    // Arrange
    let (address, _db) = spawn_app(seeded_db()).await;
    let client = reqwest::Client::new();

    // Act
    let screen: Value = client
        .post(format!("{}/api/questions/reload", address))
        .send()
        .await
        .expect("Reload failed")
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(screen["totalItems"], 7);
    assert_eq!(screen["pageCount"], 2);
    assert_eq!(screen["items"].as_array().unwrap().len(), 5);
    assert_eq!(screen["items"][0]["question"], "Pergunta 1");
    assert_eq!(screen["items"][0]["chemicalElement"], "Hidrogênio");
    assert_eq!(screen["items"][0]["score"], 1.0);
    assert_eq!(screen["items"][0]["outcome"], "correct");
    assert_eq!(screen["totals"]["correct"], 3);
    assert_eq!(screen["totals"]["wrong"], 2);
    assert_eq!(screen["strategy"]["kind"], "positional");

    let page2: Value = client
        .post(format!("{}/api/questions/page/next", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page2["page"], 2);
    let ids: Vec<i64> = page2["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![6, 7]);
    assert!(page2["items"][0]["score"].is_null());

    let still2: Value = client
        .post(format!("{}/api/questions/page/next", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(still2["page"], 2);
}

#[tokio::test]
async fn student_filter_over_http() {
    let (address, _db) = spawn_app(seeded_db()).await;
    let client = reqwest::Client::new();

    let screen: Value = client
        .put(format!("{}/api/questions/filter", address))
        .json(&json!({"studentId": 2}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(screen["strategy"]["kind"], "by_student_id");
    assert_eq!(screen["items"][0]["answerId"], 2);
    assert_eq!(screen["items"][1]["answerId"], 4);
    assert!(screen["items"][2]["answerId"].is_null());
}

#[tokio::test]
async fn question_crud_flow() {
    let (address, db) = spawn_app(seeded_db()).await;
    let client = reqwest::Client::new();
    client
        .post(format!("{}/api/questions/reload", address))
        .send()
        .await
        .unwrap();

    // Create
    let created = client
        .post(format!("{}/api/questions", address))
        .json(&json!({"question": "Qual é o número atômico do Hélio?", "chemicalElement": "Hélio"}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status().as_u16(), 201);
    let screen: Value = created.json().await.unwrap();
    assert_eq!(screen["totalItems"], 8);
    assert_eq!(db.lock().unwrap().perguntas.len(), 8);

    // Update without selection
    let conflict = client
        .put(format!("{}/api/questions/selected", address))
        .json(&json!({"question": "x", "chemicalElement": "Neônio"}))
        .send()
        .await
        .unwrap();
    assert_eq!(conflict.status().as_u16(), 409);

    // Select, then update
    let draft: Value = client
        .post(format!("{}/api/questions/101/select", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(draft["chemicalElement"], "Hélio");

    let updated = client
        .put(format!("{}/api/questions/selected", address))
        .json(&json!({"question": "Número atômico do Neônio?", "chemicalElement": "Neônio"}))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status().as_u16(), 200);
    let screen: Value = updated.json().await.unwrap();
    assert!(screen["selectedId"].is_null());
    {
        let db = db.lock().unwrap();
        let stored = db.perguntas.iter().find(|p| p["id"] == 101).unwrap();
        assert_eq!(stored["chemicalElement"], "Neônio");
    }

    // Select, then delete
    client
        .post(format!("{}/api/questions/101/select", address))
        .send()
        .await
        .unwrap();
    let deleted = client
        .delete(format!("{}/api/questions/selected", address))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 200);
    assert_eq!(db.lock().unwrap().perguntas.len(), 7);
}

#[tokio::test]
async fn question_validation_rejects_long_text_and_unknown_element() {
    let (address, db) = spawn_app(seeded_db()).await;
    let client = reqwest::Client::new();

    let too_long = client
        .post(format!("{}/api/questions", address))
        .json(&json!({"question": "a".repeat(301), "chemicalElement": "Hélio"}))
        .send()
        .await
        .unwrap();
    assert_eq!(too_long.status().as_u16(), 400);

    let bad_element = client
        .post(format!("{}/api/questions", address))
        .json(&json!({"question": "ok", "chemicalElement": "Ferro"}))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_element.status().as_u16(), 422);

    assert_eq!(db.lock().unwrap().perguntas.len(), 7);
}

#[tokio::test]
async fn failed_upstream_is_bad_gateway_and_keeps_stale_view() {
    let (address, db) = spawn_app(seeded_db()).await;
    let client = reqwest::Client::new();
    client
        .post(format!("{}/api/questions/reload", address))
        .send()
        .await
        .unwrap();

    db.lock().unwrap().respostas_down = true;
    let response = client
        .post(format!("{}/api/questions/reload", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 502);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("answers"));

    let screen: Value = client
        .get(format!("{}/api/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(screen["totalItems"], 7);
    assert_eq!(screen["loading"], false);
}

#[tokio::test]
async fn delete_all_partial_failure_still_clears_screen() {
    let (address, db) = spawn_app(seeded_db()).await;
    let client = reqwest::Client::new();
    client
        .post(format!("{}/api/questions/reload", address))
        .send()
        .await
        .unwrap();

    db.lock().unwrap().respostas_down = true;
    let response = client
        .delete(format!("{}/api/questions", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 502);

    let screen: Value = client
        .get(format!("{}/api/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(screen["totalItems"], 0);

    let db = db.lock().unwrap();
    assert!(db.perguntas.is_empty());
    assert_eq!(db.respostas.len(), 5);
}

#[tokio::test]
async fn roster_sort_and_student_crud() {
    let (address, db) = spawn_app(seeded_db()).await;
    let client = reqwest::Client::new();

    let roster: Value = client
        .post(format!("{}/api/students/reload", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(roster["items"][0]["name"], "Ana");
    assert_eq!(roster["items"][0]["totalScore"], 2.0);
    assert_eq!(roster["items"][1]["totalScore"], 1.0);
    assert_eq!(roster["items"][1]["cohort"], 301);

    let sorted: Value = client
        .post(format!("{}/api/students/sort/totalScore", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(sorted["sort"]["direction"], "ascending");
    assert_eq!(sorted["items"][0]["name"], "Bruno");

    let toggled: Value = client
        .post(format!("{}/api/students/sort/totalScore", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(toggled["sort"]["direction"], "descending");
    assert_eq!(toggled["items"][0]["name"], "Ana");

    let created = client
        .post(format!("{}/api/students", address))
        .json(&json!({"nome": "Carla", "email": "carla@escola.br", "senha": "3", "turma": "2B"}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status().as_u16(), 201);
    assert_eq!(db.lock().unwrap().alunos.len(), 3);

    let draft: Value = client
        .post(format!("{}/api/students/101/select", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(draft["nome"], "Carla");

    let deleted = client
        .delete(format!("{}/api/students/selected", address))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 200);
    let screen: Value = deleted.json().await.unwrap();
    assert_eq!(screen["totalItems"], 2);
}

#[tokio::test]
async fn invalid_student_email_is_rejected() {
    let (address, db) = spawn_app(seeded_db()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/students", address))
        .json(&json!({"nome": "Duda", "email": "not-an-email", "senha": "4", "turma": "1C"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(db.lock().unwrap().alunos.len(), 2);
}

#[tokio::test]
async fn unknown_sort_column_is_bad_request() {
    // Router driven in-process, no listener needed.
    let db = Arc::new(Mutex::new(seeded_db()));
    let upstream = spawn_upstream(db).await;
    let fetcher = Arc::new(HttpFetcher::new(&config_for(&upstream)).unwrap());
    let app = routes::create_router(AppState::new(fetcher));

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/students/sort/shoeSize")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Unknown sort column 'shoeSize'");
}

#[tokio::test]
async fn one_malformed_record_does_not_reject_the_list() {
    // Arrange
    let mut db = seeded_db();
    db.perguntas
        .push(json!({"id": "8", "question": null, "chemicalElement": 42}));
    db.respostas.push(json!({"id": 6, "score": 1}));
    db.respostas.push(json!({"id": 7, "alunoId": "2", "score": 1}));
    db.alunos
        .push(json!({"id": 3, "nome": null, "email": "sem@escola.br", "turma": null}));
    let (address, _db) = spawn_app(db).await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(format!("{}/api/questions/reload", address))
        .send()
        .await
        .expect("Reload failed");

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let screen: Value = response.json().await.unwrap();
    assert_eq!(screen["totalItems"], 8);
    assert_eq!(screen["totals"]["points"], 5.0);
    assert_eq!(screen["totals"]["correct"], 5);
    assert_eq!(screen["totals"]["wrong"], 2);

    let page2: Value = client
        .post(format!("{}/api/questions/page/next", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = page2["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["answerId"], 6);
    assert_eq!(items[1]["answerId"], 7);
    assert_eq!(items[2]["id"], 8);
    assert_eq!(items[2]["question"], "");
    assert!(items[2]["answerId"].is_null());

    let roster: Value = client
        .post(format!("{}/api/students/reload", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(roster["totalItems"], 3);
    let totals: Vec<f64> = roster["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["totalScore"].as_f64().unwrap())
        .collect();
    // The answer with no alunoId counts in the whole set but for nobody here.
    assert_eq!(totals, vec![2.0, 2.0, 0.0]);
    assert_eq!(roster["items"][2]["name"], "");
}

#[tokio::test]
async fn http_fetcher_gets_a_single_question() {
    // Arrange
    let db = Arc::new(Mutex::new(seeded_db()));
    let upstream = spawn_upstream(db).await;
    let fetcher = HttpFetcher::new(&config_for(&upstream)).unwrap();

    // Act
    let found = fetcher.get_question(3).await;
    let missing = fetcher.get_question(999).await;

    // Assert
    let question = found.expect("question 3 is seeded");
    assert_eq!(question.id, 3);
    assert_eq!(question.question, "Pergunta 3");
    assert_eq!(question.chemical_element, "Hidrogênio");
    assert_eq!(
        missing.unwrap_err(),
        FetchError::Status {
            resource: Resource::Questions,
            status: 404,
        }
    );
}
