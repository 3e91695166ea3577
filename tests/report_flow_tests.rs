// tests/report_flow_tests.rs

use mansematch::{config::Config, quizzes::QuizCatalog, routes, state::AppState};
use sqlx::sqlite::SqlitePoolOptions;
use std::collections::HashMap;
use std::sync::Arc;

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // Each test gets its own throwaway SQLite database file.
    let database_url = format!(
        "sqlite:{}/mansematch_test_{}.db?mode=rwc",
        std::env::temp_dir().display(),
        uuid::Uuid::new_v4().simple()
    );

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to open test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: database_url.clone(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        quiz_dir: "data".to_string(),
        demo_username: None,
        demo_password: None,
    };

    let quizzes = QuizCatalog::load_from_dir(&config.quiz_dir);

    let state = AppState {
        pool,
        config,
        quizzes: Arc::new(quizzes),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Registers a fresh user and returns their bearer token.
async fn register_and_login(client: &reqwest::Client, address: &str) -> String {
    let username = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let credentials = serde_json::json!({
        "username": username,
        "password": "password123"
    });

    client
        .post(&format!("{}/api/auth/register", address))
        .json(&credentials)
        .send()
        .await
        .expect("Register failed");

    let login_resp = client
        .post(&format!("{}/api/auth/login", address))
        .json(&credentials)
        .send()
        .await
        .expect("Login failed")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login json");

    login_resp["token"]
        .as_str()
        .expect("Token not found")
        .to_string()
}

/// Submits answers for a quiz and returns the new report id.
async fn submit_quiz(
    client: &reqwest::Client,
    address: &str,
    token: &str,
    quiz_id: &str,
    answers: &HashMap<String, serde_json::Value>,
) -> String {
    let response = client
        .post(&format!("{}/api/quizzes/{}/submit", address, quiz_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "answers": serde_json::to_string(answers).unwrap()
        }))
        .send()
        .await
        .expect("Submit failed");

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    body["report_id"].as_str().expect("report_id missing").to_string()
}

async fn fetch_report(
    client: &reqwest::Client,
    address: &str,
    token: &str,
    report_id: &str,
) -> serde_json::Value {
    let response = client
        .get(&format!("{}/api/reports/{}", address, report_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Fetch report failed");

    assert_eq!(response.status().as_u16(), 200);
    response.json().await.unwrap()
}

#[tokio::test]
async fn bfi10_submit_and_report_flow() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &address).await;

    // Every item answered 5. Each trait has one plain and one reversed
    // item, so every trait averages (5 + 1) / 2 = 3.0.
    let answers: HashMap<String, serde_json::Value> = (1..=10)
        .map(|id| (id.to_string(), serde_json::json!(5)))
        .collect();

    // Act
    let report_id = submit_quiz(&client, &address, &token, "bfi-10", &answers).await;
    let view = fetch_report(&client, &address, &token, &report_id).await;

    // Assert
    assert!(report_id.starts_with("rep_"));
    let report = &view["report"];
    assert_eq!(report["report_type"], "bfi-10");
    assert_eq!(report["quiz_id"], "bfi-10");
    for name in [
        "Extraversion",
        "Agreeableness",
        "Conscientiousness",
        "Neuroticism",
        "Openness",
    ] {
        assert_eq!(report["score"][name], serde_json::json!(3.0), "trait {}", name);
    }

    assert_eq!(view["chart"]["values"], serde_json::json!([3.0, 3.0, 3.0, 3.0, 3.0]));
    let rows = view["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r["level"] == "Average"));
}

#[tokio::test]
async fn bfi10_partial_submission_leaves_traits_unscored() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &address).await;

    // Only the two Extraversion items: QID 1 is reverse-keyed ("2" -> 4),
    // QID 6 is plain (4). Average 4.0; everything else stays unscored.
    let mut answers = HashMap::new();
    answers.insert("1".to_string(), serde_json::json!("2"));
    answers.insert("6".to_string(), serde_json::json!(4));

    // Act
    let report_id = submit_quiz(&client, &address, &token, "bfi-10", &answers).await;
    let view = fetch_report(&client, &address, &token, &report_id).await;

    // Assert
    let score = &view["report"]["score"];
    assert_eq!(score["Extraversion"], serde_json::json!(4.0));
    assert_eq!(score["Neuroticism"], serde_json::Value::Null);

    // Unscored traits render "N/A" in rows but 0.0 in the radar series.
    assert_eq!(view["chart"]["values"], serde_json::json!([4.0, 0.0, 0.0, 0.0, 0.0]));
    let rows = view["rows"].as_array().unwrap();
    assert_eq!(rows[0]["level"], "High");
    assert_eq!(rows[3]["score"], "N/A");
    assert_eq!(rows[3]["level"], "N/A");
}

#[tokio::test]
async fn mas12_submit_and_report_flow() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &address).await;

    let answers: HashMap<String, serde_json::Value> = (1..=12)
        .map(|id| (id.to_string(), serde_json::json!(4)))
        .collect();

    // Act
    let report_id = submit_quiz(&client, &address, &token, "mas-12", &answers).await;
    let view = fetch_report(&client, &address, &token, &report_id).await;

    // Assert
    let report = &view["report"];
    assert_eq!(report["report_type"], "mas-12");
    for name in ["Power-Prestige", "Retention-Time", "Distrust", "Anxiety"] {
        assert_eq!(report["score"][name], serde_json::json!(4.0), "subscale {}", name);
    }

    // Four equal subscales split the pie evenly.
    let values = view["chart"]["values"].as_array().unwrap();
    assert_eq!(values.len(), 4);
    let sum: f64 = values.iter().map(|v| v.as_f64().unwrap()).sum();
    assert!((sum - 100.0).abs() < 1e-9);
    assert!(values.iter().all(|v| (v.as_f64().unwrap() - 25.0).abs() < 1e-9));

    let rows = view["rows"].as_array().unwrap();
    assert!(rows.iter().all(|r| r["level"] == "High"));
}

#[tokio::test]
async fn standard_quiz_scores_percent_correct() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &address).await;

    // 3 of 5 correct; QID 2 answers with the string "3" against the
    // numeric key 3, which must still count as a match.
    let mut answers = HashMap::new();
    answers.insert("1".to_string(), serde_json::json!("Annual Percentage Rate"));
    answers.insert("2".to_string(), serde_json::json!("3"));
    answers.insert("3".to_string(), serde_json::json!("The principal and accumulated interest"));
    answers.insert("4".to_string(), serde_json::json!("A deficit budget"));
    answers.insert("5".to_string(), serde_json::json!(90));

    // Act
    let report_id = submit_quiz(&client, &address, &token, "money-basics", &answers).await;
    let view = fetch_report(&client, &address, &token, &report_id).await;

    // Assert
    let report = &view["report"];
    assert_eq!(report["report_type"], "standard");
    assert_eq!(report["score"], "60%");
    // Generic reports carry no interpretation payload.
    assert!(view.get("rows").is_none());
    assert!(view.get("chart").is_none());
}

#[tokio::test]
async fn malformed_answers_rejected_before_scoring() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &address).await;

    // Act
    let response = client
        .post(&format!("{}/api/quizzes/bfi-10/submit", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "answers": "{ this is not json" }))
        .send()
        .await
        .expect("Submit failed");

    // Assert
    assert_eq!(response.status().as_u16(), 400);

    // No partial report may exist after a rejected submission.
    let reports: Vec<serde_json::Value> = client
        .get(&format!("{}/api/reports", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("List reports failed")
        .json()
        .await
        .unwrap();
    assert!(reports.is_empty());
}

#[tokio::test]
async fn submit_to_unknown_quiz_is_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &address).await;

    // Act
    let response = client
        .post(&format!("{}/api/quizzes/no-such-quiz/submit", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "answers": "{}" }))
        .send()
        .await
        .expect("Submit failed");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn reports_are_isolated_per_user() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let owner_token = register_and_login(&client, &address).await;
    let other_token = register_and_login(&client, &address).await;

    let answers: HashMap<String, serde_json::Value> = (1..=10)
        .map(|id| (id.to_string(), serde_json::json!(3)))
        .collect();
    let report_id = submit_quiz(&client, &address, &owner_token, "bfi-10", &answers).await;

    // Act: the other user tries to read the owner's report
    let response = client
        .get(&format!("{}/api/reports/{}", address, report_id))
        .header("Authorization", format!("Bearer {}", other_token))
        .send()
        .await
        .expect("Fetch failed");

    // Assert
    assert_eq!(response.status().as_u16(), 404);

    // The owner still sees it in their listing.
    let reports: Vec<serde_json::Value> = client
        .get(&format!("{}/api/reports", address))
        .header("Authorization", format!("Bearer {}", owner_token))
        .send()
        .await
        .expect("List reports failed")
        .json()
        .await
        .unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["id"], serde_json::json!(report_id));
}
