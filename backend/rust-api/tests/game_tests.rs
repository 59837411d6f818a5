mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use commons_api::models::game::SubmitScoreRequest;
use commons_api::services::score_service::{ScoreService, MAX_STORED_SCORES};

fn submit_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/game/submit")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn equal_scores_rank_by_submission_order() {
    let (app, _state) = common::create_test_app().await;

    for (name, score) in [("A", 100.0), ("B", 150.0), ("C", 100.0)] {
        let response = app
            .clone()
            .oneshot(submit_request(json!({ "name": name, "score": score })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["ok"], true);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/game/leaderboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let entries: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let names: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["B", "A", "C"]);
}

#[tokio::test]
async fn missing_score_is_rejected_without_mutation() {
    let (app, state) = common::create_test_app().await;

    let response = app
        .oneshot(submit_request(json!({ "name": "A" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "score required");

    assert!(state.db.read().await.unwrap().game_scores.is_empty());
}

#[tokio::test]
async fn leaderboard_filters_by_game_tag() {
    let (app, _state) = common::create_test_app().await;

    for (name, game) in [
        (json!("A"), Some("puzzle")),
        (json!("B"), None),
        (json!("C"), Some("puzzle")),
    ] {
        let mut body = json!({ "name": name, "score": 10 });
        if let Some(game) = game {
            body["game"] = json!(game);
        }
        app.clone().oneshot(submit_request(body)).await.unwrap();
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/game/leaderboard?game=puzzle")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let entries: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 2);

    // entries submitted without a tag default to "number"
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/game/leaderboard?game=number")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let entries: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let names: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["B"]);
}

#[tokio::test]
async fn leaderboard_returns_at_most_twenty_entries() {
    let (app, state) = common::create_test_app().await;

    let service = ScoreService::new(state.db.clone(), state.events.clone());
    for i in 0..30 {
        service
            .submit(SubmitScoreRequest {
                name: Some(format!("p{}", i)),
                score: Some(i as f64),
                game: None,
            })
            .await
            .unwrap();
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/game/leaderboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let entries: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 20);
    // highest score first
    assert_eq!(entries[0]["score"], 29.0);
}

#[tokio::test]
async fn stored_ledger_never_exceeds_the_cap() {
    let (_app, state) = common::create_test_app().await;

    let service = ScoreService::new(state.db.clone(), state.events.clone());
    for i in 0..(MAX_STORED_SCORES + 5) {
        service
            .submit(SubmitScoreRequest {
                name: None,
                score: Some(i as f64),
                game: None,
            })
            .await
            .unwrap();
    }

    let scores = state.db.read().await.unwrap().game_scores;
    assert_eq!(scores.len(), MAX_STORED_SCORES);

    // lowest-ranked entries dropped off; collection stays sorted
    assert_eq!(scores[0].score, (MAX_STORED_SCORES + 4) as f64);
    assert!(scores
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
    assert_eq!(scores.last().unwrap().score, 5.0);
}

#[tokio::test]
async fn score_submission_broadcasts_leaderboard_update() {
    let (app, state) = common::create_test_app().await;

    let mut rx = state.events.subscribe();

    app.oneshot(submit_request(json!({ "score": 42 })))
        .await
        .unwrap();

    let event = tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
        .await
        .expect("no event within timeout")
        .unwrap();
    assert_eq!(event.event_name(), "leaderboard:update");
}
