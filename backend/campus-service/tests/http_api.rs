use actix_web::{http::StatusCode, test, web, App};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use campus_service::{
    config::Config, middleware::guards::USER_ID_HEADER, models::NewUser, routes,
    state::AppState,
};

fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(Config::default()))
}

async fn seed_user(state: &AppState, name: &str) -> Uuid {
    state
        .directory
        .register(NewUser {
            display_name: name.to_string(),
            email: format!("{}@mylaurier.ca", name.to_lowercase()),
            major: "Biology".to_string(),
        })
        .await
        .expect("seed user")
        .id
}

fn as_user(req: test::TestRequest, user_id: Uuid) -> test::TestRequest {
    req.insert_header((USER_ID_HEADER, user_id.to_string()))
}

#[actix_web::test]
async fn health_is_public() {
    let app = test::init_service(App::new().app_data(state()).configure(routes::configure)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn register_validates_institutional_email() {
    let app = test::init_service(App::new().app_data(state()).configure(routes::configure)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users")
            .set_json(json!({
                "display_name": "Ada",
                "email": "ada@gmail.com",
                "major": "Math"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_INPUT");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users")
            .set_json(json!({
                "display_name": "Ada",
                "email": "Ada@MyLaurier.ca",
                "major": "Math"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "ada@mylaurier.ca");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users")
            .set_json(json!({
                "display_name": "Ada again",
                "email": "ada@mylaurier.ca",
                "major": "Math"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn malformed_body_returns_json_error() {
    let app = test::init_service(App::new().app_data(state()).configure(routes::configure)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "display_name": "Ada" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[actix_web::test]
async fn acting_user_header_is_required() {
    let state = state();
    let app = test::init_service(App::new().app_data(state.clone()).configure(routes::configure))
        .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/feed").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::get().uri("/feed"), Uuid::new_v4()).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/feed")
            .insert_header((USER_ID_HEADER, "not-a-uuid"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let ada = seed_user(&state, "Ada").await;
    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::get().uri("/feed"), ada).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn search_and_profile() {
    let state = state();
    let app = test::init_service(App::new().app_data(state.clone()).configure(routes::configure))
        .await;
    let ada = seed_user(&state, "Ada").await;
    let alan = seed_user(&state, "Alan").await;
    seed_user(&state, "Grace").await;

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::get().uri("/users?field=name&q=AL"), ada).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["users"][0]["id"], alan.to_string());

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::get().uri("/users"), ada).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 3);

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::patch().uri("/users/me"), ada)
            .set_json(json!({ "major": "Statistics" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["major"], "Statistics");

    let resp = test::call_service(
        &app,
        as_user(
            test::TestRequest::get().uri(&format!("/users/{}", Uuid::new_v4())),
            ada,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn connection_gates_direct_messages() {
    let state = state();
    let app = test::init_service(App::new().app_data(state.clone()).configure(routes::configure))
        .await;
    let a = seed_user(&state, "Ava").await;
    let b = seed_user(&state, "Ben").await;
    let c = seed_user(&state, "Cal").await;

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::put().uri(&format!("/connections/{b}")), a).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // visible from the other side
    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::get().uri(&format!("/connections/{a}")), b).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["connected"], true);

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::post().uri("/chats/direct"), a)
            .set_json(json!({ "with_user": c, "message": "hello?" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "NOT_CONNECTED");

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::post().uri("/chats/direct"), a)
            .set_json(json!({ "with_user": b, "message": "hi" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let first: Value = test::read_body_json(resp).await;
    assert_eq!(first["messages"].as_array().map(Vec::len), Some(1));

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::post().uri("/chats/direct"), a)
            .set_json(json!({ "with_user": b, "message": "there" }))
            .to_request(),
    )
    .await;
    let second: Value = test::read_body_json(resp).await;
    assert_eq!(second["id"], first["id"]);

    let chat_id = second["id"].as_str().expect("chat id").to_string();
    let resp = test::call_service(
        &app,
        as_user(
            test::TestRequest::get().uri(&format!("/chats/{chat_id}/messages")),
            b,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let contents: Vec<&str> = body["messages"]
        .as_array()
        .expect("messages")
        .iter()
        .filter_map(|m| m["content"].as_str())
        .collect();
    assert_eq!(contents, vec!["hi", "there"]);

    let resp = test::call_service(
        &app,
        as_user(
            test::TestRequest::get().uri(&format!("/chats/{chat_id}/messages")),
            c,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn send_rejects_blank_messages() {
    let state = state();
    let app = test::init_service(App::new().app_data(state.clone()).configure(routes::configure))
        .await;
    let a = seed_user(&state, "Ava").await;
    let b = seed_user(&state, "Ben").await;
    state.messaging.connect(a, b).await.expect("connect");
    let chat = state.messaging.open_chat(a, b).await.expect("open chat");

    let resp = test::call_service(
        &app,
        as_user(
            test::TestRequest::post().uri(&format!("/chats/{}/messages", chat.id)),
            b,
        )
        .set_json(json!({ "content": "  \n " }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "EMPTY_CONTENT");

    let resp = test::call_service(
        &app,
        as_user(
            test::TestRequest::post().uri(&format!("/chats/{}/messages", Uuid::new_v4())),
            b,
        )
        .set_json(json!({ "content": "hello" }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn group_chat_lifecycle() {
    let state = state();
    let app = test::init_service(App::new().app_data(state.clone()).configure(routes::configure))
        .await;
    let a = seed_user(&state, "Ava").await;
    let b = seed_user(&state, "Ben").await;
    let c = seed_user(&state, "Cal").await;
    state.messaging.connect(a, b).await.expect("connect");
    state.messaging.connect(a, c).await.expect("connect");

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::post().uri("/chats/groups"), a)
            .set_json(json!({ "name": " ", "member_ids": [b, c] }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_GROUP");

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::post().uri("/chats/groups"), a)
            .set_json(json!({ "name": "Lab partners", "member_ids": [b, c] }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let group: Value = test::read_body_json(resp).await;
    assert_eq!(group["is_group"], true);
    assert_eq!(group["participants"].as_array().map(Vec::len), Some(3));

    let group_id = group["id"].as_str().expect("group id").to_string();
    let resp = test::call_service(
        &app,
        as_user(
            test::TestRequest::post().uri(&format!("/chats/{group_id}/messages")),
            c,
        )
        .set_json(json!({ "content": "see you at 3" }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let message: Value = test::read_body_json(resp).await;
    assert_eq!(message["is_group_message"], true);
    assert_eq!(message["group_id"], group["id"]);

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::get().uri("/chats"), b).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["chats"][0]["message_count"], 1);
}

#[actix_web::test]
async fn feed_posts_and_comments() {
    let state = state();
    let app = test::init_service(App::new().app_data(state.clone()).configure(routes::configure))
        .await;
    let a = seed_user(&state, "Ava").await;
    let b = seed_user(&state, "Ben").await;

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::post().uri("/posts"), a)
            .set_json(json!({ "content": "first post" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: Value = test::read_body_json(resp).await;

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::post().uri("/posts"), b)
            .set_json(json!({ "content": "second post" }))
            .to_request(),
    )
    .await;
    let second: Value = test::read_body_json(resp).await;

    let first_id = first["id"].as_str().expect("post id").to_string();
    for text in ["nice", "agreed"] {
        let resp = test::call_service(
            &app,
            as_user(
                test::TestRequest::post().uri(&format!("/posts/{first_id}/comments")),
                b,
            )
            .set_json(json!({ "content": text }))
            .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::get().uri("/feed"), a).to_request(),
    )
    .await;
    let feed: Value = test::read_body_json(resp).await;
    assert_eq!(feed["posts"][0]["id"], second["id"]);
    assert_eq!(feed["posts"][1]["id"], first["id"]);
    assert_eq!(feed["posts"][1]["comments"][0]["content"], "nice");
    assert_eq!(feed["posts"][1]["comments"][1]["content"], "agreed");

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::get().uri(&format!("/feed?author={a}")), b).to_request(),
    )
    .await;
    let mine: Value = test::read_body_json(resp).await;
    assert_eq!(mine["total"], 1);

    let resp = test::call_service(
        &app,
        as_user(
            test::TestRequest::post().uri(&format!("/posts/{}/comments", Uuid::new_v4())),
            b,
        )
        .set_json(json!({ "content": "lost" }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn events_and_attendance() {
    let state = state();
    let app = test::init_service(App::new().app_data(state.clone()).configure(routes::configure))
        .await;
    let a = seed_user(&state, "Ava").await;
    let b = seed_user(&state, "Ben").await;
    let start = Utc::now() + Duration::days(1);

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::post().uri("/events"), a)
            .set_json(json!({
                "title": "Trivia night",
                "start_time": start,
                "end_time": start,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_RANGE");

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::post().uri("/events"), a)
            .set_json(json!({
                "title": "Trivia night",
                "location": "Turret",
                "start_time": start,
                "end_time": start + Duration::seconds(1),
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let event: Value = test::read_body_json(resp).await;
    assert_eq!(event["creator_id"], a.to_string());
    assert_eq!(event["attendees"], json!([a]));

    let event_id = event["id"].as_str().expect("event id").to_string();
    let uri = format!("/events/{event_id}/attendance");
    for _ in 0..2 {
        let resp = test::call_service(
            &app,
            as_user(test::TestRequest::put().uri(&uri), b).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::get().uri("/events?upcoming=true"), b).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["events"][0]["attendees"], json!([a, b]));

    let resp = test::call_service(
        &app,
        as_user(test::TestRequest::delete().uri(&uri), b).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["attendees"], json!([a]));
}
