//! Blog posts API resource, exercised end to end over HTTP.

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};
use uuid::Uuid;

use common::{SEED_COUNT, seeded_store};
use quill_core::ports::{BaseRepository, PostRepository};
use quill_infra::fixtures::PostGenerator;

// GET

#[actix_rt::test]
async fn test_list_returns_every_post() {
    let repo = seeded_store(1).await;
    let app = init_app!(repo.clone());

    let res = test::call_service(&app, test::TestRequest::get().uri("/posts").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    let posts = body.as_array().expect("body should be an array");

    assert!(!posts.is_empty());
    assert_eq!(posts.len() as u64, repo.count().await.unwrap());
    assert_eq!(posts.len(), SEED_COUNT);
}

#[actix_rt::test]
async fn test_list_returns_posts_with_right_fields() {
    let repo = seeded_store(2).await;
    let app = init_app!(repo.clone());

    let res = test::call_service(&app, test::TestRequest::get().uri("/posts").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "application/json"
    );

    let body: Value = test::read_body_json(res).await;
    let posts = body.as_array().unwrap();

    for post in posts {
        let obj = post.as_object().expect("each post should be an object");
        for key in ["id", "author", "title", "content", "created"] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj.len(), 5);
    }

    let first = &posts[0];
    let id = Uuid::parse_str(first["id"].as_str().unwrap()).unwrap();
    let stored = repo.find_by_id(id).await.unwrap().expect("post should exist");

    assert_eq!(first["id"], stored.id.to_string());
    assert_eq!(
        first["author"],
        format!("{} {}", stored.author.first_name, stored.author.last_name)
    );
    assert_eq!(first["title"], stored.title);
    assert_eq!(first["content"], stored.content);
}

#[actix_rt::test]
async fn test_list_is_ordered_oldest_first() {
    let repo = seeded_store(3).await;
    let app = init_app!(repo.clone());

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/posts").to_request(),
    )
    .await;

    let created: Vec<chrono::DateTime<chrono::Utc>> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["created"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(created.windows(2).all(|w| w[0] <= w[1]));
}

#[actix_rt::test]
async fn test_get_single_post() {
    let repo = seeded_store(4).await;
    let app = init_app!(repo.clone());
    let stored = repo.find_one().await.unwrap().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", stored.id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["title"], stored.title);
    assert_eq!(body["author"], stored.author.display_name());
}

#[actix_rt::test]
async fn test_get_unknown_post_is_not_found() {
    let repo = seeded_store(5).await;
    let app = init_app!(repo.clone());

    let path = format!("/posts/{}", Uuid::new_v4());
    let req = test::TestRequest::get()
        .uri(&path)
        .insert_header(("x-request-id", "lookup-7"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.headers().get("x-request-id").unwrap(), "lookup-7");

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["title"], "Not Found");
    assert_eq!(body["instance"], path);
    assert_eq!(body["request_id"], "lookup-7");
}

#[actix_rt::test]
async fn test_get_malformed_id_is_bad_request() {
    let repo = seeded_store(6).await;
    let app = init_app!(repo.clone());

    let req = test::TestRequest::get().uri("/posts/not-an-id").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// POST

#[actix_rt::test]
async fn test_create_adds_a_new_post() {
    let repo = seeded_store(7).await;
    let app = init_app!(repo.clone());

    let mut generator = PostGenerator::seeded(700);
    let new_post = generator.post();
    let payload = json!({
        "author": {
            "firstName": new_post.author.first_name,
            "lastName": new_post.author.last_name,
        },
        "title": new_post.title,
        "content": new_post.content,
    });

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(&payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(res).await;
    for key in ["id", "author", "title", "content", "created"] {
        assert!(body.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(
        body["author"],
        format!("{} {}", new_post.author.first_name, new_post.author.last_name)
    );
    assert_eq!(body["title"], new_post.title);
    assert_eq!(body["content"], new_post.content);

    let id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
    let stored = repo.find_by_id(id).await.unwrap().expect("post should be stored");
    assert_eq!(stored.author.first_name, new_post.author.first_name);
    assert_eq!(stored.author.last_name, new_post.author.last_name);
    assert_eq!(stored.title, new_post.title);
    assert_eq!(stored.content, new_post.content);
    assert_eq!(repo.count().await.unwrap(), SEED_COUNT as u64 + 1);
}

#[actix_rt::test]
async fn test_create_then_list_includes_post() {
    let repo = seeded_store(8).await;
    let app = init_app!(repo.clone());

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({
            "author": {"firstName": "Jane", "lastName": "Doe"},
            "title": "Hello World",
            "content": "First post",
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["author"], "Jane Doe");
    assert!(created["created"].is_string());

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/posts").to_request(),
    )
    .await;
    assert!(
        listed
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p["id"] == created["id"])
    );
}

#[actix_rt::test]
async fn test_create_missing_field_is_bad_request() {
    let repo = seeded_store(9).await;
    let app = init_app!(repo.clone());

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({
            "author": {"firstName": "Jane", "lastName": "Doe"},
            "content": "no title here",
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert!(body["detail"].as_str().unwrap().contains("title"));
    assert_eq!(repo.count().await.unwrap(), SEED_COUNT as u64);
}

#[actix_rt::test]
async fn test_create_missing_author_half_is_bad_request() {
    let repo = seeded_store(10).await;
    let app = init_app!(repo.clone());

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({
            "author": {"firstName": "Jane"},
            "title": "t",
            "content": "c",
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert!(body["detail"].as_str().unwrap().contains("author.lastName"));
}

#[actix_rt::test]
async fn test_create_malformed_json_is_bad_request() {
    let repo = seeded_store(11).await;
    let app = init_app!(repo.clone());

    let req = test::TestRequest::post()
        .uri("/posts")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"title\": ")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 400);
}

// PUT

#[actix_rt::test]
async fn test_update_changes_fields_sent_over() {
    let repo = seeded_store(12).await;
    let app = init_app!(repo.clone());
    let before = repo.find_one().await.unwrap().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", before.id))
        .set_json(json!({
            "id": before.id.to_string(),
            "title": "bubba lubba dub dub",
            "content": "it means great suffering",
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let after = repo.find_by_id(before.id).await.unwrap().unwrap();
    assert_eq!(after.title, "bubba lubba dub dub");
    assert_eq!(after.content, "it means great suffering");
    assert_eq!(after.author, before.author);
    assert_eq!(after.created, before.created);
}

#[actix_rt::test]
async fn test_update_only_title_keeps_content() {
    let repo = seeded_store(13).await;
    let app = init_app!(repo.clone());
    let before = repo.find_one().await.unwrap().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", before.id))
        .set_json(json!({"id": before.id, "title": "retitled"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let after = repo.find_by_id(before.id).await.unwrap().unwrap();
    assert_eq!(after.title, "retitled");
    assert_eq!(after.content, before.content);
}

#[actix_rt::test]
async fn test_update_with_mismatched_ids_is_bad_request() {
    let repo = seeded_store(14).await;
    let app = init_app!(repo.clone());
    let before = repo.find_one().await.unwrap().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", before.id))
        .set_json(json!({"id": Uuid::new_v4(), "title": "hijacked"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let after = repo.find_by_id(before.id).await.unwrap().unwrap();
    assert_eq!(after.title, before.title);
}

#[actix_rt::test]
async fn test_update_unknown_post_is_not_found() {
    let repo = seeded_store(15).await;
    let app = init_app!(repo.clone());
    let id = Uuid::new_v4();

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{id}"))
        .set_json(json!({"id": id, "title": "ghost"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

// DELETE

#[actix_rt::test]
async fn test_delete_removes_post() {
    let repo = seeded_store(16).await;
    let app = init_app!(repo.clone());
    let post = repo.find_one().await.unwrap().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{}", post.id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let body = test::read_body(res).await;
    assert!(body.is_empty());
    assert!(repo.find_by_id(post.id).await.unwrap().is_none());
    assert_eq!(repo.count().await.unwrap(), SEED_COUNT as u64 - 1);
}

#[actix_rt::test]
async fn test_delete_twice_is_not_found() {
    let repo = seeded_store(17).await;
    let app = init_app!(repo.clone());
    let post = repo.find_one().await.unwrap().unwrap();
    let uri = format!("/posts/{}", post.id);

    let first = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

// Ambient

#[actix_rt::test]
async fn test_health_reports_ok() {
    let repo = seeded_store(18).await;
    let app = init_app!(repo.clone());

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "ok");
}
