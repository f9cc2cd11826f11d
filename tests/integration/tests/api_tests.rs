//! API Integration Tests
//!
//! Each test boots its own in-memory server on an ephemeral port.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::Duration;
use futures::future::join_all;
use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, test_config, TestServer,
};
use reqwest::StatusCode;

async fn create_post(server: &TestServer, body: &CreatePost) -> PostBody {
    let response = server.post("/api/v1/posts", body).await.expect("Request failed");
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn react(server: &TestServer, post_id: &str, actor: &str, kind: &str) -> ReactionChangeBody {
    let response = server
        .post(&format!("/api/v1/posts/{post_id}/reactions"), &React::new(actor, kind))
        .await
        .expect("Request failed");
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn comment(server: &TestServer, post_id: &str, body: &NewComment) -> CommentBody {
    let response = server
        .post(&format!("/api/v1/posts/{post_id}/comments"), body)
        .await
        .expect("Request failed");
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn feed(server: &TestServer, query: &str) -> FeedBody {
    let response = server.get(&format!("/api/v1/feed{query}")).await.expect("Request failed");
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");

    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");

    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    assert!(request_id.is_some_and(|id| !id.is_empty()));
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_post() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreatePost::new();
    let created = create_post(&server, &request).await;

    assert_eq!(created.author_id, request.author_id);
    assert_eq!(created.signals.reaction_total, 0);

    let response = server
        .get(&format!("/api/v1/posts/{}", created.id))
        .await
        .expect("Request failed");
    let fetched: PostBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, created.id);
}

#[tokio::test]
async fn test_create_post_with_upstream_id_conflicts_once() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreatePost {
        id: Some(unique_id()),
        ..CreatePost::new()
    };

    let created = create_post(&server, &request).await;
    assert_eq!(Some(created.id), request.id);

    let response = server.post("/api/v1/posts", &request).await.expect("Request failed");
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "POST_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_create_post_rejects_bad_author() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreatePost {
        author_id: "not-a-number".to_string(),
        ..CreatePost::new()
    };

    let response = server.post("/api/v1/posts", &request).await.expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_get_unknown_post() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/posts/424242").await.expect("Request failed");

    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_POST");
}

#[tokio::test]
async fn test_invalid_post_id_path() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/posts/abc").await.expect("Request failed");

    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_delete_post_removes_engagement() {
    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::new()).await;
    react(&server, &post.id, "7", "GEM").await;

    let path = format!("/api/v1/posts/{}", post.id);
    let response = server.delete(&path).await.expect("Request failed");
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.expect("Request failed");
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete(&path).await.expect("Request failed");
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    assert!(feed(&server, "").await.items.is_empty());
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_toggle_and_switch() {
    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::new()).await;

    let first = react(&server, &post.id, "11", "BULL").await;
    assert_eq!(first.previous, None);
    assert_eq!(first.current.as_deref(), Some("BULL"));
    assert_eq!(first.sentiment, 2);

    let switched = react(&server, &post.id, "11", "bear").await;
    assert_eq!(switched.previous.as_deref(), Some("BULL"));
    assert_eq!(switched.current.as_deref(), Some("BEAR"));
    assert_eq!(switched.tally.get("BULL").copied().unwrap_or(0), 0);
    assert_eq!(switched.tally.get("BEAR").copied().unwrap_or(0), 1);
    assert_eq!(switched.sentiment, -2);

    let toggled = react(&server, &post.id, "11", "BEAR").await;
    assert_eq!(toggled.previous.as_deref(), Some("BEAR"));
    assert_eq!(toggled.current, None);
    assert_eq!(toggled.sentiment, 0);

    let response = server
        .get(&format!("/api/v1/posts/{}/reactions?actorId=11", post.id))
        .await
        .expect("Request failed");
    let summary: ReactionSummaryBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.me, None);
}

#[tokio::test]
async fn test_reaction_summary_reports_own_reaction() {
    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::new()).await;
    react(&server, &post.id, "1", "SMART").await;
    react(&server, &post.id, "2", "RUG").await;

    let response = server
        .get(&format!("/api/v1/posts/{}/reactions?actorId=2", post.id))
        .await
        .expect("Request failed");
    let summary: ReactionSummaryBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(summary.total, 2);
    assert_eq!(summary.sentiment, 2);
    assert_eq!(summary.me.as_deref(), Some("RUG"));
}

#[tokio::test]
async fn test_invalid_reaction_kind() {
    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::new()).await;

    let response = server
        .post(&format!("/api/v1/posts/{}/reactions", post.id), &React::new("1", "MOON"))
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_REACTION_KIND");
}

#[tokio::test]
async fn test_react_to_unknown_post() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/posts/999/reactions", &React::new("1", "FIRE"))
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_POST");
}

#[tokio::test]
async fn test_concurrent_reactions_from_distinct_actors() {
    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::new()).await;
    let path = format!("/api/v1/posts/{}/reactions", post.id);

    let bodies: Vec<React> = (1..=40).map(|actor| React::new(&actor.to_string(), "FIRE")).collect();
    let responses = join_all(bodies.iter().map(|body| server.post(&path, body))).await;
    for response in responses {
        assert_status(response.expect("Request failed"), StatusCode::OK).await.unwrap();
    }

    let response = server
        .get(&format!("/api/v1/posts/{}", post.id))
        .await
        .expect("Request failed");
    let fetched: PostBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.signals.reaction_total, 40);
    assert_eq!(fetched.signals.sentiment, 80);
    assert_eq!(fetched.reactions.get("FIRE").copied(), Some(40));
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_reply_and_thread() {
    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::new()).await;

    let root = comment(&server, &post.id, &NewComment::top("root")).await;
    let reply = comment(&server, &post.id, &NewComment::reply(&root.id, "reply")).await;
    let nested = comment(&server, &post.id, &NewComment::reply(&reply.id, "nested")).await;
    let sibling = comment(&server, &post.id, &NewComment::top("sibling")).await;
    assert_eq!(reply.parent_id.as_deref(), Some(root.id.as_str()));

    let response = server
        .get(&format!("/api/v1/posts/{}/thread", post.id))
        .await
        .expect("Request failed");
    let thread: Vec<ThreadNodeBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let shape: Vec<(&str, usize)> = thread.iter().map(|n| (n.id.as_str(), n.depth)).collect();
    assert_eq!(
        shape,
        vec![
            (root.id.as_str(), 0),
            (reply.id.as_str(), 1),
            (nested.id.as_str(), 2),
            (sibling.id.as_str(), 0),
        ]
    );

    let response = server
        .get(&format!("/api/v1/posts/{}", post.id))
        .await
        .expect("Request failed");
    let fetched: PostBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.signals.comment_count, 4);
}

#[tokio::test]
async fn test_list_comments_by_parent() {
    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::new()).await;

    let root = comment(&server, &post.id, &NewComment::top("root")).await;
    let first = comment(&server, &post.id, &NewComment::reply(&root.id, "a")).await;
    let second = comment(&server, &post.id, &NewComment::reply(&root.id, "b")).await;

    let response = server
        .get(&format!("/api/v1/posts/{}/comments", post.id))
        .await
        .expect("Request failed");
    let top: Vec<CommentBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, root.id);

    let response = server
        .get(&format!("/api/v1/posts/{}/comments?parentId={}", post.id, root.id))
        .await
        .expect("Request failed");
    let children: Vec<CommentBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<&str> = children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);

    let response = server
        .get(&format!("/api/v1/posts/{}/comments?parentId=31337", post.id))
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_COMMENT");
}

#[tokio::test]
async fn test_reply_to_missing_parent() {
    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::new()).await;

    let response = server
        .post(
            &format!("/api/v1/posts/{}/comments", post.id),
            &NewComment::reply("31337", "orphan"),
        )
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "PARENT_NOT_FOUND");
}

#[tokio::test]
async fn test_reply_to_parent_on_other_post() {
    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::new()).await;
    let other = create_post(&server, &CreatePost::new()).await;
    let foreign = comment(&server, &other.id, &NewComment::top("elsewhere")).await;

    let response = server
        .post(
            &format!("/api/v1/posts/{}/comments", post.id),
            &NewComment::reply(&foreign.id, "cross-post"),
        )
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "PARENT_NOT_FOUND");
}

#[tokio::test]
async fn test_edit_and_delete_comment() {
    let server = TestServer::start().await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::new()).await;
    let root = comment(&server, &post.id, &NewComment::top("first draft")).await;
    let path = format!("/api/v1/comments/{}", root.id);

    let edit = EditComment {
        body: "final".to_string(),
    };
    let response = server.patch(&path, &edit).await.expect("Request failed");
    let edited: CommentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.body.as_deref(), Some("final"));

    let response = server.delete(&path).await.expect("Request failed");
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete(&path).await.expect("Request failed");
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.expect("Request failed");
    let tombstone: CommentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(tombstone.deleted);
    assert_eq!(tombstone.body, None);

    let response = server.patch(&path, &edit).await.expect("Request failed");
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "COMMENT_DELETED");

    let response = server
        .get(&format!("/api/v1/posts/{}", post.id))
        .await
        .expect("Request failed");
    let fetched: PostBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.signals.comment_count, 0);
}

#[tokio::test]
async fn test_comment_body_limits() {
    let config = test_config(&[("COMMENT_MAX_LENGTH", "8")]).expect("Failed to build config");
    let server = TestServer::start_with_config(config).await.expect("Failed to start server");
    let post = create_post(&server, &CreatePost::new()).await;
    let path = format!("/api/v1/posts/{}/comments", post.id);

    let response = server
        .post(&path, &NewComment::top("far too long for this"))
        .await
        .expect("Request failed");
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "CONTENT_TOO_LONG");

    let response = server.post(&path, &NewComment::top("")).await.expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Feed Tests
// ============================================================================

#[tokio::test]
async fn test_feed_sorts() {
    let server = TestServer::start().await.expect("Failed to start server");
    let old = create_post(&server, &CreatePost::aged(Duration::hours(48))).await;
    let fresh = create_post(&server, &CreatePost::new()).await;

    for actor in ["1", "2", "3"] {
        react(&server, &old.id, actor, "BULL").await;
    }
    react(&server, &fresh.id, "1", "BULL").await;

    let hot = feed(&server, "").await;
    assert_eq!(hot.sort, "hot");
    assert_eq!(hot.ids(), vec![fresh.id.as_str(), old.id.as_str()]);
    assert!(hot.items[0].hot_score > hot.items[1].hot_score);

    let top = feed(&server, "?sort=top").await;
    assert_eq!(top.ids(), vec![old.id.as_str(), fresh.id.as_str()]);
    assert_eq!(top.items[0].signals.reaction_total, 3);

    let new = feed(&server, "?sort=new").await;
    assert_eq!(new.ids(), vec![fresh.id.as_str(), old.id.as_str()]);
}

#[tokio::test]
async fn test_feed_comments_count_toward_hot() {
    let server = TestServer::start().await.expect("Failed to start server");
    let reacted = create_post(&server, &CreatePost::aged(Duration::minutes(5))).await;
    let discussed = create_post(&server, &CreatePost::aged(Duration::minutes(5))).await;

    react(&server, &reacted.id, "1", "FUNNY").await;
    react(&server, &reacted.id, "2", "FUNNY").await;
    comment(&server, &discussed.id, &NewComment::top("one")).await;
    comment(&server, &discussed.id, &NewComment::top("two")).await;

    let hot = feed(&server, "?sort=hot").await;
    assert_eq!(hot.items[0].id, discussed.id);
}

#[tokio::test]
async fn test_feed_limit() {
    let server = TestServer::start().await.expect("Failed to start server");
    for _ in 0..5 {
        create_post(&server, &CreatePost::new()).await;
    }

    assert_eq!(feed(&server, "?sort=new&limit=2").await.items.len(), 2);
    assert_eq!(feed(&server, "?sort=new").await.items.len(), 5);

    let response = server.get("/api/v1/feed?limit=0").await.expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_feed_invalid_sort() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/feed?sort=best").await.expect("Request failed");
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}
