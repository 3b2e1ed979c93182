mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;

use studyshare_client::api::{DashboardClient, ForumsClient, HealthClient};
use studyshare_client::error::ApiError;
use studyshare_client::http::{ApiClient, ApiRequest, ApiResponse, Transport};
use studyshare_client::models::{NewPostRequest, NewReplyRequest, ProfileUpdate};

use support::{Route, scripted_client};

fn draft() -> NewPostRequest {
    NewPostRequest {
        title: "Midterm tips".to_string(),
        content: "Bring a pencil".to_string(),
        course: "CSC 111".to_string(),
        user_id: "user_1".to_string(),
        user_name: "alice".to_string(),
    }
}

#[tokio::test]
async fn get_courses_unwraps_the_envelope() {
    let (core, _) = scripted_client(vec![Route::get(
        "/api/forums/courses",
        200,
        json!({"success": true, "data": [
            {"course_code": "CSC 111", "course_name": "Introduction to Computing", "post_count": 5, "recent_activity": "2024-01-15T10:30:00Z"}
        ]}),
    )]);

    let courses = ForumsClient::new(core).get_courses().await.expect("courses");
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].course_code, "CSC 111");
    assert_eq!(courses[0].post_count, 5);
}

#[tokio::test]
async fn envelope_failure_carries_the_server_message() {
    let (core, _) = scripted_client(vec![Route::get(
        "/api/forums/courses",
        200,
        json!({"success": false, "error": "course data unavailable"}),
    )]);

    let err = ForumsClient::new(core)
        .get_courses()
        .await
        .expect_err("expected failure");
    assert_eq!(err.to_string(), "course data unavailable");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn envelope_without_data_is_a_parse_error() {
    let (core, _) = scripted_client(vec![Route::get(
        "/api/forums/courses",
        200,
        json!({"success": true}),
    )]);

    let err = ForumsClient::new(core)
        .get_courses()
        .await
        .expect_err("expected failure");
    assert!(matches!(err, ApiError::Parse { .. }));
}

#[tokio::test]
async fn create_post_rejects_blank_fields_before_any_network_call() {
    let (core, transport) = scripted_client(vec![]);
    let forums = ForumsClient::new(core);

    let incomplete = NewPostRequest {
        title: String::new(),
        content: "   ".to_string(),
        course: "CSC 111".to_string(),
        user_id: "user_1".to_string(),
        user_name: String::new(),
    };
    let err = forums
        .create_post(&incomplete)
        .await
        .expect_err("expected validation failure");

    match &err {
        ApiError::Validation { missing } => {
            assert_eq!(missing, &["title", "content", "user_name"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.status(), None);
    assert!(transport.urls().is_empty(), "no request may be issued");
}

#[tokio::test]
async fn create_post_sends_all_five_fields() {
    let (core, transport) = scripted_client(vec![Route::post(
        "/api/forums/posts",
        201,
        json!({"success": true, "data": {
            "id": 7, "title": "Midterm tips", "content": "Bring a pencil",
            "course": "CSC 111", "user_id": "user_1", "user_name": "alice",
            "upvotes": 0, "created_at": "2024-01-15T10:30:00Z"
        }}),
    )]);

    let post = ForumsClient::new(core)
        .create_post(&draft())
        .await
        .expect("created post");
    assert_eq!(post.id, 7);

    let bodies = transport.bodies();
    let sent = bodies[0].as_ref().expect("request body");
    assert_eq!(sent["title"], "Midterm tips");
    assert_eq!(sent["content"], "Bring a pencil");
    assert_eq!(sent["course"], "CSC 111");
    assert_eq!(sent["user_id"], "user_1");
    assert_eq!(sent["user_name"], "alice");
}

#[tokio::test]
async fn get_posts_rejects_a_blank_course_code() {
    let (core, transport) = scripted_client(vec![]);
    let forums = ForumsClient::new(core);

    for course in ["", "   "] {
        let err = forums
            .get_posts(course, 20, 0)
            .await
            .expect_err("expected validation failure");
        assert!(matches!(err, ApiError::Validation { .. }));
    }
    assert!(transport.urls().is_empty());
}

#[tokio::test]
async fn get_posts_encodes_query_parameters() {
    let (core, transport) = scripted_client(vec![Route::get(
        "/api/forums/posts",
        200,
        json!({"success": true, "data": []}),
    )]);

    ForumsClient::new(core)
        .get_posts("CSC 111", 20, 0)
        .await
        .expect("posts");

    let url = &transport.urls()[0];
    assert!(url.contains("course=CSC+111"), "got {url}");
    assert!(url.contains("limit=20"));
    assert!(url.contains("offset=0"));
}

/// Fake backend that actually flips per-call, like the real toggle
/// endpoint.
struct TogglingUpvoteTransport {
    upvoted: AtomicBool,
    hits: AtomicUsize,
}

#[async_trait]
impl Transport for TogglingUpvoteTransport {
    async fn execute(&self, _request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        let was = self.upvoted.fetch_xor(true, Ordering::SeqCst);
        let now = !was;
        let action = if now { "added" } else { "removed" };
        Ok(ApiResponse {
            status: 200,
            body: json!({"success": true, "action": action, "upvoted": now}).to_string(),
        })
    }
}

#[tokio::test]
async fn toggling_twice_restores_the_original_upvote_state() {
    let transport = Arc::new(TogglingUpvoteTransport {
        upvoted: AtomicBool::new(false),
        hits: AtomicUsize::new(0),
    });
    let core = Arc::new(ApiClient::with_transport(
        support::fast_config(),
        transport.clone(),
    ));
    let forums = ForumsClient::new(core);

    let first = forums.toggle_upvote(42, "user_1").await.expect("first toggle");
    assert_eq!(first.action, "added");
    assert!(first.upvoted);

    let second = forums.toggle_upvote(42, "user_1").await.expect("second toggle");
    assert_eq!(second.action, "removed");
    assert!(!second.upvoted);

    assert!(!transport.upvoted.load(Ordering::SeqCst), "back to start");
    assert_eq!(transport.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn upvote_status_reads_the_flag() {
    let (core, transport) = scripted_client(vec![Route::get(
        "/upvote-status",
        200,
        json!({"success": true, "upvoted": true}),
    )]);

    let upvoted = ForumsClient::new(core)
        .upvote_status(42, "user_1")
        .await
        .expect("status");
    assert!(upvoted);
    assert!(transport.urls()[0].contains("/api/forums/posts/42/upvote-status"));
}

#[tokio::test]
async fn create_reply_trims_content_and_rejects_blank() {
    let (core, transport) = scripted_client(vec![Route::post(
        "/replies",
        201,
        json!({"success": true, "data": {
            "id": 3, "post_id": 42, "user_id": "user_1", "user_name": "alice",
            "content": "see chapter 4", "created_at": "2024-01-15T10:30:00Z"
        }}),
    )]);
    let forums = ForumsClient::new(core);

    let reply = forums
        .create_reply(
            42,
            &NewReplyRequest {
                user_id: "user_1".to_string(),
                user_name: "alice".to_string(),
                content: "  see chapter 4  ".to_string(),
            },
        )
        .await
        .expect("reply");
    assert_eq!(reply.post_id, 42);

    let bodies = transport.bodies();
    let sent = bodies[0].as_ref().expect("request body");
    assert_eq!(sent["content"], "see chapter 4");

    let err = forums
        .create_reply(
            42,
            &NewReplyRequest {
                user_id: "user_1".to_string(),
                user_name: "alice".to_string(),
                content: "   ".to_string(),
            },
        )
        .await
        .expect_err("expected validation failure");
    assert!(matches!(err, ApiError::Validation { .. }));
    assert_eq!(transport.urls().len(), 1, "blank reply must not hit the network");
}

#[tokio::test]
async fn missing_profile_surfaces_as_404() {
    let (core, _) = scripted_client(vec![Route::get(
        "/api/dashboard/user-profile",
        404,
        json!({"error": "User not found"}),
    )]);

    let err = DashboardClient::new(core)
        .user_profile("user_1")
        .await
        .expect_err("expected 404");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn create_profile_wraps_the_payload_in_user_data() {
    let (core, transport) = scripted_client(vec![Route::post(
        "/api/dashboard/create-profile",
        200,
        json!({"success": true, "data": {
            "clerk_user_id": "user_1", "name": "Alice Smith", "email": "alice@ncsu.edu",
            "university": "NCSU", "major": null, "location": null,
            "created_at": "2024-01-15T10:30:00Z"
        }}),
    )]);

    let profile = DashboardClient::new(core)
        .create_profile(&studyshare_client::models::NewProfileRequest {
            clerk_user_id: "user_1".to_string(),
            name: "Alice Smith".to_string(),
            email: "alice@ncsu.edu".to_string(),
            university: Some("NCSU".to_string()),
            major: None,
            location: None,
            created_at: "2024-01-15T10:30:00Z".to_string(),
        })
        .await
        .expect("profile");
    assert_eq!(profile.name, "Alice Smith");

    let bodies = transport.bodies();
    let sent = bodies[0].as_ref().expect("request body");
    assert_eq!(sent["user_data"]["clerk_user_id"], "user_1");
    assert_eq!(sent["user_data"]["email"], "alice@ncsu.edu");
}

#[tokio::test]
async fn update_profile_omits_unset_fields() {
    let (core, transport) = scripted_client(vec![Route::post(
        "/api/dashboard/update-profile",
        200,
        json!({"success": true, "data": {
            "clerk_user_id": "user_1", "name": "Alice Smith", "email": "alice@ncsu.edu",
            "university": "NCSU", "major": null, "location": "Raleigh",
            "created_at": "2024-01-15T10:30:00Z"
        }}),
    )]);

    DashboardClient::new(core)
        .update_profile(
            "user_1",
            &ProfileUpdate {
                location: Some("Raleigh".to_string()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .expect("profile");

    let bodies = transport.bodies();
    let sent = bodies[0].as_ref().expect("request body");
    assert_eq!(sent["user_id"], "user_1");
    assert_eq!(sent["profile_data"]["location"], "Raleigh");
    assert!(sent["profile_data"].get("major").is_none());
    assert!(sent["profile_data"].get("name").is_none());
}

#[tokio::test]
async fn health_report_parses_without_an_envelope() {
    let (core, _) = scripted_client(vec![Route::get(
        "/api/health/",
        200,
        json!({
            "status": "healthy",
            "service": "studyshare-backend",
            "timestamp": "2024-01-15T10:30:00Z",
            "system": {"platform": "Linux"},
            "resources": {"cpu_percent": 12.5},
            "uptime": {"seconds": 123}
        }),
    )]);

    let report = HealthClient::new(core).check().await.expect("health");
    assert_eq!(report.status, "healthy");
    assert_eq!(report.service, "studyshare-backend");
}
