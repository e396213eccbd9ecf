use media_issues::actions::issue_actions;
use media_issues::api::{ApiClient, lookup};
use media_issues::config::types::ServerConfig;
use media_issues::error::{ApiError, SubmissionError};
use media_issues::types::{IssueCreationPayload, IssueType, MediaType};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, api_key: Option<&str>) -> ApiClient {
    let config = ServerConfig {
        base_url: format!("{}/", server.uri()),
        api_key: api_key.map(str::to_owned),
        timeout_secs: 5,
    };
    ApiClient::new(&config, 5).expect("client builds")
}

fn payload() -> IssueCreationPayload {
    IssueCreationPayload {
        issue_type: IssueType::UpgradeQuality,
        message: "Audio upgrade requested".into(),
        media_id: 42,
        problem_season: 2,
        problem_episode: 3,
    }
}

#[tokio::test]
async fn create_posts_exact_wire_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/issue"))
        .and(header("X-Api-Key", "secret"))
        .and(body_json(serde_json::json!({
            "issueType": 5,
            "message": "Audio upgrade requested",
            "mediaId": 42,
            "problemSeason": 2,
            "problemEpisode": 3,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 88,
            "issueType": 5,
            "status": 1,
            "problemSeason": 2,
            "problemEpisode": 3,
            "createdAt": "2024-05-01T10:00:00.000Z",
            "updatedAt": "2024-05-01T10:00:00.000Z",
            "media": { "id": 42 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("secret"));
    let issue = issue_actions::create(&client, &payload()).await.unwrap();
    assert_eq!(issue.id, 88);
    assert_eq!(issue.issue_type, IssueType::UpgradeQuality);
    assert_eq!(issue.problem_episode, 3);
    assert!(issue.created_at.is_some());
}

#[tokio::test]
async fn server_error_is_reported_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/issue"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = issue_actions::create(&client, &payload())
        .await
        .unwrap_err();
    match err {
        SubmissionError::Api(ApiError::Status { status, body }) => {
            assert_eq!(status, http::StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn report_context_joins_three_lookups() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tv/1399"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/tv_details.json")),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 3,
            "displayName": "kim",
            "permissions": 4096
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/settings/public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "series4kEnabled": true,
            "movie4kEnabled": false
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let ctx = lookup::fetch_report_context(&client, MediaType::Tv, 1399, false)
        .await
        .unwrap();
    assert_eq!(ctx.media.media_id(), Some(42));
    assert!(ctx.settings.series_4k_enabled);
    assert_eq!(ctx.viewer.permissions.bits(), 4096);
    assert_eq!(ctx.media.season_availability().len(), 4);
}

#[tokio::test]
async fn missing_media_surfaces_as_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/movie/1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = lookup::fetch_media(&client, MediaType::Movie, 1, false)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Status { status, .. } if status == http::StatusCode::NOT_FOUND
    ));
}

#[tokio::test]
async fn issue_count_is_cached_until_an_issue_is_created() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/issue/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total": 4, "video": 1, "audio": 1, "subtitles": 1, "others": 1,
            "open": 3, "closed": 1
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/issue"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 5, "issueType": 5
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let first = lookup::fetch_issue_count(&client, false).await.unwrap();
    let cached = lookup::fetch_issue_count(&client, false).await.unwrap();
    assert_eq!(first, cached);
    assert_eq!(first.total, 4);

    issue_actions::create(&client, &payload()).await.unwrap();
    lookup::fetch_issue_count(&client, false).await.unwrap();
    // MockServer verifies exactly two GETs on drop.
}
