use areaboard::api::{ApiClient, ApiError, AreaStore, CatalogSource, OptionSource};
use areaboard::area::{AreaDraft, AreaUpdate, RuleHalf};
use areaboard::catalog::{CapabilityCatalog, DynamicSource, Role};
use areaboard::shared::ids::{AreaId, KindName, ServiceName, UserId};
use areaboard::shared::logging::EventLog;
use areaboard::validation::{Config, OptionEntry};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    path: String,
    auth_header: String,
    body: String,
}

struct MockApiServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl MockApiServer {
    fn start<F>(expected_requests: usize, responder: F) -> Self
    where
        F: Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let requests_for_thread = Arc::clone(&requests);
        let responder = Arc::new(responder);

        let handle = thread::spawn(move || {
            for _ in 0..expected_requests {
                let (mut stream, _) = listener.accept().expect("accept");
                let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

                let mut request_line = String::new();
                reader
                    .read_line(&mut request_line)
                    .expect("read request line");
                let mut parts = request_line.split_whitespace();
                let method = parts.next().unwrap_or("GET").to_string();
                let path = parts.next().unwrap_or("/").to_string();

                let mut auth_header = String::new();
                let mut content_length = 0usize;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).expect("read header");
                    if line == "\r\n" || line.is_empty() {
                        break;
                    }
                    let lower = line.to_ascii_lowercase();
                    if lower.starts_with("authorization:") {
                        auth_header = line
                            .split_once(':')
                            .map(|(_, v)| v.trim().to_string())
                            .unwrap_or_default();
                    }
                    if lower.starts_with("content-length:") {
                        content_length = line
                            .split_once(':')
                            .map(|(_, v)| v.trim().parse::<usize>().unwrap_or(0))
                            .unwrap_or(0);
                    }
                }

                let mut body = vec![0_u8; content_length];
                if content_length > 0 {
                    reader.read_exact(&mut body).expect("read body");
                }
                let body = String::from_utf8_lossy(&body).to_string();

                requests_for_thread
                    .lock()
                    .expect("lock requests")
                    .push(RecordedRequest {
                        method: method.clone(),
                        path: path.clone(),
                        auth_header,
                        body,
                    });

                let (status, response_body) = responder(&method, &path);
                let reason = if status < 400 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response_body.len(),
                    response_body
                );
                stream
                    .write_all(response.as_bytes())
                    .expect("write response");
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
            handle: Some(handle),
        }
    }

    fn finish(mut self) -> Vec<RecordedRequest> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("join mock server");
        }
        self.requests.lock().expect("lock requests").clone()
    }
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::with_base(
        base_url,
        Some("token-abc".to_string()),
        Duration::from_secs(5),
    )
}

fn user() -> UserId {
    UserId::parse("auth0|42").expect("user id")
}

fn area_json(id: serde_json::Value, enabled: bool) -> String {
    serde_json::json!({
        "id": id,
        "userId": "auth0|42",
        "name": "Issue relay",
        "action": {"service": "github", "type": "new_issue", "config": {"owner": "acme", "repo": "app"}},
        "reaction": {"service": "discord", "type": "send_message_to_channel", "config": {"channelId": "10", "content": "{{issue.title}}"}},
        "enabled": enabled,
        "createdAt": "2026-01-05T10:00:00Z",
        "updatedAt": "2026-01-05T10:00:00Z"
    })
    .to_string()
}

fn half(service: &str, kind: &str, pairs: &[(&str, &str)]) -> RuleHalf {
    RuleHalf::new(
        ServiceName::parse(service).expect("service"),
        KindName::parse(kind).expect("kind"),
        Config::from_pairs(pairs.iter().copied()),
    )
}

#[test]
fn api_client_module_builds_catalog_from_about_document() {
    let server = MockApiServer::start(1, |_, _| {
        (
            200,
            r#"{"server":{"services":[
                {"name":"GitHub","actions":[{"name":"new_issue"}],"reactions":[{"name":"create_issue","description":"Open an issue"}]},
                {"name":"weather","actions":[{"name":"rain_expected"}],"reactions":[]}
            ]}}"#
                .to_string(),
        )
    });
    let doc = client(&server.base_url).fetch_about().expect("about");
    let requests = server.finish();
    assert_eq!(requests[0].path, "/about.json");
    assert_eq!(requests[0].auth_header, "Bearer token-abc");

    let catalog = CapabilityCatalog::from_about(&doc, &EventLog::disabled());
    let names: Vec<&str> = catalog
        .list_services()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["github", "weather"]);
    assert_eq!(
        catalog
            .field_specs_for("github", "create_issue", Role::Reaction)
            .expect("known kind")
            .len(),
        5
    );
    assert!(catalog
        .field_specs_for("weather", "rain_expected", Role::Action)
        .expect("server-only kind")
        .is_empty());
}

#[test]
fn api_client_module_fetches_listings_per_source() {
    let server = MockApiServer::start(3, |_, path| {
        let body = match path {
            "/services/github/repositories" => r#"[{"id": 11, "name": "app"}]"#,
            "/services/discord/guilds" => r#"[{"id": "1", "name": "Guild One"}]"#,
            "/services/discord/guilds/1/channels" => r#"[{"id": "10", "name": "general"}]"#,
            _ => "[]",
        };
        (200, body.to_string())
    });
    let api = client(&server.base_url);
    assert_eq!(
        api.fetch_options(DynamicSource::GithubRepositories, None)
            .expect("repos"),
        vec![OptionEntry::new("11", "app")]
    );
    assert_eq!(
        api.fetch_options(DynamicSource::DiscordGuilds, None)
            .expect("guilds"),
        vec![OptionEntry::new("1", "Guild One")]
    );
    assert_eq!(
        api.fetch_options(DynamicSource::DiscordChannels, Some("1"))
            .expect("channels"),
        vec![OptionEntry::new("10", "general")]
    );
    let requests = server.finish();
    assert!(requests.iter().all(|r| r.method == "GET"));
}

#[test]
fn api_client_module_scopes_area_requests_to_user() {
    let server = MockApiServer::start(4, |method, _| match method {
        "GET" => (200, format!("[{}]", area_json(serde_json::json!(7), true))),
        "DELETE" => (204, String::new()),
        "PATCH" => (200, area_json(serde_json::json!(7), false)),
        _ => (200, area_json(serde_json::json!("7"), true)),
    });
    let api = client(&server.base_url);
    let id = AreaId::parse("7").expect("id");

    let areas = api.list_areas(&user()).expect("list");
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0].id, id);
    assert_eq!(
        areas[0].reaction.config.text("content"),
        Some("{{issue.title}}")
    );

    let toggled = api.set_area_enabled(&user(), &id, false).expect("toggle");
    assert!(!toggled.enabled);

    let update = AreaUpdate {
        name: Some("Renamed".to_string()),
        ..AreaUpdate::default()
    };
    api.update_area(&user(), &id, &update).expect("update");
    api.delete_area(&user(), &id).expect("delete");

    let requests = server.finish();
    assert_eq!(requests[0].path, "/areas?userId=auth0%7C42");
    assert_eq!(requests[1].method, "PATCH");
    assert_eq!(requests[1].path, "/areas/7?userId=auth0%7C42");
    assert_eq!(requests[1].body, r#"{"enabled":false}"#);
    assert_eq!(requests[2].method, "PUT");
    assert_eq!(requests[2].body, r#"{"name":"Renamed"}"#);
    assert_eq!(requests[3].method, "DELETE");
    assert_eq!(requests[3].path, "/areas/7?userId=auth0%7C42");
}

#[test]
fn api_client_module_posts_draft_with_user_id() {
    let server = MockApiServer::start(1, |_, _| (201, area_json(serde_json::json!("a-1"), true)));
    let draft = AreaDraft {
        name: "Issue relay".to_string(),
        description: None,
        action: half("github", "new_issue", &[("owner", "acme"), ("repo", "app")]),
        reaction: half(
            "discord",
            "send_message_to_channel",
            &[("channelId", "10"), ("content", "New: {{issue.title}}")],
        ),
        enabled: true,
    };
    let area = client(&server.base_url)
        .create_area(&user(), &draft)
        .expect("create");
    assert_eq!(area.id.as_str(), "a-1");

    let requests = server.finish();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/areas");
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).expect("json body");
    assert_eq!(body["userId"], "auth0|42");
    assert_eq!(body["reaction"]["type"], "send_message_to_channel");
    assert_eq!(body["reaction"]["config"]["content"], "New: {{issue.title}}");
    assert!(body.get("description").is_none());
}

#[test]
fn api_client_module_maps_error_statuses() {
    let server = MockApiServer::start(1, |_, _| (500, r#"{"error":"boom"}"#.to_string()));
    let err = client(&server.base_url)
        .list_connections()
        .expect_err("server error");
    server.finish();
    match err {
        ApiError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn api_client_module_reports_undecodable_bodies() {
    let server = MockApiServer::start(1, |_, _| (200, "not json".to_string()));
    let err = client(&server.base_url)
        .fetch_options(DynamicSource::DiscordGuilds, None)
        .expect_err("decode");
    server.finish();
    assert!(matches!(err, ApiError::Decode { .. }));
}
