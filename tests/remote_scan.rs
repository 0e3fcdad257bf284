use haggis::config::{Config, ScanConfig};
use haggis::models::{RepositoryOutcome, ResolvedTarget};
use haggis::{Error, GitHubClient, OrgScanner};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, token: Option<&str>) -> GitHubClient {
    let config = Config {
        github_token: token.map(str::to_string),
        api_base_url: server.uri(),
        raw_base_url: format!("{}/raw", server.uri()),
    };
    GitHubClient::new(&config).unwrap()
}

async fn mount_listing(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_codeowners(server: &MockServer, repo: &str, branch: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/raw/acme/{}/{}/.github/CODEOWNERS", repo, branch)))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_not_found_is_not_transport_error() {
    let server = MockServer::start().await;
    mount_codeowners(&server, "api", "main", ResponseTemplate::new(404)).await;

    let client = client_for(&server, None);
    let content = client
        .get_codeowners(&ResolvedTarget::new("acme", "api", "main"))
        .await
        .unwrap();
    assert!(content.is_none());
}

#[tokio::test]
async fn test_fetch_other_status_is_transport_error() {
    let server = MockServer::start().await;
    for (repo, status) in [("api", 500), ("web", 403), ("docs", 401)] {
        mount_codeowners(&server, repo, "main", ResponseTemplate::new(status)).await;
    }

    let client = client_for(&server, None);
    for repo in ["api", "web", "docs"] {
        let err = client
            .get_codeowners(&ResolvedTarget::new("acme", repo, "main"))
            .await
            .unwrap_err();
        assert!(err.is_transport(), "{repo}: {err:?}");
    }
}

#[tokio::test]
async fn test_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/acme/api/main/.github/CODEOWNERS"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("* @acme/api\n"))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("s3cret"));
    let content = client
        .get_codeowners(&ResolvedTarget::new("acme", "api", "main"))
        .await
        .unwrap();
    assert_eq!(content.as_deref(), Some("* @acme/api\n"));
}

#[tokio::test]
async fn test_org_scan_end_to_end() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        json!([
            {"name": "api", "default_branch": "main"},
            {"name": "web", "default_branch": "develop"},
            {"name": "infra", "default_branch": "main"},
            {"name": "empty", "default_branch": null}
        ]),
    )
    .await;
    mount_codeowners(&server, "api", "main", ResponseTemplate::new(404)).await;
    mount_codeowners(
        &server,
        "web",
        "develop",
        ResponseTemplate::new(200).set_body_string("# Web team\n\n*.ts  @acme/web\n  /docs/ @alice\n"),
    )
    .await;
    mount_codeowners(&server, "infra", "main", ResponseTemplate::new(502)).await;

    let scanner = OrgScanner::new(client_for(&server, None));
    let config = ScanConfig::new("acme", None, None, true).unwrap();
    let result = scanner.scan(&config).await.unwrap();

    assert_eq!(result.found_count(), 1);
    let web = result.get("web").unwrap();
    assert_eq!(web.branch.as_deref(), Some("develop"));
    assert_eq!(
        web.outcome.document().unwrap().filtered_lines(),
        ["*.ts  @acme/web", "/docs/ @alice"]
    );
    assert!(matches!(result.get("api").unwrap().outcome, RepositoryOutcome::NotFound));
    assert!(matches!(
        result.get("infra").unwrap().outcome,
        RepositoryOutcome::FetchError { .. }
    ));
    assert!(matches!(
        result.get("empty").unwrap().outcome,
        RepositoryOutcome::BranchFailed { .. }
    ));
}

#[tokio::test]
async fn test_org_scan_without_matches_fails() {
    let server = MockServer::start().await;
    mount_listing(&server, json!([{"name": "api", "default_branch": "main"}])).await;
    mount_codeowners(&server, "api", "main", ResponseTemplate::new(404)).await;

    let scanner = OrgScanner::new(client_for(&server, None));
    let config = ScanConfig::new("acme", None, None, false).unwrap();
    let err = scanner.scan(&config).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_org_listing_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let scanner = OrgScanner::new(client_for(&server, None));
    let config = ScanConfig::new("acme", None, None, false).unwrap();
    let err = scanner.scan(&config).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_unknown_org_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/ghost/repos"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let scanner = OrgScanner::new(client_for(&server, None));
    let config = ScanConfig::new("ghost", None, None, false).unwrap();
    match scanner.scan(&config).await.unwrap_err() {
        Error::NotFound(message) => assert!(message.contains("ghost")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_single_repository_uses_reported_default_branch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/api"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"name": "api", "default_branch": "trunk"})),
        )
        .mount(&server)
        .await;
    mount_codeowners(
        &server,
        "api",
        "trunk",
        ResponseTemplate::new(200).set_body_string("* @acme/api\n"),
    )
    .await;

    let scanner = OrgScanner::new(client_for(&server, None));
    let config = ScanConfig::new("acme", Some("api"), None, false).unwrap();
    let result = scanner.scan_repository(&config).await.unwrap();
    assert_eq!(result.get("api").unwrap().branch.as_deref(), Some("trunk"));
}

#[tokio::test]
async fn test_branch_with_reserved_characters_is_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/acme/api/fix%231%3Fdraft/v2/.github/CODEOWNERS"))
        .respond_with(ResponseTemplate::new(200).set_body_string("* @acme/api\n"))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let content = client
        .get_codeowners(&ResolvedTarget::new("acme", "api", "fix#1?draft/v2"))
        .await
        .unwrap();
    assert_eq!(content.as_deref(), Some("* @acme/api\n"));
}
