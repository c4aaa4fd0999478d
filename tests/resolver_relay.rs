//! End-to-end coverage of static resolution and the contact relay against
//! a real directory tree.

use folio::config::{Config, FallbackPolicy, HealthConfig, SiteConfig};
use folio::contact::ContactRelay;
use folio::handler::resolver::{resolve, Resolved};
use folio::mail::{MailError, Mailer, OutgoingEmail};
use hyper::StatusCode;
use std::cell::RefCell;
use std::fs;
use tempfile::TempDir;

const INDEX_HTML: &str = "<html><body>home</body></html>";
const ABOUT_HTML: &str = "<html><body>about</body></html>";

/// Build a site directory with an index, a page and a stylesheet
fn site_fixture() -> (TempDir, SiteConfig) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("www");
    fs::create_dir_all(root.join("pages")).unwrap();
    fs::create_dir_all(root.join("assets")).unwrap();
    fs::write(root.join("index.html"), INDEX_HTML).unwrap();
    fs::write(root.join("pages/about.html"), ABOUT_HTML).unwrap();
    fs::write(root.join("style.css"), "body {}").unwrap();
    fs::write(root.join("my works.html"), "<html>works</html>").unwrap();
    fs::write(root.join("assets/logo.png"), b"\x89PNG").unwrap();
    // A file outside the served root that must stay unreachable
    fs::write(dir.path().join("secret.txt"), "top secret").unwrap();

    let site = SiteConfig {
        root: root.to_string_lossy().into_owned(),
        index_file: "index.html".to_string(),
        pages_prefix: "/pages/".to_string(),
        pages_dir: "pages".to_string(),
        fallback: FallbackPolicy::Spa,
        health: HealthConfig::default(),
    };
    (dir, site)
}

fn file_content(resolved: Resolved) -> (Vec<u8>, &'static str) {
    match resolved {
        Resolved::File {
            content,
            content_type,
        } => (content, content_type),
        other => panic!("expected a file, got {other:?}"),
    }
}

#[tokio::test]
async fn root_aliases_serve_identical_content() {
    let (_dir, site) = site_fixture();
    let (root, _) = file_content(resolve(&site, "/").await);
    let (home, _) = file_content(resolve(&site, "/home").await);
    let (index, _) = file_content(resolve(&site, "/index.html").await);
    assert_eq!(root, INDEX_HTML.as_bytes());
    assert_eq!(home, root);
    assert_eq!(index, root);
}

#[tokio::test]
async fn pages_prefix_maps_to_subdirectory() {
    let (_dir, site) = site_fixture();
    let (content, content_type) = file_content(resolve(&site, "/pages/about.html").await);
    assert_eq!(content, ABOUT_HTML.as_bytes());
    assert_eq!(content_type, "text/html");
}

#[tokio::test]
async fn content_types_follow_extension() {
    let (_dir, site) = site_fixture();
    let (_, css) = file_content(resolve(&site, "/style.css").await);
    assert_eq!(css, "text/css");
    let (_, png) = file_content(resolve(&site, "/assets/logo.png").await);
    assert_eq!(png, "image/png");
}

#[tokio::test]
async fn percent_encoded_paths_resolve() {
    let (_dir, site) = site_fixture();
    let (content, _) = file_content(resolve(&site, "/my%20works.html").await);
    assert_eq!(content, b"<html>works</html>");
}

#[tokio::test]
async fn spa_fallback_serves_root_document() {
    let (_dir, site) = site_fixture();
    match resolve(&site, "/no/such/route").await {
        Resolved::Fallback { content } => assert_eq!(content, INDEX_HTML.as_bytes()),
        other => panic!("expected SPA fallback, got {other:?}"),
    }
}

#[tokio::test]
async fn redirect_fallback_points_at_root() {
    let (_dir, mut site) = site_fixture();
    site.fallback = FallbackPolicy::Redirect;
    match resolve(&site, "/no/such/route").await {
        Resolved::Redirect { location } => assert_eq!(location, "/"),
        other => panic!("expected redirect, got {other:?}"),
    }
    // Existing files are unaffected by the policy
    let (content, _) = file_content(resolve(&site, "/pages/about.html").await);
    assert_eq!(content, ABOUT_HTML.as_bytes());
}

#[tokio::test]
async fn traversal_cannot_escape_the_root() {
    let (_dir, site) = site_fixture();
    match resolve(&site, "/../secret.txt").await {
        Resolved::Fallback { content } => assert_eq!(content, INDEX_HTML.as_bytes()),
        Resolved::File { content, .. } => {
            assert_ne!(content, b"top secret", "escaped the served root")
        }
        _ => {}
    }
    // Encoded dots must not fare any better
    match resolve(&site, "/%2e%2e/secret.txt").await {
        Resolved::File { content, .. } => {
            assert_ne!(content, b"top secret", "escaped the served root")
        }
        _ => {}
    }
}

#[tokio::test]
async fn directory_requests_fail_opaquely() {
    let (_dir, site) = site_fixture();
    match resolve(&site, "/assets").await {
        Resolved::Error { code } => assert_eq!(code, "EISDIR"),
        other => panic!("expected an error, got {other:?}"),
    }
}

// --- contact relay against the resolver's sibling config ---

struct RecordingMailer {
    sent: RefCell<Vec<OutgoingEmail>>,
}

impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.sent.borrow_mut().push(email.clone());
        Ok(())
    }
}

struct FailingMailer;

impl Mailer for FailingMailer {
    async fn send(&self, _email: &OutgoingEmail) -> Result<(), MailError> {
        Err(MailError::Api(StatusCode::BAD_GATEWAY))
    }
}

fn relay_config() -> folio::config::MailConfig {
    let mut mail = Config::load_from("__folio_missing_config__").unwrap().mail;
    mail.to = "owner@example.com".to_string();
    mail
}

#[tokio::test]
async fn relay_round_trip() {
    let mailer = RecordingMailer {
        sent: RefCell::new(Vec::new()),
    };
    let relay = ContactRelay::new(relay_config(), mailer);
    let body = br#"{"name":"A","email":"a@b.com","subject":"Hi","message":"Hello"}"#;
    let (status, ack) = relay.submit(body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::to_string(&ack).unwrap(),
        r#"{"success":true,"message":"Email sent successfully!"}"#
    );
}

#[tokio::test]
async fn relay_reports_generic_failure() {
    let relay = ContactRelay::new(relay_config(), FailingMailer);
    let body = br#"{"name":"A","email":"a@b.com","subject":"Hi","message":"Hello"}"#;
    let (status, ack) = relay.submit(body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        serde_json::to_string(&ack).unwrap(),
        r#"{"success":false,"message":"Failed to send email. Please try again later."}"#
    );
}
