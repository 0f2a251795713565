//! Loading gateway configuration from disk.

use std::io::Write;
use std::time::Duration;

use locale_gateway::config::{load_config, watcher::ConfigWatcher, ConfigError};
use locale_gateway::http::{GatewayState, RequestContext};
use locale_gateway::redirect::{Flow, RedirectAction};

const CONFIG: &str = r#"
[listener]
bind_address = "127.0.0.1:8080"

[upstream]
address = "127.0.0.1:3000"

[language_redirect]
enabled = true

[aliases]
web = "https://www.example.com"

[[sites]]
handle = "en"
base_url = "@web/en"
language = "en-US"
group_id = 1
primary = true

[[sites]]
handle = "de"
base_url = "@web/de"
language = "de-CH"
group_id = 1

[[static_redirects.rules]]
source = "^/blog/(\\d+)$"
destination = "/en/news/$1"
match_type = "regex"
status = 302
"#;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_loaded_config_drives_both_stages() {
    let file = write_config(CONFIG);
    let config = load_config(file.path()).unwrap();
    let state = GatewayState::from_config(&config).unwrap();

    let blog = RequestContext::from_url(
        "https://www.example.com/blog/7",
        None,
        &state.admin_path_prefixes,
    );
    assert_eq!(
        state.process(&blog).unwrap(),
        Flow::Terminated(RedirectAction::new("/en/news/7", axum::http::StatusCode::FOUND))
    );

    let product = RequestContext::from_url(
        "https://www.example.com/produkt?farbe=rot",
        Some("de".into()),
        &state.admin_path_prefixes,
    );
    assert_eq!(
        state.process(&product).unwrap(),
        Flow::Terminated(RedirectAction::found(
            "https://www.example.com/de/produkt?farbe=rot"
        ))
    );
}

#[test]
fn test_missing_file() {
    let err = load_config(std::path::Path::new("/nonexistent/gateway.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_malformed_file() {
    let file = write_config("[[sites]]\nhandle = 3\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[tokio::test]
async fn test_watcher_reloads_after_rename_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gateway.toml");
    std::fs::write(&path, CONFIG).unwrap();

    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _watcher = watcher.run().unwrap();

    // Save the way editors do: write a sibling, then rename it over the file.
    let staged = dir.path().join(".gateway.toml.tmp");
    std::fs::write(&staged, CONFIG.replace("enabled = true", "enabled = false")).unwrap();
    std::fs::rename(&staged, &path).unwrap();

    let reloaded = tokio::time::timeout(Duration::from_secs(10), updates.recv())
        .await
        .expect("no reload after rename")
        .unwrap();
    assert!(!reloaded.language_redirect.enabled);
}
