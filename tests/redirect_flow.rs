//! End-to-end redirect behaviour through the HTTP server.

use std::time::Duration;

use locale_gateway::config::{MatchType, RedirectRuleConfig, SourceMatch};

mod common;

use common::{client, multilingual_config, start_gateway, start_mock_upstream};

const HOST: &str = "www.example.com";

#[tokio::test]
async fn test_language_redirect_preserves_path_and_query() {
    let upstream = start_mock_upstream("upstream").await;
    let gateway = start_gateway(multilingual_config(upstream)).await;

    let res = client()
        .get(gateway.url("/produkt?x=1"))
        .header("Host", HOST)
        .header("Accept-Language", "de-CH,de;q=0.9,en;q=0.8")
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), 302);
    assert_eq!(
        res.headers()["location"],
        "https://www.example.com/de/produkt?x=1"
    );
}

#[tokio::test]
async fn test_unmatched_language_uses_primary_site() {
    let upstream = start_mock_upstream("upstream").await;
    let gateway = start_gateway(multilingual_config(upstream)).await;

    let res = client()
        .get(gateway.url("/"))
        .header("Host", HOST)
        .header("Accept-Language", "zh-CN")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 302);
    assert_eq!(res.headers()["location"], "https://www.example.com/en/");
}

#[tokio::test]
async fn test_request_on_site_is_forwarded() {
    let upstream = start_mock_upstream("upstream").await;
    let gateway = start_gateway(multilingual_config(upstream)).await;

    let res = client()
        .get(gateway.url("/de/produkt?x=1"))
        .header("Host", HOST)
        .header("Accept-Language", "fr")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "upstream");
}

#[tokio::test]
async fn test_redirect_target_is_not_redirected_again() {
    let upstream = start_mock_upstream("upstream").await;
    let gateway = start_gateway(multilingual_config(upstream)).await;
    let client = client();

    let first = client
        .get(gateway.url("/produkt"))
        .header("Host", HOST)
        .header("Accept-Language", "fr-CA,fr;q=0.9")
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 302);
    let location = first.headers()["location"].to_str().unwrap().to_string();
    let path = location.strip_prefix("https://www.example.com").unwrap();
    assert_eq!(path, "/fr/produkt");

    let second = client
        .get(gateway.url(path))
        .header("Host", HOST)
        .header("Accept-Language", "fr-CA,fr;q=0.9")
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 200);
}

#[tokio::test]
async fn test_static_redirect_precedes_language_redirect() {
    let upstream = start_mock_upstream("upstream").await;
    let mut config = multilingual_config(upstream);
    config.static_redirects.rules.push(RedirectRuleConfig {
        source: "/promo".into(),
        destination: "/de/aktion".into(),
        match_type: MatchType::Exact,
        source_match: SourceMatch::Path,
        status: 301,
    });
    let gateway = start_gateway(config).await;

    let res = client()
        .get(gateway.url("/promo"))
        .header("Host", HOST)
        .header("Accept-Language", "fr")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 301);
    assert_eq!(res.headers()["location"], "/de/aktion");
}

#[tokio::test]
async fn test_admin_requests_pass_through() {
    let upstream = start_mock_upstream("admin").await;
    let gateway = start_gateway(multilingual_config(upstream)).await;

    let res = client()
        .get(gateway.url("/admin/entries"))
        .header("Host", HOST)
        .header("Accept-Language", "de")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "admin");
}

#[tokio::test]
async fn test_feature_flag_off_passes_through() {
    let upstream = start_mock_upstream("upstream").await;
    let mut config = multilingual_config(upstream);
    config.language_redirect.enabled = false;
    let gateway = start_gateway(config).await;

    let res = client()
        .get(gateway.url("/produkt"))
        .header("Host", HOST)
        .header("Accept-Language", "de")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn test_empty_group_is_an_application_error() {
    let upstream = start_mock_upstream("upstream").await;
    let mut config = multilingual_config(upstream);
    for site in &mut config.sites {
        site.enabled = false;
    }
    let gateway = start_gateway(config).await;

    let res = client()
        .get(gateway.url("/produkt"))
        .header("Host", HOST)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
}

#[tokio::test]
async fn test_reloaded_configuration_applies_to_later_requests() {
    let upstream = start_mock_upstream("upstream").await;
    let mut config = multilingual_config(upstream);
    config.language_redirect.enabled = false;
    let gateway = start_gateway(config.clone()).await;
    let client = client();

    let before = client
        .get(gateway.url("/produkt"))
        .header("Host", HOST)
        .header("Accept-Language", "de")
        .send()
        .await
        .unwrap();
    assert_eq!(before.status(), 200);

    config.language_redirect.enabled = true;
    gateway.config_updates.send(config).unwrap();

    let mut status = 0;
    for _ in 0..50 {
        let res = client
            .get(gateway.url("/produkt"))
            .header("Host", HOST)
            .header("Accept-Language", "de")
            .send()
            .await
            .unwrap();
        status = res.status().as_u16();
        if status == 302 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(status, 302, "reloaded flag should enable language redirects");
}
