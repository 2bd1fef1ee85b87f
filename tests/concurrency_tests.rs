//! Concurrent requests must never share scratch files
#![cfg(unix)]

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use yangre_gateway::core::ValidationRequest;
use yangre_gateway::{Config, Gateway, ToolConfig};

const REQUESTS: usize = 24;

fn gateway(dir: &TempDir) -> Gateway {
    // Both stand-ins print the path of the input file they were given.
    let config = Config {
        w3cgrep: ToolConfig::new("w3cgrep", "/bin/sh")
            .with_args(["-c", "printf %s \"$2\"", "w3cgrep"]),
        yangre: ToolConfig::new("yangre", "/bin/sh")
            .with_args(["-c", "printf %s \"$2\"", "yangre"]),
        tmp_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    Gateway::new(&config)
}

fn request(n: usize) -> ValidationRequest {
    ValidationRequest {
        pattern: "[a-z]+".to_string(),
        content: format!("content {}", n),
        pattern_nb: json!(n),
        inverted: false,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_w3c_requests_use_distinct_files() {
    let dir = TempDir::new().unwrap();
    let gateway = Arc::new(gateway(&dir));

    let handles: Vec<_> = (0..REQUESTS)
        .map(|n| {
            let gateway = gateway.clone();
            tokio::spawn(async move { gateway.validate_w3c(request(n)).await })
        })
        .collect();

    let mut paths = HashSet::new();
    for (n, handle) in handles.into_iter().enumerate() {
        let response = handle.await.expect("join").expect("validate");
        assert_eq!(response.pattern_nb, json!(n));
        assert!(response.w3cgrep_output.contains("w3c_input"));
        paths.insert(response.w3cgrep_output);
    }

    assert_eq!(paths.len(), REQUESTS);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_yangre_requests_use_distinct_files() {
    let dir = TempDir::new().unwrap();
    let gateway = Arc::new(gateway(&dir));

    let handles: Vec<_> = (0..REQUESTS)
        .map(|n| {
            let gateway = gateway.clone();
            tokio::spawn(async move { gateway.validate_yangre(request(n)).await })
        })
        .collect();

    let mut paths = HashSet::new();
    for handle in handles {
        let response = handle.await.expect("join").expect("validate");
        assert_eq!(response.yangre_result, 0);
        assert!(response.yangre_output.contains("yangre_input"));
        paths.insert(response.yangre_output);
    }

    assert_eq!(paths.len(), REQUESTS);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
