//! # HTTP Flow
//!
//! The gateway router over a file-backed ledger with the histogram scorer,
//! as the node wires it.

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use pc_02_chain_ledger::{
        FileLedgerStore, HistogramScorer, Ledger, ScoringPolicy, SystemTimeSource,
    };
    use pc_03_api_gateway::{ApiGatewayService, FsBlobStore, GatewayConfig};
    use serde_json::{json, Value};
    use shared_types::ChainSnapshot;
    use std::path::Path;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "pc-tests-boundary";

    fn start(root: &Path) -> (Router, Arc<Ledger>) {
        let uploads = root.join("uploads");
        let mut config = GatewayConfig::default();
        config.uploads.dir = uploads.clone();

        let ledger = Arc::new(
            Ledger::open(
                FileLedgerStore::open(&root.join("data")).unwrap(),
                HistogramScorer::new(&uploads, ScoringPolicy::default()),
                SystemTimeSource,
            )
            .unwrap(),
        );
        let service = ApiGatewayService::new(
            config,
            Arc::clone(&ledger),
            Arc::new(FsBlobStore::new(&uploads)),
        )
        .unwrap();
        (service.router(), ledger)
    }

    async fn call(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, bytes) = call(router, request).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn upload(router: &Router, name: &str, data: &[u8]) -> String {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{name}\"\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::post("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, bytes) = call(router, request).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        value["filename"].as_str().unwrap().to_string()
    }

    async fn get_chain(router: &Router) -> Vec<u8> {
        let request = Request::get("/chain").body(Body::empty()).unwrap();
        let (status, bytes) = call(router, request).await;
        assert_eq!(status, StatusCode::OK);
        bytes
    }

    #[tokio::test]
    async fn test_upload_post_vote_and_restart() {
        let root = tempfile::tempdir().unwrap();
        let chain_before = {
            let (router, ledger) = start(root.path());
            for user in ["alice", "bob"] {
                let (status, _) = post_json(&router, "/register", json!({ "sender": user })).await;
                assert_eq!(status, StatusCode::OK);
            }

            let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
            let token = upload(&router, "gradient.raw", &data).await;
            let (status, posted) = post_json(
                &router,
                "/transact",
                json!({ "sender": "alice", "action": "POST_IMAGE", "content": token }),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            let hash = posted["hash"].as_str().unwrap().to_string();

            let (status, _) = post_json(
                &router,
                "/transact",
                json!({ "sender": "bob", "action": "COMMENT", "target_hash": hash, "content": "nice" }),
            )
            .await;
            assert_eq!(status, StatusCode::OK);

            let bytes = get_chain(&router).await;
            let snapshot: ChainSnapshot = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(snapshot, ledger.snapshot());

            // Uniform byte histogram: 8 bits of entropy
            let post_block = &snapshot.blocks[3];
            assert!((post_block.entropy_score - 8.0).abs() < 1e-9);
            assert_eq!(snapshot.images[&hash].comments[0].content, "nice");
            bytes
        };

        let (router, ledger) = start(root.path());
        assert_eq!(ledger.len(), 5);
        assert_eq!(get_chain(&router).await, chain_before);
    }

    #[tokio::test]
    async fn test_scoring_policy_rejection_leaves_chain_untouched() {
        let root = tempfile::tempdir().unwrap();
        let uploads = root.path().join("uploads");
        let policy = ScoringPolicy {
            enforce: true,
            ..ScoringPolicy::default()
        };
        let ledger = Arc::new(
            Ledger::open(
                FileLedgerStore::open(&root.path().join("data")).unwrap(),
                HistogramScorer::new(&uploads, policy),
                SystemTimeSource,
            )
            .unwrap(),
        );
        let mut config = GatewayConfig::default();
        config.uploads.dir = uploads.clone();
        let router = ApiGatewayService::new(
            config,
            Arc::clone(&ledger),
            Arc::new(FsBlobStore::new(&uploads)),
        )
        .unwrap()
        .router();

        post_json(&router, "/register", json!({ "sender": "alice" })).await;
        // A flat image: zero entropy, zero deviation
        let token = upload(&router, "flat.raw", &[7u8; 2048]).await;
        let (status, body) = post_json(
            &router,
            "/transact",
            json!({ "sender": "alice", "action": "POST_IMAGE", "content": token }),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_ACCEPTABLE, "{body}");
        assert_eq!(ledger.len(), 2);
        assert!(ledger.snapshot().images.is_empty());
    }
}
