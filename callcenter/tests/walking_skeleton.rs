#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Walking-skeleton end-to-end test.
//!
//! Proves the full pipeline over a real TCP port:
//!   1. Start the service on a temp database directory
//!   2. Log in with a seeded account
//!   3. Create a contract
//!   4. Drive a status update through the label table
//!   5. Verify phase transition + history append
//!   6. Check stats and the health report

use std::sync::Arc;

use desk_callcenter::manager::ContractManager;

struct TestService {
    base_url: String,
    client: reqwest::Client,
    _tmp: tempfile::TempDir,
    // Dropping the sender would trigger graceful shutdown early.
    _shutdown_tx: tokio::sync::watch::Sender<bool>,
    _server: tokio::task::JoinHandle<()>,
}

impl TestService {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn start_service() -> TestService {
    let tmp = tempfile::TempDir::new().unwrap();
    let manager = Arc::new(ContractManager::new(tmp.path()).unwrap());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let server = tokio::spawn(async move {
        desk_callcenter::http::serve(manager, listener, shutdown_rx)
            .await
            .unwrap();
    });

    TestService {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        _tmp: tmp,
        _shutdown_tx: shutdown_tx,
        _server: server,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn walking_skeleton_e2e() {
    let svc = start_service().await;

    // 1. Login with a seeded account
    let resp = svc
        .client
        .post(svc.url("/api/login"))
        .json(&serde_json::json!({ "username": "admin", "password": "AiComp@2025!Admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let login: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(login["success"], true);
    assert_eq!(login["user"]["role"], "admin");

    // 2. Bad credentials → 401
    let resp = svc
        .client
        .post(svc.url("/api/login"))
        .json(&serde_json::json!({ "username": "admin", "password": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // 3. Create a contract with client-supplied fields
    let resp = svc
        .client
        .post(svc.url("/api/contracts"))
        .json(&serde_json::json!({
            "customerName": "テスト顧客",
            "agencyCode": "AIC00001",
            "operator": "スタッフ"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let created: serde_json::Value = resp.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("CNT"));
    assert_eq!(created["phase"], "entry");
    assert_eq!(created["status"], "エントリ待ち");
    assert_eq!(created["history"].as_array().unwrap().len(), 1);

    // 4. Drive the first label transition
    let resp = svc
        .client
        .post(svc.url(&format!("/api/contracts/{id}/update-status")))
        .json(&serde_json::json!({
            "status": "エントリ完了→前確へ",
            "operator": "スタッフ",
            "memo": "エントリ確認済み"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // 5. Fetch it back: phase advanced, history appended
    let resp = svc
        .client
        .get(svc.url(&format!("/api/contracts/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let fetched: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(fetched["phase"], "preconfirm");
    assert_eq!(fetched["history"].as_array().unwrap().len(), 2);
    assert_eq!(fetched["customerName"], "テスト顧客");

    // 6. Stats reflect the collection
    let resp = svc
        .client
        .get(svc.url("/api/contracts/stats/by-phase"))
        .send()
        .await
        .unwrap();
    let stats: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(stats["preconfirm"], 1);
    assert_eq!(stats["total"], 1);

    // 7. Health report
    let resp = svc.client.get(svc.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let health: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(health["status"], "OK");
    assert!(!health["features"].as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn put_merges_fields_over_existing_record() {
    let svc = start_service().await;

    let created: serde_json::Value = svc
        .client
        .post(svc.url("/api/contracts"))
        .json(&serde_json::json!({ "customerName": "旧名義", "agencyCode": "AIC00002" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();

    let resp = svc
        .client
        .put(svc.url(&format!("/api/contracts/{id}")))
        .json(&serde_json::json!({ "customerName": "新名義" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: serde_json::Value = resp.json().await.unwrap();

    // Merge semantics: omitted fields survive the update.
    assert_eq!(updated["customerName"], "新名義");
    assert_eq!(updated["agencyCode"], "AIC00002");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_contract_returns_404() {
    let svc = start_service().await;

    let resp = svc
        .client
        .get(svc.url("/api/contracts/CNT0"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "契約が見つかりません");

    let resp = svc
        .client
        .post(svc.url("/api/contracts/CNT0/update-status"))
        .json(&serde_json::json!({ "status": "顧客不在" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_filters_by_agency_code() {
    let svc = start_service().await;

    for agency in ["AIC00001", "AIC00001", "AIC00002"] {
        svc.client
            .post(svc.url("/api/contracts"))
            .json(&serde_json::json!({ "agencyCode": agency }))
            .send()
            .await
            .unwrap();
        // Id assignment is epoch-millis-derived; avoid collisions.
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let listed: serde_json::Value = svc
        .client
        .get(svc.url("/api/contracts?agencyCode=AIC00001"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let stats: serde_json::Value = svc
        .client
        .get(svc.url("/api/contracts/stats/by-phase?agencyCode=AIC00002"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["entry"], 1);
}
