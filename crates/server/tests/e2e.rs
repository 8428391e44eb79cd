use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::{file::player_store::FilePlayerStore, players::PlayerStore};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes;

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated temp data file per test run
    let data_file = std::env::temp_dir().join(format!("players_e2e_{}.json", Uuid::new_v4()));
    let store: Arc<dyn PlayerStore> = FilePlayerStore::new(&data_file).await?;

    let app: Router = routes::build_router(store, cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "Welcome to health route!");
    Ok(())
}

#[tokio::test]
async fn e2e_create_list_delete_roundtrip() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // POST / -> 201 with the generated id plus the supplied fields
    let res = c
        .post(format!("{}/", app.base_url))
        .json(&json!({"name": "Alice", "country": "FR", "rank": 3}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created["id"].as_str().expect("generated id").to_string();
    assert_eq!(created["name"], "Alice");
    assert_eq!(created["country"], "FR");
    assert_eq!(created["rank"], 3);

    // GET / includes the new record
    let res = c.get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let all = res.json::<Vec<Value>>().await?;
    assert!(all.iter().any(|p| p == &created));

    // GET /:id yields an identical record
    let res = c.get(format!("{}/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    // DELETE -> 203 with an empty body
    let res = c.delete(format!("{}/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NON_AUTHORITATIVE_INFORMATION);
    assert_eq!(res.text().await?, "");

    // gone afterwards
    let res = c.get(format!("{}/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Player not found");
    Ok(())
}

#[tokio::test]
async fn e2e_put_upserts() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // miss: 200, record created under a brand-new id (the path id is only
    // used to look up)
    let res = c
        .put(format!("{}/no-such-id", app.base_url))
        .json(&json!({"name": "Bob", "rank": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created = res.json::<Value>().await?;
    let id = created["id"].as_str().expect("generated id").to_string();
    assert_ne!(id, "no-such-id");
    assert_eq!(created["name"], "Bob");

    // hit: 200, partial update in place
    let res = c
        .put(format!("{}/{}", app.base_url, id))
        .json(&json!({"rank": 7}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["name"], "Bob");
    assert_eq!(updated["rank"], 7);

    // still a single record
    let all = c
        .get(format!("{}/", app.base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(all.len(), 1);
    Ok(())
}

#[tokio::test]
async fn e2e_patch_partial_and_idempotent() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let created = c
        .post(format!("{}/", app.base_url))
        .json(&json!({"name": "X", "country": "US", "rank": 1}))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let id = created["id"].as_str().expect("generated id").to_string();

    // only the supplied field changes
    let res = c
        .patch(format!("{}/{}", app.base_url, id))
        .json(&json!({"rank": 5}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let first = res.json::<Value>().await?;
    assert_eq!(first["name"], "X");
    assert_eq!(first["country"], "US");
    assert_eq!(first["rank"], 5);

    // same patch again: 200 and identical record
    let res = c
        .patch(format!("{}/{}", app.base_url, id))
        .json(&json!({"rank": 5}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, first);

    // null leaves the stored value unchanged
    let res = c
        .patch(format!("{}/{}", app.base_url, id))
        .json(&json!({"name": null}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["name"], "X");
    Ok(())
}

#[tokio::test]
async fn e2e_not_found_paths() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(format!("{}/ghost", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "Player not found");

    let res = c
        .patch(format!("{}/ghost", app.base_url))
        .json(&json!({"rank": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "Player not found");

    let res = c.delete(format!("{}/ghost", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "Player not found");
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_creates_yield_distinct_ids() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let n = 10;
    let mut handles = Vec::with_capacity(n);
    for i in 0..n {
        let c = c.clone();
        let url = format!("{}/", app.base_url);
        handles.push(tokio::spawn(async move {
            c.post(url).json(&json!({"rank": i})).send().await
        }));
    }

    let mut ids = std::collections::HashSet::new();
    for h in handles {
        let res = h.await??;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
        let body = res.json::<Value>().await?;
        ids.insert(body["id"].as_str().expect("generated id").to_string());
    }
    assert_eq!(ids.len(), n);

    let all = c
        .get(format!("{}/", app.base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(all.len(), n);
    Ok(())
}
