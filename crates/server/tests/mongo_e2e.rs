use std::sync::Arc;

use configs::DatabaseConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::feature::repo::MongoFeatureRepository;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use server::startup;
use server::ServerState;

// Needs a real server: MONGO_TEST_URL=mongodb://localhost:27017 cargo test
fn mongo_config() -> Option<DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("MONGO_TEST_URL").ok()?;
    Some(DatabaseConfig {
        url,
        name: "feature_store_e2e".into(),
        collection: format!("features_{}", unique_suffix()),
        connect_timeout_secs: 5,
        ..DatabaseConfig::default()
    })
}

fn unique_suffix() -> String {
    models::FeatureId::new().to_hex()
}

#[tokio::test]
async fn e2e_mongo_crud_roundtrip() -> anyhow::Result<()> {
    let Some(cfg) = mongo_config() else {
        eprintln!("MONGO_TEST_URL missing; skip mongo e2e tests.");
        return Ok(());
    };

    let db = models::db::connect(&cfg).await?;
    let repo = MongoFeatureRepository::from_config(db.clone(), &cfg);
    let state = ServerState::new(Arc::new(repo), cfg.op_timeout());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let base = format!("http://{}", listener.local_addr()?);
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(startup::serve(listener, state, async move {
        let _ = stop_rx.await;
    }));

    let c = reqwest::Client::new();

    let res = c.get(format!("{base}/features")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));

    let res = c
        .post(format!("{base}/features"))
        .json(&json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [1, 2]},
            "properties": {"name": "x"}
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let id = res.json::<Value>().await?["insertedID"].as_str().unwrap_or_default().to_string();

    let all = c.get(format!("{base}/features")).send().await?.json::<Vec<Value>>().await?;
    let found = all.iter().find(|f| f["id"] == id.as_str()).expect("inserted feature listed");
    assert_eq!(found["geometry"], json!({"type": "Point", "coordinates": [1, 2]}));

    let res = c
        .put(format!("{base}/features/000000000000000000000000"))
        .json(&json!({"properties": {}}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let all = c.get(format!("{base}/features")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(all.len(), 1);

    for _ in 0..2 {
        let res = c.delete(format!("{base}/features/{id}")).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
    }
    let all = c.get(format!("{base}/features")).send().await?.json::<Vec<Value>>().await?;
    assert!(all.is_empty());

    let _ = stop_tx.send(());
    server.await??;
    db.collection::<Value>(&cfg.collection).drop(None).await?;
    Ok(())
}
