mod support;

use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = support::build_app().await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {e}");
        }
    });
    Ok(TestApp { base_url: format!("http://{addr}") })
}

#[tokio::test]
async fn e2e_health_and_openapi() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"status": "ok"}));

    let doc: Value = client.get(format!("{}/api-docs/openapi.json", app.base_url)).send().await?.json().await?;
    assert!(doc["paths"]["/api/petsitters/search"].is_object());
    Ok(())
}

#[tokio::test]
async fn e2e_cookie_session_reaches_protected_routes() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::builder().cookie_store(true).build()?;

    let res = client.get(format!("{}/api/pets", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert!(body["message"].is_string());

    let res = client
        .post(format!("{}/api/auth/register", app.base_url))
        .json(&json!({"firstName": "Eve", "lastName": "Tester", "email": "eve@example.com", "password": support::PASSWORD}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = client
        .post(format!("{}/api/pets", app.base_url))
        .json(&json!({"name": "Kiwi", "type": "Bird", "size": "Small", "age": "Adult"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let pets: Value = client.get(format!("{}/api/pets", app.base_url)).send().await?.json().await?;
    assert_eq!(pets[0]["name"], "Kiwi");
    assert_eq!(pets[0]["type"], "Bird");

    let res = client.post(format!("{}/api/auth/logout", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = client.get(format!("{}/api/pets", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}
