#![allow(dead_code)]

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use reqwest::header::CONTENT_TYPE;
use symptom_triage::{http, Config, PredictionService};
use tokio::net::TcpListener;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_config() -> Config {
    Config {
        training_path: fixture("Training.csv"),
        testing_path: fixture("Testing.csv"),
        severity_path: fixture("symptom_severity.csv"),
        description_path: fixture("symptom_Description.csv"),
        precaution_path: fixture("symptom_precaution.csv"),
        ..Config::default()
    }
}

/// Serves `service` on an ephemeral loopback port.
pub async fn serve(service: PredictionService) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = http::router(Arc::new(service));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }

    async fn read(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap();
        Self { status, body }
    }
}

pub async fn health(addr: SocketAddr) -> Reply {
    let response = reqwest::Client::new()
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();

    Reply::read(response).await
}

/// Posts `body` verbatim as JSON, so malformed payloads reach the server too.
pub async fn predict(addr: SocketAddr, body: &str) -> Reply {
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/predict"))
        .header(CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .send()
        .await
        .unwrap();

    Reply::read(response).await
}
