use std::net::SocketAddr;

use server::state::AppState;
use tokio::net::TcpListener;

pub struct TestApp {
    pub base_url: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Serve `state` on an ephemeral localhost port.
pub async fn start_server(state: AppState) -> anyhow::Result<TestApp> {
    let app = server::startup::build_app(state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = server::startup::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}
