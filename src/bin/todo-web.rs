use anyhow::Result;
use clap::Parser;
use htmx_todos::{
    client::{web, HttpTodoApi},
    config::{self, WebConfig},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    config::init_tracing();
    let config = WebConfig::parse();

    let state = web::WebState::load(HttpTodoApi::new(config.api_url.clone())).await;
    let app = web::router(state);

    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, api = %config.api_url, "todo web listening");
    axum::serve(listener, app).await?;
    Ok(())
}
