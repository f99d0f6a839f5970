use anyhow::Result;
use clap::Parser;
use htmx_todos::{
    api::{self, AppState},
    config::{self, ApiConfig},
    db::Db,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    // initialize tracing
    config::init_tracing();
    let config = ApiConfig::parse();

    let state = AppState::new(Db::new(&config.db_path)?);
    let app = api::router(state);

    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, db = %config.db_path.display(), "todo api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
