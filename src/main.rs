use anyhow::Context;
use todo_feed::{config, state, store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    todo_feed::init_tracing("todo_feed=info,tower_http=info");

    let config = config::Config::from_env()?;

    let store = store::connect(&config)
        .await
        .context("Error connecting DB")?;

    let state = state::AppState::new(store);

    let app = todo_feed::app(state);

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("could not bind {}", config.addr()))?;

    tracing::info!("server is chilling at http://{}", config.addr());

    axum::serve(listener, app).await?;

    Ok(())
}
