use color_eyre::eyre::{eyre, Result};

use gym_manager::{
    app_state::AppState,
    get_postgres_pool,
    utils::{
        constants::{APP_ADDRESS, DATABASE_URL},
        tracing::init_tracing,
    },
    Application,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let pool = get_postgres_pool(&DATABASE_URL).await?;
    sqlx::migrate!().run(&pool).await?;

    let app_state = AppState::postgres(pool);
    let app = Application::build(app_state, &APP_ADDRESS)
        .await
        .map_err(|e| eyre!("Failed to build app: {e}"))?;

    app.run().await?;
    Ok(())
}
