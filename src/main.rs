use watchlog_lib::shared::{utils::init_logger, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let config = AppConfig::load()?;
    watchlog_lib::serve(config).await?;
    Ok(())
}
