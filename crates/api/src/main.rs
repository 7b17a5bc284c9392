#[tokio::main]
async fn main() -> anyhow::Result<()> {
    figurehub_observability::init();

    let config = figurehub_infra::AppConfig::from_env()?;
    figurehub_api::server::run(config).await
}
