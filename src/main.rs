use anyhow::Result;
use quiz_admin::utils::logging;
use quiz_admin::{App, Config};
use std::path::Path;

const CONFIG_FILE: &str = "quiz-admin.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：有配置文件就读文件，再叠加环境变量
    let config_path = Path::new(CONFIG_FILE);
    let config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        Config::from_env()?
    };

    // 初始化日志
    logging::init(&config.log_level);

    let category_slug = std::env::args().nth(1).unwrap_or_else(|| "html".to_string());

    // 初始化并运行应用
    App::initialize(config, &category_slug).await?.run().await?;

    Ok(())
}
