use anyhow::Result;
use tracing::{error, info, warn};

use crate::api::QuizClient;
use crate::config::Config;
use crate::orchestrator::QuestionManager;
use crate::services::WarmupProbe;
use crate::utils::logging::{log_startup, truncate_text};

/// 应用主结构
pub struct App {
    config: Config,
    manager: QuestionManager<QuizClient>,
}

impl App {
    /// 初始化应用：打印启动信息并唤醒后端
    pub async fn initialize(config: Config, category_slug: &str) -> Result<Self> {
        log_startup(&config);

        let mut probe = WarmupProbe::new(&config);
        probe.run().await;
        if let Some(banner) = probe.banner() {
            warn!("⚠️ {}", banner.message);
            if let Some(detail) = banner.detail {
                warn!("   {}", detail);
            }
        }

        let client = QuizClient::new(&config);
        let manager = QuestionManager::new(client, category_slug);

        Ok(Self { config, manager })
    }

    /// 加载分类与题目并输出列表
    pub async fn run(&mut self) -> Result<()> {
        self.manager.load().await;

        if let Some(message) = self.manager.error() {
            error!("❌ {}", message);
            anyhow::bail!("{}", message);
        }

        print_questions(&self.manager);
        info!("日志级别: {}", self.config.log_level);
        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn print_questions(manager: &QuestionManager<QuizClient>) {
    info!("\n{}", "=".repeat(60));
    info!(
        "📚 分类 {} (ID: {:?}) 共 {} 道题目",
        manager.category_slug(),
        manager.category_id(),
        manager.questions().len()
    );
    info!("{}", "=".repeat(60));

    if manager.questions().is_empty() {
        info!("暂无题目");
        return;
    }

    for question in manager.questions() {
        info!("#{} {}", question.id, truncate_text(&question.question, 80));
        for answer in &question.answers {
            let mark = if answer.correct { " (正确)" } else { "" };
            info!("    - {}{}", answer.answer, mark);
        }
    }
}
