use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::shared::config::LoggingConfig;

/// Инициализация системы трассировки (tracing)
///
/// Логи пишутся в:
/// - stderr (с цветами), чтобы не мешать выводу команд в stdout
/// - файл из `logging.file` (без цветов), если он задан
pub fn initialize(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(filter_directive(
        std::env::var("RUST_LOG").ok(),
        &config.level,
    ));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let file_layer = match &config.file {
        Some(path) => {
            let log_file_path = std::path::Path::new(path);
            if let Some(dir) = log_file_path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir).map_err(|e| {
                    anyhow::anyhow!("Cannot create log directory {}: {}", dir.display(), e)
                })?;
            }
            let log_file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file_path)
                .map_err(|e| {
                    anyhow::anyhow!("Cannot open log file {}: {}", log_file_path.display(), e)
                })?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Arc::new(log_file))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Cannot initialize tracing subscriber: {}", e))?;

    tracing::debug!("Tracing initialized");
    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level with HTTP internals kept quiet
fn filter_directive(rust_log: Option<String>, level: &str) -> String {
    match rust_log {
        Some(value) if !value.trim().is_empty() => value,
        _ => format!("{},reqwest=warn,hyper=warn,hyper_util=warn", level),
    }
}
