//! 配置文件管理模块

use crate::core::models::AppConfig;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// 配置管理器
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// 创建配置管理器
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// 获取默认配置路径
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|d| d.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }

    /// 获取默认数据库路径
    pub fn default_database_path() -> PathBuf {
        project_dirs()
            .map(|d| d.data_dir().join("driver_db.sqlite"))
            .unwrap_or_else(|| PathBuf::from("driver_db.sqlite"))
    }

    /// 加载配置，文件不存在时使用默认配置
    pub fn load(&self) -> Result<AppConfig> {
        if self.config_path.exists() {
            let content = std::fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&content)
                .with_context(|| format!("配置文件格式错误: {}", self.config_path.display()))
        } else {
            Ok(AppConfig::default())
        }
    }

    /// 保存配置
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        // 确保目录存在
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// 加载配置，首次运行时写出默认配置供用户修改
    ///
    /// 已存在但格式错误的文件不会被覆盖。
    pub fn load_or_init(&self) -> Result<AppConfig> {
        if self.config_path.exists() {
            return self.load();
        }

        let config = AppConfig::default();
        self.save(&config)
            .with_context(|| format!("无法写入默认配置: {}", self.config_path.display()))?;
        tracing::info!("已生成默认配置: {}", self.config_path.display());
        Ok(config)
    }
}

/// 配置中的数据库路径，未设置时使用默认路径
pub fn resolve_database_path(config: &AppConfig) -> PathBuf {
    config
        .database_path
        .clone()
        .unwrap_or_else(ConfigManager::default_database_path)
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "driverroutes", "DriverRoutes")
}
