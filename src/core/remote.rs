//! 远端数据源
//!
//! 只有一个接口：GET {base_url}{path}，返回司机和线路的完整列表。

use crate::core::models::{AppConfig, RemoteData};
use anyhow::{Context, Result};

/// 远端数据源
pub struct RemoteDataSource {
    /// HTTP客户端
    client: reqwest::Client,
    /// 完整接口地址
    endpoint: String,
}

impl RemoteDataSource {
    /// 创建数据源
    pub fn new(base_url: &str, path: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: join_endpoint(base_url, path),
        }
    }

    /// 从配置创建数据源
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.api_base_url, &config.api_path)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 拉取远端数据
    pub async fn fetch(&self) -> Result<RemoteData> {
        tracing::debug!("请求远端数据: {}", self.endpoint);

        let data = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .with_context(|| format!("Could not reach {}", self.endpoint))?
            .error_for_status()
            .context("The server returned an error status")?
            .json::<RemoteData>()
            .await
            .context("The server sent data that could not be read")?;

        tracing::info!(
            "远端数据: {} 名司机, {} 条线路",
            data.drivers.len(),
            data.routes.len()
        );
        Ok(data)
    }
}

/// 拼接基础地址和路径，避免出现双斜杠
fn join_endpoint(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim().trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}
