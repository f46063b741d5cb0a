//! 应用状态控制器
//!
//! 负责首次加载（拉取 -> 转换 -> 写入 -> 发布）、按姓排序和线路选择，
//! 持有界面状态和界面数据这两份唯一的可观察状态。

use crate::core::ingest;
use crate::core::models::{sort_by_last_name, DriverUiData, ViewState};
use crate::core::repository::DriverRepository;
use crate::core::route_selector::{select_driver_routes, RouteSelectionError};
use anyhow::Context;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinSet;

/// 选择司机失败
#[derive(Debug, Error)]
pub enum SelectDriverError {
    /// 读取本地数据失败
    #[error(transparent)]
    Store(#[from] anyhow::Error),
    /// 线路数据不满足选择规则
    #[error(transparent)]
    Selection(#[from] RouteSelectionError),
}

/// 应用状态控制器
pub struct DriverController {
    repository: Arc<dyn DriverRepository>,
    /// 界面状态（加载中 / 出错）
    view_state: watch::Sender<ViewState>,
    /// 界面数据
    ui_data: watch::Sender<DriverUiData>,
    /// 尚未完成的写入任务
    pending_writes: Mutex<JoinSet<()>>,
}

impl DriverController {
    pub fn new(repository: Arc<dyn DriverRepository>) -> Self {
        Self {
            repository,
            view_state: watch::Sender::new(ViewState::default()),
            ui_data: watch::Sender::new(DriverUiData::default()),
            pending_writes: Mutex::new(JoinSet::new()),
        }
    }

    /// 订阅界面状态
    pub fn subscribe_view_state(&self) -> watch::Receiver<ViewState> {
        self.view_state.subscribe()
    }

    /// 订阅界面数据
    pub fn subscribe_ui_data(&self) -> watch::Receiver<DriverUiData> {
        self.ui_data.subscribe()
    }

    /// 当前界面状态快照
    pub fn view_state(&self) -> ViewState {
        self.view_state.borrow().clone()
    }

    /// 当前界面数据快照
    pub fn ui_data(&self) -> DriverUiData {
        self.ui_data.borrow().clone()
    }

    fn set_loading(&self, is_loading: bool) {
        self.view_state.send_modify(|state| state.is_loading = is_loading);
    }

    fn publish_error(&self, message: String) {
        tracing::error!("加载数据失败: {}", message);
        self.view_state.send_modify(|state| {
            state.is_error = true;
            state.error_message = Some(message);
        });
    }

    /// 从远端拉取数据并写入本地数据库
    ///
    /// 每条记录的写入都是独立任务，不等待写入完成就发布司机列表。
    /// 失败时只发布错误状态，界面数据保持原样。
    pub async fn load_data(&self) {
        self.set_loading(true);

        match self.repository.fetch_remote_data().await {
            Ok(remote) => match ingest::transform(&remote) {
                Ok(data) => {
                    let mut writes = self.pending_writes.lock().await;

                    for driver in data.drivers.iter().cloned() {
                        let repository = Arc::clone(&self.repository);
                        writes.spawn(async move {
                            let id = driver.id;
                            if let Err(e) = repository.insert_driver(driver).await {
                                tracing::error!("保存司机 {} 失败: {:#}", id, e);
                            }
                        });
                    }

                    for route in data.routes {
                        let repository = Arc::clone(&self.repository);
                        writes.spawn(async move {
                            let id = route.id;
                            if let Err(e) = repository.insert_route(route).await {
                                tracing::error!("保存线路 {} 失败: {:#}", id, e);
                            }
                        });
                    }
                    drop(writes);

                    tracing::info!("发布 {} 名司机", data.drivers.len());
                    self.ui_data.send_modify(|ui_data| ui_data.drivers = data.drivers);
                }
                Err(e) => self.publish_error(e.to_string()),
            },
            Err(e) => self.publish_error(format!("{:#}", e)),
        }

        self.set_loading(false);
    }

    /// 等待所有写入任务完成
    pub async fn flush_pending_writes(&self) {
        let mut writes = self.pending_writes.lock().await;
        while let Some(result) = writes.join_next().await {
            if let Err(e) = result {
                tracing::error!("写入任务异常结束: {}", e);
            }
        }
    }

    /// 按姓对司机排序
    ///
    /// 以数据库中已保存的司机为准，不修改数据库。
    pub async fn sort_drivers(&self) -> anyhow::Result<()> {
        let drivers = self.repository.drivers().await?;
        let sorted = sort_by_last_name(drivers);
        self.ui_data.send_modify(|ui_data| ui_data.drivers = sorted);
        Ok(())
    }

    /// 选中司机并计算其线路
    ///
    /// 读取失败时界面数据不变。线路不满足规则时仍发布被点击的司机，
    /// 线路列表置空，线路页不会显示上一位司机的线路。
    pub async fn select_driver(&self, driver_id: i64) -> Result<(), SelectDriverError> {
        let (driver, routes) = tokio::join!(
            self.repository.driver(driver_id),
            self.repository.routes()
        );
        let driver = driver.context("读取司机失败")?;
        let routes = routes.context("读取线路失败")?;

        let driver_routes = match select_driver_routes(driver_id, &routes) {
            Ok(driver_routes) => driver_routes,
            Err(e) => {
                self.ui_data.send_modify(|ui_data| {
                    ui_data.selected_driver = driver;
                    ui_data.driver_routes.clear();
                });
                return Err(e.into());
            }
        };

        tracing::debug!("司机 {} 匹配到 {} 条线路", driver_id, driver_routes.len());
        self.ui_data.send_modify(|ui_data| {
            ui_data.selected_driver = driver;
            ui_data.driver_routes = driver_routes;
        });
        Ok(())
    }
}
