//! 数据仓库
//!
//! 连接远端数据源和本地数据库，所有操作都是异步的。

use crate::core::models::{Driver, RemoteData, Route};
use crate::core::remote::RemoteDataSource;
use crate::storage::database::Database;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// 司机数据仓库
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// 从远端接口拉取数据
    async fn fetch_remote_data(&self) -> Result<RemoteData>;

    /// 本地所有司机
    async fn drivers(&self) -> Result<Vec<Driver>>;

    /// 本地单个司机
    async fn driver(&self, driver_id: i64) -> Result<Option<Driver>>;

    /// 本地所有线路
    async fn routes(&self) -> Result<Vec<Route>>;

    async fn insert_driver(&self, driver: Driver) -> Result<()>;

    async fn insert_route(&self, route: Route) -> Result<()>;
}

/// 基于 SQLite 的仓库实现
pub struct SqliteDriverRepository {
    remote: RemoteDataSource,
    db: Arc<Mutex<Database>>,
}

impl SqliteDriverRepository {
    pub fn new(remote: RemoteDataSource, db: Database) -> Self {
        Self {
            remote,
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// 在阻塞线程池中访问数据库
    async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let guard = db.lock().map_err(|_| anyhow!("数据库锁已损坏"))?;
            f(&guard)
        })
        .await?
    }
}

#[async_trait]
impl DriverRepository for SqliteDriverRepository {
    async fn fetch_remote_data(&self) -> Result<RemoteData> {
        self.remote.fetch().await
    }

    async fn drivers(&self) -> Result<Vec<Driver>> {
        self.with_db(|db| db.load_drivers()).await
    }

    async fn driver(&self, driver_id: i64) -> Result<Option<Driver>> {
        self.with_db(move |db| db.load_driver(driver_id)).await
    }

    async fn routes(&self) -> Result<Vec<Route>> {
        self.with_db(|db| db.load_routes()).await
    }

    async fn insert_driver(&self, driver: Driver) -> Result<()> {
        self.with_db(move |db| db.insert_driver(&driver)).await
    }

    async fn insert_route(&self, route: Route) -> Result<()> {
        self.with_db(move |db| db.insert_route(&route)).await
    }
}
