//! 数据库存储模块
//!
//! 使用SQLite缓存司机和线路，写入均为按 id 覆盖

use crate::core::models::{Driver, Route, RouteType};
use anyhow::Result;
use rusqlite::{params, Connection};
use std::path::Path;

/// 数据库管理器
pub struct Database {
    conn: Connection,
}

impl Database {
    /// 打开或创建数据库
    pub fn open(path: &Path) -> Result<Self> {
        // 确保目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_tables()?;
        Ok(db)
    }

    /// 打开内存数据库
    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.init_tables()?;
        Ok(db)
    }

    /// 初始化表结构
    fn init_tables(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            -- 司机表
            CREATE TABLE IF NOT EXISTS drivers (
                id INTEGER PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL
            );

            -- 线路表
            CREATE TABLE IF NOT EXISTS routes (
                id INTEGER PRIMARY KEY,
                type TEXT NOT NULL,
                name TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// 保存司机
    pub fn insert_driver(&self, driver: &Driver) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO drivers (id, first_name, last_name) VALUES (?1, ?2, ?3)",
            params![driver.id, driver.first_name, driver.last_name],
        )?;
        Ok(())
    }

    /// 保存线路
    pub fn insert_route(&self, route: &Route) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO routes (id, type, name) VALUES (?1, ?2, ?3)",
            params![route.id, route.route_type.as_str(), route.name],
        )?;
        Ok(())
    }

    /// 加载所有司机（按 id 顺序）
    pub fn load_drivers(&self) -> Result<Vec<Driver>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, first_name, last_name FROM drivers ORDER BY rowid")?;

        let drivers = stmt.query_map([], |row| {
            Ok(Driver {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
            })
        })?;

        drivers.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// 查询单个司机
    pub fn load_driver(&self, driver_id: i64) -> Result<Option<Driver>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, first_name, last_name FROM drivers WHERE id = ?1")?;

        let result = stmt.query_row(params![driver_id], |row| {
            Ok(Driver {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
            })
        });

        match result {
            Ok(driver) => Ok(Some(driver)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 加载所有线路
    pub fn load_routes(&self) -> Result<Vec<Route>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, type, name FROM routes ORDER BY rowid")?;

        let routes = stmt.query_map([], |row| {
            let type_str: String = row.get(1)?;
            let route_type = RouteType::parse(&type_str).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    format!("未知的线路类型: {}", type_str).into(),
                )
            })?;

            Ok(Route {
                id: row.get(0)?,
                route_type,
                name: row.get(2)?,
            })
        })?;

        routes.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn driver(id: i64, first: &str, last: &str) -> Driver {
        Driver {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    #[test]
    fn test_database_init() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("test.db");

        let db = Database::open(&db_path).unwrap();
        assert!(db_path.exists());
        assert!(db.load_drivers().unwrap().is_empty());
        assert!(db.load_routes().unwrap().is_empty());
    }

    #[test]
    fn test_driver_upsert_replaces_fields() {
        let db = Database::open_in_memory().unwrap();

        db.insert_driver(&driver(1, "Jane", "Doe")).unwrap();
        db.insert_driver(&driver(2, "John", "Roe")).unwrap();
        db.insert_driver(&driver(1, "Janet", "Dough")).unwrap();

        let drivers = db.load_drivers().unwrap();
        assert_eq!(drivers.len(), 2);
        assert_eq!(db.load_driver(1).unwrap(), Some(driver(1, "Janet", "Dough")));
        assert_eq!(db.load_driver(3).unwrap(), None);
    }

    #[test]
    fn test_route_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let route = Route {
            id: 7,
            route_type: RouteType::I,
            name: "Route I".to_string(),
        };

        db.insert_route(&route).unwrap();
        assert_eq!(db.load_routes().unwrap(), vec![route]);
    }

    #[test]
    fn test_unknown_route_type_is_error() {
        let db = Database::open_in_memory().unwrap();
        db.conn
            .execute("INSERT INTO routes (id, type, name) VALUES (1, 'X', 'bad')", [])
            .unwrap();

        assert!(db.load_routes().is_err());
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("driver_db.sqlite");

        {
            let db = Database::open(&db_path).unwrap();
            db.insert_driver(&driver(5, "Ann", "Lee")).unwrap();
        }

        let db = Database::open(&db_path).unwrap();
        assert_eq!(db.load_drivers().unwrap(), vec![driver(5, "Ann", "Lee")]);
    }
}
