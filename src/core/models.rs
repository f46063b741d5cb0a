//! 核心数据模型定义
//!
//! 本地实体（Driver / Route）、远端报文镜像（Remote*）以及界面发布的两份状态。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 线路类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteType {
    C,
    I,
    R,
}

impl RouteType {
    /// 数据库中保存的文本形式
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteType::C => "C",
            RouteType::I => "I",
            RouteType::R => "R",
        }
    }

    /// 从数据库文本解析
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "C" => Some(RouteType::C),
            "I" => Some(RouteType::I),
            "R" => Some(RouteType::R),
            _ => None,
        }
    }
}

impl std::fmt::Display for RouteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 司机 - 本地缓存实体，按 id 覆盖写入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    /// 唯一且稳定的标识
    pub id: i64,
    /// 名
    pub first_name: String,
    /// 姓
    pub last_name: String,
}

impl Driver {
    /// 界面显示用的全名
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 线路 - 本地缓存实体，按 id 覆盖写入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: i64,
    pub route_type: RouteType,
    pub name: String,
}

/// 远端接口返回的完整报文
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteData {
    pub drivers: Vec<RemoteDriver>,
    pub routes: Vec<RemoteRoute>,
}

/// 远端司机（全名尚未拆分）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteDriver {
    pub id: i64,
    pub name: String,
}

/// 远端线路
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteRoute {
    pub id: i64,
    #[serde(rename = "type")]
    pub route_type: RemoteRouteType,
    pub name: String,
}

/// 远端线路类型（报文里的 "C" / "I" / "R"）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteRouteType {
    C,
    I,
    R,
}

impl From<RemoteRouteType> for RouteType {
    fn from(value: RemoteRouteType) -> Self {
        match value {
            RemoteRouteType::C => RouteType::C,
            RemoteRouteType::I => RouteType::I,
            RemoteRouteType::R => RouteType::R,
        }
    }
}

/// 界面状态（加载中 / 出错）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub is_loading: bool,
    pub is_error: bool,
    pub error_message: Option<String>,
}

/// 界面数据 - 司机页和线路页显示的内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverUiData {
    pub drivers: Vec<Driver>,
    pub selected_driver: Option<Driver>,
    pub driver_routes: Vec<Route>,
}

/// 按姓升序排序，姓相同时保持原有相对顺序
pub fn sort_by_last_name(mut drivers: Vec<Driver>) -> Vec<Driver> {
    // Vec::sort_by 是稳定排序
    drivers.sort_by(|a, b| a.last_name.cmp(&b.last_name));
    drivers
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 接口基础地址
    pub api_base_url: String,
    /// 数据接口路径
    pub api_path: String,
    /// 本地数据库路径（为空时使用系统数据目录）
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://d49c3a78-a4f2-437d-bf72-569334dea17c.mock.pstmn.io".to_string(),
            api_path: "/data".to_string(),
            database_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(id: i64, first: &str, last: &str) -> Driver {
        Driver {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    #[test]
    fn test_sort_by_last_name_is_stable() {
        let drivers = vec![
            driver(1, "Ann", "Smith"),
            driver(2, "Bob", "Adams"),
            driver(3, "Cid", "Smith"),
            driver(4, "Dee", "Brown"),
            driver(5, "Eve", "Adams"),
        ];

        let sorted = sort_by_last_name(drivers.clone());
        let ids: Vec<i64> = sorted.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 5, 4, 1, 3]);

        // 非递减
        assert!(sorted.windows(2).all(|w| w[0].last_name <= w[1].last_name));

        // 元素集合不变
        let mut before: Vec<i64> = drivers.iter().map(|d| d.id).collect();
        let mut after = ids.clone();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_by_last_name(Vec::new()).is_empty());
    }

    #[test]
    fn test_remote_data_parses_wire_shape() {
        let json = r#"{
            "drivers": [{"id": 1, "name": "Jane Doe"}],
            "routes": [{"id": 1, "type": "C", "name": "Route A"}],
            "extra": true
        }"#;

        let data: RemoteData = serde_json::from_str(json).unwrap();
        assert_eq!(data.drivers[0].name, "Jane Doe");
        assert_eq!(data.routes[0].route_type, RemoteRouteType::C);
        assert_eq!(RouteType::from(data.routes[0].route_type), RouteType::C);
    }

    #[test]
    fn test_remote_data_requires_both_lists() {
        assert!(serde_json::from_str::<RemoteData>("{}").is_err());
        assert!(serde_json::from_str::<RemoteData>(r#"{"drivers": []}"#).is_err());
        assert!(serde_json::from_str::<RemoteData>(r#"{"routes": []}"#).is_err());
    }

    #[test]
    fn test_route_type_text_round_trip() {
        for t in [RouteType::C, RouteType::I, RouteType::R] {
            assert_eq!(RouteType::parse(t.as_str()), Some(t));
        }
        assert_eq!(RouteType::parse("X"), None);
    }
}
