//! 远端报文到本地实体的转换

use crate::core::models::{Driver, RemoteData, RemoteDriver, RemoteRoute, Route};
use thiserror::Error;

/// 转换失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// 全名无法拆分出名和姓
    #[error("Driver {id} has a malformed name: \"{name}\"")]
    MalformedName { id: i64, name: String },
}

/// 转换后的整批数据
#[derive(Debug, Clone, Default)]
pub struct IngestedData {
    pub drivers: Vec<Driver>,
    pub routes: Vec<Route>,
}

/// 按空格拆分全名：第一段为名，第二段为姓，多余的段被忽略
pub fn split_full_name(name: &str) -> Option<(String, String)> {
    let mut parts = name.split(' ');
    let first = parts.next().filter(|s| !s.is_empty())?;
    let last = parts.next().filter(|s| !s.is_empty())?;
    Some((first.to_string(), last.to_string()))
}

/// 远端司机 -> 本地司机
pub fn to_driver(remote: &RemoteDriver) -> Result<Driver, IngestError> {
    let (first_name, last_name) =
        split_full_name(&remote.name).ok_or_else(|| IngestError::MalformedName {
            id: remote.id,
            name: remote.name.clone(),
        })?;

    Ok(Driver {
        id: remote.id,
        first_name,
        last_name,
    })
}

/// 远端线路 -> 本地线路
pub fn to_route(remote: &RemoteRoute) -> Route {
    Route {
        id: remote.id,
        route_type: remote.route_type.into(),
        name: remote.name.clone(),
    }
}

/// 转换整批报文，任一司机姓名无效则整体失败
pub fn transform(data: &RemoteData) -> Result<IngestedData, IngestError> {
    let drivers = data
        .drivers
        .iter()
        .map(to_driver)
        .collect::<Result<Vec<_>, _>>()?;
    let routes = data.routes.iter().map(to_route).collect();

    Ok(IngestedData { drivers, routes })
}
