//! 存储模块 - 本地数据库和配置文件

pub mod config;
pub mod database;
