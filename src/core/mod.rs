//! Core模块 - 包含所有核心业务逻辑

pub mod models;
pub mod ingest;
pub mod route_selector;
pub mod remote;
pub mod repository;
pub mod controller;
