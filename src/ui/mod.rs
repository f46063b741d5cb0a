//! 界面模块

pub mod app;
pub mod driver_screen;
pub mod route_screen;
pub mod styles;
