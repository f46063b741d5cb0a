//! Driver Routes - 司机与线路查看工具
//!
//! 启动时从远端接口拉取司机和线路，缓存到本地 SQLite，
//! 界面上按司机查看其对应线路。

pub mod core;
pub mod storage;
pub mod ui;

use crate::core::controller::DriverController;
use crate::core::remote::RemoteDataSource;
use crate::core::repository::SqliteDriverRepository;
use crate::storage::config::{resolve_database_path, ConfigManager};
use crate::storage::database::Database;
use anyhow::{Context, Result};
use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 加载 CJK 后备字体，远端返回的中日韩姓名才能正常显示
fn setup_custom_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();

    let font_paths = [
        "C:/Windows/Fonts/msyh.ttc",
        "/System/Library/Fonts/PingFang.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    ];

    let mut font_loaded = false;
    for path in &font_paths {
        if let Ok(font_data) = std::fs::read(path) {
            fonts
                .font_data
                .insert("cjk_fallback".to_owned(), FontData::from_owned(font_data).into());

            // 作为后备字体追加在默认字体之后
            for family in [FontFamily::Proportional, FontFamily::Monospace] {
                fonts
                    .families
                    .entry(family)
                    .or_default()
                    .push("cjk_fallback".to_owned());
            }

            font_loaded = true;
            tracing::info!("已加载后备字体: {}", path);
            break;
        }
    }

    if !font_loaded {
        tracing::warn!("未找到 CJK 字体，部分姓名可能显示为方块");
    }

    ctx.set_fonts(fonts);
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("启动 Driver Routes");

    let config_manager = ConfigManager::new(ConfigManager::default_path());
    let config = config_manager.load_or_init()?;

    let db_path = resolve_database_path(&config);
    let db = Database::open(&db_path)
        .with_context(|| format!("无法打开数据库: {}", db_path.display()))?;
    tracing::info!("本地数据库: {}", db_path.display());

    let remote = RemoteDataSource::from_config(&config);
    tracing::info!("数据接口: {}", remote.endpoint());

    let repository = Arc::new(SqliteDriverRepository::new(remote, db));
    let controller = Arc::new(DriverController::new(repository));

    let runtime = tokio::runtime::Runtime::new().context("无法创建异步运行时")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 800.0])
            .with_min_inner_size([360.0, 480.0])
            .with_title("Driver Routes"),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    let app_controller = Arc::clone(&controller);
    eframe::run_native(
        "DriverRoutes",
        options,
        Box::new(move |cc| {
            setup_custom_fonts(&cc.egui_ctx);
            Ok(Box::new(ui::app::DriverRoutesApp::new(
                cc,
                handle,
                app_controller,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI启动失败: {}", e))?;

    // 窗口关闭前发起的写入需要落盘
    runtime.block_on(controller.flush_pending_writes());

    Ok(())
}
