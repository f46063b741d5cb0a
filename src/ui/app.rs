//! 主应用程序
//!
//! 顶部标题栏 + 司机页 / 线路页两个页面，加载中和出错时覆盖显示。
//! 界面只读取控制器发布的状态，所有命令都交给 tokio 运行时异步执行。

use crate::core::controller::DriverController;
use crate::core::models::{DriverUiData, ViewState};
use crate::ui::driver_screen::{DriverScreen, DriverScreenAction};
use crate::ui::route_screen::RouteScreen;
use crate::ui::styles::{button_style, Theme};
use eframe::egui::{self, RichText};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;

const GENERIC_ERROR_MESSAGE: &str = "Something went wrong while loading drivers.";

/// 页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Driver,
    Route,
}

impl AppScreen {
    /// 标题栏文字
    pub fn title(&self) -> &'static str {
        match self {
            AppScreen::Driver => "Drivers",
            AppScreen::Route => "Routes",
        }
    }
}

/// 页面栈，栈顶为当前页
#[derive(Debug)]
pub struct Navigation {
    back_stack: Vec<AppScreen>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            back_stack: vec![AppScreen::Driver],
        }
    }
}

impl Navigation {
    pub fn current(&self) -> AppScreen {
        self.back_stack.last().copied().unwrap_or(AppScreen::Driver)
    }

    pub fn can_navigate_back(&self) -> bool {
        self.back_stack.len() > 1
    }

    pub fn navigate(&mut self, screen: AppScreen) {
        self.back_stack.push(screen);
    }

    /// 返回上一页，起始页不可返回
    pub fn navigate_up(&mut self) {
        if self.can_navigate_back() {
            self.back_stack.pop();
        }
    }
}

/// 主应用程序
pub struct DriverRoutesApp {
    runtime: Handle,
    controller: Arc<DriverController>,
    view_state: watch::Receiver<ViewState>,
    ui_data: watch::Receiver<DriverUiData>,
    theme: Theme,
    navigation: Navigation,
    driver_screen: DriverScreen,
    route_screen: RouteScreen,
}

impl DriverRoutesApp {
    /// 创建应用并触发首次加载
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: Handle,
        controller: Arc<DriverController>,
    ) -> Self {
        cc.egui_ctx.style_mut(|style| button_style(&mut style.visuals));

        let app = Self {
            view_state: controller.subscribe_view_state(),
            ui_data: controller.subscribe_ui_data(),
            runtime,
            controller,
            theme: Theme::default(),
            navigation: Navigation::default(),
            driver_screen: DriverScreen::new(),
            route_screen: RouteScreen::new(),
        };

        app.spawn_repaint_on_change(cc.egui_ctx.clone());

        let controller = Arc::clone(&app.controller);
        app.runtime.spawn(async move {
            controller.load_data().await;
        });

        app
    }

    /// 状态变化时请求重绘
    fn spawn_repaint_on_change(&self, ctx: egui::Context) {
        let mut view_state = self.controller.subscribe_view_state();
        let mut ui_data = self.controller.subscribe_ui_data();

        self.runtime.spawn(async move {
            loop {
                tokio::select! {
                    changed = view_state.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    changed = ui_data.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
                ctx.request_repaint();
            }
        });
    }

    /// 排序司机
    fn sort_drivers(&self) {
        let controller = Arc::clone(&self.controller);
        self.runtime.spawn(async move {
            if let Err(e) = controller.sort_drivers().await {
                tracing::error!("排序失败: {:#}", e);
            }
        });
    }

    /// 选中司机并进入线路页
    fn select_driver(&mut self, driver_id: i64) {
        let controller = Arc::clone(&self.controller);
        self.runtime.spawn(async move {
            if let Err(e) = controller.select_driver(driver_id).await {
                tracing::error!("选择司机 {} 失败: {:#}", driver_id, e);
            }
        });
        self.navigation.navigate(AppScreen::Route);
    }
}

impl eframe::App for DriverRoutesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view_state = self.view_state.borrow_and_update().clone();
        let ui_data = self.ui_data.borrow_and_update().clone();
        let screen = self.navigation.current();

        // 顶部标题栏
        egui::TopBottomPanel::top("app_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if self.navigation.can_navigate_back()
                    && ui.button("⬅").on_hover_text("Back").clicked()
                {
                    self.navigation.navigate_up();
                }
                ui.heading(RichText::new(screen.title()).color(self.theme.primary));
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if view_state.is_loading {
                render_loading_view(ui);
                return;
            }

            if view_state.is_error {
                let message = view_state
                    .error_message
                    .as_deref()
                    .unwrap_or(GENERIC_ERROR_MESSAGE);
                render_error_view(ui, &self.theme, message);
                return;
            }

            match screen {
                AppScreen::Driver => match self.driver_screen.render(ui, &ui_data.drivers) {
                    DriverScreenAction::Sort => self.sort_drivers(),
                    DriverScreenAction::Select(driver_id) => self.select_driver(driver_id),
                    DriverScreenAction::None => {}
                },
                AppScreen::Route => {
                    self.route_screen.render(
                        ui,
                        ui_data.selected_driver.as_ref(),
                        &ui_data.driver_routes,
                    );
                }
            }
        });
    }
}

/// 渲染加载视图
fn render_loading_view(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space((ui.available_height() / 2.0 - 16.0).max(0.0));
        ui.spinner();
    });
}

/// 渲染错误视图，"Finish" 按钮关闭窗口
fn render_error_view(ui: &mut egui::Ui, theme: &Theme, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.label(RichText::new(message).color(theme.error));
        ui.add_space(16.0);
        if ui.button("Finish").clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_titles() {
        assert_eq!(AppScreen::Driver.title(), "Drivers");
        assert_eq!(AppScreen::Route.title(), "Routes");
    }

    #[test]
    fn test_navigation_back_stack() {
        let mut navigation = Navigation::default();
        assert_eq!(navigation.current(), AppScreen::Driver);
        assert!(!navigation.can_navigate_back());

        navigation.navigate_up();
        assert_eq!(navigation.current(), AppScreen::Driver);

        navigation.navigate(AppScreen::Route);
        assert_eq!(navigation.current(), AppScreen::Route);
        assert!(navigation.can_navigate_back());

        navigation.navigate_up();
        assert_eq!(navigation.current(), AppScreen::Driver);
    }
}
