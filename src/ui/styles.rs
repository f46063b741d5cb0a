//! 样式定义

use crate::core::models::RouteType;
use eframe::egui::{self, Color32, Rounding, Stroke};

/// 颜色主题
pub struct Theme {
    pub primary: Color32,
    pub secondary: Color32,
    pub error: Color32,
    pub card_bg: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color32::from_rgb(66, 133, 244),    // 蓝色
            secondary: Color32::from_rgb(156, 156, 156), // 灰色
            error: Color32::from_rgb(234, 67, 53),       // 红色
            card_bg: Color32::from_rgba_unmultiplied(66, 133, 244, 12),
        }
    }
}

impl Theme {
    /// 线路类型对应的颜色
    pub fn route_type_color(&self, route_type: RouteType) -> Color32 {
        match route_type {
            RouteType::C => Color32::from_rgb(52, 168, 83), // 绿色
            RouteType::I => Color32::from_rgb(251, 188, 4), // 黄色
            RouteType::R => self.primary,
        }
    }
}

/// 圆角设置
pub fn default_rounding() -> Rounding {
    Rounding::same(8.0)
}

/// 按钮样式
pub fn button_style(visuals: &mut egui::Visuals) {
    visuals.widgets.inactive.rounding = default_rounding();
    visuals.widgets.hovered.rounding = default_rounding();
    visuals.widgets.active.rounding = default_rounding();
}

/// 卡片边框
pub fn card_stroke() -> Stroke {
    Stroke::new(1.0, Color32::from_gray(200))
}

/// 卡片外框
pub fn card_frame(fill: Color32) -> egui::Frame {
    egui::Frame::none()
        .fill(fill)
        .stroke(card_stroke())
        .rounding(default_rounding())
        .inner_margin(egui::Margin::same(8.0))
}

/// 标签 / 值 一行
pub fn label_value_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.label(egui::RichText::new(value).strong());
    });
}
