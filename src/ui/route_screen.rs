//! 线路页 - 显示选中司机的线路

use crate::core::models::{Driver, Route};
use crate::ui::styles::{card_frame, label_value_row, Theme};
use eframe::egui::{self, RichText, Ui};

/// 线路页
#[derive(Default)]
pub struct RouteScreen {
    theme: Theme,
}

impl RouteScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// 渲染线路页
    pub fn render(&self, ui: &mut Ui, driver: Option<&Driver>, routes: &[Route]) {
        ui.label(RichText::new(route_title(driver)).size(18.0).strong());
        ui.add_space(8.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for route in routes {
                    card_frame(self.theme.card_bg).show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label("Type:");
                            ui.label(
                                RichText::new(route.route_type.as_str())
                                    .strong()
                                    .color(self.theme.route_type_color(route.route_type)),
                            );
                        });
                        ui.add_space(8.0);
                        label_value_row(ui, "Name:", &route.name);
                    });
                    ui.add_space(8.0);
                }
            });
    }
}

/// 线路页标题
pub fn route_title(driver: Option<&Driver>) -> String {
    match driver {
        Some(driver) => format!("Routes for {}", driver.full_name()),
        None => "Routes".to_string(),
    }
}
