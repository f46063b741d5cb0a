//! 司机列表页
//!
//! 右上角是按姓排序按钮，下面是可点击的司机卡片列表。

use crate::core::models::Driver;
use crate::ui::styles::{card_frame, label_value_row, Theme};
use eframe::egui::{self, Ui};

/// 司机页产生的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverScreenAction {
    None,
    Sort,
    Select(i64),
}

/// 司机列表页
pub struct DriverScreen {
    theme: Theme,
    /// 下一帧把列表滚动到顶部
    scroll_to_top: bool,
}

impl Default for DriverScreen {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            scroll_to_top: false,
        }
    }
}

impl DriverScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// 渲染司机页
    pub fn render(&mut self, ui: &mut Ui, drivers: &[Driver]) -> DriverScreenAction {
        let mut action = DriverScreenAction::None;

        // 按钮行
        ui.horizontal(|ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Sort").clicked() {
                    action = DriverScreenAction::Sort;
                    self.scroll_to_top = true;
                }
            });
        });

        ui.add_space(8.0);

        let mut scroll = egui::ScrollArea::vertical().auto_shrink([false, false]);
        if self.scroll_to_top {
            scroll = scroll.vertical_scroll_offset(0.0);
            self.scroll_to_top = false;
        }

        scroll.show(ui, |ui| {
            if drivers.is_empty() {
                ui.label(egui::RichText::new("No drivers").color(self.theme.secondary));
            }

            for driver in drivers {
                if self.render_card(ui, driver) {
                    action = DriverScreenAction::Select(driver.id);
                }
                ui.add_space(8.0);
            }
        });

        action
    }

    /// 渲染司机卡片，返回是否被点击
    fn render_card(&self, ui: &mut Ui, driver: &Driver) -> bool {
        let response = card_frame(self.theme.card_bg)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                label_value_row(ui, "Id:", &driver.id.to_string());
                ui.add_space(8.0);
                label_value_row(ui, "Name:", &driver.full_name());
            })
            .response
            .interact(egui::Sense::click());

        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        response.clicked()
    }
}
