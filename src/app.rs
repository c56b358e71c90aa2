use std::sync::Arc;

use eframe::{egui, App, CreationContext, Frame};
use egui::{Color32, RichText, Ui};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::coach::CoachClient;
use crate::config::AppConfig;
use crate::views::{CalculatorView, PlanView};

/// Top-level views reachable from the navigation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Calculator,
    Plan,
}

impl View {
    pub const ALL: [View; 2] = [View::Calculator, View::Plan];

    pub fn label(&self) -> &'static str {
        match self {
            View::Calculator => "Калькулятор",
            View::Plan => "Тренировки",
        }
    }

    pub fn shortcut(&self) -> egui::Key {
        match self {
            View::Calculator => egui::Key::Num1,
            View::Plan => egui::Key::Num2,
        }
    }
}

pub struct UnitedRunnersApp {
    view: View,
    calculator: CalculatorView,
    plan: PlanView,
}

impl UnitedRunnersApp {
    pub fn new(cc: &CreationContext, config: &AppConfig) -> Self {
        apply_style(&cc.egui_ctx, config.ui.font_scale);
        Self::from_config(config)
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let client = match CoachClient::new(&config.coach) {
            Ok(client) => {
                if !client.has_api_key() {
                    warn!("No Gemini API key configured, AI plans will be unavailable");
                }
                info!(model = client.model(), "Coach client ready");
                Some(Arc::new(client))
            }
            Err(e) => {
                warn!("Failed to create coach client: {}", e);
                None
            }
        };

        Self {
            view: config.ui.start_view,
            calculator: CalculatorView::default(),
            plan: PlanView::new(client),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Switch views. The calculator starts over from its seed values every
    /// time it is entered.
    pub fn switch_to(&mut self, view: View) {
        if view == self.view {
            return;
        }
        if view == View::Calculator {
            self.calculator = CalculatorView::default();
        }
        self.view = view;
    }

    fn show_navigation(&mut self, ui: &mut Ui) {
        ui.add_space(16.0);
        ui.label(
            RichText::new("UNITED RUNNERS")
                .size(20.0)
                .strong()
                .color(Color32::from_rgb(52, 211, 153)),
        );
        ui.add_space(24.0);

        for view in View::ALL {
            if ui
                .selectable_label(self.view == view, RichText::new(view.label()).size(18.0))
                .clicked()
            {
                self.switch_to(view);
            }
            ui.add_space(4.0);
        }

        ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("v{} KZ Edition", env!("CARGO_PKG_VERSION")))
                    .size(12.0)
                    .color(Color32::GRAY),
            );
        });
    }
}

impl App for UnitedRunnersApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if !ctx.wants_keyboard_input() {
            for view in View::ALL {
                if ctx.input(|i| i.key_pressed(view.shortcut())) {
                    self.switch_to(view);
                }
            }
        }

        self.plan.poll();

        egui::SidePanel::left("navigation")
            .resizable(false)
            .exact_width(200.0)
            .show(ctx, |ui| self.show_navigation(ui));

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Calculator => self.calculator.show(ui),
            View::Plan => self.plan.show(ui),
        });
    }
}

fn apply_style(ctx: &egui::Context, font_scale: f32) {
    ctx.set_visuals(egui::Visuals::dark());

    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(16.0 * font_scale, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(28.0 * font_scale, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::new(16.0 * font_scale, egui::FontFamily::Proportional),
    );
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::DistanceUnit;

    #[test]
    fn test_starts_on_configured_view() {
        let mut config = AppConfig::default();
        config.ui.start_view = View::Plan;
        let app = UnitedRunnersApp::from_config(&config);
        assert_eq!(app.view(), View::Plan);
    }

    #[test]
    fn test_calculator_resets_on_reentry() {
        let mut app = UnitedRunnersApp::from_config(&AppConfig::default());
        app.calculator.input.distance = "5000".to_string();
        app.calculator.input.unit = DistanceUnit::Meters;

        // Staying on the same view keeps the edits.
        app.switch_to(View::Calculator);
        assert_eq!(app.calculator.input.distance, "5000");

        app.switch_to(View::Plan);
        app.switch_to(View::Calculator);
        assert_eq!(app.calculator.input.distance, "10");
        assert_eq!(app.calculator.input.unit, DistanceUnit::Kilometers);
    }

    #[test]
    fn test_view_config_names() {
        assert_eq!(serde_json::to_string(&View::Plan).unwrap(), "\"plan\"");
        assert_eq!(
            serde_json::from_str::<View>("\"calculator\"").unwrap(),
            View::Calculator
        );
    }
}
