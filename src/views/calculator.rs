//! Pace calculator view.

use eframe::egui;
use egui::{Color32, RichText, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};

use crate::calculator::{compute, format_time, CalculatorInput, CalculatorResult, DistanceUnit};

#[derive(Debug, Default)]
pub struct CalculatorView {
    pub input: CalculatorInput,
}

impl CalculatorView {
    pub fn show(&mut self, ui: &mut Ui) {
        ui.heading("Калькулятор темпа");
        ui.label(RichText::new("Темп, скорость и прогноз на дистанции.").color(Color32::GRAY));
        ui.add_space(16.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            self.show_inputs(ui);

            // Recomputed every frame from whatever is in the fields.
            let result = compute(&self.input);

            ui.add_space(16.0);
            show_results(ui, &result);
            ui.add_space(16.0);
            show_predictions(ui, &result);
        });
    }

    fn show_inputs(&mut self, ui: &mut Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.label(RichText::new("Дистанция").strong());
            ui.horizontal(|ui| {
                ui.add(
                    TextEdit::singleline(&mut self.input.distance)
                        .hint_text("0")
                        .desired_width(120.0),
                );
                egui::ComboBox::from_id_salt("distance_unit")
                    .selected_text(self.input.unit.label())
                    .show_ui(ui, |ui| {
                        for unit in DistanceUnit::ALL {
                            ui.selectable_value(&mut self.input.unit, unit, unit.label());
                        }
                    });
            });

            ui.add_space(8.0);
            ui.label(RichText::new("Время").strong());
            ui.horizontal(|ui| {
                time_field(ui, &mut self.input.hours, "ч");
                time_field(ui, &mut self.input.minutes, "мин");
                time_field(ui, &mut self.input.seconds, "сек");
            });
        });
    }
}

fn time_field(ui: &mut Ui, value: &mut String, unit: &str) {
    ui.add(TextEdit::singleline(value).hint_text("00").desired_width(48.0));
    ui.label(RichText::new(unit).color(Color32::GRAY));
}

fn show_results(ui: &mut Ui, result: &CalculatorResult) {
    ui.columns(2, |columns| {
        result_card(
            &mut columns[0],
            "Темп",
            &result.pace_display(),
            "/км",
            Color32::from_rgb(52, 211, 153),
        );
        result_card(
            &mut columns[1],
            "Скорость",
            &result.speed_display(),
            "км/ч",
            Color32::from_rgb(96, 165, 250),
        );
    });
}

fn result_card(ui: &mut Ui, label: &str, value: &str, unit: &str, accent: Color32) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
        ui.horizontal(|ui| {
            ui.label(RichText::new(value).size(36.0).monospace().color(accent));
            ui.label(RichText::new(unit).color(Color32::GRAY));
        });
    });
}

fn show_predictions(ui: &mut Ui, result: &CalculatorResult) {
    ui.label(RichText::new("Прогноз результатов").strong());
    ui.add_space(4.0);

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::remainder())
        .column(Column::auto().at_least(120.0))
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.strong("Дистанция");
            });
            header.col(|ui| {
                ui.strong("Время");
            });
        })
        .body(|mut body| {
            for prediction in &result.predictions {
                body.row(24.0, |mut row| {
                    row.col(|ui| {
                        ui.label(prediction.distance.label);
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(format_time(prediction.seconds)).monospace());
                    });
                });
            }
        });
}
