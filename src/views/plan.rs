//! Training view: AI plan, strength exercises and running drills.

use std::sync::Arc;

use chrono::Local;
use eframe::egui;
use egui::{Color32, RichText, TextEdit, Ui};
use tracing::warn;

use crate::coach::{CoachClient, GeneratedPlan, PlanJob, PlanRequest, RunnerLevel, UNAVAILABLE_TEXT};
use crate::training::{running_drills, strength_exercises, Drill, Exercise, Motion, DRILL_ADVICE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanTab {
    #[default]
    Ai,
    Strength,
    Drills,
}

impl PlanTab {
    pub const ALL: [PlanTab; 3] = [PlanTab::Ai, PlanTab::Strength, PlanTab::Drills];

    pub fn label(&self) -> &'static str {
        match self {
            PlanTab::Ai => "AI План",
            PlanTab::Strength => "ОФП (Сила)",
            PlanTab::Drills => "СБУ (Техника)",
        }
    }
}

/// Where the AI tab is. Only one job can be in flight because the generate
/// button is not shown while loading.
pub enum PlanState {
    Idle,
    Loading(PlanJob),
    Ready(GeneratedPlan),
}

impl PlanState {
    pub fn is_loading(&self) -> bool {
        matches!(self, PlanState::Loading(_))
    }
}

pub struct PlanView {
    pub tab: PlanTab,
    pub request: PlanRequest,
    state: PlanState,
    client: Option<Arc<CoachClient>>,
    exercises: Vec<Exercise>,
    drills: Vec<Drill>,
}

impl PlanView {
    pub fn new(client: Option<Arc<CoachClient>>) -> Self {
        Self {
            tab: PlanTab::Ai,
            request: PlanRequest::default(),
            state: PlanState::Idle,
            client,
            exercises: strength_exercises(),
            drills: running_drills(),
        }
    }

    pub fn state(&self) -> &PlanState {
        &self.state
    }

    /// Start a plan job. Ignored while one is already running.
    pub fn generate(&mut self, ctx: Option<egui::Context>) {
        if self.state.is_loading() {
            return;
        }

        self.state = match &self.client {
            Some(client) => PlanState::Loading(PlanJob::spawn(
                Arc::clone(client),
                self.request.clone(),
                move || {
                    if let Some(ctx) = ctx {
                        ctx.request_repaint();
                    }
                },
            )),
            None => {
                warn!("Coach client unavailable, showing fallback");
                PlanState::Ready(GeneratedPlan {
                    text: UNAVAILABLE_TEXT.to_string(),
                    generated_at: Local::now(),
                })
            }
        };
    }

    /// Pick up a finished job, if any.
    pub fn poll(&mut self) {
        if let PlanState::Loading(job) = &self.state {
            if let Some(plan) = job.poll() {
                self.state = PlanState::Ready(plan);
            }
        }
    }

    pub fn reset(&mut self) {
        if !self.state.is_loading() {
            self.state = PlanState::Idle;
        }
    }

    pub fn show(&mut self, ui: &mut Ui) {
        ui.heading("Тренировки");
        ui.label(RichText::new("План, сила и техника.").color(Color32::GRAY));
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            for tab in PlanTab::ALL {
                ui.selectable_value(&mut self.tab, tab, tab.label());
            }
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| match self.tab {
            PlanTab::Ai => self.show_ai(ui),
            PlanTab::Strength => self.show_strength(ui),
            PlanTab::Drills => self.show_drills(ui),
        });
    }

    fn show_ai(&mut self, ui: &mut Ui) {
        let mut generate = false;
        let mut reset = false;

        match &self.state {
            PlanState::Idle => {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());

                    ui.label(RichText::new("Уровень").strong());
                    egui::ComboBox::from_id_salt("runner_level")
                        .selected_text(self.request.level.label())
                        .show_ui(ui, |ui| {
                            for level in RunnerLevel::ALL {
                                ui.selectable_value(&mut self.request.level, level, level.label());
                            }
                        });

                    ui.add_space(8.0);
                    ui.label(RichText::new("Цель").strong());
                    ui.add(
                        TextEdit::singleline(&mut self.request.goal)
                            .hint_text("Например: 10 км быстрее 50 минут")
                            .desired_width(f32::INFINITY),
                    );

                    ui.add_space(12.0);
                    generate = ui.button("Создать План (AI)").clicked();
                });
            }
            PlanState::Loading(_) => {
                ui.add_space(24.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("AI тренер составляет план...");
                });
            }
            PlanState::Ready(plan) => {
                ui.label(
                    RichText::new(format!("Составлено в {}", plan.generated_at.format("%H:%M")))
                        .size(12.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(8.0);
                render_plan_text(ui, &plan.text);
                ui.add_space(12.0);
                reset = ui.button("Создать новый план").clicked();
            }
        }

        if generate {
            self.generate(Some(ui.ctx().clone()));
        }
        if reset {
            self.reset();
        }
    }

    fn show_strength(&self, ui: &mut Ui) {
        for exercise in &self.exercises {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    motion_marker(ui, exercise.motion);
                    ui.vertical(|ui| {
                        ui.label(RichText::new(exercise.name).strong());
                        ui.label(RichText::new(exercise.description).color(Color32::GRAY));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(exercise.sets)
                                .monospace()
                                .color(Color32::from_rgb(52, 211, 153)),
                        );
                    });
                });
            });
            ui.add_space(4.0);
        }
    }

    fn show_drills(&self, ui: &mut Ui) {
        for drill in &self.drills {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    motion_marker(ui, drill.motion);
                    ui.vertical(|ui| {
                        ui.label(RichText::new(drill.name).strong());
                        ui.label(RichText::new(drill.description).color(Color32::GRAY));
                    });
                });
            });
            ui.add_space(4.0);
        }
        ui.add_space(8.0);
        ui.label(RichText::new(DRILL_ADVICE).italics().color(Color32::GRAY));
    }
}

fn motion_marker(ui: &mut Ui, motion: Motion) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(24.0, 32.0), egui::Sense::hover());
    let offset = motion.offset(ui.input(|i| i.time));
    let center = rect.center_bottom() - egui::vec2(0.0, 6.0 + offset);
    ui.painter()
        .circle_filled(center, 5.0, Color32::from_rgb(52, 211, 153));
    ui.ctx().request_repaint();
}

/// Show the model's Markdown as labels: `#` lines as headings, list items
/// with bullets, everything else as body text.
fn render_plan_text(ui: &mut Ui, text: &str) {
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            ui.add_space(6.0);
        } else if let Some(heading) = trimmed.strip_prefix('#') {
            ui.add_space(4.0);
            ui.label(
                RichText::new(heading.trim_start_matches('#').trim().replace("**", ""))
                    .size(20.0)
                    .strong()
                    .color(Color32::WHITE),
            );
        } else if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            ui.label(format!("• {}", item.replace("**", "")));
        } else {
            ui.label(trimmed.replace("**", ""));
        }
    }
}
