use std::{io, path::Path, sync::Arc};

use client_core::{CandidateFile, PredictorSession, ResultView};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::Gene;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::{apply_ui_event, submit_prediction};

const PICKER_EXTENSIONS: [&str; 2] = ["fasta", "fa"];

pub struct PredictorApp {
    session: PredictorSession,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    drop_hovered: bool,
}

impl PredictorApp {
    pub fn new(
        session: PredictorSession,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        Self {
            session,
            cmd_tx,
            ui_rx,
            status: "Starting backend...".to_string(),
            drop_hovered: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.session, &mut self.status, event);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.first().cloned(),
            )
        });
        self.drop_hovered = hovering;
        // Only the first of several dropped files is considered.
        if let Some(file) = dropped {
            self.offer_file(candidate_from_dropped(&file));
        }
    }

    fn browse_files(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("FASTA", &PICKER_EXTENSIONS)
            .pick_file()
        {
            self.offer_file(candidate_from_path(&path));
        }
    }

    fn offer_file(&mut self, candidate: io::Result<CandidateFile>) {
        match candidate {
            Ok(file) => {
                // Rejections surface through the session's error region.
                let _ = self.session.select_file(file);
            }
            Err(err) => self.session.report_unreadable_file(err.to_string()),
        }
    }

    fn submit(&mut self) {
        if let Ok(attempt) = submit_prediction(&mut self.session, &self.cmd_tx, &mut self.status)
        {
            tracing::debug!(%attempt, "prediction dispatched");
        }
    }

    fn show_gene_picker(&mut self, ui: &mut egui::Ui) {
        let selected = self.session.gene();
        let mut choice = selected;
        ui.horizontal(|ui| {
            ui.label("Gene");
            egui::ComboBox::from_id_salt("gene_picker")
                .selected_text(selected.map_or("Select a gene", Gene::as_str))
                .show_ui(ui, |ui| {
                    for gene in Gene::ALL {
                        ui.selectable_value(&mut choice, Some(gene), gene.as_str());
                    }
                });
        });
        if choice != selected {
            if let Some(gene) = choice {
                self.session.select_gene(gene);
            }
        }
    }

    fn show_drop_zone(&mut self, ui: &mut egui::Ui) {
        let (fill, stroke) = if self.drop_hovered {
            (
                egui::Color32::from_rgb(38, 62, 92),
                egui::Stroke::new(2.0, egui::Color32::from_rgb(96, 156, 230)),
            )
        } else {
            (
                egui::Color32::from_rgb(32, 34, 40),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(80, 84, 96)),
            )
        };

        let mut browse = false;
        egui::Frame::NONE
            .fill(fill)
            .stroke(stroke)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(16, 20))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label("Drag & drop a FASTA file here");
                    ui.label(egui::RichText::new("or").weak());
                    browse = ui.button("Browse files").clicked();
                    ui.label(
                        egui::RichText::new("Accepts .fasta and .fa files up to 200MB")
                            .small()
                            .weak(),
                    );
                });
            });
        if browse {
            self.browse_files();
        }
    }

    fn show_file_card(&mut self, ui: &mut egui::Ui) {
        let Some((name, size)) = self.session.describe_file() else {
            return;
        };
        let name = name.to_string();

        let mut remove = false;
        ui.add_space(8.0);
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(40, 44, 52))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&name).strong());
                        ui.label(egui::RichText::new(size).small().weak());
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        remove = ui.button("Remove").clicked();
                    });
                });
            });
        if remove {
            self.session.remove_file();
        }
    }

    fn show_main(&mut self, ui: &mut egui::Ui) {
        ui.heading("Disease Predictor");
        ui.label(
            egui::RichText::new("Upload a patient FASTA file to predict possible diseases")
                .weak(),
        );
        ui.add_space(12.0);

        self.show_gene_picker(ui);
        ui.add_space(12.0);
        self.show_drop_zone(ui);
        self.show_file_card(ui);
        ui.add_space(12.0);

        let submit = self.session.presentation().submit;
        if ui
            .add_enabled(submit.enabled, egui::Button::new(submit.label))
            .clicked()
        {
            self.submit();
        }

        let presentation = self.session.presentation();
        if let Some(error) = &presentation.error {
            ui.add_space(8.0);
            show_error(ui, error);
        }
        show_result(ui, &presentation.result);

        ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
            ui.label(egui::RichText::new(&self.status).small().weak());
        });
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.handle_dropped_files(ctx);

        egui::CentralPanel::default().show(ctx, |ui| self.show_main(ui));

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

fn show_error(ui: &mut egui::Ui, message: &str) {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(111, 53, 53))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
        });
}

fn show_result(ui: &mut egui::Ui, result: &ResultView<'_>) {
    match result {
        ResultView::Hidden => {}
        ResultView::DiseaseList { header, items } => {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(*header).strong());
            for disease in items.iter() {
                ui.label(format!("• {disease}"));
            }
        }
        ResultView::Message(message) => {
            ui.add_space(8.0);
            ui.label(*message);
        }
    }
}

fn candidate_from_path(path: &Path) -> io::Result<CandidateFile> {
    CandidateFile::from_path(path)
}

/// Native drops carry a path; web and some platforms only hand over the bytes.
pub fn candidate_from_dropped(file: &egui::DroppedFile) -> io::Result<CandidateFile> {
    if let Some(path) = &file.path {
        return candidate_from_path(path);
    }
    match &file.bytes {
        Some(bytes) => Ok(CandidateFile::from_bytes(file.name.clone(), Arc::clone(bytes))),
        None => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("dropped file '{}' has no readable contents", file.name),
        )),
    }
}
