#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

//! A window with a date picker and the options it supports.

use eframe::egui;
use egui_date_picker::DatePicker;

const FORMATS: [&str; 4] = ["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y", "%B %-d, %Y"];

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([380.0, 460.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Date picker",
        options,
        Box::new(|_cc| Ok(Box::<DemoApp>::default())),
    )
}

struct DemoApp {
    date: String,
    format: String,
    validation: bool,
    application_mode: bool,
    year_arrows: bool,
    history: Vec<String>,
}

impl Default for DemoApp {
    fn default() -> Self {
        Self {
            date: String::new(),
            format: FORMATS[0].to_owned(),
            validation: true,
            application_mode: true,
            year_arrows: false,
            history: vec![],
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Pick a date");

            egui::ComboBox::from_label("Format")
                .selected_text(self.format.as_str())
                .show_ui(ui, |ui| {
                    for format in FORMATS {
                        ui.selectable_value(&mut self.format, format.to_owned(), format);
                    }
                });
            ui.checkbox(&mut self.validation, "Validation messages");
            ui.checkbox(&mut self.application_mode, "Arrow key navigation");
            ui.checkbox(&mut self.year_arrows, "Year arrows");

            ui.separator();

            let history = &mut self.history;
            let output = DatePicker::new(&mut self.date)
                .format(self.format.as_str())
                .validation(self.validation)
                .application_mode(self.application_mode)
                .year_arrows(self.year_arrows)
                .on_change(|text| {
                    log::info!("Date changed to {text}");
                    history.push(text.to_owned());
                })
                .show(ui);

            ui.separator();

            match output.selected() {
                Some(selected) => ui.label(format!("Selected: {selected}")),
                None => ui.weak("Nothing selected"),
            };

            ui.collapsing("History", |ui| {
                for text in self.history.iter().rev() {
                    ui.monospace(text);
                }
            });
        });
    }
}
