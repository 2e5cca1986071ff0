use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the left filter panel: mass slider and species checkboxes.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter controls");
    ui.separator();

    let Some(session) = state.session.as_mut() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Mass slider ----
    let bounds = session.bounds();
    let mut threshold = session.filter_state().mass_threshold();
    let slider = egui::Slider::new(&mut threshold, bounds.min()..=bounds.max())
        .text("Mass (g)")
        .step_by(1.0);
    if ui.add(slider).changed() {
        session.set_mass_threshold(threshold);
    }

    ui.add_space(8.0);

    // ---- Species checkbox group ----
    let all_species = session.dataset().species.clone();
    let n_selected = session.filter_state().selected_species().len();
    ui.strong(format!("Species  ({n_selected}/{})", all_species.len()));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            session.select_all_species();
        }
        if ui.small_button("None").clicked() {
            session.select_no_species();
        }
    });

    for species in &all_species {
        let mut checked = session.filter_state().selected_species().contains(species);
        let text = RichText::new(species).color(session.colors().color_for(species));
        if ui.checkbox(&mut checked, text).changed() {
            session.toggle_species(species);
        }
    }

    ui.separator();
    if ui.button("Reset filters").clicked() {
        session.reset_filters();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = state.session.as_mut() {
            let total = session.dataset().len();
            let visible = session.row_count();
            ui.label(format!("{total} penguins loaded, {visible} visible"));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Value boxes
// ---------------------------------------------------------------------------

/// The row of summary values above the chart and grid.
pub fn value_boxes(ui: &mut Ui, state: &mut AppState) {
    let Some(session) = state.session.as_mut() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore penguins  (File → Open…)");
        });
        return;
    };

    let count = session.row_count().to_string();
    let bill_length = session.bill_length_text();
    let bill_depth = session.bill_depth_text();

    ui.columns(3, |cols: &mut [Ui]| {
        value_box(&mut cols[0], "Number of Documented Penguins", &count);
        value_box(&mut cols[1], "Average Bill Length", &bill_length);
        value_box(&mut cols[2], "Average Bill Height", &bill_depth);
    });
}

fn value_box(ui: &mut Ui, title: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(title);
        ui.label(RichText::new(value).size(28.0).strong());
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open penguin data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
