use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Data grid with per-column filters
// ---------------------------------------------------------------------------

/// Render the filtered rows as a table. Each column header carries a filter
/// box; those filters narrow the table only and never touch the session's
/// filter state.
pub fn data_grid(ui: &mut Ui, state: &mut AppState) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    let grid = session.grid();

    ui.strong("Penguins Data");

    let (filters, errors) = state.grid_filters();
    let mut visible = if grid.filters_enabled {
        grid.visible_rows(&filters)
    } else {
        (0..grid.rows.len()).collect()
    };
    if let Some((column, descending)) = state.grid_sort {
        grid.sort_rows(&mut visible, column, descending);
    }
    ui.label(format!("{} of {} rows", visible.len(), grid.rows.len()));

    let sort = state.grid_sort;
    let mut clicked_header = None;
    let mut edited_filter = None;
    let filter_text = &mut state.grid_filter_text;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(TableColumn::auto().at_least(80.0), grid.columns.len())
        .header(44.0, |mut header| {
            for (i, column) in grid.columns.iter().enumerate() {
                header.col(|ui: &mut Ui| {
                    ui.vertical(|ui: &mut Ui| {
                        let arrow = match sort {
                            Some((c, false)) if c == i => " ⏶",
                            Some((c, true)) if c == i => " ⏷",
                            _ => "",
                        };
                        let title = RichText::new(format!("{}{arrow}", column.name())).strong();
                        if ui.add(egui::Label::new(title).sense(egui::Sense::click())).clicked() {
                            clicked_header = Some(i);
                        }
                        if grid.filters_enabled {
                            let hint = if column.is_numeric() { "e.g. > 40" } else { "filter" };
                            let edit = egui::TextEdit::singleline(&mut filter_text[i])
                                .hint_text(hint)
                                .desired_width(80.0);
                            let response = ui.add(edit);
                            if response.changed() {
                                edited_filter = Some(i);
                            }
                            if let Some(err) = &errors[i] {
                                response.on_hover_text(RichText::new(err).color(Color32::RED));
                            }
                        }
                    });
                });
            }
        })
        .body(|body| {
            body.rows(18.0, visible.len(), |mut row| {
                let cells = &grid.rows[visible[row.index()]];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell.to_string());
                    });
                }
            });
        });

    if let Some(column) = edited_filter {
        state.grid_filter_edited(column);
    }
    if let Some(column) = clicked_header {
        state.cycle_grid_sort(column);
    }
}
