//! egui rendering of the import screen

use hwimport_core::DiscovererId;

use crate::screen::ImportScreen;
use crate::view::{ImportView, ViewFactory};

/// Heading shown above the selector
pub const HEADING: &str = "Import Hardware";

pub struct ImportPanel;

impl ImportPanel {
    /// Draw the heading, the discoverer selector and the content region
    ///
    /// Returns the new selection when the operator changed it this frame.
    pub fn show<F: ViewFactory>(
        ui: &mut egui::Ui,
        screen: &mut ImportScreen<F>,
    ) -> Option<Option<DiscovererId>> {
        ui.heading(HEADING);

        // Copy out the options to avoid holding a borrow on the screen
        let options = screen.model().options.clone();
        let current = screen.selected().cloned();
        let selected_label = options
            .iter()
            .find(|o| o.value == current)
            .map(|o| o.label.clone())
            .unwrap_or_else(|| screen.placeholder().to_string());

        let mut new_selected = current.clone();
        egui::ComboBox::from_id_salt("discoverer_select")
            .selected_text(selected_label)
            .show_ui(ui, |ui| {
                for option in &options {
                    if ui
                        .selectable_label(option.value == current, option.label.as_str())
                        .clicked()
                    {
                        new_selected = option.value.clone();
                    }
                }
            });

        let changed = new_selected != current;
        if changed {
            screen.set_selection(new_selected.clone());
        }

        ui.separator();

        if let Some((key, view)) = screen.active_view_mut() {
            // Scope widget ids to the discoverer so a new pick starts clean
            ui.push_id(key, |ui| view.ui(ui));
        }

        changed.then_some(new_selected)
    }
}
