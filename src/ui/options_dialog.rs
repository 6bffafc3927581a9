//! Optionen-Panel: Darstellungs-Schalter und Farben der Minimap.

use crate::app::MinimapIntent;
use crate::shared::{MinimapColors, MinimapConfiguration};

/// Zeigt das Optionen-Panel und gibt erzeugte Events zurück.
pub fn show_options_panel(ctx: &egui::Context, config: &MinimapConfiguration) -> Vec<MinimapIntent> {
    let mut events = Vec::new();

    // Arbeitskopie der Optionen für Live-Bearbeitung
    let mut opts = config.clone();
    let mut changed = false;
    let mut save_requested = false;

    egui::SidePanel::right("minimap_options")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Minimap");
            egui::ScrollArea::vertical().show(ui, |ui| {
                // ── Darstellung ─────────────────────────────────
                ui.collapsing("Darstellung", |ui| {
                    changed |= ui
                        .checkbox(&mut opts.rotate_to_heading, "Mit Blickrichtung drehen")
                        .changed();
                    changed |= ui
                        .checkbox(&mut opts.auto_center_pan, "Automatisch zentrieren")
                        .changed();
                    changed |= ui
                        .checkbox(&mut opts.show_objects, "Objekte anzeigen")
                        .changed();
                    changed |= ui
                        .checkbox(&mut opts.use_baked_map_tiles, "Karten-Tiles verwenden")
                        .changed();
                });

                // ── Parzellen ───────────────────────────────────
                ui.collapsing("Parzellen", |ui| {
                    changed |= ui
                        .checkbox(&mut opts.show_property_lines, "Grundstücksgrenzen")
                        .changed();
                    changed |= ui
                        .checkbox(&mut opts.show_for_sale_parcels, "Zum Verkauf")
                        .changed();
                    changed |= ui
                        .checkbox(&mut opts.show_collision_parcels, "Kollision / Bann")
                        .changed();
                });

                // ── Farben ──────────────────────────────────────
                ui.collapsing("Farben", |ui| {
                    changed |= color_fields(ui, &mut opts.colors);
                });
            });

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Standardwerte").clicked() {
                    opts = MinimapConfiguration::default();
                    changed = true;
                }
                if ui.button("Speichern").clicked() {
                    save_requested = true;
                }
            });
        });

    if save_requested {
        let path = MinimapConfiguration::config_path();
        if let Err(e) = opts.save_to_file(&path) {
            log::error!("Optionen konnten nicht gespeichert werden: {:#}", e);
        }
    }

    // Änderungen sofort anwenden (Live-Preview)
    if changed {
        events.push(MinimapIntent::ConfigurationChanged {
            config: Box::new(opts),
        });
    }

    events
}

fn color_fields(ui: &mut egui::Ui, colors: &mut MinimapColors) -> bool {
    let mut changed = false;
    changed |= color_edit(ui, "Hintergrund:", &mut colors.background);
    changed |= color_edit(ui, "Land:", &mut colors.land);
    changed |= color_edit(ui, "Tote Region (Tint):", &mut colors.dead_region_tint);
    changed |= color_edit(ui, "Regionsgrenze:", &mut colors.region_border);
    changed |= color_edit(ui, "Grenze (Warnung):", &mut colors.region_border_warning);
    changed |= color_edit(ui, "Grundstückslinie:", &mut colors.property_line);
    changed |= color_edit(ui, "Zum Verkauf:", &mut colors.for_sale);
    changed |= color_edit(ui, "Kollision:", &mut colors.collision);
    changed |= color_edit(ui, "Eigene Objekte:", &mut colors.object_you_own);
    changed |= color_edit(ui, "Gruppen-Objekte:", &mut colors.object_group_own);
    changed |= color_edit(ui, "Fremde Objekte:", &mut colors.object_other_own);
    changed |= color_edit(ui, "Avatare:", &mut colors.avatar);
    changed |= color_edit(ui, "Freunde:", &mut colors.avatar_friend);
    changed |= color_edit(ui, "Eigene Position:", &mut colors.self_marker);
    changed |= color_edit(ui, "Sichtkegel:", &mut colors.frustum);
    changed
}

/// Hilfsfunktion: Farb-Editor für [u8; 4] mit Alpha.
fn color_edit(ui: &mut egui::Ui, label: &str, color: &mut [u8; 4]) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        let mut c = egui::Color32::from_rgba_unmultiplied(color[0], color[1], color[2], color[3]);
        if ui.color_edit_button_srgba(&mut c).changed() {
            *color = c.to_srgba_unmultiplied();
            changed = true;
        }
    });
    changed
}
