//! Status-Bar am unteren Bildschirmrand.

use crate::app::{FrameStats, MapHit, MinimapCompositor};
use crate::core::OwnershipCategory;

/// Rendert die Status-Bar
pub fn render_status_bar(
    ctx: &egui::Context,
    compositor: &MinimapCompositor,
    stats: &FrameStats,
    hover: Option<&MapHit<'_>>,
) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let camera = compositor.camera();
            ui.label(format!(
                "Skalierung: {:.0} px/Region | Position: ({:.1}, {:.1}, {:.1}) | Richtung: {:.0}°",
                compositor.scale(),
                camera.global_position.x,
                camera.global_position.y,
                camera.global_position.z,
                camera.heading.to_degrees()
            ));

            ui.separator();

            ui.label(format!(
                "Layer: {} px | Objekte #{} | Parzellen #{}",
                compositor.object_layer().side(),
                compositor.object_layer().committed().epoch(),
                compositor.parcel_layer().committed().epoch()
            ));

            if let Some(objects) = stats.objects {
                ui.separator();
                ui.label(format!("Marker: {}", objects.drawn));
            }

            if let Some(hit) = hover {
                ui.separator();
                let ownership = match hit.cell.map(|c| c.ownership()) {
                    Some(OwnershipCategory::Public) => "öffentlich",
                    Some(OwnershipCategory::Owned) => "privat",
                    Some(OwnershipCategory::Group) => "Gruppe",
                    Some(OwnershipCategory::SelfOwned) => "eigen",
                    Some(OwnershipCategory::ForSale) => "zu verkaufen",
                    Some(OwnershipCategory::Auction) => "Auktion",
                    Some(OwnershipCategory::Unknown(_)) => "unbekannt",
                    None => "keine Daten",
                };
                ui.label(format!(
                    "{} [{}, {}] {}{}",
                    hit.region.name,
                    hit.cell_index.0,
                    hit.cell_index.1,
                    ownership,
                    if hit.collision { " (Kollision)" } else { "" }
                ));
                if !hit.region.alive {
                    ui.colored_label(egui::Color32::LIGHT_RED, "nicht erreichbar");
                }
            }
        });
    });
}
