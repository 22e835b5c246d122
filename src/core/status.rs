//! # Appliance Status
//!
//! Turns one status reply into the overlay the operator should see. Each
//! poll tick builds a fresh [`StatusSnapshot`] and the overlay is decided
//! from scratch; nothing is diffed against the previous tick.

use crate::client::ActionResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplianceStatus {
    Connecting,
    Startup,
    Cleaning,
    Mixing,
    CleaningCycle,
    SingleIngredient,
    Other(String),
}

impl ApplianceStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "connecting" => ApplianceStatus::Connecting,
            "startup" => ApplianceStatus::Startup,
            "cleaning" => ApplianceStatus::Cleaning,
            "mixing" => ApplianceStatus::Mixing,
            "cleaning_cycle" => ApplianceStatus::CleaningCycle,
            "single_ingredient" => ApplianceStatus::SingleIngredient,
            other => ApplianceStatus::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    PlaceGlass,
    DoneRemoveGlass,
    Other(String),
}

impl StatusMessage {
    /// The controller spells these `place_glas` / `mixing_done_remove_glas`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "place_glas" | "place_glass" => StatusMessage::PlaceGlass,
            "mixing_done_remove_glas" | "done_remove_glass" => StatusMessage::DoneRemoveGlass,
            other => StatusMessage::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusSnapshot {
    pub status: Option<ApplianceStatus>,
    pub message: Option<StatusMessage>,
    pub progress: Option<f64>,
    pub instruction: Option<String>,
}

impl StatusSnapshot {
    pub fn from_response(response: &ActionResponse) -> Self {
        Self {
            status: response.str_field("status").map(ApplianceStatus::parse),
            message: response.str_field("message").map(StatusMessage::parse),
            progress: response.f64_field("progress"),
            instruction: response.str_field("instruction").map(str::to_string),
        }
    }

    /// `round(progress * 100)`, clamped; missing progress reads as 0.
    pub fn percent(&self) -> u8 {
        let progress = self.progress.filter(|p| p.is_finite()).unwrap_or(0.0);
        (progress * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

/// Modal layer shown above the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    Hidden,
    /// Appliance controller unreachable; offers the system buttons.
    ServerError,
    Connecting,
    Startup,
    Cleaning,
    PlaceGlass,
    MixingDone { instruction: Option<String> },
    Mixing { percent: u8 },
    SingleIngredient,
}

impl Overlay {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Overlay::Hidden)
    }
}

/// The fixed status → overlay table. Total: anything unrecognised hides
/// the overlay.
pub fn overlay_for(snapshot: &StatusSnapshot) -> Overlay {
    let place_glass = matches!(snapshot.message, Some(StatusMessage::PlaceGlass));
    match &snapshot.status {
        Some(ApplianceStatus::Connecting) => Overlay::Connecting,
        Some(ApplianceStatus::Startup) => Overlay::Startup,
        Some(ApplianceStatus::Cleaning) => Overlay::Cleaning,
        Some(ApplianceStatus::Mixing) => match snapshot.message {
            Some(StatusMessage::PlaceGlass) => Overlay::PlaceGlass,
            Some(StatusMessage::DoneRemoveGlass) => Overlay::MixingDone {
                instruction: snapshot.instruction.clone(),
            },
            _ => Overlay::Mixing {
                percent: snapshot.percent(),
            },
        },
        Some(ApplianceStatus::CleaningCycle) if place_glass => Overlay::PlaceGlass,
        Some(ApplianceStatus::CleaningCycle) => Overlay::Cleaning,
        Some(ApplianceStatus::SingleIngredient) if place_glass => Overlay::PlaceGlass,
        Some(ApplianceStatus::SingleIngredient) => Overlay::SingleIngredient,
        Some(ApplianceStatus::Other(_)) | None => Overlay::Hidden,
    }
}
