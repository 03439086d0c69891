use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::network::{LocationId, NetworkProvider};
use crate::policy::Criterion;
use crate::routing::DistancePlan;

/// Presentation style for turning a [`DistanceSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    PlainText,
    RichText,
}

/// Distance to a single location within a summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceEntry {
    pub id: LocationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub reachable: bool,
    /// `None` (serialised as `null`) when the location is unreachable.
    pub distance: Option<f64>,
}

impl DistanceEntry {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }

    fn display_distance(&self) -> String {
        match self.distance {
            Some(distance) => format!("{distance:.2} units"),
            None => "unreachable".to_string(),
        }
    }
}

/// Structured representation of a distance plan that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceSummary {
    pub start: LocationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_name: Option<String>,
    pub criterion: Criterion,
    pub windowed: bool,
    pub entries: Vec<DistanceEntry>,
    pub warnings: Vec<String>,
}

impl DistanceSummary {
    /// Convert a [`DistancePlan`] into a summary with resolved location names.
    pub fn from_plan<P: NetworkProvider + ?Sized>(plan: &DistancePlan, provider: &P) -> Self {
        let entries = plan
            .distances
            .to_map()
            .into_iter()
            .map(|(id, distance)| DistanceEntry {
                id,
                name: provider.location_name(id).map(str::to_string),
                reachable: distance.is_some(),
                distance,
            })
            .collect();

        Self {
            start: plan.start,
            start_name: provider.location_name(plan.start).map(str::to_string),
            criterion: plan.criterion,
            windowed: plan.windowed,
            entries,
            warnings: plan.warnings.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn reachable_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.reachable).count()
    }

    fn start_label(&self) -> &str {
        self.start_name.as_deref().unwrap_or("<unknown>")
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::PlainText => self.render_plain(),
            RenderMode::RichText => self.render_rich(),
        }
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Distances from {} ({}) [criterion: {}{}]",
            self.start_label(),
            self.start,
            self.criterion,
            if self.windowed { ", windowed" } else { "" }
        );
        for entry in &self.entries {
            let _ = writeln!(
                buffer,
                "{} ({}): {}",
                entry.display_name(),
                entry.id,
                entry.display_distance()
            );
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Distances** from _{}_ (`{}`), criterion `{}`{}",
            self.start_label(),
            self.start,
            self.criterion,
            if self.windowed { ", delivery windows applied" } else { "" }
        );
        for entry in &self.entries {
            let _ = writeln!(
                buffer,
                "* **{}** (`{}`): {}",
                entry.display_name(),
                entry.id,
                entry.display_distance()
            );
        }
        if !self.warnings.is_empty() {
            let _ = writeln!(buffer, "\n_Warnings:_");
            for warning in &self.warnings {
                let _ = writeln!(buffer, "* {warning}");
            }
        }
        buffer
    }
}
