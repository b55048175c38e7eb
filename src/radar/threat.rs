use ratatui::style::Color;

use super::types::{Target, TargetKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThreatTier {
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatTier {
    pub fn all() -> &'static [ThreatTier] {
        &[ThreatTier::Low, ThreatTier::Medium, ThreatTier::High, ThreatTier::Critical]
    }

    pub fn from_value(value: i64) -> Self {
        if value < 50 {
            ThreatTier::Low
        } else if value < 100 {
            ThreatTier::Medium
        } else if value < 200 {
            ThreatTier::High
        } else {
            ThreatTier::Critical
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ThreatTier::Low => "Low Threat",
            ThreatTier::Medium => "Medium",
            ThreatTier::High => "High",
            ThreatTier::Critical => "Critical",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ThreatTier::Low => Color::Rgb(34, 197, 94),
            ThreatTier::Medium => Color::Rgb(234, 179, 8),
            ThreatTier::High => Color::Rgb(239, 68, 68),
            ThreatTier::Critical => Color::Rgb(168, 85, 247),
        }
    }

    /// Halo drawn around the marker; the tier color at half brightness.
    pub fn glow(&self) -> Color {
        match self {
            ThreatTier::Low => Color::Rgb(17, 98, 47),
            ThreatTier::Medium => Color::Rgb(117, 89, 4),
            ThreatTier::High => Color::Rgb(119, 34, 34),
            ThreatTier::Critical => Color::Rgb(84, 42, 123),
        }
    }
}

pub fn threat_value(target: &Target) -> i64 {
    let speed = target.vel_deg_per_sec.abs();
    let raw = match target.kind {
        TargetKind::Ship => 50.0 + target.range_km * 10.0 + speed * 100.0,
        TargetKind::Air => 100.0 + target.range_km * 20.0 + speed * 200.0,
        TargetKind::Human => 10.0 + target.range_km * 5.0 + speed * 50.0,
    };
    raw.round() as i64
}
