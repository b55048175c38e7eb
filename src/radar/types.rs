use rand::Rng;
use serde::{Deserialize, Serialize};

const ID_LEN: usize = 10;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Ship,
    Air,
    Human,
}

impl TargetKind {
    pub fn all() -> &'static [TargetKind] {
        &[TargetKind::Ship, TargetKind::Air, TargetKind::Human]
    }

    /// Single-letter glyph drawn inside the marker.
    pub fn glyph(&self) -> char {
        match self {
            TargetKind::Ship => 'S',
            TargetKind::Air => 'A',
            TargetKind::Human => 'H',
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TargetKind::Ship => "Ships",
            TargetKind::Air => "Aircraft",
            TargetKind::Human => "Humans",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: String,
    pub kind: TargetKind,
    pub range_km: f64,
    pub bearing_deg: f64,
    pub vel_deg_per_sec: f64,
    pub vr_km_per_sec: f64,
    #[serde(default)]
    pub detected: bool,
}

impl Target {
    pub fn new(
        id: impl Into<String>,
        kind: TargetKind,
        range_km: f64,
        bearing_deg: f64,
        vel_deg_per_sec: f64,
        vr_km_per_sec: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            range_km,
            bearing_deg,
            vel_deg_per_sec,
            vr_km_per_sec,
            detected: false,
        }
    }
}

/// Random base-36 token used as a target id.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RadarConfig {
    pub range_km: f64,
    pub sweep_deg_per_sec: f64,
    pub noise: f64,
    /// Reserved for trail fading; not read by the simulation.
    pub fade_sec: f64,
    pub paused: bool,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            range_km: 15.0,
            sweep_deg_per_sec: 120.0,
            noise: 0.15,
            fade_sec: 0.3,
            paused: false,
        }
    }
}

/// Per-frame readout pushed to the surrounding UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadarStats {
    pub bearing: String,
    pub count: usize,
    pub scale: String,
}

impl Default for RadarStats {
    fn default() -> Self {
        Self {
            bearing: "000°".to_string(),
            count: 0,
            scale: "1 px = ? m".to_string(),
        }
    }
}

/// Change notifications emitted by the scope. The owner applies them.
#[derive(Clone, Debug, PartialEq)]
pub enum RadarEvent {
    TargetsChanged(Vec<Target>),
    StatsChanged(RadarStats),
    ConfigChanged(RadarConfig),
}

/// Starting population shown when the dashboard opens.
pub fn default_targets() -> Vec<Target> {
    vec![
        Target::new("1", TargetKind::Ship, 3.5, 45.0, 2.0, 0.01),
        Target::new("2", TargetKind::Air, 7.2, 180.0, 15.0, -0.02),
        Target::new("3", TargetKind::Human, 1.8, 270.0, 5.0, 0.005),
        Target::new("4", TargetKind::Ship, 5.5, 90.0, -3.0, -0.015),
        Target::new("5", TargetKind::Air, 12.1, 135.0, 25.0, 0.03),
        Target::new("6", TargetKind::Human, 0.8, 315.0, 3.0, 0.002),
    ]
}
