//! Mock telemetry for the status panels.
//!
//! Each feed refreshes on its own fixed period, counted in frame ticks, and
//! draws from an injected RNG so tests can replay exact sequences. The
//! spectrum and signal lines are rolled once and then ripple with time.

use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::style::Color;
use tracing::debug;

pub const STATUS_PERIOD_MS: u64 = 5_000;
pub const WEATHER_PERIOD_MS: u64 = 30_000;
pub const STATS_PERIOD_MS: u64 = 2_000;

const CONDITIONS: [&str; 10] = [
    "Partly Cloudy", "Sunny", "Cloudy", "Light Rain", "Heavy Rain",
    "Thunderstorm", "Foggy", "Clear", "Overcast", "Drizzle",
];
const WIND_DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

pub const SPECTRUM_BINS: usize = 64;
/// Signal-line frequencies are plotted on a 0..6 GHz axis.
pub const SIGNAL_AXIS_GHZ: f64 = 6.0;
/// Peak size of the animated ripple, in percent points.
const RIPPLE: f64 = 3.0;

/// Fires once every `period` ticks.
#[derive(Clone, Copy, Debug)]
pub struct Interval {
    period: u64,
    elapsed: u64,
}

impl Interval {
    pub fn from_millis(period_ms: u64, tick_ms: u64) -> Self {
        Self {
            period: (period_ms / tick_ms.max(1)).max(1),
            elapsed: 0,
        }
    }

    pub fn tick(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Health {
    Operational,
    Online,
    Active,
    Scanning,
    Standby,
    Warning,
    Error,
}

impl Health {
    pub fn label(&self) -> &str {
        match self {
            Health::Operational => "OPERATIONAL",
            Health::Online => "ONLINE",
            Health::Active => "ACTIVE",
            Health::Scanning => "SCANNING",
            Health::Standby => "STANDBY",
            Health::Warning => "WARNING",
            Health::Error => "ERROR",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Health::Operational | Health::Online | Health::Active | Health::Scanning => {
                Color::Rgb(74, 222, 128)
            }
            Health::Standby | Health::Warning => Color::Rgb(250, 204, 21),
            Health::Error => Color::Rgb(248, 113, 113),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SystemStatus {
    pub overall: Health,
    pub radar: Health,
    pub communications: Health,
    pub weapons: Health,
    pub sensors: Health,
}

impl Default for SystemStatus {
    fn default() -> Self {
        Self {
            overall: Health::Operational,
            radar: Health::Online,
            communications: Health::Online,
            weapons: Health::Standby,
            sensors: Health::Active,
        }
    }
}

impl SystemStatus {
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            overall: self.overall,
            radar: if rng.gen::<f64>() > 0.95 { Health::Warning } else { Health::Online },
            communications: if rng.gen::<f64>() > 0.98 { Health::Error } else { Health::Online },
            weapons: if rng.gen::<f64>() > 0.9 { Health::Active } else { Health::Standby },
            sensors: if rng.gen::<f64>() > 0.92 { Health::Scanning } else { Health::Active },
        }
    }

    pub fn subsystems(&self) -> [(&'static str, Health); 4] {
        [
            ("radar", self.radar),
            ("communications", self.communications),
            ("weapons", self.weapons),
            ("sensors", self.sensors),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weather {
    pub temperature_c: u32,
    pub humidity_pct: u32,
    pub wind_kmh: u32,
    pub direction: &'static str,
    pub condition: &'static str,
}

impl Default for Weather {
    fn default() -> Self {
        Self {
            temperature_c: 22,
            humidity_pct: 68,
            wind_kmh: 14,
            direction: "NE",
            condition: "Partly Cloudy",
        }
    }
}

impl Weather {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            temperature_c: rng.gen_range(15..40),
            humidity_pct: rng.gen_range(40..80),
            wind_kmh: rng.gen_range(5..35),
            direction: WIND_DIRECTIONS.choose(rng).copied().unwrap_or("N"),
            condition: CONDITIONS.choose(rng).copied().unwrap_or("Clear"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatSnapshot {
    pub total_targets: u32,
    pub detected_targets: u32,
    pub alert_targets: u32,
    pub power_pct: u32,
    pub temperature_c: u32,
    pub signal_pct: u32,
}

impl StatSnapshot {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            total_targets: rng.gen_range(5..25),
            detected_targets: rng.gen_range(2..10),
            alert_targets: rng.gen_range(0..3),
            power_pct: rng.gen_range(60..100),
            temperature_c: rng.gen_range(35..55),
            signal_pct: rng.gen_range(70..100),
        }
    }
}

/// Spectrum bin classification by frequency band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Primary,
    Secondary,
    Peak,
    Noise,
}

impl Band {
    /// Band and amplitude range for a frequency on the 0..100 axis.
    fn at(frequency: f64) -> (Band, f64, f64) {
        let within = |lo: f64, hi: f64| frequency > lo && frequency < hi;
        if within(15.0, 25.0) {
            (Band::Primary, 60.0, 90.0)
        } else if within(45.0, 55.0) {
            (Band::Primary, 70.0, 95.0)
        } else if within(75.0, 85.0) {
            (Band::Primary, 50.0, 80.0)
        } else if within(30.0, 40.0) {
            (Band::Secondary, 30.0, 60.0)
        } else if within(60.0, 70.0) {
            (Band::Secondary, 25.0, 55.0)
        } else if within(85.0, 95.0) {
            (Band::Peak, 80.0, 100.0)
        } else {
            (Band::Noise, 5.0, 25.0)
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Band::Primary => Color::Rgb(20, 160, 230),
            Band::Secondary => Color::Rgb(34, 197, 94),
            Band::Peak => Color::Rgb(239, 68, 68),
            Band::Noise => Color::Rgb(202, 65, 34),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpectrumBin {
    /// Position on the 0..100 axis.
    pub frequency: f64,
    /// Percent, 0..=100.
    pub amplitude: f64,
    pub band: Band,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum {
    pub bins: Vec<SpectrumBin>,
}

impl Spectrum {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bins = (0..SPECTRUM_BINS)
            .map(|i| {
                let frequency = i as f64 / SPECTRUM_BINS as f64 * 100.0;
                let (band, lo, hi) = Band::at(frequency);
                let amplitude = (lo + rng.gen::<f64>() * (hi - lo)).clamp(0.0, 100.0);
                SpectrumBin { frequency, amplitude, band }
            })
            .collect();
        Self { bins }
    }

    /// Amplitude of bin `index` at `time_s`, with a travelling ripple.
    pub fn animated(&self, index: usize, time_s: f64) -> f64 {
        self.bins.get(index).map_or(0.0, |bin| {
            let ripple = (time_s * 2.0 + index as f64 * 0.1).sin() * RIPPLE;
            (bin.amplitude + ripple).clamp(0.0, 100.0)
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalKind {
    Radar,
    Communication,
    Interference,
    Unknown,
}

impl SignalKind {
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::Radar => "RADAR",
            SignalKind::Communication => "COMMS",
            SignalKind::Interference => "INTERFERENCE",
            SignalKind::Unknown => "UNKNOWN",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            SignalKind::Radar => Color::Rgb(20, 160, 230),
            SignalKind::Communication => Color::Rgb(34, 197, 94),
            SignalKind::Interference => Color::Rgb(239, 68, 68),
            SignalKind::Unknown => Color::Rgb(202, 65, 34),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SignalLine {
    pub id: &'static str,
    pub frequency_ghz: f64,
    /// Base strength in percent.
    pub strength: f64,
    pub kind: SignalKind,
    pub active: bool,
}

impl SignalLine {
    /// Strength at `time_s`; inactive lines read zero.
    pub fn live_strength(&self, index: usize, time_s: f64) -> f64 {
        if !self.active {
            return 0.0;
        }
        let ripple = (time_s * 2.0 + index as f64).sin() * RIPPLE;
        (self.strength + ripple).clamp(0.0, 100.0)
    }
}

pub fn default_signals() -> Vec<SignalLine> {
    vec![
        SignalLine { id: "1", frequency_ghz: 2.4, strength: 85.0, kind: SignalKind::Radar, active: true },
        SignalLine { id: "2", frequency_ghz: 5.8, strength: 62.0, kind: SignalKind::Communication, active: true },
        SignalLine { id: "3", frequency_ghz: 1.2, strength: 45.0, kind: SignalKind::Interference, active: false },
        SignalLine { id: "4", frequency_ghz: 3.6, strength: 78.0, kind: SignalKind::Unknown, active: true },
    ]
}

/// All dashboard feeds behind one generator.
pub struct MockFeeds<R: Rng> {
    rng: R,
    pub status: SystemStatus,
    pub weather: Weather,
    pub stats: StatSnapshot,
    pub spectrum: Spectrum,
    pub signals: Vec<SignalLine>,
    time_s: f64,
    tick_s: f64,
    status_timer: Interval,
    weather_timer: Interval,
    stats_timer: Interval,
}

impl<R: Rng> MockFeeds<R> {
    pub fn new(mut rng: R, tick_ms: u64) -> Self {
        // weather refreshes immediately; the others keep their defaults
        let weather = Weather::roll(&mut rng);
        let spectrum = Spectrum::roll(&mut rng);
        Self {
            rng,
            status: SystemStatus::default(),
            weather,
            stats: StatSnapshot::default(),
            spectrum,
            signals: default_signals(),
            time_s: 0.0,
            tick_s: tick_ms as f64 / 1000.0,
            status_timer: Interval::from_millis(STATUS_PERIOD_MS, tick_ms),
            weather_timer: Interval::from_millis(WEATHER_PERIOD_MS, tick_ms),
            stats_timer: Interval::from_millis(STATS_PERIOD_MS, tick_ms),
        }
    }

    /// Seconds of animation time elapsed.
    pub fn time(&self) -> f64 {
        self.time_s
    }

    /// Advance all timers by one frame. Returns true if anything refreshed.
    pub fn tick(&mut self) -> bool {
        self.time_s += self.tick_s;
        let mut changed = false;
        if self.status_timer.tick() {
            self.status = self.status.roll(&mut self.rng);
            debug!(status = ?self.status, "status refreshed");
            changed = true;
        }
        if self.weather_timer.tick() {
            self.weather = Weather::roll(&mut self.rng);
            debug!(condition = self.weather.condition, "weather refreshed");
            changed = true;
        }
        if self.stats_timer.tick() {
            self.stats = StatSnapshot::roll(&mut self.rng);
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_interval_period() {
        let mut iv = Interval::from_millis(2_000, 16);
        let fired: Vec<u64> = (1..=250).filter(|_| iv.tick()).collect();
        assert_eq!(fired, vec![125, 250]);
    }

    #[test]
    fn test_interval_never_zero() {
        let mut iv = Interval::from_millis(5, 16);
        assert!(iv.tick());
        assert!(iv.tick());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = MockFeeds::new(ChaCha8Rng::seed_from_u64(5), 16);
        let mut b = MockFeeds::new(ChaCha8Rng::seed_from_u64(5), 16);
        for _ in 0..2_000 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.weather, b.weather);
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.status, b.status);
    }

    #[test]
    fn test_rolled_values_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..500 {
            let w = Weather::roll(&mut rng);
            assert!((15..40).contains(&w.temperature_c));
            assert!((40..80).contains(&w.humidity_pct));
            assert!((5..35).contains(&w.wind_kmh));
            let s = StatSnapshot::roll(&mut rng);
            assert!(s.alert_targets < 3);
            assert!((70..100).contains(&s.signal_pct));
            let st = SystemStatus::default().roll(&mut rng);
            assert_eq!(st.overall, Health::Operational);
            assert!(matches!(st.radar, Health::Online | Health::Warning));
        }
    }

    #[test]
    fn test_spectrum_bands() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let spectrum = Spectrum::roll(&mut rng);
        assert_eq!(spectrum.bins.len(), SPECTRUM_BINS);
        for bin in &spectrum.bins {
            let (band, lo, hi) = Band::at(bin.frequency);
            assert_eq!(bin.band, band);
            assert!(bin.amplitude >= lo && bin.amplitude <= hi);
        }
        // bin 60 sits at 93.75, inside the peak band
        assert_eq!(spectrum.bins[60].band, Band::Peak);
        assert_eq!(spectrum.bins[0].band, Band::Noise);
        assert_eq!(spectrum.bins[32].band, Band::Primary);
    }

    #[test]
    fn test_animation_stays_clamped() {
        let spectrum = Spectrum {
            bins: vec![SpectrumBin { frequency: 90.0, amplitude: 99.0, band: Band::Peak }],
        };
        for step in 0..200 {
            let a = spectrum.animated(0, step as f64 * 0.016);
            assert!((0.0..=100.0).contains(&a));
            assert!((a - 99.0).abs() <= RIPPLE);
        }
        assert_eq!(spectrum.animated(5, 0.0), 0.0);
    }

    #[test]
    fn test_signal_lines() {
        let signals = default_signals();
        assert_eq!(signals.len(), 4);
        assert!(signals.iter().all(|s| s.frequency_ghz < SIGNAL_AXIS_GHZ));
        // interference is off air
        assert_eq!(signals[2].live_strength(2, 1.0), 0.0);
        let radar = signals[0].live_strength(0, 0.0);
        assert_eq!(radar, 85.0);
        assert!((signals[0].live_strength(0, 0.5) - 85.0).abs() <= RIPPLE);
    }

    #[test]
    fn test_time_follows_ticks() {
        let mut feeds = MockFeeds::new(ChaCha8Rng::seed_from_u64(3), 20);
        for _ in 0..50 {
            feeds.tick();
        }
        assert!((feeds.time() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_stats_refresh_after_two_seconds() {
        let mut feeds = MockFeeds::new(ChaCha8Rng::seed_from_u64(1), 16);
        assert_eq!(feeds.stats, StatSnapshot::default());
        for _ in 0..124 {
            feeds.tick();
        }
        assert_eq!(feeds.stats, StatSnapshot::default());
        assert!(feeds.tick());
        assert!(feeds.stats.total_targets >= 5);
    }
}
