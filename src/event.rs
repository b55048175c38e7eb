use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, KeyEventKind, MouseEvent};

pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
}

/// Fixed-rate tick deadline, independent of how much input arrives.
#[derive(Clone, Copy, Debug)]
pub struct TickClock {
    tick_rate: Duration,
    last_tick: Instant,
}

impl TickClock {
    pub fn new(tick_rate: Duration, now: Instant) -> Self {
        Self { tick_rate, last_tick: now }
    }

    /// How long input polling may block before the next tick is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        (self.last_tick + self.tick_rate).saturating_duration_since(now)
    }

    /// True once per elapsed period; restarts the period when it fires.
    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_tick) >= self.tick_rate {
            self.last_tick = now;
            true
        } else {
            false
        }
    }
}

pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut clock = TickClock::new(Duration::from_millis(tick_rate_ms), Instant::now());

        thread::spawn(move || loop {
            if event::poll(clock.timeout(Instant::now())).unwrap_or(false) {
                let forwarded = match event::read() {
                    Ok(crossterm::event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(Event::Key(key))
                    }
                    Ok(crossterm::event::Event::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                    _ => None,
                };
                if let Some(ev) = forwarded {
                    if tx.send(ev).is_err() {
                        return;
                    }
                }
            }
            // a steady stream of mouse motion must not hold ticks back
            if clock.due(Instant::now()) && tx.send(Event::Tick).is_err() {
                return;
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
