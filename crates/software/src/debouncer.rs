//! Edge detection for the foot switch.
//!
//! The switch is wired active-low: the input idles high through its pull-up and reads low while pressed. The
//! [`Debouncer`] is sampled once per tick and reports a change of logical state as an [`Edge`]. Detection works
//! at tick granularity; a level seen on a single tick is enough to register an edge.

/// Debounced logical state of the switch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Not pressed; the pin reads high.
    #[default]
    Released,
    /// Pressed; the pin reads low.
    Pressed,
}

impl Level {
    /// Converts a raw pin reading to a logical level.
    pub const fn from_active_low(is_high: bool) -> Self {
        if is_high { Self::Released } else { Self::Pressed }
    }
}

/// A transition between two [`Level`]s observed on consecutive ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// [`Level::Released`] to [`Level::Pressed`].
    Press,
    /// [`Level::Pressed`] to [`Level::Released`].
    Release,
}

/// Remembers the level seen on the previous tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Debouncer {
    level: Level,
}

impl Debouncer {
    /// Constructs a [`Debouncer`] that assumes the switch starts out released.
    pub const fn new() -> Self {
        Self {
            level: Level::Released,
        }
    }

    /// Records this tick's raw reading and returns the [`Edge`], if any, since the previous tick.
    pub fn sample(&mut self, is_high: bool) -> Option<Edge> {
        let level = Level::from_active_low(is_high);
        let edge = match (self.level, level) {
            (Level::Released, Level::Pressed) => Some(Edge::Press),
            (Level::Pressed, Level::Released) => Some(Edge::Release),
            _ => None,
        };
        self.level = level;
        edge
    }

    /// The logical level recorded on the most recent tick.
    pub const fn level(&self) -> Level {
        self.level
    }
}
