//! Provides [`FootController`], the one value that holds all of the device's mutable state.

use crate::{
    debouncer::{Debouncer, Edge, Level},
    mapping::{ConfigError, Mapping},
    packet::MidiPacket,
    queue::QUEUE_CAPACITY,
    sequencer::{EdgeOutcome, Sequencer},
    transport::{Transport, drain},
};

/// What happened during one [`tick`](FootController::tick).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// The edge detected on this tick and what the sequencer made of it.
    pub edge: Option<(Edge, EdgeOutcome)>,
    /// The packet handed to the transport on this tick.
    pub sent: Option<MidiPacket>,
}

/// Debouncer and sequencer, driven together once per tick.
///
/// The controller is meant to be owned by whatever runs the periodic tick and by nothing else; no other
/// context needs to see the switch level or the queue.
#[derive(Clone, Debug)]
pub struct FootController<'a, const N: usize = QUEUE_CAPACITY> {
    debouncer: Debouncer,
    sequencer: Sequencer<'a, N>,
}

impl<'a, const N: usize> FootController<'a, N> {
    /// Constructs a `FootController` running `mapping`.
    pub fn new(mapping: Mapping<'a>) -> Result<Self, ConfigError> {
        Ok(Self {
            debouncer: Debouncer::new(),
            sequencer: Sequencer::new(mapping)?,
        })
    }

    /// Runs one tick: samples the switch, hands any edge to the sequencer, then offers at most one packet to the
    /// transport.
    ///
    /// `is_high` is the raw pin level. Runs in constant time and never waits on the transport.
    pub fn tick(&mut self, is_high: bool, transport: &mut impl Transport) -> Tick {
        let edge = self
            .debouncer
            .sample(is_high)
            .map(|edge| (edge, self.sequencer.on_edge(edge)));
        let sent = drain(&mut self.sequencer, transport);

        Tick { edge, sent }
    }

    /// The switch level seen on the most recent tick.
    pub fn level(&self) -> Level {
        self.debouncer.level()
    }

    /// Read access to the sequencer, e.g. to inspect the pending burst.
    pub fn sequencer(&self) -> &Sequencer<'a, N> {
        &self.sequencer
    }
}
