//! The state machine that turns edges into queued packets.

use crate::{
    debouncer::Edge,
    mapping::{ConfigError, Mapping},
    packet::MidiPacket,
    queue::{PacketQueue, QUEUE_CAPACITY},
};

/// Whether a burst is still going out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerState {
    /// Nothing pending; the next edge will be accepted.
    Idle,
    /// A burst is pending; edges are dropped until it has fully drained.
    Draining,
}

/// What became of an [`Edge`] handed to the [`Sequencer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// The next entry was selected and this many packets were queued.
    Enqueued(usize),
    /// The mapping does not respond to this kind of edge.
    Ignored,
    /// A burst was still draining.
    Dropped,
}

/// Selects mapping entries round-robin and holds the burst being transmitted.
///
/// Only one burst is ever pending, so the queue never holds more than the largest entry and two bursts are
/// never interleaved. The table position starts at the first entry on every boot.
#[derive(Clone, Debug)]
pub struct Sequencer<'a, const N: usize = QUEUE_CAPACITY> {
    mapping: Mapping<'a>,
    index: usize,
    queue: PacketQueue<N>,
}

impl<'a, const N: usize> Sequencer<'a, N> {
    /// Constructs a `Sequencer`, rejecting mappings it could not run.
    pub fn new(mapping: Mapping<'a>) -> Result<Self, ConfigError> {
        mapping.validate(N)?;
        Ok(Self {
            mapping,
            index: 0,
            queue: PacketQueue::new(),
        })
    }

    /// Handles an edge reported by the debouncer.
    pub fn on_edge(&mut self, edge: Edge) -> EdgeOutcome {
        if !self.queue.is_empty() {
            #[cfg(feature = "defmt")]
            defmt::debug!("{} dropped, {} packets still pending", edge, self.queue.len());
            return EdgeOutcome::Dropped;
        }
        if !self.mapping.responds_to(edge) {
            return EdgeOutcome::Ignored;
        }

        let Some(burst) = self.mapping.entry(self.index) else {
            return EdgeOutcome::Ignored;
        };
        if self.queue.load(burst).is_err() {
            return EdgeOutcome::Ignored;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{} selected entry {}, {} packets queued",
            edge,
            self.index,
            burst.len()
        );
        self.index = self.mapping.next_index(self.index);
        EdgeOutcome::Enqueued(burst.len())
    }

    /// Removes the next packet to transmit.
    pub fn pop(&mut self) -> Option<MidiPacket> {
        self.queue.pop()
    }

    /// Returns [`SequencerState::Draining`] while any packet is pending.
    pub fn state(&self) -> SequencerState {
        if self.queue.is_empty() {
            SequencerState::Idle
        } else {
            SequencerState::Draining
        }
    }

    /// Position of the entry the next accepted edge will select.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The packets still waiting to be transmitted.
    pub fn pending(&self) -> &PacketQueue<N> {
        &self.queue
    }

    /// The mapping in use.
    pub fn mapping(&self) -> &Mapping<'a> {
        &self.mapping
    }
}
