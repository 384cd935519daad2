//! The mapping table: what the foot switch sends.
//!
//! A [`Mapping`] is chosen once, at build time, and never changes while the device runs. Entries are visited
//! round-robin, one per accepted [`Edge`]; the order of the table is the only ordering there is.

use crate::{debouncer::Edge, packet::MidiPacket};
use core::{fmt, slice};

pub mod presets;

/// Which [`MidiPacket`]s to emit on each edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mapping<'a> {
    /// The same packet on every press. Releases send nothing.
    Fixed(&'a MidiPacket),
    /// One packet per edge, presses and releases alike, cycling through the table.
    RoundRobinSingle(&'a [MidiPacket]),
    /// A burst of packets per edge, presses and releases alike, cycling through the table. Bursts may differ in
    /// length.
    RoundRobinBurst(&'a [&'a [MidiPacket]]),
}

/// A [`Mapping`] that the sequencer cannot run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The table has no entries.
    EmptyTable,
    /// The entry at `index` has no packets.
    EmptyEntry {
        /// Position of the offending entry.
        index: usize,
    },
    /// The entry at `index` holds more packets than the queue can.
    EntryTooLong {
        /// Position of the offending entry.
        index: usize,
        /// Number of packets in the entry.
        len: usize,
        /// Capacity of the queue.
        capacity: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTable => write!(f, "mapping table has no entries"),
            Self::EmptyEntry { index } => write!(f, "mapping entry {index} has no packets"),
            Self::EntryTooLong {
                index,
                len,
                capacity,
            } => write!(
                f,
                "mapping entry {index} holds {len} packets but the queue holds {capacity}"
            ),
        }
    }
}

impl<'a> Mapping<'a> {
    /// Number of entries in the table.
    pub const fn len(&self) -> usize {
        match *self {
            Self::Fixed(_) => 1,
            Self::RoundRobinSingle(packets) => packets.len(),
            Self::RoundRobinBurst(entries) => entries.len(),
        }
    }

    /// Returns `true` if the table has no entries. Such a table never passes [`validate`](Self::validate).
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The packets of the entry at `index`, or `None` past the end of the table.
    pub fn entry(&self, index: usize) -> Option<&'a [MidiPacket]> {
        match *self {
            Self::Fixed(packet) if index == 0 => Some(slice::from_ref(packet)),
            Self::Fixed(_) => None,
            Self::RoundRobinSingle(packets) => packets.get(index).map(slice::from_ref),
            Self::RoundRobinBurst(entries) => entries.get(index).copied(),
        }
    }

    /// Whether an [`Edge`] of this kind selects an entry at all.
    pub const fn responds_to(&self, edge: Edge) -> bool {
        match self {
            Self::Fixed(_) => matches!(edge, Edge::Press),
            Self::RoundRobinSingle(_) | Self::RoundRobinBurst(_) => true,
        }
    }

    /// The entry that follows `index`, wrapping to the first after the last.
    pub const fn next_index(&self, index: usize) -> usize {
        match self.len() {
            0 => 0,
            len => (index + 1) % len,
        }
    }

    /// Checks that every entry has at least one packet and fits in a queue of `capacity` packets.
    ///
    /// This is a `const fn` so a table can be rejected at compile time:
    ///
    /// ```
    /// use midifoot_lib::{mapping::presets::CHORD_BURSTS, queue::QUEUE_CAPACITY};
    ///
    /// const _: () = assert!(CHORD_BURSTS.validate(QUEUE_CAPACITY).is_ok());
    /// ```
    pub const fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        match *self {
            Self::Fixed(_) => check_len(0, 1, capacity),
            Self::RoundRobinSingle(packets) => {
                if packets.is_empty() {
                    Err(ConfigError::EmptyTable)
                } else {
                    check_len(0, 1, capacity)
                }
            }
            Self::RoundRobinBurst(entries) => {
                if entries.is_empty() {
                    return Err(ConfigError::EmptyTable);
                }
                let mut index = 0;
                while index < entries.len() {
                    if let Err(e) = check_len(index, entries[index].len(), capacity) {
                        return Err(e);
                    }
                    index += 1;
                }
                Ok(())
            }
        }
    }
}

const fn check_len(index: usize, len: usize, capacity: usize) -> Result<(), ConfigError> {
    if len == 0 {
        Err(ConfigError::EmptyEntry { index })
    } else if len > capacity {
        Err(ConfigError::EntryTooLong {
            index,
            len,
            capacity,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: MidiPacket = MidiPacket::note_on(0, 0, 60, 100);
    const B: MidiPacket = MidiPacket::note_on(0, 0, 62, 100);
    const C: MidiPacket = MidiPacket::note_on(0, 0, 64, 100);

    #[test]
    fn fixed_has_one_entry() {
        let mapping = Mapping::Fixed(&A);
        assert_eq!(1, mapping.len());
        assert_eq!(Some(&[A][..]), mapping.entry(0), "Expected left but got right");
        assert_eq!(None, mapping.entry(1), "Expected nothing past the end");
    }

    #[test]
    fn fixed_responds_only_to_press() {
        let mapping = Mapping::Fixed(&A);
        assert!(mapping.responds_to(Edge::Press), "Should respond to press");
        assert!(!mapping.responds_to(Edge::Release), "Should ignore release");
    }

    #[test]
    fn round_robin_responds_to_both_edges() {
        let packets = [A, B];
        let single = Mapping::RoundRobinSingle(&packets);
        let burst = Mapping::RoundRobinBurst(&[&[A], &[B, C]]);
        for mapping in [single, burst] {
            assert!(mapping.responds_to(Edge::Press), "Should respond to press");
            assert!(
                mapping.responds_to(Edge::Release),
                "Should respond to release"
            );
        }
    }

    #[test]
    fn single_entries_hold_one_packet() {
        let packets = [A, B, C];
        let mapping = Mapping::RoundRobinSingle(&packets);
        assert_eq!(3, mapping.len());
        assert_eq!(Some(&[B][..]), mapping.entry(1), "Expected left but got right");
        assert_eq!(None, mapping.entry(3), "Expected nothing past the end");
    }

    #[test]
    fn burst_entries_keep_their_order() {
        let mapping = Mapping::RoundRobinBurst(&[&[A], &[C, B, A]]);
        assert_eq!(
            Some(&[C, B, A][..]),
            mapping.entry(1),
            "Expected left but got right"
        );
    }

    #[test]
    fn next_index_wraps() {
        let packets = [A, B, C];
        let mapping = Mapping::RoundRobinSingle(&packets);
        assert_eq!(1, mapping.next_index(0));
        assert_eq!(2, mapping.next_index(1));
        assert_eq!(0, mapping.next_index(2), "Should wrap to the first entry");
        assert_eq!(0, Mapping::Fixed(&A).next_index(0), "Should stay put");
    }

    #[test]
    fn validate_accepts_good_tables() {
        let packets = [A, B];
        assert_eq!(Ok(()), Mapping::Fixed(&A).validate(1));
        assert_eq!(Ok(()), Mapping::RoundRobinSingle(&packets).validate(1));
        assert_eq!(
            Ok(()),
            Mapping::RoundRobinBurst(&[&[A], &[A, B, C]]).validate(3)
        );
    }

    #[test]
    fn validate_rejects_empty_table() {
        assert_eq!(
            Err(ConfigError::EmptyTable),
            Mapping::RoundRobinSingle(&[]).validate(16)
        );
        assert_eq!(
            Err(ConfigError::EmptyTable),
            Mapping::RoundRobinBurst(&[]).validate(16)
        );
        assert!(Mapping::RoundRobinBurst(&[]).is_empty());
    }

    #[test]
    fn validate_rejects_empty_entry() {
        assert_eq!(
            Err(ConfigError::EmptyEntry { index: 1 }),
            Mapping::RoundRobinBurst(&[&[A], &[], &[B]]).validate(16)
        );
    }

    #[test]
    fn validate_rejects_oversized_entry() {
        assert_eq!(
            Err(ConfigError::EntryTooLong {
                index: 2,
                len: 3,
                capacity: 2
            }),
            Mapping::RoundRobinBurst(&[&[A], &[A, B], &[A, B, C]]).validate(2)
        );
        assert_eq!(
            Err(ConfigError::EntryTooLong {
                index: 0,
                len: 1,
                capacity: 0
            }),
            Mapping::Fixed(&A).validate(0)
        );
    }
}
