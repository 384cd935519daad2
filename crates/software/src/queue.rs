//! Provides [`PacketQueue`], the bounded FIFO holding the burst that is waiting to go out.

use crate::packet::MidiPacket;
use core::fmt;
use tinyvec::{ArrayVec, array_vec};

/// Default number of packets a [`PacketQueue`] can hold, i.e. the longest burst a mapping entry may contain.
pub const QUEUE_CAPACITY: usize = 16;

/// Reasons a burst cannot be loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// Packets from the previous burst are still pending.
    Busy,
    /// The burst holds more packets than the queue can.
    Overflow,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "queue still holds pending packets"),
            Self::Overflow => write!(f, "burst exceeds queue capacity"),
        }
    }
}

/// A fixed-capacity FIFO of [`MidiPacket`]s.
///
/// Bursts are loaded whole and only into an empty queue, so storage never has to wrap: packets are read from a
/// moving head and the storage is cleared once the head reaches the end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PacketQueue<const N: usize = QUEUE_CAPACITY> {
    data: ArrayVec<[MidiPacket; N]>,
    /// Index of the next packet to pop.
    head: usize,
}

impl<const N: usize> Default for PacketQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PacketQueue<N> {
    /// Construct an empty `PacketQueue`.
    pub fn new() -> Self {
        Self {
            data: array_vec!(),
            head: 0,
        }
    }

    /// Copies `burst` into the queue, in order.
    pub fn load(&mut self, burst: &[MidiPacket]) -> Result<(), QueueError> {
        if !self.is_empty() {
            return Err(QueueError::Busy);
        }
        if burst.len() > N {
            return Err(QueueError::Overflow);
        }
        self.data.clear();
        self.head = 0;
        self.data.extend_from_slice(burst);
        Ok(())
    }

    /// Removes and returns the oldest packet.
    pub fn pop(&mut self) -> Option<MidiPacket> {
        let packet = self.data.get(self.head).copied()?;
        self.head += 1;
        if self.head == self.data.len() {
            self.data.clear();
            self.head = 0;
        }
        Some(packet)
    }

    /// The oldest packet, without removing it.
    pub fn peek(&self) -> Option<&MidiPacket> {
        self.data.get(self.head)
    }

    /// Number of pending packets.
    pub fn len(&self) -> usize {
        self.data.len() - self.head
    }

    /// Returns `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of packets the queue can hold.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns an [`Iterator`] over the pending packets, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &MidiPacket> {
        self.data[self.head..].iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(note: u8) -> MidiPacket {
        MidiPacket::note_on(0, 0, note, 100)
    }

    #[test]
    fn new_is_empty() {
        let queue = PacketQueue::<4>::new();
        assert!(queue.is_empty());
        assert_eq!(0, queue.len());
        assert_eq!(None, queue.peek());
        assert_eq!(4, queue.capacity());
    }

    #[test]
    fn pops_in_load_order() {
        let burst = [packet(60), packet(64), packet(67)];
        let mut queue = PacketQueue::<4>::new();
        queue.load(&burst).unwrap();

        assert_eq!(3, queue.len());
        assert_eq!(Some(&packet(60)), queue.peek());
        assert_eq!(Some(packet(60)), queue.pop(), "Expected left but got right");
        assert_eq!(Some(packet(64)), queue.pop(), "Expected left but got right");
        assert_eq!(1, queue.len());
        assert_eq!(Some(packet(67)), queue.pop(), "Expected left but got right");
        assert_eq!(None, queue.pop(), "Expected queue to be drained");
        assert!(queue.is_empty());
    }

    #[test]
    fn load_while_pending_is_busy() {
        let mut queue = PacketQueue::<4>::new();
        queue.load(&[packet(60), packet(62)]).unwrap();
        queue.pop();

        assert_eq!(
            Err(QueueError::Busy),
            queue.load(&[packet(72)]),
            "Expected left but got right"
        );
        assert_eq!(
            [packet(62)].as_slice(),
            queue.iter().copied().collect::<ArrayVec<[MidiPacket; 4]>>().as_slice(),
            "Pending packets should be untouched"
        );
    }

    #[test]
    fn load_rejects_oversized_burst() {
        let mut queue = PacketQueue::<2>::new();
        assert_eq!(
            Err(QueueError::Overflow),
            queue.load(&[packet(60), packet(62), packet(64)]),
            "Expected left but got right"
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn reloads_from_the_start_after_draining() {
        let mut queue = PacketQueue::<3>::new();
        queue.load(&[packet(60), packet(62), packet(64)]).unwrap();
        while queue.pop().is_some() {}

        queue.load(&[packet(65), packet(67), packet(69)]).unwrap();
        assert_eq!(3, queue.len(), "Full capacity should be available again");
        assert_eq!(Some(packet(65)), queue.pop(), "Expected left but got right");
    }

    #[test]
    fn full_capacity_burst() {
        let burst = [packet(1); QUEUE_CAPACITY];
        let mut queue = PacketQueue::<QUEUE_CAPACITY>::default();
        assert_eq!(Ok(()), queue.load(&burst));
        assert_eq!(QUEUE_CAPACITY, queue.len());
    }
}
