//! The seam between the core and the USB stack, and the drainer that feeds it.

use crate::{packet::MidiPacket, sequencer::Sequencer};

/// The two primitives the core needs from the USB stack.
///
/// Neither call may block. The stack is polled elsewhere (see the firmware's USB task); the core never sees
/// how packets actually reach the host.
pub trait Transport {
    /// Whether a packet can be handed over right now. Must be checked before every [`send_packet`] call.
    ///
    /// [`send_packet`]: Self::send_packet
    fn is_ready_to_send(&self) -> bool;

    /// Hands a packet to the stack. Callers guarantee [`is_ready_to_send`](Self::is_ready_to_send) returned
    /// `true` immediately beforehand.
    fn send_packet(&mut self, packet: MidiPacket);
}

/// Transmits at most one pending packet.
///
/// Nothing is popped unless the transport is ready, so a packet that cannot go out stays at the head of the
/// queue until a later tick. Returns the packet that was sent, if any.
pub fn drain<const N: usize>(
    sequencer: &mut Sequencer<'_, N>,
    transport: &mut impl Transport,
) -> Option<MidiPacket> {
    if sequencer.pending().is_empty() || !transport.is_ready_to_send() {
        return None;
    }
    let packet = sequencer.pop()?;
    transport.send_packet(packet);
    Some(packet)
}
