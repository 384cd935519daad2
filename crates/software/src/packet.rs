//! Provides [`MidiPacket`], the 32-bit USB-MIDI Event Packet handed to the transport.
//!
//! Byte 0 is the Packet Header: the cable number in the high nibble and the Code Index Number (CIN) in the low
//! nibble. The CIN tells the host how many of the remaining three bytes carry the MIDI message; unused bytes are
//! zero-padded.

use core::fmt;
use wmidi::{FromBytesError, MidiMessage};

/// A single USB-MIDI Event Packet.
///
/// Packets in the mapping table are built with the `const` constructors so that whole tables can live in
/// `static` memory. [`Default`] yields four zero bytes, which is only meaningful as queue filler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MidiPacket([u8; 4]);

/// Reasons a [`MidiMessage`] cannot be carried by a single [`MidiPacket`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// System Exclusive messages span several packets, which this device never sends.
    Unsupported,
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "message does not fit in a single USB-MIDI event packet"),
        }
    }
}

impl MidiPacket {
    /// Constructs a packet from its raw bytes.
    pub const fn new(header: u8, status: u8, data1: u8, data2: u8) -> Self {
        Self([header, status, data1, data2])
    }

    /// Constructs a packet for a channel voice message, deriving the Packet Header from the status byte.
    ///
    /// For channel voice messages the CIN equals the high nibble of the status byte.
    pub const fn channel_voice(cable: u8, status: u8, data1: u8, data2: u8) -> Self {
        Self::new(((cable & 0x0f) << 4) | (status >> 4), status, data1, data2)
    }

    /// Note On; `channel` is zero-based.
    pub const fn note_on(cable: u8, channel: u8, note: u8, velocity: u8) -> Self {
        Self::channel_voice(cable, 0x90 | (channel & 0x0f), note & 0x7f, velocity & 0x7f)
    }

    /// Note Off; `channel` is zero-based.
    pub const fn note_off(cable: u8, channel: u8, note: u8, velocity: u8) -> Self {
        Self::channel_voice(cable, 0x80 | (channel & 0x0f), note & 0x7f, velocity & 0x7f)
    }

    /// Control Change; `channel` is zero-based.
    pub const fn control_change(cable: u8, channel: u8, control: u8, value: u8) -> Self {
        Self::channel_voice(cable, 0xb0 | (channel & 0x0f), control & 0x7f, value & 0x7f)
    }

    /// Program Change; `channel` is zero-based. The unused third byte is zero.
    pub const fn program_change(cable: u8, channel: u8, program: u8) -> Self {
        Self::channel_voice(cable, 0xc0 | (channel & 0x0f), program & 0x7f, 0)
    }

    /// The four bytes as they go out on the wire.
    pub const fn bytes(&self) -> [u8; 4] {
        self.0
    }

    /// Virtual cable number, 0 through 15.
    pub const fn cable(&self) -> u8 {
        self.0[0] >> 4
    }

    /// Code Index Number.
    pub const fn code_index(&self) -> u8 {
        self.0[0] & 0x0f
    }

    /// Number of payload bytes that belong to the MIDI message, per the CIN table of the USB-MIDI 1.0 class
    /// specification.
    pub const fn message_len(&self) -> usize {
        match self.code_index() {
            0x5 | 0xf => 1,
            0x2 | 0x6 | 0xc | 0xd => 2,
            _ => 3,
        }
    }

    /// Decodes the MIDI message carried by this packet.
    pub fn message(&self) -> Result<MidiMessage<'_>, FromBytesError> {
        MidiMessage::from_bytes(&self.0[1..1 + self.message_len()])
    }
}

impl TryFrom<&MidiMessage<'_>> for MidiPacket {
    type Error = PacketError;

    /// Wraps a message on cable 0.
    fn try_from(msg: &MidiMessage<'_>) -> Result<Self, Self::Error> {
        if let MidiMessage::SysEx(_) = msg {
            return Err(PacketError::Unsupported);
        }

        let mut data = [0_u8; 3];
        let len = msg
            .copy_to_slice(&mut data)
            .map_err(|_| PacketError::Unsupported)?;
        let status = data[0];
        let code_index = match (status, len) {
            (0x80..=0xef, _) => status >> 4,
            (0xf8..=0xff, _) => 0xf,
            (_, 1) => 0x5,
            (_, 2) => 0x2,
            (_, 3) => 0x3,
            _ => return Err(PacketError::Unsupported),
        };

        Ok(Self::new(code_index, data[0], data[1], data[2]))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MidiPacket {
    fn format(&self, fmt: defmt::Formatter) {
        match self.message() {
            Ok(MidiMessage::NoteOn(channel, note, velocity)) => defmt::write!(
                fmt,
                "NoteOn {{ cable: {}, channel: {}, note: {}, velocity: {} }}",
                self.cable(),
                channel.number(),
                note.to_str(),
                u8::from(velocity)
            ),
            Ok(MidiMessage::NoteOff(channel, note, velocity)) => defmt::write!(
                fmt,
                "NoteOff {{ cable: {}, channel: {}, note: {}, velocity: {} }}",
                self.cable(),
                channel.number(),
                note.to_str(),
                u8::from(velocity)
            ),
            Ok(MidiMessage::ControlChange(channel, control, value)) => defmt::write!(
                fmt,
                "ControlChange {{ cable: {}, channel: {}, control: {}, value: {} }}",
                self.cable(),
                channel.number(),
                u8::from(control),
                u8::from(value)
            ),
            _ => defmt::write!(fmt, "MidiPacket {{ bytes: {:x} }}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wmidi::{Channel, ControlFunction, Note, U7};

    #[test]
    fn note_on_header() {
        let packet = MidiPacket::note_on(0, 0, 0x40, 0x7f);
        assert_eq!(
            [0x09, 0x90, 0x40, 0x7f],
            packet.bytes(),
            "Expected left but got right"
        );
    }

    #[test]
    fn cable_lands_in_high_nibble() {
        let packet = MidiPacket::control_change(3, 1, 64, 127);
        assert_eq!(
            [0x3b, 0xb1, 64, 127],
            packet.bytes(),
            "Expected left but got right"
        );
        assert_eq!(3, packet.cable());
        assert_eq!(0xb, packet.code_index());
    }

    #[test]
    fn program_change_is_padded() {
        let packet = MidiPacket::program_change(0, 9, 5);
        assert_eq!(
            [0x0c, 0xc9, 5, 0],
            packet.bytes(),
            "Expected left but got right"
        );
        assert_eq!(2, packet.message_len());
    }

    #[test]
    fn data_bytes_are_masked() {
        let packet = MidiPacket::note_off(0, 0x12, 0xff, 0x80);
        assert_eq!(
            [0x08, 0x82, 0x7f, 0x00],
            packet.bytes(),
            "Expected left but got right"
        );
    }

    #[test]
    fn message_len() {
        assert_eq!(3, MidiPacket::new(0x09, 0x90, 0, 0).message_len());
        assert_eq!(2, MidiPacket::new(0x0d, 0xd0, 0, 0).message_len());
        assert_eq!(1, MidiPacket::new(0x0f, 0xf8, 0, 0).message_len());
        assert_eq!(1, MidiPacket::new(0x05, 0xf6, 0, 0).message_len());
    }

    #[test]
    fn decodes_message() {
        let packet = MidiPacket::new(0x09, 0x90, 0x40, 0x7f);
        assert_eq!(
            Ok(MidiMessage::NoteOn(
                Channel::Ch1,
                Note::E4,
                U7::from_u8_lossy(0x7f)
            )),
            packet.message(),
            "Expected left but got right"
        );
    }

    #[test]
    fn decodes_padded_message() {
        let packet = MidiPacket::program_change(0, 0, 12);
        assert_eq!(
            Ok(MidiMessage::ProgramChange(
                Channel::Ch1,
                U7::from_u8_lossy(12)
            )),
            packet.message(),
            "Expected left but got right"
        );
    }

    #[test]
    fn from_channel_voice_message() {
        let msg = MidiMessage::ControlChange(
            Channel::Ch2,
            ControlFunction::DAMPER_PEDAL,
            U7::from_u8_lossy(127),
        );
        assert_eq!(
            Ok(MidiPacket::control_change(0, 1, 64, 127)),
            MidiPacket::try_from(&msg),
            "Expected left but got right"
        );
    }

    #[test]
    fn from_realtime_message() {
        assert_eq!(
            Ok(MidiPacket::new(0x0f, 0xf8, 0, 0)),
            MidiPacket::try_from(&MidiMessage::TimingClock),
            "Expected left but got right"
        );
    }

    #[test]
    fn from_sysex_is_unsupported() {
        let payload = [U7::from_u8_lossy(1), U7::from_u8_lossy(2)];
        assert_eq!(
            Err(PacketError::Unsupported),
            MidiPacket::try_from(&MidiMessage::SysEx(&payload)),
            "Expected left but got right"
        );
    }
}
