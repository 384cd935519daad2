//! Mapping tables bundled with the firmware. One of them is selected through a cargo feature.

use super::Mapping;
use crate::packet::MidiPacket;

const CABLE: u8 = 0;
const CHANNEL: u8 = 0;
const VELOCITY: u8 = 0x7f;

const fn on(note: u8) -> MidiPacket {
    MidiPacket::note_on(CABLE, CHANNEL, note, VELOCITY)
}

const fn off(note: u8) -> MidiPacket {
    MidiPacket::note_off(CABLE, CHANNEL, note, 0)
}

/// Note On for E4 (MIDI note 64) at full velocity on every press: `{0x09, 0x90, 0x40, 0x7F}`.
pub const FIXED_NOTE: Mapping<'static> = Mapping::Fixed(&E4_ON);

const E4_ON: MidiPacket = on(0x40);

const SCALE: [MidiPacket; 16] = [
    on(60),
    off(60),
    on(62),
    off(62),
    on(64),
    off(64),
    on(65),
    off(65),
    on(67),
    off(67),
    on(69),
    off(69),
    on(71),
    off(71),
    on(72),
    off(72),
];

/// Walks up the C major scale from C4, one note per press: each press sounds the next note and the matching
/// release silences it.
pub const NOTE_CYCLE: Mapping<'static> = Mapping::RoundRobinSingle(&SCALE);

const C_MAJOR_ON: [MidiPacket; 6] = [on(48), on(52), on(55), on(60), on(64), on(67)];
const C_MAJOR_OFF: [MidiPacket; 6] = [off(48), off(52), off(55), off(60), off(64), off(67)];
const F_MAJOR_ON: [MidiPacket; 3] = [on(53), on(57), on(60)];
const F_MAJOR_OFF: [MidiPacket; 3] = [off(53), off(57), off(60)];

/// Alternates between two chords, held for as long as the switch is down: a C major triad doubled across two
/// octaves, then a close F major triad.
pub const CHORD_BURSTS: Mapping<'static> =
    Mapping::RoundRobinBurst(&[&C_MAJOR_ON, &C_MAJOR_OFF, &F_MAJOR_ON, &F_MAJOR_OFF]);
