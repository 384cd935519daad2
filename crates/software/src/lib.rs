//! This crate contains architecture-agnostic logic for Midifoot, a single-switch USB-MIDI foot controller. A
//! fixed-period tick samples the switch, turns each clean edge into the next entry of a [mapping
//! table](mapping::Mapping), and trickles the resulting [USB-MIDI event packets](packet::MidiPacket) out to the
//! host one per tick, as fast as the USB stack will take them.
//!
//! The [`FootController`](controller::FootController) is the whole of the device's mutable state; the firmware
//! owns one and calls [`tick`](controller::FootController::tick) from its timer task.

#![deny(missing_docs)]
#![no_std]

pub mod controller;
pub mod debouncer;
pub mod descriptor;
pub mod mapping;
pub mod packet;
pub mod queue;
pub mod sequencer;
pub mod transport;
