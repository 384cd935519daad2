//! Adapts `embassy-usb`'s [`MidiClass`] to the non-blocking [`Transport`] the controller expects.
//!
//! The tick task cannot await a USB write, so packets are handed to [`midi_task`] through a [`Signal`]. Two flags
//! tell the tick task whether a hand-off is possible: the host must have configured the MIDI interface, and the
//! previous packet must have been written. These statics are the only state shared between the two tasks.

use crate::UsbDriver;
use core::sync::atomic::{AtomicBool, Ordering};
use defmt::{panic, *};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_usb::{class::midi::MidiClass, driver::EndpointError};
use midifoot_lib::{packet::MidiPacket, transport::Transport};

/// Set while the host has the MIDI interface configured.
static CONNECTED: AtomicBool = AtomicBool::new(false);

/// Set from the hand-off of a packet until its USB write has completed.
static IN_FLIGHT: AtomicBool = AtomicBool::new(false);

/// The packet waiting to be written.
static OUTBOX: Signal<CriticalSectionRawMutex, MidiPacket> = Signal::new();

/// Handle through which the tick task sends packets. Holds no state of its own.
pub struct UsbTransport {
    _private: (),
}

impl UsbTransport {
    /// Constructs a `UsbTransport`. Only one should exist, owned by the tick task.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Transport for UsbTransport {
    fn is_ready_to_send(&self) -> bool {
        CONNECTED.load(Ordering::Acquire) && !IN_FLIGHT.load(Ordering::Acquire)
    }

    fn send_packet(&mut self, packet: MidiPacket) {
        if IN_FLIGHT.swap(true, Ordering::AcqRel) {
            warn!("{} handed over while another packet was in flight", packet);
        }
        OUTBOX.signal(packet);
    }
}

/// Writes handed-over packets to the interrupt IN endpoint, one at a time.
#[embassy_executor::task]
pub async fn midi_task(mut class: MidiClass<'static, UsbDriver>) -> ! {
    loop {
        class.wait_connection().await;
        // anything left over from the previous connection was addressed to a host that is gone
        OUTBOX.reset();
        IN_FLIGHT.store(false, Ordering::Release);
        CONNECTED.store(true, Ordering::Release);
        info!("USB connected");

        let _ = write_packets(&mut class).await;

        CONNECTED.store(false, Ordering::Release);
        info!("USB disconnected");
    }
}

#[doc(hidden)]
struct Disconnected {}

impl From<EndpointError> for Disconnected {
    fn from(val: EndpointError) -> Self {
        match val {
            EndpointError::BufferOverflow => panic!("Buffer overflow"),
            EndpointError::Disabled => Disconnected {},
        }
    }
}

async fn write_packets(class: &mut MidiClass<'static, UsbDriver>) -> Result<(), Disconnected> {
    loop {
        let packet = OUTBOX.wait().await;
        class.write_packet(&packet.bytes()).await?;
        IN_FLIGHT.store(false, Ordering::Release);
        debug!("Sent {}", packet);
    }
}
