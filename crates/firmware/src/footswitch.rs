//! The periodic tick: the only place the controller state is touched.

use crate::{configuration::TICK, transport::UsbTransport};
use embassy_stm32::gpio::Input;
use embassy_time::Ticker;
use midifoot_lib::controller::FootController;

/// Samples the switch every [`TICK`] and drives the controller.
///
/// The controller is moved into this task, so nothing else can read or write the switch level or the queue.
/// Each iteration does a bounded amount of work and then waits for the next tick. Edge decisions are logged by
/// the sequencer itself and sent packets by [`midi_task`](crate::transport::midi_task).
#[embassy_executor::task]
pub async fn footswitch(
    switch: Input<'static>,
    mut controller: FootController<'static>,
    mut transport: UsbTransport,
) -> ! {
    let mut ticker = Ticker::every(TICK);
    loop {
        controller.tick(switch.is_high(), &mut transport);
        ticker.next().await;
    }
}
