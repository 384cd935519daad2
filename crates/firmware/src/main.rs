//! Midifoot is [Embassy](https://embassy.dev)-based firmware for a single-switch USB-MIDI foot controller. The
//! firmware runs on the [Nucleo-F767ZI development board](https://www.st.com/en/evaluation-tools/nucleo-f767zi.html),
//! which is powered by an F7-series STM32 microcontroller.
//!
//! Every 200 µs the foot switch is sampled; each press or release selects the next entry of a mapping table
//! chosen at build time (see [`configuration`]) and the packets of that entry are sent to the host over the
//! USB-MIDI interrupt endpoint, one per tick. The logic lives in `midifoot_lib`; this crate wires it to the
//! hardware.

#![no_std]
#![no_main]

mod configuration;
mod footswitch;
mod transport;

use crate::transport::UsbTransport;
use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::{
    Config, bind_interrupts,
    gpio::{Input, Pull},
    peripherals,
    time::Hertz,
    usb,
};
use embassy_usb::{Builder, UsbDevice, class::midi::MidiClass};
use midifoot_lib::{controller::FootController, descriptor};
use static_cell::StaticCell;

use defmt_rtt as _;
#[cfg(not(feature = "panic-probe"))]
use panic_halt as _;
#[cfg(feature = "panic-probe")]
use panic_probe as _;

bind_interrupts!(
    #[doc(hidden)]
    struct Irqs {
        OTG_FS => usb::InterruptHandler<peripherals::USB_OTG_FS>;
    }
);

type UsbDriver = usb::Driver<'static, peripherals::USB_OTG_FS>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Initializing Midifoot");

    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        // hse: high-speed external clock
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Bypass,
        });

        // pll: phase-locked loop, crucial for dividing clock
        config.rcc.pll_src = PllSource::HSE;
        config.rcc.pll = Some(Pll {
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL216,
            divp: Some(PllPDiv::DIV2), // 8mhz / 4 * 216 / 2 = 216Mhz
            // per section 5.2 of RM0410: the 48MHz clock used for USB OTG FS is derived from main PLL VCO (PLLQ clock)
            divq: Some(PllQDiv::DIV9), // 8mhz / 4 * 216 / 9 = 48Mhz
            divr: None,
        });
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV4;
        config.rcc.apb2_pre = APBPrescaler::DIV2;
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.mux.clk48sel = mux::Clk48sel::PLL1_Q;
    }
    let p = embassy_stm32::init(config);

    // the switch connects the pin to ground, so it idles high through the pull-up and reads low while pressed
    let switch = Input::new(p.PD1, Pull::Up);
    let controller = unwrap!(FootController::new(configuration::MAPPING));
    info!(
        "Mapping has {} entries; sampling every {} us",
        configuration::MAPPING.len(),
        configuration::TICK.as_micros()
    );

    // Create the driver, from the HAL.
    static ENDPOINT_OUT_BUFFER: StaticCell<[u8; 256]> = StaticCell::new();
    let mut config = embassy_stm32::usb::Config::default();

    // USB devices which are self-powered (i.e., that can stay powered on if unplugged from the host)
    // need to enable vbus_detection to comply with the USB spec. Per section 6.10 of the Nucleo board
    // manual (UM1974), CN13 (the USB port) cannot power the board; external power is necessary.
    // See docs on `vbus_detection` for details.
    config.vbus_detection = true;

    let driver = usb::Driver::new_fs(
        p.USB_OTG_FS,
        Irqs,
        p.PA12,
        p.PA11,
        ENDPOINT_OUT_BUFFER.init([0; 256]),
        config,
    );

    let mut config = embassy_usb::Config::new(descriptor::VENDOR_ID, descriptor::PRODUCT_ID);
    config.device_release = descriptor::DEVICE_RELEASE;
    config.manufacturer = Some("Midifoot");
    config.product = Some("Midifoot USB-MIDI foot switch");
    config.self_powered = true;
    config.max_power = 0;

    // Create embassy-usb DeviceBuilder using the driver and config.
    // It needs some buffers for building the descriptors.
    static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static CONTROL_BUFFER: StaticCell<[u8; 64]> = StaticCell::new();

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        &mut [], // no msos descriptors
        CONTROL_BUFFER.init([0; 64]),
    );

    // one jack in each direction, as in the adapter layout of `descriptor`; nothing is ever read from the host
    let class = MidiClass::new(&mut builder, 1, 1, 64);

    // Build the builder.
    let usb = builder.build();

    unwrap!(spawner.spawn(usb_task(usb)));
    unwrap!(spawner.spawn(transport::midi_task(class)));
    unwrap!(spawner.spawn(footswitch::footswitch(
        switch,
        controller,
        UsbTransport::new()
    )));
}

/// Services the USB bus: enumeration, control transfers and endpoint events.
#[embassy_executor::task]
async fn usb_task(mut usb: UsbDevice<'static, UsbDriver>) -> ! {
    usb.run().await
}
