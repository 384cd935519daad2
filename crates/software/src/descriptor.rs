//! USB descriptors for a USB-MIDI 1.0 device with one embedded and one external jack in each direction, laid
//! out after Appendix B ("Simple MIDI Adapter") of the USB Device Class Definition for MIDI Devices.
//!
//! Stacks that build their own descriptors only need the identity constants; stacks that ask the application
//! for raw descriptor bytes call [`provide_descriptor`].

/// Vendor ID; per <https://pid.codes>, FOSS projects can be listed under the vendor ID owned by InterBiometrics.
pub const VENDOR_ID: u16 = 0x1209;
/// Product ID.
pub const PRODUCT_ID: u16 = 0xf007;
/// Device release number in binary-coded decimal.
pub const DEVICE_RELEASE: u16 = 0x0100;
/// Largest packet on the control endpoint and on both MIDI endpoints.
pub const MAX_PACKET_SIZE: u8 = 8;
/// Polling interval of the MIDI endpoints, in milliseconds.
pub const POLL_INTERVAL_MS: u8 = 10;
/// Maximum bus current, in milliamperes.
pub const MAX_POWER_MA: u8 = 100;

const DEVICE: u8 = 0x01;
const CONFIGURATION: u8 = 0x02;
const INTERFACE: u8 = 0x04;
const ENDPOINT: u8 = 0x05;
const CS_INTERFACE: u8 = 0x24;
const CS_ENDPOINT: u8 = 0x25;

const AUDIO: u8 = 0x01;
const AUDIO_CONTROL: u8 = 0x01;
const MIDI_STREAMING: u8 = 0x03;
const MIDI_IN_JACK: u8 = 0x02;
const MIDI_OUT_JACK: u8 = 0x03;
const EMBEDDED: u8 = 0x01;
const EXTERNAL: u8 = 0x02;
const INTERRUPT: u8 = 0x03;
const BUS_POWERED: u8 = 0x80;

const CONFIGURATION_LEN: u16 = 101;
const MS_CLASS_LEN: u16 = 65;

const fn lo(value: u16) -> u8 {
    value.to_le_bytes()[0]
}

const fn hi(value: u16) -> u8 {
    value.to_le_bytes()[1]
}

/// Device descriptor, 18 bytes. The device class is defined at the interface level.
pub static DEVICE_DESCRIPTOR: [u8; 18] = [
    18,     // bLength
    DEVICE, // bDescriptorType
    0x10,
    0x01, // bcdUSB 1.10
    0,    // bDeviceClass
    0,    // bDeviceSubClass
    0,    // bDeviceProtocol
    MAX_PACKET_SIZE,
    lo(VENDOR_ID),
    hi(VENDOR_ID),
    lo(PRODUCT_ID),
    hi(PRODUCT_ID),
    lo(DEVICE_RELEASE),
    hi(DEVICE_RELEASE),
    1, // iManufacturer
    2, // iProduct
    0, // iSerialNumber
    1, // bNumConfigurations
];

/// Configuration descriptor with every interface, class-specific and endpoint descriptor inlined, 101 bytes.
pub static CONFIGURATION_DESCRIPTOR: [u8; CONFIGURATION_LEN as usize] = [
    // configuration
    9,
    CONFIGURATION,
    lo(CONFIGURATION_LEN),
    hi(CONFIGURATION_LEN),
    2, // bNumInterfaces
    1, // bConfigurationValue
    0, // iConfiguration
    BUS_POWERED,
    MAX_POWER_MA / 2,
    // standard audio-control interface; no endpoints of its own, it only exists because the class requires it
    9,
    INTERFACE,
    0, // bInterfaceNumber
    0, // bAlternateSetting
    0, // bNumEndpoints
    AUDIO,
    AUDIO_CONTROL,
    0,
    0,
    // class-specific audio-control header
    9,
    CS_INTERFACE,
    0x01, // HEADER
    0x00,
    0x01, // bcdADC 1.00
    9,
    0, // wTotalLength
    1, // bInCollection
    1, // baInterfaceNr
    // standard MIDI-streaming interface
    9,
    INTERFACE,
    1, // bInterfaceNumber
    0, // bAlternateSetting
    2, // bNumEndpoints
    AUDIO,
    MIDI_STREAMING,
    0,
    0,
    // class-specific MIDI-streaming header
    7,
    CS_INTERFACE,
    0x01, // MS_HEADER
    0x00,
    0x01, // bcdMSC 1.00
    lo(MS_CLASS_LEN),
    hi(MS_CLASS_LEN),
    // MIDI IN jacks
    6,
    CS_INTERFACE,
    MIDI_IN_JACK,
    EMBEDDED,
    1, // bJackID
    0,
    6,
    CS_INTERFACE,
    MIDI_IN_JACK,
    EXTERNAL,
    2, // bJackID
    0,
    // MIDI OUT jacks
    9,
    CS_INTERFACE,
    MIDI_OUT_JACK,
    EMBEDDED,
    3, // bJackID
    1, // bNrInputPins
    2, // baSourceID
    1, // baSourcePin
    0,
    9,
    CS_INTERFACE,
    MIDI_OUT_JACK,
    EXTERNAL,
    4, // bJackID
    1, // bNrInputPins
    1, // baSourceID
    1, // baSourcePin
    0,
    // OUT endpoint 1
    9,
    ENDPOINT,
    0x01,
    INTERRUPT,
    MAX_PACKET_SIZE,
    0,
    POLL_INTERVAL_MS,
    0, // bRefresh
    0, // bSynchAddress
    5,
    CS_ENDPOINT,
    0x01, // MS_GENERAL
    1,    // bNumEmbMIDIJack
    1,    // baAssocJackID
    // IN endpoint 1
    9,
    ENDPOINT,
    0x81,
    INTERRUPT,
    MAX_PACKET_SIZE,
    0,
    POLL_INTERVAL_MS,
    0, // bRefresh
    0, // bSynchAddress
    5,
    CS_ENDPOINT,
    0x01, // MS_GENERAL
    1,    // bNumEmbMIDIJack
    3,    // baAssocJackID
];

/// Which descriptor the host asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DescriptorRequest {
    /// `GET_DESCRIPTOR(DEVICE)`.
    Device,
    /// `GET_DESCRIPTOR(CONFIGURATION)`.
    Configuration,
}

impl DescriptorRequest {
    /// Interprets the descriptor type, i.e. the high byte of `wValue` in a `GET_DESCRIPTOR` request.
    ///
    /// Only device descriptors are told apart; stacks route every other custom descriptor request here as a
    /// configuration request.
    pub const fn from_descriptor_type(descriptor_type: u8) -> Self {
        match descriptor_type {
            DEVICE => Self::Device,
            _ => Self::Configuration,
        }
    }
}

/// Returns the descriptor bytes for `request`; the slice length is the exact descriptor length.
pub fn provide_descriptor(request: DescriptorRequest) -> &'static [u8] {
    match request {
        DescriptorRequest::Device => &DEVICE_DESCRIPTOR,
        DescriptorRequest::Configuration => &CONFIGURATION_DESCRIPTOR,
    }
}
