//! Build-time configuration. The mapping is picked with one of the `mapping-*` cargo features, e.g.
//!
//! ```text
//! cargo run --release --no-default-features --features debug,mapping-burst
//! ```

use embassy_time::Duration;
use midifoot_lib::{
    mapping::{Mapping, presets},
    queue::QUEUE_CAPACITY,
};

#[cfg(any(
    all(feature = "mapping-fixed", feature = "mapping-round-robin"),
    all(feature = "mapping-fixed", feature = "mapping-burst"),
    all(feature = "mapping-round-robin", feature = "mapping-burst"),
))]
compile_error!("only one `mapping-*` feature may be enabled");

#[cfg(not(any(
    feature = "mapping-fixed",
    feature = "mapping-round-robin",
    feature = "mapping-burst",
)))]
compile_error!("one `mapping-*` feature must be enabled");

/// Time between two samples of the foot switch, and so between two transmitted packets of a burst.
pub const TICK: Duration = Duration::from_micros(200);

/// What the switch sends.
#[cfg(feature = "mapping-fixed")]
pub const MAPPING: Mapping<'static> = presets::FIXED_NOTE;
#[cfg(feature = "mapping-round-robin")]
pub const MAPPING: Mapping<'static> = presets::NOTE_CYCLE;
#[cfg(feature = "mapping-burst")]
pub const MAPPING: Mapping<'static> = presets::CHORD_BURSTS;

const _: () = assert!(
    MAPPING.validate(QUEUE_CAPACITY).is_ok(),
    "the selected mapping has an empty entry or a burst longer than the packet queue"
);
