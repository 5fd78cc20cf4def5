//! Desktop audio for recitation playback
//!
//! Clips are downloaded through the asset cache, decoded with Symphonia,
//! converted to the device format with Rubato and played through CPAL.

pub mod decode;
pub mod output;
pub mod resample;

pub use decode::{decode_clip, DecodedClip};
pub use output::{Completion, DesktopOutput};
pub use resample::prepare_for_device;
