//! Rotation synchronizer
//!
//! Keeps the angular-step timer in step with the arm. Once per revolution
//! the measured rotation period is divided into `resolution` equal steps
//! and the step timer is reprogrammed, so a change of motor speed moves
//! the step grid with it instead of smearing the picture.

pub mod rotation;
pub mod scale;

pub use rotation::{
    update_resolution_time, EngineTimer, PictureTimer, SyncOutcome, SyncRejection, SyncRules,
};
pub use scale::TickScale;
