//! PariharaNav - Reactive obstacle avoidance for differential-drive robots
//!
//! Consumes planar range-scan frames and emits velocity commands. The
//! controller watches three fixed bearings (straight ahead plus two
//! near-forward flanks) and decides, once per frame:
//!
//! - all three bearings clear: drive forward
//! - any bearing blocked: rotate in place (counter-clockwise)
//! - obstacle immediately ahead: back away for a fixed hold time, then
//!   re-evaluate and emit a final command
//!
//! The transport that delivers scans and accepts commands is an external
//! collaborator; see [`transport`] for the seam.

pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod scan;
pub mod transport;

// Re-export commonly used types
pub use command::VelocityCommand;
pub use config::PariharaConfig;
pub use controller::AvoidanceController;
pub use error::{PariharaError, Result};
pub use scan::ScanFrame;
