//! # Domain Models
//!
//! Pure data types shared by every facesync crate, with minimal dependencies
//! (`serde`, `serde_json` for open style values, `bitflags`).
//! Keep it lean: no I/O or engine calls, just data and simple helpers.

pub mod config;
pub mod events;
pub mod face;
pub mod node;
pub mod platform;
pub mod registry;
pub mod state;
pub mod style;

pub use face::FaceDescriptor;
pub use registry::{RawFaces, Registry};
pub use state::{SyncPhase, SyncState};
pub use style::{FallbackStyle, Style, StyleMap};
