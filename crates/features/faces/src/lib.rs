//! # Font Faces
//!
//! Validation and normalization of declarative font-face registries.
//!
//! The application declares faces as a raw mapping keyed by logical font name.
//! [`FaceValidator`] checks every entry, normalizes weights through the
//! platform strategy and produces an immutable [`Registry`] that is safe to
//! expose to consumers.
//!
//! ```rust
//! use facesync_faces::{FaceValidator, parse_raw_faces};
//! use facesync_kernel::platform::Platform;
//!
//! # fn main() -> Result<(), facesync_faces::FaceError> {
//! let raw = parse_raw_faces(r#"{
//!     "Ubuntu": { "uri": "https://fonts.example/ubuntu-bold.ttf", "fontFamily": "Ubuntu", "fontWeight": "Bold" }
//! }"#)?;
//!
//! let registry = FaceValidator::new(Platform::android()).validate(&raw)?;
//! assert_eq!(registry.get("Ubuntu").unwrap().font_weight(), "bold");
//! # Ok(())
//! # }
//! ```

mod error;
pub mod validator;

pub use crate::error::{FaceError, FaceErrorExt};
pub use crate::validator::{FaceValidator, parse_raw_faces};
pub use facesync_domain::{RawFaces, Registry};
