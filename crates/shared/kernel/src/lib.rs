//! Kernel utilities shared across the facesync slices.
//! Keep this crate lightweight: the platform strategy every slice consults, and
//! layered configuration loading.
//!
//! ## Platform strategy
//! ```rust
//! use facesync_kernel::platform::Platform;
//!
//! let android = Platform::android();
//! assert_eq!(android.normalize_weight("Bold"), "bold");
//! assert_eq!(Platform::ios().normalize_weight("Bold"), "Bold");
//! ```
//!
//! ## Config loading (non-wasm)
//! ```rust,ignore
//! use facesync_domain::config::ProviderConfig;
//! use facesync_kernel::config::load_config;
//!
//! let cfg: ProviderConfig = load_config(Some("fonts")).unwrap_or_default();
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod platform;

pub use facesync_domain as domain;
