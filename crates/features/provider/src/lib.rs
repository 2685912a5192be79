//! # Font Provider
//!
//! The registry synchronizer of facesync. A [`FontsProvider`] validates the
//! application's raw font-face registry, pushes it to a [`FontEngine`] and
//! publishes the settled [`SyncState`](facesync_domain::SyncState) on a
//! [`ContextBus`](facesync_context::ContextBus) for every bound node to read.
//!
//! ```rust,ignore
//! let provider = FontsProvider::builder(engine)
//!     .font_faces(raw)
//!     .on_download_did_error(|err| tracing::warn!(%err, "fonts unavailable"))
//!     .mount()
//!     .await?;
//!
//! let mut states = provider.subscribe()?;
//! ```

mod builder;
mod engine;
mod error;
mod listeners;
mod provider;

pub use builder::ProviderBuilder;
pub use engine::{EngineError, EngineErrorExt, FontEngine};
pub use error::{SyncError, SyncErrorExt};
pub use listeners::{DownloadListener, DownloadListeners, ErrorListener};
pub use provider::{FontsProvider, SyncOutcome};
