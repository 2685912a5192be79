//! # Shared Context
//!
//! A typed context bus connecting one writer with many independent readers.
//!
//! ## Overview
//!
//! Values are identified by their Rust type. Two channel kinds are supported:
//!
//! * **Snapshot** (`tokio::sync::watch`): the single current value of a type. A
//!   publish replaces it wholesale, so readers hold either the old or the new
//!   snapshot and never a mix of both.
//! * **Notification** (`tokio::sync::broadcast`): transient events fanned out to
//!   every live listener.
//!
//! # Example
//!
//! ```rust
//! use facesync_context::{ContextBus, ContextError, ContextReceiverExt};
//!
//! #[derive(Debug, PartialEq)]
//! struct Generation(u64);
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ContextError> {
//!     let bus = ContextBus::new();
//!     bus.provide(Generation(0))?;
//!
//!     let mut rx = bus.consume::<Generation>()?;
//!     bus.publish(Generation(1))?;
//!
//!     assert_eq!(*rx.recv().await.unwrap(), Generation(1));
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{ChannelKind, ContextBus, ContextValue};
pub use error::{ContextError, ContextErrorExt};
pub use receiver::ContextReceiverExt;
