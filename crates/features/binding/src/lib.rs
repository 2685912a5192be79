//! # Font Binding
//!
//! Consumer side of facesync: a [`FontBinder`] turns a requested face name into the
//! style one rendering node should use, asking the font engine to bind the face to
//! the node's native handle when the published registry carries it.
//! [`FadeTransition`] wraps a binder with an opacity fade around face swaps, and
//! [`lookup`] is the one-shot form without presentation.

mod animator;
mod binder;
mod error;
mod lookup;
mod resolver;
mod transition;

pub use animator::{Animator, TimerAnimator};
pub use binder::{BindOutcome, BindingRequest, BindingResult, FontBinder, PendingBind, Prepared};
pub use error::{BindError, BindErrorExt};
pub use lookup::lookup;
pub use resolver::NodeHandleResolver;
pub use transition::FadeTransition;
