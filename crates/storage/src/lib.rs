//! Snapshot storage backends for ActivateFlow.
//!
//! The [`FunnelStore`] trait is the seam between the HTTP layer and
//! persistence. Two backends are provided: [`MemoryStore`] for tests and
//! ephemeral serving, and [`SledStore`] for on-disk persistence. The
//! [`conformance`] module holds a backend-agnostic test suite that both
//! backends run.

pub mod conformance;
mod disk;
mod error;
mod memory;
mod traits;

pub use disk::SledStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use traits::FunnelStore;
