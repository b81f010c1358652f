//! Domain models persisted by the local store or returned by searches.

mod capability;
mod share;
mod sharee;

pub use capability::{CapabilityEntity, CapabilityFlag, PublicSharingCapability, ServerVersion};
pub use share::{ShareEntity, ShareType};
pub use sharee::Sharee;
