//! # ShareSync Core
//!
//! Shared vocabulary for the ShareSync cache-then-refresh stack.
//!
//! This crate provides:
//! - [`Resource`], the Loading / Success / Error container every repository emits
//! - Error taxonomy and [`ResultCode`] mapping for remote failures
//! - Share, capability and sharee models
//! - Share permission bits and presets
//! - Local store and remote source contracts, plus the [`LiveQuery`] primitive
//!
//! ## Key Invariants
//!
//! - The server is authoritative; the local store is a cache of its last answer
//! - Every persisted row is scoped by its owning account
//! - An `Error` resource may still carry the last known cached data

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod live;
mod local;
pub mod model;
pub mod permissions;
mod remote;
mod resource;

pub use error::{
    ErrorCause, RemoteError, RemoteResult, ResultCode, ShareSyncError, StoreError, StoreResult,
    SyncResult,
};
pub use live::{live_channel, LivePublisher, LiveQuery};
pub use local::{LocalCapabilityStore, LocalShareStore};
pub use model::{
    CapabilityEntity, CapabilityFlag, PublicSharingCapability, ServerVersion, ShareEntity,
    ShareType, Sharee,
};
pub use remote::{
    CreateShareRequest, RemoteCapability, RemoteCapabilitySource, RemoteShare,
    RemoteShareSource, RemoteShareeSource, UpdateShareRequest,
};
pub use resource::{Resource, Status};
