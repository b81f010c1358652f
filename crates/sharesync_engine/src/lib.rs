//! # ShareSync Engine
//!
//! Cache-then-refresh engine and repositories for ShareSync.
//!
//! This crate provides:
//! - [`NetworkBoundResource`], which emits the cache, refreshes it from the
//!   server and reports the outcome as a live [`Resource`](sharesync_core::Resource) sequence
//! - A [`RefreshCoordinator`] serializing writes per scope and coalescing
//!   concurrent refreshes of the same scope
//! - Share, capability and sharee repositories
//! - Use cases that await a repository call and reshape its outcome
//!
//! ## Architecture
//!
//! Every cached read follows the same flow:
//! 1. Emit `Loading` with the current cache
//! 2. Fetch from the server and persist, off the observing context
//! 3. Emit `Success` with the cache as re-read after the persist, or
//!    `Error` with the last known cache
//!
//! ## Key Invariants
//!
//! - The first state of every sequence is `Loading`
//! - The fetch-triggered terminal state is emitted exactly once
//! - A failed refresh never touches the cache
//! - A refresh replaces its whole scope; an empty answer evicts it
//! - Writes to one scope never interleave

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod bound;
mod config;
mod context;
mod coordinator;
mod executor;
mod live;
pub mod repository;
mod usecase;

pub use bound::{CacheStrategy, NetworkBoundResource};
pub use config::{EngineConfig, RetryConfig};
pub use context::EngineContext;
pub use coordinator::{
    Follower, Join, LeaderGuard, RefreshCoordinator, RefreshOutcome, RefreshStats, Scope,
};
pub use executor::TaskExecutor;
pub use live::LiveResource;
pub use repository::{CapabilityRepository, ShareRepository, ShareeRepository};
pub use usecase::{
    CreatePrivateShareUseCase, CreatePublicShareUseCase, DeleteShareUseCase,
    EditPrivateShareUseCase, EditPublicShareUseCase, GetPrivateSharesUseCase,
    GetPublicSharesUseCase, RefreshCapabilitiesUseCase, SearchShareesUseCase, UseCaseResult,
};
