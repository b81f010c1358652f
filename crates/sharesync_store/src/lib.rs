//! # ShareSync Store
//!
//! In-memory implementation of the ShareSync local store contracts.
//!
//! This crate provides:
//! - [`InMemoryShareStore`], share rows keyed by remote id
//! - [`InMemoryCapabilityStore`], one capability row per account
//! - Live queries republished after every write that changes their result
//! - [`StoreStats`] counters for inspecting write traffic
//!
//! ## Key Invariants
//!
//! - Writes are serialized per store
//! - A write returns only after every affected live query has been republished
//! - Live queries never emit an unchanged result

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod capability;
mod notifier;
mod share;
mod stats;

pub use capability::InMemoryCapabilityStore;
pub use share::InMemoryShareStore;
pub use stats::StoreStats;
