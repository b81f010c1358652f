//! Sharee search results.

use super::ShareType;
use serde::{Deserialize, Serialize};

/// A candidate recipient returned by a sharee search.
///
/// Never persisted; order is the server's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sharee {
    /// Text to display for this candidate.
    pub label: String,
    /// Kind of recipient.
    pub share_type: ShareType,
    /// Value to pass as `share_with` when creating the share.
    pub share_with: String,
    /// Extra detail, usually an e-mail.
    pub additional_info: Option<String>,
}
