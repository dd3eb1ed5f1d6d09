//! Upload flow types.

use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;

/// The payload to store, as picked by the user.
#[derive(Debug, Clone)]
pub struct UploadSource {
    pub content_type: String,
    pub bytes: Bytes,
}

/// Which record receives the stored object's URL at commit time.
#[derive(Debug, Clone)]
pub enum CommitTarget {
    /// The signed-in user's avatar.
    Avatar,
    /// A character's portrait image.
    CharacterPortrait { character_id: String },
}

impl CommitTarget {
    pub(crate) fn acquire_path(&self) -> String {
        match self {
            CommitTarget::Avatar => "/api/user/avatar/upload-url".to_string(),
            CommitTarget::CharacterPortrait { character_id } => {
                format!("/api/characters/{character_id}/portrait/upload-url")
            }
        }
    }

    pub(crate) fn commit_path(&self) -> String {
        match self {
            CommitTarget::Avatar => "/api/user/avatar".to_string(),
            CommitTarget::CharacterPortrait { character_id } => {
                format!("/api/characters/{character_id}/portrait")
            }
        }
    }

    pub(crate) fn commit_body(&self, final_url: &str) -> serde_json::Value {
        match self {
            CommitTarget::Avatar => json!({ "avatarUrl": final_url }),
            CommitTarget::CharacterPortrait { .. } => json!({ "portraitUrl": final_url }),
        }
    }
}

/// Short-lived write credential plus the eventual public location.
/// Exists only for the duration of one upload call; never persisted.
#[derive(Debug, Clone)]
pub struct UploadTicket {
    pub content_type: String,
    pub upload_url: String,
    pub final_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AcquireResponse {
    pub upload_url: String,
    #[serde(alias = "avatarUrl", alias = "portraitUrl")]
    pub final_url: String,
}
