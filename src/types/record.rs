//! Records as returned by the data source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A content item. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            region: None,
            profession: None,
            created_at,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_profession(mut self, profession: impl Into<String>) -> Self {
        self.profession = Some(profession.into());
        self
    }
}

/// Reaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Share,
    Comment,
    /// Kinds this build does not know about; counted nowhere.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub post_id: String,
    pub kind: ReactionKind,
}

impl Reaction {
    pub fn new(post_id: impl Into<String>, kind: ReactionKind) -> Self {
        Self {
            post_id: post_id.into(),
            kind,
        }
    }

    pub fn like(post_id: impl Into<String>) -> Self {
        Self::new(post_id, ReactionKind::Like)
    }

    pub fn share(post_id: impl Into<String>) -> Self {
        Self::new(post_id, ReactionKind::Share)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub post_id: String,
}

impl Comment {
    pub fn on(post_id: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
        }
    }
}
