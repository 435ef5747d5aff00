// Commentary DTOs
//
// Reader comments attached to a blog post. New comments always start
// unapproved; moderation happens through an update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Commentary {
    pub id: String,
    pub blog_id: String,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    #[serde(default)]
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentary {
    pub blog_id: String,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    /// Comments posted from the admin side may be approved up front
    #[serde(default)]
    pub approved: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

/// Commentary resource
pub struct Commentaries;

impl Resource for Commentaries {
    type Id = String;
    type Item = Commentary;
    type Create = CreateCommentary;
    type Update = UpdateCommentary;

    const KIND: ResourceKind = ResourceKind::Commentaries;
}
