//! Test fixtures and data generators
//!
//! Request bodies and the slices of response bodies the tests look at.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Counter for unique ids across tests in one binary
static COUNTER: AtomicU64 = AtomicU64::new(1_000);

pub fn unique_id() -> String {
    COUNTER.fetch_add(1, Ordering::SeqCst).to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CreatePost {
    pub fn new() -> Self {
        Self {
            id: None,
            author_id: unique_id(),
            created_at: None,
        }
    }

    pub fn aged(age: Duration) -> Self {
        Self {
            created_at: Some(Utc::now() - age),
            ..Self::new()
        }
    }
}

impl Default for CreatePost {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct React {
    pub actor_id: String,
    pub kind: String,
}

impl React {
    pub fn new(actor_id: &str, kind: &str) -> Self {
        Self {
            actor_id: actor_id.to_string(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub actor_id: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl NewComment {
    pub fn top(body: &str) -> Self {
        Self {
            actor_id: unique_id(),
            body: body.to_string(),
            parent_id: None,
        }
    }

    pub fn reply(parent_id: &str, body: &str) -> Self {
        Self {
            parent_id: Some(parent_id.to_string()),
            ..Self::top(body)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EditComment {
    pub body: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Signals {
    pub reaction_total: u64,
    pub sentiment: i64,
    pub comment_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    pub id: String,
    pub author_id: String,
    pub signals: Signals,
    pub reactions: HashMap<String, u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionChangeBody {
    pub previous: Option<String>,
    pub current: Option<String>,
    pub tally: HashMap<String, u64>,
    pub sentiment: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionSummaryBody {
    pub total: u64,
    pub sentiment: i64,
    pub me: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    pub id: String,
    pub parent_id: Option<String>,
    pub body: Option<String>,
    pub deleted: bool,
}

#[derive(Debug, Deserialize)]
pub struct ThreadNodeBody {
    pub id: String,
    pub depth: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItemBody {
    pub id: String,
    pub signals: Signals,
    pub hot_score: f64,
}

#[derive(Debug, Deserialize)]
pub struct FeedBody {
    pub sort: String,
    pub items: Vec<FeedItemBody>,
}

impl FeedBody {
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }
}
