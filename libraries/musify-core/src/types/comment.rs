/// Comment domain type
use super::ids::{CommentId, TrackId, UserId};
use crate::error::{MusifyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Comments shown per track in listings
pub const MAX_COMMENTS_PER_TRACK: usize = 10;

/// A user's comment on a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub track_id: TrackId,
    pub user_id: UserId,
    pub username: String,
    pub text: String,
    pub created_at: String,
}

/// Data for posting a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub track_id: TrackId,
    pub user_id: UserId,
    pub username: String,
    pub text: String,
}

impl NewComment {
    pub fn validate(&self) -> Result<()> {
        if self.track_id.as_str().trim().is_empty()
            || self.user_id.as_str().trim().is_empty()
            || self.username.trim().is_empty()
            || self.text.trim().is_empty()
        {
            return Err(MusifyError::invalid_input("All comment fields are required"));
        }
        Ok(())
    }
}

/// Group comments by track, newest first, keeping at most `limit` per track.
///
/// Input order is irrelevant; ties on `created_at` keep input order.
pub fn group_recent_comments(
    comments: Vec<Comment>,
    limit: usize,
) -> HashMap<TrackId, Vec<Comment>> {
    let mut grouped: HashMap<TrackId, Vec<Comment>> = HashMap::new();
    for comment in comments {
        grouped
            .entry(comment.track_id.clone())
            .or_default()
            .push(comment);
    }

    for list in grouped.values_mut() {
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list.truncate(limit);
    }

    grouped.retain(|_, list| !list.is_empty());
    grouped
}
