mod comment;
mod ids;
mod playlist;
mod track;
mod user;

pub use comment::{group_recent_comments, Comment, NewComment, MAX_COMMENTS_PER_TRACK};
pub use ids::{CommentId, PlaylistId, TrackId, UserId};
pub use playlist::{Playlist, DEFAULT_PLAYLIST_NAME};
pub use track::{NewTrack, Track, TrackScope, Visibility, DEFAULT_TRACK_DURATION_SECS};
pub use user::{Identity, RegisterUser, User};

use chrono::{SecondsFormat, Utc};

/// Current time as an RFC 3339 string with microsecond precision
///
/// Stored timestamps use this format so that lexical order matches
/// chronological order.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
