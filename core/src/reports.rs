//! Row types returned by the store and the reports assembled from them.
//!
//! Everything here is `Serialize + Deserialize`: the query cache keeps
//! results as JSON values and the `/api` routes return them verbatim.

use crate::types::AccountId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub display_name: String,
}

// ── Overview rows ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongPlays {
    pub song: String,
    pub album: String,
    pub total_plays: i64,
}

/// A name with a count: albums by track count, saves, followers...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTotals {
    pub songs: i64,
    pub artists: i64,
    pub albums: i64,
    pub podcasts: i64,
    pub episodes: i64,
    pub episode_runtime_secs: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewReport {
    pub totals: CatalogTotals,
    pub top_songs: Vec<SongPlays>,
    pub albums_by_track_count: Vec<NamedCount>,
    pub most_saved_albums: Vec<NamedCount>,
    pub most_followed_podcasts: Vec<NamedCount>,
    pub prolific_album_artists: Vec<String>,
    pub artists_with_most_songs: Vec<NamedCount>,
    pub most_followed_artist: Option<NamedCount>,
}

// ── Artist rows ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: AccountId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistStats {
    pub followers: i64,
    pub albums: i64,
    pub songs: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistReport {
    pub artist: ArtistSummary,
    pub stats: ArtistStats,
    pub top_songs: Vec<NamedCount>,
    pub most_saved_album: Option<NamedCount>,
}

// ── Listener rows ───────────────────────────────────────────────────────────

/// Total listening time split for display as `"{hours}h {minutes}m"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListeningTime {
    pub hours: i64,
    pub minutes: i64,
}

impl ListeningTime {
    pub fn from_seconds(total_secs: i64) -> Self {
        let total_minutes = total_secs.max(0) / 60;
        Self {
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
        }
    }
}

impl std::fmt::Display for ListeningTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerReport {
    pub account: Account,
    pub distinct_songs_played: i64,
    pub listening_seconds: i64,
    pub listening_time: ListeningTime,
    pub favorite_artist: Option<NamedCount>,
    pub favorite_album_genre: Option<NamedCount>,
    pub favorite_podcast_genre: Option<NamedCount>,
    pub top_song: Option<NamedCount>,
    pub top_episode: Option<NamedCount>,
    pub top_songs: Vec<NamedCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listening_time_splits_hours_and_minutes() {
        let t = ListeningTime::from_seconds(3 * 3600 + 25 * 60 + 59);
        assert_eq!(t, ListeningTime { hours: 3, minutes: 25 });
        assert_eq!(t.to_string(), "3h 25m");
    }

    #[test]
    fn listening_time_under_a_minute_is_zero() {
        assert_eq!(ListeningTime::from_seconds(59).to_string(), "0h 0m");
        assert_eq!(ListeningTime::from_seconds(0).to_string(), "0h 0m");
    }

    #[test]
    fn negative_seconds_clamp_to_zero() {
        assert_eq!(ListeningTime::from_seconds(-120), ListeningTime::default());
    }
}
