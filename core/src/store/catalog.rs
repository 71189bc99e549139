use super::DashStore;
use crate::{
    error::DashResult,
    types::{AccountId, ContentId, TrackId},
};
use chrono::NaiveDate;
use rusqlite::params;

/// An album or podcast row: both live in `content`.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub id: ContentId,
    pub name: String,
    pub genre: String,
    pub artist_id: AccountId,
    pub release_date: NaiveDate,
}

/// A song (parent = album) or an episode (parent = podcast).
#[derive(Debug, Clone)]
pub struct NewTrack {
    pub id: TrackId,
    pub name: String,
    pub parent_id: ContentId,
    pub duration_secs: i64,
}

impl DashStore {
    // ── Catalog writes (seeder and tests) ──────────────────────────────

    pub fn insert_artist(&self, account_id: AccountId) -> DashResult<()> {
        self.conn.execute(
            "INSERT INTO artist (artist_id) VALUES (?1)",
            params![account_id],
        )?;
        Ok(())
    }

    fn insert_content(&self, c: &NewContent) -> DashResult<()> {
        self.conn.execute(
            "INSERT INTO content (id, name, genre, artist_id, release_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                c.id,
                &c.name,
                &c.genre,
                c.artist_id,
                c.release_date.format("%Y-%m-%d").to_string(),
            ],
        )?;
        Ok(())
    }

    pub fn insert_album(&self, c: &NewContent) -> DashResult<()> {
        self.insert_content(c)?;
        self.conn
            .execute("INSERT INTO album (album_id) VALUES (?1)", params![c.id])?;
        Ok(())
    }

    pub fn insert_podcast(&self, c: &NewContent) -> DashResult<()> {
        self.insert_content(c)?;
        self.conn
            .execute("INSERT INTO podcast (podcast_id) VALUES (?1)", params![c.id])?;
        Ok(())
    }

    pub fn insert_song(&self, t: &NewTrack) -> DashResult<()> {
        self.conn.execute(
            "INSERT INTO song (song_id, name, album_id, duration_secs) VALUES (?1, ?2, ?3, ?4)",
            params![t.id, &t.name, t.parent_id, t.duration_secs],
        )?;
        Ok(())
    }

    pub fn insert_episode(&self, t: &NewTrack) -> DashResult<()> {
        self.conn.execute(
            "INSERT INTO episode (episode_id, name, podcast_id, duration_secs)
             VALUES (?1, ?2, ?3, ?4)",
            params![t.id, &t.name, t.parent_id, t.duration_secs],
        )?;
        Ok(())
    }

    // ── Playback counters ──────────────────────────────────────────────

    /// Add `plays` to the listener's counter for a song.
    pub fn record_song_plays(
        &self,
        account_id: AccountId,
        song_id: TrackId,
        plays: i64,
    ) -> DashResult<()> {
        self.conn.execute(
            "INSERT INTO song_play (account_id, song_id, play_count) VALUES (?1, ?2, ?3)
             ON CONFLICT(account_id, song_id) DO UPDATE SET
                play_count = play_count + excluded.play_count",
            params![account_id, song_id, plays],
        )?;
        Ok(())
    }

    /// Add `plays` to the listener's counter for an episode.
    pub fn record_episode_plays(
        &self,
        account_id: AccountId,
        episode_id: TrackId,
        plays: i64,
    ) -> DashResult<()> {
        self.conn.execute(
            "INSERT INTO episode_play (account_id, episode_id, play_count) VALUES (?1, ?2, ?3)
             ON CONFLICT(account_id, episode_id) DO UPDATE SET
                play_count = play_count + excluded.play_count",
            params![account_id, episode_id, plays],
        )?;
        Ok(())
    }

    // ── Follows and saves ──────────────────────────────────────────────

    pub fn insert_follow(&self, follower_id: AccountId, followed_id: AccountId) -> DashResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO follow (follower_id, followed_id) VALUES (?1, ?2)",
            params![follower_id, followed_id],
        )?;
        Ok(())
    }

    pub fn insert_album_save(&self, account_id: AccountId, album_id: ContentId) -> DashResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO album_save (account_id, album_id) VALUES (?1, ?2)",
            params![account_id, album_id],
        )?;
        Ok(())
    }

    pub fn insert_podcast_follow(
        &self,
        account_id: AccountId,
        podcast_id: ContentId,
    ) -> DashResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO podcast_follow (account_id, podcast_id) VALUES (?1, ?2)",
            params![account_id, podcast_id],
        )?;
        Ok(())
    }
}
