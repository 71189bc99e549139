use super::{named_count_row, DashStore};
use crate::{error::DashResult, reports::NamedCount, types::AccountId};
use rusqlite::{params, OptionalExtension};

impl DashStore {
    // ── Listener: per-account statistics ───────────────────────────────

    /// Number of distinct songs the account has a playback counter for.
    pub fn distinct_songs_played(&self, account_id: AccountId) -> DashResult<i64> {
        let n = self.conn.query_row(
            "SELECT COUNT(*) FROM song_play WHERE account_id = ?1",
            params![account_id],
            |row| row.get(0),
        )?;
        Ok(n)
    }

    /// Σ duration × plays over the account's songs. Zero when nothing was played.
    pub fn listening_seconds(&self, account_id: AccountId) -> DashResult<i64> {
        let secs = self.conn.query_row(
            "SELECT COALESCE(SUM(s.duration_secs * sp.play_count), 0)
             FROM song_play sp
             JOIN song s ON sp.song_id = s.song_id
             WHERE sp.account_id = ?1",
            params![account_id],
            |row| row.get(0),
        )?;
        Ok(secs)
    }

    /// Artist with the most song and episode plays combined.
    pub fn favorite_artist(&self, account_id: AccountId) -> DashResult<Option<NamedCount>> {
        self.conn
            .query_row(
                "WITH song_totals AS (
                    SELECT c.artist_id, SUM(sp.play_count) AS plays
                    FROM song_play sp
                    JOIN song s    ON sp.song_id = s.song_id
                    JOIN album a   ON s.album_id = a.album_id
                    JOIN content c ON a.album_id = c.id
                    WHERE sp.account_id = ?1
                    GROUP BY c.artist_id
                 ),
                 episode_totals AS (
                    SELECT c.artist_id, SUM(ep.play_count) AS plays
                    FROM episode_play ep
                    JOIN episode e ON ep.episode_id = e.episode_id
                    JOIN podcast p ON e.podcast_id = p.podcast_id
                    JOIN content c ON p.podcast_id = c.id
                    WHERE ep.account_id = ?1
                    GROUP BY c.artist_id
                 )
                 SELECT acc.display_name, SUM(t.plays) AS total_plays
                 FROM (
                    SELECT artist_id, plays FROM song_totals
                    UNION ALL
                    SELECT artist_id, plays FROM episode_totals
                 ) AS t
                 JOIN artist ar   ON t.artist_id = ar.artist_id
                 JOIN account acc ON ar.artist_id = acc.id
                 GROUP BY acc.display_name
                 ORDER BY total_plays DESC, acc.display_name ASC
                 LIMIT 1",
                params![account_id],
                named_count_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn favorite_album_genre(&self, account_id: AccountId) -> DashResult<Option<NamedCount>> {
        self.conn
            .query_row(
                "SELECT c.genre, SUM(sp.play_count) AS total_plays
                 FROM song_play sp
                 JOIN song s    ON sp.song_id = s.song_id
                 JOIN album a   ON s.album_id = a.album_id
                 JOIN content c ON a.album_id = c.id
                 WHERE sp.account_id = ?1
                 GROUP BY c.genre
                 ORDER BY total_plays DESC, c.genre ASC
                 LIMIT 1",
                params![account_id],
                named_count_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn favorite_podcast_genre(&self, account_id: AccountId) -> DashResult<Option<NamedCount>> {
        self.conn
            .query_row(
                "SELECT c.genre, SUM(ep.play_count) AS total_plays
                 FROM episode_play ep
                 JOIN episode e ON ep.episode_id = e.episode_id
                 JOIN podcast p ON e.podcast_id = p.podcast_id
                 JOIN content c ON p.podcast_id = c.id
                 WHERE ep.account_id = ?1
                 GROUP BY c.genre
                 ORDER BY total_plays DESC, c.genre ASC
                 LIMIT 1",
                params![account_id],
                named_count_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn top_song_for_listener(&self, account_id: AccountId) -> DashResult<Option<NamedCount>> {
        Ok(self.top_songs_for_listener(account_id, 1)?.into_iter().next())
    }

    pub fn top_episode_for_listener(
        &self,
        account_id: AccountId,
    ) -> DashResult<Option<NamedCount>> {
        self.conn
            .query_row(
                "SELECT e.name, ep.play_count
                 FROM episode_play ep
                 JOIN episode e ON ep.episode_id = e.episode_id
                 WHERE ep.account_id = ?1
                 ORDER BY ep.play_count DESC, e.name ASC
                 LIMIT 1",
                params![account_id],
                named_count_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn top_songs_for_listener(
        &self,
        account_id: AccountId,
        limit: u32,
    ) -> DashResult<Vec<NamedCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.name, sp.play_count
             FROM song_play sp
             JOIN song s ON sp.song_id = s.song_id
             WHERE sp.account_id = ?1
             ORDER BY sp.play_count DESC, s.name ASC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![account_id, limit], named_count_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
