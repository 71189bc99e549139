use super::{named_count_row, DashStore};
use crate::{
    error::DashResult,
    reports::{ArtistStats, ArtistSummary, NamedCount},
    types::AccountId,
};
use rusqlite::{params, OptionalExtension};

impl DashStore {
    // ── Artist ─────────────────────────────────────────────────────────

    pub fn artists(&self) -> DashResult<Vec<ArtistSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT acc.id, acc.display_name
             FROM artist ar
             JOIN account acc ON acc.id = ar.artist_id
             ORDER BY acc.display_name ASC, acc.id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ArtistSummary {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn artist(&self, artist_id: AccountId) -> DashResult<Option<ArtistSummary>> {
        self.conn
            .query_row(
                "SELECT acc.id, acc.display_name
                 FROM artist ar
                 JOIN account acc ON acc.id = ar.artist_id
                 WHERE ar.artist_id = ?1",
                params![artist_id],
                |row| {
                    Ok(ArtistSummary {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// The artist's songs ranked by plays summed over every listener.
    pub fn top_songs_for_artist(
        &self,
        artist_id: AccountId,
        limit: u32,
    ) -> DashResult<Vec<NamedCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.name, SUM(sp.play_count) AS total_plays
             FROM song s
             JOIN song_play sp ON sp.song_id = s.song_id
             JOIN album a      ON s.album_id = a.album_id
             JOIN content c    ON a.album_id = c.id
             WHERE c.artist_id = ?1
             GROUP BY s.song_id, s.name
             ORDER BY total_plays DESC, s.name ASC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![artist_id, limit], named_count_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn most_saved_album_for_artist(
        &self,
        artist_id: AccountId,
    ) -> DashResult<Option<NamedCount>> {
        self.conn
            .query_row(
                "SELECT c.name, COUNT(sv.album_id) AS saves
                 FROM album_save sv
                 JOIN album a   ON sv.album_id = a.album_id
                 JOIN content c ON a.album_id = c.id
                 WHERE c.artist_id = ?1
                 GROUP BY c.name
                 ORDER BY saves DESC, c.name ASC
                 LIMIT 1",
                params![artist_id],
                named_count_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn artist_stats(&self, artist_id: AccountId) -> DashResult<ArtistStats> {
        self.conn
            .query_row(
                "SELECT
                    (SELECT COUNT(*) FROM follow WHERE followed_id = ?1),
                    (SELECT COUNT(*) FROM album a JOIN content c ON a.album_id = c.id
                     WHERE c.artist_id = ?1),
                    (SELECT COUNT(*) FROM song s
                     JOIN album a   ON s.album_id = a.album_id
                     JOIN content c ON a.album_id = c.id
                     WHERE c.artist_id = ?1)",
                params![artist_id],
                |row| {
                    Ok(ArtistStats {
                        followers: row.get(0)?,
                        albums: row.get(1)?,
                        songs: row.get(2)?,
                    })
                },
            )
            .map_err(Into::into)
    }
}
