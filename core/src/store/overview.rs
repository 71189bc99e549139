use super::{named_count_row, DashStore};
use crate::{
    error::DashResult,
    reports::{CatalogTotals, NamedCount, SongPlays},
};
use rusqlite::{params, OptionalExtension};

impl DashStore {
    // ── Overview: whole-catalog rankings ───────────────────────────────

    /// Songs ranked by plays summed over every listener.
    pub fn top_songs(&self, limit: u32) -> DashResult<Vec<SongPlays>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.name, c.name, SUM(sp.play_count) AS total_plays
             FROM song_play sp
             JOIN song s    ON sp.song_id = s.song_id
             JOIN album a   ON s.album_id = a.album_id
             JOIN content c ON a.album_id = c.id
             GROUP BY s.song_id, s.name, c.name
             ORDER BY total_plays DESC, s.name ASC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok(SongPlays {
                song: row.get(0)?,
                album: row.get(1)?,
                total_plays: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Albums ranked by number of songs. Albums sharing a name are merged.
    pub fn albums_by_track_count(&self, limit: u32) -> DashResult<Vec<NamedCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.name, COUNT(s.song_id) AS tracks
             FROM song s
             JOIN album a   ON s.album_id = a.album_id
             JOIN content c ON a.album_id = c.id
             GROUP BY c.name
             ORDER BY tracks DESC, c.name ASC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], named_count_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn most_saved_albums(&self, limit: u32) -> DashResult<Vec<NamedCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.name, COUNT(sv.account_id) AS saves
             FROM album_save sv
             JOIN album a   ON sv.album_id = a.album_id
             JOIN content c ON a.album_id = c.id
             GROUP BY c.name
             ORDER BY saves DESC, c.name ASC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], named_count_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn most_followed_podcasts(&self, limit: u32) -> DashResult<Vec<NamedCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.name, COUNT(pf.account_id) AS followers
             FROM podcast_follow pf
             JOIN podcast p ON pf.podcast_id = p.podcast_id
             JOIN content c ON p.podcast_id = c.id
             GROUP BY c.name
             ORDER BY followers DESC, c.name ASC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], named_count_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Names of artists with strictly more than `min_albums` albums.
    pub fn artists_with_more_albums_than(&self, min_albums: u32) -> DashResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT acc.display_name
             FROM account acc
             JOIN artist ar ON ar.artist_id = acc.id
             JOIN content c ON c.artist_id = ar.artist_id
             JOIN album al  ON al.album_id = c.id
             GROUP BY acc.display_name
             HAVING COUNT(al.album_id) > ?1
             ORDER BY acc.display_name ASC",
        )?;
        let rows = stmt.query_map(params![min_albums], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Every artist tied for the most published songs.
    pub fn artists_with_most_songs(&self) -> DashResult<Vec<NamedCount>> {
        let mut stmt = self.conn.prepare(
            "WITH per_artist AS (
                SELECT acc.display_name AS name, COUNT(s.song_id) AS songs
                FROM account acc
                JOIN artist ar ON ar.artist_id = acc.id
                JOIN content c ON c.artist_id = ar.artist_id
                JOIN album al  ON al.album_id = c.id
                JOIN song s    ON s.album_id = al.album_id
                GROUP BY acc.display_name
             )
             SELECT name, songs FROM per_artist
             WHERE songs = (SELECT MAX(songs) FROM per_artist)
             ORDER BY name ASC",
        )?;
        let rows = stmt.query_map([], named_count_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn most_followed_artist(&self) -> DashResult<Option<NamedCount>> {
        self.conn
            .query_row(
                "SELECT acc.display_name, COUNT(f.follower_id) AS followers
                 FROM follow f
                 JOIN account acc ON f.followed_id = acc.id
                 JOIN artist ar   ON ar.artist_id = acc.id
                 GROUP BY acc.display_name
                 ORDER BY followers DESC, acc.display_name ASC
                 LIMIT 1",
                [],
                named_count_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn catalog_totals(&self) -> DashResult<CatalogTotals> {
        self.conn
            .query_row(
                "SELECT
                    (SELECT COUNT(*) FROM song),
                    (SELECT COUNT(*) FROM artist),
                    (SELECT COUNT(*) FROM album),
                    (SELECT COUNT(*) FROM podcast),
                    (SELECT COUNT(*) FROM episode),
                    (SELECT COALESCE(SUM(duration_secs), 0) FROM episode)",
                [],
                |row| {
                    Ok(CatalogTotals {
                        songs: row.get(0)?,
                        artists: row.get(1)?,
                        albums: row.get(2)?,
                        podcasts: row.get(3)?,
                        episodes: row.get(4)?,
                        episode_runtime_secs: row.get(5)?,
                    })
                },
            )
            .map_err(Into::into)
    }
}
