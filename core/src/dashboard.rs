//! Dashboard service: cached, error-tolerant access to every report.
//!
//! RULE: a failing query never reaches the page. It is logged and the
//! caller gets the empty result (empty list, `None`, zero) instead.
//!
//! The store sits behind a mutex so one connection, opened at startup,
//! serves every request for the life of the process.

use crate::{
    config::DashConfig,
    error::{DashResult, LoginError},
    query_cache::QueryCache,
    reports::{
        Account, ArtistReport, ArtistSummary, ListenerReport, ListeningTime, OverviewReport,
    },
    store::DashStore,
    types::AccountId,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

pub const TOP_SONGS_LIMIT: u32 = 5;
pub const ALBUMS_BY_TRACKS_LIMIT: u32 = 10;
pub const SAVED_ALBUMS_LIMIT: u32 = 5;
pub const FOLLOWED_PODCASTS_LIMIT: u32 = 5;
pub const PROLIFIC_ALBUM_THRESHOLD: u32 = 5;
pub const ARTIST_TOP_SONGS_LIMIT: u32 = 3;
pub const LISTENER_TOP_SONGS_LIMIT: u32 = 5;

pub struct Dashboard {
    store: Mutex<DashStore>,
    cache: QueryCache,
}

impl Dashboard {
    pub fn new(store: DashStore, cache_ttl: Duration) -> Self {
        Self {
            store: Mutex::new(store),
            cache: QueryCache::new(cache_ttl),
        }
    }

    /// Open and migrate the configured database.
    pub fn open(config: &DashConfig) -> DashResult<Self> {
        let store = DashStore::open(&config.database_path)?;
        store.migrate()?;
        let dashboard = Self::new(store, config.cache_ttl());
        log::info!(
            "Opened catalog database at {} (cache ttl {}s)",
            dashboard.lock_store().path().unwrap_or(":memory:"),
            dashboard.cache.ttl().as_secs()
        );
        Ok(dashboard)
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // ── Login ──────────────────────────────────────────────────────────

    /// Username-only login. Not memoized: a freshly created account must be
    /// able to log in immediately.
    pub fn login(&self, username: &str) -> Result<Account, LoginError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginError::EmptyUsername);
        }
        match self.lock_store().find_account_by_username(username) {
            Ok(Some(account)) => {
                log::info!("Login: {} (account {})", account.username, account.id);
                Ok(account)
            }
            Ok(None) => {
                log::warn!("Login rejected: unknown username {username:?}");
                Err(LoginError::UnknownUser)
            }
            Err(e) => {
                log::error!("Login lookup failed: {e}");
                Err(LoginError::Unavailable)
            }
        }
    }

    // ── Reports ────────────────────────────────────────────────────────

    pub fn overview(&self) -> OverviewReport {
        OverviewReport {
            totals: self.run("catalog_totals", |s| s.catalog_totals()),
            top_songs: self.run(&format!("top_songs:{TOP_SONGS_LIMIT}"), |s| {
                s.top_songs(TOP_SONGS_LIMIT)
            }),
            albums_by_track_count: self.run(
                &format!("albums_by_track_count:{ALBUMS_BY_TRACKS_LIMIT}"),
                |s| s.albums_by_track_count(ALBUMS_BY_TRACKS_LIMIT),
            ),
            most_saved_albums: self.run(&format!("most_saved_albums:{SAVED_ALBUMS_LIMIT}"), |s| {
                s.most_saved_albums(SAVED_ALBUMS_LIMIT)
            }),
            most_followed_podcasts: self.run(
                &format!("most_followed_podcasts:{FOLLOWED_PODCASTS_LIMIT}"),
                |s| s.most_followed_podcasts(FOLLOWED_PODCASTS_LIMIT),
            ),
            prolific_album_artists: self.run(
                &format!("artists_with_more_albums_than:{PROLIFIC_ALBUM_THRESHOLD}"),
                |s| s.artists_with_more_albums_than(PROLIFIC_ALBUM_THRESHOLD),
            ),
            artists_with_most_songs: self.run("artists_with_most_songs", |s| {
                s.artists_with_most_songs()
            }),
            most_followed_artist: self.run("most_followed_artist", |s| s.most_followed_artist()),
        }
    }

    pub fn artists(&self) -> Vec<ArtistSummary> {
        self.run("artists", |s| s.artists())
    }

    /// `None` when `artist_id` is not an artist (or the lookup failed).
    pub fn artist_report(&self, artist_id: AccountId) -> Option<ArtistReport> {
        let artist = self.run(&format!("artist:{artist_id}"), |s| s.artist(artist_id))?;
        Some(ArtistReport {
            artist,
            stats: self.run(&format!("artist_stats:{artist_id}"), |s| {
                s.artist_stats(artist_id)
            }),
            top_songs: self.run(
                &format!("top_songs_for_artist:{artist_id}:{ARTIST_TOP_SONGS_LIMIT}"),
                |s| s.top_songs_for_artist(artist_id, ARTIST_TOP_SONGS_LIMIT),
            ),
            most_saved_album: self.run(&format!("most_saved_album_for_artist:{artist_id}"), |s| {
                s.most_saved_album_for_artist(artist_id)
            }),
        })
    }

    pub fn listener_report(&self, account: &Account) -> ListenerReport {
        let id = account.id;
        let listening_seconds: i64 =
            self.run(&format!("listening_seconds:{id}"), |s| s.listening_seconds(id));
        ListenerReport {
            account: account.clone(),
            distinct_songs_played: self.run(&format!("distinct_songs_played:{id}"), |s| {
                s.distinct_songs_played(id)
            }),
            listening_seconds,
            listening_time: ListeningTime::from_seconds(listening_seconds),
            favorite_artist: self.run(&format!("favorite_artist:{id}"), |s| s.favorite_artist(id)),
            favorite_album_genre: self.run(&format!("favorite_album_genre:{id}"), |s| {
                s.favorite_album_genre(id)
            }),
            favorite_podcast_genre: self.run(&format!("favorite_podcast_genre:{id}"), |s| {
                s.favorite_podcast_genre(id)
            }),
            top_song: self.run(&format!("top_song_for_listener:{id}"), |s| {
                s.top_song_for_listener(id)
            }),
            top_episode: self.run(&format!("top_episode_for_listener:{id}"), |s| {
                s.top_episode_for_listener(id)
            }),
            top_songs: self.run(
                &format!("top_songs_for_listener:{id}:{LISTENER_TOP_SONGS_LIMIT}"),
                |s| s.top_songs_for_listener(id, LISTENER_TOP_SONGS_LIMIT),
            ),
        }
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// Cache lookup, then the query; on error log and fall back to default.
    fn run<T, F>(&self, key: &str, query: F) -> T
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&DashStore) -> DashResult<T>,
    {
        let result = self
            .cache
            .get_or_try_insert(key, || query(&self.lock_store()));
        match result {
            Ok(value) => value,
            Err(e) => {
                log::error!("Query {key} failed, showing empty result: {e}");
                T::default()
            }
        }
    }

    fn lock_store(&self) -> MutexGuard<'_, DashStore> {
        // A panic mid-query leaves the connection itself usable.
        self.store.lock().unwrap_or_else(|p| p.into_inner())
    }
}
