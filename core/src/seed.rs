//! Demo catalog seeder.
//!
//! Fills an empty database with a synthetic but plausible streaming
//! catalog so the dashboard has something to show. Same seed, same data.

use crate::{
    error::{DashError, DashResult},
    name_generator::{NameGenerator, ALBUM_GENRES, PODCAST_GENRES},
    rng::{RngBank, SeedStream},
    store::{DashStore, NewContent, NewTrack},
    types::{AccountId, ContentId, TrackId},
};
use chrono::{Days, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct SeedPlan {
    pub seed: u64,
    pub listeners: u32,
    pub artists: u32,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            seed: 42,
            listeners: 200,
            artists: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub accounts: i64,
    pub artists: i64,
    pub albums: i64,
    pub songs: i64,
    pub podcasts: i64,
    pub episodes: i64,
    pub song_play_rows: i64,
}

const MAX_ALBUMS_PER_ARTIST: i64 = 8;
const PODCAST_HOST_PROBABILITY: f64 = 0.3;
const MAX_PLAYS_PER_ROW: f64 = 500.0;

/// Populate `store` according to `plan`. The database must have no accounts yet.
pub fn seed_catalog(store: &DashStore, plan: SeedPlan) -> DashResult<SeedSummary> {
    if plan.artists == 0 {
        return Err(DashError::InvalidConfig {
            reason: "a catalog needs at least one artist".into(),
        });
    }
    if store.account_count()? > 0 {
        return Err(DashError::InvalidConfig {
            reason: "database already has accounts; seed an empty database".into(),
        });
    }

    let summary = store.in_transaction(|s| Seeder::new(s, plan).run())?;
    log::info!(
        "Seeded catalog (seed {}): {} accounts, {} artists, {} albums, {} songs, {} podcasts",
        plan.seed,
        summary.accounts,
        summary.artists,
        summary.albums,
        summary.songs,
        summary.podcasts
    );
    Ok(summary)
}

struct Seeder<'a> {
    store: &'a DashStore,
    plan: SeedPlan,
    bank: RngBank,
    summary: SeedSummary,
    artist_ids: Vec<AccountId>,
    listener_ids: Vec<AccountId>,
    album_ids: Vec<ContentId>,
    podcast_ids: Vec<ContentId>,
    song_ids: Vec<TrackId>,
    episode_ids: Vec<TrackId>,
    next_content_id: ContentId,
}

impl<'a> Seeder<'a> {
    fn new(store: &'a DashStore, plan: SeedPlan) -> Self {
        Self {
            store,
            plan,
            bank: RngBank::new(plan.seed),
            summary: SeedSummary::default(),
            artist_ids: Vec::new(),
            listener_ids: Vec::new(),
            album_ids: Vec::new(),
            podcast_ids: Vec::new(),
            song_ids: Vec::new(),
            episode_ids: Vec::new(),
            next_content_id: 1,
        }
    }

    fn run(mut self) -> DashResult<SeedSummary> {
        self.accounts()?;
        self.catalog()?;
        self.plays()?;
        self.social()?;
        Ok(self.summary)
    }

    fn accounts(&mut self) -> DashResult<()> {
        let mut rng = self.bank.for_stream(SeedStream::Accounts);
        log::debug!("Seeding {} stream", rng.name);
        let epoch = base_date();
        let total = i64::from(self.plan.artists) + i64::from(self.plan.listeners);
        for id in 1..=total {
            let is_artist = id <= i64::from(self.plan.artists);
            let display_name = if is_artist {
                NameGenerator::artist_name(&mut rng)
            } else {
                NameGenerator::full_name(&mut rng)
            };
            let username = NameGenerator::username(&display_name, id);
            let created_on = offset(epoch, rng.between(0, 1500));
            self.store
                .insert_account(id, &username, &display_name, created_on)?;
            if is_artist {
                self.store.insert_artist(id)?;
                self.artist_ids.push(id);
            } else {
                self.listener_ids.push(id);
            }
        }
        self.summary.accounts = total;
        self.summary.artists = self.artist_ids.len() as i64;
        Ok(())
    }

    fn catalog(&mut self) -> DashResult<()> {
        let mut rng = self.bank.for_stream(SeedStream::Catalog);
        log::debug!("Seeding {} stream", rng.name);
        let epoch = base_date();
        let artists = self.artist_ids.clone();
        for artist_id in artists {
            let genre = *rng.pick(ALBUM_GENRES);
            for _ in 0..rng.between(1, MAX_ALBUMS_PER_ARTIST) {
                let album = NewContent {
                    id: self.take_content_id(),
                    name: NameGenerator::album_title(&mut rng),
                    genre: genre.to_string(),
                    artist_id,
                    release_date: offset(epoch, rng.between(0, 1800)),
                };
                self.store.insert_album(&album)?;
                self.album_ids.push(album.id);

                for _ in 0..rng.between(3, 12) {
                    let song = NewTrack {
                        id: self.song_ids.len() as TrackId + 1,
                        name: NameGenerator::song_title(&mut rng),
                        parent_id: album.id,
                        duration_secs: rng.between(120, 420),
                    };
                    self.store.insert_song(&song)?;
                    self.song_ids.push(song.id);
                }
            }

            if rng.chance(PODCAST_HOST_PROBABILITY) {
                let podcast_genre = *rng.pick(PODCAST_GENRES);
                let podcast = NewContent {
                    id: self.take_content_id(),
                    name: NameGenerator::podcast_title(&mut rng, podcast_genre),
                    genre: podcast_genre.to_string(),
                    artist_id,
                    release_date: offset(epoch, rng.between(0, 1800)),
                };
                self.store.insert_podcast(&podcast)?;
                self.podcast_ids.push(podcast.id);

                for number in 1..=rng.between(3, 10) {
                    let episode = NewTrack {
                        id: self.episode_ids.len() as TrackId + 1,
                        name: NameGenerator::episode_title(&mut rng, number),
                        parent_id: podcast.id,
                        duration_secs: rng.between(900, 3600),
                    };
                    self.store.insert_episode(&episode)?;
                    self.episode_ids.push(episode.id);
                }
            }
        }
        self.summary.albums = self.album_ids.len() as i64;
        self.summary.songs = self.song_ids.len() as i64;
        self.summary.podcasts = self.podcast_ids.len() as i64;
        self.summary.episodes = self.episode_ids.len() as i64;
        Ok(())
    }

    fn plays(&mut self) -> DashResult<()> {
        let mut rng = self.bank.for_stream(SeedStream::Plays);
        log::debug!("Seeding {} stream", rng.name);
        let mut rows = 0;
        for &listener in &self.listener_ids {
            let mut played = std::collections::BTreeSet::new();
            for _ in 0..rng.between(5, 40) {
                let song = *rng.pick(&self.song_ids);
                let plays = rng.pareto(1.0, 1.2).min(MAX_PLAYS_PER_ROW) as i64;
                self.store.record_song_plays(listener, song, plays)?;
                played.insert(song);
            }
            rows += played.len() as i64;

            if !self.episode_ids.is_empty() {
                for _ in 0..rng.between(0, 8) {
                    let episode = *rng.pick(&self.episode_ids);
                    let plays = rng.pareto(1.0, 1.5).min(MAX_PLAYS_PER_ROW) as i64;
                    self.store.record_episode_plays(listener, episode, plays)?;
                }
            }
        }
        self.summary.song_play_rows = rows;
        Ok(())
    }

    fn social(&mut self) -> DashResult<()> {
        let mut rng = self.bank.for_stream(SeedStream::Social);
        log::debug!("Seeding {} stream", rng.name);
        for &listener in &self.listener_ids {
            for _ in 0..rng.between(0, 6) {
                let artist = *rng.pick(&self.artist_ids);
                self.store.insert_follow(listener, artist)?;
            }
            for _ in 0..rng.between(0, 5) {
                let album = *rng.pick(&self.album_ids);
                self.store.insert_album_save(listener, album)?;
            }
            if !self.podcast_ids.is_empty() {
                for _ in 0..rng.between(0, 3) {
                    let podcast = *rng.pick(&self.podcast_ids);
                    self.store.insert_podcast_follow(listener, podcast)?;
                }
            }
        }
        Ok(())
    }

    fn take_content_id(&mut self) -> ContentId {
        let id = self.next_content_id;
        self.next_content_id += 1;
        id
    }
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default()
}

fn offset(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_days(Days::new(days.max(0) as u64))
        .unwrap_or(date)
}
