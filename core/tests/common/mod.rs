//! Hand-built catalog shared by the integration tests.
//!
//! Accounts
//!   1 ana, 2 bruno, 3 carla (listeners; carla never plays anything)
//!   10 "The Velvet Foxes", 11 "Marina Moon", 12 "Quiet Artist" (artists)
//!
//! Velvet Foxes: 6 Rock albums (Neon Harbor has 3 songs, the rest 1 each)
//!               and the Comedy podcast "Rock Talk" (1 episode).
//! Marina Moon:  2 Pop albums with 4 songs each (8 songs, tied with the
//!               Foxes) and the Science podcast "Science Hour" (2 episodes).
//! Quiet Artist: nothing published.
#![allow(dead_code)]

use chrono::NaiveDate;
use streamdash_core::{
    config::DashConfig,
    dashboard::Dashboard,
    store::{DashStore, NewContent, NewTrack},
};

pub const ANA: i64 = 1;
pub const BRUNO: i64 = 2;
pub const CARLA: i64 = 3;
pub const VELVET_FOXES: i64 = 10;
pub const MARINA_MOON: i64 = 11;
pub const QUIET_ARTIST: i64 = 12;

pub fn fixture_store() -> DashStore {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = DashStore::in_memory().unwrap();
    store.migrate().unwrap();
    populate(&store);
    store
}

pub fn fixture_dashboard() -> Dashboard {
    Dashboard::new(fixture_store(), DashConfig::default_test().cache_ttl())
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn content(id: i64, name: &str, genre: &str, artist_id: i64) -> NewContent {
    NewContent {
        id,
        name: name.into(),
        genre: genre.into(),
        artist_id,
        release_date: day(),
    }
}

fn track(id: i64, name: &str, parent_id: i64, duration_secs: i64) -> NewTrack {
    NewTrack {
        id,
        name: name.into(),
        parent_id,
        duration_secs,
    }
}

fn populate(s: &DashStore) {
    for (id, username, name) in [
        (ANA, "ana", "Ana Lima"),
        (BRUNO, "bruno", "Bruno Costa"),
        (CARLA, "carla", "Carla Souza"),
        (VELVET_FOXES, "velvetfoxes", "The Velvet Foxes"),
        (MARINA_MOON, "marinamoon", "Marina Moon"),
        (QUIET_ARTIST, "quiet", "Quiet Artist"),
    ] {
        s.insert_account(id, username, name, day()).unwrap();
    }
    for id in [VELVET_FOXES, MARINA_MOON, QUIET_ARTIST] {
        s.insert_artist(id).unwrap();
    }

    // Velvet Foxes: six albums.
    s.insert_album(&content(100, "Neon Harbor", "Rock", VELVET_FOXES)).unwrap();
    for (id, name) in [
        (101, "Second Wind"),
        (102, "Third Rail"),
        (103, "Fourth Wall"),
        (104, "Fifth Gear"),
        (105, "Sixth Sense"),
    ] {
        s.insert_album(&content(id, name, "Rock", VELVET_FOXES)).unwrap();
    }
    s.insert_song(&track(1, "Harbor Lights", 100, 200)).unwrap();
    s.insert_song(&track(2, "Neon Rain", 100, 180)).unwrap();
    s.insert_song(&track(3, "Salt Water", 100, 240)).unwrap();
    for (id, album) in [(4, 101), (5, 102), (6, 103), (7, 104), (8, 105)] {
        s.insert_song(&track(id, &format!("Single {id}"), album, 150)).unwrap();
    }

    // Marina Moon: two albums, four songs each.
    s.insert_album(&content(200, "Golden Orbit", "Pop", MARINA_MOON)).unwrap();
    s.insert_album(&content(201, "Paper Garden", "Pop", MARINA_MOON)).unwrap();
    for (id, name, album, secs) in [
        (9, "Golden Hour", 200, 210),
        (10, "Orbit", 200, 190),
        (11, "Satellite", 200, 200),
        (12, "Gravity", 200, 220),
        (13, "Paper Moon", 201, 230),
        (14, "Garden Path", 201, 170),
        (15, "Ink", 201, 160),
        (16, "Fold", 201, 150),
    ] {
        s.insert_song(&track(id, name, album, secs)).unwrap();
    }

    // Podcasts.
    s.insert_podcast(&content(300, "Science Hour", "Science", MARINA_MOON)).unwrap();
    s.insert_podcast(&content(301, "Rock Talk", "Comedy", VELVET_FOXES)).unwrap();
    s.insert_episode(&track(1, "Black Holes", 300, 1800)).unwrap();
    s.insert_episode(&track(2, "Tides", 300, 1200)).unwrap();
    s.insert_episode(&track(3, "Tour Stories", 301, 600)).unwrap();

    // Plays.
    s.record_song_plays(ANA, 1, 10).unwrap();
    s.record_song_plays(ANA, 9, 4).unwrap();
    s.record_song_plays(ANA, 13, 3).unwrap();
    s.record_episode_plays(ANA, 1, 2).unwrap();
    s.record_episode_plays(ANA, 3, 5).unwrap();
    s.record_song_plays(BRUNO, 1, 5).unwrap();
    s.record_song_plays(BRUNO, 2, 7).unwrap();
    s.record_song_plays(BRUNO, 9, 20).unwrap();

    // Follows: every listener follows the Foxes; ana also follows Marina and bruno.
    for follower in [ANA, BRUNO, CARLA] {
        s.insert_follow(follower, VELVET_FOXES).unwrap();
    }
    s.insert_follow(ANA, MARINA_MOON).unwrap();
    s.insert_follow(ANA, BRUNO).unwrap();

    // Saves.
    s.insert_album_save(ANA, 100).unwrap();
    s.insert_album_save(BRUNO, 100).unwrap();
    s.insert_album_save(CARLA, 200).unwrap();
    s.insert_album_save(ANA, 200).unwrap();
    s.insert_album_save(BRUNO, 201).unwrap();

    // Podcast follows.
    s.insert_podcast_follow(ANA, 300).unwrap();
    s.insert_podcast_follow(BRUNO, 300).unwrap();
    s.insert_podcast_follow(CARLA, 301).unwrap();
}
