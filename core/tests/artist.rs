mod common;

use common::{fixture_store, ANA, MARINA_MOON, QUIET_ARTIST, VELVET_FOXES};
use streamdash_core::reports::{ArtistStats, NamedCount};

fn nc(name: &str, count: i64) -> NamedCount {
    NamedCount {
        name: name.into(),
        count,
    }
}

#[test]
fn artists_are_listed_by_name() {
    let store = fixture_store();

    let names: Vec<String> = store.artists().unwrap().into_iter().map(|a| a.name).collect();

    assert_eq!(names, vec!["Marina Moon", "Quiet Artist", "The Velvet Foxes"]);
}

#[test]
fn listeners_are_not_artists() {
    let store = fixture_store();
    assert!(store.artist(ANA).unwrap().is_none());
    assert_eq!(store.artist(MARINA_MOON).unwrap().unwrap().name, "Marina Moon");
}

/// One listener row per (listener, song): the ranking sums them per song.
#[test]
fn top_songs_for_artist_are_aggregated_per_song() {
    let store = fixture_store();

    assert_eq!(
        store.top_songs_for_artist(VELVET_FOXES, 3).unwrap(),
        vec![nc("Harbor Lights", 15), nc("Neon Rain", 7)]
    );
    assert_eq!(
        store.top_songs_for_artist(MARINA_MOON, 1).unwrap(),
        vec![nc("Golden Hour", 24)]
    );
}

#[test]
fn most_saved_album_for_artist() {
    let store = fixture_store();

    assert_eq!(
        store.most_saved_album_for_artist(VELVET_FOXES).unwrap(),
        Some(nc("Neon Harbor", 2))
    );
    assert_eq!(
        store.most_saved_album_for_artist(MARINA_MOON).unwrap(),
        Some(nc("Golden Orbit", 2))
    );
    assert_eq!(store.most_saved_album_for_artist(QUIET_ARTIST).unwrap(), None);
}

#[test]
fn artist_stats_count_followers_albums_and_songs() {
    let store = fixture_store();

    assert_eq!(
        store.artist_stats(VELVET_FOXES).unwrap(),
        ArtistStats {
            followers: 3,
            albums: 6,
            songs: 8
        }
    );
    assert_eq!(store.artist_stats(QUIET_ARTIST).unwrap(), ArtistStats::default());
}
