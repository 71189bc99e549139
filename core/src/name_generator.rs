//! Deterministic names for the demo catalog.
//!
//! All generation is deterministic (same RNG seed = same names).

use crate::rng::SeedRng;

pub const ALBUM_GENRES: &[&str] = &[
    "Rock", "Pop", "Jazz", "Hip-Hop", "Electronic", "Samba", "MPB", "Folk", "Metal", "Classical",
];

pub const PODCAST_GENRES: &[&str] = &[
    "Technology", "Comedy", "News", "History", "Science", "Sports", "True Crime",
];

/// Deterministic name generator using curated word lists
pub struct NameGenerator;

impl NameGenerator {
    /// Listener display name (first + last)
    pub fn full_name(rng: &mut SeedRng) -> String {
        format!("{} {}", rng.pick(FIRST_NAMES), rng.pick(LAST_NAMES))
    }

    /// Lower-case username built from the display name, made unique by `n`.
    pub fn username(display_name: &str, n: i64) -> String {
        let base: String = display_name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        format!("{base}{n}")
    }

    /// Stage name: "The Velvet Foxes" or "Ana Moon"
    pub fn artist_name(rng: &mut SeedRng) -> String {
        if rng.chance(0.5) {
            format!("The {} {}", rng.pick(ADJECTIVES), rng.pick(PLURAL_NOUNS))
        } else {
            format!("{} {}", rng.pick(FIRST_NAMES), rng.pick(NOUNS))
        }
    }

    pub fn album_title(rng: &mut SeedRng) -> String {
        format!("{} {}", rng.pick(ADJECTIVES), rng.pick(NOUNS))
    }

    pub fn song_title(rng: &mut SeedRng) -> String {
        match rng.next_u64_below(3) {
            0 => format!("{} {}", rng.pick(VERBS), rng.pick(NOUNS)),
            1 => format!("{} of the {}", rng.pick(NOUNS), rng.pick(NOUNS)),
            _ => format!("{} {}", rng.pick(ADJECTIVES), rng.pick(NOUNS)),
        }
    }

    pub fn podcast_title(rng: &mut SeedRng, genre: &str) -> String {
        format!("{} {} {}", rng.pick(ADJECTIVES), genre, rng.pick(SHOW_SUFFIXES))
    }

    pub fn episode_title(rng: &mut SeedRng, number: i64) -> String {
        format!("#{number}: {} {}", rng.pick(VERBS), rng.pick(NOUNS))
    }
}

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Carla", "Diego", "Elisa", "Felipe", "Gabriela", "Hugo", "Isabela", "João",
    "Karina", "Lucas", "Marina", "Nicolas", "Olivia", "Pedro", "Rafaela", "Samuel", "Tatiana",
    "Vitor", "James", "Mary", "Noah", "Emma", "Liam", "Sophia", "Mason", "Chloe", "Ethan", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Silva", "Santos", "Oliveira", "Souza", "Lima", "Pereira", "Costa", "Almeida", "Ferreira",
    "Rocha", "Smith", "Johnson", "Brown", "Garcia", "Miller", "Davis", "Moore", "Taylor",
];

const ADJECTIVES: &[&str] = &[
    "Velvet", "Electric", "Silent", "Golden", "Midnight", "Crimson", "Wild", "Hollow", "Neon",
    "Broken", "Endless", "Lucky", "Paper", "Northern", "Blue",
];

const NOUNS: &[&str] = &[
    "Moon", "River", "Echo", "Horizon", "Garden", "Signal", "Mirror", "Harbor", "Storm", "Lantern",
    "Desert", "Orbit", "Heart", "Street", "Fire",
];

const PLURAL_NOUNS: &[&str] = &[
    "Foxes", "Wolves", "Strangers", "Saints", "Machines", "Lovers", "Ghosts", "Pilots",
];

const VERBS: &[&str] = &[
    "Chasing", "Dancing in the", "Falling for the", "Waiting for the", "Burning", "Finding",
];

const SHOW_SUFFIXES: &[&str] = &["Hour", "Talk", "Weekly", "Podcast", "Sessions", "Digest"];
