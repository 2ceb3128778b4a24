//! Compiled-in enumerations for the tracker.
//!
//! These lists are injected into the pipeline through
//! [`crate::transform::pipeline::PipelineConfig`]; no stage reads them
//! directly.

/// Sentinel bucket for aspects outside [`ASPECTS`].
pub const OTHER: &str = "Other";

/// Official aspects, in display order.
pub const ASPECTS: [&str; 6] = [
    "Aggression",
    "Basic",
    "Justice",
    "Leadership",
    "Pool",
    "Protection",
];

/// Full hero roster, in release order.
pub const HEROES: [&str; 69] = [
    "Black Panther (T'challa)",
    "Captain Marvel",
    "Ironman",
    "She-Hulk",
    "Spider-Man (Peter)",
    "Captain America",
    "Ms. Marvel",
    "Thor",
    "Black Widow",
    "Doctor Strange",
    "Hulk",
    "Hawkeye",
    "Spider-Woman",
    "Ant-Man",
    "Wasp",
    "Quicksilver",
    "Scarlet Witch",
    "Groot",
    "Rocket Racoon",
    "Star-Lord",
    "Gamora",
    "Drax",
    "Venom",
    "Adam Warlock",
    "Spectrum",
    "Nebula",
    "War Machine",
    "Valkyrie",
    "Vision",
    "Ghost-Spider",
    "Spider-Man (Miles)",
    "Nova",
    "Ironheart",
    "Spider-Ham",
    "Sp//dr",
    "Colossus",
    "Shadowcat",
    "Cyclops",
    "Phoenix",
    "Wolverine",
    "Storm",
    "Gambit",
    "Rogue",
    "Cable",
    "Domino",
    "Psylocke",
    "Angel",
    "X-23",
    "Deadpool",
    "Magik",
    "Bishop",
    "Iceman",
    "Jubilee",
    "Nightcrawler",
    "Magneto",
    "Maria Hill",
    "Nick Fury",
    "Black Panther (Shuri)",
    "Silk",
    "Falcon",
    "Winter Soldier",
    "Tigra",
    "Hulkling",
    "Wonder Man",
    "Hercules",
    "Daredevil",
    "Echo",
    "Jessica Jones",
    "Luke Cage",
];

/// Session identifier column (after normalization).
pub const ID_COLUMN: &str = "submission_id";

/// Session-level columns kept in the session table.
pub const SESSION_COLUMNS: [&str; 8] = [
    "submission_id",
    "submission_time",
    "region",
    "number_of_players",
    "scenario",
    "difficulty",
    "skirmish_mode",
    "outcome",
];

/// Player-level aspect column and its historical multi-select twin.
pub const ASPECT_COLUMN: &str = "aspect";
pub const MULTI_ASPECT_COLUMN: &str = "multi_aspect";

/// Exploded single-aspect column.
pub const INDIVIDUAL_ASPECT_COLUMN: &str = "individual_aspect";

pub const HERO_COLUMN: &str = "hero";
pub const NAME_COLUMN: &str = "name";
pub const SCENARIO_COLUMN: &str = "scenario";
pub const OUTCOME_COLUMN: &str = "outcome";

/// Outcome value of a won session.
pub const WIN: &str = "Win";
