//! Player column schema discovery.
//!
//! The export repeats every per-player question once per seat:
//! `name_player_1, hero_player_1, ..., name_player_4, hero_player_4`.
//! [`PlayerSchema::scan`] reads the header once and describes that layout
//! as plain data for the reshaper.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::table::Table;

static PLAYER_COLUMN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<feature>.+)_player_(?P<player_num>\d+)$").unwrap());

/// One recognized `<feature>_player_<n>` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerColumn {
    /// Position in the source table
    pub index: usize,
    pub feature: String,
    /// 1-based seat number
    pub player: u32,
}

/// Wide player layout of a normalized table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSchema {
    /// Recognized player columns, in source order
    pub columns: Vec<PlayerColumn>,
    /// Distinct features in first-seen order; fixes output column order
    pub features: Vec<String>,
    /// Highest seat number seen (0 when no player columns)
    pub max_player: u32,
}

impl PlayerSchema {
    /// Scan column names. Names that do not match the pattern, or whose
    /// seat number is zero or does not fit, are left out.
    pub fn scan(table: &Table) -> Self {
        let mut schema = PlayerSchema::default();

        for (index, name) in table.columns().iter().enumerate() {
            let Some((feature, player)) = parse_player_column(name) else {
                continue;
            };

            if !schema.features.iter().any(|f| f == feature) {
                schema.features.push(feature.to_string());
            }
            schema.max_player = schema.max_player.max(player);
            schema.columns.push(PlayerColumn {
                index,
                feature: feature.to_string(),
                player,
            });
        }

        schema
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a feature in the output order.
    pub fn feature_position(&self, feature: &str) -> Option<usize> {
        self.features.iter().position(|f| f == feature)
    }
}

/// Split `hero_player_3` into `("hero", 3)`.
pub fn parse_player_column(name: &str) -> Option<(&str, u32)> {
    let caps = PLAYER_COLUMN.captures(name)?;
    let feature = caps.name("feature")?.as_str();
    let player: u32 = caps.name("player_num")?.as_str().parse().ok()?;
    if player == 0 {
        return None;
    }
    Some((feature, player))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_column() {
        assert_eq!(parse_player_column("hero_player_3"), Some(("hero", 3)));
        assert_eq!(
            parse_player_column("multi_aspect_player_12"),
            Some(("multi_aspect", 12))
        );
        assert_eq!(parse_player_column("player_1"), None);
        assert_eq!(parse_player_column("hero_player_"), None);
        assert_eq!(parse_player_column("hero_player_0"), None);
        assert_eq!(parse_player_column("hero_player_1_note"), None);
        assert_eq!(parse_player_column("number_of_players"), None);
    }

    #[test]
    fn test_scan_orders_features_by_first_appearance() {
        let table = Table::new([
            "submission_id",
            "name_player_1",
            "hero_player_1",
            "aspect_player_1",
            "name_player_2",
            "hero_player_2",
            "aspect_player_2",
            "multi_aspect_player_1",
            "multi_aspect_player_2",
            "outcome",
        ]);

        let schema = PlayerSchema::scan(&table);
        assert_eq!(schema.features, ["name", "hero", "aspect", "multi_aspect"]);
        assert_eq!(schema.max_player, 2);
        assert_eq!(schema.columns.len(), 8);
        assert_eq!(
            schema.columns[0],
            PlayerColumn { index: 1, feature: "name".into(), player: 1 }
        );
        assert_eq!(schema.feature_position("multi_aspect"), Some(3));
    }

    #[test]
    fn test_scan_without_player_columns() {
        let schema = PlayerSchema::scan(&Table::new(["submission_id", "outcome"]));
        assert!(schema.is_empty());
        assert_eq!(schema.max_player, 0);
        assert!(schema.features.is_empty());
    }
}
