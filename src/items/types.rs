use serde::{Deserialize, Serialize};

/// Rarity tiers, weakest first.
///
/// The declaration order is the canonical rarity rank. Every "higher rarity"
/// comparison goes through [`Rarity::rank`] or the derived `Ord`, both of which
/// follow [`Rarity::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    SuperRare = 3,
    Epic = 4,
    Legendary = 5,
    Mythic = 6,
    Immortal = 7,
}

impl Rarity {
    pub const COUNT: usize = 8;

    /// Canonical order used for rate accumulation, sorting and comparisons.
    pub const ALL: [Rarity; Rarity::COUNT] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::SuperRare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
        Rarity::Immortal,
    ];

    /// Position in [`Rarity::ALL`].
    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn from_rank(rank: usize) -> Option<Rarity> {
        Rarity::ALL.get(rank).copied()
    }

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::SuperRare => "Super Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
            Rarity::Immortal => "Immortal",
        }
    }

    /// Upgrade cost multiplier for items of this rarity.
    pub fn upgrade_multiplier(self) -> u64 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 4,
            Rarity::SuperRare => 6,
            Rarity::Epic => 8,
            Rarity::Legendary => 16,
            Rarity::Mythic => 32,
            Rarity::Immortal => 64,
        }
    }

    /// The higher of two rarities under the canonical rank.
    pub fn max_of(self, other: Rarity) -> Rarity {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    /// Parses the snake_case identifier used in saves (`"super_rare"`).
    pub fn parse(s: &str) -> Option<Rarity> {
        match s {
            "common" => Some(Rarity::Common),
            "uncommon" => Some(Rarity::Uncommon),
            "rare" => Some(Rarity::Rare),
            "super_rare" => Some(Rarity::SuperRare),
            "epic" => Some(Rarity::Epic),
            "legendary" => Some(Rarity::Legendary),
            "mythic" => Some(Rarity::Mythic),
            "immortal" => Some(Rarity::Immortal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemFamily {
    Weapon,
    Armor,
    Artifact,
    Character,
    Consumable,
}

impl ItemFamily {
    pub fn name(&self) -> &'static str {
        match self {
            ItemFamily::Weapon => "Weapon",
            ItemFamily::Armor => "Armor",
            ItemFamily::Artifact => "Artifact",
            ItemFamily::Character => "Character",
            ItemFamily::Consumable => "Consumable",
        }
    }

    pub fn parse(s: &str) -> Option<ItemFamily> {
        match s {
            "weapon" => Some(ItemFamily::Weapon),
            "armor" => Some(ItemFamily::Armor),
            "artifact" => Some(ItemFamily::Artifact),
            "character" => Some(ItemFamily::Character),
            "consumable" => Some(ItemFamily::Consumable),
            _ => None,
        }
    }
}

/// Immutable catalog entry an [`Item`] is instantiated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTemplate {
    pub name: String,
    pub family: ItemFamily,
    pub rarity: Rarity,
    pub base_power: u64,
    pub description: String,
    pub icon: String,
}

/// An owned item instance in the player's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub family: ItemFamily,
    pub rarity: Rarity,
    pub level: u32,
    pub stars: u32,
    pub power: u64,
    pub description: String,
    pub icon: String,
    /// Unix milliseconds.
    pub obtained_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        for pair in Rarity::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{:?} should rank below {:?}", pair[0], pair[1]);
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_rarity_rank_roundtrip() {
        for rarity in Rarity::ALL {
            assert_eq!(Rarity::from_rank(rarity.rank()), Some(rarity));
        }
        assert_eq!(Rarity::from_rank(Rarity::COUNT), None);
    }

    #[test]
    fn test_upgrade_multiplier_table() {
        let expected = [1, 2, 4, 6, 8, 16, 32, 64];
        for (rarity, mult) in Rarity::ALL.iter().zip(expected) {
            assert_eq!(rarity.upgrade_multiplier(), mult, "{:?}", rarity);
        }
    }

    #[test]
    fn test_max_of() {
        assert_eq!(Rarity::Rare.max_of(Rarity::Epic), Rarity::Epic);
        assert_eq!(Rarity::Mythic.max_of(Rarity::Common), Rarity::Mythic);
        assert_eq!(Rarity::Epic.max_of(Rarity::Epic), Rarity::Epic);
    }

    #[test]
    fn test_rarity_serializes_snake_case() {
        let json = serde_json::to_string(&Rarity::SuperRare).unwrap();
        assert_eq!(json, "\"super_rare\"");
        let back: Rarity = serde_json::from_str("\"immortal\"").unwrap();
        assert_eq!(back, Rarity::Immortal);
    }

    #[test]
    fn test_rarity_parse_matches_serde_names() {
        for rarity in Rarity::ALL {
            let json = serde_json::to_string(&rarity).unwrap();
            let ident = json.trim_matches('"');
            assert_eq!(Rarity::parse(ident), Some(rarity));
        }
        assert_eq!(Rarity::parse("magic"), None);
    }

    #[test]
    fn test_item_family_parse() {
        assert_eq!(ItemFamily::parse("weapon"), Some(ItemFamily::Weapon));
        assert_eq!(ItemFamily::parse("character"), Some(ItemFamily::Character));
        assert_eq!(ItemFamily::parse("helmet"), None);
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item {
            id: "abc".to_string(),
            name: "Wooden Sword".to_string(),
            family: ItemFamily::Weapon,
            rarity: Rarity::Common,
            level: 1,
            stars: 1,
            power: 10,
            description: "A simple wooden sword for beginners.".to_string(),
            icon: "⚔️".to_string(),
            obtained_at: 42,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"obtainedAt\":42"));
        assert!(json.contains("\"family\":\"weapon\""));
    }
}
