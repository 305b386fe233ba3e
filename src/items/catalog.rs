//! Item template registry.
//!
//! Read-only at runtime. Pools take subsets of [`item_templates`].

use super::types::{ItemFamily, ItemTemplate, Rarity};

fn template(
    name: &str,
    family: ItemFamily,
    rarity: Rarity,
    base_power: u64,
    description: &str,
    icon: &str,
) -> ItemTemplate {
    ItemTemplate {
        name: name.to_string(),
        family,
        rarity,
        base_power,
        description: description.to_string(),
        icon: icon.to_string(),
    }
}

/// Returns every obtainable item template.
pub fn item_templates() -> Vec<ItemTemplate> {
    use ItemFamily::*;
    use Rarity::*;

    vec![
        // Weapons
        template("Wooden Sword", Weapon, Common, 10, "A simple wooden sword for beginners.", "⚔️"),
        template("Basic Staff", Weapon, Common, 8, "A basic magical staff.", "🪄"),
        template(
            "Iron Blade",
            Weapon,
            Uncommon,
            25,
            "A sturdy iron blade with decent sharpness.",
            "🗡️",
        ),
        template("Flame Sword", Weapon, Rare, 50, "A sword imbued with the power of fire.", "🔥"),
        template(
            "Photon Blade",
            Weapon,
            SuperRare,
            75,
            "A blade forged from condensed light.",
            "✨",
        ),
        template(
            "Dragon Fang",
            Weapon,
            Epic,
            100,
            "A legendary weapon forged from dragon bones.",
            "🐉",
        ),
        template("Excalibur", Weapon, Legendary, 200, "The legendary sword of kings.", "⚡"),
        // Armor
        template("Cloth Robe", Armor, Common, 5, "Basic cloth protection.", "👘"),
        template("Leather Armor", Armor, Uncommon, 15, "Flexible leather protection.", "🦺"),
        template("Mithril Mail", Armor, Rare, 35, "Lightweight yet strong mithril armor.", "🛡️"),
        // Characters
        template(
            "Fire Mage",
            Character,
            Epic,
            80,
            "A powerful spellcaster who commands fire.",
            "🧙",
        ),
        template(
            "Ancient Dragon",
            Character,
            Legendary,
            180,
            "An ancient being of immense power.",
            "🐲",
        ),
        template("Cosmic Entity", Character, Mythic, 300, "A being from beyond the stars.", "🌟"),
        template(
            "Time Weaver",
            Character,
            Immortal,
            500,
            "An eternal being that manipulates time itself.",
            "⏳",
        ),
    ]
}

/// Templates whose rarity is strictly below `cap`.
pub fn templates_below(cap: Rarity) -> Vec<ItemTemplate> {
    item_templates()
        .into_iter()
        .filter(|t| t.rarity < cap)
        .collect()
}

pub fn find_template(name: &str) -> Option<ItemTemplate> {
    item_templates().into_iter().find(|t| t.name == name)
}
