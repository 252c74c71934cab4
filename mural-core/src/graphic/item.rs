use std::sync::Arc;

use crate::assets::{AssetCategory, AssetRegistry};
use crate::format::picture::Picture;

pub const WILDCARD: &str = "*";

/// A texture worn by characters of a given race and gender.
#[derive(Debug, Clone, Default)]
pub struct ItemSpritesheet {
    pub texture_name: String,
    pub race: String,
    pub gender: String,
    pub texture: Option<Arc<Picture>>,
}

impl PartialEq for ItemSpritesheet {
    fn eq(&self, other: &Self) -> bool {
        self.texture_name == other.texture_name && self.race == other.race && self.gender == other.gender
    }
}

impl ItemSpritesheet {
    pub fn new(texture: &str, race: &str, gender: &str) -> Self {
        Self {
            texture_name: texture.to_string(),
            race: race.to_string(),
            gender: gender.to_string(),
            texture: None,
        }
    }

    pub fn matches(&self, race: &str, gender: &str) -> bool {
        let field_matches = |declared: &str, actual: &str| {
            declared == WILDCARD || declared.eq_ignore_ascii_case(actual)
        };
        field_matches(&self.race, race) && field_matches(&self.gender, gender)
    }
}

#[derive(Debug, Clone)]
pub struct ItemGraphicData {
    pub item_id: String,
    pub icon_name: String,
    pub max_stack: u32,
    pub spritesheets: Vec<ItemSpritesheet>,
    pub icon: Option<Arc<Picture>>,
}

impl Default for ItemGraphicData {
    fn default() -> Self {
        Self {
            item_id: String::new(),
            icon_name: String::new(),
            max_stack: 1,
            spritesheets: Vec::new(),
            icon: None,
        }
    }
}

impl PartialEq for ItemGraphicData {
    fn eq(&self, other: &Self) -> bool {
        self.item_id == other.item_id
            && self.icon_name == other.icon_name
            && self.max_stack == other.max_stack
            && self.spritesheets == other.spritesheets
    }
}

impl ItemGraphicData {
    pub fn new(item_id: &str, icon_name: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            icon_name: icon_name.to_string(),
            ..Default::default()
        }
    }

    /// The first declared spritesheet matching the wearer.
    pub fn spritesheet_for(&self, race: &str, gender: &str) -> Option<&ItemSpritesheet> {
        self.spritesheets.iter().find(|s| s.matches(race, gender))
    }

    pub fn resolve(&mut self, assets: &AssetRegistry) {
        self.icon = assets.resolve(AssetCategory::Icon, &self.icon_name);
        for sheet in &mut self.spritesheets {
            sheet.texture = assets.resolve(AssetCategory::AvatarSpritesheet, &sheet.texture_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_spritesheet_wins() {
        let mut item = ItemGraphicData::new("sword", "sword.png");
        item.spritesheets = vec![
            ItemSpritesheet::new("elf.png", "elf", "*"),
            ItemSpritesheet::new("human_f.png", "human", "female"),
            ItemSpritesheet::new("any.png", "*", "*"),
            ItemSpritesheet::new("human_m.png", "human", "male"),
        ];

        let pick = |race, gender| item.spritesheet_for(race, gender).map(|s| s.texture_name.as_str());
        assert_eq!(pick("elf", "male"), Some("elf.png"));
        assert_eq!(pick("Human", "Female"), Some("human_f.png"));
        assert_eq!(pick("human", "male"), Some("any.png"));
    }

    #[test]
    fn no_match_without_wildcard() {
        let mut item = ItemGraphicData::new("sword", "sword.png");
        item.spritesheets = vec![ItemSpritesheet::new("elf.png", "elf", "female")];
        assert!(item.spritesheet_for("elf", "male").is_none());
    }
}
