use std::sync::Arc;

use crate::assets::{AssetCategory, AssetRegistry};
use crate::format::picture::Picture;

/// Names of the spritesheets an avatar is drawn from.
///
/// Either the head and torso pair or the full body sheet is used; an empty name means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvatarSprite {
    pub head: String,
    pub torso: String,
    pub full_body: String,
}

/// Graphic descriptor of a character avatar.
#[derive(Debug, Clone, Default)]
pub struct AvatarData {
    pub id: String,
    pub serial: String,
    pub portrait_name: String,
    pub sprite: AvatarSprite,

    pub portrait: Option<Arc<Picture>>,
    pub head: Option<Arc<Picture>>,
    pub torso: Option<Arc<Picture>>,
    pub full_body: Option<Arc<Picture>>,
}

impl PartialEq for AvatarData {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.serial == other.serial
            && self.portrait_name == other.portrait_name
            && self.sprite == other.sprite
    }
}

impl AvatarData {
    pub fn new(id: &str, serial: &str) -> Self {
        Self {
            id: id.to_string(),
            serial: serial.to_string(),
            ..Default::default()
        }
    }

    /// `id#serial`, the key avatars and their characters are matched by.
    pub fn key(&self) -> String {
        format!("{}#{}", self.id, self.serial)
    }

    /// Looks up the declared pictures in the asset registry.
    pub fn resolve(&mut self, assets: &AssetRegistry) {
        self.portrait = assets.resolve(AssetCategory::Portrait, &self.portrait_name);
        self.head = assets.resolve(AssetCategory::AvatarSpritesheet, &self.sprite.head);
        self.torso = assets.resolve(AssetCategory::AvatarSpritesheet, &self.sprite.torso);
        self.full_body = assets.resolve(AssetCategory::AvatarSpritesheet, &self.sprite.full_body);
    }

    /// Whether the avatar can be drawn: a head and torso pair or a full body sheet.
    pub fn has_sprite(&self) -> bool {
        (self.head.is_some() && self.torso.is_some()) || self.full_body.is_some()
    }
}
