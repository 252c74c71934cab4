use std::sync::Arc;

use crate::assets::{AssetCategory, AssetRegistry};
use crate::format::picture::Picture;

#[derive(Debug, Clone, Default)]
pub struct ObjectGraphicData {
    pub id: String,
    pub portrait_name: String,
    pub sprite_name: String,

    pub portrait: Option<Arc<Picture>>,
    pub sprite: Option<Arc<Picture>>,
}

impl PartialEq for ObjectGraphicData {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.portrait_name == other.portrait_name && self.sprite_name == other.sprite_name
    }
}

impl ObjectGraphicData {
    pub fn new(id: &str, portrait_name: &str, sprite_name: &str) -> Self {
        Self {
            id: id.to_string(),
            portrait_name: portrait_name.to_string(),
            sprite_name: sprite_name.to_string(),
            ..Default::default()
        }
    }

    pub fn resolve(&mut self, assets: &AssetRegistry) {
        self.portrait = assets.resolve(AssetCategory::Portrait, &self.portrait_name);
        self.sprite = assets.resolve(AssetCategory::ObjectSpritesheet, &self.sprite_name);
    }
}
