use std::sync::Arc;

use crate::assets::{AssetCategory, AssetRegistry};
use crate::format::picture::Picture;

#[derive(Debug, Clone, Default)]
pub struct EffectGraphicData {
    pub effect_id: String,
    pub icon_name: String,
    pub icon: Option<Arc<Picture>>,
}

impl PartialEq for EffectGraphicData {
    fn eq(&self, other: &Self) -> bool {
        self.effect_id == other.effect_id && self.icon_name == other.icon_name
    }
}

impl EffectGraphicData {
    pub fn new(effect_id: &str, icon_name: &str) -> Self {
        Self {
            effect_id: effect_id.to_string(),
            icon_name: icon_name.to_string(),
            icon: None,
        }
    }

    pub fn resolve(&mut self, assets: &AssetRegistry) {
        self.icon = assets.resolve(AssetCategory::Icon, &self.icon_name);
    }
}
