use std::sync::Arc;

use mural_core::format::picture::Picture;
use mural_core::graphic::{EffectGraphicData, GraphicRegistry};

use super::defaults::default_effect_icon;
use crate::simulation::Effect;

pub struct EffectWrapper {
    effect: Arc<dyn Effect>,
    data: EffectGraphicData,
    icon: Arc<Picture>,
}

impl EffectWrapper {
    pub fn new(effect: Arc<dyn Effect>, graphics: &GraphicRegistry) -> Self {
        let data = graphics.effect(effect.id()).cloned().unwrap_or_else(|| {
            log::warn!("effect graphic {:?} not found, using the default icon", effect.id());
            EffectGraphicData::new(effect.id(), "")
        });
        let icon = data.icon.clone().unwrap_or_else(default_effect_icon);
        Self { effect, data, icon }
    }

    pub fn key(&self) -> String {
        self.effect.key()
    }

    pub fn effect(&self) -> &Arc<dyn Effect> {
        &self.effect
    }

    pub fn data(&self) -> &EffectGraphicData {
        &self.data
    }

    pub fn icon(&self) -> &Arc<Picture> {
        &self.icon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::testing::TestEntity;

    #[test]
    fn registered_icon() {
        let icon = Arc::new(Picture::from_rgba8(image::RgbaImage::new(2, 2)));
        let mut burn = EffectGraphicData::new("burn", "burn.png");
        burn.icon = Some(icon.clone());
        let mut graphics = GraphicRegistry::default();
        graphics.set_effects(vec![burn]);

        let wrapper = EffectWrapper::new(TestEntity::new("burn", "7"), &graphics);
        assert_eq!(wrapper.key(), "burn#7");
        assert_eq!(wrapper.data().icon_name, "burn.png");
        assert!(Arc::ptr_eq(wrapper.icon(), &icon));
    }

    #[test]
    fn missing_descriptor_or_icon_falls_back_to_default_icon() {
        let mut graphics = GraphicRegistry::default();
        graphics.set_effects(vec![EffectGraphicData::new("frost", "frost_missing.png")]);

        let unknown = EffectWrapper::new(TestEntity::new("poison", "1"), &graphics);
        assert_eq!(unknown.data().effect_id, "poison");
        assert!(Arc::ptr_eq(unknown.icon(), &default_effect_icon()));

        let unresolved = EffectWrapper::new(TestEntity::new("frost", "1"), &graphics);
        assert_eq!(unresolved.data().icon_name, "frost_missing.png");
        assert!(Arc::ptr_eq(unresolved.icon(), &default_effect_icon()));
    }
}
