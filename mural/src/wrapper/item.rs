use std::sync::Arc;

use mural_core::format::picture::Picture;
use mural_core::graphic::{GraphicRegistry, ItemGraphicData};
use mural_core::MuralError;

use super::defaults::{default_item_icon, error_picture};
use super::sprite::SpriteLayer;
use crate::simulation::{Item, ItemKind};

/// An inventory item paired with its graphic descriptor.
#[derive(Clone)]
pub struct ItemWrapper {
    item: Arc<dyn Item>,
    data: ItemGraphicData,
    icon: Arc<Picture>,
}

impl ItemWrapper {
    pub fn new(item: Arc<dyn Item>, data: ItemGraphicData) -> Self {
        let icon = data.icon.clone().unwrap_or_else(default_item_icon);
        Self { item, data, icon }
    }

    /// Wraps `item` with its registered descriptor, or a default one.
    pub fn from_registry(item: Arc<dyn Item>, graphics: &GraphicRegistry) -> Self {
        let data = match graphics.item(item.id()) {
            Some(data) => data.clone(),
            None => {
                log::warn!(
                    "{}",
                    MuralError::MissingReference {
                        kind: "item graphic",
                        name: item.id().to_string(),
                    }
                );
                ItemGraphicData::new(item.id(), "")
            }
        };
        Self::new(item, data)
    }

    pub fn key(&self) -> String {
        self.item.key()
    }

    pub fn item(&self) -> &Arc<dyn Item> {
        &self.item
    }

    pub fn kind(&self) -> ItemKind {
        self.item.kind()
    }

    pub fn data(&self) -> &ItemGraphicData {
        &self.data
    }

    pub fn icon(&self) -> &Arc<Picture> {
        &self.icon
    }

    pub fn max_stack(&self) -> u32 {
        self.data.max_stack
    }

    /// The spritesheet worn by a character of the given race and gender.
    pub fn spritesheet(&self, race: &str, gender: &str) -> Option<SpriteLayer> {
        let sheet = self.data.spritesheet_for(race, gender)?;
        let picture = sheet.texture.clone().unwrap_or_else(error_picture);
        Some(SpriteLayer::new(&sheet.texture_name, picture))
    }
}

impl std::fmt::Debug for ItemWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemWrapper")
            .field("key", &self.key())
            .field("kind", &self.kind())
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use mural_core::graphic::ItemSpritesheet;

    use super::*;
    use crate::simulation::testing::TestItem;

    fn icon() -> Arc<Picture> {
        Arc::new(Picture::from_rgba8(image::RgbaImage::new(2, 2)))
    }

    #[test]
    fn registered_descriptor_and_icon() {
        let icon = icon();
        let mut sword = ItemGraphicData::new("sword", "sword.png");
        sword.max_stack = 1;
        sword.icon = Some(icon.clone());
        let mut graphics = GraphicRegistry::default();
        graphics.set_items(vec![sword]);

        let wrapper = ItemWrapper::from_registry(TestItem::new("sword", "4", ItemKind::Weapon), &graphics);
        assert_eq!(wrapper.key(), "sword#4");
        assert_eq!(wrapper.kind(), ItemKind::Weapon);
        assert_eq!(wrapper.data().icon_name, "sword.png");
        assert_eq!(wrapper.max_stack(), 1);
        assert!(Arc::ptr_eq(wrapper.icon(), &icon));
    }

    #[test]
    fn missing_descriptor_falls_back_to_default_icon() {
        let wrapper = ItemWrapper::from_registry(
            TestItem::new("pebble", "1", ItemKind::Misc),
            &GraphicRegistry::default(),
        );
        assert_eq!(wrapper.data().item_id, "pebble");
        assert!(Arc::ptr_eq(wrapper.icon(), &default_item_icon()));
        assert!(wrapper.spritesheet("human", "male").is_none());
    }

    #[test]
    fn unresolved_spritesheet_uses_error_picture() {
        let mut mail = ItemGraphicData::new("mail", "mail.png");
        mail.spritesheets = vec![ItemSpritesheet::new("mail_missing.png", "*", "*")];
        let wrapper = ItemWrapper::new(TestItem::new("mail", "2", ItemKind::Armor), mail);

        let layer = wrapper.spritesheet("elf", "female").unwrap();
        assert_eq!(layer.name, "mail_missing.png");
        assert!(Arc::ptr_eq(&layer.picture, &error_picture()));
    }
}
