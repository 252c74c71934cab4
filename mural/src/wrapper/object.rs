use std::sync::{Arc, Weak};

use mural_core::format::picture::Picture;
use mural_core::graphic::{GraphicRegistry, ObjectGraphicData};
use mural_core::types::{Position, Rect};

use super::defaults::error_picture;
use crate::simulation::AreaObject;

/// An area object paired with its graphic descriptor.
pub struct ObjectWrapper {
    object: Weak<dyn AreaObject>,
    key: String,
    data: ObjectGraphicData,
    portrait: Arc<Picture>,
    sprite: Arc<Picture>,
    position: Position,
    hovered: bool,
}

impl ObjectWrapper {
    pub fn new(object: &Arc<dyn AreaObject>, graphics: &GraphicRegistry) -> Self {
        let data = graphics.object(object.id()).cloned().unwrap_or_else(|| {
            log::warn!("object graphic {:?} not found, using the error picture", object.id());
            ObjectGraphicData::new(object.id(), "", "")
        });
        Self {
            object: Arc::downgrade(object),
            key: object.key(),
            portrait: data.portrait.clone().unwrap_or_else(error_picture),
            sprite: data.sprite.clone().unwrap_or_else(error_picture),
            position: object.position(),
            data,
            hovered: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn data(&self) -> &ObjectGraphicData {
        &self.data
    }

    pub fn portrait(&self) -> &Arc<Picture> {
        &self.portrait
    }

    pub fn sprite(&self) -> &Arc<Picture> {
        &self.sprite
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn draw_rect(&self) -> Rect {
        Rect::centered(self.position, self.sprite.width() as f64, self.sprite.height() as f64)
    }

    /// Follows the object and tracks the pointer. Returns `false` once the object is gone.
    pub fn update(&mut self, pointer: Position) -> bool {
        let Some(object) = self.object.upgrade() else {
            self.hovered = false;
            return false;
        };
        self.position = object.position();
        self.hovered = self.draw_rect().contains(pointer);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Chest(Mutex<Position>);

    impl AreaObject for Chest {
        fn id(&self) -> &str {
            "chest"
        }

        fn serial(&self) -> &str {
            "4"
        }

        fn position(&self) -> Position {
            *self.0.lock().unwrap()
        }
    }

    #[test]
    fn hover_follows_object() {
        let chest = Arc::new(Chest(Mutex::new(Position::new(0.0, 0.0))));
        let object: Arc<dyn AreaObject> = chest.clone();
        let mut wrapper = ObjectWrapper::new(&object, &GraphicRegistry::default());
        assert_eq!(wrapper.key(), "chest#4");

        assert!(wrapper.update(Position::new(1.0, 1.0)));
        assert!(wrapper.is_hovered());

        *chest.0.lock().unwrap() = Position::new(500.0, 500.0);
        assert!(wrapper.update(Position::new(1.0, 1.0)));
        assert!(!wrapper.is_hovered());

        drop(object);
        drop(chest);
        assert!(!wrapper.update(Position::new(500.0, 500.0)));
    }
}
