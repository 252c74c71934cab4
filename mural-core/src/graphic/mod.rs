//! Graphic descriptors and the by-id registry they are kept in.

mod avatar;
mod effect;
mod io;
mod item;
mod object;
mod skill;

use std::collections::HashMap;

pub use avatar::{AvatarData, AvatarSprite};
pub use effect::EffectGraphicData;
pub use io::{
    export_avatars, export_effects, export_items, export_objects, export_skills, import_avatars,
    import_avatars_dir, import_effects, import_effects_dir, import_items, import_items_dir, import_objects,
    import_objects_dir, import_skills, import_skills_dir, AVATARS_EXTENSION, GRAPHIC_EXTENSION,
};
pub use item::{ItemGraphicData, ItemSpritesheet, WILDCARD};
pub use object::ObjectGraphicData;
pub use skill::{ActivationAnim, SkillGraphicData};

use crate::assets::AssetRegistry;

/// Descriptors that are stored in the registry under an id.
pub trait Descriptor: Clone {
    fn descriptor_id(&self) -> &str;
    fn resolve_assets(&mut self, assets: &AssetRegistry);
}

macro_rules! impl_descriptor {
    ($ty:ty, $id:ident) => {
        impl Descriptor for $ty {
            fn descriptor_id(&self) -> &str {
                &self.$id
            }

            fn resolve_assets(&mut self, assets: &AssetRegistry) {
                self.resolve(assets)
            }
        }
    };
}

impl_descriptor!(AvatarData, id);
impl_descriptor!(ItemGraphicData, item_id);
impl_descriptor!(EffectGraphicData, effect_id);
impl_descriptor!(SkillGraphicData, skill_id);
impl_descriptor!(ObjectGraphicData, id);

/// By-id maps of every graphic descriptor.
///
/// Written during module and chapter loads only, read during updates.
#[derive(Debug, Default, Clone)]
pub struct GraphicRegistry {
    avatars: HashMap<String, AvatarData>,
    items: HashMap<String, ItemGraphicData>,
    effects: HashMap<String, EffectGraphicData>,
    skills: HashMap<String, SkillGraphicData>,
    objects: HashMap<String, ObjectGraphicData>,
}

fn merge<T: Descriptor>(map: &mut HashMap<String, T>, list: impl IntoIterator<Item = T>) {
    for data in list {
        map.insert(data.descriptor_id().to_string(), data);
    }
}

macro_rules! registry_accessors {
    ($($field:ident: $ty:ty => $set:ident, $add:ident, $get:ident;)*) => {
        impl GraphicRegistry {
            $(
                /// Replaces every descriptor of this kind.
                pub fn $set(&mut self, list: impl IntoIterator<Item = $ty>) {
                    self.$field.clear();
                    merge(&mut self.$field, list);
                }

                /// Merges descriptors in, later ones overriding earlier ones with the same id.
                pub fn $add(&mut self, list: impl IntoIterator<Item = $ty>) {
                    merge(&mut self.$field, list);
                }

                pub fn $get(&self, id: &str) -> Option<&$ty> {
                    self.$field.get(id)
                }
            )*

            /// Resolves every descriptor against the asset registry.
            pub fn resolve_all(&mut self, assets: &AssetRegistry) {
                $(
                    for data in self.$field.values_mut() {
                        data.resolve_assets(assets);
                    }
                )*
            }

            pub fn clear(&mut self) {
                $(self.$field.clear();)*
            }
        }
    };
}

registry_accessors! {
    avatars: AvatarData => set_avatars, add_avatars, avatar;
    items: ItemGraphicData => set_items, add_items, item;
    effects: EffectGraphicData => set_effects, add_effects, effect;
    skills: SkillGraphicData => set_skills, add_skills, skill;
    objects: ObjectGraphicData => set_objects, add_objects, object;
}

impl GraphicRegistry {
    pub fn avatars(&self) -> impl Iterator<Item = &AvatarData> {
        self.avatars.values()
    }

    pub fn len(&self) -> usize {
        self.avatars.len() + self.items.len() + self.effects.len() + self.skills.len() + self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fills the registry from the descriptor directories of a module, replacing its content.
    ///
    /// Returns the number of descriptors loaded.
    pub fn load_module_graphics(&mut self, gui_path: impl AsRef<std::path::Path>, assets: &AssetRegistry) -> usize {
        let gui_path = gui_path.as_ref();
        self.set_avatars(import_avatars_dir(gui_path.join("avatars")));
        self.set_items(import_items_dir(gui_path.join("items")));
        self.set_effects(import_effects_dir(gui_path.join("effects")));
        self.set_skills(import_skills_dir(gui_path.join("skills")));
        self.set_objects(import_objects_dir(gui_path.join("objects")));
        self.resolve_all(assets);

        log::info!("module graphics loaded from {:?}: {} descriptors", gui_path, self.len());
        self.len()
    }

    /// Merges the npc and object descriptors of a chapter into the registry.
    pub fn load_chapter_graphics(
        &mut self,
        gui_path: impl AsRef<std::path::Path>,
        chapter_id: &str,
        assets: &AssetRegistry,
    ) -> usize {
        let chapter_path = gui_path.as_ref().join("chapters").join(chapter_id);

        let mut avatars = import_avatars_dir(chapter_path.join("npc"));
        let mut objects = import_objects_dir(chapter_path.join("objects"));
        avatars.iter_mut().for_each(|a| a.resolve(assets));
        objects.iter_mut().for_each(|o| o.resolve(assets));

        let count = avatars.len() + objects.len();
        self.add_avatars(avatars);
        self.add_objects(objects);

        log::info!("chapter {} graphics loaded: {} descriptors", chapter_id, count);
        count
    }
}
