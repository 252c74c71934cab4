//! The asset registry: every picture, font and audio buffer of the UI and of the loaded module.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;

use crate::error::{MuralError, Result};
use crate::format::archive::{is_audio, is_font, is_picture, Archive};
use crate::format::audio::AudioBuffer;
use crate::format::font::Font;
use crate::format::picture::Picture;
use crate::format::Asset;

pub const GRAPHIC_ARCHIVE: &str = "graphic.zip";
pub const AUDIO_ARCHIVE: &str = "audio.zip";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    Portrait,
    AvatarSpritesheet,
    ObjectSpritesheet,
    Icon,
    Texture,
    Font,
    Music,
    Effect,
}

impl AssetCategory {
    /// Categories loaded with the UI itself.
    pub const UI: [AssetCategory; 4] = [
        AssetCategory::Texture,
        AssetCategory::Font,
        AssetCategory::Music,
        AssetCategory::Effect,
    ];

    /// Categories loaded with a game module.
    pub const MODULE: [AssetCategory; 4] = [
        AssetCategory::Portrait,
        AssetCategory::AvatarSpritesheet,
        AssetCategory::ObjectSpritesheet,
        AssetCategory::Icon,
    ];

    /// Directory of the category inside its archive.
    pub fn subdir(self) -> &'static str {
        match self {
            AssetCategory::Portrait => "portrait",
            AssetCategory::AvatarSpritesheet => "spritesheet/avatar",
            AssetCategory::ObjectSpritesheet => "spritesheet/object",
            AssetCategory::Icon => "icon",
            AssetCategory::Texture => "texture",
            AssetCategory::Font => "font",
            AssetCategory::Music => "music",
            AssetCategory::Effect => "effect",
        }
    }

    pub fn archive(self) -> &'static str {
        match self {
            AssetCategory::Music | AssetCategory::Effect => AUDIO_ARCHIVE,
            _ => GRAPHIC_ARCHIVE,
        }
    }

    pub fn accepts(self, name: &str) -> bool {
        match self {
            AssetCategory::Font => is_font(name),
            AssetCategory::Music | AssetCategory::Effect => is_audio(name),
            _ => is_picture(name),
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subdir())
    }
}

/// Pictures, fonts and audio buffers by category, keyed by entry basename.
///
/// Filled during the load phases and only read afterwards.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    pictures: HashMap<AssetCategory, HashMap<String, Arc<Picture>>>,
    fonts: HashMap<String, Arc<Font>>,
    audio: HashMap<AssetCategory, HashMap<String, Arc<AudioBuffer>>>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn picture(&self, category: AssetCategory, name: &str) -> Option<Arc<Picture>> {
        self.pictures.get(&category)?.get(name).cloned()
    }

    pub fn font(&self, name: &str) -> Option<Arc<Font>> {
        self.fonts.get(name).cloned()
    }

    pub fn audio(&self, category: AssetCategory, name: &str) -> Option<Arc<AudioBuffer>> {
        self.audio.get(&category)?.get(name).cloned()
    }

    pub fn portrait(&self, name: &str) -> Option<Arc<Picture>> {
        self.picture(AssetCategory::Portrait, name)
    }

    pub fn icon(&self, name: &str) -> Option<Arc<Picture>> {
        self.picture(AssetCategory::Icon, name)
    }

    pub fn texture(&self, name: &str) -> Option<Arc<Picture>> {
        self.picture(AssetCategory::Texture, name)
    }

    pub fn music(&self, name: &str) -> Option<Arc<AudioBuffer>> {
        self.audio(AssetCategory::Music, name)
    }

    pub fn effect(&self, name: &str) -> Option<Arc<AudioBuffer>> {
        self.audio(AssetCategory::Effect, name)
    }

    /// Picture lookup for a descriptor field: an empty name is unset, a missing one is warned about.
    pub fn resolve(&self, category: AssetCategory, name: &str) -> Option<Arc<Picture>> {
        if name.is_empty() {
            return None;
        }
        let picture = self.picture(category, name);
        if picture.is_none() {
            Self::warn_missing(category, name);
        }
        picture
    }

    pub fn resolve_audio(&self, category: AssetCategory, name: &str) -> Option<Arc<AudioBuffer>> {
        if name.is_empty() {
            return None;
        }
        let audio = self.audio(category, name);
        if audio.is_none() {
            Self::warn_missing(category, name);
        }
        audio
    }

    fn warn_missing(category: AssetCategory, name: &str) {
        let e = MuralError::MissingReference {
            kind: category.subdir(),
            name: name.to_string(),
        };
        log::warn!("{}", e);
    }

    pub fn insert_picture(&mut self, category: AssetCategory, name: &str, picture: Picture) {
        self.pictures
            .entry(category)
            .or_default()
            .insert(name.to_string(), Arc::new(picture));
    }

    pub fn insert_font(&mut self, name: &str, font: Font) {
        self.fonts.insert(name.to_string(), Arc::new(font));
    }

    pub fn insert_audio(&mut self, category: AssetCategory, name: &str, audio: AudioBuffer) {
        self.audio
            .entry(category)
            .or_default()
            .insert(name.to_string(), Arc::new(audio));
    }

    /// Number of assets registered under a category.
    pub fn count(&self, category: AssetCategory) -> usize {
        match category {
            AssetCategory::Font => self.fonts.len(),
            AssetCategory::Music | AssetCategory::Effect => self.audio.get(&category).map_or(0, |m| m.len()),
            _ => self.pictures.get(&category).map_or(0, |m| m.len()),
        }
    }

    /// Names of a category, sorted.
    pub fn names(&self, category: AssetCategory) -> Vec<String> {
        let names: Vec<&String> = match category {
            AssetCategory::Font => self.fonts.keys().collect(),
            AssetCategory::Music | AssetCategory::Effect => {
                self.audio.get(&category).map(|m| m.keys().collect()).unwrap_or_default()
            }
            _ => self.pictures.get(&category).map(|m| m.keys().collect()).unwrap_or_default(),
        };
        names.into_iter().sorted().cloned().collect()
    }

    /// Every music buffer, ordered by name.
    pub fn music_playlist(&self) -> Vec<Arc<AudioBuffer>> {
        self.names(AssetCategory::Music)
            .iter()
            .filter_map(|name| self.music(name))
            .collect()
    }

    fn clear_category(&mut self, category: AssetCategory) {
        match category {
            AssetCategory::Font => self.fonts.clear(),
            AssetCategory::Music | AssetCategory::Effect => {
                self.audio.remove(&category);
            }
            _ => {
                self.pictures.remove(&category);
            }
        }
    }

    /// Decodes every entry of `category` found in `archive`. Broken entries are logged and skipped.
    pub fn load_category(&mut self, archive: &mut Archive, category: AssetCategory) -> usize {
        let archive_path = archive.path().to_path_buf();
        let mut loaded = 0;
        archive.for_each_entry(
            category.subdir(),
            |name| category.accepts(name),
            |entry, data| {
                let name = entry.name();
                let result = match category {
                    AssetCategory::Font => Font::load_from_bytes(name, data).map(|f| self.insert_font(name, f)),
                    AssetCategory::Music | AssetCategory::Effect => {
                        AudioBuffer::load_from_bytes(name, data).map(|a| self.insert_audio(category, name, a))
                    }
                    _ => Picture::load_from_bytes(name, data).map(|p| self.insert_picture(category, name, p)),
                };
                match result {
                    Ok(()) => loaded += 1,
                    Err(e) => log::error!("{:?}: {}: {}", archive_path, entry.path(), e),
                }
            },
        );
        log::debug!("{} {} asset(s) loaded from {:?}", loaded, category, archive_path);
        loaded
    }

    fn load_categories(&mut self, gui_path: &Path, categories: &[AssetCategory]) -> Result<usize> {
        let mut loaded = 0;
        for (archive_name, group) in &categories.iter().chunk_by(|c| c.archive()) {
            let mut archive = Archive::open(gui_path.join(archive_name))?;
            for category in group {
                self.clear_category(*category);
                loaded += self.load_category(&mut archive, *category);
            }
        }
        Ok(loaded)
    }

    /// Loads textures, fonts, music and sound effects of the UI.
    pub fn load_ui_assets(&mut self, gui_path: impl AsRef<Path>) -> Result<usize> {
        let loaded = self.load_categories(gui_path.as_ref(), &AssetCategory::UI)?;
        log::info!("ui assets loaded: {}", loaded);
        Ok(loaded)
    }

    /// Loads portraits, spritesheets and icons of a game module, replacing the previous module's.
    pub fn load_module_assets(&mut self, gui_path: impl AsRef<Path>) -> Result<usize> {
        let loaded = self.load_categories(gui_path.as_ref(), &AssetCategory::MODULE)?;
        log::info!("module assets loaded: {}", loaded);
        Ok(loaded)
    }
}
