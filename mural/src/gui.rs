use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use anyhow::Result;
use mural_audio::{EffectsPlayer, MusicPlayer, Speaker};
use mural_core::types::{Position, Volume};
use mural_core::{AssetRegistry, GraphicRegistry};

use crate::config::{AppConfig, SharedConfig};
use crate::hud::Hud;
use crate::menu::MainMenu;
use crate::simulation::Character;
use crate::wrapper::Avatar;

/// Everything the front-end owns between frames: configuration, asset and descriptor
/// registries, audio, and the HUD or main menu currently shown.
///
/// The registries are only written by the `load_*` methods.
pub struct GuiData {
    config: SharedConfig,
    assets: AssetRegistry,
    graphics: GraphicRegistry,
    speaker: Arc<Speaker>,
    effects: Arc<Mutex<EffectsPlayer>>,
    hud: Option<Hud>,
    menu: Option<MainMenu>,
}

impl GuiData {
    pub fn new(config: SharedConfig, speaker: Arc<Speaker>) -> Self {
        let mut effects = EffectsPlayer::new(speaker.clone());
        {
            let config = read_config(&config);
            effects.set_volume(Volume(config.effects_volume));
            effects.set_mute(config.effects_mute);
        }

        Self {
            config,
            assets: AssetRegistry::new(),
            graphics: GraphicRegistry::default(),
            speaker,
            effects: Arc::new(Mutex::new(effects)),
            hud: None,
            menu: None,
        }
    }

    pub fn config(&self) -> RwLockReadGuard<'_, AppConfig> {
        read_config(&self.config)
    }

    pub fn config_mut(&self) -> RwLockWriteGuard<'_, AppConfig> {
        self.config.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn shared_config(&self) -> SharedConfig {
        self.config.clone()
    }

    pub fn gui_path(&self) -> PathBuf {
        self.config().gui_path()
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn graphics(&self) -> &GraphicRegistry {
        &self.graphics
    }

    pub fn speaker(&self) -> &Arc<Speaker> {
        &self.speaker
    }

    /// The global sound effects sink.
    pub fn effects(&self) -> MutexGuard<'_, EffectsPlayer> {
        self.effects.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Loads the UI archives of the GUI directory.
    pub fn load_ui(&mut self) -> Result<usize> {
        let gui_path = self.gui_path();
        Ok(self.assets.load_ui_assets(&gui_path)?)
    }

    /// Loads the module archives and descriptors, replacing the previous module's.
    pub fn load_module(&mut self) -> Result<usize> {
        let gui_path = self.gui_path();
        let assets = self.assets.load_module_assets(&gui_path)?;
        let descriptors = self.graphics.load_module_graphics(&gui_path, &self.assets);
        log::info!("module loaded from {:?}: {} asset(s), {} descriptor(s)", gui_path, assets, descriptors);
        Ok(assets + descriptors)
    }

    pub fn load_chapter(&mut self, chapter_id: &str) -> usize {
        let gui_path = self.gui_path();
        self.graphics.load_chapter_graphics(&gui_path, chapter_id, &self.assets)
    }

    pub fn hud(&self) -> Option<&Hud> {
        self.hud.as_ref()
    }

    pub fn hud_mut(&mut self) -> Option<&mut Hud> {
        self.hud.as_mut()
    }

    pub fn set_hud(&mut self, hud: Option<Hud>) {
        self.hud = hud;
    }

    /// Opens a HUD for the given player characters.
    pub fn open_hud(&mut self, players: &[Arc<dyn Character>]) -> mural_core::Result<()> {
        let avatars = players
            .iter()
            .map(|character| Avatar::new(character, &self.graphics))
            .collect::<mural_core::Result<Vec<_>>>()?;
        self.hud = Some(Hud::new(avatars));
        Ok(())
    }

    pub fn menu(&self) -> Option<&MainMenu> {
        self.menu.as_ref()
    }

    pub fn menu_mut(&mut self) -> Option<&mut MainMenu> {
        self.menu.as_mut()
    }

    pub fn set_menu(&mut self, menu: Option<MainMenu>) {
        self.menu = menu;
    }

    /// Opens the main menu with every loaded music track, starting with the configured one.
    pub fn open_menu(&mut self, playable: Vec<Arc<dyn Character>>) -> MainMenu {
        let config = self.config().clone();
        let mut music = MusicPlayer::new(self.speaker.clone());
        music.set_volume(Volume(config.music_volume));
        music.set_mute(config.music_mute);

        let names = self.assets.names(mural_core::AssetCategory::Music);
        music.set_playlist(self.assets.music_playlist());
        if let Some(index) = names.iter().position(|name| *name == config.menu_music) {
            music.set_index(index as isize);
        }
        if !music.is_empty() {
            if let Err(e) = music.play() {
                log::error!("unable to start menu music: {:#}", e);
            }
        }
        MainMenu::new(music, playable)
    }

    /// Closes the HUD when one is shown, the main menu otherwise.
    ///
    /// Returns `false` when there was neither.
    pub fn exit(&mut self) -> bool {
        if let Some(hud) = self.hud.as_mut() {
            hud.close();
            true
        } else if let Some(menu) = self.menu.as_mut() {
            menu.close();
            true
        } else {
            false
        }
    }

    /// Whether anything is still shown.
    pub fn is_running(&self) -> bool {
        self.hud.as_ref().is_some_and(Hud::is_open) || self.menu.as_ref().is_some_and(MainMenu::is_open)
    }

    /// Looks up a HUD avatar by `id#serial`.
    pub fn avatar(&self, key: &str) -> Option<&Avatar> {
        self.hud.as_ref().and_then(|hud| hud.avatar(key))
    }

    /// One frame of state updates.
    pub fn update(&mut self, delta: Duration, pointer: Position) {
        if let Some(hud) = self.hud.as_mut() {
            let mut effects = self.effects.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            hud.update(delta, pointer, &self.graphics, &mut *effects);
        }
        if let Some(menu) = self.menu.as_mut() {
            menu.update();
        }
    }
}

fn read_config(config: &SharedConfig) -> RwLockReadGuard<'_, AppConfig> {
    config.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl std::fmt::Debug for GuiData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuiData")
            .field("graphics", &self.graphics.len())
            .field("hud", &self.hud)
            .field("menu", &self.menu)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use mural_audio::NullDevice;

    use super::*;
    use crate::config::AppConfigBuilder;

    /// A session with a silent speaker, rooted at `gui_path`.
    pub fn gui_data(gui_path: impl Into<PathBuf>) -> GuiData {
        let config = AppConfigBuilder::new().with_gui_path(gui_path).get().into_shared();
        GuiData::new(config, Arc::new(Speaker::new(NullDevice)))
    }
}
