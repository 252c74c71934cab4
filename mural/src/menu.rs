use std::sync::Arc;

use itertools::Itertools;
use mural_audio::MusicPlayer;

use crate::simulation::Character;

/// The main menu: the music player and the characters a player may pick.
pub struct MainMenu {
    music: MusicPlayer,
    playable: Vec<Arc<dyn Character>>,
    open: bool,
}

impl MainMenu {
    pub fn new(music: MusicPlayer, playable: Vec<Arc<dyn Character>>) -> Self {
        Self {
            music,
            playable,
            open: true,
        }
    }

    pub fn music(&self) -> &MusicPlayer {
        &self.music
    }

    pub fn music_mut(&mut self) -> &mut MusicPlayer {
        &mut self.music
    }

    pub fn playable(&self) -> &[Arc<dyn Character>] {
        &self.playable
    }

    pub fn set_playable(&mut self, playable: Vec<Arc<dyn Character>>) {
        self.playable = playable;
    }

    /// `id#serial` of every playable character, space separated.
    pub fn playable_chars(&self) -> String {
        self.playable.iter().map(|c| c.key()).join(" ")
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Closes the menu and stops its music.
    pub fn close(&mut self) {
        if self.music.is_playing() {
            self.music.stop();
        }
        self.open = false;
    }

    pub fn update(&mut self) {
        if self.open {
            self.music.update();
        }
    }
}

impl std::fmt::Debug for MainMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainMenu")
            .field("playable", &self.playable_chars())
            .field("tracks", &self.music.len())
            .field("open", &self.open)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use mural_audio::{NullDevice, Speaker};

    use super::*;
    use crate::simulation::testing::TestCharacter;
    use crate::simulation::Gender;

    #[test]
    fn playable_chars_are_space_separated() {
        let music = MusicPlayer::new(Arc::new(Speaker::new(NullDevice)));
        let mut menu = MainMenu::new(music, Vec::new());
        assert_eq!(menu.playable_chars(), "");

        menu.set_playable(vec![
            TestCharacter::new("pc", "0", "human", Gender::Male) as Arc<dyn Character>,
            TestCharacter::new("pc", "1", "elf", Gender::Female),
        ]);
        assert_eq!(menu.playable_chars(), "pc#0 pc#1");

        menu.close();
        assert!(!menu.is_open());
    }
}
