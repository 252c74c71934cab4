use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use mural_audio::EffectSink;
use mural_core::graphic::GraphicRegistry;
use mural_core::save::{GuiSave, PlayerSave};
use mural_core::types::Position;

use crate::wrapper::Avatar;

/// Where a player placed inventory and menu bar contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotLayout {
    /// content id -> inventory slot index
    pub inventory: BTreeMap<String, u32>,
    /// content id -> menu bar slot index
    pub bar: BTreeMap<String, u32>,
}

/// The in-game head-up display: player avatars, their slot layouts and the camera.
#[derive(Debug)]
pub struct Hud {
    avatars: Vec<Avatar>,
    layouts: HashMap<String, SlotLayout>,
    camera: Position,
    open: bool,
}

impl Hud {
    pub fn new(avatars: Vec<Avatar>) -> Self {
        Self {
            avatars,
            layouts: HashMap::new(),
            camera: Position::default(),
            open: true,
        }
    }

    pub fn avatars(&self) -> &[Avatar] {
        &self.avatars
    }

    pub fn avatar(&self, key: &str) -> Option<&Avatar> {
        self.avatars.iter().find(|avatar| avatar.key() == key)
    }

    pub fn layout(&self, key: &str) -> Option<&SlotLayout> {
        self.layouts.get(key)
    }

    pub fn set_inventory_slot(&mut self, key: &str, content: &str, slot: u32) {
        let layout = self.layouts.entry(key.to_string()).or_default();
        layout.inventory.insert(content.to_string(), slot);
    }

    pub fn set_bar_slot(&mut self, key: &str, content: &str, slot: u32) {
        let layout = self.layouts.entry(key.to_string()).or_default();
        layout.bar.insert(content.to_string(), slot);
    }

    pub fn camera(&self) -> Position {
        self.camera
    }

    pub fn set_camera(&mut self, camera: Position) {
        self.camera = camera;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Updates every avatar. Avatars whose character is gone are dropped.
    pub fn update(&mut self, delta: Duration, pointer: Position, graphics: &GraphicRegistry, sink: &mut dyn EffectSink) {
        self.avatars.retain_mut(|avatar| {
            let alive = avatar.update(delta, pointer, graphics, sink);
            if !alive {
                log::debug!("hud: character of {} is gone", avatar.key());
            }
            alive
        });
    }

    /// The current UI state as an unnamed save.
    ///
    /// Each player avatar is recorded under the id and serial of its character so that
    /// [`Hud::apply`] can find it again.
    pub fn snapshot(&self) -> GuiSave {
        let players = self
            .avatars
            .iter()
            .map(|avatar| {
                let layout = self.layouts.get(avatar.key()).cloned().unwrap_or_default();
                PlayerSave {
                    avatar: avatar.character_data(),
                    inv_slots: layout.inventory,
                    bar_slots: layout.bar,
                }
            })
            .collect();

        GuiSave {
            name: String::new(),
            players,
            camera: self.camera,
        }
    }

    /// Restores slot layouts of the players present in both the save and the HUD, and the camera.
    ///
    /// Returns the number of players restored.
    pub fn apply(&mut self, save: &GuiSave) -> usize {
        let mut restored = 0;
        for player in &save.players {
            let key = player.avatar.key();
            if self.avatar(&key).is_none() {
                log::warn!("hud: save {:?} has no avatar {} here", save.name, key);
                continue;
            }
            self.layouts.insert(
                key,
                SlotLayout {
                    inventory: player.inv_slots.clone(),
                    bar: player.bar_slots.clone(),
                },
            );
            restored += 1;
        }
        self.camera = save.camera;
        log::info!("hud: {} player(s) restored from {:?}", restored, save.name);
        restored
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::simulation::testing::TestCharacter;
    use crate::simulation::{Character, Gender};

    fn hud_with(characters: &[Arc<dyn Character>]) -> Hud {
        let graphics = GraphicRegistry::default();
        Hud::new(
            characters
                .iter()
                .map(|c| Avatar::new(c, &graphics).unwrap())
                .collect(),
        )
    }

    #[test]
    fn snapshot_then_apply() {
        let pc: Arc<dyn Character> = TestCharacter::new("pc", "7", "human", Gender::Male);
        let mut hud = hud_with(&[pc.clone()]);
        hud.set_inventory_slot("pc#7", "sword#1", 0);
        hud.set_bar_slot("pc#7", "fire#2", 3);
        hud.set_camera(Position::new(100.0, -50.0));

        let save = hud.snapshot();
        assert_eq!(save.players.len(), 1);
        assert_eq!(save.players[0].avatar.key(), "pc#7");
        assert_eq!(save.players[0].inv_slots, BTreeMap::from([("sword#1".to_string(), 0)]));
        assert_eq!(save.camera, Position::new(100.0, -50.0));

        let mut fresh = hud_with(&[pc]);
        assert_eq!(fresh.apply(&save), 1);
        assert_eq!(fresh.layout("pc#7"), hud.layout("pc#7"));
        assert_eq!(fresh.camera(), hud.camera());
    }

    #[test]
    fn apply_skips_unknown_players() {
        let pc: Arc<dyn Character> = TestCharacter::new("pc", "0", "human", Gender::Female);
        let mut hud = hud_with(&[pc]);
        let mut save = GuiSave::default();
        save.players.push(PlayerSave {
            avatar: mural_core::graphic::AvatarData::new("npc", "1"),
            ..Default::default()
        });

        assert_eq!(hud.apply(&save), 0);
        assert!(hud.layout("npc#1").is_none());
    }

    #[test]
    fn update_drops_lost_characters() {
        let pc: Arc<dyn Character> = TestCharacter::new("pc", "0", "human", Gender::Male);
        let npc: Arc<dyn Character> = TestCharacter::new("npc", "0", "elf", Gender::Female);
        let mut hud = hud_with(&[pc.clone(), npc.clone()]);
        drop(npc);

        struct Mute;
        impl EffectSink for Mute {
            fn play_effect(&mut self, _buffer: &Arc<mural_core::format::audio::AudioBuffer>) {}
        }
        hud.update(Duration::from_millis(16), Position::default(), &GraphicRegistry::default(), &mut Mute);
        assert_eq!(hud.avatars().len(), 1);
        assert_eq!(hud.avatars()[0].key(), "pc#0");

        hud.close();
        assert!(!hud.is_open());
    }
}
