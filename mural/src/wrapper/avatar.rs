use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use crossbeam_channel::Receiver;
use mural_audio::EffectSink;
use mural_core::format::picture::Picture;
use mural_core::graphic::{AvatarData, GraphicRegistry};
use mural_core::types::{Position, Rect};
use mural_core::{MuralError, Result};

use super::defaults::{default_avatar_data, error_picture};
use super::effect::EffectWrapper;
use super::item::ItemWrapper;
use super::skill::SkillWrapper;
use super::sprite::{Animation, AvatarSprite, Direction};
use crate::simulation::{Character, CharacterEvent, Gender, ItemKind, Skill};

/// How long a chat message stays above the avatar.
pub const CHAT_DURATION: Duration = Duration::from_millis(2000);

/// The text popup above an avatar.
#[derive(Debug, Clone, Default)]
pub struct ChatPopup {
    text: String,
}

impl ChatPopup {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// Draws a simulation character: sprite, portrait, chat popup, and the icons of its items,
/// effects and skills.
///
/// The character is only weakly referenced; its events arrive through a channel registered
/// on construction.
pub struct Avatar {
    character: Weak<dyn Character>,
    character_id: String,
    character_serial: String,
    key: String,
    race: String,
    gender: Gender,
    events: Receiver<CharacterEvent>,

    data: AvatarData,
    portrait: Arc<Picture>,
    sprite: AvatarSprite,
    chat: ChatPopup,

    items: HashMap<String, ItemWrapper>,
    /// In equip order; the last item of a kind fills its slot.
    equipped: Vec<ItemWrapper>,
    effects: HashMap<String, EffectWrapper>,
    skills: HashMap<String, SkillWrapper>,

    hovered: bool,
    speaking: bool,
    chat_timer: Duration,
    silenced: bool,
}

impl Avatar {
    /// Wraps `character` with its registered avatar, or the default one of its gender.
    ///
    /// Fails when the registered avatar has neither a head and torso pair nor a full body sheet.
    pub fn new(character: &Arc<dyn Character>, graphics: &GraphicRegistry) -> Result<Self> {
        let data = match graphics.avatar(character.id()) {
            Some(data) => data.clone(),
            None => {
                log::warn!(
                    "avatar {:?} not found, using the default {} avatar",
                    character.id(),
                    character.gender()
                );
                default_avatar_data(character.gender())
            }
        };
        Self::with_data(character, data)
    }

    pub fn with_data(character: &Arc<dyn Character>, data: AvatarData) -> Result<Self> {
        let Some(mut sprite) = AvatarSprite::from_avatar(&data) else {
            return Err(MuralError::MissingReference {
                kind: "avatar spritesheet",
                name: data.key(),
            });
        };
        sprite.set_position(character.position());

        let (sender, events) = crossbeam_channel::unbounded();
        character.subscribe(sender);

        Ok(Self {
            character: Arc::downgrade(character),
            character_id: character.id().to_string(),
            character_serial: character.serial().to_string(),
            key: character.key(),
            race: character.race().to_string(),
            gender: character.gender(),
            events,
            portrait: data.portrait.clone().unwrap_or_else(error_picture),
            data,
            sprite,
            chat: ChatPopup::default(),
            items: HashMap::new(),
            equipped: Vec::new(),
            effects: HashMap::new(),
            skills: HashMap::new(),
            hovered: false,
            speaking: false,
            chat_timer: Duration::ZERO,
            silenced: false,
        })
    }

    /// `id#serial` of the wrapped character.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn character(&self) -> Option<Arc<dyn Character>> {
        self.character.upgrade()
    }

    pub fn data(&self) -> &AvatarData {
        &self.data
    }

    /// The descriptor recorded under the id and serial of the character instead of the
    /// descriptor's own, which may be a shared default.
    pub fn character_data(&self) -> AvatarData {
        let mut data = self.data.clone();
        data.id = self.character_id.clone();
        data.serial = self.character_serial.clone();
        data
    }

    pub fn portrait(&self) -> &Arc<Picture> {
        &self.portrait
    }

    pub fn sprite(&self) -> &AvatarSprite {
        &self.sprite
    }

    pub fn chat(&self) -> &ChatPopup {
        &self.chat
    }

    pub fn items(&self) -> &HashMap<String, ItemWrapper> {
        &self.items
    }

    pub fn equipped(&self) -> &[ItemWrapper] {
        &self.equipped
    }

    pub fn effects(&self) -> &HashMap<String, EffectWrapper> {
        &self.effects
    }

    pub fn skills(&self) -> &HashMap<String, SkillWrapper> {
        &self.skills
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn chat_timer(&self) -> Duration {
        self.chat_timer
    }

    pub fn is_silenced(&self) -> bool {
        self.silenced
    }

    pub fn set_silenced(&mut self, silenced: bool) {
        self.silenced = silenced;
    }

    pub fn draw_rect(&self) -> Rect {
        self.sprite.draw_rect()
    }

    /// Reconciles the avatar with its character for one frame.
    ///
    /// Returns `false`, leaving the avatar untouched, once the character is gone.
    pub fn update(
        &mut self,
        delta: Duration,
        pointer: Position,
        graphics: &GraphicRegistry,
        sink: &mut dyn EffectSink,
    ) -> bool {
        let Some(character) = self.character.upgrade() else {
            return false;
        };

        self.handle_events(sink);

        self.update_animation(character.as_ref());
        self.update_items(character.as_ref(), graphics);
        self.update_equipment(character.as_ref());
        self.update_effects(character.as_ref(), graphics);
        self.update_skills(character.as_ref(), graphics);
        self.update_chat(delta);
        self.hovered = self.sprite.draw_rect().contains(pointer);
        true
    }

    /// Handles the events the character sent since the last call.
    pub fn handle_events(&mut self, sink: &mut dyn EffectSink) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                CharacterEvent::SkillActivated(skill) => self.on_skill_activated(skill.as_ref(), sink),
                CharacterEvent::ChatSent(text) => self.on_chat_sent(&text),
            }
        }
    }

    pub fn on_skill_activated(&mut self, skill: &dyn Skill, sink: &mut dyn EffectSink) {
        let Some(wrapper) = self.skills.get(&skill.key()) else {
            log::debug!("{}: activated skill {} has no wrapper", self.key, skill.key());
            return;
        };

        if wrapper.activation_animation() == Some(Animation::Melee) {
            self.sprite.play_once(Animation::Melee);
        }
        if !self.silenced {
            if let Some(audio) = wrapper.activation_audio() {
                sink.play_effect(audio);
            }
        }
    }

    pub fn on_chat_sent(&mut self, text: &str) {
        self.chat.set_text(text);
        self.speaking = true;
        self.chat_timer = Duration::ZERO;
    }

    fn update_animation(&mut self, character: &dyn Character) {
        let position = character.position();
        self.sprite.set_position(position);

        let animation = if character.is_casting() {
            Animation::SpellCast
        } else if character.is_crafting() {
            Animation::CraftCast
        } else if character.is_moving() {
            let destination = character.destination();
            let direction = if position.x < destination.x {
                Some(Direction::Right)
            } else if position.y < destination.y {
                Some(Direction::Up)
            } else if position.x > destination.x {
                Some(Direction::Left)
            } else if position.y > destination.y {
                Some(Direction::Down)
            } else {
                None
            };
            if let Some(direction) = direction {
                self.sprite.set_direction(direction);
            }
            Animation::Move
        } else {
            Animation::Idle
        };
        self.sprite.set_animation(animation);
    }

    fn update_items(&mut self, character: &dyn Character, graphics: &GraphicRegistry) {
        let inventory = keyed(character.inventory(), |item| item.key());
        self.items.retain(|key, _| inventory.contains_key(key));
        for (key, item) in inventory {
            self.items
                .entry(key)
                .or_insert_with(|| ItemWrapper::from_registry(item, graphics));
        }
    }

    fn update_equipment(&mut self, character: &dyn Character) {
        let equipped: Vec<String> = character.equipped().iter().map(|item| item.key()).collect();

        let removed: Vec<String> = self
            .equipped
            .iter()
            .map(ItemWrapper::key)
            .filter(|key| !equipped.contains(key) || !self.items.contains_key(key))
            .collect();
        for key in removed {
            self.unequip(&key);
        }

        // in the character's order, so the last listed item of a kind wins its slot
        for key in equipped {
            if self.is_equipped(&key) {
                continue;
            }
            match self.items.get(&key).cloned() {
                Some(wrapper) => self.equip(wrapper),
                None => log::debug!("{}: equipped item {} is not in the inventory", self.key, key),
            }
        }
    }

    pub fn is_equipped(&self, key: &str) -> bool {
        self.equipped.iter().any(|wrapper| wrapper.key() == key)
    }

    /// Installs the item's spritesheet in the slot matching its kind.
    pub fn equip(&mut self, wrapper: ItemWrapper) {
        let key = wrapper.key();
        self.equipped.retain(|equipped| equipped.key() != key);
        self.install(&wrapper);
        self.equipped.push(wrapper);
    }

    /// Clears the slot the item occupied, or hands it to the latest other equipped item of
    /// the same kind.
    pub fn unequip(&mut self, key: &str) {
        let Some(index) = self.equipped.iter().position(|wrapper| wrapper.key() == key) else {
            return;
        };
        let wrapper = self.equipped.remove(index);
        let kind = wrapper.kind();
        if !matches!(kind, ItemKind::Weapon | ItemKind::Armor) {
            log::warn!("{}: cannot unequip {} of kind {:?}", self.key, key, kind);
            return;
        }

        match self.equipped.iter().rev().find(|other| other.kind() == kind).cloned() {
            Some(other) => self.install(&other),
            None if kind == ItemKind::Weapon => self.sprite.set_weapon(None),
            None => self.sprite.set_armor(None),
        }
    }

    fn install(&mut self, wrapper: &ItemWrapper) {
        let layer = || {
            let layer = wrapper.spritesheet(&self.race, self.gender.as_str());
            if layer.is_none() {
                log::warn!(
                    "{}: item {} has no spritesheet for {} {}",
                    self.key,
                    wrapper.key(),
                    self.race,
                    self.gender
                );
            }
            layer
        };

        match wrapper.kind() {
            ItemKind::Weapon => {
                let layer = layer();
                self.sprite.set_weapon(layer);
            }
            ItemKind::Armor => {
                let layer = layer();
                self.sprite.set_armor(layer);
            }
            kind => log::warn!("{}: cannot equip {} of kind {:?}", self.key, wrapper.key(), kind),
        }
    }

    fn update_effects(&mut self, character: &dyn Character, graphics: &GraphicRegistry) {
        let active = keyed(character.effects(), |effect| effect.key());
        self.effects.retain(|key, _| active.contains_key(key));
        for (key, effect) in active {
            self.effects
                .entry(key)
                .or_insert_with(|| EffectWrapper::new(effect, graphics));
        }
    }

    fn update_skills(&mut self, character: &dyn Character, graphics: &GraphicRegistry) {
        let known = keyed(character.skills(), |skill| skill.key());
        self.skills.retain(|key, _| known.contains_key(key));
        for (key, skill) in known {
            self.skills
                .entry(key)
                .or_insert_with(|| SkillWrapper::new(skill, graphics));
        }
    }

    fn update_chat(&mut self, delta: Duration) {
        if !self.speaking {
            return;
        }
        self.chat_timer += delta;
        if self.chat_timer >= CHAT_DURATION {
            self.speaking = false;
            self.chat_timer = Duration::ZERO;
        }
    }
}

fn keyed<T>(list: Vec<T>, key: impl Fn(&T) -> String) -> HashMap<String, T> {
    list.into_iter().map(|v| (key(&v), v)).collect()
}

impl std::fmt::Debug for Avatar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Avatar")
            .field("key", &self.key)
            .field("data", &self.data)
            .field("items", &self.items.len())
            .field("effects", &self.effects.len())
            .field("skills", &self.skills.len())
            .finish_non_exhaustive()
    }
}
