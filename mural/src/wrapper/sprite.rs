use std::collections::VecDeque;
use std::sync::Arc;

use mural_core::format::picture::Picture;
use mural_core::graphic::AvatarData;
use mural_core::types::{Position, Rect};

use super::defaults::error_picture;

/// Size of one frame of an avatar spritesheet.
pub const FRAME_WIDTH: f64 = 64.0;
pub const FRAME_HEIGHT: f64 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    #[default]
    Idle,
    Move,
    SpellCast,
    CraftCast,
    Melee,
    Shoot,
    Kneel,
    Lie,
}

/// A spritesheet installed in a sprite slot.
#[derive(Debug, Clone)]
pub struct SpriteLayer {
    pub name: String,
    pub picture: Arc<Picture>,
}

impl SpriteLayer {
    pub fn new(name: &str, picture: Arc<Picture>) -> Self {
        Self {
            name: name.to_string(),
            picture,
        }
    }
}

#[derive(Debug, Clone)]
enum Body {
    Split { head: SpriteLayer, torso: SpriteLayer },
    Full(SpriteLayer),
}

/// The layered sprite of an avatar: a head and torso pair or a full body sheet, plus the
/// armor and weapon installed by equipment.
#[derive(Debug, Clone)]
pub struct AvatarSprite {
    body: Body,
    armor: Option<SpriteLayer>,
    weapon: Option<SpriteLayer>,
    animation: Animation,
    direction: Direction,
    one_shots: VecDeque<Animation>,
    position: Position,
}

impl AvatarSprite {
    /// Builds the sprite of an avatar. `None` if neither the pair nor the full body resolved.
    pub fn from_avatar(data: &AvatarData) -> Option<Self> {
        let body = match (&data.head, &data.torso, &data.full_body) {
            (Some(head), Some(torso), _) => Body::Split {
                head: SpriteLayer::new(&data.sprite.head, head.clone()),
                torso: SpriteLayer::new(&data.sprite.torso, torso.clone()),
            },
            (_, _, Some(full_body)) => Body::Full(SpriteLayer::new(&data.sprite.full_body, full_body.clone())),
            _ => return None,
        };

        Some(Self {
            body,
            armor: None,
            weapon: None,
            animation: Animation::Idle,
            direction: Direction::Down,
            one_shots: VecDeque::new(),
            position: Position::default(),
        })
    }

    pub fn head(&self) -> Option<&SpriteLayer> {
        match &self.body {
            Body::Split { head, .. } => Some(head),
            Body::Full(_) => None,
        }
    }

    /// The torso slot: the equipped armor, else the avatar's own torso.
    pub fn torso(&self) -> Option<&SpriteLayer> {
        match (&self.armor, &self.body) {
            (Some(armor), _) => Some(armor),
            (None, Body::Split { torso, .. }) => Some(torso),
            (None, Body::Full(_)) => None,
        }
    }

    pub fn full_body(&self) -> Option<&SpriteLayer> {
        match &self.body {
            Body::Full(full) => Some(full),
            Body::Split { .. } => None,
        }
    }

    pub fn armor(&self) -> Option<&SpriteLayer> {
        self.armor.as_ref()
    }

    pub fn weapon(&self) -> Option<&SpriteLayer> {
        self.weapon.as_ref()
    }

    pub fn set_armor(&mut self, layer: Option<SpriteLayer>) {
        self.armor = layer;
    }

    pub fn set_weapon(&mut self, layer: Option<SpriteLayer>) {
        self.weapon = layer;
    }

    /// Every picture to draw, bottom to top.
    pub fn layers(&self) -> Vec<&SpriteLayer> {
        let mut layers = Vec::with_capacity(3);
        match &self.body {
            Body::Split { head, .. } => {
                layers.extend(self.torso());
                layers.push(head);
            }
            Body::Full(full) => {
                layers.push(full);
                layers.extend(self.armor.as_ref());
            }
        }
        layers.extend(self.weapon.as_ref());
        layers
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_animation(&mut self, animation: Animation) {
        self.animation = animation;
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Queues an animation played once over the current one.
    pub fn play_once(&mut self, animation: Animation) {
        self.one_shots.push_back(animation);
    }

    pub fn one_shots(&self) -> &VecDeque<Animation> {
        &self.one_shots
    }

    /// Takes the next queued one-shot animation, for the renderer.
    pub fn next_one_shot(&mut self) -> Option<Animation> {
        self.one_shots.pop_front()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn draw_rect(&self) -> Rect {
        Rect::centered(self.position, FRAME_WIDTH, FRAME_HEIGHT)
    }
}

impl Default for AvatarSprite {
    fn default() -> Self {
        Self {
            body: Body::Full(SpriteLayer::new("", error_picture())),
            armor: None,
            weapon: None,
            animation: Animation::Idle,
            direction: Direction::Down,
            one_shots: VecDeque::new(),
            position: Position::default(),
        }
    }
}
