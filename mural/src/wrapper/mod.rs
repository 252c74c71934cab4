//! Presentation wrappers around simulation entities.
//!
//! A wrapper pairs a simulation object with the descriptor registered for its id and keeps
//! itself in sync with it on every frame.

mod avatar;
pub mod defaults;
mod effect;
mod item;
mod object;
mod skill;
pub mod sprite;

pub use avatar::{Avatar, ChatPopup, CHAT_DURATION};
pub use effect::EffectWrapper;
pub use item::ItemWrapper;
pub use object::ObjectWrapper;
pub use skill::SkillWrapper;
pub use sprite::{Animation, AvatarSprite, Direction, SpriteLayer};
