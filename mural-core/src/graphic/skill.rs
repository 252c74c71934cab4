use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::assets::{AssetCategory, AssetRegistry};
use crate::format::audio::AudioBuffer;
use crate::format::picture::Picture;

/// Avatar animation played when a skill is activated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActivationAnim {
    Idle,
    Move,
    SpellCast,
    CraftCast,
    Melee,
    Shoot,
    Kneel,
    Lie,
    #[default]
    None,
}

impl ActivationAnim {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivationAnim::Idle => "idle",
            ActivationAnim::Move => "move",
            ActivationAnim::SpellCast => "spellCast",
            ActivationAnim::CraftCast => "craftCast",
            ActivationAnim::Melee => "melee",
            ActivationAnim::Shoot => "shoot",
            ActivationAnim::Kneel => "kneel",
            ActivationAnim::Lie => "lie",
            ActivationAnim::None => "none",
        }
    }
}

impl fmt::Display for ActivationAnim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivationAnim {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let anim = match s {
            "idle" => ActivationAnim::Idle,
            "move" => ActivationAnim::Move,
            "spellCast" => ActivationAnim::SpellCast,
            "craftCast" => ActivationAnim::CraftCast,
            "melee" => ActivationAnim::Melee,
            "shoot" => ActivationAnim::Shoot,
            "kneel" => ActivationAnim::Kneel,
            "lie" => ActivationAnim::Lie,
            "none" | "" => ActivationAnim::None,
            _ => return Err(format!("unknown animation: {}", s)),
        };
        Ok(anim)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SkillGraphicData {
    pub skill_id: String,
    pub icon_name: String,
    pub activation_audio_name: Option<String>,
    pub activation_anim: ActivationAnim,

    pub icon: Option<Arc<Picture>>,
    pub activation_audio: Option<Arc<AudioBuffer>>,
}

impl PartialEq for SkillGraphicData {
    fn eq(&self, other: &Self) -> bool {
        self.skill_id == other.skill_id
            && self.icon_name == other.icon_name
            && self.activation_audio_name == other.activation_audio_name
            && self.activation_anim == other.activation_anim
    }
}

impl SkillGraphicData {
    pub fn new(skill_id: &str, icon_name: &str) -> Self {
        Self {
            skill_id: skill_id.to_string(),
            icon_name: icon_name.to_string(),
            ..Default::default()
        }
    }

    pub fn resolve(&mut self, assets: &AssetRegistry) {
        self.icon = assets.resolve(AssetCategory::Icon, &self.icon_name);
        self.activation_audio = self
            .activation_audio_name
            .as_deref()
            .and_then(|name| assets.resolve_audio(AssetCategory::Effect, name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_activation_anim() {
        for anim in [
            ActivationAnim::Idle,
            ActivationAnim::Move,
            ActivationAnim::SpellCast,
            ActivationAnim::CraftCast,
            ActivationAnim::Melee,
            ActivationAnim::Shoot,
            ActivationAnim::Kneel,
            ActivationAnim::Lie,
            ActivationAnim::None,
        ] {
            assert_eq!(anim.as_str().parse::<ActivationAnim>(), Ok(anim));
        }
        assert_eq!("".parse::<ActivationAnim>(), Ok(ActivationAnim::None));
        assert!("dance".parse::<ActivationAnim>().is_err());
    }
}
