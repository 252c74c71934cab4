use std::sync::Arc;

use mural_core::format::audio::AudioBuffer;
use mural_core::format::picture::Picture;
use mural_core::graphic::{ActivationAnim, GraphicRegistry, SkillGraphicData};

use super::defaults::default_skill_icon;
use super::sprite::Animation;
use crate::simulation::Skill;

pub struct SkillWrapper {
    skill: Arc<dyn Skill>,
    data: SkillGraphicData,
    icon: Arc<Picture>,
    activation_audio: Option<Arc<AudioBuffer>>,
    activation_anim: ActivationAnim,
}

impl SkillWrapper {
    pub fn new(skill: Arc<dyn Skill>, graphics: &GraphicRegistry) -> Self {
        let data = graphics.skill(skill.id()).cloned().unwrap_or_else(|| {
            log::warn!("skill graphic {:?} not found, using the default icon", skill.id());
            SkillGraphicData::new(skill.id(), "")
        });
        Self {
            skill,
            icon: data.icon.clone().unwrap_or_else(default_skill_icon),
            activation_audio: data.activation_audio.clone(),
            activation_anim: data.activation_anim,
            data,
        }
    }

    pub fn key(&self) -> String {
        self.skill.key()
    }

    pub fn skill(&self) -> &Arc<dyn Skill> {
        &self.skill
    }

    pub fn data(&self) -> &SkillGraphicData {
        &self.data
    }

    pub fn icon(&self) -> &Arc<Picture> {
        &self.icon
    }

    pub fn activation_audio(&self) -> Option<&Arc<AudioBuffer>> {
        self.activation_audio.as_ref()
    }

    pub fn activation_anim(&self) -> ActivationAnim {
        self.activation_anim
    }

    /// The avatar animation of the activation, if any.
    pub fn activation_animation(&self) -> Option<Animation> {
        let animation = match self.activation_anim {
            ActivationAnim::Idle => Animation::Idle,
            ActivationAnim::Move => Animation::Move,
            ActivationAnim::SpellCast => Animation::SpellCast,
            ActivationAnim::CraftCast => Animation::CraftCast,
            ActivationAnim::Melee => Animation::Melee,
            ActivationAnim::Shoot => Animation::Shoot,
            ActivationAnim::Kneel => Animation::Kneel,
            ActivationAnim::Lie => Animation::Lie,
            ActivationAnim::None => return None,
        };
        Some(animation)
    }
}
