//! Built-in graphics substituted when a descriptor or asset is missing.

use std::sync::Arc;

use mural_core::format::picture::Picture;
use mural_core::graphic::AvatarData;

use crate::simulation::Gender;

lazy_static::lazy_static! {
    static ref ERROR_PICTURE: Arc<Picture> = Arc::new(Picture::error_picture());

    static ref DEFAULT_MALE_AVATAR: AvatarData = default_avatar("default-male");
    static ref DEFAULT_FEMALE_AVATAR: AvatarData = default_avatar("default-female");
}

fn default_avatar(id: &str) -> AvatarData {
    let mut avatar = AvatarData::new(id, "0");
    avatar.portrait_name = format!("{}.png", id);
    avatar.sprite.full_body = format!("{}.png", id);
    avatar.portrait = Some(error_picture());
    avatar.full_body = Some(error_picture());
    avatar
}

pub fn error_picture() -> Arc<Picture> {
    ERROR_PICTURE.clone()
}

pub fn default_item_icon() -> Arc<Picture> {
    error_picture()
}

pub fn default_effect_icon() -> Arc<Picture> {
    error_picture()
}

pub fn default_skill_icon() -> Arc<Picture> {
    error_picture()
}

/// The avatar used for characters without a descriptor of their own.
pub fn default_avatar_data(gender: Gender) -> AvatarData {
    match gender {
        Gender::Male => DEFAULT_MALE_AVATAR.clone(),
        Gender::Female => DEFAULT_FEMALE_AVATAR.clone(),
    }
}
