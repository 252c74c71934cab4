use roxmltree::Node;

use super::{child, child_text, decode_records, required_text, RecordResult, XmlWriter};
use crate::error::Result;
use crate::graphic::{ActivationAnim, SkillGraphicData};

pub const ROOT: &str = "skill-graphics";

pub fn decode(text: &str) -> Result<Vec<SkillGraphicData>> {
    decode_records(text, ROOT, "skill-graphic", decode_skill)
}

fn decode_skill(node: Node) -> RecordResult<SkillGraphicData> {
    let activation_anim = match child(node, "animations") {
        Some(animations) => child_text(animations, "activation").parse::<ActivationAnim>()?,
        None => ActivationAnim::None,
    };
    let activation_audio_name = child(node, "audio")
        .map(|audio| child_text(audio, "activation"))
        .filter(|name| !name.is_empty());

    Ok(SkillGraphicData {
        skill_id: required_text(node, "id")?,
        icon_name: child_text(node, "icon"),
        activation_audio_name,
        activation_anim,
        ..Default::default()
    })
}

pub fn encode(list: &[SkillGraphicData]) -> Result<String> {
    let mut writer = XmlWriter::new(ROOT)?;
    writer.start(ROOT)?;
    for skill in list {
        writer.start("skill-graphic")?;
        writer.leaf("id", &skill.skill_id)?;
        writer.leaf("icon", &skill.icon_name)?;
        writer.start("animations")?;
        writer.leaf("activation", skill.activation_anim.as_str())?;
        writer.end("animations")?;
        if let Some(audio) = &skill.activation_audio_name {
            writer.start("audio")?;
            writer.leaf("activation", audio)?;
            writer.end("audio")?;
        }
        writer.end("skill-graphic")?;
    }
    writer.end(ROOT)?;
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_skills_document() {
        let text = r#"
            <skill-graphics>
              <skill-graphic>
                <id>slash</id>
                <icon>slash.png</icon>
                <animations><activation>melee</activation></animations>
                <audio><activation>slash.ogg</activation></audio>
              </skill-graphic>
              <skill-graphic>
                <id>dance</id>
                <animations><activation>tango</activation></animations>
              </skill-graphic>
              <skill-graphic>
                <id>rest</id>
              </skill-graphic>
            </skill-graphics>"#;

        let skills = decode(text).unwrap();
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].activation_anim, ActivationAnim::Melee);
        assert_eq!(skills[0].activation_audio_name.as_deref(), Some("slash.ogg"));
        assert_eq!(skills[1].skill_id, "rest");
        assert_eq!(skills[1].activation_anim, ActivationAnim::None);
        assert_eq!(skills[1].activation_audio_name, None);
    }

    #[test]
    fn encoded_skills_decode_back() {
        let mut fire = SkillGraphicData::new("fire", "fire.png");
        fire.activation_anim = ActivationAnim::SpellCast;
        fire.activation_audio_name = Some("fire.ogg".into());
        let list = vec![fire, SkillGraphicData::new("rest", "")];

        assert_eq!(decode(&encode(&list).unwrap()).unwrap(), list);
    }
}
