use roxmltree::Node;

use super::{child, child_text, decode_records, raw_child_text, required_text, RecordResult, XmlWriter};
use crate::error::Result;
use crate::graphic::{AvatarData, AvatarSprite};

pub const ROOT: &str = "avatars";

pub fn decode(text: &str) -> Result<Vec<AvatarData>> {
    decode_records(text, ROOT, "avatar", decode_avatar)
}

pub(crate) fn decode_avatar(node: Node) -> RecordResult<AvatarData> {
    let sprite = child(node, "sprite")
        .map(|sprite| AvatarSprite {
            head: child_text(sprite, "head"),
            torso: child_text(sprite, "torso"),
            full_body: child_text(sprite, "fullbody"),
        })
        .unwrap_or_default();

    Ok(AvatarData {
        id: required_text(node, "id")?,
        serial: child_text(node, "serial"),
        portrait_name: child_text(node, "portrait"),
        sprite,
        ..Default::default()
    })
}

/// An avatar recorded in a save document. Fields are kept as written and the id may be
/// empty, so a saved avatar reads back unchanged.
pub(crate) fn decode_saved_avatar(node: Node) -> AvatarData {
    let sprite = child(node, "sprite")
        .map(|sprite| AvatarSprite {
            head: raw_child_text(sprite, "head"),
            torso: raw_child_text(sprite, "torso"),
            full_body: raw_child_text(sprite, "fullbody"),
        })
        .unwrap_or_default();

    AvatarData {
        id: raw_child_text(node, "id"),
        serial: raw_child_text(node, "serial"),
        portrait_name: raw_child_text(node, "portrait"),
        sprite,
        ..Default::default()
    }
}

pub fn encode(list: &[AvatarData]) -> Result<String> {
    let mut writer = XmlWriter::new(ROOT)?;
    writer.start(ROOT)?;
    for avatar in list {
        encode_avatar(&mut writer, avatar)?;
    }
    writer.end(ROOT)?;
    writer.finish()
}

pub(crate) fn encode_avatar(writer: &mut XmlWriter, avatar: &AvatarData) -> Result<()> {
    writer.start("avatar")?;
    writer.leaf("id", &avatar.id)?;
    writer.leaf("serial", &avatar.serial)?;
    writer.leaf("portrait", &avatar.portrait_name)?;
    writer.start("sprite")?;
    writer.leaf("head", &avatar.sprite.head)?;
    writer.leaf("torso", &avatar.sprite.torso)?;
    writer.leaf("fullbody", &avatar.sprite.full_body)?;
    writer.end("sprite")?;
    writer.end("avatar")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_avatars_document() {
        let text = r#"
            <avatars>
              <avatar>
                <id>pc</id>
                <serial>0</serial>
                <portrait>p.png</portrait>
                <sprite><head>h.png</head><torso>t.png</torso></sprite>
                <mood>ignored</mood>
              </avatar>
              <avatar>
                <serial>1</serial>
              </avatar>
              <avatar>
                <id>ghost</id>
                <sprite><fullbody>g.png</fullbody></sprite>
              </avatar>
            </avatars>"#;

        let avatars = decode(text).unwrap();
        assert_eq!(avatars.len(), 2);
        assert_eq!(avatars[0].id, "pc");
        assert_eq!(avatars[0].serial, "0");
        assert_eq!(avatars[0].portrait_name, "p.png");
        assert_eq!(avatars[0].sprite.head, "h.png");
        assert_eq!(avatars[0].sprite.torso, "t.png");
        assert_eq!(avatars[0].sprite.full_body, "");
        assert_eq!(avatars[1].id, "ghost");
        assert_eq!(avatars[1].sprite.full_body, "g.png");
    }

    #[test]
    fn encoded_avatars_decode_back() {
        let mut avatar = AvatarData::new("pc", "0");
        avatar.portrait_name = "p.png".into();
        avatar.sprite.full_body = "f.png".into();
        let list = vec![avatar, AvatarData::new("npc", "3")];

        assert_eq!(decode(&encode(&list).unwrap()).unwrap(), list);
    }
}
