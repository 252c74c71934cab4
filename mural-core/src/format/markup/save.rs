use std::collections::BTreeMap;

use roxmltree::Node;

use super::avatars::{decode_saved_avatar, encode_avatar};
use super::{child, child_text, children, parse_attribute, parse_document, RecordResult, XmlWriter};
use crate::error::{MuralError, Result};
use crate::save::{GuiSave, PlayerSave};
use crate::types::Position;

pub const ROOT: &str = "save";

pub fn decode(text: &str) -> Result<GuiSave> {
    let doc = parse_document(text, ROOT)?;
    let root = doc.root_element();

    let mut players = Vec::new();
    if let Some(list) = child(root, "players") {
        for (index, node) in children(list, "player").enumerate() {
            match decode_player(node) {
                Ok(player) => players.push(player),
                Err(reason) => log::error!("skipping player #{} of save document: {}", index, reason),
            }
        }
    }

    let camera = match child(root, "camera") {
        Some(camera) => Position::new(
            parse_attribute(camera, "x").map_err(|e| MuralError::parse(ROOT, e))?,
            parse_attribute(camera, "y").map_err(|e| MuralError::parse(ROOT, e))?,
        ),
        None => Position::default(),
    };

    Ok(GuiSave {
        name: child_text(root, "name"),
        players,
        camera,
    })
}

fn decode_player(node: Node) -> RecordResult<PlayerSave> {
    let avatar = child(node, "avatar").ok_or_else(|| "player without avatar".to_string())?;
    Ok(PlayerSave {
        avatar: decode_saved_avatar(avatar),
        inv_slots: decode_slots(node, "inventory"),
        bar_slots: decode_slots(node, "bar"),
    })
}

fn decode_slots(node: Node, name: &str) -> BTreeMap<String, u32> {
    let mut slots = BTreeMap::new();
    let Some(list) = child(node, name) else {
        return slots;
    };

    for slot in children(list, "slot") {
        let decoded = parse_attribute::<u32>(slot, "id").and_then(|id| match slot.attribute("content") {
            Some(content) => Ok((content.to_string(), id)),
            None => Err("slot without content attribute".to_string()),
        });
        match decoded {
            Ok((content, id)) => {
                slots.insert(content, id);
            }
            Err(reason) => log::error!("skipping {} slot of save document: {}", name, reason),
        }
    }
    slots
}

pub fn encode(save: &GuiSave) -> Result<String> {
    let mut writer = XmlWriter::new(ROOT)?;
    writer.start(ROOT)?;
    writer.leaf("name", &save.name)?;
    writer.start("players")?;
    for player in &save.players {
        writer.start("player")?;
        encode_avatar(&mut writer, &player.avatar)?;
        encode_slots(&mut writer, "inventory", &player.inv_slots)?;
        encode_slots(&mut writer, "bar", &player.bar_slots)?;
        writer.end("player")?;
    }
    writer.end("players")?;
    writer.empty(
        "camera",
        &[
            ("x", save.camera.x.to_string().as_str()),
            ("y", save.camera.y.to_string().as_str()),
        ],
    )?;
    writer.end(ROOT)?;
    writer.finish()
}

fn encode_slots(writer: &mut XmlWriter, name: &str, slots: &BTreeMap<String, u32>) -> Result<()> {
    writer.start(name)?;
    for (content, id) in slots {
        writer.empty("slot", &[("id", id.to_string().as_str()), ("content", content.as_str())])?;
    }
    writer.end(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_save_document() {
        let text = r#"
            <save>
              <name>test.savegui</name>
              <players>
                <player>
                  <avatar><id>pc</id><serial>0</serial></avatar>
                  <inventory>
                    <slot id="0" content="sword#1"/>
                    <slot id="-1" content="shield#2"/>
                    <slot id="4"/>
                  </inventory>
                  <bar><slot id="3" content="fire#2"/></bar>
                </player>
                <player><inventory/></player>
              </players>
              <camera x="100.5" y="-50"/>
            </save>"#;

        let save = decode(text).unwrap();
        assert_eq!(save.name, "test.savegui");
        assert_eq!(save.players.len(), 1);
        let player = &save.players[0];
        assert_eq!(player.avatar.key(), "pc#0");
        assert_eq!(player.inv_slots, BTreeMap::from([("sword#1".to_string(), 0)]));
        assert_eq!(player.bar_slots, BTreeMap::from([("fire#2".to_string(), 3)]));
        assert_eq!(save.camera, Position::new(100.5, -50.0));
    }

    #[test]
    fn slot_contents_and_avatar_ids_are_kept_as_written() {
        let text = r#"
            <save>
              <players>
                <player>
                  <avatar><id></id><serial> 3 </serial></avatar>
                  <inventory>
                    <slot id="0" content=" sword#1 "/>
                    <slot id="2" content=""/>
                  </inventory>
                </player>
              </players>
            </save>"#;

        let save = decode(text).unwrap();
        assert_eq!(save.players.len(), 1);
        assert_eq!(save.players[0].avatar.id, "");
        assert_eq!(save.players[0].avatar.serial, " 3 ");
        assert_eq!(
            save.players[0].inv_slots,
            BTreeMap::from([(" sword#1 ".to_string(), 0), (String::new(), 2)])
        );
    }

    #[test]
    fn bad_camera_fails_whole_document() {
        let text = r#"<save><camera x="left" y="0"/></save>"#;
        assert!(matches!(decode(text), Err(MuralError::Parse { .. })));
    }
}
