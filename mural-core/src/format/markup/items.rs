use roxmltree::Node;

use super::{attribute, child, children, child_text, decode_records, required_text, RecordResult, XmlWriter};
use crate::error::Result;
use crate::graphic::{ItemGraphicData, ItemSpritesheet, WILDCARD};

pub const ROOT: &str = "item-graphics";

pub fn decode(text: &str) -> Result<Vec<ItemGraphicData>> {
    decode_records(text, ROOT, "item-graphic", decode_item)
}

fn decode_item(node: Node) -> RecordResult<ItemGraphicData> {
    let max_stack = match child_text(node, "stack").as_str() {
        "" => 1,
        stack => stack
            .parse::<u32>()
            .ok()
            .filter(|s| *s >= 1)
            .ok_or_else(|| format!("invalid stack {:?}", stack))?,
    };

    let mut spritesheets = Vec::new();
    if let Some(list) = child(node, "spritesheets") {
        for sheet in children(list, "spritesheet") {
            let texture = attribute(sheet, "texture");
            if texture.is_empty() {
                return Err("spritesheet without texture".to_string());
            }
            let wildcard_if_empty = |value: String| if value.is_empty() { WILDCARD.to_string() } else { value };
            spritesheets.push(ItemSpritesheet::new(
                &texture,
                &wildcard_if_empty(attribute(sheet, "race")),
                &wildcard_if_empty(attribute(sheet, "gender")),
            ));
        }
    }

    Ok(ItemGraphicData {
        item_id: required_text(node, "id")?,
        icon_name: child_text(node, "icon"),
        max_stack,
        spritesheets,
        icon: None,
    })
}

pub fn encode(list: &[ItemGraphicData]) -> Result<String> {
    let mut writer = XmlWriter::new(ROOT)?;
    writer.start(ROOT)?;
    for item in list {
        writer.start("item-graphic")?;
        writer.leaf("id", &item.item_id)?;
        writer.leaf("icon", &item.icon_name)?;
        writer.leaf("stack", &item.max_stack.to_string())?;
        writer.start("spritesheets")?;
        for sheet in &item.spritesheets {
            writer.empty(
                "spritesheet",
                &[
                    ("texture", sheet.texture_name.as_str()),
                    ("race", sheet.race.as_str()),
                    ("gender", sheet.gender.as_str()),
                ],
            )?;
        }
        writer.end("spritesheets")?;
        writer.end("item-graphic")?;
    }
    writer.end(ROOT)?;
    writer.finish()
}
