use roxmltree::Node;

use super::{child, child_text, decode_records, required_text, RecordResult, XmlWriter};
use crate::error::Result;
use crate::graphic::ObjectGraphicData;

pub const ROOT: &str = "object-graphics";

pub fn decode(text: &str) -> Result<Vec<ObjectGraphicData>> {
    decode_records(text, ROOT, "object-graphic", decode_object)
}

fn decode_object(node: Node) -> RecordResult<ObjectGraphicData> {
    let picture_of = |name: &str| {
        child(node, name)
            .map(|n| child_text(n, "picture"))
            .unwrap_or_default()
    };
    Ok(ObjectGraphicData::new(
        &required_text(node, "id")?,
        &picture_of("portrait"),
        &picture_of("sprite"),
    ))
}

pub fn encode(list: &[ObjectGraphicData]) -> Result<String> {
    let mut writer = XmlWriter::new(ROOT)?;
    writer.start(ROOT)?;
    for object in list {
        writer.start("object-graphic")?;
        writer.leaf("id", &object.id)?;
        writer.start("portrait")?;
        writer.leaf("picture", &object.portrait_name)?;
        writer.end("portrait")?;
        writer.start("sprite")?;
        writer.leaf("picture", &object.sprite_name)?;
        writer.end("sprite")?;
        writer.end("object-graphic")?;
    }
    writer.end(ROOT)?;
    writer.finish()
}
