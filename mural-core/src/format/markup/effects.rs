use roxmltree::Node;

use super::{child_text, decode_records, required_text, RecordResult, XmlWriter};
use crate::error::Result;
use crate::graphic::EffectGraphicData;

pub const ROOT: &str = "effect-graphics";

pub fn decode(text: &str) -> Result<Vec<EffectGraphicData>> {
    decode_records(text, ROOT, "effect-graphic", decode_effect)
}

fn decode_effect(node: Node) -> RecordResult<EffectGraphicData> {
    Ok(EffectGraphicData::new(&required_text(node, "id")?, &child_text(node, "icon")))
}

pub fn encode(list: &[EffectGraphicData]) -> Result<String> {
    let mut writer = XmlWriter::new(ROOT)?;
    writer.start(ROOT)?;
    for effect in list {
        writer.start("effect-graphic")?;
        writer.leaf("id", &effect.effect_id)?;
        writer.leaf("icon", &effect.icon_name)?;
        writer.end("effect-graphic")?;
    }
    writer.end(ROOT)?;
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn effects_roundtrip_and_skip_missing_id() {
        let list = vec![EffectGraphicData::new("burn", "burn.png"), EffectGraphicData::new("x", "")];
        assert_eq!(decode(&encode(&list).unwrap()).unwrap(), list);

        let text = "<effect-graphics><effect-graphic><icon>a.png</icon></effect-graphic></effect-graphics>";
        assert!(decode(text).unwrap().is_empty());
    }
}
