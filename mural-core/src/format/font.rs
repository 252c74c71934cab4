use fontdue::FontSettings;

use crate::error::{MuralError, Result};
use crate::format::archive::is_font;
use crate::format::Asset;

/// A parsed TrueType face.
pub struct Font {
    name: String,
    face: fontdue::Font,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font").field("name", &self.name).finish()
    }
}

impl Font {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn face(&self) -> &fontdue::Font {
        &self.face
    }
}

impl Asset for Font {
    fn load_from_bytes(name: &str, data: Vec<u8>) -> Result<Self> {
        if !is_font(name) {
            return Err(MuralError::UnsupportedFormat(name.to_string()));
        }

        let face = fontdue::Font::from_bytes(data, FontSettings::default())
            .map_err(|e| MuralError::decode(name, e))?;

        Ok(Self {
            name: name.to_string(),
            face,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_non_ttf() {
        let err = Font::load_from_bytes("main.otf2", vec![0; 16]).unwrap_err();
        assert!(matches!(err, MuralError::UnsupportedFormat(_)));
    }

    #[test]
    fn garbage_fails_to_decode() {
        let err = Font::load_from_bytes("main.ttf", vec![0; 16]).unwrap_err();
        assert!(matches!(err, MuralError::Decode { .. }));
    }
}
