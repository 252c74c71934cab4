pub mod archive;
pub mod audio;
pub mod font;
pub mod markup;
pub mod picture;

use crate::error::Result;

/// Something that can be decoded from the raw bytes of an archive entry.
///
/// `name` is the entry name; decoders dispatch on its extension.
pub trait Asset: Sized {
    fn load_from_bytes(name: &str, data: Vec<u8>) -> Result<Self>;
}
