use std::path::{Path, PathBuf};

use image::{RgbaImage, imageops};
use lib_math::{Vec2, vec2};
use log::debug;
use thiserror::Error;

pub const MAX_TEXTURES: usize = 128;

/// Backend handle for an uploaded texture. Zero never names a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    pub const INVALID: Self = Self(0);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureEntry {
    pub name: String,
    pub size: Vec2,
    pub handle: TextureHandle,
}

/// Append-only list of textures, searched by name.
#[derive(Debug, Clone)]
pub struct TextureTable {
    entries: Vec<TextureEntry>,
    capacity: usize,
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load texture {}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("a texture named {name:?} is already registered")]
    DuplicateName { name: String },

    #[error("texture table is full ({capacity} entries), cannot add {name:?}")]
    TableFull { name: String, capacity: usize },
}

/// RGBA value whose occurrences are made fully transparent on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskColor(pub [u8; 4]);

impl TextureTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureEntry> {
        self.entries.iter()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn find(&self, name: &str) -> Option<&TextureEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// # Panics
    ///
    /// Panics if no texture is registered under `name`.
    pub fn lookup(&self, name: &str) -> &TextureEntry {
        match self.find(name) {
            Some(entry) => entry,
            None => panic!("texture {name:?} is not registered"),
        }
    }

    /// # Panics
    ///
    /// Panics if `handle` is invalid, the table is full or `name` is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handle: TextureHandle,
        width: u32,
        height: u32,
    ) -> &TextureEntry {
        let name = name.into();

        assert!(handle.is_valid(), "texture {name:?} has an invalid handle");
        assert!(
            !self.is_full(),
            "texture table is full ({} entries), cannot add {name:?}",
            self.capacity
        );
        assert!(
            self.find(&name).is_none(),
            "texture {name:?} is already registered"
        );

        debug!("registered texture {name:?} ({width}x{height}) as {handle:?}");

        self.entries.push(TextureEntry {
            name,
            size: vec2(width as f32, height as f32),
            handle,
        });

        &self.entries[self.entries.len() - 1]
    }
}

impl MaskColor {
    /// Reads `0xRRGGBBAA`.
    pub fn from_rgba_u32(rgba: u32) -> Self {
        Self(rgba.to_be_bytes())
    }
}

impl From<u32> for MaskColor {
    fn from(value: u32) -> Self {
        Self::from_rgba_u32(value)
    }
}

/// Decodes an image file to RGBA8 with the bottom row first.
pub fn decode_texture(path: &Path) -> Result<RgbaImage, TextureError> {
    let mut image = image::open(path)
        .map_err(|source| TextureError::Load {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    imageops::flip_vertical_in_place(&mut image);

    Ok(image)
}

/// Zeroes the alpha of every pixel equal to one of `masks`. Returns how many
/// pixels were masked.
pub fn mask_pixels(image: &mut RgbaImage, masks: &[MaskColor]) -> usize {
    if masks.is_empty() {
        return 0;
    }

    let mut masked = 0;
    for pixel in image.pixels_mut() {
        if masks.iter().any(|mask| mask.0 == pixel.0) {
            pixel.0[3] = 0;
            masked += 1;
        }
    }

    masked
}
