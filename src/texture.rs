use image::RgbaImage;

use crate::{
    error::{FilterError, Result},
    utils::pixel::Rgba,
};

/// (width, height) of a texture, in pixels.
pub type Shape = (usize, usize);

/// Trait defining ops available on Textures with
/// lendable inner buffer
pub trait TextureRef: AsRef<[Self::Inner]> {
    type Inner;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    #[inline]
    fn shape(&self) -> Shape {
        (self.width() as usize, self.height() as usize)
    }

    /// Pixel at (x, y), `None` when out of bounds.
    #[inline]
    fn get(&self, x: u32, y: u32) -> Option<&Self::Inner> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.as_ref()
            .get(y as usize * self.width() as usize + x as usize)
    }

    /// Number of pixels
    #[inline]
    fn len(&self) -> usize {
        self.as_ref().len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }
}

/// Trait defining ops available on mutable
/// Textures
pub trait TextureMut: TextureRef + AsMut<[Self::Inner]> {}

/// Texture with owned buffer, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture<T> {
    width: u32,
    height: u32,
    buffer: Vec<T>,
}

impl<T> AsRef<[T]> for Texture<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> AsMut<[T]> for Texture<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }
}

impl<T> TextureRef for Texture<T> {
    type Inner = T;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }
}

impl<T> TextureMut for Texture<T> {}

impl<T> Texture<T> {
    /// Wrap an owned row-major buffer.
    pub fn from_vec(width: u32, height: u32, buffer: Vec<T>) -> Result<Self> {
        if buffer.len() != width as usize * height as usize {
            return Err(FilterError::Dimensions {
                width,
                height,
                len: buffer.len(),
            });
        }
        Ok(Self {
            width,
            height,
            buffer,
        })
    }

    pub fn as_texture_slice<'s>(&'s self) -> TextureSlice<'s, T> {
        TextureSlice {
            width: self.width,
            height: self.height,
            buffer: &self.buffer,
        }
    }

    pub fn as_texture_mut_slice<'s>(&'s mut self) -> TextureMutSlice<'s, T> {
        TextureMutSlice {
            width: self.width,
            height: self.height,
            buffer: &mut self.buffer,
        }
    }
}

impl<T: Clone> Texture<T> {
    /// Texture where every pixel is `value`.
    pub fn filled(width: u32, height: u32, value: T) -> Self {
        Self {
            width,
            height,
            buffer: vec![value; width as usize * height as usize],
        }
    }
}

impl<T: Default + Clone> Texture<T> {
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, T::default())
    }

    /// Texture with default pixels and the given shape.
    pub fn with_shape(shape: Shape) -> Self {
        let (width, height) = shape;
        Self::new(width as u32, height as u32)
    }
}

impl<T: Copy> Texture<T> {
    /// Overwrite the pixel at (x, y).
    ///
    /// # Panics
    /// When (x, y) is out of bounds.
    pub fn set(&mut self, x: u32, y: u32, value: T) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = y as usize * self.width as usize + x as usize;
        self.buffer[idx] = value;
    }
}

impl From<RgbaImage> for Texture<Rgba> {
    fn from(value: RgbaImage) -> Self {
        let (width, height) = value.dimensions();
        let buffer = value
            .into_raw()
            .chunks_exact(4)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
            .collect();
        Texture {
            width,
            height,
            buffer,
        }
    }
}

impl From<&Texture<Rgba>> for RgbaImage {
    fn from(value: &Texture<Rgba>) -> Self {
        RgbaImage::from_fn(value.width, value.height, |x, y| {
            let pixel = value.buffer[y as usize * value.width as usize + x as usize];
            image::Rgba(pixel.to_u8_array())
        })
    }
}

/// Texture with borrowed internal buffer
#[derive(Debug, Copy, Clone)]
pub struct TextureSlice<'a, T> {
    width: u32,
    height: u32,
    buffer: &'a [T],
}

impl<T> AsRef<[T]> for TextureSlice<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<T> TextureRef for TextureSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl<'a, T> TextureSlice<'a, T> {
    /// Borrowed buffer with the slice lifetime, not tied to `&self`.
    #[inline]
    pub fn buffer(&self) -> &'a [T] {
        self.buffer
    }
}

#[derive(Debug)]
pub struct TextureMutSlice<'a, T> {
    width: u32,
    height: u32,
    buffer: &'a mut [T],
}

impl<'a, T> AsRef<[T]> for TextureMutSlice<'a, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<'a, T> AsMut<[T]> for TextureMutSlice<'a, T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.buffer
    }
}

impl<T> TextureRef for TextureMutSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl<T> TextureMut for TextureMutSlice<'_, T> {}

pub mod prelude {
    pub use super::{Shape, Texture, TextureMut, TextureMutSlice, TextureRef, TextureSlice};
}
