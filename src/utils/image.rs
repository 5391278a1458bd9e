use std::{fs::File, io::BufWriter, path::Path};

use image::{
    DynamicImage, ImageFormat, ImageReader, RgbaImage,
    codecs::png::{CompressionType, FilterType, PngEncoder},
};
use tracing::debug;

use crate::{
    error::{FilterError, Result},
    texture::{Texture, TextureRef},
    utils::pixel::Rgba,
};

/// Decode any format supported by `image`, guessing it from the content.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "decoded image"
    );
    Ok(image)
}

/// Decode `path` into an 8-bit RGBA texture.
pub fn read_image<P: AsRef<Path>>(path: P) -> Result<Texture<Rgba>> {
    Ok(decode_image(path)?.into_rgba8().into())
}

pub fn write_image<P: AsRef<Path>>(
    image: &DynamicImage,
    path: P,
    image_format: ImageFormat,
) -> Result {
    let file = &mut BufWriter::new(File::create(path)?);
    image
        .write_to(file, image_format)
        .map_err(FilterError::ImageEncode)
}

/// Encode the texture as a PNG file.
pub fn write_png<P: AsRef<Path>>(texture: &Texture<Rgba>, path: P) -> Result {
    write_png_with(texture, path, CompressionType::Default, FilterType::Adaptive)
}

pub fn write_png_with<P: AsRef<Path>>(
    texture: &Texture<Rgba>,
    path: P,
    compression: CompressionType,
    filtering: FilterType,
) -> Result {
    let image_buf: RgbaImage = texture.into();
    let file = &mut BufWriter::new(File::create(path)?);
    let encoder = PngEncoder::new_with_quality(file, compression, filtering);
    image_buf
        .write_with_encoder(encoder)
        .map_err(FilterError::ImageEncode)?;
    debug!(width = texture.width(), height = texture.height(), "wrote png");
    Ok(())
}

impl From<&DynamicImage> for Texture<Rgba> {
    fn from(value: &DynamicImage) -> Self {
        value.to_rgba8().into()
    }
}

impl From<Texture<Rgba>> for DynamicImage {
    fn from(value: Texture<Rgba>) -> Self {
        DynamicImage::ImageRgba8((&value).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("imagefilter-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_png_roundtrip_keeps_pixels() {
        let mut texture = Texture::filled(3, 2, Rgba::new(10, 20, 30, 40));
        texture.set(2, 1, Rgba::new(255, 0, 128, 255));
        let path = temp_path("roundtrip.png");

        write_png(&texture, &path).unwrap();
        let back = read_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(back, texture);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_image(temp_path("does-not-exist.png")).unwrap_err();
        assert!(matches!(err, FilterError::Io(_)), "{:?}", err);
    }

    #[test]
    fn test_dynamic_image_conversions() {
        let texture = Texture::filled(2, 2, Rgba::new(1, 2, 3, 4));
        let image: DynamicImage = texture.clone().into();
        assert_eq!(image.width(), 2);
        let back: Texture<Rgba> = (&image).into();
        assert_eq!(back, texture);
    }
}
