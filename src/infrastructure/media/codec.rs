// src/infrastructure/media/codec.rs
use std::io::Cursor;

use image::{
    DynamicImage, ImageFormat, ImageReader,
    codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder},
    imageops::FilterType,
};
use jpeg_encoder::{ColorType, Encoder as JpegEncoder};

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::media::{EncodeOptions, ImageCodec, ImageInfo, SourceFormat},
};

/// [`ImageCodec`] backed by the `image` crate, with JPEG output handled by
/// `jpeg-encoder` for progressive scans.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageRsCodec;

fn source_format(format: ImageFormat) -> ApplicationResult<SourceFormat> {
    match format {
        ImageFormat::Jpeg => Ok(SourceFormat::Jpeg),
        ImageFormat::Png => Ok(SourceFormat::Png),
        ImageFormat::Gif => Ok(SourceFormat::Gif),
        ImageFormat::WebP => Ok(SourceFormat::WebP),
        ImageFormat::Ico => Ok(SourceFormat::Ico),
        other => Err(ApplicationError::validation(format!(
            "unsupported image format {other:?}"
        ))),
    }
}

fn image_format(format: SourceFormat) -> ImageFormat {
    match format {
        SourceFormat::Jpeg => ImageFormat::Jpeg,
        SourceFormat::Png => ImageFormat::Png,
        SourceFormat::Gif => ImageFormat::Gif,
        SourceFormat::WebP => ImageFormat::WebP,
        SourceFormat::Ico => ImageFormat::Ico,
    }
}

fn reader(bytes: &[u8]) -> ApplicationResult<ImageReader<Cursor<&[u8]>>> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| ApplicationError::validation(format!("unreadable image: {err}")))
}

fn encode_error(err: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::infrastructure(format!("image encoding failed: {err}"))
}

fn encode_jpeg(image: &DynamicImage, options: &EncodeOptions) -> ApplicationResult<Vec<u8>> {
    let rgb = image.to_rgb8();
    let width = u16::try_from(rgb.width())
        .map_err(|_| ApplicationError::validation("image too wide for JPEG"))?;
    let height = u16::try_from(rgb.height())
        .map_err(|_| ApplicationError::validation("image too tall for JPEG"))?;

    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new(&mut out, options.quality);
    encoder.set_progressive(options.progressive);
    encoder
        .encode(rgb.as_raw(), width, height, ColorType::Rgb)
        .map_err(encode_error)?;
    Ok(out)
}

fn encode_png(image: &DynamicImage, options: &EncodeOptions) -> ApplicationResult<Vec<u8>> {
    let compression = if options.optimize {
        CompressionType::Best
    } else {
        CompressionType::Default
    };
    let mut out = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut out, compression, PngFilter::Adaptive);
    image.write_with_encoder(encoder).map_err(encode_error)?;
    Ok(out)
}

impl ImageCodec for ImageRsCodec {
    fn inspect(&self, bytes: &[u8]) -> ApplicationResult<ImageInfo> {
        let reader = reader(bytes)?;
        let format = reader
            .format()
            .ok_or_else(|| ApplicationError::validation("unrecognised image format"))
            .and_then(source_format)?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|err| ApplicationError::validation(format!("unreadable image: {err}")))?;
        Ok(ImageInfo {
            width,
            height,
            format,
        })
    }

    fn resize(
        &self,
        bytes: &[u8],
        width: u32,
        height: u32,
        options: &EncodeOptions,
    ) -> ApplicationResult<Vec<u8>> {
        let reader = reader(bytes)?;
        let format = reader
            .format()
            .ok_or_else(|| ApplicationError::validation("unrecognised image format"))
            .and_then(source_format)?;
        let decoded = reader
            .decode()
            .map_err(|err| ApplicationError::validation(format!("undecodable image: {err}")))?;
        let resized = decoded.resize_exact(width, height, FilterType::Lanczos3);

        match format {
            SourceFormat::Jpeg => encode_jpeg(&resized, options),
            SourceFormat::Png => encode_png(&resized, options),
            other => {
                let mut out = Cursor::new(Vec::new());
                resized
                    .write_to(&mut out, image_format(other))
                    .map_err(encode_error)?;
                Ok(out.into_inner())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn encoded(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 90])
        }))
    }

    #[test]
    fn inspect_reports_dimensions_and_format() {
        let info = ImageRsCodec
            .inspect(&encoded(gradient(120, 80), ImageFormat::Png))
            .unwrap();
        assert_eq!(
            info,
            ImageInfo {
                width: 120,
                height: 80,
                format: SourceFormat::Png
            }
        );
    }

    #[test]
    fn inspect_rejects_non_images() {
        let err = ImageRsCodec.inspect(b"plain text").unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }

    #[test]
    fn jpeg_output_is_progressive() {
        let source = encoded(gradient(400, 300), ImageFormat::Jpeg);
        let resized = ImageRsCodec
            .resize(&source, 200, 150, &EncodeOptions::default())
            .unwrap();

        let info = ImageRsCodec.inspect(&resized).unwrap();
        assert_eq!((info.width, info.height, info.format), (200, 150, SourceFormat::Jpeg));
        // SOF2 marks a progressive frame.
        assert!(resized.windows(2).any(|pair| pair == [0xFF, 0xC2]));
    }

    #[test]
    fn png_keeps_alpha_channel() {
        let source = encoded(
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([10, 20, 30, 40]))),
            ImageFormat::Png,
        );
        let resized = ImageRsCodec
            .resize(&source, 32, 32, &EncodeOptions::default())
            .unwrap();

        let decoded = image::load_from_memory(&resized).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
        assert!(decoded.color().has_alpha());
    }

    #[test]
    fn gif_is_written_back_as_gif() {
        let frame = RgbaImage::from_fn(100, 50, |x, _| Rgba([(x * 2) as u8, 0, 0, 255]));
        let source = encoded(DynamicImage::ImageRgba8(frame), ImageFormat::Gif);
        let resized = ImageRsCodec
            .resize(&source, 50, 25, &EncodeOptions::default())
            .unwrap();
        let info = ImageRsCodec.inspect(&resized).unwrap();
        assert_eq!((info.width, info.height, info.format), (50, 25, SourceFormat::Gif));
    }
}
