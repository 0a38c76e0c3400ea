// tests/support/builders.rs
use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use blog_core::application::dto::AuthenticatedUser;
use blog_core::domain::user::{Role, UserId};

use super::mocks::FixedClock;

/// Encodes a gradient of the given size; gradients survive lossy re-encoding
/// with their dimensions intact.
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, format)
        .unwrap();
    out.into_inner()
}

pub fn base64_image(width: u32, height: u32, format: ImageFormat) -> String {
    STANDARD.encode(encoded_image(width, height, format))
}

pub fn image_size(bytes: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory(bytes).unwrap();
    (img.width(), img.height())
}

/// An authenticated actor carrying the default capabilities of `role`.
pub fn actor(id: i64, username: &str, role: Role) -> AuthenticatedUser {
    let now = FixedClock::instant();
    AuthenticatedUser {
        id: UserId::new(id).unwrap(),
        username: username.to_string(),
        role,
        capabilities: role.default_capabilities(),
        issued_at: now,
        expires_at: now + chrono::Duration::hours(1),
    }
}
