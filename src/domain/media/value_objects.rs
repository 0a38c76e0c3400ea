// src/domain/media/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::{cmp::Ordering, fmt, path::Component, path::Path, str::FromStr};

/// Name of a stored file, relative to the media root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub const MAX_CHARS: usize = 255;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("image reference cannot be empty"));
        }
        if value.chars().count() > Self::MAX_CHARS {
            return Err(DomainError::validation(format!(
                "image reference must be at most {} characters",
                Self::MAX_CHARS
            )));
        }
        if value.contains('\\')
            || value
                .split('/')
                .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(DomainError::validation(format!(
                "image reference '{value}' is not a relative media path"
            )));
        }
        let relative = Path::new(&value)
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !relative {
            return Err(DomainError::validation(format!(
                "image reference '{value}' is not a relative media path"
            )));
        }
        Ok(Self(value))
    }

    /// Blank strings mean "no image", mirroring how forms clear the field.
    pub fn optional(value: Option<String>) -> DomainResult<Option<Self>> {
        value
            .filter(|raw| !raw.trim().is_empty())
            .map(Self::new)
            .transpose()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.0).extension().and_then(|ext| ext.to_str())
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        value.0
    }
}

/// Maximum width, in pixels, enforced for one kind of stored image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetWidth(u32);

impl TargetWidth {
    pub fn new(width: u32) -> DomainResult<Self> {
        if width == 0 {
            return Err(DomainError::validation("target width must be positive"));
        }
        Ok(Self(width))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Height that keeps the aspect ratio of a `width`x`height` image once it
    /// is scaled to this width. Ties round to the even neighbour; the result
    /// is never below one pixel.
    pub fn scaled_height(self, width: u32, height: u32) -> u32 {
        let numerator = u64::from(self.0) * u64::from(height);
        let width = u64::from(width);
        let (quotient, remainder) = (numerator / width, numerator % width);
        let scaled = match (remainder * 2).cmp(&width) {
            Ordering::Greater => quotient + 1,
            Ordering::Equal => quotient + quotient % 2,
            Ordering::Less => quotient,
        };
        u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
    }
}

/// What an uploaded file is going to be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaPurpose {
    Cover,
    Favicon,
    Attachment,
}

impl MediaPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Favicon => "favicon",
            Self::Attachment => "attachment",
        }
    }

    /// Directory prefix under the media root, before the `YYYY/MM` part.
    pub fn directory(&self) -> &'static str {
        match self {
            Self::Cover => "posts",
            Self::Favicon => "assets/favicon",
            Self::Attachment => "attachments",
        }
    }

    pub fn requires_image(&self) -> bool {
        matches!(self, Self::Cover | Self::Favicon)
    }
}

impl FromStr for MediaPurpose {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cover" => Ok(Self::Cover),
            "favicon" => Ok(Self::Favicon),
            "attachment" => Ok(Self::Attachment),
            other => Err(DomainError::validation(format!(
                "unknown media purpose '{other}'"
            ))),
        }
    }
}
