pub const PDF_MEDIA_TYPE: &str = "application/pdf";

pub const IMAGE_MEDIA_TYPES: [&str; 6] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/webp",
    "image/bmp",
    "image/tiff",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Pdf,
    Image,
    Unsupported,
}

/// Routes on the declared content type alone. Matching is exact; the payload
/// is never inspected.
pub fn classify(declared_media_type: &str) -> MediaKind {
    if declared_media_type == PDF_MEDIA_TYPE {
        MediaKind::Pdf
    } else if IMAGE_MEDIA_TYPES.contains(&declared_media_type) {
        MediaKind::Image
    } else {
        MediaKind::Unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_type_is_pdf() {
        assert_eq!(classify("application/pdf"), MediaKind::Pdf);
    }

    #[test]
    fn every_image_type_is_image() {
        for media_type in IMAGE_MEDIA_TYPES {
            assert_eq!(classify(media_type), MediaKind::Image, "{media_type}");
        }
    }

    #[test]
    fn everything_else_is_unsupported() {
        for media_type in [
            "",
            "text/plain",
            "image/gif",
            "image/svg+xml",
            "application/octet-stream",
            "APPLICATION/PDF",
            "application/pdf; charset=binary",
            " image/png",
        ] {
            assert_eq!(classify(media_type), MediaKind::Unsupported, "{media_type:?}");
        }
    }
}
