//! Content type of the published object.
//!
//! Chosen from the key suffix alone; file contents are never inspected, so a
//! mis-named file is mislabeled rather than rejected.

pub const IMAGE_PNG: &str = "image/png";
pub const IMAGE_GIF: &str = "image/gif";
pub const IMAGE_JPEG: &str = "image/jpeg";

pub fn content_type_for_key(key: &str) -> &'static str {
    let key = key.to_lowercase();
    if key.ends_with(".png") {
        IMAGE_PNG
    } else if key.ends_with(".gif") {
        IMAGE_GIF
    } else {
        IMAGE_JPEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_key() {
        assert_eq!(content_type_for_key("uploads/1-a.png"), "image/png");
        assert_eq!(content_type_for_key("uploads/1-a.PNG"), "image/png");
        assert_eq!(content_type_for_key("uploads/1-a.gif"), "image/gif");
        assert_eq!(content_type_for_key("uploads/1-a.jpg"), "image/jpeg");
        assert_eq!(content_type_for_key("uploads/1-a.webp"), "image/jpeg");
        assert_eq!(content_type_for_key("uploads/1-a"), "image/jpeg");
        assert_eq!(content_type_for_key("uploads/png"), "image/jpeg");
    }
}
