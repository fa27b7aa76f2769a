//! Content helpers shared by the facade and the bundled adapter

use md5::{Digest, Md5};

/// MD5 digest of `content`, hex encoded
pub fn md5_hex(content: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Size of `content` in bytes
pub fn content_size(content: &[u8]) -> u64 {
    content.len() as u64
}

/// Guess a MIME type from the extension of `key`
pub fn mime_type_from_key(key: &str) -> Option<&'static str> {
    let file_name = key.rsplit('/').next().unwrap_or(key);
    let (_, ext) = file_name.rsplit_once('.')?;

    match ext.to_lowercase().as_str() {
        "txt" => Some("text/plain"),
        "json" => Some("application/json"),
        "xml" => Some("application/xml"),
        "html" | "htm" => Some("text/html"),
        "css" => Some("text/css"),
        "js" => Some("application/javascript"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "pdf" => Some("application/pdf"),
        "zip" => Some("application/zip"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_hex() {
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex(b"some content"), "9893532233caff98cd083a116b013c0b");
    }

    #[test]
    fn test_content_size() {
        assert_eq!(content_size(b"12345"), 5);
        assert_eq!(content_size(b""), 0);
    }

    #[test]
    fn test_mime_type_from_key() {
        assert_eq!(mime_type_from_key("docs/readme.TXT"), Some("text/plain"));
        assert_eq!(mime_type_from_key("photo.jpeg"), Some("image/jpeg"));
        assert_eq!(mime_type_from_key("archive.tar.gz"), None);
        assert_eq!(mime_type_from_key("dir.d/noext"), None);
        assert_eq!(mime_type_from_key("Makefile"), None);
    }
}
