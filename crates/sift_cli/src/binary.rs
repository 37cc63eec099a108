//! Binary file detection.
//!
//! The engine only inspects text, so anything that looks binary is
//! dropped before it is read into a string.

use std::path::Path;

/// Leading bytes searched for a null byte, as git does.
const BINARY_PROBE_BYTES: usize = 8000;

/// Extensions skipped without opening the file.
const BINARY_EXTENSIONS: &[&str] = &[
    "o", "obj", "a", "so", "dylib", "dll", "exe", "class", "pyc", "rlib", // Compiled code
    "png", "jpg", "jpeg", "gif", "ico", "webp", "bmp", "tiff", // Images
    "mp3", "mp4", "wav", "mov", "ogg", "webm", // Media
    "zip", "tar", "gz", "bz2", "xz", "7z", "zst", // Archives
    "ttf", "otf", "woff", "woff2", // Fonts
    "wasm", "bin", // Other
];

/// Returns `true` if the path carries a known binary extension
/// (case-insensitive).
#[must_use]
pub fn has_binary_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Returns `true` if a null byte occurs within the probed prefix of `bytes`.
#[must_use]
pub fn looks_binary(bytes: &[u8]) -> bool {
    bytes.iter().take(BINARY_PROBE_BYTES).any(|&b| b == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_are_binary_in_any_case() {
        assert!(has_binary_extension(Path::new("logo.png")));
        assert!(has_binary_extension(Path::new("LOGO.PNG")));
        assert!(has_binary_extension(Path::new("bundle.tar")));
        assert!(has_binary_extension(Path::new(".cache.wasm")));
    }

    #[test]
    fn text_and_extensionless_files_are_not_binary() {
        assert!(!has_binary_extension(Path::new("index.html")));
        assert!(!has_binary_extension(Path::new("app.js")));
        assert!(!has_binary_extension(Path::new("Makefile")));
        assert!(!has_binary_extension(Path::new(".env")));
    }

    #[test]
    fn null_byte_marks_content_as_binary() {
        assert!(looks_binary(b"GIF89a\0\0"));
        assert!(!looks_binary(b"<html>plain</html>"));
        assert!(!looks_binary(b""));
    }

    #[test]
    fn null_byte_past_probe_window_is_ignored() {
        let mut bytes = vec![b'a'; BINARY_PROBE_BYTES];
        bytes.push(0);
        assert!(!looks_binary(&bytes));
    }
}
