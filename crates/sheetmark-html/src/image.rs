//! Image source resolution for `data-xls-image`

use std::io::Write;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine};
use lazy_regex::regex_captures;
use log::debug;
use sheetmark_core::ImageSource;

use crate::error::{Error, Result};

/// Resolve an image reference to a file
///
/// `src` is either an existing local file or a `data:image/<ext>;base64,...`
/// URI. Data URIs are decoded into a temporary file under `temp_dir` (the
/// system temp dir when `None`), removed when the workbook is dropped.
pub fn resolve_image(src: &str, temp_dir: Option<&Path>) -> Result<ImageSource> {
    let path = Path::new(src);
    if path.is_file() {
        return Ok(ImageSource::File(path.to_path_buf()));
    }

    if src.starts_with("data:") {
        return decode_data_uri(src, temp_dir);
    }

    Err(Error::Resource {
        src: src.to_string(),
        reason: "no such file".to_string(),
    })
}

fn decode_data_uri(src: &str, temp_dir: Option<&Path>) -> Result<ImageSource> {
    let shown = data_uri_label(src);
    let resource_error = |reason: String| Error::Resource {
        src: shown.clone(),
        reason,
    };

    let (_, ext, payload) = regex_captures!(r"^data:image/(\w+);base64,(?s)(.+)$", src)
        .ok_or_else(|| resource_error("unsupported data URI".to_string()))?;

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| resource_error(format!("invalid base64: {e}")))?;

    let dir: PathBuf = temp_dir.map_or_else(std::env::temp_dir, Path::to_path_buf);
    let mut file = tempfile::Builder::new()
        .prefix("xls_img_")
        .suffix(&format!(".{ext}"))
        .tempfile_in(&dir)
        .map_err(|e| resource_error(format!("cannot create file in {}: {e}", dir.display())))?;
    file.write_all(&bytes)
        .map_err(|e| resource_error(format!("cannot write image: {e}")))?;

    let path = file.into_temp_path();
    debug!("Decoded {} byte image to {}", bytes.len(), path.display());
    Ok(ImageSource::Temporary(path))
}

/// Data URIs are cut before the payload in error messages
fn data_uri_label(src: &str) -> String {
    match src.find(',') {
        Some(pos) => format!("{},...", &src[..pos]),
        None => src.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_local_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = resolve_image(file.path().to_str().unwrap(), None).unwrap();
        assert!(!source.is_temporary());
        assert_eq!(source.path(), file.path());
    }

    #[test]
    fn test_data_uri_written_to_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let src = format!("data:image/png;base64,{PNG_1X1}");
        let source = resolve_image(&src, Some(dir.path())).unwrap();

        assert!(source.is_temporary());
        let path = source.path().to_path_buf();
        assert!(path.starts_with(dir.path()));
        assert_eq!(path.extension().unwrap(), "png");
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("xls_img_"));
        assert_eq!(&std::fs::read(&path).unwrap()[1..4], b"PNG");

        drop(source);
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = resolve_image("/nonexistent/path/image.png", None).unwrap_err();
        assert!(matches!(err, Error::Resource { ref src, .. } if src == "/nonexistent/path/image.png"));
        assert!(err.to_string().contains("/nonexistent/path/image.png"));
    }

    #[test]
    fn test_bad_data_uris() {
        for src in [
            "data:text/plain;base64,aGVsbG8=",
            "data:image/png,rawbytes",
            "data:image/png;base64,@@@",
        ] {
            let err = resolve_image(src, None).unwrap_err();
            assert!(matches!(err, Error::Resource { .. }), "{src}");
            assert!(!err.to_string().contains("@@@"));
        }
    }
}
