use crate::shared::error::BaselineError;
use crate::shared::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Maximum file size for security (100 MB)
/// Content packs for a full OS baseline are a few MB; anything near this is hostile.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Reads a data file if it exists, with security checks
///
/// # Security
/// - Symbolic links are rejected (checked with `symlink_metadata()`, so the link
///   itself is inspected rather than its target)
/// - Non-regular files are rejected
/// - Files larger than [`MAX_FILE_SIZE`] are rejected
///
/// # Arguments
/// * `path` - The file to read
/// * `description` - What the file is (e.g., "content pack"), for error messages
///
/// # Returns
/// `None` when the file does not exist, otherwise its content
pub fn read_data_file(path: &Path, description: &str) -> Result<Option<String>> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(BaselineError::FileReadError {
                path: path.to_path_buf(),
                details: format!("Failed to read {} metadata: {}", description, e),
            }
            .into())
        }
    };

    if metadata.is_symlink() {
        return Err(BaselineError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", description),
            hint: "Copy the file into the data directory instead of linking it".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(BaselineError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", description),
        }
        .into());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

    let content = fs::read_to_string(path).map_err(|e| BaselineError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    Ok(Some(content))
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(BaselineError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
            hint: "Split the content pack or check that the right file was supplied".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validates an identifier that becomes a file name in a data directory
///
/// Allows ASCII alphanumerics, `-`, `_` and `.`, and rejects `..` so an id can
/// never escape its directory.
pub fn validate_file_stem(value: &str, max_len: usize) -> std::result::Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    if value.len() > max_len {
        return Err(format!(
            "is too long ({} bytes). Maximum allowed: {} bytes",
            value.len(),
            max_len
        ));
    }
    if value.contains("..") {
        return Err("must not contain '..'".to_string());
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(
            "contains invalid characters. Only ASCII letters, digits, '-', '_' and '.' are allowed"
                .to_string(),
        );
    }
    Ok(())
}
