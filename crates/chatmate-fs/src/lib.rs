//! Validated filesystem access for chatmate
//!
//! Every path and filename the reconciliation engine touches passes through
//! this crate. It provides:
//!
//! - [`validation`]: filename, path and input checks (the path validator)
//! - [`SafeStore`]: the only component allowed to read, write or delete
//!   artifact files, confined to a base directory
//! - [`NormalizedPath`]: lexical path cleaning used by the confinement check
//! - [`io`]: atomic, locked writes
//! - [`ConfigStore`]: format-agnostic config file loading

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod store;
pub mod validation;

pub use config::{ConfigFormat, ConfigStore};
pub use constants::{ARTIFACT_SUFFIX, MAX_CONTENT_SIZE, MAX_FILENAME_LENGTH};
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use path::NormalizedPath;
pub use store::{DeleteOutcome, SafeStore};
pub use validation::{
    ValidationError, is_path_safe, sanitize_input, validate_artifact_filename,
    validate_content_length, validate_file_extension, validate_filename, validate_path,
};
