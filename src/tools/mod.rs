mod file_transfer;
mod media_scanner;
mod path_validator;

pub use file_transfer::{copy_file, move_file};
pub use media_scanner::{MediaFileInfo, scan_media_files};
pub use path_validator::{ensure_directory_exists, path_is_nested_inside, validate_directory_exists};
