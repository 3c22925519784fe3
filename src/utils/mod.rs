pub mod file_operations;

pub use file_operations::{
    copy_text_file, destination_file_name, ensure_directory, map_destination, matches_extensions,
};
