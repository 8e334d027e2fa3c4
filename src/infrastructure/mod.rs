pub mod json_file;
pub mod repository;

#[cfg(test)]
pub mod test_utils;

pub use json_file::*;
pub use repository::*;
