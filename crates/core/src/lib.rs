//! Crispy Core - paths, defaults and file-system helpers shared by the Crispy font tools.

pub mod config;
pub mod io;

pub use io::{
    DirectoryCopy, copy_dir_all, glob_fonts, relative_path, remove_dir_if_exists,
    replace_dir_with_copy,
};
