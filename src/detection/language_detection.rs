use std::fs;
use std::io;
use std::path::Path;

/// Directory names that are never descended into
pub const PRUNED_DIRECTORIES: [&str; 2] = ["node_modules", "vendor"];

/// Whether a directory should be pruned from the walk entirely
pub fn is_pruned_dir(name: &str) -> bool {
    name.starts_with('.') || PRUNED_DIRECTORIES.contains(&name)
}

/// Count lines that are not empty after trimming
pub fn count_non_blank_lines(content: &str) -> usize {
    content.lines().filter(|line| !line.trim().is_empty()).count()
}

/// Read a file and count its non-blank lines
pub fn count_non_blank_lines_in_file(file_path: &Path) -> io::Result<usize> {
    let bytes = fs::read(file_path)?;
    Ok(count_non_blank_lines(&String::from_utf8_lossy(&bytes)))
}
