use std::ffi::OsStr;
use std::path::Path;

use crate::errors::{RewriteError, RewriteResult};

pub trait PathExt {
    fn is_html_file(&self) -> bool;
}

impl PathExt for Path {
    fn is_html_file(&self) -> bool {
        self.extension() == Some(OsStr::new("html"))
    }
}

pub fn ensure_dir_exists(path: &Path) -> RewriteResult<()> {
    if !path.exists() {
        Err(RewriteError::RootNotFound(path.to_path_buf()))
    } else if !path.is_dir() {
        Err(RewriteError::NotADirectory(path.to_path_buf()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_html_file() {
        assert!(Path::new("index.html").is_html_file());
        assert!(Path::new("a/b/page.html").is_html_file());
        assert!(!Path::new("notes.txt").is_html_file());
        assert!(!Path::new("index.htm").is_html_file());
        assert!(!Path::new("html").is_html_file());
    }

    #[test]
    fn test_ensure_dir_exists_rejects_missing_path() {
        let result = ensure_dir_exists(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(RewriteError::RootNotFound(_))));
    }
}
