use std::fs;
use std::path::{Path, PathBuf};

use renav::errors::RewriteError;
use renav::util::testing;
use renav::walker::html_files;
use rstest::{fixture, rstest};
use tempfile::{tempdir, TempDir};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[fixture]
fn nested_root() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("a/deep/er")).unwrap();
    fs::create_dir_all(root.join("b")).unwrap();

    fs::write(root.join("z.html"), "").unwrap();
    fs::write(root.join("a/page.html"), "").unwrap();
    fs::write(root.join("a/deep/er/leaf.html"), "").unwrap();
    fs::write(root.join("b/ignored.txt"), "").unwrap();
    fs::write(root.join("b/site.html"), "").unwrap();

    dir
}

fn relative<'a>(files: &'a [PathBuf], root: &Path) -> Vec<&'a str> {
    files
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_str().unwrap())
        .collect()
}

#[rstest]
fn given_nested_tree_when_walking_then_finds_html_at_any_depth(nested_root: TempDir) {
    let files = html_files(nested_root.path()).unwrap();

    assert_eq!(
        relative(&files, nested_root.path()),
        vec!["a/deep/er/leaf.html", "a/page.html", "b/site.html", "z.html"]
    );
}

#[rstest]
fn given_non_html_files_when_walking_then_they_are_excluded(nested_root: TempDir) {
    let files = html_files(nested_root.path()).unwrap();

    assert!(!files.iter().any(|p| p.ends_with("ignored.txt")));
}

#[test]
fn given_missing_root_when_walking_then_returns_error() {
    let result = html_files(Path::new("/no/such/site/root"));
    assert!(matches!(result, Err(RewriteError::RootNotFound(_))));
}

#[test]
fn given_file_as_root_when_walking_then_returns_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("index.html");
    fs::write(&file, "").unwrap();

    let result = html_files(&file);
    assert!(matches!(result, Err(RewriteError::NotADirectory(_))));
}
