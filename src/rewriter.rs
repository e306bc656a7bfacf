use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use regex::Regex;
use tempfile::NamedTempFile;
use tracing::{debug, instrument, warn};

use crate::errors::{RewriteError, RewriteResult};
use crate::walker::html_files;

/// Matches the old three-item treatments dropdown: the three anchors must
/// appear contiguously and in this order inside a `dropdown-menu` list.
/// `[^>]*` tolerates extra attributes on each anchor (e.g. class="active"),
/// `\s*` tolerates arbitrary whitespace and newlines between list items.
pub const LEGACY_NAV_PATTERN: &str = concat!(
    r#"<ul class="dropdown-menu">\s*"#,
    r#"<li><a href="/treatments/general-dentistry"[^>]*>General Dentistry</a></li>\s*"#,
    r#"<li><a href="/treatments/cosmetic-dentistry"[^>]*>Cosmetic Dentistry</a></li>\s*"#,
    r#"<li><a href="/treatments/preventative-care"[^>]*>Preventative Care</a></li>\s*"#,
    r#"</ul>"#
);

/// The four-category nested menu that replaces every legacy match, verbatim.
/// Does not itself match [`LEGACY_NAV_PATTERN`], which makes the rewrite
/// idempotent.
pub const NEW_NAV_HTML: &str = r#"<ul class="dropdown-menu">
                            <li class="dropdown-submenu">
                                <a href="/treatments/general-dentistry">General Dentistry</a>
                                <ul class="dropdown-menu">
                                    <li><a href="/treatments/oral-health-assessment">Checkups & Cleans</a></li>
                                    <li><a href="/treatments/tooth-coloured-fillings">Fillings</a></li>
                                    <li><a href="/treatments/wisdom-teeth">Wisdom Teeth</a></li>
                                    <li><a href="/treatments/root-canal">Root Canal</a></li>
                                    <li><a href="/treatments/childrens-dentistry">Children's Dentistry</a></li>
                                    <li><a href="/treatments/extractions">Extractions</a></li>
                                </ul>
                            </li>
                            <li class="dropdown-submenu">
                                <a href="/treatments/cosmetic-dentistry">Cosmetic Dentistry</a>
                                <ul class="dropdown-menu">
                                    <li><a href="/treatments/teeth-whitening">Teeth Whitening</a></li>
                                    <li><a href="/treatments/porcelain-veneers">Porcelain Veneers</a></li>
                                    <li><a href="/treatments/smile-makeovers">Smile Makeovers</a></li>
                                    <li><a href="/treatments/inlays-onlays">Inlays & Onlays</a></li>
                                </ul>
                            </li>
                            <li class="dropdown-submenu">
                                <a href="/treatments/restorative-dentistry">Restorative Dentistry</a>
                                <ul class="dropdown-menu">
                                    <li><a href="/treatments/dental-implants">Dental Implants</a></li>
                                    <li><a href="/treatments/dental-crowns">Dental Crowns</a></li>
                                    <li><a href="/treatments/dental-bridges">Dental Bridges</a></li>
                                    <li><a href="/treatments/dentures">Dentures</a></li>
                                </ul>
                            </li>
                            <li class="dropdown-submenu">
                                <a href="/treatments/preventative-care">Preventative Care</a>
                                <ul class="dropdown-menu">
                                    <li><a href="/treatments/oral-hygiene">Oral Hygiene</a></li>
                                    <li><a href="/treatments/gum-disease">Gum Disease</a></li>
                                    <li><a href="/treatments/mouthguards">Mouthguards</a></li>
                                    <li><a href="/treatments/night-guards">Night Guards</a></li>
                                </ul>
                            </li>
                        </ul>"#;

/// What happened to a single candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Legacy fragment found, file rewritten in place
    Updated,
    /// Legacy fragment found, but dry-run mode left the file untouched
    WouldUpdate,
    /// No match, file left byte-for-byte identical
    Unchanged,
}

/// Per-file result of a tree run, in visitation order.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: RewriteResult<FileOutcome>,
}

/// Aggregated counts for one invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn tally(reports: &[FileReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            match report.outcome {
                Ok(FileOutcome::Updated) | Ok(FileOutcome::WouldUpdate) => summary.updated += 1,
                Ok(FileOutcome::Unchanged) => summary.unchanged += 1,
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// Stateless rewriter holding the compiled legacy pattern.
#[derive(Debug)]
pub struct NavRewriter {
    pattern: Regex,
    dry_run: bool,
}

impl NavRewriter {
    pub fn new() -> RewriteResult<Self> {
        Self::with_options(false)
    }

    pub fn with_options(dry_run: bool) -> RewriteResult<Self> {
        let pattern = Regex::new(LEGACY_NAV_PATTERN)
            .map_err(|e| RewriteError::InternalError(e.to_string()))?;
        Ok(Self { pattern, dry_run })
    }

    /// Pure content-to-content rewrite. Returns `None` when nothing matched.
    pub fn rewrite_content(&self, content: &str) -> Option<String> {
        match self.pattern.replace_all(content, NEW_NAV_HTML) {
            Cow::Borrowed(_) => None,
            Cow::Owned(new_content) => Some(new_content),
        }
    }

    /// Read-modify-write for a single file. Writes only when the content
    /// actually changed, via temp-file-then-rename in the target directory
    /// so no partial write is ever observable.
    #[instrument(level = "debug", skip(self))]
    pub fn rewrite_file(&self, path: &Path) -> RewriteResult<FileOutcome> {
        let bytes = fs::read(path).map_err(|e| RewriteError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let content =
            String::from_utf8(bytes).map_err(|_| RewriteError::NotUtf8(path.to_path_buf()))?;

        match self.rewrite_content(&content) {
            Some(_) if self.dry_run => Ok(FileOutcome::WouldUpdate),
            Some(new_content) => {
                write_atomic(path, &new_content)?;
                Ok(FileOutcome::Updated)
            }
            None => Ok(FileOutcome::Unchanged),
        }
    }

    /// Processes every `.html` file under `root` sequentially.
    ///
    /// Per-file errors do not abort the run: the file is skipped, the error
    /// is logged and carried in its [`FileReport`] for aggregated reporting.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&self, root: &Path) -> RewriteResult<Vec<FileReport>> {
        let files = html_files(root)?;
        let mut reports = Vec::with_capacity(files.len());
        for path in files {
            debug!("Processing {:?}", path);
            let outcome = self.rewrite_file(&path);
            if let Err(ref e) = outcome {
                warn!("Skipping {}: {}", path.display(), e);
            }
            reports.push(FileReport { path, outcome });
        }
        Ok(reports)
    }
}

fn write_atomic(path: &Path, content: &str) -> RewriteResult<()> {
    let write_err = |e: std::io::Error| RewriteError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    // The temp file is created with restrictive permissions; carry the
    // original's over so the rename does not change the file's mode.
    let perms = fs::metadata(path).map_err(write_err)?.permissions();
    tmp.as_file().set_permissions(perms).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_ONE_LINE: &str = r#"<ul class="dropdown-menu"><li><a href="/treatments/general-dentistry">General Dentistry</a></li><li><a href="/treatments/cosmetic-dentistry">Cosmetic Dentistry</a></li><li><a href="/treatments/preventative-care">Preventative Care</a></li></ul>"#;

    fn rewriter() -> NavRewriter {
        NavRewriter::new().unwrap()
    }

    #[test]
    fn test_legacy_pattern_compiles() {
        assert!(Regex::new(LEGACY_NAV_PATTERN).is_ok());
    }

    #[test]
    fn test_single_line_fragment_is_replaced() {
        let content = format!("<nav>{}</nav>", LEGACY_ONE_LINE);
        let result = rewriter().rewrite_content(&content).unwrap();
        assert_eq!(result, format!("<nav>{}</nav>", NEW_NAV_HTML));
    }

    #[test]
    fn test_multiline_fragment_with_indentation_is_replaced() {
        let content = r#"<ul class="dropdown-menu">
            <li><a href="/treatments/general-dentistry">General Dentistry</a></li>
            <li><a href="/treatments/cosmetic-dentistry">Cosmetic Dentistry</a></li>
            <li><a href="/treatments/preventative-care">Preventative Care</a></li>
        </ul>"#;
        assert_eq!(rewriter().rewrite_content(content).unwrap(), NEW_NAV_HTML);
    }

    #[test]
    fn test_anchor_with_extra_attributes_is_matched() {
        let content = r#"<ul class="dropdown-menu"><li><a href="/treatments/general-dentistry" class="active">General Dentistry</a></li><li><a href="/treatments/cosmetic-dentistry">Cosmetic Dentistry</a></li><li><a href="/treatments/preventative-care">Preventative Care</a></li></ul>"#;
        assert!(rewriter().rewrite_content(content).is_some());
    }

    #[test]
    fn test_unrelated_html_is_not_touched() {
        assert!(rewriter().rewrite_content("<p>Hello</p>").is_none());
    }

    #[test]
    fn test_reordered_items_do_not_match() {
        let content = r#"<ul class="dropdown-menu"><li><a href="/treatments/cosmetic-dentistry">Cosmetic Dentistry</a></li><li><a href="/treatments/general-dentistry">General Dentistry</a></li><li><a href="/treatments/preventative-care">Preventative Care</a></li></ul>"#;
        assert!(rewriter().rewrite_content(content).is_none());
    }

    #[test]
    fn test_replacement_is_idempotent() {
        let rewriter = rewriter();
        let first = rewriter.rewrite_content(LEGACY_ONE_LINE).unwrap();
        assert!(rewriter.rewrite_content(&first).is_none());
    }

    #[test]
    fn test_all_occurrences_are_replaced() {
        let content = format!("{}\n<hr>\n{}", LEGACY_ONE_LINE, LEGACY_ONE_LINE);
        let result = rewriter().rewrite_content(&content).unwrap();
        assert_eq!(result.matches("dropdown-submenu").count(), 8);
        assert!(!result.contains(r#"<li><a href="/treatments/general-dentistry">General Dentistry</a></li>"#));
    }
}
