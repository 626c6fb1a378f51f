//! Static asset copying into the output tree.

use crate::output::OutputError;
use std::path::Path;

/// Recursively copy `src` into `dst`, returning the number of files copied.
///
/// A missing source directory is not an error — the site simply ships
/// without assets — but it is logged so the operator can tell.
pub fn copy_assets(src: &Path, dst: &Path) -> Result<usize, OutputError> {
    if !src.is_dir() {
        tracing::debug!(path = %src.display(), "No assets directory, skipping copy");
        return Ok(0);
    }
    copy_dir(src, dst)
}

fn copy_dir(src: &Path, dst: &Path) -> Result<usize, OutputError> {
    std::fs::create_dir_all(dst)?;

    let mut copied = 0;
    for item in std::fs::read_dir(src)? {
        let item = item?;
        let target = dst.join(item.file_name());
        if item.file_type()?.is_dir() {
            copied += copy_dir(&item.path(), &target)?;
        } else {
            std::fs::copy(item.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "feedpage-assets-{}-{}",
            std::process::id(),
            name
        ));
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn copies_nested_tree() {
        let src = temp_dir("src");
        let dst = temp_dir("dst");
        std::fs::create_dir_all(src.join("css")).unwrap();
        std::fs::write(src.join("css/style.css"), "body {}").unwrap();
        std::fs::write(src.join("main.js"), "// js").unwrap();

        let copied = copy_assets(&src, &dst).unwrap();

        assert_eq!(copied, 2);
        assert!(dst.join("css/style.css").exists());
        assert!(dst.join("main.js").exists());

        std::fs::remove_dir_all(&src).ok();
        std::fs::remove_dir_all(&dst).ok();
    }

    #[test]
    fn missing_source_is_not_an_error() {
        let dst = temp_dir("dst-missing");
        let copied = copy_assets(Path::new("/nonexistent/assets"), &dst).unwrap();
        assert_eq!(copied, 0);
        std::fs::remove_dir_all(&dst).ok();
    }
}
