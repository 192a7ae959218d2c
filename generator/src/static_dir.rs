use std::{fs, path::Path};

use anyhow::Context as _;
use include_dir::{Dir, include_dir};

/// Minified by the build script; holds `stylesheets/extra.css`.
static STATIC_DIR: Dir = include_dir!("$OUT_DIR/static");

/// Write every embedded asset under `docs_dir`, keeping relative paths.
pub fn copy_static_dir_to(docs_dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let docs_dir = docs_dir.as_ref();
    fs::create_dir_all(docs_dir)
        .with_context(|| format!("failed to create dir: {}", docs_dir.display()))?;
    copy_dir(&STATIC_DIR, docs_dir)
}

fn copy_dir(dir: &Dir, out_dir: &Path) -> anyhow::Result<()> {
    for entry in dir.entries() {
        match entry {
            include_dir::DirEntry::Dir(subdir) => {
                copy_dir(subdir, out_dir)?;
            }
            include_dir::DirEntry::File(file) => {
                // file paths are relative to the embedded root, not to `dir`
                let path = out_dir.join(file.path());
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::write(&path, file.contents())
                    .with_context(|| format!("failed to write asset: {}", path.display()))?;
            }
        }
    }

    Ok(())
}
