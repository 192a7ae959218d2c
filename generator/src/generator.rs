use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    builder::BuiltSite,
    config::{Config, INDEX_MD},
    page::Page,
    project, static_dir,
};

const INDEX_CONTENT: &str = "# 📂 根目录\n\n自动扫描完成。点击左侧查看数据。";

pub struct Generator {
    config: Config,
    /// Canonical form of `config.source_dir`.
    src_dir: PathBuf,
    docs_dir: PathBuf,
}

/// What one scan produced, with paths relative to the source root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub directories: Vec<PathBuf>,
    /// Generated pages, relative to `docs/`.
    pub pages: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl Generator {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let src_dir = config.source_dir.canonicalize().with_context(|| {
            format!("failed to resolve source dir: {}", config.source_dir.display())
        })?;

        // the project dir is deleted on every run, it must not swallow the source
        let project_exists = config.project_dir.try_exists().with_context(|| {
            format!("failed to check project dir: {}", config.project_dir.display())
        })?;
        if project_exists {
            let project_dir = config.project_dir.canonicalize().with_context(|| {
                format!("failed to resolve project dir: {}", config.project_dir.display())
            })?;
            if src_dir.starts_with(&project_dir) {
                anyhow::bail!(
                    "source dir `{}` is inside the project dir `{}`",
                    src_dir.display(),
                    project_dir.display()
                );
            }
        }

        let docs_dir = config.docs_dir();

        Ok(Self {
            config,
            src_dir,
            docs_dir,
        })
    }

    /// Full regenerate-and-build pass.
    pub fn build(&self) -> anyhow::Result<BuiltSite> {
        self.setup_project()?;
        self.create_custom_css()?;
        let summary = self.scan_and_generate()?;
        log::info!(
            "generated {} pages in {} directories, skipped {} files",
            summary.pages.len(),
            summary.directories.len(),
            summary.skipped.len()
        );
        self.build_site()
    }

    pub fn setup_project(&self) -> anyhow::Result<()> {
        log::info!("reset project dir: {}", self.config.project_dir.display());
        project::reset(&self.config.project_dir)?;
        project::write_site_config(&self.config)
    }

    pub fn create_custom_css(&self) -> anyhow::Result<()> {
        log::info!("write stylesheets into: {}", self.docs_dir.display());
        static_dir::copy_static_dir_to(&self.docs_dir)
    }

    pub fn scan_and_generate(&self) -> anyhow::Result<ScanSummary> {
        fs::create_dir_all(&self.docs_dir)
            .with_context(|| format!("failed to create dir: {}", self.docs_dir.display()))?;

        let index_path = self.docs_dir.join(INDEX_MD);
        fs::write(&index_path, INDEX_CONTENT)
            .with_context(|| format!("failed to write: {}", index_path.display()))?;

        // a project dir nested in the source tree is output, not input
        let project_dir = self.config.project_dir.canonicalize().with_context(|| {
            format!("failed to resolve project dir: {}", self.config.project_dir.display())
        })?;
        let skip = HashSet::from([project_dir]);

        let mut summary = ScanSummary::default();
        self.iter_dir(&self.src_dir, &skip, &mut summary)?;

        Ok(summary)
    }

    pub fn build_site(&self) -> anyhow::Result<BuiltSite> {
        let project_dir = &self.config.project_dir;
        self.config.builder.run(project_dir)?.into_site(project_dir)
    }

    fn iter_dir(
        &self,
        dir: &Path,
        skip: &HashSet<PathBuf>,
        summary: &mut ScanSummary,
    ) -> anyhow::Result<()> {
        let rel_dir = dir.strip_prefix(&self.src_dir)?;

        // created up front so directories without pages still show in the nav
        let dst_dir = self.docs_dir.join(rel_dir);
        fs::create_dir_all(&dst_dir)
            .with_context(|| format!("failed to create dir: {}", dst_dir.display()))?;
        summary.directories.push(rel_dir.to_path_buf());

        let entries =
            fs::read_dir(dir).with_context(|| format!("failed to read dir: {}", dir.display()))?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            let ty = entry.file_type()?;

            if skip.contains(&path) {
                log::debug!("skip project dir: {}", path.display());
                continue;
            }

            if ty.is_dir() {
                self.iter_dir(&path, skip, summary)?;
            } else if ty.is_symlink() && path.is_dir() {
                log::debug!("skip dir symlink: {}", path.display());
                summary.skipped.push(path.strip_prefix(&self.src_dir)?.to_path_buf());
            } else {
                self.handle_file(&path, &dst_dir, summary)?;
            }
        }

        Ok(())
    }

    fn handle_file(
        &self,
        path: &Path,
        dst_dir: &Path,
        summary: &mut ScanSummary,
    ) -> anyhow::Result<()> {
        let rel_path = path.strip_prefix(&self.src_dir)?;

        let Some(page) = Page::new(path)? else {
            log::debug!("skip file: {}", rel_path.display());
            summary.skipped.push(rel_path.to_path_buf());
            return Ok(());
        };

        log::info!("build page: {}", rel_path.display());
        let output_path = dst_dir.join(page.page_file_name());
        fs::write(&output_path, page.render()?)
            .with_context(|| format!("failed to write page: {}", output_path.display()))?;

        summary
            .pages
            .push(output_path.strip_prefix(&self.docs_dir)?.to_path_buf());

        Ok(())
    }
}
