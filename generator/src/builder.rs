use std::{
    fmt,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use anyhow::Context as _;

use crate::config::{self, INDEX_MD, SITE_DIR};

/// The external static-site builder, `mkdocs build` unless told otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for BuilderCommand {
    fn default() -> Self {
        Self {
            program: "mkdocs".to_string(),
            args: vec!["build".to_string()],
        }
    }
}

impl fmt::Display for BuilderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// What the builder left behind: its status and everything it printed.
#[derive(Debug)]
pub struct BuildOutput {
    pub command: BuilderCommand,
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltSite {
    pub site_dir: PathBuf,
    pub index_html: PathBuf,
}

impl BuilderCommand {
    /// Run the builder inside `project_dir` and wait for it. There is no
    /// timeout: a hanging builder hangs the run.
    pub fn run(&self, project_dir: impl AsRef<Path>) -> anyhow::Result<BuildOutput> {
        let project_dir = project_dir.as_ref();

        log::info!("run `{}` in {}", self, project_dir.display());
        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(project_dir)
            .output()
            .with_context(|| format!("failed to spawn builder `{}`", self))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        for line in stdout.lines() {
            log::info!("[{}] {}", self.program, line);
        }
        for line in stderr.lines() {
            log::warn!("[{}] {}", self.program, line);
        }

        Ok(BuildOutput {
            command: self.clone(),
            status: output.status,
            stdout,
            stderr,
        })
    }
}

impl BuildOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Turn a finished build into the location of the generated site, or an
    /// error carrying the exit code and the builder's stderr.
    pub fn into_site(self, project_dir: impl AsRef<Path>) -> anyhow::Result<BuiltSite> {
        if !self.success() {
            let code = self
                .status
                .code()
                .map_or_else(|| "killed by signal".to_string(), |c| c.to_string());
            anyhow::bail!(
                "builder `{}` failed (exit code: {})\n{}",
                self.command,
                code,
                self.stderr.trim_end()
            );
        }

        let project_dir = project_dir.as_ref();
        let site_dir = std::path::absolute(project_dir.join(SITE_DIR)).with_context(|| {
            format!("failed to resolve site dir in {}", project_dir.display())
        })?;
        let index_html = site_dir.join(Path::new(INDEX_MD).with_extension("html"));

        Ok(BuiltSite {
            site_dir,
            index_html,
        })
    }
}

impl BuiltSite {
    /// How to look at the result locally.
    pub fn instructions(&self) -> Vec<String> {
        vec![
            format!("static site dir: {}", self.site_dir.display()),
            format!("open directly: {}", self.index_html.display()),
            format!(
                "or serve it: cd {} && python3 -m http.server {}",
                self.site_dir.display(),
                config::PREVIEW_PORT
            ),
            format!(
                "or with the bundled server: TABLESITE_WEB_SERVED_DIR_PATH={} tablesite-web",
                self.site_dir.display()
            ),
        ]
    }
}
