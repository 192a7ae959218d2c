use std::{fs, path::Path};

use anyhow::Context as _;

use crate::config::{Config, DOCS_DIR, STYLESHEETS_DIR, SiteConfig};

/// Remove `project_dir` if it exists, then recreate it with an empty
/// `docs/stylesheets/`.
///
/// Nothing may hold open handles into the old tree while this runs.
pub fn reset(project_dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let project_dir = project_dir.as_ref();

    if project_dir.try_exists()? {
        log::info!("remove old project dir: {}", project_dir.display());
        fs::remove_dir_all(project_dir)
            .with_context(|| format!("failed to remove: {}", project_dir.display()))?;
    }

    let stylesheets_dir = project_dir.join(DOCS_DIR).join(STYLESHEETS_DIR);
    fs::create_dir_all(&stylesheets_dir)
        .with_context(|| format!("failed to create dir: {}", stylesheets_dir.display()))?;

    Ok(())
}

/// Write `mkdocs.yml`, replacing whatever was there.
pub fn write_site_config(config: &Config) -> anyhow::Result<()> {
    let path = config.config_file();
    let yaml = SiteConfig::from(config).to_yaml()?;

    log::info!("write site config: {}", path.display());
    fs::write(&path, yaml).with_context(|| format!("failed to write: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_wipes_previous_tree() {
        let tmp = tempfile::TempDir::new().unwrap();
        let project_dir = tmp.path().join("site_project");
        fs::create_dir_all(project_dir.join("docs/old")).unwrap();
        fs::write(project_dir.join("docs/old/stale.csv.md"), "stale").unwrap();

        reset(&project_dir).unwrap();

        assert!(!project_dir.join("docs/old").exists());
        assert!(project_dir.join("docs/stylesheets").is_dir());
    }

    #[test]
    fn reset_is_idempotent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let project_dir = tmp.path().join("site_project");

        reset(&project_dir).unwrap();
        reset(&project_dir).unwrap();

        assert!(project_dir.join("docs/stylesheets").is_dir());
    }

    #[test]
    fn site_config_is_overwritten() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config {
            project_dir: tmp.path().to_path_buf(),
            ..Config::default()
        };
        fs::write(config.config_file(), "site_name: something else\nextra: 1\n").unwrap();

        write_site_config(&config).unwrap();

        let written = fs::read_to_string(config.config_file()).unwrap();
        assert_eq!(written, SiteConfig::from(&config).to_yaml().unwrap());
        assert!(!written.contains("extra: 1"));
        assert!(!written.contains("something else"));
    }
}
