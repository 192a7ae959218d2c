use std::path::PathBuf;

use serde::Serialize;

use crate::builder::BuilderCommand;

pub const SOURCE_DIR: &str = "my_source_files";
pub const PROJECT_DIR: &str = "site_project";
pub const SITE_NAME: &str = "极简大数据管理器";
pub const LANGUAGE: &str = "zh";

pub const DOCS_DIR: &str = "docs";
pub const STYLESHEETS_DIR: &str = "stylesheets";
pub const CONFIG_FILE: &str = "mkdocs.yml";
pub const INDEX_MD: &str = "index.md";
pub const SITE_DIR: &str = "site";
pub const PREVIEW_PORT: u16 = 8080;

const THEME_NAME: &str = "material";
const THEME_FEATURES: [&str; 3] = [
    "navigation.expand",
    "navigation.sections",
    "search.highlight",
];
const EXTRA_CSS: [&str; 1] = ["stylesheets/extra.css"];
const PLUGINS: [&str; 2] = ["search", "table-reader"];

/// Everything one run of the assembler needs to know.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tree of `.csv`/`.txt` files to publish.
    pub source_dir: PathBuf,
    /// Generated MkDocs project; wiped at the start of every run.
    pub project_dir: PathBuf,
    pub site_name: String,
    pub language: String,
    pub builder: BuilderCommand,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: SOURCE_DIR.into(),
            project_dir: PROJECT_DIR.into(),
            site_name: SITE_NAME.to_string(),
            language: LANGUAGE.to_string(),
            builder: BuilderCommand::default(),
        }
    }
}

impl Config {
    pub fn docs_dir(&self) -> PathBuf {
        self.project_dir.join(DOCS_DIR)
    }

    pub fn config_file(&self) -> PathBuf {
        self.project_dir.join(CONFIG_FILE)
    }
}

/// The `mkdocs.yml` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    pub site_name: String,
    /// Must stay `false`: links then point at `page.csv.html` itself rather
    /// than an implicit `page.csv/index.html`.
    pub use_directory_urls: bool,
    pub theme: Theme,
    pub extra_css: Vec<String>,
    pub plugins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: String,
    pub language: String,
    pub features: Vec<String>,
}

impl From<&Config> for SiteConfig {
    fn from(config: &Config) -> Self {
        Self {
            site_name: config.site_name.clone(),
            use_directory_urls: false,
            theme: Theme {
                name: THEME_NAME.to_string(),
                language: config.language.clone(),
                features: THEME_FEATURES.iter().map(|x| x.to_string()).collect(),
            },
            extra_css: EXTRA_CSS.iter().map(|x| x.to_string()).collect(),
            plugins: PLUGINS.iter().map(|x| x.to_string()).collect(),
        }
    }
}

impl SiteConfig {
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
