//! Turn a directory of CSV/TXT files into a MkDocs project and build it.

pub mod builder;
pub mod config;
pub mod generator;
pub mod page;
pub mod project;
pub mod sample;
mod static_dir;

pub use builder::BuiltSite;
pub use config::Config;

/// Regenerate the whole project from `config.source_dir` and run the builder.
pub fn build(config: Config) -> anyhow::Result<BuiltSite> {
    let generator = generator::Generator::new(config)?;
    generator.build()
}
