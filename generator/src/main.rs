use tablesite_generator::{Config, build, sample};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = Config::default();

    if let Some(demo) = sample::ensure_sample_source(&config.source_dir)? {
        log::warn!(
            "source dir `{}` not found, created it with {}",
            config.source_dir.display(),
            demo.display()
        );
    }

    log::info!("start building...");
    let site = build(config)?;

    log::info!("build complete");
    for line in site.instructions() {
        println!("{}", line);
    }

    Ok(())
}
