use tablesite_generator::{config, sample};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let path = sample::generate_random_csv(
        config::SOURCE_DIR,
        sample::SampleShape::default(),
        chrono::Local::now().naive_local(),
        &mut rand::thread_rng(),
    )?;

    log::info!("generated data file: {}", path.display());

    Ok(())
}
