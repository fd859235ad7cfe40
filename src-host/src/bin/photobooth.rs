//! Headless photobooth: frames and decorates one photo, then saves it as PNG.
//!
//! Configured entirely through environment variables (or a `.env` file).

fn main() -> anyhow::Result<()> {
    photobooth_lib::init_tracing();

    tracing::info!("Starting photobooth v{}", env!("CARGO_PKG_VERSION"));

    let path = photobooth_lib::run()?;
    println!("{}", path.display());
    Ok(())
}
