//! One headless photobooth session: load, decorate, export, save.

use std::path::PathBuf;

use anyhow::Context;
use photobooth_engine::{Editor, FrameRenderer, FrameStyle, StickerLibrary, Typeface};

use crate::acquire;
use crate::config::AppConfig;

/// Build an editor from the configured frame style and font.
pub fn build_editor(config: &AppConfig) -> Result<Editor, anyhow::Error> {
    let face = match &config.font {
        Some(path) => acquire::load_typeface(path)
            .with_context(|| format!("Failed to load font {}", path.display()))?,
        None => Typeface::default(),
    };
    let style = FrameStyle {
        watermark: config.watermark.clone(),
        date_format: config.date_format.clone(),
        ..FrameStyle::default()
    };

    let editor = Editor::new(
        FrameRenderer::new(style, face),
        StickerLibrary::with_placeholders(),
    );
    Ok(match config.date {
        Some(date) => editor.with_date(date),
        None => editor,
    })
}

/// Run the configured session and return the path of the saved PNG.
pub fn run_session(config: &AppConfig) -> Result<PathBuf, anyhow::Error> {
    let input = config
        .input
        .as_deref()
        .context("PHOTOBOOTH_INPUT is not set")?;

    let mut editor = build_editor(config)?;
    editor.select_frame_color(config.frame_color);

    let photo = acquire::load_photo(input)?;
    let (width, height) = editor.ingest_decoded_image(&photo)?;
    tracing::info!("Loaded {} ({width}x{height})", input.display());

    editor.select_theme(config.theme);

    for drag in &config.drags {
        let Some(id) = editor.overlays().get(drag.index).map(|o| o.id()) else {
            tracing::warn!(
                "Skipping drag for overlay #{}: theme {} has {} overlays",
                drag.index,
                config.theme,
                editor.overlays().len()
            );
            continue;
        };
        editor.begin_drag(id, drag.from.0, drag.from.1);
        editor.update_drag(drag.to.0, drag.to.1);
        editor.end_drag();
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        match serde_json::to_string(&editor.view()) {
            Ok(json) => tracing::debug!("Editor state: {json}"),
            Err(e) => tracing::debug!("Failed to serialize editor state: {e}"),
        }
    }

    let exported = editor.export()?;
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;
    let path = config.output_dir.join(exported.suggested_filename());
    std::fs::write(&path, exported.png())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Saved {}", path.display());
    Ok(path)
}
