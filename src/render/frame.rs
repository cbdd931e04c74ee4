use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::{
    foundation::error::{DrawoutError, DrawoutResult},
    markup::document::Document,
    schedule::controller::Sequence,
};

const MAX_DIM: u32 = 16_384;

#[derive(Clone, Debug)]
/// Rasterization settings for [`render_frame`].
pub struct RenderSettings {
    /// Output width in pixels; height follows the SVG aspect ratio. `None` keeps the
    /// intrinsic size.
    pub width: Option<u32>,
    /// Straight RGBA8 background. `None` leaves the frame transparent.
    pub background: Option<[u8; 4]>,
    /// Base directory for relative `href`s inside the SVG.
    pub resources_dir: Option<PathBuf>,
    /// Load system fonts so `<text>` renders.
    pub system_fonts: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: None,
            background: None,
            resources_dir: None,
            system_fonts: true,
        }
    }
}

#[derive(Clone, Debug)]
/// Rendered frame in straight (non-premultiplied) RGBA8.
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Copy of `doc` with the sequence's styles at `t` seconds written inline.
pub fn styled_at(doc: &Document, seq: &Sequence, t: f64) -> Document {
    let mut out = doc.clone();
    seq.apply_at(&mut out, t);
    out
}

/// Rasterize `doc` on the CPU.
#[tracing::instrument(skip(doc))]
pub fn render_frame(doc: &Document, settings: &RenderSettings) -> DrawoutResult<FrameRGBA> {
    let mut fontdb = usvg::fontdb::Database::new();
    if settings.system_fonts {
        fontdb.load_system_fonts();
    }
    let opts = usvg::Options {
        resources_dir: settings.resources_dir.clone(),
        fontdb: Arc::new(fontdb),
        ..Default::default()
    };

    let text = doc.to_svg_string();
    let tree = usvg::Tree::from_str(&text, &opts).context("parse styled svg")?;

    let size = tree.size();
    let (w, h) = (size.width(), size.height());
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(DrawoutError::render("svg has invalid width/height"));
    }
    let scale = settings.width.map_or(1.0, |target| target as f32 / w);
    let width = ((w * scale).ceil() as u32).max(1);
    let height = ((h * scale).ceil() as u32).max(1);
    if width > MAX_DIM || height > MAX_DIM {
        return Err(DrawoutError::render(format!(
            "frame size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| DrawoutError::render("failed to allocate frame pixmap"))?;
    if let Some([r, g, b, a]) = settings.background {
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));
    }
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut data = pixmap.take();
    unpremultiply_rgba8_in_place(&mut data);
    Ok(FrameRGBA {
        width,
        height,
        data,
    })
}

/// Write `frame` as PNG, creating parent directories.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> DrawoutResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = (((*c as u16) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
