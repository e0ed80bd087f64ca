//! Drawing quads into an SVG document.

use std::path::Path;
use surfplot_core::Quad;

use super::{quad_path, DrawTarget, TargetError};
use crate::color_map::Color;

/// An SVG target.
///
/// Each painted quad becomes one `<path>` element,
/// in painting order so that later quads are drawn on top.
#[derive(Clone, Debug)]
pub struct VectorTarget {
    width: u32,
    height: u32,
    paths: Vec<String>,
}

impl VectorTarget {
    /// Create an empty document of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            paths: Vec::new(),
        }
    }

    /// Number of quads painted since the last clear.
    #[inline]
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// The complete SVG document.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.width, self.height);
        let mut doc = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        doc.push('\n');
        for path in &self.paths {
            doc.push_str(path);
            doc.push('\n');
        }
        doc.push_str("</svg>\n");
        doc
    }

    /// Write the document to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TargetError> {
        std::fs::write(path, self.to_svg())?;
        Ok(())
    }
}

/// A paint attribute pair like `fill="#ff0000" fill-opacity="0.500"`.
fn paint_attrs(attr: &str, color: Color) -> String {
    let [r, g, b, a] = color;
    match a {
        0 => format!(r#" {attr}="none""#),
        u8::MAX => format!(r##" {attr}="#{r:02x}{g:02x}{b:02x}""##),
        _ => {
            let opacity = a as f64 / u8::MAX as f64;
            format!(r##" {attr}="#{r:02x}{g:02x}{b:02x}" {attr}-opacity="{opacity:.3}""##)
        }
    }
}

impl DrawTarget for VectorTarget {
    fn clear(&mut self) {
        self.paths.clear();
    }

    fn paint(&mut self, quad: &Quad, fill: Color, stroke: Color) {
        self.paths.push(format!(
            r#"<path d="{}"{}{}/>"#,
            quad_path(quad).to_svg(),
            paint_attrs("fill", fill),
            paint_attrs("stroke", stroke),
        ));
    }
}
