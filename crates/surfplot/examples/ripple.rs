//! Animated ripples spreading from the origin,
//! written out as a sequence of PNG images.
//!
//! The wave `sin(r - t) / (1 + r/4)` with `r = √(x² + y²)`
//! is rendered at a handful of times from a single sampling pass,
//! with each quad colored by its average height.

use surfplot as sp;
use surfplot::visuals as sv;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut surface = sp::Surface::new(sp::SurfaceParams {
        domain: sp::Domain {
            x: sp::Interval::new(-12., 12.),
            y: sp::Interval::new(-12., 12.),
            resolution: sp::Resolution::uniform(0.5),
        },
        zoom: 16.,
        pitch: 0.8,
        width: 600,
        height: 450,
        scale: sp::Scale::xy_z(1., 3.),
        ..Default::default()
    })?
    .with_function(|t, x, y| {
        let r = x.hypot(y);
        (r - t).sin() / (1. + r / 4.)
    });

    let frames = surface.render_frames(sp::TimeRange {
        from: 0.,
        to: std::f64::consts::TAU,
        resolution: std::f64::consts::TAU / 8.,
    })?;

    let paint = sv::PaintParams::color_mapped(sv::builtin_color_maps::sunset(), -1.0..1.0);
    let mut target = sv::Target::new(sv::TargetKind::Raster, surface.params().viewport_size());
    for (i, frame) in frames.iter().enumerate() {
        sv::paint_surface(&mut target, frame, &paint);
        let path = format!("ripple_{i:02}.png");
        target.save(&path)?;
        println!("wrote {path} (t = {:.2})", frame.time);
    }

    Ok(())
}
