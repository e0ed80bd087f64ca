//! A saddle surface viewed from a few different angles.
//!
//! Writes SVG documents by default;
//! pass a target kind (e.g. `png`) as the first argument to get bitmaps instead.

use surfplot as sp;
use surfplot::visuals as sv;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let kind: sv::TargetKind = match std::env::args().nth(1) {
        Some(name) => name.parse()?,
        None => sv::TargetKind::Vector,
    };
    let extension = match kind {
        sv::TargetKind::Raster => "png",
        sv::TargetKind::Vector => "svg",
    };

    let mut surface = sp::Surface::new(sp::SurfaceParams {
        domain: sp::Domain {
            x: sp::Interval::new(-3., 3.),
            y: sp::Interval::new(-3., 3.),
            resolution: sp::Resolution::uniform(0.25),
        },
        zoom: 50.,
        width: 500,
        height: 500,
        ..Default::default()
    })?
    .with_function(|_t, x, y| (x * x - y * y) / 4.);

    let mut target = sv::Target::new(kind, surface.params().viewport_size());

    for (name, request) in [
        ("default", sp::OrientRequest::default()),
        ("side", sp::OrientRequest::both(0., 1.4)),
        ("turned", sp::OrientRequest::yaw(2.)),
        // pitch beyond the limit gets clamped
        ("steep", sp::OrientRequest::pitch(10.)),
    ] {
        let orientation = surface.orient(request)?;
        let frame = surface.render(0.)?;

        let range = sv::avg_range(&frame).unwrap_or(0.0..1.0);
        let paint = sv::PaintParams::color_mapped(sv::builtin_color_maps::molentum(), range);
        sv::paint_surface(&mut target, &frame, &paint);

        let path = format!("saddle_{name}.{extension}");
        target.save(&path)?;
        println!(
            "wrote {path} (yaw {:.2}, pitch {:.2}, {} quads)",
            orientation.yaw,
            orientation.pitch,
            frame.quads.len()
        );
    }

    Ok(())
}
