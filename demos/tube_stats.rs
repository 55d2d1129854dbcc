//! Sweeps a circle and a square along a torus knot, tessellates both and
//! logs how frame queries were served.
//!
//! ```text
//! RUST_LOG=tubeframe=trace cargo run --example tube_stats
//! ```

use tracing::info;
use tubeframe::geometry::curve::{RegularPolygon, TorusKnot};
use tubeframe::tessellation::{TessellateSurface, TessellationParams};
use tubeframe::{Result, Tube};

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("tube_stats=info".parse().unwrap_or_default())
        .add_directive("tubeframe=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let params = TessellationParams::new(300, 24);

    let round = Tube::new(TorusKnot::new(2, 3, 2.0, 0.8)?, 0.25)?;
    let mesh = TessellateSurface::new(params).execute(&round)?;
    info!(
        triangles = mesh.triangle_count(),
        area = mesh.area(),
        twist = round.frames().twist_angle(),
        stats = ?round.stats(),
        "round tube"
    );

    let square = Tube::new(TorusKnot::new(3, 5, 2.0, 0.6)?, 0.2)?
        .with_cross_section(RegularPolygon::new(4, 1.0)?);
    let mesh = TessellateSurface::new(params).execute(&square)?;
    info!(
        triangles = mesh.triangle_count(),
        area = mesh.area(),
        stats = ?square.stats(),
        "square tube"
    );

    Ok(())
}
