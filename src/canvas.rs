use crate::css;
use ambience_core::{RadialGradient, Surface};
use glam::Vec2;
use web_sys as web;

/// 2D canvas target for the blob field.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, extent: Vec2) {
        self.ctx
            .clear_rect(0.0, 0.0, extent.x as f64, extent.y as f64);
    }

    fn fill_radial(&mut self, gradient: &RadialGradient) {
        let c = gradient.center;
        let grad = match self.ctx.create_radial_gradient(
            c.x as f64,
            c.y as f64,
            0.0,
            c.x as f64,
            c.y as f64,
            gradient.radius as f64,
        ) {
            Ok(g) => g,
            Err(e) => {
                log::error!("createRadialGradient error: {:?}", e);
                return;
            }
        };
        for stop in &gradient.stops {
            if let Err(e) = grad.add_color_stop(stop.offset, &css::rgba(stop.rgb, stop.alpha)) {
                log::error!("addColorStop error: {:?}", e);
                return;
            }
        }
        self.ctx.set_fill_style_canvas_gradient(&grad);
        let (origin, side) = gradient.bounds();
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, side as f64, side as f64);
    }
}
