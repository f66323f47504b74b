//! Browser 2D canvas backend

use std::f64::consts::TAU;

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{FrameRect, Resources, Surface};
use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::entity::{Color, Size, TextAlign};

/// Image sheets the game draws, by resource id
pub const IMAGES: &[(&str, &str)] = &[
    ("logo", "assets/logo.png"),
    ("room", "assets/room.png"),
    ("sea_head", "assets/sea_head.png"),
    ("sea_fire", "assets/sea_fire.png"),
    ("sea_arrow", "assets/sea_arrow.png"),
    ("sea_body", "assets/sea_body.png"),
    ("sea_arm_l", "assets/sea_arm_l.png"),
    ("sea_arm_r", "assets/sea_arm_r.png"),
    ("sea_leg_l", "assets/sea_leg_l.png"),
    ("sea_leg_r", "assets/sea_leg_r.png"),
    ("enemy_head", "assets/enemy_head.png"),
    ("enemy_body", "assets/enemy_body.png"),
    ("crash", "assets/crash.png"),
    ("fog", "assets/fog.png"),
    ("fuel", "assets/fuel.png"),
    ("life", "assets/life.png"),
];

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: Resources<HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        let mut images = Resources::new();
        for (id, src) in IMAGES {
            match HtmlImageElement::new() {
                Ok(image) => {
                    image.set_src(src);
                    images.insert(*id, image);
                }
                Err(_) => log::warn!("Could not create image element for {id}"),
            }
        }
        Self {
            canvas,
            ctx,
            images,
        }
    }

    /// Clear and scale the logical viewport onto the canvas
    pub fn begin_frame(&mut self) {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(0.0, 0.0, width, height);
        let _ = self.ctx.scale(
            width / VIEWPORT_WIDTH as f64,
            height / VIEWPORT_HEIGHT as f64,
        );
    }

    fn set_color(&self, color: Color) {
        let css = color.to_css();
        self.ctx.set_fill_style_str(&css);
        self.ctx.set_stroke_style_str(&css);
    }
}

impl Surface for CanvasSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        let _ = self.ctx.rotate(radians as f64);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Size, color: Color) {
        self.set_color(color);
        self.ctx.fill_rect(
            origin.x as f64,
            origin.y as f64,
            size.width as f64,
            size.height as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.set_color(color);
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.set_color(color);
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.stroke();
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.set_color(color);
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn image(&mut self, id: &str, frame: Option<FrameRect>, origin: Vec2, size: Size, alpha: f32) {
        let Some(image) = self.images.get(id) else {
            return;
        };
        if !image.complete() {
            return;
        }
        self.ctx.set_global_alpha(alpha as f64);
        let (dx, dy) = (origin.x as f64, origin.y as f64);
        let (dw, dh) = (size.width as f64, size.height as f64);
        let _ = match frame {
            Some(f) => self
                .ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    image,
                    f.x as f64,
                    f.y as f64,
                    f.width as f64,
                    f.height as f64,
                    dx,
                    dy,
                    dw,
                    dh,
                ),
            None => self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(image, dx, dy, dw, dh),
        };
        self.ctx.set_global_alpha(1.0);
    }

    fn text(&mut self, text: &str, at: Vec2, size: f32, align: TextAlign, color: Color) {
        self.set_color(color);
        self.ctx.set_font(&format!("{}px sans-serif", size.round()));
        self.ctx.set_text_align(align.as_str());
        let _ = self.ctx.fill_text(text, at.x as f64, at.y as f64);
    }
}
