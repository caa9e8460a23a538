use std::time::Instant;

use druid::widget::prelude::*;
use druid::{Application, Code, Point, Widget};
use log::{debug, error};

use crate::gui::convert_frame;
use crate::stats::Stats;
use crate::{FrameBuffer, Mandelbrot};

/// Redraws the whole view on every animation frame.
///
/// Left drag pans, right drag zooms, `r` resets the view, `q` and Escape quit.
pub struct MandelbrotWidget {
    mandelbrot: Mandelbrot,
    frame: FrameBuffer,
    stats: Stats,
    last_mouse: Option<Point>,
}

impl MandelbrotWidget {
    pub fn new(mandelbrot: Mandelbrot) -> Self {
        Self {
            mandelbrot,
            frame: FrameBuffer::new(0, 0),
            stats: Stats::default(),
            last_mouse: None,
        }
    }

    fn resize(&mut self, size: Size) -> bool {
        let width = f64::round(size.width) as usize;
        let height = f64::round(size.height) as usize;
        self.frame.resize(width, height)
    }

    fn drag(&mut self, pos: Point, left: bool, right: bool) {
        let last = self.last_mouse.replace(pos);
        let last = match last {
            Some(last) => last,
            None => return,
        };
        let (width, height) = (self.frame.width(), self.frame.height());
        if width == 0 || height == 0 {
            return;
        }
        let dx = (pos.x - last.x) as f32;
        let dy = (pos.y - last.y) as f32;
        if left {
            self.mandelbrot.pan(dx, dy, width, height);
        }
        if right {
            self.mandelbrot.zoom(dy, height);
        }
    }

    fn render(&mut self, ctx: &mut EventCtx) {
        if let Err(e) = self.mandelbrot.render(&mut self.frame) {
            error!("render failed: {}", e);
            return;
        }
        self.stats
            .record_frame(self.frame.width(), self.frame.height());
        let frame_pixels = self.frame.width() * self.frame.height();
        if let Some(report) = self.stats.poll(Instant::now(), frame_pixels) {
            ctx.window().set_title(&report.to_string());
        }
    }
}

impl Widget<()> for MandelbrotWidget {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, _data: &mut (), _env: &Env) {
        match event {
            Event::AnimFrame(_) => {
                self.render(ctx);
                ctx.request_paint();
                ctx.request_anim_frame();
            }
            Event::KeyDown(key_event) => match key_event.code {
                Code::KeyQ | Code::Escape => {
                    debug!("quit");
                    Application::global().quit();
                }
                Code::KeyR => self.mandelbrot.reset(),
                _ => (),
            },
            Event::MouseDown(mouse) => {
                ctx.set_active(true);
                self.last_mouse = Some(mouse.pos);
            }
            Event::MouseMove(mouse) => {
                if !ctx.is_focused() {
                    ctx.request_focus();
                }
                if ctx.is_active() {
                    self.drag(mouse.pos, mouse.buttons.has_left(), mouse.buttons.has_right());
                }
            }
            Event::MouseUp(mouse) => {
                if mouse.buttons.is_empty() {
                    ctx.set_active(false);
                    self.last_mouse = None;
                }
            }
            _ => (),
        }
    }

    fn lifecycle(&mut self, ctx: &mut LifeCycleCtx, event: &LifeCycle, _data: &(), _env: &Env) {
        match event {
            LifeCycle::WidgetAdded => {
                ctx.register_for_focus();
                self.resize(ctx.size());
                ctx.request_anim_frame();
            }
            LifeCycle::Size(size) => {
                self.resize(*size);
            }
            _ => (),
        }
    }

    fn update(&mut self, _ctx: &mut UpdateCtx, _old_data: &(), _new_data: &(), _env: &Env) {}

    fn layout(
        &mut self,
        _ctx: &mut LayoutCtx,
        bc: &BoxConstraints,
        _data: &(),
        _env: &Env,
    ) -> Size {
        bc.max()
    }

    fn paint(&mut self, ctx: &mut PaintCtx, _: &(), _env: &Env) {
        let size = ctx.size();
        if self.resize(size) || self.frame.width() == 0 || self.frame.height() == 0 {
            return;
        }
        let image_buf = convert_frame(&self.frame);
        let ctx_image = image_buf.to_image(ctx.render_ctx);
        ctx.draw_image(
            &ctx_image,
            size.to_rect(),
            druid::piet::InterpolationMode::NearestNeighbor,
        );
    }
}
