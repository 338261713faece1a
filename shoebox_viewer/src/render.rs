// Render targets and the software rasteriser.
//
// `RenderTarget` is what a host hands back from a successful capability
// probe. `SoftwareTarget` is the built-in implementation: an f32 RGB
// accumulation buffer that every visible primitive is added into, converted
// to RGBA8 on demand. Lines are stepped one pixel at a time between
// consecutive projected vertices; points are splatted as small discs whose
// radius shrinks with distance. Blending is purely additive and scaled by
// each primitive's opacity, so overlapping strands brighten
// instead of occluding each other.
//
// See also: `camera.rs` in `shoebox_scene` for the projection,
// `scene.rs` there for `visit_transformed`.

use std::io::{self, Write};
use std::path::Path;

use glam::{Mat4, Vec2, Vec3};
use shoebox_scene::assemble::World;
use shoebox_scene::camera::Camera;
use shoebox_scene::input::Viewport;
use shoebox_scene::palette::Rgb;
use shoebox_scene::scene::{Primitive, PrimitiveKind};

/// Clear colour behind the scene (deep blue-black).
pub const BACKGROUND: Rgb = Rgb::new(0.02, 0.027, 0.047);

pub trait RenderTarget {
    /// Reallocate the output for a new viewport. Contents are discarded.
    fn resize(&mut self, viewport: Viewport);
    fn viewport(&self) -> Viewport;
    /// Clear and draw every primitive of `world` with non-zero opacity.
    fn draw(&mut self, world: &World, camera: &Camera);
    /// Current frame as tightly packed RGBA8, row-major from the top-left.
    fn rgba8(&self) -> Vec<u8>;
}

#[derive(Clone, Debug)]
pub struct SoftwareTarget {
    viewport: Viewport,
    accum: Vec<[f32; 3]>,
}

impl SoftwareTarget {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            accum: vec![[0.0; 3]; pixel_count(viewport)],
        }
    }

    fn clear(&mut self) {
        self.accum.fill([0.0; 3]);
    }

    fn add(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 || x >= self.viewport.width as i32 || y >= self.viewport.height as i32 {
            return;
        }
        let idx = y as usize * self.viewport.width as usize + x as usize;
        let px = &mut self.accum[idx];
        for c in 0..3 {
            px[c] += color.0[c];
        }
    }

    fn draw_segment(&mut self, a: Vec2, b: Vec2, color: Rgb) {
        let steps = (b - a).abs().max_element().ceil().max(1.0) as u32;
        for s in 0..=steps {
            let p = a.lerp(b, s as f32 / steps as f32);
            self.add(p.x as i32, p.y as i32, color);
        }
    }

    fn draw_disc(&mut self, center: Vec2, radius: f32, color: Rgb) {
        let r = radius.max(0.5);
        let reach = r.ceil() as i32;
        let (cx, cy) = (center.x as i32, center.y as i32);
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if ((dx * dx + dy * dy) as f32) <= r * r {
                    self.add(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn draw_primitive(&mut self, prim: &Primitive, model: Mat4, camera: &Camera, view_proj: Mat4) {
        let mvp = view_proj * model;
        let vp = self.viewport;
        match prim.kind {
            PrimitiveKind::Line => {
                let mut prev: Option<Vec2> = None;
                for i in 0..prim.positions.len() {
                    let here = camera.project(&mvp, prim.positions[i], vp);
                    if let (Some(a), Some(b)) = (prev, here) {
                        let color = prim.color_at(i - 1).lerp(prim.color_at(i), 0.5);
                        self.draw_segment(a, b, color.scale(prim.opacity));
                    }
                    prev = here;
                }
            }
            PrimitiveKind::Points => {
                let focal = vp.height as f32 / (2.0 * (camera.fov_y * 0.5).tan());
                for (i, &p) in prim.positions.iter().enumerate() {
                    let Some(px) = camera.project(&mvp, p, vp) else {
                        continue;
                    };
                    let world_pos: Vec3 = model.transform_point3(p);
                    let depth = world_pos.distance(camera.position).max(camera.near);
                    let radius = prim.point_size * focal / depth * 0.5;
                    self.draw_disc(px, radius, prim.color_at(i).scale(prim.opacity));
                }
            }
        }
    }

    /// Write the current frame as a binary PPM (P6).
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_ppm(out, self.viewport, &self.rgba8())
    }
}

impl RenderTarget for SoftwareTarget {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.accum = vec![[0.0; 3]; pixel_count(viewport)];
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn draw(&mut self, world: &World, camera: &Camera) {
        self.clear();
        let view_proj = camera.view_projection();
        world.root.visit_transformed(Mat4::IDENTITY, &mut |prim, model| {
            if prim.opacity > 0.0 {
                self.draw_primitive(prim, model, camera, view_proj);
            }
        });
    }

    fn rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.accum.len() * 4);
        for px in &self.accum {
            for c in 0..3 {
                out.push(to_byte(BACKGROUND.0[c] + px[c]));
            }
            out.push(255);
        }
        out
    }
}

fn pixel_count(viewport: Viewport) -> usize {
    viewport.width as usize * viewport.height as usize
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Encode RGBA8 pixels as a binary PPM, dropping alpha.
pub fn write_ppm<W: Write>(out: &mut W, viewport: Viewport, rgba: &[u8]) -> io::Result<()> {
    if rgba.len() != pixel_count(viewport) * 4 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "expected {} bytes for {}x{}, got {}",
                pixel_count(viewport) * 4,
                viewport.width,
                viewport.height,
                rgba.len()
            ),
        ));
    }
    write!(out, "P6\n{} {}\n255\n", viewport.width, viewport.height)?;
    let rgb: Vec<u8> = rgba.chunks_exact(4).flat_map(|px| [px[0], px[1], px[2]]).collect();
    out.write_all(&rgb)
}

pub fn save_ppm(path: &Path, viewport: Viewport, rgba: &[u8]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_ppm(&mut file, viewport, rgba)?;
    file.flush()
}
