//! Shape primitives
//!
//! Every primitive is drawn opaque onto a layer surface, overwriting what is
//! underneath. Layer opacity is applied later, when layers are composited.

use crate::error::Error;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use rand::Rng;
use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// Number of straight segments used to approximate a curve
const CURVE_SEGMENTS: usize = 24;

/// The primitive a layer repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Lines,
    Circles,
    Squares,
    HollowPolygons,
    FilledPolygons,
    Dots,
    Curves,
    Rings,
}

impl Shape {
    pub const ALL: [Shape; 8] = [
        Shape::Lines,
        Shape::Circles,
        Shape::Squares,
        Shape::HollowPolygons,
        Shape::FilledPolygons,
        Shape::Dots,
        Shape::Curves,
        Shape::Rings,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Shape::Lines => "Lines",
            Shape::Circles => "Circles",
            Shape::Squares => "Squares",
            Shape::HollowPolygons => "Hollow Polygons",
            Shape::FilledPolygons => "Filled Polygons",
            Shape::Dots => "Dots",
            Shape::Curves => "Curves",
            Shape::Rings => "Rings",
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Draw one primitive
    ///
    /// # Arguments
    /// * `canvas` - Layer surface to draw on
    /// * `centre` - Centre of the primitive in canvas coordinates
    /// * `size` - Bounding extent in pixels (diameter, side or length)
    /// * `color` - Opaque fill/stroke color
    /// * `rng` - Random source for orientation and jitter
    pub fn draw(
        self,
        canvas: &mut RgbaImage,
        centre: (f32, f32),
        size: f32,
        color: Rgba<u8>,
        rng: &mut impl Rng,
    ) {
        let size = size.max(1.0);
        let radius = size / 2.0;
        let (cx, cy) = centre;

        match self {
            Shape::Lines => {
                let angle = rng.gen_range(0.0..TAU);
                let (dx, dy) = (angle.cos() * radius, angle.sin() * radius);
                stroke_segment(
                    canvas,
                    (cx - dx, cy - dy),
                    (cx + dx, cy + dy),
                    stroke_width(size),
                    color,
                );
            }

            Shape::Circles => {
                draw_filled_circle_mut(canvas, to_pixel(centre), radius.round() as i32, color);
            }

            Shape::Squares => {
                let side = size.round() as u32;
                let rect = Rect::at((cx - radius).round() as i32, (cy - radius).round() as i32)
                    .of_size(side.max(1), side.max(1));
                draw_filled_rect_mut(canvas, rect, color);
            }

            Shape::HollowPolygons => {
                let vertices = polygon_vertices(centre, radius, rng);
                let width = stroke_width(size);
                for (i, &start) in vertices.iter().enumerate() {
                    let end = vertices[(i + 1) % vertices.len()];
                    stroke_segment(canvas, start, end, width, color);
                }
            }

            Shape::FilledPolygons => {
                let vertices = polygon_vertices(centre, radius, rng);
                fill_polygon(canvas, &vertices, color);
            }

            Shape::Dots => {
                let dot_radius = (size / 20.0).max(2.0).round() as i32;
                for dot in scatter_dots(centre, radius, rng) {
                    draw_filled_circle_mut(canvas, to_pixel(dot), dot_radius, color);
                }
            }

            Shape::Curves => {
                let mut control = || {
                    (
                        cx + rng.gen_range(-radius..=radius),
                        cy + rng.gen_range(-radius..=radius),
                    )
                };
                let points = [control(), control(), control(), control()];
                let width = stroke_width(size);

                let mut previous = points[0];
                for step in 1..=CURVE_SEGMENTS {
                    let next = cubic_bezier(&points, step as f32 / CURVE_SEGMENTS as f32);
                    stroke_segment(canvas, previous, next, width, color);
                    previous = next;
                }
            }

            Shape::Rings => {
                let thickness = ring_thickness(radius, rng);
                fill_annulus(canvas, centre, radius - thickness, radius, color);
            }
        }
    }
}

fn stroke_width(size: f32) -> f32 {
    (size / 20.0).max(2.0)
}

/// 5 to 15 dot centres spread uniformly over the disc of `radius`
fn scatter_dots(centre: (f32, f32), radius: f32, rng: &mut impl Rng) -> Vec<(f32, f32)> {
    let count = rng.gen_range(5..=15);
    (0..count)
        .map(|_| {
            // sqrt keeps the scatter uniform over the disc
            let angle = rng.gen_range(0.0..TAU);
            let dist = rng.r#gen::<f32>().sqrt() * radius;
            (centre.0 + angle.cos() * dist, centre.1 + angle.sin() * dist)
        })
        .collect()
}

/// Ring band width, 10-30% of the outer radius
fn ring_thickness(radius: f32, rng: &mut impl Rng) -> f32 {
    (radius * rng.gen_range(0.1f32..=0.3)).max(1.0)
}

fn to_pixel((x, y): (f32, f32)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

/// 3 to 7 vertices around `centre` at jittered angles and radii
fn polygon_vertices(centre: (f32, f32), radius: f32, rng: &mut impl Rng) -> Vec<(f32, f32)> {
    let sides = rng.gen_range(3..=7);
    let slice = TAU / sides as f32;
    let start = rng.gen_range(0.0..TAU);

    (0..sides)
        .map(|i| {
            let angle = start + i as f32 * slice + rng.gen_range(-0.25f32..=0.25) * slice;
            let r = radius * rng.gen_range(0.6f32..=1.0);
            (centre.0 + angle.cos() * r, centre.1 + angle.sin() * r)
        })
        .collect()
}

fn cubic_bezier(p: &[(f32, f32); 4], t: f32) -> (f32, f32) {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        a * p[0].0 + b * p[1].0 + c * p[2].0 + d * p[3].0,
        a * p[0].1 + b * p[1].1 + c * p[2].1 + d * p[3].1,
    )
}

/// Thick segment with round caps
fn stroke_segment(
    canvas: &mut RgbaImage,
    start: (f32, f32),
    end: (f32, f32),
    width: f32,
    color: Rgba<u8>,
) {
    let half = width / 2.0;
    let cap = half.round().max(1.0) as i32;
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let len = (dx * dx + dy * dy).sqrt();

    if len >= 1.0 {
        let (nx, ny) = (-dy / len * half, dx / len * half);
        let quad = [
            (start.0 + nx, start.1 + ny),
            (end.0 + nx, end.1 + ny),
            (end.0 - nx, end.1 - ny),
            (start.0 - nx, start.1 - ny),
        ];
        fill_polygon(canvas, &quad, color);
    }

    draw_filled_circle_mut(canvas, to_pixel(start), cap, color);
    draw_filled_circle_mut(canvas, to_pixel(end), cap, color);
}

/// Fill a polygon, skipping outlines that collapse after rounding
///
/// `draw_polygon_mut` rejects a closing point equal to the first one, so
/// repeated vertices are dropped before handing the outline over.
fn fill_polygon(canvas: &mut RgbaImage, vertices: &[(f32, f32)], color: Rgba<u8>) {
    let mut points: Vec<Point<i32>> = Vec::with_capacity(vertices.len());
    for &vertex in vertices {
        let (x, y) = to_pixel(vertex);
        let point = Point::new(x, y);
        if points.last() != Some(&point) {
            points.push(point);
        }
    }
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    if points.len() >= 3 {
        draw_polygon_mut(canvas, &points, color);
    }
}

/// Fill every pixel whose centre lies between the two radii
fn fill_annulus(
    canvas: &mut RgbaImage,
    centre: (f32, f32),
    inner: f32,
    outer: f32,
    color: Rgba<u8>,
) {
    let (width, height) = canvas.dimensions();
    let inner_sq = inner.max(0.0).powi(2);
    let outer_sq = outer.powi(2);

    let x0 = (centre.0 - outer).floor().max(0.0) as u32;
    let y0 = (centre.1 - outer).floor().max(0.0) as u32;
    let x1 = ((centre.0 + outer).ceil().max(0.0) as u32).min(width);
    let y1 = ((centre.1 + outer).ceil().max(0.0) as u32).min(height);

    for y in y0..y1 {
        let dy = y as f32 + 0.5 - centre.1;
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - centre.0;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq >= inner_sq && dist_sq <= outer_sq {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownShape(s.to_string()))
    }
}
