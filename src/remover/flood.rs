//! Edge-seeded flood fill remover
//!
//! Works well for product shots and scans with a roughly uniform backdrop.
//! The backdrop colour is guessed from the image border, then every pixel
//! connected to the border through backdrop-coloured pixels is cleared.

use super::BackgroundRemover;
use crate::error::Result;
use image::{DynamicImage, RgbaImage};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Border colours are bucketed by this step before voting
const BUCKET: u8 = 16;
/// How many of the most common border buckets count as background
const MAX_BACKGROUND_COLORS: usize = 3;
/// Runner-up buckets need at least 1/N of the top bucket's votes
const MIN_SHARE_OF_TOP: u32 = 4;

#[derive(Debug, Clone)]
pub struct EdgeFloodRemover {
    /// Max summed RGB difference for a pixel to count as background
    pub tolerance: u16,
    /// Extra distance over which boundary pixels fade instead of cutting hard
    pub edge_softness: u16,
}

impl Default for EdgeFloodRemover {
    fn default() -> Self {
        Self {
            tolerance: 40,
            edge_softness: 40,
        }
    }
}

impl EdgeFloodRemover {
    pub fn new(tolerance: u16, edge_softness: u16) -> Self {
        Self {
            tolerance,
            edge_softness,
        }
    }

    /// Summed distance to the closest background colour, or 0 for transparent pixels
    fn distance(&self, pixel: &image::Rgba<u8>, backgrounds: &[[u8; 3]]) -> u16 {
        if pixel[3] == 0 {
            return 0;
        }
        backgrounds
            .iter()
            .map(|bg| rgb_distance([pixel[0], pixel[1], pixel[2]], *bg))
            .min()
            .unwrap_or(u16::MAX)
    }
}

impl BackgroundRemover for EdgeFloodRemover {
    fn name(&self) -> &str {
        "edge-flood"
    }

    fn remove_background(&self, image: DynamicImage) -> Result<RgbaImage> {
        let mut img = image.to_rgba8();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Ok(img);
        }

        let backgrounds = dominant_border_colors(&img);
        let idx = |x: u32, y: u32| (y as usize) * (width as usize) + x as usize;
        let mut removed = vec![false; width as usize * height as usize];
        let mut queue = VecDeque::new();

        for (x, y) in border_pixels(width, height) {
            let i = idx(x, y);
            if !removed[i] && self.distance(img.get_pixel(x, y), &backgrounds) <= self.tolerance {
                removed[i] = true;
                queue.push_back((x, y));
            }
        }

        while let Some((x, y)) = queue.pop_front() {
            for (nx, ny) in neighbors(x, y, width, height) {
                let i = idx(nx, ny);
                if !removed[i]
                    && self.distance(img.get_pixel(nx, ny), &backgrounds) <= self.tolerance
                {
                    removed[i] = true;
                    queue.push_back((nx, ny));
                }
            }
        }

        let mut cleared = 0usize;
        let mut feathered = 0usize;
        for y in 0..height {
            for x in 0..width {
                if removed[idx(x, y)] {
                    img.get_pixel_mut(x, y)[3] = 0;
                    cleared += 1;
                    continue;
                }
                if self.edge_softness == 0
                    || !neighbors(x, y, width, height).any(|(nx, ny)| removed[idx(nx, ny)])
                {
                    continue;
                }
                let dist = self.distance(img.get_pixel(x, y), &backgrounds);
                let limit = self.tolerance + self.edge_softness;
                if dist < limit {
                    let keep =
                        dist.saturating_sub(self.tolerance) as u32 * 255 / self.edge_softness as u32;
                    let pixel = img.get_pixel_mut(x, y);
                    pixel[3] = (pixel[3] as u32).min(keep) as u8;
                    feathered += 1;
                }
            }
        }

        debug!(
            width,
            height,
            backgrounds = ?backgrounds,
            cleared,
            feathered,
            "Flood fill removal finished"
        );
        Ok(img)
    }
}

fn rgb_distance(a: [u8; 3], b: [u8; 3]) -> u16 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x as i16 - y as i16).unsigned_abs())
        .sum()
}

/// Most common bucketed colours along the border, most frequent first.
/// Each returned colour is the mean of its bucket.
fn dominant_border_colors(img: &RgbaImage) -> Vec<[u8; 3]> {
    let (width, height) = img.dimensions();
    let mut buckets: HashMap<[u8; 3], (u32, [u32; 3])> = HashMap::new();

    for (x, y) in border_pixels(width, height) {
        let p = img.get_pixel(x, y);
        if p[3] == 0 {
            continue;
        }
        let key = [p[0] / BUCKET, p[1] / BUCKET, p[2] / BUCKET];
        let entry = buckets.entry(key).or_insert((0, [0; 3]));
        entry.0 += 1;
        for c in 0..3 {
            entry.1[c] += p[c] as u32;
        }
    }

    let mut ranked: Vec<_> = buckets.into_iter().collect();
    // Ties broken by key so the choice does not depend on hash order
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.0.cmp(&b.0)));
    let top = ranked.first().map(|(_, (count, _))| *count).unwrap_or(0);
    ranked
        .into_iter()
        .take(MAX_BACKGROUND_COLORS)
        .filter(|(_, (count, _))| count * MIN_SHARE_OF_TOP >= top)
        .map(|(_, (count, sums))| {
            [
                (sums[0] / count) as u8,
                (sums[1] / count) as u8,
                (sums[2] / count) as u8,
            ]
        })
        .collect()
}

fn border_pixels(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let top_bottom = (0..width).flat_map(move |x| [(x, 0), (x, height - 1)]);
    let sides = (0..height).flat_map(move |y| [(0, y), (width - 1, y)]);
    top_bottom.chain(sides)
}

fn neighbors(x: u32, y: u32, width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let left = (x > 0).then(|| (x - 1, y));
    let right = (x + 1 < width).then(|| (x + 1, y));
    let up = (y > 0).then(|| (x, y - 1));
    let down = (y + 1 < height).then(|| (x, y + 1));
    [left, right, up, down].into_iter().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn subject_on_backdrop() -> RgbaImage {
        RgbaImage::from_fn(60, 40, |x, y| {
            if (20..40).contains(&x) && (10..30).contains(&y) {
                Rgba([200, 30, 30, 255])
            } else {
                Rgba([245, 245, 245, 255])
            }
        })
    }

    #[test]
    fn clears_backdrop_and_keeps_subject() {
        let remover = EdgeFloodRemover::default();
        let out = remover
            .remove_background(DynamicImage::ImageRgba8(subject_on_backdrop()))
            .unwrap();

        assert_eq!(out.dimensions(), (60, 40));
        assert_eq!(out.get_pixel(0, 0)[3], 0);
        assert_eq!(out.get_pixel(59, 39)[3], 0);
        assert_eq!(out.get_pixel(10, 20)[3], 0);
        assert_eq!(out.get_pixel(30, 20)[3], 255);
        assert_eq!(out.get_pixel(20, 10)[3], 255);
    }

    #[test]
    fn enclosed_backdrop_colour_survives() {
        // A white hole inside a ring is not connected to the border
        let img = RgbaImage::from_fn(30, 30, |x, y| {
            let ring = (5..25).contains(&x) && (5..25).contains(&y);
            let hole = (10..20).contains(&x) && (10..20).contains(&y);
            if ring && !hole {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let out = EdgeFloodRemover::default()
            .remove_background(DynamicImage::ImageRgba8(img))
            .unwrap();
        assert_eq!(out.get_pixel(0, 0)[3], 0);
        assert_eq!(out.get_pixel(15, 15)[3], 255);
        assert_eq!(out.get_pixel(7, 7)[3], 255);
    }

    #[test]
    fn uniform_image_becomes_transparent() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([12, 90, 140, 255]));
        let out = EdgeFloodRemover::default()
            .remove_background(DynamicImage::ImageRgba8(img))
            .unwrap();
        assert!(out.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn soft_edge_fades_near_colours() {
        // Black square with a light grey rim on a white backdrop
        let img = RgbaImage::from_fn(30, 30, |x, y| {
            let outer = (10..20).contains(&x) && (10..20).contains(&y);
            let inner = (11..19).contains(&x) && (11..19).contains(&y);
            if inner {
                Rgba([0, 0, 0, 255])
            } else if outer {
                Rgba([230, 230, 230, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let remover = EdgeFloodRemover::new(30, 60);
        let out = remover.remove_background(DynamicImage::ImageRgba8(img)).unwrap();
        let faded = out.get_pixel(10, 15)[3];
        assert!(faded > 0 && faded < 255, "alpha {}", faded);
        assert_eq!(out.get_pixel(15, 15)[3], 255);
        assert_eq!(out.get_pixel(5, 5)[3], 0);
    }

    #[test]
    fn rare_border_colours_are_not_background() {
        let mut img = subject_on_backdrop();
        // A dark object touching one border pixel
        for y in 0..12 {
            img.put_pixel(30, y, Rgba([20, 20, 20, 255]));
        }
        let out = EdgeFloodRemover::default()
            .remove_background(DynamicImage::ImageRgba8(img))
            .unwrap();
        assert_eq!(out.get_pixel(30, 0)[3], 255);
        assert_eq!(out.get_pixel(30, 5)[3], 255);
    }

    #[test]
    fn single_pixel_image() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 255]));
        let out = EdgeFloodRemover::default()
            .remove_background(DynamicImage::ImageRgba8(img))
            .unwrap();
        assert_eq!(out.get_pixel(0, 0)[3], 0);
    }
}
