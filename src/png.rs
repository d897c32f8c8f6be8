// src/png.rs
//! Визуализация гекс-карты в изображение
//!
//! Отладочное превью: каждый тайл рисуется залитым гексом pointy-top в цвете
//! своего типа рельефа. Раскладка совпадает с [`axial_to_point`], так что
//! картинка соответствует тому, что строит слой отображения.

use image::{ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

use crate::error::{MapGenError, Result};
use crate::hex::{axial_to_point, hex_corners};
use crate::map::HexMap;

/// Минимальный размер гекса в пикселях, при котором полигон не вырождается
pub const MIN_HEX_PX: f64 = 3.0;

/// Наибольшая сторона превью в пикселях
pub const MAX_PREVIEW_PX: u32 = 16_384;

/// Цвет фона (прозрачный)
const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Рисует карту; `hex_px` — радиус описанной окружности гекса в пикселях
///
/// Нечисловой или неположительный `hex_px` и изображение со стороной больше
/// [`MAX_PREVIEW_PX`] отклоняются ошибкой.
pub fn render_preview(map: &HexMap, hex_px: f64) -> Result<RgbaImage> {
    if !hex_px.is_finite() || hex_px <= 0.0 {
        return Err(MapGenError::InvalidHexSize(hex_px));
    }
    let size = hex_px.max(MIN_HEX_PX);

    let centers: Vec<(f64, f64)> = map
        .tiles
        .iter()
        .map(|tile| axial_to_point(tile.q, tile.r, size))
        .collect();
    if centers.is_empty() {
        return Ok(ImageBuffer::from_pixel(1, 1, BACKGROUND));
    }

    let (min_x, max_x, min_z, max_z) = centers.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(min_x, max_x, min_z, max_z), &(x, z)| (min_x.min(x), max_x.max(x), min_z.min(z), max_z.max(z)),
    );

    let width = (max_x - min_x + 2.0 * size).ceil() + 1.0;
    let height = (max_z - min_z + 2.0 * size).ceil() + 1.0;
    if width > f64::from(MAX_PREVIEW_PX) || height > f64::from(MAX_PREVIEW_PX) {
        return Err(MapGenError::PreviewTooLarge {
            width,
            height,
            max: MAX_PREVIEW_PX,
        });
    }
    let offset = (size - min_x, size - min_z);

    let mut img = ImageBuffer::from_pixel(width as u32, height as u32, BACKGROUND);
    for (tile, &(x, z)) in map.tiles.iter().zip(&centers) {
        let corners = hex_corners((x + offset.0, z + offset.1), size);
        let polygon: Vec<Point<i32>> = corners
            .iter()
            .map(|&(cx, cz)| Point::new(cx.round() as i32, cz.round() as i32))
            .collect();
        let [r, g, b] = tile.terrain.color(tile.elevation);
        draw_polygon_mut(&mut img, &polygon, Rgba([r, g, b, 255]));
    }
    Ok(img)
}

/// Сохраняет превью карты в PNG-файл
pub fn save_preview_png(map: &HexMap, hex_px: f64, path: &str) -> Result<()> {
    render_preview(map, hex_px)?.save(path)?;
    Ok(())
}
