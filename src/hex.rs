// src/hex.rs
//! Геометрия гексагональной сетки
//!
//! Осевые координаты `(q, r)` с неявной третьей координатой `s = -q - r`.
//! Карта радиуса `N` — замкнутая шестиугольная область
//! `|q| ≤ N ∧ |r| ≤ N ∧ |q + r| ≤ N`, в ней ровно `3N² + 3N + 1` тайлов.
//!
//! Проекция в плоскость — раскладка «pointy-top» (вершина гекса смотрит вдоль
//! оси `z`). Она не зависит от генерации и нужна слоям отображения для
//! размещения тайлов и любых объектов на них.

use serde::{Deserialize, Serialize};

/// Смещения шести соседей в осевых координатах
pub const AXIAL_DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// Осевая координата тайла
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

impl Axial {
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Третья кубическая координата
    #[must_use]
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    /// Шесть соседних координат (без проверки границ карты)
    #[must_use]
    pub fn neighbors(self) -> [Axial; 6] {
        AXIAL_DIRECTIONS.map(|(dq, dr)| Axial::new(self.q + dq, self.r + dr))
    }

    /// Расстояние в шагах по сетке
    #[must_use]
    pub fn distance(self, other: Axial) -> i32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        dq.max(dr).max(ds)
    }

    /// Лежит ли координата внутри карты радиуса `radius`
    #[must_use]
    pub fn within(self, radius: i32) -> bool {
        self.q.abs() <= radius && self.r.abs() <= radius && self.s().abs() <= radius
    }
}

impl From<(i32, i32)> for Axial {
    fn from((q, r): (i32, i32)) -> Self {
        Self { q, r }
    }
}

/// Количество тайлов в карте радиуса `radius`: `3N² + 3N + 1`
#[must_use]
pub fn tile_count(radius: u32) -> usize {
    let n = radius as usize;
    3 * n * n + 3 * n + 1
}

/// Перечисляет все координаты шестиугольной карты радиуса `radius`
///
/// Порядок: внешний цикл по `q` по возрастанию, внутренний по `r` по возрастанию.
/// На порядок можно опираться только ради воспроизводимости обхода в тестах.
///
/// ```
/// use hexmapgen::hex::{hex_grid, Axial};
///
/// let grid = hex_grid(1);
/// assert_eq!(grid.len(), 7);
/// assert_eq!(grid[0], Axial::new(-1, 0));
/// ```
#[must_use]
pub fn hex_grid(radius: u32) -> Vec<Axial> {
    let n = radius as i32;
    let mut coords = Vec::with_capacity(tile_count(radius));
    for q in -n..=n {
        let r1 = (-n).max(-q - n);
        let r2 = n.min(-q + n);
        for r in r1..=r2 {
            coords.push(Axial::new(q, r));
        }
    }
    coords
}

/// Переводит осевые координаты в плоские `(x, z)` для раскладки pointy-top
///
/// `x = size·√3·(q + r/2)`, `z = size·1.5·r`.
///
/// ```
/// use hexmapgen::hex::axial_to_point;
///
/// assert_eq!(axial_to_point(0, 0, 1.0), (0.0, 0.0));
/// assert_eq!(axial_to_point(0, 1, 1.0), (3.0_f64.sqrt() / 2.0, 1.5));
/// ```
#[must_use]
pub fn axial_to_point(q: i32, r: i32, size: f64) -> (f64, f64) {
    let x = size * 3.0_f64.sqrt() * (f64::from(q) + f64::from(r) / 2.0);
    let z = size * 1.5 * f64::from(r);
    (x, z)
}

/// Шесть вершин гекса pointy-top с центром `center` (по часовой от верхней правой)
#[must_use]
pub fn hex_corners(center: (f64, f64), size: f64) -> [(f64, f64); 6] {
    std::array::from_fn(|i| {
        let angle = (60.0 * i as f64 - 30.0).to_radians();
        (center.0 + size * angle.cos(), center.1 + size * angle.sin())
    })
}
