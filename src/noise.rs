// src/noise.rs
//! Когерентный шум для поля высот
//!
//! Поле шума строится один раз на каждый вызов генерации и засевается только
//! через [`SeedRng`](crate::rng::SeedRng). Использовать глобальный источник
//! случайности здесь нельзя: это ломает воспроизводимость карт.
//!
//! Два бэкенда:
//! - [`SimplexField`] — двумерный симплекс-шум с таблицей перестановок,
//!   перемешанной внедрённым поставщиком `FnMut() -> f64`. Используется по
//!   умолчанию, на нём зафиксированы эталонные значения.
//! - [`FractalField`] — fBm на базе `fastnoise-lite` (OpenSimplex2), сид
//!   которого берётся из того же `SeedRng`.

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use serde::{Deserialize, Serialize};

use crate::config::FractalSettings;
use crate::rng::SeedRng;

/// Двумерное поле шума: непрерывная функция плоскости, значения примерно в `[-1, 1]`
pub trait NoiseField: Send + Sync {
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Выбор бэкенда шума в конфигурации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NoiseKind {
    /// Симплекс-шум с таблицей перестановок от `SeedRng` (совместим с эталонами)
    #[default]
    Simplex,
    /// Многооктавный шум `fastnoise-lite`
    Fractal,
}

const TABLE_SIZE: usize = 512;

/// Градиенты для двумерного симплекса: пары `(gx, gy)`, индекс — `perm % 12`
const GRADIENTS: [[f64; 2]; 12] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

/// Двумерный симплекс-шум
///
/// # Пример
/// ```
/// use hexmapgen::noise::{NoiseField, SimplexField};
/// use hexmapgen::rng::SeedRng;
///
/// let mut rng = SeedRng::new("abc");
/// let field = SimplexField::new(|| rng.next_f64());
/// assert_eq!(field.sample(0.0, 0.0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimplexField {
    perm: [u8; TABLE_SIZE],
    /// Масштаб перекоса координат в симплексную решётку
    f2: f64,
    /// Обратный перекос
    g2: f64,
}

impl SimplexField {
    /// Строит поле, перемешивая таблицу перестановок значениями из `random`
    ///
    /// `random` должен возвращать значения из `[0, 1)`; вызывается ровно 255 раз.
    pub fn new<F>(mut random: F) -> Self
    where
        F: FnMut() -> f64,
    {
        let mut perm = [0u8; TABLE_SIZE];
        for (i, p) in perm.iter_mut().take(256).enumerate() {
            *p = i as u8;
        }
        for i in 0..255 {
            let offset = (random() * (256 - i) as f64) as usize;
            // Защита от поставщика, вернувшего ровно 1.0
            let r = (i + offset).min(255);
            perm.swap(i, r);
        }
        for i in 256..TABLE_SIZE {
            perm[i] = perm[i - 256];
        }

        let sqrt3 = 3.0_f64.sqrt();
        Self {
            perm,
            f2: 0.5 * (sqrt3 - 1.0),
            g2: (3.0 - sqrt3) / 6.0,
        }
    }

    /// Строит поле напрямую из генератора
    pub fn from_rng(rng: &mut SeedRng) -> Self {
        Self::new(|| rng.next_f64())
    }

    #[inline]
    fn gradient(&self, index: usize) -> [f64; 2] {
        GRADIENTS[usize::from(self.perm[index]) % 12]
    }

    #[inline]
    fn corner(&self, x: f64, y: f64, index: usize) -> f64 {
        let mut t = 0.5 - x * x - y * y;
        if t < 0.0 {
            return 0.0;
        }
        let [gx, gy] = self.gradient(index);
        t *= t;
        t * t * (gx * x + gy * y)
    }

    /// Фрактальная сумма нескольких октав, нормированная к `[-1, 1]`
    #[must_use]
    pub fn octaved(&self, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves {
            total += self.sample(x * frequency, y * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        if max_amplitude > 0.0 {
            total / max_amplitude
        } else {
            0.0
        }
    }
}

impl NoiseField for SimplexField {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let skew = (x + y) * self.f2;
        let i = (x + skew).floor() as i32;
        let j = (y + skew).floor() as i32;

        let unskew = f64::from(i + j) * self.g2;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);

        // Верхний или нижний треугольник ячейки
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1) + self.g2;
        let y1 = y0 - f64::from(j1) + self.g2;
        let x2 = x0 - 1.0 + 2.0 * self.g2;
        let y2 = y0 - 1.0 + 2.0 * self.g2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let i1 = i1 as usize;
        let j1 = j1 as usize;

        let n0 = self.corner(x0, y0, ii + usize::from(self.perm[jj]));
        let n1 = self.corner(x1, y1, ii + i1 + usize::from(self.perm[jj + j1]));
        let n2 = self.corner(x2, y2, ii + 1 + usize::from(self.perm[jj + 1]));

        70.0 * (n0 + n1 + n2)
    }
}

/// Многооктавный шум на базе `fastnoise-lite`
pub struct FractalField {
    noise: FastNoiseLite,
}

impl FractalField {
    /// Засевает `FastNoiseLite` числом из `rng` и настраивает fBm
    pub fn new(rng: &mut SeedRng, settings: &FractalSettings) -> Self {
        let mut noise = FastNoiseLite::new();
        noise.set_seed(Some(rng.step() as i32));
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(settings.octaves));
        noise.set_fractal_lacunarity(Some(settings.lacunarity));
        noise.set_fractal_gain(Some(settings.gain));
        // Координаты уже поделены на масштаб, частота задаётся им
        noise.set_frequency(Some(1.0));
        Self { noise }
    }
}

impl NoiseField for FractalField {
    fn sample(&self, x: f64, y: f64) -> f64 {
        f64::from(self.noise.get_noise_2d(x as f32, y as f32))
    }
}

/// Создаёт поле шума выбранного типа, потребляя значения из `rng`
pub fn build_noise_field(
    kind: NoiseKind,
    rng: &mut SeedRng,
    fractal: &FractalSettings,
) -> Box<dyn NoiseField> {
    match kind {
        NoiseKind::Simplex => Box::new(SimplexField::from_rng(rng)),
        NoiseKind::Fractal => Box::new(FractalField::new(rng, fractal)),
    }
}
