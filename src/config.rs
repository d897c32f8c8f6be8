// src/config.rs
//! Конфигурация генерации гекс-карты
//!
//! Этот модуль определяет параметры, управляющие генерацией:
//! - Радиус карты и строковый сид
//! - Масштаб шума (размер форм рельефа)
//! - Размер гекса для проекции в плоскость
//! - Выбор бэкенда шума и настройки фрактального шума
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки через конфигурационные файлы.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{MapGenError, Result};
use crate::noise::NoiseKind;

/// Масштаб шума по умолчанию: координаты тайла делятся на это число
pub const DEFAULT_SCALE: f64 = 20.0;

/// Максимальный радиус карты (`3N² + 3N + 1` ≈ 12.6 млн тайлов)
pub const MAX_RADIUS: i32 = 2048;

/// Настройки многооктавного шума (используются только при `noise = "Fractal"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractalSettings {
    /// Количество октав (не меньше 1)
    #[serde(default = "default_octaves")]
    pub octaves: i32,

    /// Рост частоты на каждую октаву
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f32,

    /// Затухание амплитуды на каждую октаву
    #[serde(default = "default_gain")]
    pub gain: f32,
}

fn default_octaves() -> i32 {
    4
}
fn default_lacunarity() -> f32 {
    2.0
}
fn default_gain() -> f32 {
    0.5
}

impl Default for FractalSettings {
    fn default() -> Self {
        Self {
            octaves: 4,
            lacunarity: 2.0,
            gain: 0.5,
        }
    }
}

/// Основные параметры генерации карты
///
/// Полная конфигурация для генерации одной карты. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapGenerationParams {
    /// Радиус шестиугольной карты в тайлах (по умолчанию 12)
    #[serde(default = "default_radius")]
    pub radius: i32,

    /// Сид генератора (любая строка, пустая тоже допустима)
    #[serde(default = "default_seed")]
    pub seed: String,

    /// Делитель координат перед выборкой шума.
    /// Меньше значение — резче перепады высот между соседними тайлами.
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Размер гекса для проекции в плоские координаты
    #[serde(default = "default_tile_size")]
    pub tile_size: f64,

    /// Бэкенд шума (по умолчанию `Simplex`)
    #[serde(default)]
    pub noise: NoiseKind,

    /// Настройки фрактального шума
    #[serde(default)]
    pub fractal: FractalSettings,
}

impl MapGenerationParams {
    /// Параметры по умолчанию с заданными радиусом и сидом
    #[must_use]
    pub fn new(radius: i32, seed: impl Into<String>) -> Self {
        Self {
            radius,
            seed: seed.into(),
            ..Self::default()
        }
    }

    /// Загружает параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # map.toml
    /// radius = 16
    /// seed = "archipelago"
    /// scale = 12.0
    /// noise = "Fractal"
    ///
    /// [fractal]
    /// octaves = 5
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Разбирает параметры из TOML-строки
    ///
    /// ```
    /// use hexmapgen::MapGenerationParams;
    ///
    /// let params = MapGenerationParams::from_toml_str("radius = 3\nseed = \"abc\"").unwrap();
    /// assert_eq!(params.radius, 3);
    /// assert_eq!(params.scale, 20.0);
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let params: Self = toml::from_str(contents)?;
        Ok(params)
    }

    /// Проверяет параметры; некорректные значения не подгоняются, а отклоняются
    pub fn validate(&self) -> Result<()> {
        if self.radius < 0 {
            return Err(MapGenError::NegativeRadius(self.radius));
        }
        if self.radius > MAX_RADIUS {
            return Err(MapGenError::RadiusTooLarge {
                radius: self.radius,
                max: MAX_RADIUS,
            });
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(MapGenError::InvalidScale(self.scale));
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(MapGenError::InvalidTileSize(self.tile_size));
        }
        if self.noise == NoiseKind::Fractal && self.fractal.octaves < 1 {
            return Err(MapGenError::InvalidOctaves(self.fractal.octaves));
        }
        Ok(())
    }
}

fn default_radius() -> i32 {
    12
}
fn default_seed() -> String {
    "world".to_string()
}
fn default_scale() -> f64 {
    DEFAULT_SCALE
}
fn default_tile_size() -> f64 {
    1.0
}

impl Default for MapGenerationParams {
    fn default() -> Self {
        Self {
            radius: 12,
            seed: "world".to_string(),
            scale: DEFAULT_SCALE,
            tile_size: 1.0,
            noise: NoiseKind::Simplex,
            fractal: FractalSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let params = MapGenerationParams::from_toml_str("").unwrap();
        assert_eq!(params, MapGenerationParams::default());
        assert_eq!(params.seed, "world");
        assert_eq!(params.radius, 12);
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
            radius = 5
            seed = ""
            scale = 8.0
            tile_size = 2.5
            noise = "Fractal"

            [fractal]
            octaves = 6
            gain = 0.4
        "#;
        let params = MapGenerationParams::from_toml_str(toml).unwrap();
        assert_eq!(params.radius, 5);
        assert_eq!(params.seed, "");
        assert_eq!(params.noise, NoiseKind::Fractal);
        assert_eq!(params.fractal.octaves, 6);
        assert_eq!(params.fractal.lacunarity, 2.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = MapGenerationParams::from_toml_str("radius = \"big\"").unwrap_err();
        assert!(matches!(err, MapGenError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = MapGenerationParams::from_toml_file("/nonexistent/map.toml").unwrap_err();
        assert!(matches!(err, MapGenError::Io(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut params = MapGenerationParams::new(-1, "abc");
        assert!(matches!(params.validate(), Err(MapGenError::NegativeRadius(-1))));

        params.radius = MAX_RADIUS + 1;
        assert!(matches!(
            params.validate(),
            Err(MapGenError::RadiusTooLarge { radius, max: MAX_RADIUS }) if radius == MAX_RADIUS + 1
        ));

        params.radius = MAX_RADIUS;
        assert!(params.validate().is_ok());

        params.radius = 1;
        params.scale = 0.0;
        assert!(matches!(params.validate(), Err(MapGenError::InvalidScale(_))));

        params.scale = 20.0;
        params.tile_size = f64::NAN;
        assert!(matches!(params.validate(), Err(MapGenError::InvalidTileSize(_))));

        params.tile_size = 1.0;
        params.noise = NoiseKind::Fractal;
        params.fractal.octaves = 0;
        assert!(matches!(params.validate(), Err(MapGenError::InvalidOctaves(0))));
    }
}
