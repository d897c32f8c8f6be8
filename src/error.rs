// src/error.rs
//! Ошибки генерации карты
//!
//! Генерация — чистое вычисление, поэтому ошибок немного: некорректные входные
//! параметры (отклоняются сразу, без молчаливой подгонки) и ошибки ввода-вывода
//! при загрузке конфигурации или экспорте результата.

use thiserror::Error;

/// Все ошибки, которые может вернуть крейт
#[derive(Error, Debug)]
pub enum MapGenError {
    /// Отрицательный радиус карты
    #[error("radius must be non-negative, got {0}")]
    NegativeRadius(i32),

    /// Радиус больше допустимого: столько тайлов не поместится в память
    #[error("radius must be at most {max}, got {radius}")]
    RadiusTooLarge { radius: i32, max: i32 },

    /// Масштаб шума должен быть конечным и положительным
    #[error("noise scale must be finite and positive, got {0}")]
    InvalidScale(f64),

    /// Размер гекса для проекции должен быть конечным и положительным
    #[error("tile size must be finite and positive, got {0}")]
    InvalidTileSize(f64),

    /// Количество октав фрактального шума
    #[error("fractal octaves must be at least 1, got {0}")]
    InvalidOctaves(i32),

    /// Размер гекса превью должен быть конечным и положительным
    #[error("preview hex size must be finite and positive, got {0}")]
    InvalidHexSize(f64),

    /// Превью получилось бы больше допустимого размера изображения
    #[error("preview image {width}x{height} exceeds the {max}px limit")]
    PreviewTooLarge { width: f64, height: f64, max: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, MapGenError>;
