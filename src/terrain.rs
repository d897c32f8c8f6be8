// src/terrain.rs
//! Классификация рельефа по высоте
//!
//! Чистая, тотальная и монотонная функция: высота → один из семи типов
//! рельефа. Пороги — строгие верхние границы (`e < порог`), поэтому значение
//! ровно на пороге попадает в следующий, более высокий тип. Выбросы шума за
//! пределы `[-1, 1]` поглощаются крайними типами.

use serde::{Deserialize, Serialize};

/// Тип рельефа, упорядочен по возрастанию высоты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    DeepOcean,
    MidOcean,
    ShallowOcean,
    Coast,
    Plains,
    Hills,
    Mountains,
}

/// Верхние границы полос рельефа; всё, что не ниже последней, — горы
const THRESHOLDS: [(f64, Terrain); 6] = [
    (-0.6, Terrain::DeepOcean),
    (-0.45, Terrain::MidOcean),
    (-0.3, Terrain::ShallowOcean),
    (-0.1, Terrain::Coast),
    (0.2, Terrain::Plains),
    (0.4, Terrain::Hills),
];

impl Terrain {
    /// Все типы в порядке возрастания высоты
    pub const ALL: [Terrain; 7] = [
        Terrain::DeepOcean,
        Terrain::MidOcean,
        Terrain::ShallowOcean,
        Terrain::Coast,
        Terrain::Plains,
        Terrain::Hills,
        Terrain::Mountains,
    ];

    /// Классифицирует высоту (первое совпадение сверху вниз)
    ///
    /// ```
    /// use hexmapgen::Terrain;
    ///
    /// assert_eq!(Terrain::classify(-0.6), Terrain::MidOcean);
    /// assert_eq!(Terrain::classify(-0.600001), Terrain::DeepOcean);
    /// assert_eq!(Terrain::classify(0.4), Terrain::Mountains);
    /// ```
    #[must_use]
    pub fn classify(elevation: f64) -> Terrain {
        THRESHOLDS
            .iter()
            .find(|(limit, _)| elevation < *limit)
            .map_or(Terrain::Mountains, |&(_, terrain)| terrain)
    }

    /// Порядковый номер: 0 — глубокий океан, 6 — горы
    #[must_use]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Водные типы (три океанские полосы); побережье считается сушей
    #[must_use]
    pub fn is_water(self) -> bool {
        matches!(
            self,
            Terrain::DeepOcean | Terrain::MidOcean | Terrain::ShallowOcean
        )
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Terrain::DeepOcean => "deep_ocean",
            Terrain::MidOcean => "mid_ocean",
            Terrain::ShallowOcean => "shallow_ocean",
            Terrain::Coast => "coast",
            Terrain::Plains => "plains",
            Terrain::Hills => "hills",
            Terrain::Mountains => "mountains",
        }
    }

    /// Цвет тайла для превью. Синий канал океана зависит от высоты.
    #[must_use]
    pub fn color(self, elevation: f64) -> [u8; 3] {
        let blue = |base: f64, spread: f64| (base + elevation * spread).floor().clamp(0.0, 255.0) as u8;
        match self {
            Terrain::DeepOcean => [0, 20, blue(60.0, 30.0)],
            Terrain::MidOcean => [0, 40, blue(110.0, 40.0)],
            Terrain::ShallowOcean => [0, 80, blue(180.0, 40.0)],
            Terrain::Coast => [0xFA, 0xED, 0xCA],
            Terrain::Plains => [0x90, 0xB7, 0x7D],
            Terrain::Hills => [0x6B, 0x8E, 0x4E],
            Terrain::Mountains => [0x8B, 0x73, 0x55],
        }
    }

    /// Базовая высота столбика тайла для 3D-отображения
    #[must_use]
    pub fn base_height(self) -> f64 {
        match self {
            Terrain::DeepOcean => 0.07,
            Terrain::MidOcean => 0.1,
            Terrain::ShallowOcean => 0.13,
            Terrain::Coast => 0.2,
            Terrain::Plains => 0.3,
            Terrain::Hills => 0.5,
            Terrain::Mountains => 0.8,
        }
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        assert_eq!(Terrain::classify(-0.9), Terrain::DeepOcean);
        assert_eq!(Terrain::classify(-0.5), Terrain::MidOcean);
        assert_eq!(Terrain::classify(-0.35), Terrain::ShallowOcean);
        assert_eq!(Terrain::classify(-0.2), Terrain::Coast);
        assert_eq!(Terrain::classify(0.0), Terrain::Plains);
        assert_eq!(Terrain::classify(0.3), Terrain::Hills);
        assert_eq!(Terrain::classify(0.9), Terrain::Mountains);
    }

    #[test]
    fn test_boundaries_are_strict() {
        assert_eq!(Terrain::classify(-0.6), Terrain::MidOcean);
        assert_eq!(Terrain::classify(-0.600_001), Terrain::DeepOcean);
        assert_eq!(Terrain::classify(-0.45), Terrain::ShallowOcean);
        assert_eq!(Terrain::classify(-0.3), Terrain::Coast);
        assert_eq!(Terrain::classify(-0.1), Terrain::Plains);
        assert_eq!(Terrain::classify(0.2), Terrain::Hills);
        assert_eq!(Terrain::classify(0.399), Terrain::Hills);
        assert_eq!(Terrain::classify(0.4), Terrain::Mountains);
    }

    #[test]
    fn test_overshoot_is_absorbed() {
        assert_eq!(Terrain::classify(-1.3), Terrain::DeepOcean);
        assert_eq!(Terrain::classify(f64::NEG_INFINITY), Terrain::DeepOcean);
        assert_eq!(Terrain::classify(1.2), Terrain::Mountains);
        assert_eq!(Terrain::classify(f64::INFINITY), Terrain::Mountains);
    }

    #[test]
    fn test_monotonic() {
        let mut previous = Terrain::classify(-2.0);
        for step in 0..=4000 {
            let e = -2.0 + f64::from(step) * 0.001;
            let current = Terrain::classify(e);
            assert!(current.rank() >= previous.rank(), "rank dropped at {e}");
            previous = current;
        }
    }

    #[test]
    fn test_order_and_rank() {
        for (i, terrain) in Terrain::ALL.iter().enumerate() {
            assert_eq!(usize::from(terrain.rank()), i);
        }
        assert!(Terrain::DeepOcean < Terrain::Mountains);
    }

    #[test]
    fn test_water_and_names() {
        let water: Vec<_> = Terrain::ALL.iter().filter(|t| t.is_water()).collect();
        assert_eq!(water.len(), 3);
        assert!(!Terrain::Coast.is_water());
        assert_eq!(Terrain::ShallowOcean.to_string(), "shallow_ocean");
        assert_eq!(
            serde_json::to_string(&Terrain::DeepOcean).unwrap(),
            "\"deep_ocean\""
        );
    }

    #[test]
    fn test_colors() {
        assert_eq!(Terrain::Coast.color(0.0), [250, 237, 202]);
        assert_eq!(Terrain::DeepOcean.color(-1.0), [0, 20, 30]);
        assert_eq!(Terrain::ShallowOcean.color(-0.35), [0, 80, 166]);
    }
}
