// src/map.rs
//! Сборка гекс-карты
//!
//! Конвейер генерации строго последовательный, без перемешивания этапов:
//! 1. Сетка координат ([`hex_grid`])
//! 2. Инициализация [`SeedRng`] сидом
//! 3. Построение поля шума из этого генератора
//! 4. Высота каждого тайла: `noise(q / scale, r / scale)`
//! 5. Классификация рельефа по высоте
//!
//! Тайлы независимы друг от друга, поэтому этапы 4 и 5 распараллеливаются
//! через `rayon` (фича `parallel`) без влияния на результат.
//! Результат — неизменяемый снимок; между вызовами состояние не хранится.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::MapGenerationParams;
use crate::error::Result;
use crate::hex::{Axial, axial_to_point, hex_grid};
use crate::noise::{NoiseField, build_noise_field};
use crate::rng::SeedRng;
use crate::terrain::Terrain;

/// Один тайл карты
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Осевая координата q
    pub q: i32,
    /// Осевая координата r
    pub r: i32,
    /// Высота из поля шума, примерно `[-1, 1]` (без жёсткого ограничения)
    pub elevation: f64,
    /// Тип рельефа, чистая функция от `elevation`
    pub terrain: Terrain,
    /// Зарезервировано под биомы; генератор всегда оставляет `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biome: Option<String>,
}

impl Tile {
    #[must_use]
    pub fn coord(&self) -> Axial {
        Axial::new(self.q, self.r)
    }

    /// Центр тайла на плоскости для гекса размера `size`
    #[must_use]
    pub fn position(&self, size: f64) -> (f64, f64) {
        axial_to_point(self.q, self.r, size)
    }

    /// Высота столбика тайла для 3D-отображения: база типа рельефа плюс вариация по высоте
    #[must_use]
    pub fn visual_height(&self) -> f64 {
        self.terrain.base_height() * (1.0 + self.elevation * 0.5)
    }
}

/// Сгенерированная карта: параметры и упорядоченный список тайлов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexMap {
    pub radius: u32,
    pub seed: String,
    /// Размер гекса для проекции тайлов в плоскость
    #[serde(default = "default_tile_size")]
    pub tile_size: f64,
    pub tiles: Vec<Tile>,
    #[serde(skip)]
    index: HashMap<Axial, usize>,
}

fn default_tile_size() -> f64 {
    1.0
}

impl HexMap {
    /// Генерирует карту по параметрам
    ///
    /// Либо возвращает полностью классифицированную карту, либо ошибку —
    /// частично заполненных результатов не бывает.
    ///
    /// ```
    /// use hexmapgen::{HexMap, MapGenerationParams};
    ///
    /// let map = HexMap::generate(&MapGenerationParams::new(3, "abc")).unwrap();
    /// assert_eq!(map.tiles.len(), 37);
    /// assert!(map.get(0, 0).is_some());
    /// ```
    pub fn generate(params: &MapGenerationParams) -> Result<Self> {
        params.validate()?;
        let radius = params.radius as u32;

        let grid = hex_grid(radius);
        debug!(radius, tiles = grid.len(), "hex grid built");

        let mut rng = SeedRng::new(&params.seed);
        let noise = build_noise_field(params.noise, &mut rng, &params.fractal);
        debug!(seed = %params.seed, noise = ?params.noise, "noise field seeded");

        let elevations = assign_elevation(&grid, noise.as_ref(), params.scale);
        debug!("elevation assigned");

        let terrains = assign_terrain(&elevations);
        debug!("terrain classified");

        let tiles: Vec<Tile> = grid
            .iter()
            .zip(elevations)
            .zip(terrains)
            .map(|((coord, elevation), terrain)| Tile {
                q: coord.q,
                r: coord.r,
                elevation,
                terrain,
                biome: None,
            })
            .collect();

        let map = Self::from_tiles(radius, params.seed.clone(), tiles).with_tile_size(params.tile_size);
        info!(
            radius,
            seed = %map.seed,
            tiles = map.tiles.len(),
            "hex map generated: {:?}",
            map.terrain_counts()
        );
        Ok(map)
    }

    /// Собирает карту из готовых тайлов (например, прочитанных из JSON);
    /// размер гекса по умолчанию 1.0
    #[must_use]
    pub fn from_tiles(radius: u32, seed: String, tiles: Vec<Tile>) -> Self {
        let index = tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| (tile.coord(), i))
            .collect();
        Self {
            radius,
            seed,
            tile_size: default_tile_size(),
            tiles,
            index,
        }
    }

    #[must_use]
    pub fn with_tile_size(mut self, tile_size: f64) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Центр тайла на плоскости в масштабе карты (`tile_size`)
    #[must_use]
    pub fn position(&self, q: i32, r: i32) -> Option<(f64, f64)> {
        self.get(q, r).map(|tile| tile.position(self.tile_size))
    }

    /// Ширина и высота карты на плоскости, включая края крайних гексов
    ///
    /// ```
    /// use hexmapgen::{HexMap, MapGenerationParams};
    ///
    /// let map = HexMap::generate(&MapGenerationParams::new(0, "abc")).unwrap();
    /// let (width, height) = map.extent();
    /// assert!((width - 3.0_f64.sqrt()).abs() < 1e-12);
    /// assert_eq!(height, 2.0);
    /// ```
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        if self.tiles.is_empty() {
            return (0.0, 0.0);
        }
        let (min_x, max_x, min_z, max_z) = self.tiles.iter().map(|t| t.position(self.tile_size)).fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(min_x, max_x, min_z, max_z), (x, z)| (min_x.min(x), max_x.max(x), min_z.min(z), max_z.max(z)),
        );
        (
            max_x - min_x + 3.0_f64.sqrt() * self.tile_size,
            max_z - min_z + 2.0 * self.tile_size,
        )
    }

    /// Тайл по осевым координатам
    #[must_use]
    pub fn get(&self, q: i32, r: i32) -> Option<&Tile> {
        self.index.get(&Axial::new(q, r)).map(|&i| &self.tiles[i])
    }

    /// Соседние тайлы, существующие на карте
    pub fn neighbors(&self, q: i32, r: i32) -> impl Iterator<Item = &Tile> + '_ {
        Axial::new(q, r)
            .neighbors()
            .into_iter()
            .filter_map(|n| self.get(n.q, n.r))
    }

    /// Количество соседей-суши (не океан) вокруг тайла
    #[must_use]
    pub fn land_neighbor_count(&self, q: i32, r: i32) -> usize {
        self.neighbors(q, r).filter(|t| !t.terrain.is_water()).count()
    }

    /// Количество тайлов каждого типа рельефа (все семь типов, включая нулевые)
    #[must_use]
    pub fn terrain_counts(&self) -> BTreeMap<Terrain, usize> {
        let mut counts: BTreeMap<Terrain, usize> = Terrain::ALL.iter().map(|&t| (t, 0)).collect();
        for tile in &self.tiles {
            *counts.entry(tile.terrain).or_default() += 1;
        }
        counts
    }

    /// Доля суши (всё, что не океан)
    #[must_use]
    pub fn land_ratio(&self) -> f64 {
        if self.tiles.is_empty() {
            return 0.0;
        }
        let land = self.tiles.iter().filter(|t| !t.terrain.is_water()).count();
        land as f64 / self.tiles.len() as f64
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Восстанавливает карту из JSON, перестраивая индекс координат
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Self = serde_json::from_str(json)?;
        Ok(Self::from_tiles(raw.radius, raw.seed, raw.tiles).with_tile_size(raw.tile_size))
    }

    pub fn save_as_json(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Генерирует тайлы карты радиуса `radius` с сидом `seed` (остальные параметры по умолчанию)
///
/// ```
/// use hexmapgen::{generate_hex_map, MapGenError, Terrain};
///
/// let tiles = generate_hex_map(0, "abc").unwrap();
/// assert_eq!(tiles.len(), 1);
/// assert_eq!(tiles[0].elevation, 0.0);
/// assert_eq!(tiles[0].terrain, Terrain::Plains);
///
/// assert!(matches!(generate_hex_map(-1, "abc"), Err(MapGenError::NegativeRadius(-1))));
/// ```
pub fn generate_hex_map(radius: i32, seed: &str) -> Result<Vec<Tile>> {
    HexMap::generate(&MapGenerationParams::new(radius, seed)).map(|map| map.tiles)
}

/// Высота каждой координаты: выборка шума в точке `(q / scale, r / scale)`
pub fn assign_elevation(grid: &[Axial], noise: &dyn NoiseField, scale: f64) -> Vec<f64> {
    let sample = |coord: &Axial| noise.sample(f64::from(coord.q) / scale, f64::from(coord.r) / scale);

    #[cfg(feature = "parallel")]
    let elevations = grid.par_iter().map(sample).collect();
    #[cfg(not(feature = "parallel"))]
    let elevations = grid.iter().map(sample).collect();

    elevations
}

/// Тип рельефа для каждой высоты
#[must_use]
pub fn assign_terrain(elevations: &[f64]) -> Vec<Terrain> {
    #[cfg(feature = "parallel")]
    let terrains = elevations.par_iter().map(|&e| Terrain::classify(e)).collect();
    #[cfg(not(feature = "parallel"))]
    let terrains = elevations.iter().map(|&e| Terrain::classify(e)).collect();

    terrains
}
