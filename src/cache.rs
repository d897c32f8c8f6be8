// src/cache.rs
//! Кэш сгенерированных карт
//!
//! Генерация не хранит состояния, поэтому кэш — единственный разделяемый
//! ресурс. Карты хранятся как неизменяемые снимки `Arc<HexMap>` под
//! `parking_lot::RwLock`, ключ — `(radius, seed)`. Остальные параметры
//! фиксируются шаблоном при создании кэша. Ошибки не кэшируются.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::config::MapGenerationParams;
use crate::error::Result;
use crate::map::HexMap;

type CacheKey = (i32, String);

#[derive(Debug, Default)]
pub struct MapCache {
    template: MapGenerationParams,
    maps: RwLock<HashMap<CacheKey, Arc<HexMap>>>,
}

impl MapCache {
    /// Кэш с параметрами по умолчанию для всего, кроме радиуса и сида
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Кэш, генерирующий карты по шаблону `template`
    #[must_use]
    pub fn with_template(template: MapGenerationParams) -> Self {
        Self {
            template,
            maps: RwLock::new(HashMap::new()),
        }
    }

    /// Возвращает карту из кэша или генерирует и запоминает её
    pub fn get_or_generate(&self, radius: i32, seed: &str) -> Result<Arc<HexMap>> {
        let key = (radius, seed.to_string());
        if let Some(map) = self.maps.read().get(&key) {
            debug!(radius, seed, "map cache hit");
            return Ok(Arc::clone(map));
        }

        debug!(radius, seed, "map cache miss");
        let params = MapGenerationParams {
            radius,
            seed: seed.to_string(),
            ..self.template.clone()
        };
        // Генерация вне блокировки: параллельные промахи по одному ключу
        // дадут одинаковые карты, в кэше останется первая.
        let generated = Arc::new(HexMap::generate(&params)?);
        let mut maps = self.maps.write();
        let entry = maps.entry(key).or_insert(generated);
        Ok(Arc::clone(entry))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps.read().is_empty()
    }

    pub fn clear(&self) {
        self.maps.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapGenError;
    use std::thread;

    #[test]
    fn test_hit_returns_same_snapshot() {
        let cache = MapCache::new();
        let a = cache.get_or_generate(3, "abc").unwrap();
        let b = cache.get_or_generate(3, "abc").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        let c = cache.get_or_generate(3, "xyz").unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = MapCache::new();
        let err = cache.get_or_generate(-1, "abc").unwrap_err();
        assert!(matches!(err, MapGenError::NegativeRadius(-1)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_template_is_applied() {
        let cache = MapCache::with_template(MapGenerationParams {
            scale: 5.0,
            ..MapGenerationParams::default()
        });
        let cached = cache.get_or_generate(4, "abc").unwrap();
        let direct = HexMap::generate(&MapGenerationParams {
            scale: 5.0,
            ..MapGenerationParams::new(4, "abc")
        })
        .unwrap();
        assert_eq!(*cached, direct);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(MapCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let seed = if i % 2 == 0 { "even" } else { "odd" };
                    cache.get_or_generate(6, seed).unwrap()
                })
            })
            .collect();
        let maps: Vec<Arc<HexMap>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(cache.len(), 2);
        for pair in maps.chunks(2) {
            assert_eq!(pair[0].tiles.len(), 127);
        }
        assert_eq!(*maps[0], *maps[2]);
    }
}
