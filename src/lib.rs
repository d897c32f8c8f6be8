pub mod cache;
pub mod config;
pub mod error;
pub mod hex;
pub mod map;
pub mod noise;
pub mod png;
pub mod region;
pub mod rng;
pub mod terrain;

pub use cache::MapCache;
pub use config::{FractalSettings, MapGenerationParams};
pub use error::{MapGenError, Result};
pub use hex::{Axial, axial_to_point, hex_grid};
pub use map::{HexMap, Tile, generate_hex_map};
pub use noise::{NoiseField, NoiseKind, SimplexField};
pub use region::{Region, RegionKind, find_regions};
pub use rng::SeedRng;
pub use terrain::Terrain;
