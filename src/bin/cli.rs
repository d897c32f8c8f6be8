use clap::Parser;
use hexmapgen::png::save_preview_png;
use hexmapgen::{HexMap, MapGenerationParams, RegionKind, find_regions};
use rand::distributions::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Генератор гексагональных карт
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML (иначе параметры по умолчанию)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Радиус карты (переопределяет конфиг)
    #[arg(short, long, allow_hyphen_values = true)]
    radius: Option<i32>,

    /// Сид карты (переопределяет конфиг)
    #[arg(short, long, conflicts_with = "random_seed")]
    seed: Option<String>,

    /// Сгенерировать случайный сид из 12 символов
    #[arg(long)]
    random_seed: bool,

    /// Путь для сохранения тайлов в JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Путь для сохранения PNG-превью
    #[arg(long)]
    png: Option<PathBuf>,

    /// Размер гекса в пикселях для превью
    #[arg(long, default_value_t = 12.0)]
    hex_px: f64,
}

fn random_seed() -> String {
    ChaCha8Rng::from_entropy()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => {
            println!("🔍 Загрузка конфигурации из {}...", path.display());
            MapGenerationParams::from_toml_file(path)?
        }
        None => MapGenerationParams::default(),
    };
    if let Some(radius) = cli.radius {
        params.radius = radius;
    }
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }
    if cli.random_seed {
        params.seed = random_seed();
    }

    println!(
        "Генерация карты (радиус: {}, сид: {:?}, шум: {:?})...",
        params.radius, params.seed, params.noise
    );
    let map = HexMap::generate(&params)?;

    let (width, height) = map.extent();
    println!(
        "Тайлов: {} (размер на плоскости: {width:.2} x {height:.2} при гексе {})",
        map.tiles.len(),
        map.tile_size
    );
    for (terrain, count) in map.terrain_counts() {
        println!("  {terrain:<14} {count}");
    }

    let regions = find_regions(&map);
    let land = regions.iter().filter(|r| r.kind == RegionKind::Land).count();
    println!(
        "Областей: {} (суша: {land}, вода: {})",
        regions.len(),
        regions.len() - land
    );

    if let Some(path) = &cli.json {
        println!("Сохранение тайлов в {path:?}");
        map.save_as_json(path)?;
    }
    if let Some(path) = &cli.png {
        println!("Сохранение превью в {path:?}");
        save_preview_png(&map, cli.hex_px, &path.to_string_lossy())?;
    }

    println!("\nГотово!");
    Ok(())
}
