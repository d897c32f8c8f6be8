// src/region.rs
//! Связные области карты: материки и водоёмы
//!
//! Строится граф смежности тайлов (`petgraph::UnGraph`), затем обходом в
//! ширину собираются связные компоненты одного вида поверхности (суша или
//! океан). Каждый тайл попадает ровно в одну область.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::hex::Axial;
use crate::map::HexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionKind {
    Land,
    Water,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: u32,
    pub name: String,
    pub kind: RegionKind,
    pub tiles: Vec<Axial>,
}

/// Граф смежности тайлов; вес узла — координата тайла
pub fn build_tile_graph(map: &HexMap) -> UnGraph<Axial, ()> {
    let mut graph = UnGraph::with_capacity(map.tiles.len(), map.tiles.len() * 3);
    let mut coord_to_node = HashMap::with_capacity(map.tiles.len());

    for tile in &map.tiles {
        let node = graph.add_node(tile.coord());
        coord_to_node.insert(tile.coord(), node);
    }

    for tile in &map.tiles {
        let coord = tile.coord();
        for neighbor in coord.neighbors() {
            // Каждое ребро добавляем один раз: от меньшей координаты к большей
            if coord < neighbor
                && let Some(&other) = coord_to_node.get(&neighbor)
            {
                graph.add_edge(coord_to_node[&coord], other, ());
            }
        }
    }
    graph
}

/// Разбивает карту на связные области суши и воды
pub fn find_regions(map: &HexMap) -> Vec<Region> {
    let graph = build_tile_graph(map);
    let is_water = |coord: Axial| {
        map.get(coord.q, coord.r)
            .is_some_and(|tile| tile.terrain.is_water())
    };

    let mut assigned = vec![false; graph.node_count()];
    let mut regions = Vec::new();
    let mut region_id_counter = 0;

    for start in graph.node_indices() {
        if assigned[start.index()] {
            continue;
        }

        let water = is_water(graph[start]);
        let mut members = vec![graph[start]];
        assigned[start.index()] = true;

        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for neighbor in graph.neighbors(current) {
                if !assigned[neighbor.index()] && is_water(graph[neighbor]) == water {
                    assigned[neighbor.index()] = true;
                    members.push(graph[neighbor]);
                    queue.push_back(neighbor);
                }
            }
        }

        members.sort_unstable();
        let kind = if water { RegionKind::Water } else { RegionKind::Land };
        regions.push(Region {
            id: region_id_counter,
            name: format!(
                "{}_{}",
                if water { "Water" } else { "Land" },
                region_id_counter
            ),
            kind,
            tiles: members,
        });
        region_id_counter += 1;
    }
    regions
}
