//! Wire types for the PokeAPI endpoints we read.
//!
//! Only the fields the Pokedex uses are declared; serde ignores the rest.

use serde::Deserialize;

use pokedex_core::types::{CreatureStats, FetchedArea};

#[derive(Debug, Deserialize)]
pub(crate) struct NamedResource {
    pub name: String,
}

/// `GET /location-area/{id}/`
#[derive(Debug, Deserialize)]
pub(crate) struct LocationAreaResponse {
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PokemonEncounter {
    pub pokemon: NamedResource,
}

impl From<LocationAreaResponse> for FetchedArea {
    fn from(area: LocationAreaResponse) -> Self {
        let creatures = area
            .pokemon_encounters
            .into_iter()
            .map(|e| e.pokemon.name)
            .collect();
        FetchedArea::new(area.name, creatures)
    }
}

/// `GET /pokemon/{name}/`
#[derive(Debug, Deserialize)]
pub(crate) struct PokemonResponse {
    /// Null for a handful of forms upstream.
    pub base_experience: Option<u32>,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

impl From<PokemonResponse> for CreatureStats {
    fn from(pokemon: PokemonResponse) -> Self {
        let mut stats = CreatureStats {
            base_experience: pokemon.base_experience.unwrap_or_default(),
            height: pokemon.height,
            weight: pokemon.weight,
            ..Default::default()
        };

        for entry in pokemon.stats {
            let value = entry.base_stat;
            match entry.stat.name.as_str() {
                "hp" => stats.hp = value,
                "attack" => stats.attack = value,
                "defense" => stats.defense = value,
                "special-attack" => stats.special_attack = value,
                "special-defense" => stats.special_defense = value,
                "speed" => stats.speed = value,
                _ => {}
            }
        }

        let mut types = pokemon.types;
        types.sort_by_key(|t| t.slot);
        stats.types = types.into_iter().map(|t| t.kind.name).collect();

        stats
    }
}
