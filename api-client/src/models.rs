//! Wire shapes of the upstream endpoints. Only the fields the catalog reads
//! are declared; everything else in the payloads is ignored.

use pokedex_catalog::DetailRecord;
use pokedex_catalog::NamedResource;
use pokedex_catalog::StatEntry;
use serde::Deserialize;

/// `GET /pokemon?limit=N`
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    pub count: usize,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// `GET /pokemon/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonResponse {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<BaseStat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Artwork,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

/// `GET /type/{label}`
#[derive(Debug, Clone, Deserialize)]
pub struct TypeResponse {
    #[serde(default)]
    pub pokemon: Vec<TypeMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeMember {
    pub pokemon: NamedResource,
}

impl Sprites {
    /// Official artwork when present, otherwise the default sprite.
    pub fn preferred(&self) -> Option<&str> {
        self.other
            .official_artwork
            .front_default
            .as_deref()
            .or(self.front_default.as_deref())
    }
}

impl PokemonResponse {
    pub fn into_record(self) -> DetailRecord {
        let image_url = self.sprites.preferred().map(str::to_string);
        let mut types = self.types;
        types.sort_by_key(|slot| slot.slot);
        DetailRecord {
            id: self.id,
            name: self.name,
            height: self.height,
            weight: self.weight,
            categories: types.into_iter().map(|slot| slot.kind.name).collect(),
            image_url,
            stats: self
                .stats
                .into_iter()
                .map(|stat| StatEntry {
                    name: stat.stat.name,
                    value: stat.base_stat,
                })
                .collect(),
        }
    }
}

impl TypeResponse {
    pub fn into_members(self) -> Vec<NamedResource> {
        self.pokemon
            .into_iter()
            .map(|member| member.pokemon)
            .collect()
    }
}
