use crate::error::CatalogError;
use crate::error::Result;
use crate::model::EntityId;
use serde::Deserialize;
use serde::Serialize;

/// Inclusive id interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRange {
    pub start: EntityId,
    pub end: EntityId,
}

impl GenerationRange {
    pub const fn new(start: EntityId, end: EntityId) -> Self {
        Self { start, end }
    }

    pub fn contains(self, id: EntityId) -> bool {
        (self.start..=self.end).contains(&id)
    }

    pub fn len(self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start) as usize + 1
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// A release cohort: a numbered, named, contiguous id range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    pub number: u8,
    pub region: &'static str,
    pub range: GenerationRange,
}

pub const GENERATIONS: [Generation; 7] = [
    Generation {
        number: 1,
        region: "Kanto",
        range: GenerationRange::new(1, 151),
    },
    Generation {
        number: 2,
        region: "Johto",
        range: GenerationRange::new(152, 251),
    },
    Generation {
        number: 3,
        region: "Hoenn",
        range: GenerationRange::new(252, 386),
    },
    Generation {
        number: 4,
        region: "Sinnoh",
        range: GenerationRange::new(387, 493),
    },
    Generation {
        number: 5,
        region: "Unova",
        range: GenerationRange::new(494, 649),
    },
    Generation {
        number: 6,
        region: "Kalos",
        range: GenerationRange::new(650, 721),
    },
    Generation {
        number: 7,
        region: "Alola",
        range: GenerationRange::new(722, 809),
    },
];

impl Generation {
    pub fn by_number(number: u8) -> Result<Generation> {
        GENERATIONS
            .iter()
            .find(|generation| generation.number == number)
            .copied()
            .ok_or(CatalogError::UnknownGeneration(number))
    }

    /// Label shown in the stats bar, e.g. `3 (Hoenn)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.number, self.region)
    }
}
