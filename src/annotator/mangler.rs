//! Fresh-name generation.
//!
//! Every declaration in a pass gets a name no other declaration has, which
//! flattens the program into a single namespace.

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{
    config::{AnnotatorConfig, MangleStrategy},
    symbol_table::SymbolTable,
};

enum Source {
    Counter(usize),
    Random(StdRng),
}

pub struct Mangler {
    source: Source,
    separator: char,
}

impl Mangler {
    pub fn new(config: &AnnotatorConfig) -> Self {
        let source = match config.strategy {
            MangleStrategy::Counter => Source::Counter(0),
            MangleStrategy::Random { seed: Some(seed) } => {
                Source::Random(StdRng::seed_from_u64(seed))
            }
            MangleStrategy::Random { seed: None } => Source::Random(StdRng::from_entropy()),
        };

        Mangler {
            source,
            separator: config.separator,
        }
    }

    /// Returns a name derived from `surface` that is not yet in `symbols`.
    pub fn mangle(&mut self, surface: &str, symbols: &SymbolTable) -> String {
        match &mut self.source {
            Source::Counter(next) => loop {
                let candidate = format!("{}{}{}", surface, self.separator, next);
                *next += 1;
                if !symbols.contains(&candidate) {
                    return candidate;
                }
            },
            Source::Random(rng) => {
                let mut candidate = format!("{}{}", surface, self.separator);
                while symbols.contains(&candidate) {
                    candidate.push(char::from(rng.gen_range(b'a'..=b'z')));
                }
                candidate
            }
        }
    }
}
