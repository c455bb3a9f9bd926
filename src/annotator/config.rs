/// How fresh names are minted for declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MangleStrategy {
    /// `name` + separator + a counter shared by the whole pass.
    #[default]
    Counter,
    /// `name` + separator, then random lowercase letters until the name is free.
    /// Without a seed the generator is seeded from the OS.
    Random { seed: Option<u64> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatorConfig {
    pub strategy: MangleStrategy,
    pub separator: char,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        AnnotatorConfig {
            strategy: MangleStrategy::Counter,
            separator: '_',
        }
    }
}
