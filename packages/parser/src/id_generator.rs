use crate::ast::{Fragment, NODE_ID_ATTR};
use uuid::Uuid;

/// Generate a fresh, globally unique node id
pub fn new_node_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a fresh id with a readable prefix (`page-…`, `template-…`)
pub fn new_prefixed_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Source of ids for elements that do not carry one yet
#[derive(Clone, Debug)]
pub enum IDGenerator {
    /// UUID v4 per element
    Random,

    /// `seed-1`, `seed-2`, … (deterministic; unique only per seed)
    Sequential { seed: String, count: u32 },
}

impl IDGenerator {
    pub fn random() -> Self {
        IDGenerator::Random
    }

    pub fn sequential(seed: impl Into<String>) -> Self {
        IDGenerator::Sequential {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next ID
    pub fn new_id(&mut self) -> String {
        match self {
            IDGenerator::Random => new_node_id(),
            IDGenerator::Sequential { seed, count } => {
                *count += 1;
                format!("{}-{}", seed, count)
            }
        }
    }

    /// Write a fresh id onto every element lacking one.
    ///
    /// Returns how many ids were assigned.
    pub fn assign_missing(&mut self, fragment: &mut Fragment) -> usize {
        let mut assigned = 0;
        fragment.visit_elements_mut(&mut |element| {
            if element.id().is_none() {
                element.set_attr(NODE_ID_ATTR, self.new_id());
                assigned += 1;
            }
        });
        assigned
    }
}

impl Default for IDGenerator {
    fn default() -> Self {
        Self::random()
    }
}
