use rayon::prelude::*;

pub fn loop_count(items: &[String]) -> u64 {
    let mut empties = 0u64;
    for s in items {
        if s.is_empty() {
            empties += 1;
        }
    }
    empties
}

// deliberately index-based; the point is to measure this access pattern
#[allow(clippy::needless_range_loop)]
pub fn indexed_count(items: &[String]) -> u64 {
    let mut empties = 0u64;
    for i in 0..items.len() {
        if items[i].is_empty() {
            empties += 1;
        }
    }
    empties
}

pub fn foreach_count(items: &[String]) -> u64 {
    let mut empties = 0u64;
    items.iter().for_each(|s| {
        if s.is_empty() {
            empties += 1;
        }
    });
    empties
}

pub fn filter_count(items: &[String]) -> u64 {
    items.iter().filter(|s| s.is_empty()).count() as u64
}

// Fork-join reduction: rayon splits the slice into chunks counted on the
// pool and sums the partial counts. The caller blocks until the pool is
// done. Counting is commutative so no ordering guarantee is needed.
pub fn par_filter_count(items: &[String]) -> u64 {
    items.par_iter().filter(|s| s.is_empty()).count() as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Loop,
    Indexed,
    Foreach,
    Filter,
    ParFilter,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Loop,
        Strategy::Indexed,
        Strategy::Foreach,
        Strategy::Filter,
        Strategy::ParFilter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Loop => "loop",
            Strategy::Indexed => "indexed",
            Strategy::Foreach => "foreach",
            Strategy::Filter => "filter",
            Strategy::ParFilter => "par_filter",
        }
    }

    pub fn run(&self, items: &[String]) -> u64 {
        match self {
            Strategy::Loop => loop_count(items),
            Strategy::Indexed => indexed_count(items),
            Strategy::Foreach => foreach_count(items),
            Strategy::Filter => filter_count(items),
            Strategy::ParFilter => par_filter_count(items),
        }
    }
}
