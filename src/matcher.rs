//! Match query colors to catalog names, each catalog entry used at most once.

use tracing::{debug, warn};

use crate::catalog::{Catalog, CatalogEntry};
use crate::color::Rgb;
use crate::distance::Metric;

/// Names containing any of these are dropped before matching.
pub const DEFAULT_EXCLUDE: [&str; 8] = [
    "black",
    "gray",
    "grey",
    "white",
    "silver",
    "gainsboro",
    "snow",
    "linen",
];

/// Which end of the metric's score wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Lowest score wins. With [`Metric::WeightedProduct`] this leans toward
    /// dark entries.
    #[default]
    Minimum,
    /// Highest score wins.
    Maximum,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchOptions {
    /// Case-sensitive substrings; any catalog name containing one is skipped.
    pub exclude: Vec<String>,
    pub metric: Metric,
    pub selection: Selection,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            metric: Metric::default(),
            selection: Selection::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub query: Rgb,
    pub name: String,
    pub rgb: Rgb,
}

/// The catalog entries left after exclusion, as an owned snapshot.
pub fn working_catalog(catalog: &Catalog, exclude: &[String]) -> Vec<CatalogEntry> {
    catalog
        .iter()
        .filter(|e| !exclude.iter().any(|unwanted| e.name.contains(unwanted.as_str())))
        .cloned()
        .collect()
}

/// Index of the best entry for `query`; ties go to the earliest entry.
fn select(query: Rgb, candidates: &[CatalogEntry], metric: Metric, selection: Selection) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, entry) in candidates.iter().enumerate() {
        let score = metric.distance(query, entry.rgb);
        let better = match (best, selection) {
            (None, _) => true,
            (Some((_, b)), Selection::Minimum) => score < b,
            (Some((_, b)), Selection::Maximum) => score > b,
        };
        if better {
            best = Some((idx, score));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Match each query, in order, against the working catalog.
///
/// The chosen entry is removed from the working set, so no name is returned
/// twice. Once the working set is exhausted the remaining queries go unmatched
/// and the result is shorter than `queries`. `catalog` itself is never modified.
pub fn match_closest(queries: &[Rgb], catalog: &Catalog, opts: &MatchOptions) -> Vec<Match> {
    let mut remaining = working_catalog(catalog, &opts.exclude);
    debug!(
        queries = queries.len(),
        candidates = remaining.len(),
        metric = ?opts.metric,
        selection = ?opts.selection,
        "matching against catalog"
    );

    let mut matches = Vec::with_capacity(queries.len().min(remaining.len()));
    for &query in queries {
        let Some(idx) = select(query, &remaining, opts.metric, opts.selection) else {
            warn!(
                unmatched = queries.len() - matches.len(),
                "catalog exhausted before all colors were matched"
            );
            break;
        };
        let entry = remaining.remove(idx);
        debug!(query = %query, name = %entry.name, "matched");
        matches.push(Match {
            query,
            name: entry.name,
            rgb: entry.rgb,
        });
    }
    matches
}
