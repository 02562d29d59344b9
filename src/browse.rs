//! Listing and searching the catalog.

use std::cmp::Ordering;

use crate::catalog::{Catalog, CatalogEntry};
use crate::color::Rgb;
use crate::matcher::{MatchOptions, match_closest};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowseOptions {
    /// Order by (hue, saturation, value, name) instead of catalog order.
    pub sort_by_hue_sat_val: bool,
    /// Keep only names containing this substring.
    pub name_filter: Option<String>,
    /// When set, browse the catalog matches for these colors instead of the listing.
    pub similarity_query_colors: Option<Vec<Rgb>>,
}

impl Default for BrowseOptions {
    fn default() -> Self {
        BrowseOptions {
            sort_by_hue_sat_val: true,
            name_filter: None,
            similarity_query_colors: None,
        }
    }
}

fn hsv_order(a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
    let (ah, as_, av) = a.rgb.to_hsv();
    let (bh, bs, bv) = b.rgb.to_hsv();
    ah.total_cmp(&bh)
        .then(as_.total_cmp(&bs))
        .then(av.total_cmp(&bv))
        .then_with(|| a.name.cmp(&b.name))
}

/// Catalog entries, optionally sorted and filtered by name.
pub fn list_colors(catalog: &Catalog, opts: &BrowseOptions) -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = catalog
        .iter()
        .filter(|e| opts.name_filter.as_deref().is_none_or(|f| e.name.contains(f)))
        .cloned()
        .collect();
    if opts.sort_by_hue_sat_val {
        entries.sort_by(hsv_order);
    }
    entries
}

/// [`list_colors`], or the matched entries when query colors are configured.
pub fn browse(catalog: &Catalog, opts: &BrowseOptions, match_opts: &MatchOptions) -> Vec<CatalogEntry> {
    match &opts.similarity_query_colors {
        Some(queries) => match_closest(queries, catalog, match_opts)
            .into_iter()
            .map(|m| CatalogEntry::new(m.name, m.rgb))
            .collect(),
        None => list_colors(catalog, opts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_unsorted_unfiltered_is_catalog_order() {
        let opts = BrowseOptions { sort_by_hue_sat_val: false, ..Default::default() };
        let entries = list_colors(Catalog::css4(), &opts);
        assert_eq!(entries.as_slice(), Catalog::css4().entries());
    }

    #[test]
    fn test_search_blue() {
        let opts = BrowseOptions { name_filter: Some("blue".to_string()), ..Default::default() };
        let entries = list_colors(Catalog::css4(), &opts);
        assert!(entries.iter().all(|e| e.name.contains("blue")));
        for expected in ["blue", "darkblue", "lightblue", "mediumblue", "aliceblue", "skyblue"] {
            assert!(names(&entries).contains(&expected), "missing {expected}");
        }
        assert!(entries.windows(2).all(|w| hsv_order(&w[0], &w[1]) != Ordering::Greater));
    }

    #[test]
    fn test_sort_breaks_ties_by_name() {
        let opts = BrowseOptions { name_filter: Some("aqua".to_string()), ..Default::default() };
        let catalog = Catalog::new([
            CatalogEntry::new("cyan", Rgb::new(0, 255, 255)),
            CatalogEntry::new("aqua", Rgb::new(0, 255, 255)),
        ])
        .unwrap();
        assert_eq!(names(&list_colors(&catalog, &opts)), ["aqua"]);

        let all = BrowseOptions::default();
        assert_eq!(names(&list_colors(&catalog, &all)), ["aqua", "cyan"]);
    }

    #[test]
    fn test_sort_by_hue_first() {
        let catalog = Catalog::new([
            CatalogEntry::new("b", Rgb::new(0, 0, 255)),
            CatalogEntry::new("g", Rgb::new(0, 255, 0)),
            CatalogEntry::new("r", Rgb::new(255, 0, 0)),
            CatalogEntry::new("k", Rgb::new(0, 0, 0)),
        ])
        .unwrap();
        let entries = list_colors(&catalog, &BrowseOptions::default());
        assert_eq!(names(&entries), ["k", "r", "g", "b"]);
    }

    #[test]
    fn test_filter_without_match_is_empty() {
        let opts = BrowseOptions { name_filter: Some("zzz".to_string()), ..Default::default() };
        assert!(list_colors(Catalog::css4(), &opts).is_empty());
    }

    #[test]
    fn test_browse_with_query_colors_returns_matches() {
        let opts = BrowseOptions {
            similarity_query_colors: Some(vec![Rgb::new(250, 10, 5), Rgb::new(20, 20, 200)]),
            ..Default::default()
        };
        let entries = browse(Catalog::css4(), &opts, &MatchOptions::default());
        assert_eq!(entries.len(), 2);
        assert_ne!(entries[0].name, entries[1].name);
        for e in &entries {
            assert_eq!(Catalog::css4().get(&e.name), Some(e.rgb));
        }
    }
}
