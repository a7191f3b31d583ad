//! Rankings of small link graphs with known answers.

use std::collections::BTreeMap;

use approx::assert_abs_diff_eq;
use eigenwalk_pagerank::{PageRankError, link_matrix, page_rank};

/// Builds a graph from `(page, "space separated links")` pairs.
fn graph(edges: &[(&str, &str)]) -> BTreeMap<String, Vec<String>> {
    edges
        .iter()
        .map(|(page, links)| {
            (
                page.to_string(),
                links.split_whitespace().map(String::from).collect(),
            )
        })
        .collect()
}

fn four_pages() -> BTreeMap<String, Vec<String>> {
    graph(&[
        ("A", "B C D"),
        ("B", "A C"),
        ("C", "A D"),
        ("D", "A B"),
    ])
}

#[test]
fn four_page_example() {
    let ranks = page_rank(&four_pages()).unwrap();
    assert_eq!(ranks.len(), 4);
    assert_abs_diff_eq!(ranks["A"], 1.0 / 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ranks["B"], 2.0 / 9.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ranks["C"], 2.0 / 9.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ranks["D"], 2.0 / 9.0, epsilon = 1e-9);
}

#[test]
fn ranks_are_a_fixed_point() {
    let g = four_pages();
    let m = link_matrix(&g).unwrap();
    let ranks: Vec<f64> = page_rank(&g).unwrap().into_values().collect();
    for (i, row) in m.iter().enumerate() {
        let next: f64 = row.iter().zip(&ranks).map(|(p, r)| p * r).sum();
        assert_abs_diff_eq!(next, ranks[i], epsilon = 1e-9);
    }
    assert_abs_diff_eq!(ranks.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
}

#[test]
fn disconnected_groups_rank_from_first_page() {
    let g = graph(&[
        ("A", "A B"),
        ("B", "A B"),
        ("C", "C D"),
        ("D", "C D"),
    ]);
    let ranks = page_rank(&g).unwrap();
    assert_abs_diff_eq!(ranks["A"], 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(ranks["B"], 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(ranks["C"], 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ranks["D"], 0.0, epsilon = 1e-9);
}

#[test]
fn hub_page_ranks_highest() {
    let g = graph(&[
        ("hub", "a b c"),
        ("a", "hub"),
        ("b", "hub"),
        ("c", "hub a"),
    ]);
    let ranks = page_rank(&g).unwrap();
    let best = ranks
        .iter()
        .max_by(|x, y| x.1.total_cmp(y.1))
        .map(|(page, _)| page.as_str());
    assert_eq!(best, Some("hub"));
}

#[test]
fn errors_surface_from_page_rank() {
    assert!(matches!(
        page_rank(&BTreeMap::new()),
        Err(PageRankError::EmptyGraph)
    ));
    assert!(matches!(
        page_rank(&graph(&[("A", "nowhere")])),
        Err(PageRankError::UnknownLink { .. })
    ));
}
