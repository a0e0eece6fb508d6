//! Property tests for the row pipeline.

use proptest::prelude::*;
use tabula_grid::{
    natural_cmp, sort_rows, ColumnDef, DataTable, FacetDef, FilterOption, FilterSet, FilterState,
    Pagination, SearchDef, SortDirection, TableConfig, WindowConfig,
};

#[derive(Debug, Clone)]
struct Item {
    id: usize,
    label: String,
    group: u8,
    score: i32,
}

fn item_strategy() -> impl Strategy<Value = (String, u8, i32)> {
    ("[a-zA-Z]{0,3}[0-9]{0,3}", 0u8..4, -50i32..50)
}

fn items(raw: Vec<(String, u8, i32)>) -> Vec<Item> {
    raw.into_iter()
        .enumerate()
        .map(|(id, (label, group, score))| Item {
            id,
            label,
            group,
            score,
        })
        .collect()
}

fn filters() -> FilterSet<Item> {
    FilterSet::new()
        .facet(FacetDef::new(
            "group",
            "Group",
            (0..4)
                .map(|g| FilterOption::new(g.to_string(), format!("Group {g}")))
                .collect(),
            |i: &Item| i.group.to_string(),
        ))
        .search(SearchDef::new("Search", |i: &Item| i.label.clone()))
}

fn score_column() -> ColumnDef<Item> {
    ColumnDef::new("score", "Score")
        .sortable()
        .accessor(|i: &Item| i.score.into())
}

fn label_column() -> ColumnDef<Item> {
    ColumnDef::new("label", "Label")
        .sortable()
        .accessor(|i: &Item| i.label.as_str().into())
}

fn ids(rows: &[&Item]) -> Vec<usize> {
    rows.iter().map(|i| i.id).collect()
}

proptest! {
    // =========================================================================
    // Filter Properties
    // =========================================================================

    #[test]
    fn prop_filter_idempotent(
        raw in prop::collection::vec(item_strategy(), 0..60),
        groups in prop::collection::btree_set(0u8..4, 0..3),
        needle in "[a-z0-9]{0,2}",
    ) {
        let data = items(raw);
        let set = filters();
        let mut state = FilterState::default();
        for g in groups {
            state.toggle_facet("group", &g.to_string());
        }
        state.set_search(&needle);

        let once: Vec<Item> = set.apply(&data, &state).into_iter().cloned().collect();
        let twice = set.apply(&once, &state);
        prop_assert_eq!(ids(&twice), once.iter().map(|i| i.id).collect::<Vec<_>>());
    }

    // =========================================================================
    // Sort Properties
    // =========================================================================

    #[test]
    fn prop_sort_stable_round_trip(raw in prop::collection::vec(item_strategy(), 0..60)) {
        let data = items(raw);
        let refs: Vec<&Item> = data.iter().collect();
        let column = score_column();

        let asc = sort_rows(&refs, Some(&column), SortDirection::Ascending);
        let desc = sort_rows(&asc, Some(&column), SortDirection::Descending);
        let again = sort_rows(&desc, Some(&column), SortDirection::Ascending);

        let scores = |rows: &[&Item]| rows.iter().map(|i| i.score).collect::<Vec<_>>();
        prop_assert_eq!(scores(&again), scores(&asc));
        prop_assert!(asc.windows(2).all(|w| w[0].score <= w[1].score));
        prop_assert!(desc.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn prop_sort_keeps_ties_in_input_order(raw in prop::collection::vec(item_strategy(), 0..60)) {
        let data = items(raw);
        let refs: Vec<&Item> = data.iter().collect();
        let sorted = sort_rows(&refs, Some(&label_column()), SortDirection::Ascending);

        prop_assert_eq!(sorted.len(), data.len());
        for pair in sorted.windows(2) {
            let ord = natural_cmp(&pair[0].label, &pair[1].label);
            prop_assert!(ord.is_le());
            if ord.is_eq() {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn prop_sort_does_not_mutate_input(raw in prop::collection::vec(item_strategy(), 0..30)) {
        let data = items(raw);
        let refs: Vec<&Item> = data.iter().collect();
        let before = ids(&refs);
        let _ = sort_rows(&refs, Some(&label_column()), SortDirection::Descending);
        prop_assert_eq!(ids(&refs), before);
    }

    // =========================================================================
    // Pagination Properties
    // =========================================================================

    #[test]
    fn prop_pages_cover_rows_exactly(total in 0usize..300, per_page in 1usize..40) {
        let rows: Vec<usize> = (0..total).collect();
        let mut pagination = Pagination::new(vec![per_page], per_page);
        let pages = pagination.total_pages(total);
        prop_assert!(pages >= 1);

        let mut seen = Vec::with_capacity(total);
        for page in 1..=pages {
            pagination.set_page(page);
            seen.extend_from_slice(pagination.page(&rows));
        }
        prop_assert_eq!(seen, rows);
    }

    #[test]
    fn prop_safe_page_in_range(total in 0usize..300, per_page in 1usize..40, page in 0usize..100) {
        let mut pagination = Pagination::new(vec![per_page], per_page);
        pagination.set_page(page);
        let safe = pagination.safe_page(total);
        prop_assert!(safe >= 1);
        prop_assert!(safe <= pagination.total_pages(total));
        prop_assert!(pagination.page_range(total).end <= total);
    }

    // =========================================================================
    // Selection Properties
    // =========================================================================

    #[test]
    fn prop_selection_persists_across_filters(
        raw in prop::collection::vec(item_strategy(), 1..60),
        pick in any::<prop::sample::Index>(),
        group in 0u8..4,
    ) {
        let data = items(raw);
        let key = pick.index(data.len()).to_string();
        let mut table = DataTable::new(vec![score_column()], |i: &Item| i.id.to_string())
            .rows(data)
            .filters(filters())
            .selectable(true);

        table.toggle_select_row(&key);
        table.toggle_facet("group", &group.to_string());
        prop_assert!(table.is_selected(&key));
        table.clear_filters();
        prop_assert!(table.is_selected(&key));
    }

    #[test]
    fn prop_select_all_touches_only_current_page(
        page in 1usize..=3,
        preselected in prop::collection::btree_set(0usize..25, 0..10),
    ) {
        let data: Vec<Item> = (0..25)
            .map(|id| Item { id, label: format!("row {id}"), group: 0, score: 0 })
            .collect();
        let mut table = DataTable::new(vec![score_column()], |i: &Item| i.id.to_string())
            .rows(data)
            .selectable(true);
        for id in &preselected {
            table.toggle_select_row(&id.to_string());
        }
        table.set_page(page);

        let page_keys: Vec<String> = table.page_rows().iter().map(|i| i.id.to_string()).collect();
        let before: Vec<bool> = (0..25).map(|id| table.is_selected(&id.to_string())).collect();
        table.toggle_select_all();

        for id in 0..25usize {
            let key = id.to_string();
            if !page_keys.contains(&key) {
                prop_assert_eq!(table.is_selected(&key), before[id]);
            }
        }
        let all_on = page_keys.iter().all(|k| table.is_selected(k));
        let all_off = page_keys.iter().all(|k| !table.is_selected(k));
        prop_assert!(all_on || all_off);
    }

    // =========================================================================
    // Virtualization Properties
    // =========================================================================

    #[test]
    fn prop_window_conserves_rows(
        rows in 0usize..200,
        scroll in 0.0f32..20_000.0,
        viewport in 0.0f32..2_000.0,
        overscan in 0usize..10,
    ) {
        let config = TableConfig {
            rows_per_page_options: vec![200],
            default_rows_per_page: 200,
            virtualize: Some(WindowConfig { row_height: 44.0, overscan }),
            viewport_height: viewport,
            ..TableConfig::default()
        };
        let data: Vec<Item> = (0..rows)
            .map(|id| Item { id, label: String::new(), group: 0, score: 0 })
            .collect();
        let mut table = DataTable::new(vec![score_column()], |i: &Item| i.id.to_string())
            .with_config(config)
            .rows(data);
        table.set_scroll_top(scroll);

        let window = table.window();
        let rendered = table.rendered_rows().len();
        prop_assert_eq!(window.start + rendered + (rows - window.end), rows);
        let pads = window.pad_top + window.pad_bottom;
        let expected = (rows - rendered) as f32 * 44.0;
        prop_assert!((pads - expected).abs() < 0.01 * expected.max(1.0));
    }
}
