//! Faceted search through the combobox bridge against an in-memory table.

use std::cell::RefCell;
use std::rc::Rc;

use catalog_core::prelude::*;
use catalog_test_utils::fixtures;
use catalog_test_utils::widgets::{FakeSelect, FakeTable};
use catalog_ui::prelude::*;

type Bridge = ComboboxBridge<Rc<RefCell<FakeSelect>>, Rc<RefCell<FakeTable>>>;

struct Harness {
    bridge: Bridge,
    select: Rc<RefCell<FakeSelect>>,
    table: Rc<RefCell<FakeTable>>,
    all: Vec<String>,
}

fn harness() -> Harness {
    let catalog = UnitCatalog::from_value(&Classifier::default(), &fixtures::sample_units())
        .expect("sample units should classify");
    let rows: Vec<RowAttributes> = catalog.iter().map(RowAttributes::from_profile).collect();
    let all = rows.iter().map(|r| r.search_text.clone()).collect();
    let options: Vec<FacetOption> = catalog
        .facet_index(&IconLibrary::default())
        .options()
        .cloned()
        .collect();

    let table = FakeTable::new(vec![SortHeader::sortable("Name", "name")], rows).shared();
    let select = Rc::new(RefCell::new(FakeSelect::default()));
    let bridge = ComboboxBridge::new(Rc::clone(&select), Rc::clone(&table), options);
    Harness {
        bridge,
        select,
        table,
        all,
    }
}

impl Harness {
    fn visible(&self) -> Vec<String> {
        self.table.borrow().visible_names()
    }

    fn pick(&mut self, value: &str) {
        self.select.borrow_mut().user_select(value);
        self.bridge.on_selection_changed();
    }
}

#[test]
fn test_initial_state_shows_everything() {
    let h = harness();
    assert_eq!(h.visible(), h.all);
    assert_eq!(h.table.borrow().filter_count(), 1);
}

#[test]
fn test_single_facet_filters_conjunctively() {
    let mut h = harness();
    h.pick("Builder");
    assert_eq!(h.visible(), vec!["armck", "corck"]);

    h.pick("Cortex");
    assert_eq!(h.visible(), vec!["corck"]);
}

#[test]
fn test_facet_kinds_are_partitioned() {
    let mut h = harness();
    h.pick("Legion");
    h.pick("Bot");
    let state = h.bridge.filter_state();
    let state = state.borrow();
    assert!(state.selected_factions().contains("Legion"));
    assert!(state.selected_tags().contains("Bot"));
    assert!(!state.selected_tags().contains("Legion"));
    drop(state);
    assert_eq!(h.visible(), vec!["legcom"]);
}

#[test]
fn test_selecting_twice_is_idempotent() {
    let mut h = harness();
    h.pick("Weapon");
    let once = h.visible();
    h.bridge.apply_filters();
    h.bridge.apply_filters();
    assert_eq!(h.visible(), once);
    assert_eq!(once, vec!["armpw", "corak"]);
}

#[test]
fn test_word_boundaries_keep_tags_apart() {
    let mut h = harness();
    h.pick("Air");
    assert_eq!(h.visible(), vec!["armatlas"]);
}

#[test]
fn test_free_text_combines_with_tags() {
    let mut h = harness();
    h.pick("Building");
    h.bridge.on_input(" com");
    assert!(h.visible().is_empty());

    h.bridge.on_input("LAB");
    assert_eq!(h.visible(), vec!["armlab"]);

    let mut h = harness();
    h.bridge.on_input("com");
    assert_eq!(h.visible(), vec!["armcom", "legcom"]);
}

#[test]
fn test_free_text_matching_nothing_hides_all_rows() {
    let mut h = harness();
    h.bridge.on_input("zzzz");
    assert!(h.visible().is_empty());
}

#[test]
fn test_clearing_restores_full_row_set() {
    let mut h = harness();
    h.pick("Bot");
    h.pick("Armada");
    h.bridge.on_input("arm");
    assert_ne!(h.visible(), h.all);

    h.bridge.set_selection(Vec::new());
    h.bridge.on_input("");
    assert_eq!(h.visible(), h.all);
    assert!(h.bridge.filter_state().borrow().is_empty());
}

#[test]
fn test_enter_commits_matching_option() {
    let mut h = harness();
    h.bridge.on_input("  factory ");
    assert!(h.bridge.on_key(Key::Enter));
    assert_eq!(h.select.borrow().selection, vec!["Factory"]);
    assert_eq!(h.bridge.input(), "");
    assert_eq!(h.visible(), vec!["armlab"]);

    h.bridge.on_input("FACTORY");
    assert!(h.bridge.on_key(Key::Enter));
    assert_eq!(h.select.borrow().selection, vec!["Factory"]);
    assert_eq!(h.bridge.input(), "");
}

#[test]
fn test_enter_ignores_unknown_text() {
    let mut h = harness();
    h.bridge.on_input("Laser");
    assert!(!h.bridge.on_key(Key::Enter));
    assert!(h.select.borrow().selection.is_empty());
    assert_eq!(h.bridge.input(), "Laser");
}

#[test]
fn test_backspace_on_empty_input_removes_last_selection() {
    let mut h = harness();
    h.pick("Armada");
    h.pick("Bot");
    assert!(h.bridge.on_key(Key::Backspace));
    assert_eq!(h.select.borrow().selection, vec!["Armada"]);

    h.bridge.on_input("x");
    assert!(!h.bridge.on_key(Key::Backspace));
    assert_eq!(h.select.borrow().selection, vec!["Armada"]);

    h.bridge.on_input("");
    assert!(h.bridge.on_key(Key::Backspace));
    assert!(!h.bridge.on_key(Key::Backspace));
    assert_eq!(h.visible(), h.all);
}

#[test]
fn test_tag_chip_adds_and_suppresses_one_open() {
    let mut h = harness();
    h.select.borrow_mut().open = true;
    h.bridge.on_tag_chip_click("Transport");
    assert_eq!(h.select.borrow().selection, vec!["Transport"]);
    assert!(!h.select.borrow().open);
    assert_eq!(h.visible(), vec!["armatlas"]);

    assert!(!h.bridge.on_open_request());
    assert!(h.bridge.on_open_request());

    h.bridge.on_tag_chip_click("Transport");
    assert_eq!(h.select.borrow().selection, vec!["Transport"]);
}

#[test]
fn test_tag_chip_ignores_factions_and_unknown_values() {
    let mut h = harness();
    h.bridge.on_tag_chip_click("Armada");
    h.bridge.on_tag_chip_click("Nonsense");
    assert!(h.select.borrow().selection.is_empty());
    assert!(h.bridge.on_open_request());
}

#[test]
fn test_row_filter_installed_once_per_table() {
    let h = harness();
    let mut table = Rc::clone(&h.table);
    let draws = h.table.borrow().draws;
    let state = install_row_filter(&mut table);
    assert!(Rc::ptr_eq(&state, &h.bridge.filter_state()));
    assert_eq!(h.table.borrow().filter_count(), 1);
    assert_eq!(h.table.borrow().draws, draws);
}

#[test]
fn test_second_bridge_drives_installed_predicate() {
    let mut h = harness();
    h.pick("Bot");
    assert_ne!(h.visible(), h.all);

    let select = Rc::new(RefCell::new(FakeSelect::default()));
    let mut second = ComboboxBridge::new(
        Rc::clone(&select),
        Rc::clone(&h.table),
        h.bridge.options().to_vec(),
    );
    assert_eq!(h.table.borrow().filter_count(), 1);
    assert_eq!(h.visible(), h.all);

    second.on_input("armcom");
    assert_eq!(h.visible(), vec!["armcom"]);
}

#[test]
fn test_each_change_draws_once() {
    let mut h = harness();
    let before = h.table.borrow().draws;
    h.pick("Bot");
    assert_eq!(h.table.borrow().draws, before + 1);
    h.bridge.on_input("a");
    assert_eq!(h.table.borrow().draws, before + 2);
}
