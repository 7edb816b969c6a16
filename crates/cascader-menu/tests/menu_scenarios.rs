//! End-to-end menu flows driven the way a host input would drive them.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use cascader_menu::key::{Key, ValuePath, path};
use cascader_menu::option::find_by_path_mut;
use cascader_menu::{
    CascaderConfig, CascaderMenu, CascaderOption, Direction, Event, ExpandTrigger, FieldNames,
    KeyCode, KeyEvent, KeyOutcome, MenuContext, SelectionHost,
};

/// Host input holding the committed value and the dropdown state.
#[derive(Default)]
struct Host {
    value: ValuePath,
    commits: Vec<ValuePath>,
    open: bool,
}

impl Host {
    fn opened() -> Self {
        Self {
            open: true,
            ..Self::default()
        }
    }
}

impl SelectionHost for Host {
    fn on_select(&mut self, path: &[Key]) {
        self.value = path.to_vec();
        self.commits.push(path.to_vec());
    }

    fn toggle_open(&mut self, open: bool) {
        self.open = open;
    }
}

fn press(
    menu: &mut CascaderMenu<CascaderOption>,
    ctx: &MenuContext<'_, CascaderOption>,
    host: &mut Host,
    code: KeyCode,
) -> KeyOutcome {
    menu.handle_key(&KeyEvent::new(code), ctx, host)
}

fn region_tree() -> Vec<CascaderOption> {
    vec![
        CascaderOption::new("zj")
            .with_label("Zhejiang")
            .child(
                CascaderOption::new("hz")
                    .with_label("Hangzhou")
                    .child(CascaderOption::new("xh").with_label("West Lake")),
            )
            .child(CascaderOption::new("nb").with_label("Ningbo").with_disabled(true)),
        CascaderOption::new("js")
            .with_label("Jiangsu")
            .child(CascaderOption::new("nj").with_label("Nanjing")),
    ]
}

fn menu(config: CascaderConfig) -> CascaderMenu<CascaderOption> {
    CascaderMenu::new(FieldNames::standard(), config)
}

// ============================================================================
// Pointer flows
// ============================================================================

#[test]
fn two_level_select_closes_and_emits_path() {
    let tree = vec![CascaderOption::new("a").child(CascaderOption::new("b"))];
    let ctx = MenuContext::new(&tree);
    let mut menu = menu(CascaderConfig::default());
    let mut host = Host::opened();

    assert_eq!(menu.view(&ctx).columns().len(), 1);

    menu.on_option_click(&path(["a"]), &tree[0], &ctx, &mut host);
    assert!(host.commits.is_empty(), "branch is not selectable");
    assert!(host.open);

    let view = menu.view(&ctx);
    assert_eq!(view.columns().len(), 2);
    assert_eq!(view.columns()[1].prev_path, path(["a"]));

    let b = &tree[0].children.as_ref().unwrap()[0];
    menu.on_option_click(&path(["a", "b"]), b, &ctx, &mut host);
    assert_eq!(host.value, path(["a", "b"]));
    assert!(!host.open);
}

#[test]
fn change_on_select_commits_every_level() {
    let tree = region_tree();
    let ctx = MenuContext::new(&tree);
    let mut menu = menu(CascaderConfig::default().with_change_on_select(true));
    let mut host = Host::opened();

    menu.on_option_click(&path(["zj"]), &tree[0], &ctx, &mut host);
    assert_eq!(host.commits, vec![path(["zj"])]);
    assert!(host.open, "click trigger keeps the dropdown open on a branch");

    menu.on_option_double_click(&mut host);
    assert!(!host.open);
}

#[test]
fn multiple_never_closes_on_branch() {
    let tree = region_tree();
    let values = vec![path(["zj", "hz", "xh"])];
    let ctx = MenuContext::new(&tree).with_values(&values);
    let mut menu = menu(CascaderConfig::default().with_multiple(true));
    let mut host = Host::opened();

    menu.on_option_click(&path(["zj"]), &tree[0], &ctx, &mut host);
    assert!(host.commits.is_empty(), "click on a branch only opens");
    assert_eq!(menu.active_path(), path(["zj"]).as_slice());

    assert!(menu.on_checkbox_click(&path(["zj"]), &tree[0], &ctx, &mut host));
    assert_eq!(host.commits, vec![path(["zj"])]);
    assert!(host.open);

    menu.on_path_open(&path(["zj", "hz"]), &ctx);
    let view = menu.view(&ctx);
    assert!(view.columns().iter().all(|c| c.multiple));
    let xh = &view.columns()[2].entries[0];
    assert!(xh.checked);
    assert!(!view.columns()[0].entries[0].checked);
}

#[test]
fn empty_roots_render_not_found_placeholder() {
    let tree: Vec<CascaderOption> = Vec::new();
    let ctx = MenuContext::new(&tree);
    let menu = menu(
        CascaderConfig::default()
            .with_multiple(true)
            .with_not_found_content("No Data"),
    );

    let view = menu.view(&ctx);
    assert!(view.is_empty());
    assert_eq!(view.columns().len(), 1);

    let column = &view.columns()[0];
    assert!(!column.multiple);
    let entry = &column.entries[0];
    assert!(entry.is_placeholder());
    assert_eq!(entry.label.as_deref(), Some("No Data"));
    assert!(entry.disabled);
    assert!(!entry.selectable);
}

#[test]
fn hover_trigger_expands_without_click() {
    let tree = region_tree();
    let ctx = MenuContext::new(&tree);
    let mut menu = menu(CascaderConfig::default().with_expand_trigger(ExpandTrigger::Hover));
    let mut host = Host::opened();

    menu.on_option_hover(&path(["js"]), &tree[1], &ctx);
    assert_eq!(menu.columns(&ctx).len(), 2);

    let nj = &tree[1].children.as_ref().unwrap()[0];
    menu.on_option_hover(&path(["js", "nj"]), nj, &ctx);
    assert_eq!(menu.active_path(), path(["js"]).as_slice(), "leaves do not open on hover");

    menu.on_option_click(&path(["js", "nj"]), nj, &ctx, &mut host);
    assert_eq!(host.value, path(["js", "nj"]));
    assert!(!host.open);
}

// ============================================================================
// Lazy loading
// ============================================================================

#[test]
fn lazy_load_round_trip() {
    let calls: Rc<RefCell<Vec<ValuePath>>> = Rc::default();
    let sink = Rc::clone(&calls);
    let mut menu = menu(CascaderConfig::default()).with_loader(move |chain: &[&CascaderOption]| {
        let values = chain.iter().map(|o| o.value.clone()).collect();
        sink.borrow_mut().push(values);
    });

    let mut tree = vec![CascaderOption::new("remote").with_leaf(false)];
    {
        let ctx = MenuContext::new(&tree);
        assert!(menu.on_path_open(&path(["remote"]), &ctx));
        let view = menu.view(&ctx);
        assert!(view.columns()[0].entries[0].loading);
    }
    assert_eq!(calls.borrow()[0], path(["remote"]));

    // The host answers the load by attaching children.
    if let Some(remote) = find_by_path_mut(&mut tree, &path(["remote"])) {
        remote.is_leaf = None;
        remote.children = Some(vec![CascaderOption::new("a"), CascaderOption::new("b")]);
    }

    let ctx = MenuContext::new(&tree);
    assert_eq!(menu.reconcile(&ctx), 1);
    assert!(menu.loading().is_empty());

    let view = menu.view(&ctx);
    assert_eq!(view.columns().len(), 2);
    assert!(!view.columns()[0].entries[0].loading);
    assert_eq!(view.columns()[1].entries.len(), 2);
}

#[test]
fn lazy_load_with_empty_answer_settles() {
    let mut menu = menu(CascaderConfig::default()).with_loader(|_: &[&CascaderOption]| {});
    let mut tree = vec![CascaderOption::new("remote").with_leaf(false)];
    menu.on_path_open(&path(["remote"]), &MenuContext::new(&tree));

    tree[0].is_leaf = None;
    tree[0].children = Some(Vec::new());
    let ctx = MenuContext::new(&tree);
    assert_eq!(menu.reconcile(&ctx), 1);
    assert_eq!(menu.view(&ctx).columns().len(), 1, "empty children add no column");
}

#[test]
fn search_suspends_lazy_loading() {
    let calls = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&calls);
    let mut menu = menu(CascaderConfig::default()).with_loader(move |_: &[&CascaderOption]| {
        *sink.borrow_mut() += 1;
    });

    let tree = vec![CascaderOption::new("remote").with_leaf(false)];
    let hits = vec![CascaderOption::new("remote")];
    let ctx = MenuContext::new(&tree).with_search("rem", &hits);
    assert!(!menu.on_path_open(&path(["remote"]), &ctx));
    assert_eq!(*calls.borrow(), 0);
}

// ============================================================================
// Keyboard flows
// ============================================================================

#[test]
fn keyboard_walks_down_the_tree_and_commits() {
    let tree = region_tree();
    let ctx = MenuContext::new(&tree);
    let mut menu = menu(CascaderConfig::default());
    let mut host = Host::opened();

    assert_eq!(press(&mut menu, &ctx, &mut host, KeyCode::Down), KeyOutcome::Navigated);
    assert_eq!(menu.active_path(), path(["zj"]).as_slice());

    assert_eq!(press(&mut menu, &ctx, &mut host, KeyCode::Right), KeyOutcome::Navigated);
    assert_eq!(menu.active_path(), path(["zj", "hz"]).as_slice());

    // nb is disabled, so Down wraps back onto hz.
    press(&mut menu, &ctx, &mut host, KeyCode::Down);
    assert_eq!(menu.active_path(), path(["zj", "hz"]).as_slice());

    // Enter on a branch is a no-op commit.
    assert_eq!(press(&mut menu, &ctx, &mut host, KeyCode::Enter), KeyOutcome::Submitted);
    assert!(host.commits.is_empty());

    press(&mut menu, &ctx, &mut host, KeyCode::Right);
    press(&mut menu, &ctx, &mut host, KeyCode::Enter);
    assert_eq!(host.value, path(["zj", "hz", "xh"]));
    assert!(!host.open);
}

#[test]
fn keyboard_back_out_closes_at_root() {
    let tree = region_tree();
    let ctx = MenuContext::new(&tree);
    let mut menu = menu(CascaderConfig::default());
    let mut host = Host::opened();

    menu.on_path_open(&path(["js", "nj"]), &ctx);
    press(&mut menu, &ctx, &mut host, KeyCode::Backspace);
    assert_eq!(menu.active_path(), path(["js"]).as_slice());
    assert!(host.open);

    assert_eq!(press(&mut menu, &ctx, &mut host, KeyCode::Left), KeyOutcome::Closed);
    assert!(!host.open);
}

#[test]
fn rtl_swaps_horizontal_keys() {
    let tree = region_tree();
    let ctx = MenuContext::new(&tree);
    let mut menu = menu(CascaderConfig::default().with_direction(Direction::Rtl));
    let mut host = Host::opened();

    menu.on_path_open(&path(["js"]), &ctx);
    press(&mut menu, &ctx, &mut host, KeyCode::Left);
    assert_eq!(menu.active_path(), path(["js", "nj"]).as_slice());
    press(&mut menu, &ctx, &mut host, KeyCode::Right);
    assert_eq!(menu.active_path(), path(["js"]).as_slice());
}

#[test]
fn search_enter_commits_origin_path() {
    let tree = region_tree();
    let hits = vec![
        CascaderOption::new("zj / hz / xh")
            .with_label("Zhejiang / Hangzhou / West Lake")
            .with_origin_path(path(["zj", "hz", "xh"])),
        CascaderOption::new("js / nj")
            .with_label("Jiangsu / Nanjing")
            .with_origin_path(path(["js", "nj"])),
    ];
    let ctx = MenuContext::new(&tree).with_search("n", &hits);
    let mut menu = menu(CascaderConfig::default());
    let mut host = Host::opened();

    let view = menu.view(&ctx);
    assert_eq!(view.columns().len(), 1);
    assert_eq!(view.columns()[0].entries.len(), 2);

    press(&mut menu, &ctx, &mut host, KeyCode::End);
    assert_eq!(menu.active_path(), path(["js / nj"]).as_slice());

    // Horizontal keys are inert while searching.
    assert_eq!(press(&mut menu, &ctx, &mut host, KeyCode::Right), KeyOutcome::Ignored);

    press(&mut menu, &ctx, &mut host, KeyCode::Enter);
    assert_eq!(host.value, path(["js", "nj"]));
    assert!(!host.open);
}

#[test]
fn multiple_search_rows_reflect_selection() {
    let tree = region_tree();
    let hits = vec![
        CascaderOption::new("zj / hz / xh").with_origin_path(path(["zj", "hz", "xh"])),
        CascaderOption::new("zj / nb").with_origin_path(path(["zj", "nb"])),
        CascaderOption::new("js / nj").with_origin_path(path(["js", "nj"])),
    ];
    let menu = menu(CascaderConfig::default().with_multiple(true));
    let mut host = Host::opened();

    // Check West Lake from the search results.
    {
        let ctx = MenuContext::new(&tree).with_search("n", &hits);
        let view = menu.view(&ctx);
        let row = &view.columns()[0].entries[0];
        assert!(!row.checked);
        assert!(menu.on_checkbox_click(&row.path, &hits[0], &ctx, &mut host));
    }
    assert_eq!(host.commits, vec![path(["zj", "hz", "xh"])]);
    assert!(host.open);

    // The host merges the commit into its values and re-renders.
    let values = host.commits.clone();
    let half = vec![path(["zj"]), path(["zj", "hz"])];
    let ctx = MenuContext::new(&tree)
        .with_search("n", &hits)
        .with_values(&values)
        .with_half_values(&half);
    let view = menu.view(&ctx);
    let rows = &view.columns()[0].entries;
    assert!(rows[0].checked);
    assert!(!rows[0].half_checked);
    assert!(!rows[1].checked);
    assert!(!rows[1].selectable, "Ningbo is disabled in the tree");
    assert!(!menu.on_checkbox_click(&rows[1].path, &hits[1], &ctx, &mut host));
    assert!(rows[2].selectable);
    assert!(!rows[2].checked);
}

#[test]
fn focus_loss_and_escape_close() {
    let tree = region_tree();
    let ctx = MenuContext::new(&tree);
    let mut menu = menu(CascaderConfig::default());

    let mut host = Host::opened();
    let outcome = menu.handle_event(&Event::Focus(false), &ctx, &mut host);
    assert_eq!(outcome, KeyOutcome::Closed);
    assert!(!host.open);

    let mut host = Host::opened();
    assert_eq!(press(&mut menu, &ctx, &mut host, KeyCode::Escape), KeyOutcome::Closed);
    assert!(!host.open);

    let mut host = Host::opened();
    assert_eq!(
        menu.handle_event(&Event::Focus(true), &ctx, &mut host),
        KeyOutcome::Ignored
    );
    assert!(host.open);
}

// ============================================================================
// Environment config
// ============================================================================

#[test]
fn env_config_drives_the_menu() {
    let vars: HashMap<&str, &str> =
        HashMap::from([("CASCADER_DIRECTION", "rtl"), ("CASCADER_EXPAND_TRIGGER", "hover")]);
    let parsed = CascaderConfig::from_env_with(|key| vars.get(key).map(|v| (*v).to_string()));
    assert!(parsed.errors.is_empty());

    let tree = region_tree();
    let ctx = MenuContext::new(&tree);
    let mut menu = menu(parsed.config);
    let mut host = Host::opened();

    menu.on_option_hover(&path(["zj"]), &tree[0], &ctx);
    assert_eq!(menu.active_path(), path(["zj"]).as_slice());
    press(&mut menu, &ctx, &mut host, KeyCode::Left);
    assert_eq!(menu.active_path(), path(["zj", "hz"]).as_slice());
}
