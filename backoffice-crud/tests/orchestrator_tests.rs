use backoffice_crud::{
    CrudConfig, DataSource, Effect, Latency, MemoryNotifier, MemorySource, ModalBody, ModalInput,
    ModalState, Orchestrator, Rect, Severity, Size, TableBody, CREATED_AT,
};
use backoffice_model::{
    ActionDescriptor, ActionKind, ColumnSchema, DetailConfig, FieldSchema, FilterState,
    FilterValue, PageConfig, Record, RecordId, SelectOption,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn record(value: Value) -> Record {
    Record::from_value(value).unwrap()
}

fn seed() -> Vec<Record> {
    vec![
        record(json!({"id": 1, "name": "A", "email": "a@example.com", "status": "active"})),
        record(json!({"id": 2, "name": "B", "email": "b@example.com", "status": "inactive"})),
    ]
}

fn page(records: Vec<Record>) -> PageConfig {
    let mut config = PageConfig::new("Admin Management");
    config.table.columns = vec![
        ColumnSchema::new("name", "Name"),
        ColumnSchema::new("email", "Email"),
    ];
    config.table.actions = vec![
        ActionDescriptor::edit("Edit"),
        ActionDescriptor::delete("Delete"),
        ActionDescriptor::new("Reset Password", ActionKind::Custom("reset_password".into())),
    ];
    config.table.search.enabled = true;
    config.table.pagination.enabled = true;
    config.table.pagination.page_size = 2;
    config.form.add = vec![FieldSchema::text("name", "Name").required()];
    config.filters = vec![FieldSchema::select(
        "status",
        "Status",
        vec![
            SelectOption::new("active", "Active"),
            SelectOption::new("inactive", "Inactive"),
        ],
    )];
    config.mock_data = records;
    config
}

struct Fixture {
    page: Orchestrator,
    source: MemorySource,
    notes: MemoryNotifier,
}

fn fixture_with(config: PageConfig, latency: Latency) -> Fixture {
    let notes = MemoryNotifier::new();
    let source = MemorySource::new(config.mock_data.clone(), latency);
    let page = Orchestrator::new(config, &CrudConfig::default(), Arc::new(notes.clone()));
    Fixture {
        page,
        source,
        notes,
    }
}

fn fixture() -> Fixture {
    fixture_with(page(seed()), Latency::default())
}

fn ids(page: &Orchestrator) -> Vec<RecordId> {
    page.collection().iter().map(|r| r.id.clone()).collect()
}

fn n(id: u64) -> RecordId {
    RecordId::Number(id)
}

// ── add / edit / delete scenarios ────────────────────────────────

#[tokio::test(start_paused = true)]
async fn add_prepends_with_next_id() {
    let Fixture {
        mut page,
        source,
        notes,
    } = fixture();

    assert!(page.open_add());
    assert_eq!(page.modal(), &ModalState::Adding);
    assert_eq!(page.selected(), None);

    page.set_field("name", "C");
    assert!(page.submit(&source).await);

    assert_eq!(ids(&page), vec![n(3), n(1), n(2)]);
    let added = page.collection().get(&n(3)).unwrap();
    assert_eq!(added.get_str("name"), Some("C"));
    assert!(added.fields.contains_key(CREATED_AT));
    assert_eq!(page.modal(), &ModalState::Closed);
    assert!(!page.form_loading());
    assert_eq!(
        notes.last(),
        Some(("Item added successfully".to_string(), Severity::Success))
    );
}

#[tokio::test(start_paused = true)]
async fn edit_merges_and_preserves_other_fields() {
    let Fixture {
        mut page,
        source,
        notes,
    } = fixture();

    assert_eq!(page.handle_action(&ActionKind::Edit, &n(1)), None);
    assert_eq!(page.selected().map(|r| r.id.clone()), Some(n(1)));
    assert_eq!(page.form().value("name"), Some(&json!("A")));

    page.set_field("name", "A2");
    assert!(page.submit(&source).await);

    assert_eq!(ids(&page), vec![n(1), n(2)]);
    let edited = page.collection().get(&n(1)).unwrap();
    assert_eq!(edited.get_str("name"), Some("A2"));
    assert_eq!(edited.get_str("email"), Some("a@example.com"));
    assert_eq!(page.modal(), &ModalState::Closed);
    assert_eq!(notes.last().unwrap().0, "Item updated successfully");
}

#[tokio::test(start_paused = true)]
async fn confirm_delete_removes_record() {
    let Fixture {
        mut page,
        source,
        notes,
    } = fixture();

    page.handle_action(&ActionKind::Delete, &n(2));
    assert!(matches!(page.modal(), ModalState::Deleting(r) if r.id == n(2)));
    assert!(page.confirm_delete(&source).await);

    assert_eq!(ids(&page), vec![n(1)]);
    assert_eq!(page.modal(), &ModalState::Closed);
    assert_eq!(notes.last().unwrap().0, "Item deleted successfully");
}

#[tokio::test(start_paused = true)]
async fn cancel_delete_leaves_collection_alone() {
    let Fixture {
        mut page, source, ..
    } = fixture();

    page.handle_action(&ActionKind::Delete, &n(2));
    assert!(page.modal_input(ModalInput::Button(0), &source).await);
    assert_eq!(ids(&page), vec![n(1), n(2)]);
    assert_eq!(page.modal(), &ModalState::Closed);
    assert_eq!(page.selected(), None);
}

#[tokio::test(start_paused = true)]
async fn validation_failure_keeps_form_open_without_request() {
    let Fixture {
        mut page,
        source,
        notes,
    } = fixture();

    page.open_add();
    assert!(page.begin_submit().is_none());
    assert!(!page.form_loading());
    assert_eq!(page.form().error("name"), Some("Name is required"));
    assert_eq!(page.modal(), &ModalState::Adding);
    assert!(notes.messages().is_empty());
    assert_eq!(source.snapshot().await.len(), 2);
}

// ── failures and in-flight guards ────────────────────────────────

#[tokio::test(start_paused = true)]
async fn failed_save_keeps_modal_open() {
    let Fixture {
        mut page,
        source,
        notes,
    } = fixture();

    page.handle_action(&ActionKind::Edit, &n(1));
    page.set_field("name", "A2");
    source.fail_next();
    assert!(!page.submit(&source).await);

    assert!(matches!(page.modal(), ModalState::Editing(_)));
    assert!(!page.form_loading());
    assert_eq!(page.collection().get(&n(1)).unwrap().get_str("name"), Some("A"));
    assert_eq!(
        notes.last(),
        Some(("Operation failed".to_string(), Severity::Error))
    );

    // Retry goes through.
    assert!(page.submit(&source).await);
    assert_eq!(page.collection().get(&n(1)).unwrap().get_str("name"), Some("A2"));
}

#[tokio::test(start_paused = true)]
async fn failed_delete_reports_delete_failed() {
    let Fixture {
        mut page,
        source,
        notes,
    } = fixture();

    page.handle_action(&ActionKind::Delete, &n(1));
    source.fail_next();
    assert!(!page.confirm_delete(&source).await);
    assert!(matches!(page.modal(), ModalState::Deleting(_)));
    assert_eq!(ids(&page), vec![n(1), n(2)]);
    assert_eq!(notes.last().unwrap().0, "Delete failed");
}

#[tokio::test(start_paused = true)]
async fn second_submit_is_ignored_while_loading() {
    let Fixture { mut page, .. } = fixture();

    page.open_add();
    page.set_field("name", "C");
    let first = page.begin_submit();
    assert!(first.is_some());
    assert!(page.form_loading());
    assert!(page.begin_submit().is_none());

    // Inputs are frozen too.
    page.set_field("name", "changed");
    assert_eq!(page.form().value("name"), Some(&json!("C")));
}

#[tokio::test(start_paused = true)]
async fn late_result_after_close_is_discarded() {
    let Fixture {
        mut page,
        source,
        notes,
    } = fixture();

    page.handle_action(&ActionKind::Edit, &n(1));
    page.set_field("name", "A2");
    let request = page.begin_submit().unwrap();

    page.close();
    assert!(!page.form_loading());

    let outcome = request.execute(&source).await;
    assert!(outcome.is_ok());
    assert!(!page.settle(outcome));

    assert_eq!(page.collection().get(&n(1)).unwrap().get_str("name"), Some("A"));
    assert_eq!(page.modal(), &ModalState::Closed);
    assert!(notes.messages().is_empty());
}

#[tokio::test(start_paused = true)]
async fn late_result_for_previous_target_is_discarded() {
    let Fixture {
        mut page, source, ..
    } = fixture();

    page.handle_action(&ActionKind::Delete, &n(1));
    let request = page.begin_delete().unwrap();
    page.close();
    page.handle_action(&ActionKind::Delete, &n(2));

    let outcome = request.execute(&source).await;
    assert!(!page.settle(outcome));
    assert!(matches!(page.modal(), ModalState::Deleting(r) if r.id == n(2)));
    assert_eq!(ids(&page), vec![n(1), n(2)]);
}

#[tokio::test(start_paused = true)]
async fn discarded_success_flags_reload() {
    let Fixture {
        mut page, source, ..
    } = fixture();

    page.handle_action(&ActionKind::Edit, &n(1));
    page.set_field("name", "A2");
    let request = page.begin_submit().unwrap();
    page.close();

    assert!(!page.settle(request.execute(&source).await));
    assert!(page.needs_reload());
    assert_eq!(page.collection().get(&n(1)).unwrap().get_str("name"), Some("A"));

    assert!(page.load(&source).await);
    assert!(!page.needs_reload());
    assert_eq!(page.collection().get(&n(1)).unwrap().get_str("name"), Some("A2"));
}

#[tokio::test(start_paused = true)]
async fn discarded_failure_needs_no_reload() {
    let Fixture {
        mut page, source, ..
    } = fixture();

    page.handle_action(&ActionKind::Delete, &n(1));
    let request = page.begin_delete().unwrap();
    page.close();
    source.fail_next();

    assert!(!page.settle(request.execute(&source).await));
    assert!(!page.needs_reload());
}

#[tokio::test(start_paused = true)]
async fn second_delete_confirm_is_ignored_while_in_flight() {
    let Fixture {
        mut page,
        source,
        notes,
    } = fixture();

    page.handle_action(&ActionKind::Delete, &n(2));
    let first = page.begin_delete();
    assert!(first.is_some());
    assert!(page.form_loading());
    assert!(page.begin_delete().is_none());

    assert!(page.settle(first.unwrap().execute(&source).await));
    assert_eq!(ids(&page), vec![n(1)]);
    assert_eq!(source.snapshot().await.len(), 1);
    assert_eq!(notes.messages().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn saves_take_the_simulated_latency() {
    let Fixture {
        mut page, source, ..
    } = fixture();

    let start = Instant::now();
    page.open_add();
    page.set_field("name", "C");
    page.submit(&source).await;
    assert_eq!(start.elapsed(), Duration::from_millis(1000));

    let start = Instant::now();
    page.handle_action(&ActionKind::Delete, &n(3));
    page.confirm_delete(&source).await;
    assert_eq!(start.elapsed(), Duration::from_millis(500));
}

// ── modal rendering ──────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn dialog_titles_use_entity_name() {
    let Fixture { mut page, .. } = fixture();

    page.open_add();
    assert_eq!(page.view().modal.unwrap().title, "Add New Admin");
    page.close();

    page.handle_action(&ActionKind::Edit, &n(2));
    let modal = page.view().modal.unwrap();
    assert_eq!(modal.title, "Edit Admin");
    assert_eq!(modal.buttons[1].label, "Update");
}

#[tokio::test(start_paused = true)]
async fn delete_dialog_wording_and_loading_state() {
    let Fixture { mut page, .. } = fixture();

    page.handle_action(&ActionKind::Delete, &n(2));
    let modal = page.view().modal.unwrap();
    assert_eq!(modal.title, "Confirm Delete");
    assert_eq!(
        modal.body,
        ModalBody::ConfirmDelete {
            question: "Are you sure you want to delete this item?".into(),
            warning: "This action cannot be undone. The item \"B\" will be permanently removed."
                .into(),
        }
    );

    page.begin_delete().unwrap();
    let modal = page.view().modal.unwrap();
    assert_eq!(modal.buttons[1].label, "Deleting...");
    assert!(modal.buttons.iter().all(|b| b.disabled));
}

#[tokio::test(start_paused = true)]
async fn backdrop_closes_and_drops_selection() {
    let Fixture {
        mut page, source, ..
    } = fixture();

    page.handle_action(&ActionKind::Edit, &n(1));
    assert!(page.modal_input(ModalInput::Backdrop, &source).await);
    assert_eq!(page.modal(), &ModalState::Closed);
    assert!(page.view().modal.is_none());
}

#[tokio::test(start_paused = true)]
async fn submit_button_routes_to_save() {
    let Fixture {
        mut page, source, ..
    } = fixture();

    page.open_add();
    page.set_field("name", "C");
    assert!(page.modal_input(ModalInput::Button(1), &source).await);
    assert_eq!(page.collection().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn only_one_dialog_at_a_time() {
    let Fixture { mut page, .. } = fixture();

    page.handle_action(&ActionKind::Edit, &n(1));
    assert!(!page.open_add());
    assert_eq!(page.handle_action(&ActionKind::Delete, &n(2)), None);
    assert!(matches!(page.modal(), ModalState::Editing(r) if r.id == n(1)));
    assert!(!page.open_filters());
}

// ── view and custom actions ──────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn view_without_detail_is_an_effect() {
    let Fixture { mut page, .. } = fixture();

    let effect = page.handle_action(&ActionKind::View, &n(1));
    assert!(matches!(effect, Some(Effect::View(r)) if r.id == n(1)));
    assert_eq!(page.modal(), &ModalState::Closed);
}

#[tokio::test(start_paused = true)]
async fn view_with_detail_opens_dialog() {
    let mut config = page(seed());
    config.detail = Some(DetailConfig {
        title: None,
        fields: vec![ColumnSchema::new("email", "Email")],
    });
    let Fixture { mut page, .. } = fixture_with(config, Latency::none());

    assert_eq!(page.handle_action(&ActionKind::View, &n(2)), None);
    let modal = page.view().modal.unwrap();
    assert_eq!(modal.title, "Admin Details");
    assert_eq!(
        modal.body,
        ModalBody::Detail(vec![("Email".to_string(), "b@example.com".to_string())])
    );
}

#[tokio::test(start_paused = true)]
async fn custom_action_is_handed_back() {
    let Fixture { mut page, .. } = fixture();

    page.toggle_menu(n(2), Rect::new(0.0, 0.0, 32.0, 32.0), Size::new(1024.0, 768.0));
    let effect = page.select_action(2);
    assert!(matches!(
        effect,
        Some(Effect::Custom { action, record }) if action == "reset_password" && record.id == n(2)
    ));
    assert!(!page.table().menu().is_open());
}

#[tokio::test(start_paused = true)]
async fn menu_edit_opens_editor() {
    let Fixture { mut page, .. } = fixture();

    page.toggle_menu(n(1), Rect::new(0.0, 0.0, 32.0, 32.0), Size::new(1024.0, 768.0));
    page.select_action(0);
    assert!(matches!(page.modal(), ModalState::Editing(r) if r.id == n(1)));
}

// ── search, filters and paging ───────────────────────────────────

fn five() -> Vec<Record> {
    (1..=5_u64)
        .rev()
        .map(|i| {
            record(json!({
                "id": i,
                "name": format!("User {i}"),
                "status": if i % 2 == 0 { "inactive" } else { "active" },
            }))
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn search_with_no_hits_shows_empty_state() {
    let Fixture { mut page, .. } = fixture();

    page.set_search("zzz", Instant::now());
    let view = page.view();
    assert_eq!(view.table.body, TableBody::Empty("No data available".into()));
    assert_eq!(view.table.pagination, None);
}

#[tokio::test(start_paused = true)]
async fn delete_on_last_page_clamps_page() {
    let Fixture {
        mut page, source, ..
    } = fixture_with(page(five()), Latency::none());

    page.go_to_page(3);
    assert_eq!(page.table().page(), 3);

    page.handle_action(&ActionKind::Delete, &n(1));
    assert!(page.confirm_delete(&source).await);
    assert_eq!(page.table().page(), 2);
    assert!(matches!(page.view().table.body, TableBody::Rows(rows) if rows.len() == 2));
}

#[tokio::test(start_paused = true)]
async fn filter_drawer_applies_and_resets() {
    let Fixture {
        mut page, source, ..
    } = fixture_with(page(five()), Latency::none());

    page.go_to_page(2);
    assert!(page.open_filters());
    let drawer = page.view().modal.unwrap();
    assert!(matches!(drawer.body, ModalBody::Filters(_)));
    let labels: Vec<_> = drawer.buttons.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Reset", "Apply Filters"]);

    page.set_filter("status", "inactive");
    assert!(page.filters().is_empty());
    assert!(page.modal_input(ModalInput::Button(1), &source).await);

    assert!(!page.filters_open());
    assert_eq!(page.table().page(), 1);
    assert_eq!(page.visible().len(), 2);
    assert_eq!(page.view().active_filters, 1);

    // Reset button clears the applied filters and closes the drawer.
    assert!(page.open_filters());
    assert!(page.modal_input(ModalInput::Button(0), &source).await);
    assert!(!page.filters_open());
    assert!(page.filters().is_empty());
    assert_eq!(page.view().active_filters, 0);
    assert_eq!(page.visible().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn filter_drawer_blocks_dialogs() {
    let Fixture { mut page, .. } = fixture();

    page.open_filters();
    assert!(!page.open_add());
    page.close_filters();
    assert!(page.open_add());
}

#[tokio::test(start_paused = true)]
async fn set_filters_resets_page() {
    let Fixture { mut page, .. } = fixture_with(page(five()), Latency::none());

    page.go_to_page(3);
    page.set_filters(FilterState::new().with("status", FilterValue::Text("inactive".into())));
    assert_eq!(page.table().page(), 1);
    assert_eq!(page.visible().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn remote_search_replaces_collection() {
    let mut config = page(five());
    config.table.search.mode = backoffice_model::SearchMode::Remote;
    let Fixture {
        mut page,
        source,
        ..
    } = fixture_with(config, Latency::default());

    let start = Instant::now();
    page.set_search("user 4", start);
    assert!(page.run_search(&source).await);
    assert_eq!(start.elapsed(), Duration::from_millis(600));
    assert_eq!(ids(&page), vec![n(4)]);
    assert!(!page.table().is_searching());
}

// ── loading ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn load_fills_collection() {
    let Fixture {
        mut page, source, ..
    } = fixture_with(page(Vec::new()), Latency::default());
    source.create(json!({"name": "Z"}).as_object().unwrap().clone()).await.unwrap();
    assert!(page.collection().is_empty());

    assert!(page.load(&source).await);
    assert_eq!(ids(&page), vec![n(1)]);
    assert!(!page.table().is_loading());
}

#[tokio::test(start_paused = true)]
async fn failed_load_notifies() {
    let Fixture {
        mut page,
        source,
        notes,
    } = fixture();

    source.fail_next();
    assert!(!page.load(&source).await);
    assert_eq!(
        notes.last(),
        Some(("Failed to fetch data".to_string(), Severity::Error))
    );
    assert_eq!(page.collection().len(), 2);
}
