use backoffice_model::{
    ActionDescriptor, ActionKind, ActionVariant, CellRender, ColumnSchema, FieldKind,
    FieldSchema, FilterState, FilterValue, PageConfig, Record, SearchMode, SelectOption,
    Validation,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

fn record(value: Value) -> Record {
    Record::from_value(value).unwrap()
}

// ── FieldSchema constructors ─────────────────────────────────────

#[test]
fn email_field_validates_email() {
    let f = FieldSchema::email("email", "Email Address").required();
    assert_eq!(f.kind, FieldKind::Email);
    assert!(f.required);
    assert_eq!(f.effective_validation(), Validation::Email);
}

#[test]
fn text_field_has_no_validation() {
    let f = FieldSchema::text("name", "Full Name");
    assert_eq!(f.effective_validation(), Validation::None);
    assert!(!f.required);
}

#[test]
fn auto_placeholders() {
    assert_eq!(FieldSchema::text("name", "Name").placeholder_text(), "Enter Name");
    let select = FieldSchema::select("role", "Role", vec![SelectOption::new("admin", "Admin")]);
    assert_eq!(select.placeholder_text(), "Select Role");
    let custom = FieldSchema::textarea("bio", "Bio", 3).with_placeholder("Tell us more");
    assert_eq!(custom.placeholder_text(), "Tell us more");
}

#[test]
fn options_only_for_select() {
    let select = FieldSchema::select("s", "S", vec![SelectOption::new("a", "A")]);
    assert_eq!(select.options().len(), 1);
    assert!(FieldSchema::text("t", "T").options().is_empty());
}

#[test]
fn field_schema_from_config_json() {
    let f: FieldSchema = serde_json::from_value(json!({
        "key": "bio",
        "label": "Bio / Notes",
        "type": "textarea",
        "rows": 3,
        "placeholder": "Additional information..."
    }))
    .unwrap();
    assert_eq!(f.kind, FieldKind::Textarea { rows: Some(3) });
    assert_eq!(f.placeholder.as_deref(), Some("Additional information..."));
    assert!(!f.required);
}

#[test]
fn image_alias_maps_to_file() {
    let f: FieldSchema =
        serde_json::from_value(json!({ "key": "avatar", "label": "Avatar", "type": "image" }))
            .unwrap();
    assert_eq!(f.kind, FieldKind::File { accept: None });
    assert_eq!(f.kind.tag(), "file");
}

// ── Column rendering ─────────────────────────────────────────────

#[test]
fn raw_column_shows_value() {
    let r = record(json!({ "id": 1, "name": "Alice" }));
    assert_eq!(ColumnSchema::new("name", "Name").cell(&r), "Alice");
    assert_eq!(ColumnSchema::new("id", "ID").cell(&r), "1");
    assert_eq!(ColumnSchema::new("missing", "Missing").cell(&r), "");
}

#[test]
fn badge_column_maps_labels() {
    let column = ColumnSchema::new("role", "Admin Level").with_render(CellRender::Badge {
        labels: vec![
            SelectOption::new("admin", "Super Admin"),
            SelectOption::new("moderator", "Moderator"),
        ],
    });
    assert_eq!(column.cell(&record(json!({ "id": 1, "role": "admin" }))), "Super Admin");
    assert_eq!(column.cell(&record(json!({ "id": 2, "role": "guest" }))), "guest");
}

#[test]
fn template_column_reads_whole_record() {
    let column = ColumnSchema::new("user", "Info").with_render(CellRender::Template {
        template: "{first_name} {last_name} <{email}>".into(),
    });
    let r = record(json!({ "id": 1, "first_name": "Main", "last_name": "Admin", "email": "a@x.io" }));
    assert_eq!(column.cell(&r), "Main Admin <a@x.io>");
}

#[test]
fn template_with_unclosed_brace_is_kept() {
    let column = ColumnSchema::new("x", "X").with_render(CellRender::Template {
        template: "#{id} {oops".into(),
    });
    assert_eq!(column.cell(&record(json!({ "id": 4 }))), "#4 {oops");
}

#[test]
fn date_and_boolean_and_masked() {
    let r = record(json!({ "id": 1, "at": "2024-01-05T10:00:00Z", "on": true, "pw": "secret" }));
    assert_eq!(ColumnSchema::new("at", "At").with_render(CellRender::Date).cell(&r), "2024-01-05");
    let yes_no = CellRender::Boolean { yes: "Yes".into(), no: "No".into() };
    assert_eq!(ColumnSchema::new("on", "On").with_render(yes_no.clone()).cell(&r), "Yes");
    assert_eq!(ColumnSchema::new("off", "Off").with_render(yes_no).cell(&r), "No");
    assert_eq!(ColumnSchema::new("pw", "Pw").with_render(CellRender::Masked).cell(&r), "••••••");
}

#[test]
fn column_render_defaults_to_raw_in_json() {
    let c: ColumnSchema = serde_json::from_value(json!({ "key": "id", "title": "ID" })).unwrap();
    assert_eq!(c.render, CellRender::Raw);
}

// ── ActionDescriptor ─────────────────────────────────────────────

#[test]
fn action_kind_from_tag() {
    let a: ActionDescriptor =
        serde_json::from_value(json!({ "title": "Delete Admin", "type": "delete", "variant": "danger" }))
            .unwrap();
    assert_eq!(a.kind, ActionKind::Delete);
    assert_eq!(a.variant, ActionVariant::Danger);

    let c: ActionDescriptor =
        serde_json::from_value(json!({ "title": "Reset", "type": "reset_password" })).unwrap();
    assert_eq!(c.kind, ActionKind::Custom("reset_password".into()));
}

#[test]
fn action_kind_serializes_as_tag() {
    let a = ActionDescriptor::edit("Edit");
    let value = serde_json::to_value(&a).unwrap();
    assert_eq!(value["type"], json!("edit"));
    assert_eq!(ActionDescriptor::delete("Delete").variant, ActionVariant::Danger);
}

// ── FilterValue ──────────────────────────────────────────────────

#[test]
fn text_filter_contains_case_insensitively() {
    let f = FilterValue::Text("ENG".into());
    assert!(f.matches(Some(&json!("Engineering"))));
    assert!(!f.matches(Some(&json!("Sales"))));
    assert!(!f.matches(None));
    assert!(!f.matches(Some(&json!(null))));
}

#[test]
fn select_values_match_by_substring_on_strings() {
    let f = FilterValue::Text("active".into());
    assert!(f.matches(Some(&json!("Active"))));
    assert!(f.matches(Some(&json!("inactive"))));
    assert!(!f.matches(Some(&json!("pending"))));
}

#[test]
fn non_string_values_need_equal_text() {
    let f = FilterValue::Text("1".into());
    assert!(f.matches(Some(&json!(1))));
    assert!(!f.matches(Some(&json!(10))));
    assert!(FilterValue::Text("TRUE".into()).matches(Some(&json!(true))));
}

#[test]
fn scalar_filters_use_equality() {
    assert!(FilterValue::Number(3.0).matches(Some(&json!(3))));
    assert!(!FilterValue::Number(3.0).matches(Some(&json!("3"))));
    assert!(FilterValue::Bool(true).matches(Some(&json!(true))));
    assert!(FilterValue::Text("5".into()).matches(Some(&json!(5))));
}

#[test]
fn filter_state_ignores_empty_values() {
    let mut state = FilterState::new();
    state.set("status", FilterValue::Text(String::new()));
    assert!(state.is_empty());
    state.set("status", FilterValue::Text("active".into()));
    assert_eq!(state.len(), 1);
    state.set("status", FilterValue::Text("  ".into()));
    assert!(state.is_empty());
}

// ── PageConfig ───────────────────────────────────────────────────

#[test]
fn page_config_from_json_with_defaults() {
    let page = PageConfig::from_json(
        r#"{
            "title": "Admin Management",
            "table": {
                "search": { "enabled": true, "placeholder": "Search admins..." },
                "pagination": { "enabled": true, "page_size": 5 },
                "columns": [ { "key": "id", "title": "ID" }, { "key": "name", "title": "Full Name" } ],
                "actions": [ { "title": "Edit Admin", "type": "edit" } ]
            },
            "form": { "add": [ { "key": "name", "label": "Full Name", "type": "text", "required": true } ] },
            "mock_data": [ { "id": 1, "name": "Root" } ]
        }"#,
    )
    .unwrap();

    assert_eq!(page.entity_name(), "Admin");
    assert_eq!(page.table.search.mode, SearchMode::Local);
    assert_eq!(page.table.pagination.page_size, 5);
    assert_eq!(page.table.empty_message, "No data available");
    assert_eq!(page.table.search_keys(), vec!["id".to_string(), "name".to_string()]);
    assert_eq!(page.form.add.len(), 1);
    assert_eq!(page.form.edit_submit_text, "Update");
    assert_eq!(page.mock_data.len(), 1);
    assert!(page.detail.is_none());
    assert_eq!(page.new_record_defaults, Map::new());
}

#[test]
fn entity_name_without_suffix() {
    assert_eq!(PageConfig::new("My Team").entity_name(), "My Team");
}

#[test]
fn bad_page_json_is_an_error() {
    assert!(PageConfig::from_json("{ \"table\": 1 }").is_err());
}
