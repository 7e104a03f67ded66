//! Plain-text drawing of view-models.

use backoffice_crud::{
    FieldView, ModalBody, ModalView, PageView, Placement, Severity, TableBody, TableView,
};
use backoffice_session::User;
use std::fmt::Write as _;

use crate::dashboard::Tile;

/// Longest cell text before it is cut with `…`.
const MAX_CELL: usize = 28;

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(MAX_CELL - 1).collect();
        cut.push('…');
        cut
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Column-aligned rows, first row as the header.
fn grid(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| pad(cell, w))
            .collect();
        let _ = writeln!(out, "  {}", line.join("  ").trim_end());
        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
            let _ = writeln!(out, "  {}", rule.join("  "));
        }
    }
    out
}

pub fn table(view: &TableView) -> String {
    let mut out = String::new();
    if let Some(search) = &view.search {
        let term = if search.term.is_empty() {
            format!("({})", search.placeholder)
        } else {
            search.term.clone()
        };
        let busy = if search.is_searching { " searching..." } else { "" };
        let _ = writeln!(out, "  search: {term}{busy}");
    }

    match &view.body {
        TableBody::Loading => {
            out.push_str(&grid(std::slice::from_ref(&view.headers)));
            out.push_str("  Loading...\n");
        }
        TableBody::Empty(message) => {
            out.push_str(&grid(std::slice::from_ref(&view.headers)));
            let _ = writeln!(out, "  {message}");
        }
        TableBody::Rows(rows) => {
            let mut grid_rows = vec![view.headers.clone()];
            for row in rows {
                let mut cells: Vec<String> = row.cells.iter().map(|c| clip(c)).collect();
                if row.has_actions {
                    cells.push(format!("[{}]", row.id));
                }
                grid_rows.push(cells);
            }
            out.push_str(&grid(&grid_rows));
        }
    }

    if let Some(pagination) = &view.pagination {
        let _ = writeln!(out, "  {}    {}", pagination.summary(), pagination.label());
    }
    if let Some(menu) = &view.menu {
        let _ = writeln!(out, "  actions for [{}]:", menu.row);
        for (i, item) in menu.items.iter().enumerate() {
            let mark = if item.danger { " (!)" } else { "" };
            let _ = writeln!(out, "    {i}. {}{mark}", item.title);
        }
    }
    out
}

fn field(out: &mut String, field: &FieldView) {
    let required = if field.required { "*" } else { "" };
    let value = if field.value.is_empty() {
        format!("({})", field.placeholder)
    } else if field.kind == "password" {
        "••••••".to_string()
    } else {
        field.value.clone()
    };
    let _ = writeln!(out, "    {}{required} [{}]: {value}", field.label, field.key);
    if !field.options.is_empty() {
        let choices: Vec<&str> = field.options.iter().map(|(v, _)| v.as_str()).collect();
        let _ = writeln!(out, "      one of: {}", choices.join(", "));
    }
    if let Some(error) = &field.error {
        let _ = writeln!(out, "      ! {error}");
    }
}

pub fn modal(view: &ModalView<ModalBody>) -> String {
    let mut out = String::new();
    let edge = match view.placement {
        Placement::Center => "==",
        Placement::Right => ">>",
    };
    let _ = writeln!(out, "  {edge} {} {edge}", view.title);
    match &view.body {
        ModalBody::Form(form) => {
            for f in &form.fields {
                field(&mut out, f);
            }
        }
        ModalBody::ConfirmDelete { question, warning } => {
            let _ = writeln!(out, "    {question}");
            let _ = writeln!(out, "    {warning}");
        }
        ModalBody::Detail(rows) => {
            for (label, value) in rows {
                let _ = writeln!(out, "    {label}: {value}");
            }
        }
        ModalBody::Filters(panel) => {
            for f in &panel.fields {
                let value = if f.value.is_empty() { "All" } else { f.value.as_str() };
                let _ = writeln!(out, "    {} [{}]: {value}", f.label, f.key);
            }
        }
    }
    let buttons: Vec<String> = view
        .buttons
        .iter()
        .map(|b| {
            if b.disabled {
                format!("({})", b.label)
            } else {
                format!("[{}]", b.label)
            }
        })
        .collect();
    if !buttons.is_empty() {
        let _ = writeln!(out, "    {}", buttons.join(" "));
    }
    out
}

pub fn page(view: &PageView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    if !view.description.is_empty() {
        let _ = writeln!(out, "{}", view.description);
    }
    if view.can_filter && view.active_filters > 0 {
        let _ = writeln!(out, "  filters: {} active", view.active_filters);
    }
    out.push('\n');
    out.push_str(&table(&view.table));
    if let Some(m) = &view.modal {
        out.push('\n');
        out.push_str(&modal(m));
    }
    out
}

pub fn dashboard(tiles: &[Tile]) -> String {
    let mut out = String::from("Dashboard Overview\nMonitor your platform performance and key insights\n\n");
    for (i, tile) in tiles.iter().enumerate() {
        let link = tile.link.map(|l| format!("  -> {l}")).unwrap_or_default();
        let _ = writeln!(out, "  {i}. {:<22} {:>10}{link}", tile.title, tile.value);
    }
    out
}

pub fn profile(user: &User) -> String {
    format!(
        "Profile Settings\n  Name:  {}\n  Email: {}\n  Role:  {}\n",
        user.full_name(),
        user.email,
        user.role
    )
}

pub fn nav(items: &[(String, String)], current: &str) -> String {
    let labels: Vec<String> = items
        .iter()
        .map(|(key, label)| {
            if key == current {
                format!("*{label}*")
            } else {
                label.clone()
            }
        })
        .collect();
    labels.join(" | ")
}

pub fn toast(message: &str, severity: Severity) -> String {
    let tag = match severity {
        Severity::Success => "ok",
        Severity::Info => "info",
        Severity::Warning => "warn",
        Severity::Error => "error",
    };
    format!("[{tag}] {message}")
}
