// Text and JSON rendering of the current view

use crate::filter::Tab;
use crate::store::Change;
use crate::task::Task;
use crate::view::{Row, ViewState};
use colored::Colorize;
use serde::Serialize;

/// How views and changes are written to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Plain text, no escape codes
    Plain,
    /// Text with finished tasks dimmed and struck through
    Color,
    /// One JSON document per line
    Json,
}

impl Style {
    pub fn from_flags(json: bool, color: bool) -> Self {
        match (json, color) {
            (true, _) => Style::Json,
            (false, true) => Style::Color,
            (false, false) => Style::Plain,
        }
    }
}

#[derive(Serialize)]
struct ViewDoc<'a> {
    tab: Tab,
    query: &'a str,
    rows: &'a [Row],
}

#[derive(Serialize)]
struct ChangeDoc<'a> {
    #[serde(flatten)]
    change: &'a Change,
    tasks: &'a [Task],
}

/// Tab bar with the active tab bracketed, e.g. `[ALL]  TODO  FINISHED`
pub fn tab_bar(active: Tab, style: Style) -> String {
    Tab::ALL_TABS
        .iter()
        .map(|tab| {
            if *tab == active {
                let label = format!("[{}]", tab);
                match style {
                    Style::Color => label.bold().to_string(),
                    _ => label,
                }
            } else {
                tab.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// One list line, e.g. `  2. [ ] Add a new task`
pub fn row_line(row: &Row, style: Style) -> String {
    let mark = if row.is_finished { "[x]" } else { "[ ]" };
    let text = format!("{} {}", mark, row.title);
    let text = match (style, row.is_finished) {
        (Style::Color, true) => text.dimmed().strikethrough().to_string(),
        _ => text,
    };
    format!("{:>3}. {}", row.number, text)
}

/// Render the whole view: tab bar, optional search line, rows
pub fn view(state: &ViewState, rows: &[Row], style: Style) -> serde_json::Result<String> {
    if style == Style::Json {
        let doc = ViewDoc {
            tab: state.tab,
            query: state.search_query.trim(),
            rows,
        };
        return serde_json::to_string(&doc);
    }

    let mut out = tab_bar(state.tab, style);
    let query = state.search_query.trim();
    if !query.is_empty() {
        out.push_str(&format!("  search: \"{}\"", query));
    }
    out.push('\n');

    if rows.is_empty() {
        out.push_str("  (no tasks)\n");
    }
    for row in rows {
        out.push_str(&row_line(row, style));
        out.push('\n');
    }
    Ok(out.trim_end().to_string())
}

/// JSON line describing a change and the full sequence after it
pub fn change_json(change: &Change, tasks: &[Task]) -> serde_json::Result<String> {
    serde_json::to_string(&ChangeDoc { change, tasks })
}

/// A free-form message in the given style
///
/// Text styles print `text` as is; JSON wraps it as `{"<key>": text}`.
pub fn message(key: &str, text: &str, style: Style) -> serde_json::Result<String> {
    match style {
        Style::Json => {
            let mut doc = serde_json::Map::new();
            doc.insert(key.to_string(), serde_json::Value::String(text.to_string()));
            serde_json::to_string(&doc)
        }
        Style::Plain | Style::Color => Ok(text.to_string()),
    }
}

/// An error line: `error: ...` as text, `{"error": "..."}` as JSON
pub fn error(err: &dyn std::fmt::Display, style: Style) -> serde_json::Result<String> {
    match style {
        Style::Json => message("error", &err.to_string(), style),
        Style::Plain | Style::Color => Ok(format!("error: {}", err)),
    }
}
