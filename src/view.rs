//! Plain-text rendering of a todo list.

use crate::models::{TodoItem, TodoList};

const DONE: &str = "[x]";
const ACTIVE: &str = "[ ]";

/// `word` for a count of one, `word` + "s" otherwise.
pub fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

fn render_item(output: &mut String, item: &TodoItem) {
    output.push_str(if item.is_done() { DONE } else { ACTIVE });
    output.push(' ');
    output.push_str(item.id().as_str());
    output.push_str("  ");
    output.push_str(item.title());
    output.push('\n');
}

/// The "mark all" checkbox above the items. Checked once every item is done,
/// hidden when the list is empty.
pub fn render_toggle_all(list: &TodoList) -> String {
    if list.is_empty() {
        return String::new();
    }

    let mark = if list.all_done() { DONE } else { ACTIVE };
    format!("{mark} Mark all as complete\n")
}

/// One line per item, in list order.
///
/// ```text
/// [x] todo-id-1  buy milk
/// [ ] todo-id-2  walk dog
/// ```
pub fn render_items(list: &TodoList) -> String {
    let mut output = String::new();
    for item in list {
        render_item(&mut output, item);
    }
    output
}

/// Item counts under the list. Empty when the list is.
///
/// The "clear" line only shows up once something is completed.
pub fn render_footer(list: &TodoList) -> String {
    if list.is_empty() {
        return String::new();
    }

    let active = list.active_count();
    let completed = list.completed_count();

    let mut output = format!("{} {} left\n", active, pluralize(active, "item"));
    if completed > 0 {
        output.push_str(&format!(
            "Clear {} completed {}\n",
            completed,
            pluralize(completed, "item")
        ));
    }
    output
}

/// The "mark all" line, the list, then its footer.
pub fn render(list: &TodoList) -> String {
    let mut output = render_toggle_all(list);
    output.push_str(&render_items(list));
    output.push_str(&render_footer(list));
    output
}
