//! Response bodies for the list pages
//!
//! Each view is what a template would need to render the page: items
//! already in display order, counts precomputed, and the flash message
//! taken from the session.

use serde::Serialize;
use todolists_core::{sort_by_completion, ListId, Todo, TodoList};

use crate::session::Flash;

/// One row on the list overview
#[derive(Debug, Serialize)]
pub struct ListSummary {
    pub id: ListId,
    pub name: String,
    pub todos_count: usize,
    pub todos_remaining: usize,
    pub complete: bool,
}

impl From<&TodoList> for ListSummary {
    fn from(list: &TodoList) -> Self {
        Self {
            id: list.id,
            name: list.name.clone(),
            todos_count: list.todo_count(),
            todos_remaining: list.remaining_count(),
            complete: list.is_complete(),
        }
    }
}

/// GET /lists
#[derive(Debug, Serialize)]
pub struct ListsPage {
    pub flash: Option<Flash>,
    pub lists: Vec<ListSummary>,
}

impl ListsPage {
    pub fn new(flash: Option<Flash>, lists: &[TodoList]) -> Self {
        Self {
            flash,
            lists: sort_by_completion(lists)
                .into_iter()
                .map(ListSummary::from)
                .collect(),
        }
    }
}

/// A single list with its todos in display order
#[derive(Debug, Serialize)]
pub struct ListDetail {
    #[serde(flatten)]
    pub summary: ListSummary,
    pub todos: Vec<Todo>,
}

impl From<TodoList> for ListDetail {
    fn from(list: TodoList) -> Self {
        let summary = ListSummary::from(&list);
        Self {
            summary,
            todos: sort_by_completion(list.todos),
        }
    }
}

/// GET /lists/{id}
#[derive(Debug, Serialize)]
pub struct ListPage {
    pub flash: Option<Flash>,
    pub list: ListDetail,
}

/// GET /lists/new
#[derive(Debug, Serialize)]
pub struct NewListPage {
    pub flash: Option<Flash>,
}

/// GET /lists/{id}/edit
#[derive(Debug, Serialize)]
pub struct EditListPage {
    pub flash: Option<Flash>,
    pub id: ListId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use todolists_core::TodoId;

    fn list(id: i64, name: &str, statuses: &[bool]) -> TodoList {
        let mut list = TodoList::new(ListId(id), name);
        for (i, &done) in statuses.iter().enumerate() {
            list.todos
                .push(Todo::new(TodoId(i as i64 + 1), format!("{name} {i}"), done));
        }
        list
    }

    #[test]
    fn overview_puts_complete_lists_last() {
        let lists = vec![
            list(1, "Done", &[true, true]),
            list(2, "Open", &[true, false]),
            list(3, "Empty", &[]),
        ];
        let page = ListsPage::new(None, &lists);

        let names: Vec<_> = page.lists.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Open", "Empty", "Done"]);
        assert_eq!(page.lists[0].todos_count, 2);
        assert_eq!(page.lists[0].todos_remaining, 1);
        assert!(page.lists[2].complete);
    }

    #[test]
    fn detail_flattens_summary() {
        let detail = ListDetail::from(list(5, "Groceries", &[true, false]));
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["id"], 5);
        assert_eq!(json["name"], "Groceries");
        assert_eq!(json["todos_remaining"], 1);
        assert_eq!(json["todos"][0]["completed"], false);
        assert_eq!(json["todos"][1]["completed"], true);
    }

    #[test]
    fn flash_serializes_with_kind() {
        let page = EditListPage {
            flash: Some(Flash::Error("nope".into())),
            id: ListId(1),
            name: "x".into(),
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["flash"]["kind"], "error");
        assert_eq!(json["flash"]["message"], "nope");
    }
}
