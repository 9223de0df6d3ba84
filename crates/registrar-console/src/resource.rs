//! Per-resource behaviour plugged into the generic [`Controller`](crate::Controller).

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::form::{FormData, FormField, ValidationError};
use crate::router::Page;
use crate::view::TableRow;

/// A remote collection and how the client shows, filters and writes it.
pub trait Resource: Send + Sync + 'static {
    /// Record as read from the collection endpoint.
    type Item: DeserializeOwned + Clone + Debug + Send + Sync;
    /// Body sent on create (and update, for editable resources).
    type Draft: Serialize + Send + Sync;
    /// Extra exact-match filter dimension. Resources without one use
    /// [`std::convert::Infallible`].
    type Facet: Copy + PartialEq + Debug + Send + Sync;

    const PAGE: Page;
    /// Collection path (`/students`).
    const PATH: &'static str;
    /// Lower-case singular noun (`student`).
    const NOUN: &'static str;
    const EMPTY: &'static str;
    const CREATED: &'static str;
    const DELETED: &'static str;

    fn id(item: &Self::Item) -> i64;

    /// Name shown in confirmation dialogs.
    fn label(item: &Self::Item) -> String;

    /// Case-insensitive substring match; `needle` is already lower-cased.
    fn matches(item: &Self::Item, needle: &str) -> bool;

    fn facet(_item: &Self::Item) -> Option<Self::Facet> {
        None
    }

    fn columns() -> Vec<&'static str>;

    fn row(item: &Self::Item) -> TableRow;

    /// Validate a submitted form into a request body.
    fn draft(form: &FormData) -> Result<Self::Draft, ValidationError>;

    /// Title and text of the delete confirmation for record `id`.
    fn confirm_text(id: i64, item: Option<&Self::Item>) -> (String, String) {
        let name = item.map_or_else(|| format!("#{id}"), Self::label);
        (
            format!("Delete {}", capitalize(Self::NOUN)),
            format!("Are you sure you want to delete {name}? This action cannot be undone."),
        )
    }
}

/// Resources whose records are edited through a full form.
pub trait Editable: Resource {
    const UPDATED: &'static str;
    const CREATE_TITLE: &'static str;
    const CREATE_LABEL: &'static str;
    const EDIT_TITLE: &'static str;

    /// Form fields, pre-filled from `item` when editing.
    fn form(item: Option<&Self::Item>) -> Vec<FormField>;
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("course"), "Course");
        assert_eq!(capitalize(""), "");
    }
}
