//! Display ordering: incomplete items first, completed items last
//!
//! Both groups keep their original relative order, so the result is a
//! stable partition rather than a sort.

use crate::model::Completion;

/// Order `items` for display using `is_complete` as the completion predicate.
///
/// # Example
/// ```
/// use todolists_core::ordering::sort_for_display;
///
/// let sorted = sort_for_display(vec![1, 2, 3, 4], |n| n % 2 == 0);
/// assert_eq!(sorted, vec![1, 3, 2, 4]);
/// ```
pub fn sort_for_display<T, I, F>(items: I, is_complete: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> bool,
{
    let (complete, mut incomplete): (Vec<T>, Vec<T>) =
        items.into_iter().partition(|item| is_complete(item));
    incomplete.extend(complete);
    incomplete
}

/// [`sort_for_display`] for anything implementing [`Completion`].
///
/// Works for owned values and for references, so a list can be ordered
/// without cloning it: `sort_by_completion(&list.todos)`.
pub fn sort_by_completion<T, I>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Completion,
{
    sort_for_display(items, |item| item.is_complete())
}
