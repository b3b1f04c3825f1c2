//! Navigation selection calculations
//!
//! Pure functions for moving the cursor through the visible page.

/// Move the cursor by `delta` rows, clamped to `[0, len - 1]`
///
/// Returns `None` when the page is empty.
///
/// # Examples
/// ```
/// use keytui::logic::navigation::move_cursor;
///
/// assert_eq!(move_cursor(Some(0), 1, 3), Some(1));
/// assert_eq!(move_cursor(Some(2), 1, 3), Some(2));
/// assert_eq!(move_cursor(Some(0), -1, 3), Some(0));
/// assert_eq!(move_cursor(None, 1, 0), None);
/// ```
pub fn move_cursor(current: Option<usize>, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let current = current.unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    Some(next as usize)
}

/// Keep the cursor inside a page that may have shrunk
pub fn clamp_cursor(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(current.unwrap_or(0).min(len - 1))
    }
}

/// Find the row of a key name on the current page
pub fn find_row_by_name<'a, I>(names: I, name: &str) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().position(|n| n == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_cursor_page_jump() {
        assert_eq!(move_cursor(Some(5), 10, 8), Some(7));
        assert_eq!(move_cursor(Some(5), -10, 8), Some(0));
    }

    #[test]
    fn test_move_cursor_from_none() {
        assert_eq!(move_cursor(None, 1, 4), Some(1));
        assert_eq!(move_cursor(None, 0, 4), Some(0));
    }

    #[test]
    fn test_clamp_cursor() {
        assert_eq!(clamp_cursor(Some(9), 3), Some(2));
        assert_eq!(clamp_cursor(Some(1), 3), Some(1));
        assert_eq!(clamp_cursor(Some(1), 0), None);
        assert_eq!(clamp_cursor(None, 2), Some(0));
    }

    #[test]
    fn test_find_row_by_name() {
        let names = ["a", "b", "c"];
        assert_eq!(find_row_by_name(names.iter().copied(), "b"), Some(1));
        assert_eq!(find_row_by_name(names.iter().copied(), "z"), None);
    }
}
