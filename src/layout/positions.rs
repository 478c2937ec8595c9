//! Coordinate propagation.
//!
//! Pure positional bookkeeping run after a structural edit: neither function
//! touches class, flags or links.

use super::stream::{TokenId, TokenStream};

/// Add `delta` to the column of `start` and of every following token on the same
/// row. Stops before the first token on another row. `None` is a no-op.
pub fn shift_columns_to_line_end(stream: &mut TokenStream, start: Option<TokenId>, delta: isize) {
    let Some(start) = start else {
        return;
    };
    let Some(row) = stream.get(start).map(|token| token.row) else {
        return;
    };
    if delta == 0 {
        return;
    }

    let mut cursor = Some(start);
    while let Some(id) = cursor {
        let token = &mut stream[id];
        if token.row != row {
            break;
        }
        token.col = token.col.saturating_add_signed(delta);
        cursor = stream.next(id);
    }
}

/// Add `delta` to the row of `start` and of every token after it, up to the end of
/// the stream. `None` is a no-op.
pub fn shift_rows_to_end(stream: &mut TokenStream, start: Option<TokenId>, delta: isize) {
    let Some(start) = start else {
        return;
    };
    if delta == 0 {
        return;
    }

    let mut cursor = Some(start).filter(|id| stream.contains(*id));
    while let Some(id) = cursor {
        let token = &mut stream[id];
        token.row = token.row.saturating_add_signed(delta);
        cursor = stream.next(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::testing::tokenize;

    fn positions(stream: &TokenStream) -> Vec<(usize, usize)> {
        stream.iter().map(|(_, t)| (t.row, t.col)).collect()
    }

    #[test]
    fn test_columns_stop_at_row_change() {
        let mut stream = tokenize("a b\nc");
        let b = stream.skip_until(stream.head().unwrap(), crate::layout::TokenClass::Identifier, "b");

        shift_columns_to_line_end(&mut stream, b, 3);

        // a, " ", b, "\n" on row 0 then c on row 1
        assert_eq!(positions(&stream), vec![(0, 0), (0, 1), (0, 5), (0, 6), (1, 0)]);
    }

    #[test]
    fn test_rows_shift_to_end_of_stream() {
        let mut stream = tokenize("a\nb\nc");
        let b = stream.skip_until(stream.head().unwrap(), crate::layout::TokenClass::Identifier, "b");

        shift_rows_to_end(&mut stream, b, 1);

        let rows: Vec<_> = stream.iter().map(|(_, t)| t.row).collect();
        assert_eq!(rows, vec![0, 0, 2, 2, 3]);
    }

    #[test]
    fn test_none_is_noop() {
        let mut stream = tokenize("a b");
        let before = stream.to_vec();
        shift_columns_to_line_end(&mut stream, None, 4);
        shift_rows_to_end(&mut stream, None, 4);
        assert_eq!(stream.to_vec(), before);
    }
}
