//! Text helpers registered on every store connection.
//!
//! SQLite's built-in `lower()` only folds ASCII. `fold(text)` lowercases
//! the full Unicode range; `NULL` stays `NULL`.

use super::{DbError, DbResult};
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

const FOLD: &str = "fold";

pub(crate) fn register_text_functions(conn: &Connection) -> DbResult<()> {
    conn.create_scalar_function(
        FOLD,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|text| text.to_lowercase())),
    )
    .map_err(|source| DbError::Function { name: FOLD, source })
}

#[cfg(test)]
mod tests {
    use super::register_text_functions;
    use rusqlite::Connection;

    #[test]
    fn fold_lowercases_accented_letters() {
        let conn = Connection::open_in_memory().unwrap();
        register_text_functions(&conn).unwrap();

        let folded: String = conn
            .query_row("SELECT fold('JOSÉ ÁLVAREZ Ñandú');", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "josé álvarez ñandú");

        let missing: Option<String> = conn
            .query_row("SELECT fold(NULL);", [], |row| row.get(0))
            .unwrap();
        assert_eq!(missing, None);
    }
}
