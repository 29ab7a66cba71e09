//! Admission check for caller-supplied SQL.

const SELECT_PREFIX: &str = "select";

/// Trimmed statement if it starts with `select` (any case), otherwise `None`.
///
/// This is a prefix check only. It is not a parser and not a security boundary:
/// `select ...; delete ...` or a writable CTE behind a SELECT pass.
pub fn admit_select(query: &str) -> Option<&str> {
    let trimmed = query.trim();
    trimmed
        .get(..SELECT_PREFIX.len())
        .filter(|head| head.eq_ignore_ascii_case(SELECT_PREFIX))
        .map(|_| trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_select_any_case() {
        assert_eq!(admit_select("SELECT 1 AS x"), Some("SELECT 1 AS x"));
        assert_eq!(admit_select("  \n\tsElEcT * from users  \n"), Some("sElEcT * from users"));
        assert_eq!(admit_select("select"), Some("select"));
        assert_eq!(admit_select("selectx"), Some("selectx"));
    }

    #[test]
    fn rejects_everything_else() {
        for q in [
            "",
            "   ",
            "sel",
            "insert into users values (1)",
            "DELETE FROM users",
            "with x as (select 1) select * from x",
            "-- select\nselect 1",
            "(select 1)",
            "éselect",
        ] {
            assert_eq!(admit_select(q), None, "{q:?}");
        }
    }

    #[test]
    fn multibyte_prefix_does_not_panic() {
        assert_eq!(admit_select("séléct 1"), None);
        assert_eq!(admit_select("ß"), None);
    }
}
