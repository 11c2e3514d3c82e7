use anyhow::{Result, bail};

pub const OBJECT_PREFIX: &str = "(O)";
pub const BIG_CRAFTABLE_PREFIX: &str = "(BC)";

/// Strip a leading `(O)` qualifier. Other prefixes (`(BC)`, `(H)`, ...) and
/// negative category codes pass through untouched; callers special-case those.
pub fn trim(code: &str) -> &str {
    code.strip_prefix(OBJECT_PREFIX).unwrap_or(code)
}

/// Prepend the `(O)` qualifier unless the code already carries it.
pub fn qualify(code: &str) -> String {
    if code.starts_with(OBJECT_PREFIX) {
        code.to_string()
    } else {
        format!("{OBJECT_PREFIX}{code}")
    }
}

/// Split a parenthesized kind-prefix off a token: `(H)566` -> (`(H)`, `566`).
/// Returns `None` when the token carries no such prefix.
pub fn split_prefix(token: &str) -> Option<(&str, &str)> {
    if !token.starts_with('(') {
        return None;
    }
    let close = token.find(')')?;
    Some((&token[..=close], &token[close + 1..]))
}

/// Negative codes are "any item of class X" sentinels, not items.
pub fn is_category_sentinel(code: &str) -> bool {
    code.starts_with('-')
}

/// Display label for a category sentinel. The sentinel table is static input;
/// an unrecognized code means the recipe data itself is wrong, so this is a
/// hard error rather than a skipped record.
pub fn category_label(code: &str) -> Result<&'static str> {
    let label = match code {
        "-4" => "Any Fish",
        "-5" => "Any Egg",
        "-6" => "Any Milk",
        "-7" => "Any Oil",
        "-777" => "Any Seasonal Seed",
        _ => bail!("unknown category sentinel code: {code}"),
    };
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_strips_object_prefix_only() {
        assert_eq!(trim("(O)188"), "188");
        assert_eq!(trim("188"), "188");
        assert_eq!(trim("(BC)12"), "(BC)12");
        assert_eq!(trim("-4"), "-4");
    }

    #[test]
    fn qualify_is_idempotent() {
        assert_eq!(qualify("188"), "(O)188");
        assert_eq!(qualify("(O)188"), "(O)188");
        assert_eq!(qualify(&qualify("390")), qualify("390"));
    }

    #[test]
    fn trim_and_qualify_are_partial_inverses() {
        for code in ["16", "(O)16", "770"] {
            assert_eq!(trim(&qualify(code)), trim(code));
        }
    }

    #[test]
    fn split_prefix_handles_arbitrary_kinds() {
        assert_eq!(split_prefix("(H)566"), Some(("(H)", "566")));
        assert_eq!(split_prefix("(BC)12"), Some(("(BC)", "12")));
        assert_eq!(split_prefix("388"), None);
        assert_eq!(split_prefix("-4"), None);
    }

    #[test]
    fn category_labels_cover_known_sentinels() {
        assert_eq!(category_label("-4").expect("fish"), "Any Fish");
        assert_eq!(category_label("-777").expect("seeds"), "Any Seasonal Seed");
    }

    #[test]
    fn unknown_sentinel_is_a_hard_error() {
        let error = category_label("-999").expect_err("must fail");
        assert!(error.to_string().contains("-999"));
    }
}
