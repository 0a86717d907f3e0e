//! Generated public identifiers for portfolios, sections and work items.
//!
//! A public id is `<prefix>_<hex>` where the hex part is the simple form of a
//! random UUID v4. It is assigned once at insert and never rewritten.

use uuid::Uuid;

pub const PORTFOLIO_PREFIX: &str = "pf";
pub const SECTION_PREFIX: &str = "sec";
pub const WORK_ITEM_PREFIX: &str = "wi";

/// Length of the random hex token after the prefix separator.
pub const TOKEN_LEN: usize = 32;

/// Generate a new public id with the given prefix.
pub fn generate_public_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

/// Check that `id` looks like an id produced by [`generate_public_id`] for `prefix`.
pub fn is_public_id(id: &str, prefix: &str) -> bool {
    match id.split_once('_') {
        Some((p, token)) => {
            p == prefix
                && token.len() == TOKEN_LEN
                && token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_carry_prefix() {
        let id = generate_public_id(PORTFOLIO_PREFIX);
        assert!(id.starts_with("pf_"));
        assert!(is_public_id(&id, PORTFOLIO_PREFIX));
        assert!(!is_public_id(&id, SECTION_PREFIX));
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<String> = (0..500)
            .map(|_| generate_public_id(WORK_ITEM_PREFIX))
            .collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(!is_public_id("pf", PORTFOLIO_PREFIX));
        assert!(!is_public_id("pf_xyz", PORTFOLIO_PREFIX));
        assert!(!is_public_id(
            "pf_ABCDEF0123456789ABCDEF0123456789",
            PORTFOLIO_PREFIX
        ));
    }
}
