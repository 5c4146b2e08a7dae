//! Property-based tests for submodule declaration parsing and branch
//! classification.

#[cfg(test)]
mod proptest_tests {
    use crate::config::Settings;
    use crate::submodule::{parse_declarations, Branch};
    use proptest::prelude::*;

    fn listing_for(entries: &[(String, String)]) -> String {
        entries
            .iter()
            .map(|(name, url)| {
                format!(
                    "submodule.models/{name}/repo.path models/{name}/repo\nsubmodule.models/{name}/repo.url {url}\n"
                )
            })
            .collect()
    }

    proptest! {
        /// Property: arbitrary input never panics and never yields an empty path
        #[test]
        fn parse_declarations_never_yields_empty_paths(input in ".*") {
            for declaration in parse_declarations(&input).unwrap() {
                prop_assert!(!declaration.path.as_os_str().is_empty());
            }
        }

        /// Property: one declaration per distinct model, in listing order
        #[test]
        fn parse_declarations_preserves_order(
            models in prop::collection::btree_set("[A-Z0-9]{3,8}", 0..8),
            url in "https://example\\.com/[a-z]{1,10}\\.git",
        ) {
            let entries: Vec<(String, String)> =
                models.iter().map(|m| (m.clone(), url.clone())).collect();
            let declarations = parse_declarations(&listing_for(&entries)).unwrap();

            prop_assert_eq!(declarations.len(), entries.len());
            for (declaration, (model, url)) in declarations.iter().zip(&entries) {
                let expected_path = format!("models/{}/repo", model);
                prop_assert_eq!(declaration.path.to_string_lossy(), expected_path.as_str());
                prop_assert_eq!(declaration.url.as_deref(), Some(url.as_str()));
            }
        }

        /// Property: only names in the protected set are protected
        #[test]
        fn classification_matches_protected_set(name in "[a-z0-9./_-]{1,20}") {
            let settings = Settings::default();
            let expected = name == "master" || name == "stable";
            prop_assert_eq!(Branch::classify(&name, &settings).protected, expected);
        }

        /// Property: extending the protected set never unprotects a branch
        #[test]
        fn extra_protected_names_are_additive(name in "[a-z]{1,10}", extra in "[a-z]{1,10}") {
            let mut settings = Settings::default();
            let before = Branch::classify(&name, &settings).protected;
            settings.protected_branches.push(extra.clone());
            let after = Branch::classify(&name, &settings).protected;
            prop_assert!(after || !before);
            prop_assert_eq!(after, before || name == extra);
        }
    }
}
