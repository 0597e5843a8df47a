use chatmate_fs::{NormalizedPath, is_path_safe, sanitize_input, validate_filename, validate_path};
use proptest::prelude::*;

const DANGEROUS: &[char] = &['~', '$', '`', '|', '&', ';', '(', ')', '{', '}', '[', ']'];

proptest! {
    #[test]
    fn any_double_dot_is_rejected(prefix in "\\PC*", suffix in "\\PC*") {
        let path = format!("{prefix}..{suffix}");
        prop_assert!(validate_path(&path).is_err());
    }

    #[test]
    fn any_dangerous_character_is_rejected(
        prefix in "[a-z/]{0,8}",
        idx in 0..DANGEROUS.len(),
        suffix in "[a-z]{0,8}",
    ) {
        let path = format!("{prefix}{}{suffix}", DANGEROUS[idx]);
        prop_assert!(validate_path(&path).is_err());
    }

    #[test]
    fn absolute_paths_are_rejected(rest in "[a-z/]{0,16}") {
        let path = format!("/{rest}");
        prop_assert!(validate_path(&path).is_err());
    }

    #[test]
    fn sanitized_input_has_no_c0_controls_except_newline_and_tab(s in "\\PC*|[\\x00-\\x1f a-z]*") {
        let clean = sanitize_input(&s);
        prop_assert!(!clean.contains('\0'));
        prop_assert!(clean.chars().all(|c| c == '\n' || c == '\t' || !('\0'..='\x1f').contains(&c)));
        prop_assert_eq!(&clean, &sanitize_input(s.replace('\0', "").trim()));
    }

    #[test]
    fn valid_filenames_stay_confined(name in "[A-Za-z0-9_-][A-Za-z0-9 ._-]{0,40}") {
        prop_assume!(validate_filename(&name).is_ok());
        prop_assume!(!name.starts_with(".."));
        let base = NormalizedPath::new("/home/user/prompts");
        prop_assert!(is_path_safe(base.as_str(), base.join(&name).as_str()));
    }

    #[test]
    fn climbing_out_is_never_safe(depth in 1usize..6, leaf in "[a-z]{1,8}") {
        let base = "/home/user/prompts";
        let target = format!("{base}/{}{leaf}", "../".repeat(depth + 3));
        prop_assert!(!is_path_safe(base, &target));
    }
}
