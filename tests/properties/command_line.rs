//! Property tests for transfer command line construction.

use proptest::prelude::*;

use autosync::sync::{build_command_line, quote_if_needed, shell_quote};
use autosync::SyncJobSpec;

fn safe_word() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9/._-]{1,24}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `shell_quote` output is a single-quoted word with every inner quote escaped.
    #[test]
    fn property_shell_quote_is_one_word(s in "(?s).{0,64}") {
        let quoted = shell_quote(&s);
        prop_assert!(quoted.starts_with('\''));
        prop_assert!(quoted.ends_with('\''));

        // Undo the quoting the way a POSIX shell would
        let inner = &quoted[1..quoted.len() - 1];
        prop_assert_eq!(inner.replace("'\\''", "'"), s);
    }

    /// PROPERTY: Words made only of safe characters are left untouched.
    #[test]
    fn property_safe_words_are_not_quoted(s in safe_word()) {
        prop_assert_eq!(quote_if_needed(&s), s);
    }

    /// PROPERTY: The command line always carries the mirror flags and ends with the target.
    #[test]
    fn property_command_line_shape(
        local in safe_word(),
        remote in safe_word(),
        host in "[a-z][a-z0-9.-]{0,16}",
        user in "[a-z_][a-z0-9_]{0,8}",
        port in 1u16..,
    ) {
        let spec = SyncJobSpec::new(local.clone(), remote, host, port, user);
        let line = build_command_line(&spec);

        let expected_prefix = format!("rsync --delete -avz -e 'ssh -p {port}' ");
        prop_assert!(line.starts_with(&expected_prefix));
        let expected_suffix = format!("{} {}", local, spec.remote_target());
        prop_assert!(line.ends_with(&expected_suffix));
    }
}
