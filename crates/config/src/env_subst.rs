//! `${ENV_VAR}` placeholder substitution for raw config text.
//!
//! This is how secret material (client secrets, autofill passwords) reaches
//! the config without ever being written into the file.

/// Replace every `${NAME}` in `input` with the value of the environment
/// variable `NAME`. Placeholders without a matching variable are left intact.
pub fn substitute_env(input: &str) -> String {
    substitute_with(input, |name| std::env::var(name).ok())
}

/// Substitution with an injectable lookup, so tests don't have to mutate the
/// process environment.
fn substitute_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if end > 0 => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    },
                }
                rest = &after[end + 1..];
            },
            // No closing brace (or an empty name): emit literally and move on.
            _ => {
                out.push_str("${");
                rest = after;
            },
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_known_variable() {
        let lookup = |name: &str| (name == "KEYMINT_SECRET").then(|| "s3cret".to_string());
        assert_eq!(
            substitute_with(r#"{"clientSecret": "${KEYMINT_SECRET}"}"#, lookup),
            r#"{"clientSecret": "s3cret"}"#
        );
    }

    #[test]
    fn keeps_unknown_variable_intact() {
        let lookup = |_: &str| None;
        assert_eq!(substitute_with("${NOT_SET_ANYWHERE}", lookup), "${NOT_SET_ANYWHERE}");
    }

    #[test]
    fn handles_multiple_placeholders() {
        let lookup = |name: &str| match name {
            "A" => Some("1".to_string()),
            "B" => Some("2".to_string()),
            _ => None,
        };
        assert_eq!(substitute_with("${A}-${MISSING}-${B}", lookup), "1-${MISSING}-2");
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        let lookup = |_: &str| Some("x".to_string());
        assert_eq!(substitute_with("tail ${OPEN", lookup), "tail ${OPEN");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(substitute_env("no placeholders here"), "no placeholders here");
    }
}
