use std::collections::HashSet;

use log::debug;

use crate::cheat_definitions::Scope;

/// A single `$name` occurrence in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reference<'a> {
    /// Byte index of the `$`.
    start: usize,
    /// Byte index one past the last name character.
    end: usize,
    name: &'a str,
}

fn is_variable_char(c: u8, first: bool) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || (!first && c.is_ascii_digit())
}

/// Lexes every unescaped `$name` reference out of `template`.
fn references(template: &str) -> Vec<Reference<'_>> {
    let bytes = template.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' || (i > 0 && bytes[i - 1] == b'\\') {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < bytes.len() && is_variable_char(bytes[j], j == i + 1) {
            j += 1;
        }

        if j > i + 1 {
            found.push(Reference {
                start: i,
                end: j,
                name: &template[i + 1..j],
            });
            i = j;
        } else {
            i += 1;
        }
    }

    found
}

/// Find the distinct variables referenced by `template`, in first-use order.
///
/// Names that already have a non-empty value in `known` are left out, as are
/// escaped references (`\$name`).
pub fn find_variables(template: &str, known: Option<&Scope>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut variables = Vec::new();

    for reference in references(template) {
        let already_known = known
            .and_then(|scope| scope.get(reference.name))
            .is_some_and(|value| !value.is_empty());

        if already_known || !seen.insert(reference.name) {
            continue;
        }

        variables.push(reference.name.to_string());
    }

    variables
}

/// Byte ranges of every `$name` in `text` that ends on a word boundary.
pub(crate) fn variable_spans(text: &str, name: &str) -> Vec<(usize, usize)> {
    let needle = format!("${name}");
    let bytes = text.as_bytes();

    text.match_indices(&needle)
        .map(|(index, _)| (index, index + needle.len()))
        .filter(|&(_, after)| {
            bytes
                .get(after)
                .map_or(true, |&c| !is_variable_char(c, false))
        })
        .collect()
}

/// Replace every `$name` in `text` that ends on a word boundary, so `$env`
/// leaves `$env_name` alone.
pub fn replace_variable(text: &str, name: &str, replacement: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;

    for (start, end) in variable_spans(text, name) {
        result.push_str(&text[last..start]);
        result.push_str(replacement);
        last = end;
    }

    result.push_str(&text[last..]);
    result
}

/// Substitute resolved values into the final command.
///
/// References without a value and escaped references are kept verbatim.
pub fn substitute_scope(template: &str, scope: &Scope) -> String {
    let mut result = String::with_capacity(template.len());
    let mut last = 0;

    for reference in references(template) {
        if let Some(value) = scope.get(reference.name) {
            result.push_str(&template[last..reference.start]);
            result.push_str(value);
            last = reference.end;
        }
    }

    result.push_str(&template[last..]);
    result
}

/// Plain text substitution of `$name` with its scope value, used on value
/// commands before they are run.
///
/// Longer names go first so `$env` cannot eat the front of `$env_name`.
pub fn substitute_literal(text: &str, scope: &Scope) -> String {
    let mut result = text.to_string();

    let mut entries: Vec<_> = scope.iter().collect();
    entries.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    for (name, value) in entries {
        result = result.replace(&format!("${name}"), value);
    }

    debug!("Substituted `{}` into `{}`", text, result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(pairs: &[(&str, &str)]) -> Scope {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_find_variables_dedup_first_use_order() {
        let variables = find_variables("deploy $env to $env-$region", None);
        assert_eq!(variables, vec!["env", "region"]);
    }

    #[test]
    fn test_find_variables_skips_escaped() {
        let variables = find_variables("echo \\$HOME $user", None);
        assert_eq!(variables, vec!["user"]);
    }

    #[test]
    fn test_find_variables_digit_cannot_start_name() {
        let variables = find_variables("awk '{print $1}' $file_2 $_x", None);
        assert_eq!(variables, vec!["file_2", "_x"]);
    }

    #[test]
    fn test_find_variables_lone_and_double_dollar() {
        assert!(find_variables("price: 5$", None).is_empty());
        assert!(find_variables("$ $- $", None).is_empty());
        assert_eq!(find_variables("echo $$pid", None), vec!["pid"]);
    }

    #[test]
    fn test_find_variables_excludes_known_non_empty() {
        let known = scope(&[("host", "example.com"), ("port", "")]);
        let variables = find_variables("ssh $user@$host -p $port", Some(&known));
        assert_eq!(variables, vec!["user", "port"]);
    }

    #[test]
    fn test_find_variables_unicode_text() {
        let variables = find_variables("echo «$name» → $dest", None);
        assert_eq!(variables, vec!["name", "dest"]);
    }

    #[test]
    fn test_variable_spans_word_boundary() {
        assert_eq!(
            variable_spans("$env-$env_name $env", "env"),
            vec![(0, 4), (15, 19)]
        );
    }

    #[test]
    fn test_variable_spans_at_end() {
        assert_eq!(variable_spans("cd $dir", "dir"), vec![(3, 7)]);
        assert!(variable_spans("cd $directory", "dir").is_empty());
    }

    #[test]
    fn test_replace_variable_respects_word_boundary() {
        assert_eq!(
            replace_variable("deploy $env --name $env_name $env", "env", "prod"),
            "deploy prod --name $env_name prod"
        );
        assert_eq!(replace_variable("ls $dir", "path", "/tmp"), "ls $dir");
    }

    #[test]
    fn test_substitute_scope() {
        let values = scope(&[("env", "prod"), ("region", "eu-1")]);
        assert_eq!(
            substitute_scope("deploy $env to $env-$region \\$HOME $other", &values),
            "deploy prod to prod-eu-1 \\$HOME $other"
        );
    }

    #[test]
    fn test_substitute_literal_prefers_longer_names() {
        let values = scope(&[("env", "prod"), ("env_name", "production")]);
        assert_eq!(
            substitute_literal("list --env $env_name --short $env", &values),
            "list --env production --short prod"
        );
    }

    #[test]
    fn test_substitute_literal_empty_scope() {
        assert_eq!(substitute_literal("ls $dir", &Scope::new()), "ls $dir");
    }
}
