//! Naming conventions. Pluralization is a best-effort suffix heuristic:
//! irregular plurals (`person` -> `people`) are not handled and need an
//! explicit table or key.

use heck::{ToSnakeCase, ToUpperCamelCase};

/// Last path segment of a Rust type name, without generic arguments.
pub(crate) fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

pub(crate) fn snake(name: &str) -> String {
    name.to_snake_case()
}

pub(crate) fn studly(name: &str) -> String {
    name.to_upper_camel_case()
}

/// `post` -> `posts`, `category` -> `categories`, `box` -> `boxes`.
pub(crate) fn plural(word: &str) -> String {
    if word.ends_with('s') || word.ends_with('x') || word.ends_with("ch") || word.ends_with("sh")
    {
        format!("{word}es")
    } else if let Some(stem) = word.strip_suffix('y').filter(|stem| !ends_with_vowel(stem)) {
        format!("{stem}ies")
    } else {
        format!("{word}s")
    }
}

fn ends_with_vowel(word: &str) -> bool {
    word.ends_with(['a', 'e', 'i', 'o', 'u'])
}
