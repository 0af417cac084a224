// Case conversion for names that end up in generated class names and paths

fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

pub fn to_pascal_case(s: &str) -> String {
    words(s).map(capitalize).collect()
}

pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => pascal,
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}
