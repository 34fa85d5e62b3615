//! Request path handling for the `DataServer`.

/// Normalizes a mount point: leading slash, no trailing slash, `""` for root.
pub fn normalize_base(base_path: &str) -> String {
    let cleaned = base_path.trim_end_matches('/');
    if cleaned.is_empty() {
        String::new()
    } else if cleaned.starts_with('/') {
        cleaned.to_string()
    } else {
        format!("/{}", cleaned)
    }
}

/// Removes a normalized base from the front of `path`.
///
/// The prefix is only stripped at a segment boundary; a path outside the base
/// is returned unchanged.
pub fn strip_base<'a>(path: &'a str, base: &str) -> &'a str {
    if base.is_empty() {
        return path;
    }
    match path.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Splits the first segment off a request path.
///
/// The path is cleaned first, then the head is percent-decoded; a head that
/// does not decode to UTF-8 is returned raw. An empty head means the path
/// named no item.
///
/// ```
/// use stored::www::path::shift_path;
///
/// assert_eq!(shift_path("/a%20b/c"), ("a b".to_string(), "/c".to_string()));
/// assert_eq!(shift_path("//x/"), ("x".to_string(), String::new()));
/// assert_eq!(shift_path("/"), (String::new(), String::new()));
/// ```
pub fn shift_path(path: &str) -> (String, String) {
    let cleaned = clean_path(path);
    let rest = &cleaned[1..];

    let (head, tail) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, ""),
    };

    let head = match urlencoding::decode(head) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => head.to_string(),
    };

    (head, tail.to_string())
}

/// Lexical cleanup: drops empty and `.` segments, resolves `..`.
/// The result always starts with `/`.
fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}
