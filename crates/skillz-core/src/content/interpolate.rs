//! `${baseUrl}` / `${skillPath}` substitution in document text

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::constants::content::{BASE_URL_TOKEN, SKILL_PATH_TOKEN};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        "{}|{}",
        regex::escape(BASE_URL_TOKEN),
        regex::escape(SKILL_PATH_TOKEN)
    );
    Regex::new(&pattern).expect("interpolation token pattern")
});

/// Replace interpolation tokens in one document.
///
/// `${baseUrl}` becomes `origin`; `${skillPath}` becomes `/` followed by the
/// directory containing `document_path`. Replacement is a single pass, so
/// text coming from `origin` is never scanned for tokens again.
pub fn interpolate_content(text: &str, origin: &str, document_path: &str) -> String {
    if !text.contains("${") {
        return text.to_string();
    }

    let skill_dir = document_dir(document_path);
    TOKEN_RE
        .replace_all(text, |caps: &Captures| {
            if &caps[0] == BASE_URL_TOKEN {
                origin.to_string()
            } else {
                skill_dir.clone()
            }
        })
        .into_owned()
}

/// `/` + the path with its final `/filename` segment removed.
/// Top-level documents have an empty directory.
pub fn document_dir(document_path: &str) -> String {
    let path = document_path.trim_start_matches('/');
    match path.rfind('/') {
        Some(idx) => format!("/{}", &path[..idx]),
        None => String::new(),
    }
}
