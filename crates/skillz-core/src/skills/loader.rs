//! Skills directory scanning

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::constants::catalog::{SKILLS_URL_PREFIX, SKILL_FILE};

/// One category directory and the skill directories inside it that hold
/// a `SKILL.md`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Names of the subdirectories of `dir`, sorted
fn subdirectories(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to read {:?}", dir))?;

    let mut names = Vec::new();
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

/// Two-level scan of `<category>/<skill>/SKILL.md`.
///
/// A missing skills directory scans as empty.
pub fn scan_categories(skills_dir: &Path) -> Result<Vec<ScannedCategory>> {
    if !skills_dir.is_dir() {
        debug!("No skills directory at {:?}", skills_dir);
        return Ok(Vec::new());
    }

    let mut categories = Vec::new();
    for category in subdirectories(skills_dir)? {
        let category_dir = skills_dir.join(&category);
        let skills: Vec<String> = subdirectories(&category_dir)?
            .into_iter()
            .filter(|skill| category_dir.join(skill).join(SKILL_FILE).is_file())
            .collect();

        debug!("Category {}: {} skills", category, skills.len());
        categories.push(ScannedCategory {
            name: category,
            skills,
        });
    }

    Ok(categories)
}

/// URL-relative document path of a scanned skill
pub fn skill_document_path(category: &str, skill: &str) -> String {
    format!("{}/{}/{}/{}", SKILLS_URL_PREFIX, category, skill, SKILL_FILE)
}

/// Skill directory name -> `skills/<category>/<skill>/SKILL.md`.
///
/// When two categories hold a skill with the same name, the later category
/// (in sorted order) wins.
pub fn scan_skill_paths(skills_dir: &Path) -> Result<BTreeMap<String, String>> {
    Ok(scan_categories(skills_dir)?
        .into_iter()
        .flat_map(|ScannedCategory { name, skills }| {
            skills.into_iter().map(move |skill| {
                let path = skill_document_path(&name, &skill);
                (skill, path)
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_skill(root: &Path, category: &str, skill: &str) {
        let dir = root.join(category).join(skill);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("SKILL.md"),
            format!("---\nname: {skill}\ndescription: {skill} skill\n---\n# {skill}"),
        )
        .unwrap();
    }

    #[test]
    fn test_scan_skill_paths() {
        let temp = tempdir().unwrap();
        write_skill(temp.path(), "frontend", "react-hooks");
        write_skill(temp.path(), "frontend", "css");
        write_skill(temp.path(), "docs", "pdf");
        // directory without SKILL.md and a stray file
        fs::create_dir_all(temp.path().join("docs/drafts")).unwrap();
        fs::write(temp.path().join("README.md"), "not a category").unwrap();

        let paths = scan_skill_paths(temp.path()).unwrap();
        assert_eq!(paths.len(), 3);
        assert_eq!(paths["react-hooks"], "skills/frontend/react-hooks/SKILL.md");
        assert_eq!(paths["pdf"], "skills/docs/pdf/SKILL.md");
        assert!(!paths.contains_key("drafts"));
    }

    #[test]
    fn test_scan_categories_sorted() {
        let temp = tempdir().unwrap();
        write_skill(temp.path(), "zeta", "b");
        write_skill(temp.path(), "zeta", "a");
        write_skill(temp.path(), "alpha", "c");
        fs::create_dir_all(temp.path().join("empty")).unwrap();

        let categories = scan_categories(temp.path()).unwrap();
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "empty", "zeta"]);
        assert_eq!(categories[2].skills, vec!["a", "b"]);
        assert!(categories[1].skills.is_empty());
    }

    #[test]
    fn test_missing_dir_scans_empty() {
        let temp = tempdir().unwrap();
        assert!(scan_skill_paths(&temp.path().join("nope")).unwrap().is_empty());
    }
}
