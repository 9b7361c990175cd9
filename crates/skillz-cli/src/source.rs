//! Where the CLI reads the catalog from

use std::path::PathBuf;

use anyhow::{Context, Result};

use skillz_core::{CatalogSession, DocumentFetcher, FsFetcher, HttpFetcher, Settings, SiteFetcher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Configured public and skills directories
    Site { public: PathBuf, skills: PathBuf },
    /// One directory laid out like the served site
    Dir(PathBuf),
    /// Remote origin
    Url(String),
}

impl CatalogSource {
    pub fn resolve(root: Option<PathBuf>, url: Option<String>, settings: &Settings) -> Self {
        match (root, url) {
            (_, Some(url)) => CatalogSource::Url(url),
            (Some(root), None) => CatalogSource::Dir(root),
            (None, None) => CatalogSource::Site {
                public: settings.public_dir.clone(),
                skills: settings.skills_dir.clone(),
            },
        }
    }

    pub fn fetcher(&self) -> Result<Box<dyn DocumentFetcher>> {
        let fetcher: Box<dyn DocumentFetcher> = match self {
            CatalogSource::Site { public, skills } => Box::new(SiteFetcher::new(public, skills)),
            CatalogSource::Dir(root) => Box::new(FsFetcher::new(root)),
            CatalogSource::Url(url) => Box::new(
                HttpFetcher::new(url).with_context(|| format!("Invalid catalog URL: {}", url))?,
            ),
        };
        Ok(fetcher)
    }

    pub async fn load(&self, settings: &Settings) -> Result<CatalogSession> {
        let fetcher = self.fetcher()?;
        tracing::debug!("Loading catalog from {:?}", self);
        Ok(CatalogSession::load(fetcher.as_ref(), &settings.origin, &settings.app_name).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_precedence() {
        let settings = Settings::default();
        assert_eq!(
            CatalogSource::resolve(None, None, &settings),
            CatalogSource::Site {
                public: PathBuf::from("./public"),
                skills: PathBuf::from("./skills"),
            }
        );
        assert_eq!(
            CatalogSource::resolve(Some("site".into()), None, &settings),
            CatalogSource::Dir(PathBuf::from("site"))
        );
        assert_eq!(
            CatalogSource::resolve(None, Some("https://x.io".into()), &settings),
            CatalogSource::Url("https://x.io".into())
        );
    }

    #[test]
    fn test_bad_url() {
        assert!(CatalogSource::Url("::".into()).fetcher().is_err());
    }

    #[tokio::test]
    async fn test_load_from_dir() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join("skills.json"),
            r#"{"tree": {"id": "root", "children": [{"id": "skill-x", "type": "skill", "skillPath": "skills/a/x/SKILL.md"}]}}"#,
        )
        .unwrap();
        std::fs::create_dir_all(temp.path().join("skills/a/x")).unwrap();
        std::fs::write(temp.path().join("skills/a/x/SKILL.md"), "# X").unwrap();

        let session = CatalogSource::Dir(temp.path().to_path_buf())
            .load(&Settings::default())
            .await
            .unwrap();
        assert_eq!(session.catalog().nodes().len(), 2);
        assert_eq!(session.contents().get("skills/a/x/SKILL.md"), Some("# X"));
    }
}
