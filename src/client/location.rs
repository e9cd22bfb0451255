use reqwest::Url;

use crate::constants::STATUS_PARAM;
use crate::error::{BbError, BbResult};

/// The issue list page the tool operates on, e.g.
/// `https://bitbucket.org/acme/widgets/issues?status=new&status=open`.
///
/// Workspace and repository come from the first two non-empty path segments;
/// the allowed states mirror the page's own `status` filter.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLocation {
    workspace: String,
    repo_slug: String,
    statuses: Vec<String>,
}

impl PageLocation {
    pub fn parse(page_url: &str) -> BbResult<Self> {
        let url = Url::parse(page_url)
            .map_err(|e| BbError::InvalidLocation(format!("{}: {}", page_url, e)))?;

        let mut segments = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty());

        let (workspace, repo_slug) = match (segments.next(), segments.next()) {
            (Some(workspace), Some(repo_slug)) => (workspace.to_string(), repo_slug.to_string()),
            _ => {
                return Err(BbError::InvalidLocation(format!(
                    "{} does not name a workspace and repository",
                    page_url
                )))
            }
        };

        let statuses = url
            .query_pairs()
            .filter(|(key, _)| key == STATUS_PARAM)
            .map(|(_, value)| value.into_owned())
            .collect();

        Ok(Self {
            workspace,
            repo_slug,
            statuses,
        })
    }

    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    pub fn repo_slug(&self) -> &str {
        &self.repo_slug
    }

    /// Every `status` value of the page URL, in order of appearance.
    pub fn allowed_states(&self) -> &[String] {
        &self.statuses
    }
}
