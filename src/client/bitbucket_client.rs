use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode, Url};
use tracing::{debug, warn};

use super::credentials::CredentialProvider;
use super::location::PageLocation;
use crate::error::{BbError, BbResult};
use crate::models::{ErrorEnvelope, IssueId, PageResult};

/// Authenticated access to the issue tracker of one repository.
pub struct BitbucketClient {
    client: reqwest::Client,
    repository_root: String,
    location: PageLocation,
    credentials: Arc<dyn CredentialProvider>,
}

impl BitbucketClient {
    pub fn new(
        api_root: &str,
        location: PageLocation,
        credentials: Arc<dyn CredentialProvider>,
    ) -> BbResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let repository_root = format!(
            "{}/repositories/{}/{}",
            api_root.trim_end_matches('/'),
            location.workspace(),
            location.repo_slug()
        );

        Ok(Self {
            client,
            repository_root,
            location,
            credentials,
        })
    }

    pub fn location(&self) -> &PageLocation {
        &self.location
    }

    pub fn repository_root(&self) -> &str {
        &self.repository_root
    }

    /// Absolute URLs (pagination cursors) are used verbatim, anything else is
    /// joined onto the repository root.
    pub fn resolve_url(&self, path_or_url: &str) -> String {
        if Url::parse(path_or_url).is_ok() {
            return path_or_url.to_string();
        }

        [self.repository_root.as_str(), path_or_url.trim_start_matches('/')]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("/")
    }

    pub async fn request(&self, path_or_url: &str, method: Method) -> BbResult<Response> {
        let creds = self.credentials.credentials()?;
        let url = self.resolve_url(path_or_url);

        debug!("{} {}", method, url);

        let response = self
            .client
            .request(method, &url)
            .basic_auth(&creds.username, Some(&creds.app_password))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }

        Ok(response)
    }

    async fn status_error(status: StatusCode, response: Response) -> BbError {
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .ok()
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.to_string())
            });

        warn!("API error ({}): {}", status, message);

        BbError::HttpStatus { status, message }
    }

    /// Fetches one listing page from a relative listing path or a cursor URL.
    pub async fn list_issues_page(&self, path_or_cursor: &str) -> BbResult<PageResult> {
        let response = self.request(path_or_cursor, Method::GET).await?;
        let body = response.text().await?;

        Ok(serde_json::from_str(&body)?)
    }

    pub async fn delete_issue(&self, issue_id: IssueId) -> BbResult<()> {
        self.request(&format!("issues/{}", issue_id), Method::DELETE)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Credentials, StaticCredentials};

    fn client(api_root: &str) -> BitbucketClient {
        let location = PageLocation::parse("https://bitbucket.org/acme/widgets/issues?status=new").unwrap();
        BitbucketClient::new(
            api_root,
            location,
            Arc::new(StaticCredentials(Credentials::new("u", "p"))),
        )
        .unwrap()
    }

    #[test]
    fn test_relative_paths_join_repository_root() {
        let client = client("https://api.bitbucket.org/2.0/");

        assert_eq!(
            client.resolve_url("issues/42"),
            "https://api.bitbucket.org/2.0/repositories/acme/widgets/issues/42"
        );
        assert_eq!(
            client.resolve_url(""),
            "https://api.bitbucket.org/2.0/repositories/acme/widgets"
        );
    }

    #[test]
    fn test_absolute_cursor_is_used_verbatim() {
        let client = client("https://api.bitbucket.org/2.0");
        let cursor = "https://api.bitbucket.org/2.0/repositories/acme/widgets/issues?page=2&q=state%3D%22new%22";

        assert_eq!(client.resolve_url(cursor), cursor);
    }
}
