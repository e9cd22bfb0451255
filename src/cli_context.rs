use std::sync::Arc;

use crate::batch::BatchExecutor;
use crate::client::{
    BitbucketClient, ConfigCredentials, CredentialProvider, Credentials, PageLocation,
    StaticCredentials,
};
use crate::config::get_api_root;
use crate::error::BbResult;
use crate::formatting::TerminalPresenter;
use crate::pagination::IssueCollector;
use crate::presentation::Presenter;
use crate::selection::SessionContext;

/// Everything one issue-list session needs: the client for the page's
/// repository, the shared selection state and the presenter.
pub struct CliContext {
    client: Arc<BitbucketClient>,
    session: Arc<SessionContext>,
    presenter: Arc<TerminalPresenter>,
}

impl CliContext {
    /// Create a context for `page_url` using stored configuration
    pub fn load(page_url: &str) -> BbResult<Self> {
        CliContextBuilder::new(page_url).build()
    }

    pub fn client(&self) -> Arc<BitbucketClient> {
        self.client.clone()
    }

    pub fn session(&self) -> Arc<SessionContext> {
        self.session.clone()
    }

    pub fn presenter(&self) -> Arc<TerminalPresenter> {
        self.presenter.clone()
    }

    pub fn collector(&self) -> IssueCollector {
        IssueCollector::new(self.client.clone())
    }

    pub fn executor(&self) -> BatchExecutor {
        let presenter: Arc<dyn Presenter> = self.presenter.clone();
        BatchExecutor::new(self.client.clone(), self.session.clone(), presenter)
    }
}

/// Builder pattern for creating CLI contexts with specific configurations
pub struct CliContextBuilder {
    page_url: String,
    api_root: Option<String>,
    credentials: Option<Credentials>,
}

impl CliContextBuilder {
    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            api_root: None,
            credentials: None,
        }
    }

    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = Some(api_root.into());
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn build(self) -> BbResult<CliContext> {
        let location = PageLocation::parse(&self.page_url)?;
        let api_root = self.api_root.unwrap_or_else(get_api_root);
        let credentials: Arc<dyn CredentialProvider> = match self.credentials {
            Some(credentials) => Arc::new(StaticCredentials(credentials)),
            None => Arc::new(ConfigCredentials),
        };

        let client = BitbucketClient::new(&api_root, location, credentials)?;

        Ok(CliContext {
            client: Arc::new(client),
            session: Arc::new(SessionContext::new()),
            presenter: Arc::new(TerminalPresenter::new()),
        })
    }
}
