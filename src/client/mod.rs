pub mod bitbucket_client;
pub mod credentials;
pub mod location;

pub use bitbucket_client::BitbucketClient;
pub use credentials::{ConfigCredentials, CredentialProvider, Credentials, StaticCredentials};
pub use location::PageLocation;
