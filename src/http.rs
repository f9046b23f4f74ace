use serde::Deserialize;
use thiserror::Error;

use crate::types::OrgRole;

/// The platform identifier of an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgGuid(pub String);

impl std::fmt::Display for OrgGuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-2xx answer from the Cloud Controller, passed through as the server worded it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Server error, status code: {status}, error code: {code}, message: {message}")]
pub struct ServerError {
    pub status: u16,
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerErrorKind {
    Forbidden,
    UserNotFound,
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    description: String,
}

impl ServerError {
    pub fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(err) => ServerError {
                status,
                code: err.code,
                message: err.description,
            },
            Err(_) => ServerError {
                status,
                code: 0,
                message: body.trim().to_string(),
            },
        }
    }

    pub fn kind(&self) -> ServerErrorKind {
        match (self.status, self.code) {
            (403, 10003) => ServerErrorKind::Forbidden,
            (404, 20003) => ServerErrorKind::UserNotFound,
            _ => ServerErrorKind::Other,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Organization {0} not found")]
    OrgNotFound(String),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid API endpoint: {0}")]
    Url(#[from] url::ParseError),
}

/// The calls the org role commands make against the platform.
#[async_trait::async_trait]
pub trait PlatformClient {
    /// Resolve an organization name to its guid.
    async fn find_org(&self, name: &str) -> Result<OrgGuid, ApiError>;

    /// Give `username` the `role` in the org. The platform resolves the user, and
    /// assigning a role the user already holds succeeds.
    ///
    /// The role is granted before the user is added as an org member, so a failed
    /// membership request is reported even though the role is already in place.
    async fn assign_org_role(&self, username: &str, org: &OrgGuid, role: OrgRole) -> Result<(), ApiError>;
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    resources: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
struct Resource {
    metadata: Metadata,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    guid: String,
}

/// A client for the Cloud Controller v2 API.
pub struct CloudControllerClient {
    base_url: url::Url,
    token: String,
    client: reqwest::Client,
}

impl CloudControllerClient {
    pub fn new(host: &str, token: &str, skip_ssl_validation: bool) -> Result<Self, ApiError> {
        let base_url = url::Url::parse(&base_url(host))?;

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(skip_ssl_validation)
            .build()?;

        Ok(CloudControllerClient {
            base_url,
            token: crate::session::strip_bearer(token).to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let request = request.bearer_auth(&self.token).build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        let resp = self.client.execute(request).await?;
        let status = resp.status();
        log::debug!("{} {} -> {}", method, url, status);

        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await?;
        let err = ServerError::from_body(status.as_u16(), &body);
        log::debug!("{} {} failed ({:?}): {}", method, url, err.kind(), body);

        Err(err.into())
    }

    async fn put_username(&self, path: &str, username: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        let body = serde_json::json!({ "username": username });

        self.send(self.client.put(url).json(&body)).await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl PlatformClient for CloudControllerClient {
    async fn find_org(&self, name: &str) -> Result<OrgGuid, ApiError> {
        let mut url = self.endpoint("/v2/organizations")?;
        url.query_pairs_mut().append_pair("q", &format!("name:{}", name));

        let page: Page = self.send(self.client.get(url)).await?.json().await?;

        match page.resources.into_iter().next() {
            Some(org) => Ok(OrgGuid(org.metadata.guid)),
            None => Err(ApiError::OrgNotFound(name.to_string())),
        }
    }

    async fn assign_org_role(&self, username: &str, org: &OrgGuid, role: OrgRole) -> Result<(), ApiError> {
        self.put_username(&format!("/v2/organizations/{}/{}", org, role.api_path()), username)
            .await?;

        // Roles only show up for org members, so make sure the user is one.
        self.put_username(&format!("/v2/organizations/{}/users", org), username)
            .await
    }
}

// base_url keeps an explicit scheme, and otherwise only talks plain http to local hosts.
fn base_url(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        return host.to_string();
    }

    if host.starts_with("localhost") || host.starts_with("127.0.0.1") {
        return format!("http://{}", host);
    }

    format!("https://{}", host)
}
