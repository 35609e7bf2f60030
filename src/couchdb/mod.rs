// dbackupcli/src/couchdb/mod.rs
pub mod model;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::ConnectionParams;
use crate::errors::{AppError, Result};
pub use model::{DatabaseInfo, DatabaseLookup};

const URL_PROTOCOL: &str = "http://";
const VALUE_JSON: &str = "application/json";

/// Administrative endpoints of a CouchDB server used by the workflows.
pub trait DatabaseServer {
    /// `GET /_all_dbs`, unfiltered and in server order.
    async fn list_databases(&self) -> Result<Vec<String>>;

    /// `GET /{name}`.
    async fn get_database(&self, name: &str) -> Result<DatabaseLookup>;

    /// `DELETE /{name}`; only a 200 answer counts as success.
    async fn delete_database(&self, name: &str) -> Result<()>;
}

/// Plain-HTTP client with basic authentication, one per invocation.
pub struct CouchClient {
    http: reqwest::Client,
    base: Url,
    username: String,
    password: String,
}

impl CouchClient {
    pub fn new(params: &ConnectionParams) -> Result<Self> {
        let base = Url::parse(&format!("{}{}:{}/", URL_PROTOCOL, params.host, params.port))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            username: params.username.clone(),
            password: params.password.clone(),
        })
    }

    fn endpoint(&self, segment: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Network(format!("cannot build a request path on {}", self.base)))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "couchdb request");
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, VALUE_JSON)
            .basic_auth(&self.username, Some(&self.password))
    }
}

impl DatabaseServer for CouchClient {
    async fn list_databases(&self) -> Result<Vec<String>> {
        let url = self.endpoint("_all_dbs")?;
        let res = self.request(Method::GET, url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        let names: Option<Vec<String>> = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                AppError::Decode(e.to_string())
            } else {
                AppError::Decode(format!("{} ({}): {}", e, status, body.trim()))
            }
        })?;
        Ok(names.unwrap_or_default())
    }

    async fn get_database(&self, name: &str) -> Result<DatabaseLookup> {
        let url = self.endpoint(name)?;
        let res = self.request(Method::GET, url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if status != StatusCode::OK {
            return Ok(DatabaseLookup::Missing {
                status: status.as_u16(),
                detail: body.trim().to_string(),
            });
        }
        let info: DatabaseInfo =
            serde_json::from_str(&body).map_err(|e| AppError::Decode(e.to_string()))?;
        Ok(DatabaseLookup::Found(info))
    }

    async fn delete_database(&self, name: &str) -> Result<()> {
        let url = self.endpoint(name)?;
        let res = self.request(Method::DELETE, url).send().await?;
        let status = res.status();
        if status != StatusCode::OK {
            return Err(AppError::Delete {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }
        Ok(())
    }
}
