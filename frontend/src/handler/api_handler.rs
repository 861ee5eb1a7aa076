use std::ops::Deref;
use std::rc::Rc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::handler::transport::{Transport, TransportResponse};

const APPLICATION_JSON: &str = "application/json";

/// Cheap to clone handle to the http client and the api configuration.
#[derive(Clone)]
pub struct ApiHandler {
    api_client_wrapper: Rc<ApiClientWrapper>,
}

impl ApiHandler {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder =
            Client::builder().timeout(config.timeout).use_rustls_tls();

        if let Some(root_ca) = &config.root_ca {
            tracing::debug!("Adding root certificate from {:?}", root_ca);

            let cert = std::fs::read(root_ca).map_err(|e| Error::Config {
                reason: format!("could not read {}: {e}", root_ca.display()),
            })?;
            let cert =
                reqwest::Certificate::from_pem(&cert).map_err(|e| Error::Config {
                    reason: format!("{} is not a pem certificate: {e}", root_ca.display()),
                })?;

            builder = builder.add_root_certificate(cert);
        }

        let client = builder.build().map_err(|e| Error::Config {
            reason: format!("failed to build http client: {e}"),
        })?;

        Ok(ApiHandler {
            api_client_wrapper: Rc::new(ApiClientWrapper { client, config }),
        })
    }
}

impl Deref for ApiHandler {
    type Target = ApiClientWrapper;

    fn deref(&self) -> &Self::Target {
        &self.api_client_wrapper
    }
}

pub struct ApiClientWrapper {
    pub(crate) client: Client,
    pub(crate) config: ApiConfig,
}

impl ApiClientWrapper {
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait(?Send)]
impl Transport for ApiHandler {
    fn endpoint(&self, rel_path: &str) -> String {
        self.config.endpoint(rel_path)
    }

    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(body)
            .send()
            .await
            .map_err(|e| Error::from_reqwest(url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::from_reqwest(url, e))?;

        Ok(TransportResponse { status, body: body.to_vec() })
    }
}
