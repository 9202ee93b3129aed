#![forbid(unsafe_code)]

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use url::Url;

use crate::{
    error::{NetError, NetResult},
    traits::{ByteStream, Net},
    types::{Headers, NetOptions},
};

/// HTTP client over reqwest with rustls.
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client,
    options: NetOptions,
}

impl HttpClient {
    /// # Panics
    ///
    /// Panics if the `reqwest::Client` builder fails to build.
    #[must_use]
    pub fn new(options: NetOptions) -> Self {
        let inner = Client::builder()
            .use_rustls_tls()
            .connect_timeout(options.connect_timeout)
            .pool_max_idle_per_host(options.pool_max_idle_per_host)
            .build()
            .expect("failed to build reqwest client");
        Self { inner, options }
    }

    #[must_use]
    pub fn options(&self) -> &NetOptions {
        &self.options
    }

    fn build_request(&self, url: Url, headers: Option<Headers>) -> reqwest::RequestBuilder {
        let mut request = self.inner.get(url);
        if let Some(headers) = headers {
            for (key, value) in headers.iter() {
                request = request.header(key, value);
            }
        }
        request
    }

    fn check_status(response: reqwest::Response) -> NetResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let url = response.url().to_string();
            Err(NetError::http_status(status.as_u16(), url))
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(NetOptions::default())
    }
}

#[async_trait]
impl Net for HttpClient {
    async fn stream(&self, url: Url, headers: Option<Headers>) -> NetResult<ByteStream> {
        let response = self.build_request(url, headers).send().await?;
        let response = Self::check_status(response)?;

        let stream = response
            .bytes_stream()
            .map(|result| result.map_err(NetError::from));

        Ok(Box::pin(stream))
    }
}
