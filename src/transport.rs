use async_trait::async_trait;

use crate::config::Config;
use crate::error::TransportError;

/// 对 host + path 发起 HTTPS GET，返回完整响应体
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, host: &str, path: &str) -> Result<Vec<u8>, TransportError>;
}

/// 基于 reqwest 的实现，两个地址族共用同一个 Client
pub struct HttpsTransport {
    client: reqwest::Client,
}

impl HttpsTransport {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .https_only(true)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self { client })
    }
}

pub fn url_for(host: &str, path: &str) -> String {
    format!("https://{}{}", host, path)
}

#[async_trait]
impl Transport for HttpsTransport {
    async fn get(&self, host: &str, path: &str) -> Result<Vec<u8>, TransportError> {
        let url = url_for(host, path);
        log::debug!("GET {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(TransportError::Request { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status { url, status });
        }

        match response.bytes().await {
            Ok(body) => Ok(body.to_vec()),
            Err(source) => Err(TransportError::Body { url, source }),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for() {
        assert_eq!(url_for("4.ident.me", "/json"), "https://4.ident.me/json");
    }

    #[test]
    fn test_build_client() {
        assert!(HttpsTransport::new(&Config::default()).is_ok());
    }
}
