use crate::config::Endpoint;
use crate::error::{AttemptError, ResolutionError};
use crate::record::{IdentityRecord, parse_record};
use crate::transport::Transport;

/// 先请求主机，失败（网络或解析）后请求一次备用主机
pub async fn resolve(
    transport: &dyn Transport,
    endpoint: &Endpoint,
    path: &str,
) -> Result<IdentityRecord, ResolutionError> {
    match attempt(transport, &endpoint.primary, path).await {
        Ok(record) => return Ok(record),
        Err(e) => log::debug!("{} 失败，改用 {}: {}", endpoint.primary, endpoint.fallback, e),
    }

    attempt(transport, &endpoint.fallback, path)
        .await
        .map_err(|source| ResolutionError {
            host: endpoint.fallback.clone(),
            source,
        })
}

async fn attempt(transport: &dyn Transport, host: &str, path: &str) -> Result<IdentityRecord, AttemptError> {
    let body = transport.get(host, path).await?;
    Ok(parse_record(&body)?)
}
