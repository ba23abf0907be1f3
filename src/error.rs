use thiserror::Error;

/// 传输层错误（连接、TLS、状态码、读取响应体）
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("无法创建 HTTP 客户端: {0}")]
    Client(#[source] reqwest::Error),

    #[error("请求 {url} 失败: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("请求 {url} 返回状态码 {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("读取 {url} 的响应失败: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 响应记录解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("JSON 解析失败: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("缺少必需字段 (ip)")]
    MissingMandatoryField,
}

/// 单个主机的一次尝试失败
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// 主机和备用主机都失败后的最终错误，只保留备用主机的原因
#[derive(Debug, Error)]
#[error("无法从 {host} 获取地址: {source}")]
pub struct ResolutionError {
    pub host: String,
    #[source]
    pub source: AttemptError,
}
