use crate::config::{Config, Family};
use crate::record::IdentityRecord;
use crate::resolver;
use crate::transport::Transport;

/// 一次运行中两个地址族的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    pub ipv4: Option<IdentityRecord>,
    pub ipv6: Option<IdentityRecord>,
}

impl AggregateResult {
    pub fn is_empty(&self) -> bool {
        self.ipv4.is_none() && self.ipv6.is_none()
    }

    pub fn get(&self, family: Family) -> Option<&IdentityRecord> {
        match family {
            Family::V4 => self.ipv4.as_ref(),
            Family::V6 => self.ipv6.as_ref(),
        }
    }
}

/// 并发查询 IPv4 和 IPv6，等待两者都结束后汇总。
///
/// 任一地址族失败只会让对应结果为空，不影响另一个；两个都跳过时返回空结果。
pub async fn resolve_both(
    transport: &dyn Transport,
    config: &Config,
    skip_v4: bool,
    skip_v6: bool,
) -> AggregateResult {
    let (ipv4, ipv6) = tokio::join!(
        resolve_family(transport, config, Family::V4, skip_v4),
        resolve_family(transport, config, Family::V6, skip_v6),
    );

    AggregateResult { ipv4, ipv6 }
}

async fn resolve_family(
    transport: &dyn Transport,
    config: &Config,
    family: Family,
    skip: bool,
) -> Option<IdentityRecord> {
    if skip {
        return None;
    }

    match resolver::resolve(transport, config.endpoint(family), &config.path).await {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("{} 不可用: {}", family.label(), e);
            None
        }
    }
}
