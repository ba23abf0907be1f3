use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub path: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub ipv4: Endpoint,
    pub ipv6: Endpoint,
}

/// 一个地址族的主机和备用主机
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Endpoint {
    pub primary: String,
    pub fallback: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: "/json".to_string(),
            user_agent: "identme/1.0".to_string(),
            timeout_secs: 10,
            ipv4: Endpoint {
                primary: "4.ident.me".to_string(),
                fallback: "4.tnedi.me".to_string(),
            },
            ipv6: Endpoint {
                primary: "6.ident.me".to_string(),
                fallback: "6.tnedi.me".to_string(),
            },
        }
    }
}

impl Config {
    /// 按 默认值 -> 配置文件 -> 环境变量 (IDENTME_*) 的顺序加载配置
    pub fn load(path: Option<&str>) -> Result<Config, ::config::ConfigError> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Config::default())?);

        if let Some(path) = path {
            builder = builder.add_source(::config::File::with_name(path).required(true));
        }

        let config: Config = builder
            .add_source(
                ::config::Environment::with_prefix("IDENTME")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate().map_err(|e| ::config::ConfigError::Message(e.to_string()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs 必须大于 0");
        }
        if !self.path.starts_with('/') {
            return Err("path 必须以 / 开头");
        }
        for endpoint in [&self.ipv4, &self.ipv6] {
            if endpoint.primary.is_empty() || endpoint.fallback.is_empty() {
                return Err("主机名不能为空");
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn endpoint(&self, family: Family) -> &Endpoint {
        match family {
            Family::V4 => &self.ipv4,
            Family::V6 => &self.ipv6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    pub fn label(self) -> &'static str {
        match self {
            Family::V4 => "IPv4",
            Family::V6 => "IPv6",
        }
    }
}

/// 用户请求的地址族（-4 / -6）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Both,
    V4Only,
    V6Only,
}

impl Selection {
    pub fn includes(self, family: Family) -> bool {
        !matches!(
            (self, family),
            (Selection::V4Only, Family::V6) | (Selection::V6Only, Family::V4)
        )
    }
}
