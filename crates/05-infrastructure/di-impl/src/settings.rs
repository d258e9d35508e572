//! 容器配置
//!
//! 使用 config crate 从 TOML 文件和环境变量加载声明式的按名称绑定
//!
//! 环境变量中的绑定写成逗号分隔的 `组件=实现` 列表：
//!
//! ```text
//! IOC__BINDINGS="Dependency=demo.DependencyWithNestedDependency,NestedDependency=demo.NestedDependencyImpl"
//! ```

use di_common::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, error};

/// 默认配置文件（不存在时忽略）
pub const DEFAULT_CONFIG_FILE: &str = "config/ioc";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "IOC";

/// 按列表解析的环境变量键
const BINDINGS_KEY: &str = "bindings";

/// 容器配置
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ContainerSettings {
    /// 按名称绑定列表
    #[serde(default)]
    pub bindings: Vec<BindingSettings>,
}

/// 单个按名称绑定
///
/// 既可以写成 `{ component, implementation }` 表，也可以写成 `"组件=实现"` 字符串。
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(try_from = "BindingEntry")]
pub struct BindingSettings {
    /// 组件名称（在类型目录中登记的名称）
    pub component: String,
    /// 实现类的限定名称
    pub implementation: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BindingEntry {
    Table {
        component: String,
        implementation: String,
    },
    Pair(String),
}

impl TryFrom<BindingEntry> for BindingSettings {
    type Error = String;

    fn try_from(entry: BindingEntry) -> Result<Self, Self::Error> {
        let (component, implementation) = match entry {
            BindingEntry::Table {
                component,
                implementation,
            } => (component, implementation),
            BindingEntry::Pair(pair) => {
                let (component, implementation) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("绑定格式应为 组件=实现: {pair}"))?;
                (component.trim().to_string(), implementation.trim().to_string())
            }
        };

        if component.is_empty() || implementation.is_empty() {
            return Err("绑定的组件名称和实现名称不能为空".to_string());
        }
        Ok(Self {
            component,
            implementation,
        })
    }
}

impl ContainerSettings {
    /// 从默认配置文件和环境变量加载
    pub fn load() -> ConfigResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key(BINDINGS_KEY),
            );
        Self::build(builder)
    }

    /// 从指定配置文件加载，格式由扩展名决定
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!("加载容器配置文件: {}", path.display());
        Self::build(config::Config::builder().add_source(config::File::from(path)))
    }

    /// 从 TOML 字符串加载
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Self::build(
            config::Config::builder()
                .add_source(config::File::from_str(content, config::FileFormat::Toml)),
        )
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ConfigResult<Self> {
        let settings = builder.build().map_err(|e| {
            error!("容器配置构建失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        let settings: Self = settings.try_deserialize().map_err(|e| {
            error!("容器配置绑定失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        debug!("容器配置加载完成: {} 个绑定", settings.bindings.len());
        Ok(settings)
    }
}
