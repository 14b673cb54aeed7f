//! SDK 配置
//!
//! 两个必填字段：源机械臂名称和目标机械臂名称。
//! `validate()` 在任何依赖解析之前执行，并返回本配置隐式声明的
//! 必需依赖名称列表，供宿主在构造前解析。

use serde::{Deserialize, Serialize};

use crate::error::{ArmVizSDKError, Result};
use crate::sync::SyncConfig;

/// ArmViz SDK 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmVizConfig {
    /// 源机械臂名称（被镜像的一方）
    pub src_arm_name: String,
    /// 目标机械臂名称（接收移动指令的一方）
    pub dst_arm_name: String,
    /// 同步循环配置
    #[serde(default)]
    pub sync: SyncConfig,
}

impl ArmVizConfig {
    pub fn new<S: Into<String>, D: Into<String>>(src_arm_name: S, dst_arm_name: D) -> Self {
        Self {
            src_arm_name: src_arm_name.into(),
            dst_arm_name: dst_arm_name.into(),
            sync: SyncConfig::default(),
        }
    }

    pub fn builder() -> ArmVizConfigBuilder {
        ArmVizConfigBuilder::new()
    }

    /// 校验配置并返回必需依赖名称列表（按源、目标顺序）
    pub fn validate(&self) -> Result<Vec<String>> {
        if self.src_arm_name.is_empty() {
            return Err(ArmVizSDKError::Config(
                "src_arm_name is required".to_string(),
            ));
        }
        if self.dst_arm_name.is_empty() {
            return Err(ArmVizSDKError::Config(
                "dst_arm_name is required".to_string(),
            ));
        }
        Ok(vec![self.src_arm_name.clone(), self.dst_arm_name.clone()])
    }
}

pub struct ArmVizConfigBuilder {
    config: ArmVizConfig,
}

impl ArmVizConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ArmVizConfig::new("", ""),
        }
    }

    pub fn src_arm_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.src_arm_name = name.into();
        self
    }

    pub fn dst_arm_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.dst_arm_name = name.into();
        self
    }

    /// 设置同步周期（毫秒）
    pub fn sync_interval_ms(mut self, interval_ms: u64) -> Self {
        self.config.sync.interval_ms = interval_ms;
        self
    }

    pub fn build(self) -> ArmVizConfig {
        self.config
    }
}

impl Default for ArmVizConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_returns_required_deps() {
        let config = ArmVizConfig::new("src-arm", "dst-arm");
        let required = config.validate().unwrap();
        assert_eq!(required, vec!["src-arm".to_string(), "dst-arm".to_string()]);
    }

    #[test]
    fn test_empty_src_arm_name_rejected() {
        let config = ArmVizConfig::new("", "dst-arm");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ArmVizSDKError::Config(_)));
        assert!(err.to_string().contains("src_arm_name"));
    }

    #[test]
    fn test_empty_dst_arm_name_rejected() {
        let config = ArmVizConfig::new("src-arm", "");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ArmVizSDKError::Config(_)));
        assert!(err.to_string().contains("dst_arm_name"));
    }

    #[test]
    fn test_builder() {
        let config = ArmVizConfig::builder()
            .src_arm_name("a")
            .dst_arm_name("b")
            .sync_interval_ms(250)
            .build();

        assert_eq!(config.src_arm_name, "a");
        assert_eq!(config.dst_arm_name, "b");
        assert_eq!(config.sync.interval_ms, 250);
    }

    #[test]
    fn test_deserialize_without_sync_section() {
        // 宿主配置里省略 sync 字段时使用默认周期
        let config: ArmVizConfig =
            serde_json::from_str(r#"{"src_arm_name":"a","dst_arm_name":"b"}"#).unwrap();
        assert_eq!(config.sync.interval_ms, 1000);
    }
}
