//! 依赖注册表
//!
//! 宿主框架在构造 SDK 之前，把按名称解析好的机械臂句柄注入到这里。
//! SDK 只通过名称取用，不关心句柄背后是真实设备还是仿真器。

use std::collections::HashMap;
use std::sync::Arc;

use crate::arm::ArmHandle;
use crate::error::{ArmVizSDKError, Result};

/// 机械臂依赖注册表：名称 -> 句柄
#[derive(Default)]
pub struct Dependencies {
    arms: HashMap<String, Arc<dyn ArmHandle>>,
}

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个机械臂句柄，同名覆盖
    pub fn insert_arm<S: Into<String>>(&mut self, name: S, handle: Arc<dyn ArmHandle>) {
        self.arms.insert(name.into(), handle);
    }

    /// 按名称解析机械臂句柄
    pub fn arm_named(&self, name: &str) -> Result<Arc<dyn ArmHandle>> {
        self.arms.get(name).cloned().ok_or_else(|| {
            ArmVizSDKError::NotFound(format!("arm \"{}\" not found in dependencies", name))
        })
    }

    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm::mock::MockArm;

    #[test]
    fn test_resolve_registered_arm() {
        let mut deps = Dependencies::new();
        deps.insert_arm("left", Arc::new(MockArm::new("left")));

        let handle = deps.arm_named("left").unwrap();
        assert_eq!(handle.name(), "left");
        assert_eq!(deps.len(), 1);
    }

    #[test]
    fn test_resolve_missing_arm_fails() {
        let deps = Dependencies::new();
        let err = deps.arm_named("ghost").unwrap_err();
        assert!(matches!(err, ArmVizSDKError::NotFound(_)));
        assert!(err.to_string().contains("ghost"));
    }
}
