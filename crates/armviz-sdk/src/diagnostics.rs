//! 诊断报告
//!
//! 按需对两台机械臂做一次性状态快照并输出到日志。
//! 这里的读取与后台同步循环完全独立，不加锁、不保证先后顺序，
//! 快照可能反映同步过程中的任意交错。

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::arm::{ArmHandle, Geometry, JointPositions};
use crate::error::Result;

/// 两台机械臂的诊断快照
#[derive(Debug, Clone, Serialize)]
pub struct ArmDiagnostics {
    pub src_arm_name: String,
    pub src_positions: JointPositions,
    pub src_geometries: Vec<Geometry>,
    pub dst_arm_name: String,
    pub dst_positions: JointPositions,
    pub dst_geometries: Vec<Geometry>,
    /// 快照完成时间
    pub captured_at: DateTime<Utc>,
}

/// 诊断报告器
pub struct DiagnosticReporter {
    src_arm: Arc<dyn ArmHandle>,
    dst_arm: Arc<dyn ArmHandle>,
}

impl DiagnosticReporter {
    pub fn new(src_arm: Arc<dyn ArmHandle>, dst_arm: Arc<dyn ArmHandle>) -> Self {
        Self { src_arm, dst_arm }
    }

    /// 采集快照
    ///
    /// 四次读取按固定顺序串行执行：源位置、源几何体、目标位置、目标几何体。
    /// 任何一次失败立即中止，剩余读取不再执行，错误原样上抛。
    pub async fn snapshot(&self) -> Result<ArmDiagnostics> {
        let src_positions = self.src_arm.joint_positions().await?;
        let src_geometries = self.src_arm.geometries().await?;
        let dst_positions = self.dst_arm.joint_positions().await?;
        let dst_geometries = self.dst_arm.geometries().await?;

        Ok(ArmDiagnostics {
            src_arm_name: self.src_arm.name().to_string(),
            src_positions,
            src_geometries,
            dst_arm_name: self.dst_arm.name().to_string(),
            dst_positions,
            dst_geometries,
            captured_at: Utc::now(),
        })
    }

    /// 采集快照并把四项状态各输出一行日志
    pub async fn report(&self) -> Result<()> {
        let diagnostics = self.snapshot().await?;

        info!(
            "📋 源机械臂 {} 关节位置: {}",
            diagnostics.src_arm_name, diagnostics.src_positions
        );
        info!(
            "📋 源机械臂 {} 几何体: {:?}",
            diagnostics.src_arm_name, diagnostics.src_geometries
        );
        info!(
            "📋 目标机械臂 {} 关节位置: {}",
            diagnostics.dst_arm_name, diagnostics.dst_positions
        );
        info!(
            "📋 目标机械臂 {} 几何体: {:?}",
            diagnostics.dst_arm_name, diagnostics.dst_geometries
        );
        Ok(())
    }
}
