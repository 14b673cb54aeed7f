//! ArmViz SDK - 机械臂镜像同步 SDK
//!
//! 把一台源机械臂的关节位置持续镜像到另一台目标机械臂上，并提供
//! 按需的诊断命令输出两台机械臂的关节位置与几何体。功能包括：
//! - 🔄 后台同步循环：固定周期读源写目标，读写严格串行
//! - 🛑 干净的生命周期：取消信号贯穿每个挂起点，关闭时 join 后台任务
//! - 📋 按需诊断：一条命令输出两臂的位置与几何体快照
//! - ⚙️ 事件系统：同步会话启动/终止事件广播
//! - 🧵 并发安全：异步优先设计，设备句柄可跨任务并发访问
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use armviz_sdk::{ArmHandle, ArmVizConfig, ArmVizSDK, Dependencies, Geometry, JointPositions};
//! use async_trait::async_trait;
//!
//! // 设备层实现 ArmHandle（例如包一个 gRPC 驱动）
//! struct MyArm {
//!     name: String,
//! }
//!
//! #[async_trait]
//! impl ArmHandle for MyArm {
//!     fn name(&self) -> &str {
//!         &self.name
//!     }
//!
//!     async fn joint_positions(&self) -> armviz_sdk::Result<JointPositions> {
//!         Ok(JointPositions::new(vec![0.0; 6]))
//!     }
//!
//!     async fn move_to_joint_positions(&self, _positions: JointPositions) -> armviz_sdk::Result<()> {
//!         Ok(())
//!     }
//!
//!     async fn geometries(&self) -> armviz_sdk::Result<Vec<Geometry>> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 宿主把解析好的设备句柄注入依赖表
//!     let mut deps = Dependencies::new();
//!     deps.insert_arm("arm-real", Arc::new(MyArm { name: "arm-real".into() }));
//!     deps.insert_arm("arm-viz", Arc::new(MyArm { name: "arm-viz".into() }));
//!
//!     let config = ArmVizConfig::builder()
//!         .src_arm_name("arm-real")
//!         .dst_arm_name("arm-viz")
//!         .build();
//!
//!     // 初始化即启动后台同步循环
//!     let sdk = ArmVizSDK::initialize(config, &deps).await?;
//!
//!     // 触发一次诊断日志
//!     let request = serde_json::json!({"log": true});
//!     sdk.do_command(request.as_object().unwrap()).await?;
//!
//!     // 关闭 SDK，同步会话随之取消
//!     sdk.shutdown().await?;
//!     Ok(())
//! }
//! ```

// 导出核心模块
pub mod arm;
pub mod command;
pub mod config;
pub mod deps;
pub mod diagnostics;
pub mod error;
pub mod sdk;
pub mod sync;
pub mod version;

// 重新导出核心类型，方便使用
pub use arm::{ArmHandle, Geometry, JointPositions, Pose, Shape};
pub use command::{Command, CommandResponse};
pub use config::{ArmVizConfig, ArmVizConfigBuilder};
pub use deps::Dependencies;
pub use diagnostics::{ArmDiagnostics, DiagnosticReporter};
pub use error::{ArmVizSDKError, Result};
pub use sdk::ArmVizSDK;
pub use sync::{ArmSyncRunner, SyncConfig, SyncEvent, SyncMetrics, SyncStopReason};
pub use version::SDK_VERSION;
