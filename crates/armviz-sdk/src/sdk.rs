//! 统一 SDK 接口 - ArmVizSDK 主入口
//!
//! 分层架构设计：
//! ```text
//! ArmVizSDK (生命周期控制层)
//!   ├── ArmSyncRunner (后台同步循环)
//!   ├── DiagnosticReporter (按需诊断快照)
//!   └── Dependencies / ArmHandle (设备解析与访问层)
//! ```
//!
//! 构造顺序是固定的：先校验配置（任何依赖解析之前），再按名称解析
//! 两台机械臂，最后构建并启动同步循环。任何一步失败都会整体中止，
//! 不会返回半初始化的实例。

use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

use crate::arm::ArmHandle;
use crate::command::{Command, CommandResponse};
use crate::config::ArmVizConfig;
use crate::deps::Dependencies;
use crate::diagnostics::{ArmDiagnostics, DiagnosticReporter};
use crate::error::{ArmVizSDKError, Result};
use crate::sync::{ArmSyncRunner, SyncEvent, SyncMetrics, SyncStopReason};

/// ArmViz SDK - 机械臂镜像同步服务
///
/// 一个实例独占一个同步会话；实例关闭即会话取消。
pub struct ArmVizSDK {
    config: ArmVizConfig,
    src_arm: Arc<dyn ArmHandle>,
    dst_arm: Arc<dyn ArmHandle>,
    sync_runner: Arc<ArmSyncRunner>,
    reporter: DiagnosticReporter,
    shutting_down: Arc<RwLock<bool>>,
}

impl std::fmt::Debug for ArmVizSDK {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmVizSDK")
            .field("src_arm", &self.src_arm.name())
            .field("dst_arm", &self.dst_arm.name())
            .finish_non_exhaustive()
    }
}

impl ArmVizSDK {
    /// 初始化 SDK：校验配置、解析依赖、启动后台同步循环
    pub async fn initialize(config: ArmVizConfig, deps: &Dependencies) -> Result<Arc<Self>> {
        // 1. 配置校验（必须先于任何依赖解析）
        let required = config.validate()?;
        debug!("配置校验通过，必需依赖: {:?}", required);

        // 2. 按名称解析两台机械臂
        let src_arm = deps.arm_named(&config.src_arm_name)?;
        let dst_arm = deps.arm_named(&config.dst_arm_name)?;

        // 3. 构建同步循环并启动
        let sync_runner = Arc::new(ArmSyncRunner::new(
            config.sync.clone(),
            src_arm.clone(),
            dst_arm.clone(),
        ));
        sync_runner.start().await?;

        let reporter = DiagnosticReporter::new(src_arm.clone(), dst_arm.clone());

        info!(
            "✅ ArmVizSDK 初始化完成: {} -> {}",
            config.src_arm_name, config.dst_arm_name
        );

        Ok(Arc::new(Self {
            config,
            src_arm,
            dst_arm,
            sync_runner,
            reporter,
            shutting_down: Arc::new(RwLock::new(false)),
        }))
    }

    /// 宿主命令入口（无类型映射），内部走类型化命令分发
    pub async fn do_command(
        &self,
        request: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let command = Command::from_request(request)?;
        let response = self.handle_command(command).await?;
        response.to_value()
    }

    /// 类型化命令分发
    pub async fn handle_command(&self, command: Command) -> Result<CommandResponse> {
        if self.is_shutting_down().await {
            return Err(ArmVizSDKError::ShuttingDown(
                "SDK is shutting down, command rejected".to_string(),
            ));
        }
        match command {
            Command::Log => {
                self.reporter.report().await?;
                Ok(CommandResponse::ok())
            }
        }
    }

    /// 两台机械臂的诊断快照（不输出日志）
    pub async fn diagnostics(&self) -> Result<ArmDiagnostics> {
        self.reporter.snapshot().await
    }

    /// 关闭 SDK：取消同步会话并等待后台任务退出，幂等
    pub async fn shutdown(&self) -> Result<()> {
        {
            let mut shutting_down = self.shutting_down.write().await;
            if *shutting_down {
                return Ok(());
            }
            *shutting_down = true;
        }

        info!("正在关闭 ArmVizSDK...");
        self.sync_runner.stop().await?;
        info!("ArmVizSDK 关闭完成");
        Ok(())
    }

    pub async fn is_shutting_down(&self) -> bool {
        *self.shutting_down.read().await
    }

    /// 后台同步循环是否仍在运行
    pub async fn is_sync_running(&self) -> bool {
        self.sync_runner.is_running().await
    }

    /// 同步循环统计信息
    pub fn sync_stats(&self) -> SyncMetrics {
        self.sync_runner.stats()
    }

    /// 同步循环终止原因（仍在运行时为 None）
    pub fn sync_stop_reason(&self) -> Option<SyncStopReason> {
        self.sync_runner.stop_reason()
    }

    /// 订阅同步生命周期事件
    pub fn subscribe_sync_events(&self) -> broadcast::Receiver<SyncEvent> {
        self.sync_runner.subscribe()
    }

    pub fn config(&self) -> &ArmVizConfig {
        &self.config
    }

    /// 源机械臂名称
    pub fn src_arm_name(&self) -> &str {
        self.src_arm.name()
    }

    /// 目标机械臂名称
    pub fn dst_arm_name(&self) -> &str {
        self.dst_arm.name()
    }
}
