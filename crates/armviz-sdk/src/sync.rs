//! 机械臂同步循环 - SDK 的核心
//!
//! 单个后台任务按固定周期把源机械臂的关节位置原样转发给目标机械臂：
//! 每个周期先等待固定间隔，再读源、后写目标，读写严格串行，周期之间不重叠。
//!
//! 时序说明：循环采用固定 sleep（先睡后读），不扣除设备调用耗时，
//! 因此实际周期 = interval_ms + 读取耗时 + 写入耗时。这是从参考实现
//! 继承下来的可观测行为，刻意保留，不做固定速率修正。
//!
//! 终止状态只有三种：取消（正常）、读源失败（致命）、写目标失败（致命）。
//! 设备错误不重试、不退避，循环退出后也没有自动重启。

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::sync::{broadcast, Mutex, Notify, RwLock};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::arm::ArmHandle;
use crate::error::{ArmVizSDKError, Result};

/// 同步循环配置
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SyncConfig {
    /// 同步周期（毫秒），每个周期开始前固定等待这么久
    pub interval_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

/// 同步统计信息
#[derive(Debug, Clone, Default)]
pub struct SyncMetrics {
    /// 成功完成（读+写都成功）的周期数
    pub cycles_total: u64,
    /// 读源失败次数
    pub read_failure_total: u64,
    /// 写目标失败次数
    pub write_failure_total: u64,
    /// 最近一次成功周期的完成时间
    pub last_cycle_at: Option<DateTime<Utc>>,
}

/// 同步循环的终止原因
#[derive(Debug, Clone, thiserror::Error)]
pub enum SyncStopReason {
    /// 收到取消信号，正常退出（不是错误）
    #[error("同步循环已取消")]
    Cancelled,

    /// 读取源机械臂失败，循环终止
    #[error("读取源机械臂失败: {0}")]
    SourceReadFailed(String),

    /// 写入目标机械臂失败，循环终止
    #[error("写入目标机械臂失败: {0}")]
    DestinationWriteFailed(String),
}

/// 同步事件（广播给宿主观察循环生命周期）
#[derive(Debug, Clone)]
pub enum SyncEvent {
    Started {
        session_id: Uuid,
        at: DateTime<Utc>,
    },
    Stopped {
        session_id: Uuid,
        reason: SyncStopReason,
        at: DateTime<Utc>,
    },
}

/// 同步循环运行器
///
/// 每个 SDK 实例独占一个运行器；句柄在构造时注入，没有任何进程级全局状态。
/// 取消信号由运行器生命周期持有，循环在每个周期开头和每个挂起点观察它，
/// 观察到之后保证不再向任何一台机械臂下发指令。
pub struct ArmSyncRunner {
    config: SyncConfig,
    session_id: Uuid,
    src_arm: Arc<dyn ArmHandle>,
    dst_arm: Arc<dyn ArmHandle>,

    // 控制信号
    shutdown_signal: Arc<Notify>,
    is_running: Arc<RwLock<bool>>,

    // 后台任务句柄（stop 时 join，不留脱管任务）
    task_handle: Mutex<Option<JoinHandle<()>>>,

    // 统计与终态
    metrics: Arc<parking_lot::RwLock<SyncMetrics>>,
    stop_reason: Arc<parking_lot::RwLock<Option<SyncStopReason>>>,

    // 事件广播
    event_tx: broadcast::Sender<SyncEvent>,
}

impl ArmSyncRunner {
    pub fn new(config: SyncConfig, src_arm: Arc<dyn ArmHandle>, dst_arm: Arc<dyn ArmHandle>) -> Self {
        let (event_tx, _) = broadcast::channel(100);

        Self {
            config,
            session_id: Uuid::new_v4(),
            src_arm,
            dst_arm,
            shutdown_signal: Arc::new(Notify::new()),
            is_running: Arc::new(RwLock::new(false)),
            task_handle: Mutex::new(None),
            metrics: Arc::new(parking_lot::RwLock::new(SyncMetrics::default())),
            stop_reason: Arc::new(parking_lot::RwLock::new(None)),
            event_tx,
        }
    }

    /// 会话标识（随运行器创建生成，打进每条日志和事件）
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// 订阅同步事件
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.event_tx.subscribe()
    }

    /// 当前统计信息快照
    pub fn stats(&self) -> SyncMetrics {
        self.metrics.read().clone()
    }

    /// 循环的终止原因（尚未终止时为 None）
    pub fn stop_reason(&self) -> Option<SyncStopReason> {
        self.stop_reason.read().clone()
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    /// 启动同步循环
    ///
    /// 仅负责创建后台任务，不等待第一个周期；重复启动返回错误。
    pub async fn start(&self) -> Result<()> {
        {
            let mut running = self.is_running.write().await;
            if *running {
                return Err(ArmVizSDKError::Runtime(
                    "sync loop already running".to_string(),
                ));
            }
            *running = true;
        }
        *self.stop_reason.write() = None;

        info!(
            "🔄 同步会话 {} 启动: {} -> {} (周期 {}ms)",
            self.session_id,
            self.src_arm.name(),
            self.dst_arm.name(),
            self.config.interval_ms
        );
        let _ = self.event_tx.send(SyncEvent::Started {
            session_id: self.session_id,
            at: Utc::now(),
        });

        let config = self.config.clone();
        let session_id = self.session_id;
        let src_arm = self.src_arm.clone();
        let dst_arm = self.dst_arm.clone();
        let shutdown_signal = self.shutdown_signal.clone();
        let is_running = self.is_running.clone();
        let metrics = self.metrics.clone();
        let stop_reason = self.stop_reason.clone();
        let event_tx = self.event_tx.clone();

        let handle = tokio::spawn(async move {
            let reason = loop {
                // 周期开头检查取消信号
                if !*is_running.read().await {
                    break SyncStopReason::Cancelled;
                }

                // 固定等待（先睡后读），等待期间可被取消信号打断
                select! {
                    _ = shutdown_signal.notified() => break SyncStopReason::Cancelled,
                    _ = sleep(Duration::from_millis(config.interval_ms)) => {}
                }
                if !*is_running.read().await {
                    break SyncStopReason::Cancelled;
                }

                // 读取源机械臂关节位置（在途调用可被取消信号打断）
                let positions = select! {
                    _ = shutdown_signal.notified() => break SyncStopReason::Cancelled,
                    result = src_arm.joint_positions() => match result {
                        Ok(positions) => positions,
                        Err(e) => {
                            error!("⚠️ 同步会话 {} 读取源机械臂 {} 失败: {}", session_id, src_arm.name(), e);
                            metrics.write().read_failure_total += 1;
                            break SyncStopReason::SourceReadFailed(e.to_string());
                        }
                    }
                };

                // 读写之间再查一次：观察到取消后不得再下发指令
                if !*is_running.read().await {
                    break SyncStopReason::Cancelled;
                }

                // 原样转发到目标机械臂，不做任何变换或范围校验
                select! {
                    _ = shutdown_signal.notified() => break SyncStopReason::Cancelled,
                    result = dst_arm.move_to_joint_positions(positions) => {
                        if let Err(e) = result {
                            error!("⚠️ 同步会话 {} 写入目标机械臂 {} 失败: {}", session_id, dst_arm.name(), e);
                            metrics.write().write_failure_total += 1;
                            break SyncStopReason::DestinationWriteFailed(e.to_string());
                        }
                    }
                }

                {
                    let mut m = metrics.write();
                    m.cycles_total += 1;
                    m.last_cycle_at = Some(Utc::now());
                }
                debug!("同步会话 {} 完成一个周期", session_id);
            };

            // 记录终态并放下运行标志
            *stop_reason.write() = Some(reason.clone());
            {
                let mut running = is_running.write().await;
                *running = false;
            }

            match &reason {
                SyncStopReason::Cancelled => {
                    info!("✅ 同步会话 {} 已取消退出", session_id);
                }
                other => {
                    error!("⚠️ 同步会话 {} 异常终止: {}", session_id, other);
                }
            }
            let _ = event_tx.send(SyncEvent::Stopped {
                session_id,
                reason,
                at: Utc::now(),
            });
        });

        *self.task_handle.lock().await = Some(handle);
        Ok(())
    }

    /// 停止同步循环并等待后台任务退出
    ///
    /// 幂等：未启动或已停止时直接返回 Ok。循环的所有挂起点都绑定了
    /// 取消信号，join 不会等待超过在途设备调用自身的超时。
    pub async fn stop(&self) -> Result<()> {
        {
            let mut running = self.is_running.write().await;
            *running = false;
        }
        // notify_one：若循环此刻不在挂起点，许可会保留到下一次 notified()
        self.shutdown_signal.notify_one();

        let handle = { self.task_handle.lock().await.take() };
        if let Some(handle) = handle {
            handle
                .await
                .map_err(|e| ArmVizSDKError::Runtime(format!("sync task join failed: {}", e)))?;
        }
        Ok(())
    }
}
