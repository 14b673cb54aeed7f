//! 机械臂设备抽象层
//!
//! 功能包括：
//! - 关节位置 / 几何体数据类型
//! - ArmHandle trait（由设备层实现，如 gRPC 驱动、仿真器）
//!
//! SDK 本身不解释关节数值的单位和范围，全部原样透传，
//! 越界目标的拒绝由设备层自行负责。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// 关节位置 - 每个可控关节一个标量值，顺序与设备一致
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JointPositions(pub Vec<f64>);

impl JointPositions {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// 关节数量
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for JointPositions {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl fmt::Display for JointPositions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{}]", joined)
    }
}

/// 位姿 - 几何体中心的位置与朝向（轴角表示）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub o_x: f64,
    pub o_y: f64,
    pub o_z: f64,
    pub theta: f64,
}

/// 几何形状
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// 长方体（边长）
    Box { x: f64, y: f64, z: f64 },
    /// 球体
    Sphere { radius: f64 },
    /// 胶囊体
    Capsule { radius: f64, length: f64 },
}

/// 几何体 - 机械臂当前位姿下的空间占用描述，仅用于诊断输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// 几何体标签（如 "link_3"）
    pub label: String,
    /// 中心位姿
    pub center: Pose,
    /// 形状
    pub shape: Shape,
}

/// 机械臂能力引用（由平台/设备层实现）
///
/// 三个操作都是可失败的异步调用，超时行为由设备层自行决定，
/// SDK 不在此之上叠加独立超时。
#[async_trait]
pub trait ArmHandle: Send + Sync {
    /// 设备名称（用于日志定位）
    fn name(&self) -> &str;

    /// 读取当前关节位置
    async fn joint_positions(&self) -> Result<JointPositions>;

    /// 命令机械臂移动到指定关节位置
    async fn move_to_joint_positions(&self, positions: JointPositions) -> Result<()>;

    /// 查询当前位姿下的几何体集合
    async fn geometries(&self) -> Result<Vec<Geometry>>;
}

impl fmt::Debug for dyn ArmHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArmHandle")
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! 测试用 Mock 机械臂：可脚本化返回值、注入失败、记录收到的指令

    use super::*;
    use crate::error::ArmVizSDKError;
    use parking_lot::{Mutex, RwLock};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    pub struct MockArm {
        name: String,
        positions: RwLock<JointPositions>,
        geometries: RwLock<Vec<Geometry>>,
        // 记录收到的移动指令（按顺序）
        moved_to: Mutex<Vec<JointPositions>>,
        read_count: AtomicU64,
        fail_reads: RwLock<bool>,
        fail_writes: RwLock<bool>,
        fail_geometries: RwLock<bool>,
        // 模拟设备调用耗时（测试取消信号打断在途调用）
        read_delay: RwLock<Option<Duration>>,
    }

    impl MockArm {
        pub fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                positions: RwLock::new(JointPositions::default()),
                geometries: RwLock::new(Vec::new()),
                moved_to: Mutex::new(Vec::new()),
                read_count: AtomicU64::new(0),
                fail_reads: RwLock::new(false),
                fail_writes: RwLock::new(false),
                fail_geometries: RwLock::new(false),
                read_delay: RwLock::new(None),
            }
        }

        pub fn with_positions(name: &str, values: Vec<f64>) -> Self {
            let arm = Self::new(name);
            arm.set_positions(values);
            arm
        }

        pub fn set_positions(&self, values: Vec<f64>) {
            *self.positions.write() = JointPositions::new(values);
        }

        pub fn set_geometries(&self, geometries: Vec<Geometry>) {
            *self.geometries.write() = geometries;
        }

        pub fn set_fail_reads(&self, fail: bool) {
            *self.fail_reads.write() = fail;
        }

        pub fn set_fail_writes(&self, fail: bool) {
            *self.fail_writes.write() = fail;
        }

        pub fn set_fail_geometries(&self, fail: bool) {
            *self.fail_geometries.write() = fail;
        }

        pub fn set_read_delay(&self, delay: Duration) {
            *self.read_delay.write() = Some(delay);
        }

        /// 收到过的全部移动指令
        pub fn moved_to(&self) -> Vec<JointPositions> {
            self.moved_to.lock().clone()
        }

        pub fn read_count(&self) -> u64 {
            self.read_count.load(Ordering::SeqCst)
        }

        /// 一个简单的单几何体集合，测试断言用
        pub fn sample_geometries(label: &str) -> Vec<Geometry> {
            vec![Geometry {
                label: label.to_string(),
                center: Pose {
                    z: 0.25,
                    ..Pose::default()
                },
                shape: Shape::Box {
                    x: 0.1,
                    y: 0.1,
                    z: 0.5,
                },
            }]
        }
    }

    #[async_trait]
    impl ArmHandle for MockArm {
        fn name(&self) -> &str {
            &self.name
        }

        async fn joint_positions(&self) -> Result<JointPositions> {
            let delay = *self.read_delay.read();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.read_count.fetch_add(1, Ordering::SeqCst);
            if *self.fail_reads.read() {
                return Err(ArmVizSDKError::DeviceRead {
                    arm: self.name.clone(),
                    reason: "simulated read failure".to_string(),
                });
            }
            Ok(self.positions.read().clone())
        }

        async fn move_to_joint_positions(&self, positions: JointPositions) -> Result<()> {
            if *self.fail_writes.read() {
                return Err(ArmVizSDKError::DeviceWrite {
                    arm: self.name.clone(),
                    reason: "simulated write failure".to_string(),
                });
            }
            self.moved_to.lock().push(positions);
            Ok(())
        }

        async fn geometries(&self) -> Result<Vec<Geometry>> {
            if *self.fail_geometries.read() {
                return Err(ArmVizSDKError::DeviceRead {
                    arm: self.name.clone(),
                    reason: "simulated geometries failure".to_string(),
                });
            }
            Ok(self.geometries.read().clone())
        }
    }
}
