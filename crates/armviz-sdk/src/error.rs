use std::fmt;

#[derive(Debug)]
pub enum ArmVizSDKError {
    Config(String),
    NotFound(String),
    UnsupportedCommand(String),
    // 设备调用错误（携带机械臂名称，便于定位是哪台设备）
    DeviceRead { arm: String, reason: String },
    DeviceWrite { arm: String, reason: String },
    // SDK 相关错误
    Runtime(String),        // 运行时错误
    ShuttingDown(String),   // 正在关闭错误
    Json(String),           // 命令层序列化错误
}

impl fmt::Display for ArmVizSDKError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArmVizSDKError::Config(e) => write!(f, "Config error: {}", e),
            ArmVizSDKError::NotFound(e) => write!(f, "Not found: {}", e),
            ArmVizSDKError::UnsupportedCommand(e) => write!(f, "Unsupported command: {}", e),
            ArmVizSDKError::DeviceRead { arm, reason } => {
                write!(f, "Device read error [{}]: {}", arm, reason)
            }
            ArmVizSDKError::DeviceWrite { arm, reason } => {
                write!(f, "Device write error [{}]: {}", arm, reason)
            }
            ArmVizSDKError::Runtime(e) => write!(f, "Runtime error: {}", e),
            ArmVizSDKError::ShuttingDown(e) => write!(f, "Shutting down: {}", e),
            ArmVizSDKError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for ArmVizSDKError {}

impl From<serde_json::Error> for ArmVizSDKError {
    fn from(error: serde_json::Error) -> Self {
        ArmVizSDKError::Json(error.to_string())
    }
}

impl ArmVizSDKError {
    /// 判断是否是设备 I/O 错误（读或写）
    pub fn is_device_error(&self) -> bool {
        matches!(
            self,
            ArmVizSDKError::DeviceRead { .. } | ArmVizSDKError::DeviceWrite { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ArmVizSDKError>;
