//! 命令层
//!
//! 宿主的命令入口是一个字符串键到任意值的映射。这里把它解析成
//! 带标签的命令类型，再以结构化的结果类型应答，取代散落的
//! 无类型键查找。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ArmVizSDKError, Result};

/// SDK 支持的命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 输出两台机械臂的诊断快照到日志
    Log,
}

impl Command {
    /// 从通用请求映射解析命令
    ///
    /// 含 `"log"` 键（值忽略）的请求解析为 [`Command::Log`]；
    /// 其余请求（包括空映射）一律拒绝。
    pub fn from_request(request: &Map<String, Value>) -> Result<Command> {
        if request.contains_key("log") {
            return Ok(Command::Log);
        }
        let keys = request.keys().cloned().collect::<Vec<_>>().join(", ");
        Err(ArmVizSDKError::UnsupportedCommand(format!(
            "unknown command, got keys: [{}]",
            keys
        )))
    }
}

/// 命令应答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
}

impl CommandResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }

    /// 序列化为宿主期望的 JSON 对象，如 `{"success": true}`
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Into::into)
    }
}
