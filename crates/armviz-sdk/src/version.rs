//! SDK 版本与运行时元信息
//!
//! 设计原则：
//! - **SDK Version** → Cargo.toml（唯一权威源）
//! - **Runtime Metadata** → 本模块

/// SDK semver，来自 Cargo.toml
///
/// 禁止手写版本号，必须用 `env!("CARGO_PKG_VERSION")` 与 Cargo.toml 保持同步。
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// build time（由 vergen 在 build.rs 中生成）
pub const BUILD_TIME: &str = env!("VERGEN_BUILD_TIMESTAMP");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_manifest() {
        assert_eq!(SDK_VERSION, env!("CARGO_PKG_VERSION"));
        assert!(!BUILD_TIME.is_empty());
    }
}
