//! 编译期生成 BUILD_TIMESTAMP 等元信息（供 version.rs 使用）

use vergen::EmitBuilder;

fn main() {
    let _ = EmitBuilder::builder().build_timestamp().emit();
}
