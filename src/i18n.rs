// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::types::{CompletionBand, SowPriority};

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use nursery_sowing_aps::i18n::t;
/// let msg = t("priority.overdue");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 播种优先级展示标签(按当前语言)
pub fn priority_label(priority: SowPriority) -> String {
    let key = match priority {
        SowPriority::Complete => "priority.complete",
        SowPriority::MissingReadyDays => "priority.missing_ready_days",
        SowPriority::Normal => "priority.normal",
        SowPriority::Urgent => "priority.urgent",
        SowPriority::Overdue => "priority.overdue",
    };
    t(key)
}

/// 完成度档位展示标签(按当前语言)
pub fn band_label(band: CompletionBand) -> String {
    let key = match band {
        CompletionBand::Critical => "band.critical",
        CompletionBand::Partial => "band.partial",
        CompletionBand::Satisfied => "band.satisfied",
    };
    t(key)
}
