// crates/ward-roster-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalog and translation utilities for the CLI.
// Purpose: Keep every user-facing string in one localized catalog.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The Ward Roster CLI keeps user-facing strings in a small translation
//! catalog. English is the reference locale; Simplified Chinese mirrors it
//! key for key. All runtime output should go through the [`t!`](crate::t)
//! macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Simplified Chinese.
    Zh,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "zh" => Some(Self::Zh),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Zh];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name used in message templates (e.g., `"id"`).
    pub key: &'static str,
    /// Formatted value substituted for the placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "ward-roster {version}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("config.validate.summary", "store={store} table={table} pages={pages}"),
    ("store.open_failed", "Failed to open record store at {path}: {error}"),
    ("convert.failed", "Conversion failed: {error}"),
    ("enroll.ok", "Enrollment submitted as record {id}; awaiting admission."),
    ("session.header", "Signed in as {name} (number {number}, section {section})."),
    ("session.pending", "Status: awaiting admission."),
    ("session.bits", "Admin bits: {bits}"),
    ("lookup.none", "No staff named {name}."),
    ("profile.entry", "#{id} {name} number={number} section={section}"),
    ("profile.update.ok", "Profile {id} updated."),
    ("admission.list.empty", "No enrollment requests are awaiting admission."),
    ("admission.list.header", "{count} request(s) awaiting admission:"),
    ("admission.approve.ok", "Admitted record {id}."),
    ("admission.reject.ok", "Rejected record {id}."),
    ("admission.failed", "Record {id} failed: {error}"),
    ("admin.show.header", "{name} (number {number}, record {id})"),
    ("admin.page", "  [{index}] {page}: {status}"),
    ("admin.flag.yes", "admin"),
    ("admin.flag.no", "-"),
    ("pages.entry", "[{index}] {page} {visible} {admin}"),
    ("pages.visible", "visible"),
    ("pages.hidden", "hidden"),
    ("pages.admin", "(admin)"),
    ("records.table_invalid", "Invalid table name: {error}"),
    ("records.failed", "Failed to read table {table}: {error}"),
    ("records.empty", "Table {table} has no rows."),
    ("directory.missing_field", "Required field is missing: {field}."),
    ("directory.invalid_number", "Employee number must be exactly {digits} digits."),
    ("directory.non_numeric_credentials", "Employee number and password must be numeric."),
    ("directory.password_mismatch", "Passwords do not match."),
    ("directory.already_registered", "This employee is already registered."),
    ("directory.unknown_employee", "Unknown employee number."),
    ("directory.wrong_password", "Wrong password."),
    ("directory.pending", "This account is awaiting admission."),
    ("directory.bit_width", "Permission vector must have {expected} bits, got {found}."),
    ("directory.malformed_record", "Stored staff record is malformed: {detail}"),
    ("directory.permission", "Permission state error: {error}"),
    ("directory.store", "Record store error: {error}"),
    ("output.json_failed", "Failed to encode JSON output: {error}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'zh'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Simplified Chinese catalog entries.
const CATALOG_ZH: &[(&str, &str)] = &[
    ("main.version", "ward-roster {version}"),
    ("config.load_failed", "加载配置失败：{error}"),
    ("config.validate.ok", "配置有效。"),
    ("config.validate.summary", "存储={store} 表={table} 页面数={pages}"),
    ("store.open_failed", "无法打开位于 {path} 的记录存储：{error}"),
    ("convert.failed", "进制转换失败：{error}"),
    ("enroll.ok", "注册申请已提交，记录号 {id}，等待审核。"),
    ("session.header", "已登录：{name}（工号 {number}，科室 {section}）。"),
    ("session.pending", "状态：等待审核。"),
    ("session.bits", "管理权限位：{bits}"),
    ("lookup.none", "没有名为 {name} 的员工。"),
    ("profile.entry", "#{id} {name} 工号={number} 科室={section}"),
    ("profile.update.ok", "资料 {id} 已更新。"),
    ("admission.list.empty", "没有等待审核的注册申请。"),
    ("admission.list.header", "共 {count} 条申请等待审核："),
    ("admission.approve.ok", "已批准记录 {id}。"),
    ("admission.reject.ok", "已拒绝记录 {id}。"),
    ("admission.failed", "记录 {id} 处理失败：{error}"),
    ("admin.show.header", "{name}（工号 {number}，记录 {id}）"),
    ("admin.page", "  [{index}] {page}：{status}"),
    ("admin.flag.yes", "管理员"),
    ("admin.flag.no", "-"),
    ("pages.entry", "[{index}] {page} {visible} {admin}"),
    ("pages.visible", "可见"),
    ("pages.hidden", "隐藏"),
    ("pages.admin", "（管理员）"),
    ("records.table_invalid", "表名无效：{error}"),
    ("records.failed", "读取表 {table} 失败：{error}"),
    ("records.empty", "表 {table} 中没有数据。"),
    ("directory.missing_field", "缺少必填项：{field}。"),
    ("directory.invalid_number", "工号必须正好是 {digits} 位数字。"),
    ("directory.non_numeric_credentials", "工号和密码必须为数字。"),
    ("directory.password_mismatch", "两次输入的密码不一致。"),
    ("directory.already_registered", "该员工已经注册。"),
    ("directory.unknown_employee", "工号不存在。"),
    ("directory.wrong_password", "密码错误。"),
    ("directory.pending", "该账号正在等待审核。"),
    ("directory.bit_width", "权限位必须为 {expected} 位，实际为 {found} 位。"),
    ("directory.malformed_record", "员工记录格式错误：{detail}"),
    ("directory.permission", "权限状态错误：{error}"),
    ("directory.store", "记录存储错误：{error}"),
    ("output.json_failed", "JSON 输出编码失败：{error}"),
    ("output.stream.stdout", "标准输出"),
    ("output.stream.stderr", "标准错误"),
    ("output.stream.unknown", "输出"),
    ("output.write_failed", "写入{stream}失败：{error}"),
    ("i18n.lang.invalid_env", "{env} 的值无效：{value}。应为 'en' 或 'zh'。"),
    ("i18n.disclaimer.machine_translated", "注意：非英文输出为机器翻译，可能不准确。"),
];

/// Returns the raw catalog entries for the requested locale.
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Zh => CATALOG_ZH,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_ZH_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| catalog_entries_for(locale).iter().copied().collect()),
        Locale::Zh => CATALOG_ZH_MAP.get_or_init(|| catalog_entries_for(locale).iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_in(current_locale(), key, args)
}

/// Translates `key` in an explicit locale.
#[must_use]
pub fn translate_in(locale: Locale, key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
