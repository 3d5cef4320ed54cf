// ==========================================
// Localization (i18n)
// ==========================================
// rust-i18n, pt-BR (default) and en
// ==========================================
// NOTE: rust_i18n::i18n! is invoked in lib.rs
// ==========================================

use crate::domain::types::{CutStatus, Machine, Period};

/// Locale used when none is chosen
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// Active locale
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Switch locale
///
/// # Arguments
/// - locale: "pt-BR" or "en"
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Translate a key (no arguments)
///
/// # Example
/// ```no_run
/// use vegetation_cut::i18n::t;
/// let label = t("status.overdue");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translate a key, replacing `%{name}` placeholders
///
/// # Example
/// ```no_run
/// use vegetation_cut::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/cortes.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

// ==========================================
// Domain labels
// ==========================================

pub fn machine_label(machine: Machine) -> String {
    t(machine.i18n_key())
}

pub fn period_label(period: Period) -> String {
    t(period.i18n_key())
}

pub fn status_label(status: CutStatus) -> String {
    t(status.i18n_key())
}

/// Month name for 1-12; anything else is rendered as the number
pub fn month_label(month: u32) -> String {
    if (1..=12).contains(&month) {
        t(&format!("month.{}", month))
    } else {
        month.to_string()
    }
}

// locale is global and tests run in parallel
#[cfg(test)]
pub(crate) static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
