// crates/pipeline-harness-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalogs and placeholder substitution for console text.
// Purpose: Keep every user-facing line of the harness in one localized table.
// Dependencies: Standard library collections.
// ============================================================================

//! ## Overview
//! Console text is looked up by key with [`t!`](crate::t) and rendered in the
//! locale chosen once at startup. Unknown keys fall back to English and then
//! to the key itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Locales
// ============================================================================

/// Console output language.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Parses a language tag such as `ca`, `EN` or `en_US`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let language = value.trim().split(['-', '_']).next()?;
        SUPPORTED_LOCALES.into_iter().find(|locale| language.eq_ignore_ascii_case(locale.tag()))
    }

    /// Returns the language tag.
    const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Returns the position of the locale in [`SUPPORTED_LOCALES`].
    const fn index(self) -> usize {
        match self {
            Self::En => 0,
            Self::Ca => 1,
        }
    }
}

/// Every locale with a catalog, English first.
pub const SUPPORTED_LOCALES: [Locale; 2] = [Locale::En, Locale::Ca];

/// Locale chosen at startup.
static SELECTED_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Selects the output locale. Later calls are ignored.
pub fn set_locale(locale: Locale) {
    let _ = SELECTED_LOCALE.set(locale);
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "pipeline-harness {version}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load test configuration: {error}"),
    ("time.system_failed", "Failed to read system time for the report: {error}"),
    ("suite.start", "Running {count} test case(s) with {runtime} {cli_path}"),
    ("setup.start", "Setup: {command}"),
    ("setup.ok", "  Setup command succeeded ({duration}s)"),
    ("setup.failed", "  Warning: setup command failed (exit code {code}): {error}"),
    ("case.start", "Testing {name}: {pipeline}"),
    ("case.execution.ok", "  Pipeline executed successfully ({duration}s)"),
    ("case.execution.failed", "  Pipeline failed ({duration}s, exit code {code}): {error}"),
    ("case.execution.timed_out", "  Pipeline timed out after {duration}s"),
    ("case.execution.launch_failed", "  Pipeline could not be started ({duration}s): {error}"),
    ("case.artifacts.ok", "  All {count} expected output(s) created"),
    ("case.artifacts.missing", "  Missing outputs ({count}/{total}): {missing}"),
    ("case.json.ok", "  JSON valid: {path} ({kind})"),
    ("case.json.missing_fields", "  JSON {path} is missing fields: {fields}"),
    ("case.json.failed", "  JSON check failed for {path}: {error}"),
    ("summary.header", "Test Summary"),
    ("summary.total", "Total: {total}"),
    ("summary.passed", "Passed: {passed}"),
    ("summary.failed", "Failed: {failed}"),
    ("summary.gate", "Gate: {gate}"),
    ("summary.gate.execution", "execution only"),
    ("summary.gate.strict", "execution and validations"),
    ("summary.setup_failures", "Setup failures: {count}"),
    ("summary.all_passed", "All tests passed!"),
    ("summary.some_failed", "Some tests failed"),
    ("report.saved", "Detailed results saved to {path}"),
    ("report.write_failed", "Failed to write report: {error}"),
];

/// Static Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "pipeline-harness {version}"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
    ("output.stream.stdout", "sortida estàndard"),
    ("output.stream.stderr", "sortida d'errors"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("config.load_failed", "No s'ha pogut carregar la configuració de proves: {error}"),
    ("time.system_failed", "No s'ha pogut llegir l'hora del sistema per a l'informe: {error}"),
    ("suite.start", "S'executen {count} cas(os) de prova amb {runtime} {cli_path}"),
    ("setup.start", "Preparació: {command}"),
    ("setup.ok", "  L'ordre de preparació ha acabat correctament ({duration}s)"),
    (
        "setup.failed",
        "  Avís: l'ordre de preparació ha fallat (codi de sortida {code}): {error}",
    ),
    ("case.start", "Provant {name}: {pipeline}"),
    ("case.execution.ok", "  La canonada s'ha executat correctament ({duration}s)"),
    (
        "case.execution.failed",
        "  La canonada ha fallat ({duration}s, codi de sortida {code}): {error}",
    ),
    ("case.execution.timed_out", "  La canonada ha superat el temps límit de {duration}s"),
    ("case.execution.launch_failed", "  No s'ha pogut iniciar la canonada ({duration}s): {error}"),
    ("case.artifacts.ok", "  S'han creat les {count} sortides esperades"),
    ("case.artifacts.missing", "  Falten sortides ({count}/{total}): {missing}"),
    ("case.json.ok", "  JSON vàlid: {path} ({kind})"),
    ("case.json.missing_fields", "  Al JSON {path} hi falten camps: {fields}"),
    ("case.json.failed", "  La comprovació JSON ha fallat per a {path}: {error}"),
    ("summary.header", "Resum de les proves"),
    ("summary.total", "Total: {total}"),
    ("summary.passed", "Superades: {passed}"),
    ("summary.failed", "Fallides: {failed}"),
    ("summary.gate", "Criteri: {gate}"),
    ("summary.gate.execution", "només execució"),
    ("summary.gate.strict", "execució i validacions"),
    ("summary.setup_failures", "Errors de preparació: {count}"),
    ("summary.all_passed", "Totes les proves han passat!"),
    ("summary.some_failed", "Algunes proves han fallat"),
    ("report.saved", "Resultats detallats desats a {path}"),
    ("report.write_failed", "No s'ha pogut escriure l'informe: {error}"),
];

/// Returns the catalog entries for `locale`, in declaration order.
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

/// Returns the keyed catalog for `locale`.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOGS: OnceLock<[HashMap<&'static str, &'static str>; 2]> = OnceLock::new();
    let catalogs = CATALOGS.get_or_init(|| {
        SUPPORTED_LOCALES.map(|locale| catalog_entries_for(locale).iter().copied().collect())
    });
    &catalogs[locale.index()]
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Named value substituted for `{key}` in a catalog template.
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name without braces.
    pub key: &'static str,
    /// Rendered value.
    pub value: String,
}

impl MessageArg {
    /// Pairs a placeholder name with its rendered value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// Looks up `key` in the selected locale and fills in `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = SELECTED_LOCALE.get().copied().unwrap_or(Locale::En);
    let template = catalog_for(locale)
        .get(key)
        .or_else(|| catalog_for(Locale::En).get(key))
        .copied()
        .unwrap_or(key);
    args.into_iter().fold(template.to_string(), |text, arg| {
        text.replace(&format!("{{{}}}", arg.key), &arg.value)
    })
}

/// Renders a catalog message, e.g. `t!("report.saved", path = target)`.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {
        $crate::i18n::translate(
            $key,
            ::std::vec![$($crate::i18n::MessageArg::new(stringify!($name), $value.to_string())),*],
        )
    };
}
