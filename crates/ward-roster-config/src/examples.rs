// crates/ward-roster-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and the `config example` command.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for Ward Roster configuration. The example spells out
//! every default so it can be copied and edited in place.

/// Returns a canonical example `ward-roster.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[store]
path = "doctor_info.db"
journal_mode = "wal"
sync_mode = "full"
busy_timeout_ms = 5000

[directory]
table = "doctor_info"
id_column = "id"
employee_number_digits = 5
pending_threshold = -1

[diagnostics]
sink = "stderr"
# sink = "file"
# path = "ward-roster-store.log"

[[pages]]
name = "Communication Log"
file = "pages/01_communication_log.toml"
template = "templates/page01.toml"
access = "authenticated"

[[pages]]
name = "Pre-admission & Day Surgery"
file = "pages/02_day_surgery.toml"
template = "templates/page02.toml"
access = "authenticated"

[[pages]]
name = "Operations Data Support"
file = "pages/03_operations_data.toml"
template = "templates/page03.toml"
access = "authenticated"

[[pages]]
name = "Department Evaluation"
file = "pages/04_department_evaluation.toml"
template = "templates/page04.toml"
access = "authenticated"

[[pages]]
name = "System Maintenance"
file = "pages/99_system_maintenance.toml"
template = "templates/page99.toml"
access = "page_admin"
"#,
    )
}
