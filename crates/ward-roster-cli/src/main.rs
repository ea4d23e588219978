// crates/ward-roster-cli/src/main.rs
// ============================================================================
// Module: Ward Roster CLI Entry Point
// Description: Command dispatcher for staff directory and admin workflows.
// Purpose: Provide a safe, localized CLI over the Ward Roster record store.
// Dependencies: clap, serde, serde_json, thiserror, ward-roster-*.
// ============================================================================

//! ## Overview
//! The Ward Roster CLI drives enrollment, sign-in, profile edits, admission,
//! per-page admin rights, page visibility, base conversion, and raw record
//! inspection. All user-facing strings are routed through the i18n catalog.
//! Security posture: inputs are untrusted and validated by the core services;
//! passwords are never echoed.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;
use ward_roster_cli::i18n::Locale;
use ward_roster_cli::i18n::set_locale;
use ward_roster_cli::t;
use ward_roster_config::RosterConfig;
use ward_roster_config::config_toml_example;
use ward_roster_core::AdminStateEditor;
use ward_roster_core::AdminStateView;
use ward_roster_core::AdmissionOutcome;
use ward_roster_core::AdmissionService;
use ward_roster_core::DirectoryError;
use ward_roster_core::DirectoryService;
use ward_roster_core::DirectorySettings;
use ward_roster_core::EnrollmentForm;
use ward_roster_core::PageRegistry;
use ward_roster_core::PermissionState;
use ward_roster_core::ProfileUpdate;
use ward_roster_core::Record;
use ward_roster_core::RecordId;
use ward_roster_core::RecordStore;
use ward_roster_core::Session;
use ward_roster_core::StaffProfile;
use ward_roster_core::TableName;
use ward_roster_core::convert;
use ward_roster_core::runtime::directory::PASSWORD_COLUMN;
use ward_roster_store_sqlite::SqliteRecordStore;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable selecting the output language.
const LANG_ENV: &str = "WARD_ROSTER_LANG";
/// Placeholder shown instead of stored passwords.
const REDACTED: &str = "********";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "ward-roster", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `WARD_ROSTER_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Config file path (defaults to ward-roster.toml or `WARD_ROSTER_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Emit JSON instead of text.
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    json: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Submit an enrollment request.
    Enroll(EnrollCommand),
    /// Sign in and show the session profile.
    Login(CredentialsArgs),
    /// Look up staff by display name.
    Lookup(LookupCommand),
    /// Profile utilities for the signed-in user.
    Profile {
        /// Selected profile subcommand.
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Admission queue utilities.
    Admission {
        /// Selected admission subcommand.
        #[command(subcommand)]
        command: AdmissionCommand,
    },
    /// Per-page admin rights.
    Admin {
        /// Selected admin subcommand.
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// Page registry utilities.
    Pages {
        /// Selected pages subcommand.
        #[command(subcommand)]
        command: PagesCommand,
    },
    /// Convert a number between bases 2 through 36.
    Convert(ConvertCommand),
    /// Raw record inspection.
    Records {
        /// Selected records subcommand.
        #[command(subcommand)]
        command: RecordsCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a config file.
    Validate,
    /// Print the canonical example config.
    Example,
}

/// Arguments for enrollment.
#[derive(Args, Debug)]
struct EnrollCommand {
    /// Display name.
    #[arg(long)]
    name: String,
    /// Employee number.
    #[arg(long)]
    number: String,
    /// Department.
    #[arg(long)]
    section: String,
    /// Chosen password.
    #[arg(long)]
    password: String,
    /// Password confirmation.
    #[arg(long = "confirm-password")]
    confirm_password: String,
}

/// Sign-in credentials.
#[derive(Args, Debug)]
struct CredentialsArgs {
    /// Employee number.
    #[arg(long)]
    number: String,
    /// Password.
    #[arg(long)]
    password: String,
}

/// Arguments for name lookup.
#[derive(Args, Debug)]
struct LookupCommand {
    /// Display name to match exactly.
    #[arg(long)]
    name: String,
}

/// Profile subcommands.
#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Edit the signed-in user's profile.
    Update(ProfileUpdateCommand),
}

/// Arguments for profile edits.
#[derive(Args, Debug)]
struct ProfileUpdateCommand {
    /// Sign-in credentials.
    #[command(flatten)]
    credentials: CredentialsArgs,
    /// New display name.
    #[arg(long)]
    name: Option<String>,
    /// New department.
    #[arg(long)]
    section: Option<String>,
    /// New employee number.
    #[arg(long = "new-number")]
    new_number: Option<String>,
    /// New password.
    #[arg(long = "new-password", requires = "confirm_password")]
    new_password: Option<String>,
    /// New password confirmation.
    #[arg(long = "confirm-password", requires = "new_password")]
    confirm_password: Option<String>,
}

/// Admission subcommands.
#[derive(Subcommand, Debug)]
enum AdmissionCommand {
    /// List enrollment requests awaiting admission.
    List,
    /// Admit the given records.
    Approve(RecordIdsArgs),
    /// Reject (delete) the given records.
    Reject(RecordIdsArgs),
}

/// Record identifiers targeted by an admission decision.
#[derive(Args, Debug)]
struct RecordIdsArgs {
    /// Record identifiers.
    #[arg(required = true, value_name = "ID")]
    ids: Vec<i64>,
}

/// Admin subcommands.
#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// Show the per-page admin rights of a user.
    Show(AdminShowCommand),
    /// Grant or revoke admin rights on one page.
    Set(AdminSetCommand),
    /// Replace the whole permission vector.
    Replace(AdminReplaceCommand),
}

/// Arguments for `admin show`.
#[derive(Args, Debug)]
struct AdminShowCommand {
    /// Employee number.
    #[arg(long)]
    number: String,
}

/// Arguments for `admin set`.
#[derive(Args, Debug)]
struct AdminSetCommand {
    /// Employee number.
    #[arg(long)]
    number: String,
    /// Page position (1-indexed).
    #[arg(long)]
    page: usize,
    /// Whether the user administers the page.
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    admin: bool,
}

/// Arguments for `admin replace`.
#[derive(Args, Debug)]
struct AdminReplaceCommand {
    /// Employee number.
    #[arg(long)]
    number: String,
    /// Bit string, one digit per page.
    #[arg(long)]
    bits: String,
}

/// Pages subcommands.
#[derive(Subcommand, Debug)]
enum PagesCommand {
    /// List pages and their visibility.
    List(PagesListCommand),
}

/// Arguments for `pages list`.
#[derive(Args, Debug)]
struct PagesListCommand {
    /// Employee number to evaluate visibility for.
    #[arg(long, requires = "password")]
    number: Option<String>,
    /// Password for the employee number.
    #[arg(long, requires = "number")]
    password: Option<String>,
}

/// Arguments for base conversion.
#[derive(Args, Debug)]
struct ConvertCommand {
    /// Value in the source base.
    #[arg(allow_hyphen_values = true)]
    value: String,
    /// Source base.
    #[arg(long)]
    from: u32,
    /// Target base.
    #[arg(long)]
    to: u32,
    /// Minimum output width (zero-padded).
    #[arg(long, default_value_t = 0)]
    width: usize,
}

/// Records subcommands.
#[derive(Subcommand, Debug)]
enum RecordsCommand {
    /// Print every row of a table.
    Dump(RecordsTableArgs),
    /// Print the most recently inserted row of a table.
    Latest(RecordsTableArgs),
}

/// Table selection for record inspection.
#[derive(Args, Debug)]
struct RecordsTableArgs {
    /// Table name.
    table: String,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Simplified Chinese.
    Zh,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Zh => Self::Zh,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let output = Output {
        json: cli.json,
    };
    let config_path = cli.config;
    match command {
        Commands::Config {
            command,
        } => command_config(command, config_path, output),
        Commands::Convert(command) => command_convert(&command, output),
        Commands::Enroll(command) => {
            command_enroll(&Context::load(config_path, output)?, command)
        }
        Commands::Login(command) => {
            command_login(&Context::load(config_path, output)?, &command)
        }
        Commands::Lookup(command) => {
            command_lookup(&Context::load(config_path, output)?, &command)
        }
        Commands::Profile {
            command: ProfileCommand::Update(command),
        } => command_profile_update(&Context::load(config_path, output)?, command),
        Commands::Admission {
            command,
        } => command_admission(&Context::load(config_path, output)?, command),
        Commands::Admin {
            command,
        } => command_admin(&Context::load(config_path, output)?, &command),
        Commands::Pages {
            command: PagesCommand::List(command),
        } => command_pages_list(&Context::load(config_path, output)?, &command),
        Commands::Records {
            command,
        } => command_records(&Context::load(config_path, output)?, &command),
    }
}

/// Prints the top-level help text.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Context
// ============================================================================

/// Output mode selected on the command line.
#[derive(Debug, Clone, Copy)]
struct Output {
    /// Whether to emit JSON.
    json: bool,
}

impl Output {
    /// Writes `value` as JSON or the text lines produced by `text`.
    fn emit<T: Serialize>(self, value: &T, text: impl FnOnce() -> Vec<String>) -> CliResult<()> {
        if self.json {
            let payload = serde_json::to_string_pretty(value)
                .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
            return write_stdout_line(&payload)
                .map_err(|err| CliError::new(output_error("stdout", &err)));
        }
        for line in text() {
            write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        Ok(())
    }
}

/// Loaded configuration plus an opened record store.
struct Context {
    /// Loaded configuration.
    config: RosterConfig,
    /// Opened record store.
    store: SqliteRecordStore,
    /// Output mode.
    output: Output,
}

impl Context {
    /// Loads configuration and opens the configured store.
    fn load(path: Option<PathBuf>, output: Output) -> CliResult<Self> {
        let config = RosterConfig::load_or_default(path.as_deref())
            .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
        let sink = config
            .diagnostics
            .build_sink()
            .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
        let store = SqliteRecordStore::new(config.store.clone())
            .map_err(|err| {
                CliError::new(t!(
                    "store.open_failed",
                    path = config.store.path.display(),
                    error = err
                ))
            })?
            .with_diagnostics(sink);
        Ok(Self {
            config,
            store,
            output,
        })
    }

    /// Returns directory settings sized to the configured pages.
    fn settings(&self) -> DirectorySettings {
        self.config.directory_settings()
    }

    /// Returns the configured page registry.
    fn registry(&self) -> PageRegistry {
        self.config.page_registry()
    }

    /// Returns a directory service over the store.
    fn directory(&self) -> DirectoryService<&SqliteRecordStore> {
        DirectoryService::new(&self.store, self.settings())
    }

    /// Signs in with the supplied credentials.
    fn sign_in(&self, credentials: &CredentialsArgs) -> CliResult<Session> {
        self.directory()
            .login(&credentials.number, &credentials.password)
            .map_err(|err| CliError::new(directory_error(&err)))
    }

    /// Renders an employee number at the configured width.
    fn employee_number(&self, number: i64) -> String {
        format_employee_number(number, self.config.directory.employee_number_digits)
    }
}

// ============================================================================
// SECTION: Config And Convert Commands
// ============================================================================

/// Executes config subcommands.
fn command_config(
    command: ConfigCommand,
    path: Option<PathBuf>,
    output: Output,
) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate => {
            let config = RosterConfig::load(path.as_deref())
                .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
            let summary = serde_json::json!({
                "valid": true,
                "store": config.store.path.display().to_string(),
                "table": config.directory.table.as_str(),
                "pages": config.pages.len(),
            });
            output.emit(&summary, || {
                vec![
                    t!("config.validate.ok"),
                    t!(
                        "config.validate.summary",
                        store = config.store.path.display(),
                        table = config.directory.table,
                        pages = config.pages.len()
                    ),
                ]
            })?;
        }
        ConfigCommand::Example => {
            write_stdout_bytes(config_toml_example().as_bytes())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes base conversion.
fn command_convert(command: &ConvertCommand, output: Output) -> CliResult<ExitCode> {
    let converted = convert(&command.value, command.from, command.to, command.width)
        .map_err(|err| CliError::new(t!("convert.failed", error = err)))?;
    let payload = serde_json::json!({ "value": converted });
    output.emit(&payload, || vec![converted.clone()])?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Directory Commands
// ============================================================================

/// Executes enrollment.
fn command_enroll(context: &Context, command: EnrollCommand) -> CliResult<ExitCode> {
    let form = EnrollmentForm {
        name: command.name,
        number: command.number,
        section: command.section,
        password: command.password,
        confirm_password: command.confirm_password,
    };
    let id = context
        .directory()
        .enroll(&form)
        .map_err(|err| CliError::new(directory_error(&err)))?;
    context.output.emit(&serde_json::json!({ "id": id }), || vec![t!("enroll.ok", id = id)])?;
    Ok(ExitCode::SUCCESS)
}

/// Executes sign-in.
fn command_login(context: &Context, command: &CredentialsArgs) -> CliResult<ExitCode> {
    let session = context.sign_in(command)?;
    context.output.emit(&session, || session_lines(context, &session))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes name lookup.
fn command_lookup(context: &Context, command: &LookupCommand) -> CliResult<ExitCode> {
    let profiles = context
        .directory()
        .lookup_by_name(&command.name)
        .map_err(|err| CliError::new(directory_error(&err)))?;
    context.output.emit(&profiles, || {
        if profiles.is_empty() {
            return vec![t!("lookup.none", name = command.name)];
        }
        profiles.iter().map(|profile| profile_line(context, profile)).collect()
    })?;
    Ok(ExitCode::SUCCESS)
}

/// Executes a profile edit.
fn command_profile_update(
    context: &Context,
    command: ProfileUpdateCommand,
) -> CliResult<ExitCode> {
    let session = context.sign_in(&command.credentials)?;
    let update = ProfileUpdate {
        name: command.name.unwrap_or_else(|| session.name.clone()),
        section: command.section.unwrap_or_else(|| session.section.clone()),
        number: command.new_number.unwrap_or_else(|| context.employee_number(session.number)),
        new_password: command.new_password,
        confirm_password: command.confirm_password,
    };
    context
        .directory()
        .update_profile(&session, &update)
        .map_err(|err| CliError::new(directory_error(&err)))?;
    context
        .output
        .emit(&serde_json::json!({ "id": session.id, "updated": true }), || {
            vec![t!("profile.update.ok", id = session.id)]
        })?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Admission Commands
// ============================================================================

/// Executes admission subcommands.
fn command_admission(context: &Context, command: AdmissionCommand) -> CliResult<ExitCode> {
    let admission = AdmissionService::new(&context.store, context.settings());
    let (outcomes, approve) = match command {
        AdmissionCommand::List => {
            let pending =
                admission.pending().map_err(|err| CliError::new(directory_error(&err)))?;
            context.output.emit(&pending, || {
                if pending.is_empty() {
                    return vec![t!("admission.list.empty")];
                }
                let mut lines = vec![t!("admission.list.header", count = pending.len())];
                lines.extend(pending.iter().map(|profile| profile_line(context, profile)));
                lines
            })?;
            return Ok(ExitCode::SUCCESS);
        }
        AdmissionCommand::Approve(args) => (admission.approve(&record_ids(&args)), true),
        AdmissionCommand::Reject(args) => (admission.reject(&record_ids(&args)), false),
    };
    context.output.emit(&outcomes, || {
        outcomes.iter().map(|outcome| outcome_line(outcome, approve)).collect()
    })?;
    if outcomes.iter().all(|outcome| outcome.succeeded) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Converts raw identifiers into record ids.
fn record_ids(args: &RecordIdsArgs) -> Vec<RecordId> {
    args.ids.iter().copied().map(RecordId::new).collect()
}

/// Renders one admission outcome.
fn outcome_line(outcome: &AdmissionOutcome, approve: bool) -> String {
    match (&outcome.error, approve) {
        (None, true) => t!("admission.approve.ok", id = outcome.id),
        (None, false) => t!("admission.reject.ok", id = outcome.id),
        (Some(error), _) => t!("admission.failed", id = outcome.id, error = error),
    }
}

// ============================================================================
// SECTION: Admin Commands
// ============================================================================

/// Executes admin subcommands.
fn command_admin(context: &Context, command: &AdminCommand) -> CliResult<ExitCode> {
    let editor = AdminStateEditor::new(&context.store, context.settings());
    let view = match command {
        AdminCommand::Show(command) => editor.load(&command.number),
        AdminCommand::Set(command) => {
            editor.set_page_admin(&command.number, command.page, command.admin)
        }
        AdminCommand::Replace(command) => editor.replace(&command.number, &command.bits),
    }
    .map_err(|err| CliError::new(directory_error(&err)))?;
    context.output.emit(&view, || admin_lines(context, &view))?;
    Ok(ExitCode::SUCCESS)
}

/// Renders an admin-state view.
fn admin_lines(context: &Context, view: &AdminStateView) -> Vec<String> {
    let mut lines = vec![t!(
        "admin.show.header",
        name = view.name,
        number = context.employee_number(view.number),
        id = view.id
    )];
    match &view.state {
        PermissionState::Pending => lines.push(t!("session.pending")),
        PermissionState::Active(bits) => {
            lines.push(t!("session.bits", bits = bits.to_bit_string()));
            for (offset, page) in context.registry().iter().enumerate() {
                let index = offset + 1;
                let status =
                    if bits.is_admin(index) { t!("admin.flag.yes") } else { t!("admin.flag.no") };
                lines.push(t!("admin.page", index = index, page = page.name, status = status));
            }
        }
    }
    lines
}

// ============================================================================
// SECTION: Pages Command
// ============================================================================

/// Lists pages with their visibility for an optional session.
fn command_pages_list(context: &Context, command: &PagesListCommand) -> CliResult<ExitCode> {
    let session = match (&command.number, &command.password) {
        (Some(number), Some(password)) => Some(context.sign_in(&CredentialsArgs {
            number: number.clone(),
            password: password.clone(),
        })?),
        _ => None,
    };
    let permissions = session.as_ref().map(|session| &session.permissions);
    let visibility = context.registry().visibility(permissions);
    context.output.emit(&visibility, || {
        visibility
            .iter()
            .map(|page| {
                let visible =
                    if page.visible { t!("pages.visible") } else { t!("pages.hidden") };
                let admin = if page.admin { t!("pages.admin") } else { String::new() };
                t!(
                    "pages.entry",
                    index = page.index,
                    page = page.name,
                    visible = visible,
                    admin = admin
                )
                .trim_end()
                .to_string()
            })
            .collect()
    })?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Records Commands
// ============================================================================

/// Executes record inspection.
fn command_records(context: &Context, command: &RecordsCommand) -> CliResult<ExitCode> {
    let (args, latest) = match command {
        RecordsCommand::Dump(args) => (args, false),
        RecordsCommand::Latest(args) => (args, true),
    };
    let table = TableName::parse(&args.table)
        .map_err(|err| CliError::new(t!("records.table_invalid", error = err)))?;
    let rows = if latest {
        context.store.fetch_latest(&table).map(|row| row.into_iter().collect::<Vec<_>>())
    } else {
        context.store.fetch_table(&table)
    }
    .map_err(|err| CliError::new(t!("records.failed", table = table, error = err)))?;
    let rows: Vec<Record> = rows.into_iter().map(redact).collect();
    context.output.emit(&rows, || {
        if rows.is_empty() {
            return vec![t!("records.empty", table = table)];
        }
        rows.iter().map(record_line).collect()
    })?;
    Ok(ExitCode::SUCCESS)
}

/// Masks stored passwords.
fn redact(mut row: Record) -> Record {
    if row.contains(PASSWORD_COLUMN) {
        row.insert(PASSWORD_COLUMN, REDACTED);
    }
    row
}

/// Renders a row as `column=value` pairs.
fn record_line(row: &Record) -> String {
    row.iter().map(|(column, value)| format!("{column}={value}")).collect::<Vec<_>>()
        .join("  ")
}

// ============================================================================
// SECTION: Rendering Helpers
// ============================================================================

/// Zero-pads an employee number to the configured width.
fn format_employee_number(number: i64, digits: usize) -> String {
    format!("{number:0digits$}")
}

/// Renders session details.
fn session_lines(context: &Context, session: &Session) -> Vec<String> {
    let mut lines = vec![t!(
        "session.header",
        name = session.name,
        number = context.employee_number(session.number),
        section = session.section
    )];
    match &session.permissions {
        PermissionState::Pending => lines.push(t!("session.pending")),
        PermissionState::Active(bits) => {
            lines.push(t!("session.bits", bits = bits.to_bit_string()));
        }
    }
    lines
}

/// Renders a staff profile.
fn profile_line(context: &Context, profile: &StaffProfile) -> String {
    t!(
        "profile.entry",
        id = profile.id,
        name = profile.name,
        number = context.employee_number(profile.number),
        section = profile.section
    )
}

/// Localizes a directory error.
fn directory_error(error: &DirectoryError) -> String {
    match error {
        DirectoryError::MissingField(field) => t!("directory.missing_field", field = field),
        DirectoryError::InvalidNumber {
            digits,
        } => t!("directory.invalid_number", digits = digits),
        DirectoryError::NonNumericCredentials => t!("directory.non_numeric_credentials"),
        DirectoryError::PasswordMismatch => t!("directory.password_mismatch"),
        DirectoryError::AlreadyRegistered => t!("directory.already_registered"),
        DirectoryError::UnknownEmployee => t!("directory.unknown_employee"),
        DirectoryError::WrongPassword => t!("directory.wrong_password"),
        DirectoryError::Pending => t!("directory.pending"),
        DirectoryError::BitWidth {
            expected,
            found,
        } => t!("directory.bit_width", expected = expected, found = found),
        DirectoryError::MalformedRecord(detail) => {
            t!("directory.malformed_record", detail = detail)
        }
        DirectoryError::Permission(err) => t!("directory.permission", error = err),
        DirectoryError::Store(err) => t!("directory.store", error = err),
    }
}

/// Resolves the output locale from flags or the environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
