use console::style;
use gdbkit_core::GdbkitError;
use std::fmt;

/// Error with context and suggestions for the user
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Host snapshot could not be read
pub fn snapshot_unreadable(path: &str, error: &str) -> CliError {
    CliError::new("Cannot load host snapshot")
        .with_context(format!("Path: {}\n\nError: {}", path, error))
        .with_suggestion("Check the --host path points at a JSON snapshot")
        .with_suggestion("Snapshots list \"documents\" and \"geodatabases\" keyed by path")
}

/// Neither a folder nor a file list was usable
pub fn invalid_batch_mode(mode: &str) -> CliError {
    CliError::new(format!("Invalid batch mode '{}'", mode))
        .with_context("The mode must be exactly Folder or File.")
        .with_suggestion("Scan a folder: gdbkit convert --mode Folder --directory <DIR> ...")
        .with_suggestion("List documents: gdbkit convert --mode File --files \"'a.mxd';'b.mxd'\" ...")
        .with_suggestion("Or set unknown_mode = \"Ignore\" under [convert] to accept an empty batch")
        .with_help("Run: gdbkit convert --help")
}

/// Folder mode directory is missing
pub fn directory_not_found(path: &str) -> CliError {
    CliError::new("Source directory not found")
        .with_context(format!("The folder to scan does not exist.\n\nPath: {}", path))
        .with_suggestion("Check the --directory path and try again")
        .with_help("Run: gdbkit convert --help")
}

/// Bound workspace is not the requested geodatabase
pub fn workspace_mismatch(requested: &str, bound: &str) -> CliError {
    CliError::new("Workspace and geodatabase path don't match")
        .with_context(format!(
            "The host bound a different workspace than the one requested.\n\nRequested: {}\nBound: {}",
            requested, bound
        ))
        .with_suggestion("Check the geodatabase path in --gdbs")
        .with_suggestion("No report was written; rerun once the path resolves correctly")
}

/// Geodatabase is not known to the host
pub fn geodatabase_not_found(path: &str) -> CliError {
    CliError::new("Geodatabase not found")
        .with_context(format!("Path: {}", path))
        .with_suggestion("Check the entries of --gdbs against the host snapshot")
        .with_help("Run: gdbkit inventory --help")
}

/// Describe failed or returned incomplete metadata
pub fn introspection_failed(item: &str, reason: &str) -> CliError {
    CliError::new("Cannot describe geodatabase item")
        .with_context(format!("Item: {}\nReason: {}\n\nNo report was written.", item, reason))
        .with_suggestion("Repair or remove the item and rerun the inventory")
}

/// Report file could not be written or read
pub fn report_failed(path: &str, reason: &str) -> CliError {
    CliError::new("Report error")
        .with_context(format!("Path: {}\n\nReason: {}", path, reason))
        .with_suggestion("Close the workbook if it is open in a spreadsheet application")
        .with_suggestion("Check the output directory exists and is writable")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check the --config file for syntax errors")
        .with_suggestion("Check GDBKIT_* environment variables")
        .with_help("Run: gdbkit config")
}

/// Map a core error onto user guidance
pub fn from_core(error: &GdbkitError) -> CliError {
    match error {
        GdbkitError::InvalidBatchMode { mode } => invalid_batch_mode(mode),
        GdbkitError::DirectoryNotFound { path } => directory_not_found(&path.display().to_string()),
        GdbkitError::WorkspaceMismatch { requested, bound } => workspace_mismatch(requested, bound),
        GdbkitError::GeodatabaseNotFound { path } => geodatabase_not_found(path),
        GdbkitError::Introspection { item, reason } => introspection_failed(item, reason),
        GdbkitError::InvalidTimestamp { value, reason } => {
            introspection_failed(value, &format!("invalid timestamp: {}", reason))
        }
        GdbkitError::Report { path, reason } => report_failed(&path.display().to_string(), reason),
        GdbkitError::ConfigMissing { key } => CliError::new(format!("Missing --{}", key))
            .with_context(format!("The selected batch mode needs --{}.", key))
            .with_help("Run: gdbkit convert --help"),
        GdbkitError::ConfigInvalid { key, reason } => invalid_config(key, reason),
        GdbkitError::ImportFailed { path, reason } => CliError::new("Legacy document import failed")
            .with_context(format!("Document: {}\nReason: {}", path, reason))
            .with_suggestion("Check the document is listed in the host snapshot"),
        other => CliError::new(other.to_string()),
    }
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    let error = match error.downcast::<CliError>() {
        Ok(cli_error) => return cli_error,
        Err(error) => error,
    };

    if let Some(core) = error.downcast_ref::<GdbkitError>() {
        return from_core(core);
    }

    let message = format!("{:#}", error);
    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.contains("ermission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
    } else {
        CliError::new(message)
    }
}
