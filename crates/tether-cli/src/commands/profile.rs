//! Profile CLI commands
//!
//! Handles: tether profile list/show/set/delete/activate/active/validate

use clap::{Args, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tether_core::config::{ConfigScope, JsonFileStore};
use tether_core::profile::{Profile, ProfileDetail, ProfileStore};

/// Where profile commands read and write settings
#[derive(Args)]
pub struct SettingsArgs {
    /// Settings file (defaults to $TETHER_HOME/settings.json or ~/.tether/settings.json)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Workspace settings file layered over the global one
    #[arg(short, long, global = true, value_name = "FILE")]
    pub workspace: Option<PathBuf>,

    /// Settings scope profiles are read from and written to (global or workspace)
    #[arg(long, global = true, default_value = "global")]
    pub scope: String,
}

impl SettingsArgs {
    fn open_store(&self) -> Result<ProfileStore<JsonFileStore>, Box<dyn std::error::Error>> {
        let scope: ConfigScope = self.scope.parse()?;
        let mut backend = match &self.config {
            Some(path) => JsonFileStore::new(path),
            None => JsonFileStore::open_default()?,
        };
        match (&self.workspace, scope) {
            (Some(path), _) => backend = backend.with_workspace(path),
            (None, ConfigScope::Workspace) => {
                return Err("--scope workspace requires --workspace <FILE>".into());
            }
            (None, ConfigScope::Global) => {}
        }
        Ok(ProfileStore::new(backend).with_scope(scope))
    }
}

/// Profile commands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List all profiles
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show profile details
    Show {
        /// Profile name
        name: String,
    },
    /// Create a profile, or replace an existing one entirely
    Set(SetArgs),
    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
    /// Select the active profile
    Activate {
        /// Profile name
        name: String,
    },
    /// Print the active profile name
    Active,
    /// Resolve the authentication type of a profile
    Validate {
        /// Profile name (defaults to the active profile)
        name: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Arguments for `profile set`
#[derive(Args)]
pub struct SetArgs {
    /// Profile name
    pub name: String,

    /// Service URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Compute context name
    #[arg(long)]
    pub context: Option<String>,

    /// OAuth client id
    #[arg(long)]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long)]
    pub client_secret: Option<String>,

    /// User name for password sign-in
    #[arg(long)]
    pub username: Option<String>,

    /// Path to an access token file
    #[arg(long)]
    pub token_file: Option<String>,
}

impl SetArgs {
    fn to_profile(&self) -> Profile {
        Profile {
            endpoint: self.endpoint.clone(),
            context: self.context.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            username: self.username.clone(),
            token_file: self.token_file.clone(),
            ..Profile::default()
        }
    }
}

/// Execute profile command
pub fn execute(
    cmd: ProfileCommands,
    settings: &SettingsArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = settings.open_store()?;

    match cmd {
        ProfileCommands::List { json } => execute_list(&store, json),
        ProfileCommands::Show { name } => execute_show(&store, &name),
        ProfileCommands::Set(args) => execute_set(&store, &args),
        ProfileCommands::Delete { name } => execute_delete(&store, &name),
        ProfileCommands::Activate { name } => execute_activate(&store, &name),
        ProfileCommands::Active => {
            let active = store.get_active_profile()?;
            if active.is_empty() {
                println!("No active profile");
            } else {
                println!("{active}");
            }
            Ok(())
        }
        ProfileCommands::Validate { name, json } => execute_validate(&store, name, json),
    }
}

/// Reject names that cannot be addressed from the command line
fn validate_name(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    if name.is_empty() {
        return Err("Name cannot be empty".into());
    }
    if name != name.trim() {
        return Err("Name cannot start or end with whitespace".into());
    }
    Ok(())
}

fn execute_list(
    store: &ProfileStore<JsonFileStore>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let names = store.list_profile()?;
    let active = store.get_active_profile()?;

    if json_output {
        let output = json!({
            "count": names.len(),
            "activeProfile": active,
            "profiles": names,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if names.is_empty() {
        println!("No profiles found");
        return Ok(());
    }

    for name in &names {
        let marker = if *name == active { '*' } else { ' ' };
        println!("{marker} {name}");
    }
    Ok(())
}

fn execute_show(
    store: &ProfileStore<JsonFileStore>,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = store
        .get_profile_by_name(name)?
        .ok_or_else(|| format!("Profile not found: {name}"))?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

fn execute_set(
    store: &ProfileStore<JsonFileStore>,
    args: &SetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_name(&args.name)?;

    let existed = store.get_profile_by_name(&args.name)?.is_some();
    store.upsert_profile(&args.name, &args.to_profile())?;

    if existed {
        println!("Replaced profile '{}'", args.name);
    } else {
        println!("Created profile '{}'", args.name);
    }
    Ok(())
}

fn execute_delete(
    store: &ProfileStore<JsonFileStore>,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if store.get_profile_by_name(name)?.is_none() {
        println!("No profile named '{name}'");
        return Ok(());
    }

    store.delete_profile(name)?;
    println!("Deleted profile '{name}'");
    if store.get_active_profile()? == name {
        eprintln!("Warning: '{name}' is still selected as the active profile");
    }
    Ok(())
}

fn execute_activate(
    store: &ProfileStore<JsonFileStore>,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    store.update_active_profile_setting(name)?;
    println!("Active profile set to '{name}'");
    if !name.is_empty() && store.get_profile_by_name(name)?.is_none() {
        eprintln!("Warning: no profile named '{name}' exists");
    }
    Ok(())
}

fn execute_validate(
    store: &ProfileStore<JsonFileStore>,
    name: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let detail = match name {
        Some(name) => {
            let profile = store.get_profile_by_name(&name)?;
            ProfileDetail::new(name, profile)
        }
        None => store.get_active_profile_detail()?,
    };
    let result = store.validate_profile(&detail);

    if json_output {
        let output = json!({
            "profile": detail.name,
            "result": result,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if result.is_valid() {
        println!("{}: {}", detail.name, result.auth_type);
    }

    if result.is_valid() {
        Ok(())
    } else {
        Err(result.error.into())
    }
}
