//! # CLI Command Implementations
//!
//! Offline commands read the data file strictly: a corrupt file is an error
//! here, not a silent fresh start, so an operator notices before overwriting
//! it. Only `server` takes the lenient path.

use crate::api::{self, AppState};
use crate::config::ClanSkinConfig;
use clanskin_core::{
    ClanSkinError, DataFile, EditState, GroupId, ProfileStore, StoreMetrics,
    formats::persistence::MAX_SNAPSHOT_SIZE, store_from_snapshot, store_to_snapshot,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

// =============================================================================
// PATH VALIDATION
// =============================================================================

/// Resolve an input path to an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, ClanSkinError> {
    let canonical = path.canonicalize().map_err(|e| {
        ClanSkinError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ClanSkinError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path whose parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, ClanSkinError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        ClanSkinError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    let filename = path
        .file_name()
        .ok_or_else(|| ClanSkinError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Reject files larger than `max_size` before reading them.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), ClanSkinError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ClanSkinError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(ClanSkinError::DeserializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the host bridge.
pub async fn cmd_server(
    config: &ClanSkinConfig,
    data_file: DataFile,
    host: &str,
    port: u16,
) -> Result<(), ClanSkinError> {
    let state = AppState::from_config(config, data_file);
    let autosave = (config.autosave_secs > 0).then(|| Duration::from_secs(config.autosave_secs));

    tracing::info!(
        host,
        port,
        data_file = %state.data_file.path().display(),
        excluded = config.excluded_items.len(),
        autosave_secs = config.autosave_secs,
        "Starting clanskin bridge"
    );

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, state, autosave).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show store counts.
pub fn cmd_status(data_file: &DataFile, json_mode: bool) -> Result<(), ClanSkinError> {
    let store = load_store(data_file)?;
    let metrics = StoreMetrics::from_store(&store);

    if json_mode {
        let output = serde_json::json!({
            "data_file": data_file.path().to_string_lossy(),
            "exists": data_file.exists(),
            "profiles": metrics.profiles,
            "capturing": metrics.capturing,
            "enforcing": metrics.enforcing,
            "variants": metrics.variants,
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return Ok(());
    }

    println!("clanskin store status");
    println!("=====================");
    println!("Data file: {}", data_file.path().display());
    if !data_file.exists() {
        println!("(not created yet)");
    }
    println!();
    println!("Profiles:  {}", metrics.profiles);
    println!("Capturing: {}", metrics.capturing);
    println!("Enforcing: {}", metrics.enforcing);
    println!("Variants:  {}", metrics.variants);

    Ok(())
}

// =============================================================================
// SHOW / REMOVE COMMANDS
// =============================================================================

/// Show one group's profile.
pub fn cmd_show(data_file: &DataFile, json_mode: bool, group: &str) -> Result<(), ClanSkinError> {
    let group = parse_group(group)?;
    let store = load_store(data_file)?;
    let profile = store.get(&group);
    let state = EditState::of_profile(profile);

    if json_mode {
        let output = serde_json::json!({
            "group": group,
            "state": state.name(),
            "profile": profile,
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return Ok(());
    }

    let Some(profile) = profile else {
        println!("Group {} has no profile ({})", group, state);
        return Ok(());
    };

    println!("Group {} ({})", group, state);
    if profile.variants.is_empty() {
        println!("  no variants saved");
    }
    for (kind, variant) in &profile.variants {
        println!("  {:<24} {}", kind.as_str(), variant.value());
    }

    Ok(())
}

/// Delete one group's profile.
pub fn cmd_remove(data_file: &DataFile, group: &str) -> Result<(), ClanSkinError> {
    let group = parse_group(group)?;
    let mut store = load_store(data_file)?;

    if !store.remove(&group) {
        println!("Group {} has no profile", group);
        return Ok(());
    }

    data_file.flush(&store)?;
    println!("Removed profile of group {}", group);
    Ok(())
}

// =============================================================================
// EXPORT / IMPORT COMMANDS
// =============================================================================

/// Write a binary snapshot of the store.
pub fn cmd_export(data_file: &DataFile, output: &Path) -> Result<(), ClanSkinError> {
    let validated_output = validate_output_path(output)?;
    let store = load_store(data_file)?;
    let data = store_to_snapshot(&store)?;

    std::fs::write(&validated_output, &data)
        .map_err(|e| ClanSkinError::IoError(format!("Write file: {}", e)))?;

    println!(
        "Exported {} profiles ({} bytes) to {}",
        store.len(),
        data.len(),
        validated_output.display()
    );
    Ok(())
}

/// Replace the store with a binary snapshot.
pub fn cmd_import(data_file: &DataFile, input: &Path) -> Result<(), ClanSkinError> {
    let validated_path = validate_file_path(input)?;
    validate_file_size(&validated_path, MAX_SNAPSHOT_SIZE as u64)?;

    let data = std::fs::read(&validated_path)
        .map_err(|e| ClanSkinError::IoError(format!("Read file: {}", e)))?;
    let store = store_from_snapshot(&data)?;
    store.validate()?;

    data_file.flush(&store)?;
    println!(
        "Imported {} profiles into {}",
        store.len(),
        data_file.path().display()
    );
    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Create an empty data file.
pub fn cmd_init(data_file: &DataFile, force: bool) -> Result<(), ClanSkinError> {
    if data_file.exists() && !force {
        return Err(ClanSkinError::IoError(format!(
            "Data file {} already exists. Use --force to overwrite.",
            data_file.path().display()
        )));
    }

    data_file.flush(&ProfileStore::new())?;
    println!("Initialized empty data file at {}", data_file.path().display());
    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Load the store; a missing file is an empty store, a corrupt one an error.
pub fn load_store(data_file: &DataFile) -> Result<ProfileStore, ClanSkinError> {
    if !data_file.exists() {
        return Ok(ProfileStore::new());
    }
    data_file.load_strict()
}

fn parse_group(group: &str) -> Result<GroupId, ClanSkinError> {
    let group = GroupId::new(group);
    group.validate()?;
    Ok(group)
}

// =============================================================================
// TESTS
// =============================================================================
