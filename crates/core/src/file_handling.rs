//! File handling and validation for cheatwiz configuration.
//!
//! This module reads the cheat index and the settings file, and validates
//! cheat IDs and variable names.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use log::debug;

use crate::cheat_definitions::{CheatIndex, VariableDefinition};
use crate::config::Settings;
use crate::error::Error::{
    EmptyId, IdWithColon, IdWithSpace, InvalidVariableName, NonUniqueCheatId,
    NonUniqueVariableName, NumericId,
};
use crate::error::{Error, Result};

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(EmptyId);
    }

    if id.contains(' ') {
        return Err(IdWithSpace(id.to_string()));
    }

    if id.contains(':') {
        return Err(IdWithColon(id.to_string()));
    }

    if id.chars().all(|c| c.is_numeric()) {
        return Err(NumericId(id.to_string()));
    }

    Ok(())
}

fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn validate_variables(owner: &str, vars: &[VariableDefinition]) -> Result<()> {
    let mut names = HashSet::new();

    for var in vars {
        if !is_variable_name(&var.name) {
            return Err(InvalidVariableName(owner.to_string(), var.name.clone()));
        }

        if !names.insert(var.name.as_str()) {
            // Found a duplicate name
            return Err(NonUniqueVariableName(owner.to_string(), var.name.clone()));
        }
    }

    Ok(())
}

fn validate_index(index: &CheatIndex) -> Result<()> {
    let mut ids = HashSet::new();

    for cheat in &index.cheats {
        if let Some(id) = &cheat.id {
            validate_id(id)?;

            if !ids.insert(id.as_str()) {
                // Found a duplicate ID
                return Err(NonUniqueCheatId(id.clone()));
            }
        }

        validate_variables(&format!("cheat {cheat}"), &cheat.vars)?;
    }

    for (name, module) in &index.modules {
        validate_variables(&format!("module {name}"), &module.vars)?;
    }

    Ok(())
}

/// Loads and validates the cheat index from a YAML file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The YAML is malformed or doesn't match the expected structure
/// - The file contains no cheats
/// - Cheat IDs or variable names are invalid or non-unique
///
/// # Examples
///
/// ```no_run
/// use cheatwiz_core::file_handling::get_cheat_index;
///
/// let index = get_cheat_index("/home/me/.cheatwiz/cheats.yml")?;
/// println!("Loaded {} cheats", index.cheats.len());
/// # Ok::<(), cheatwiz_core::error::Error>(())
/// ```
pub fn get_cheat_index(cheats_path: &str) -> Result<CheatIndex> {
    let reader = get_reader("cheats", cheats_path)?;

    let index: CheatIndex = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "cheats".to_string(),
            cheats_path.to_string(),
            e,
        )
    })?;

    if index.cheats.is_empty() {
        return Err(Error::empty_cheat_definition(cheats_path.to_string()));
    }

    validate_index(&index)?;

    debug!(
        "Loaded {} cheats and {} modules from `{}`",
        index.cheats.len(),
        index.modules.len(),
        cheats_path
    );

    Ok(index)
}

/// Loads the settings file. A missing file gives the default settings.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn get_settings(config_path: &str) -> Result<Settings> {
    if !Path::exists(Path::new(config_path)) {
        debug!("No settings at `{}`, using defaults", config_path);
        return Ok(Settings::default());
    }

    let reader = get_reader("settings", config_path)?;

    // An empty file deserializes as a unit value, not a map
    let value: serde_yaml::Value = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "settings".to_string(),
            config_path.to_string(),
            e,
        )
    })?;

    if value.is_null() {
        return Ok(Settings::default());
    }

    serde_yaml::from_value(value).map_err(|e| {
        Error::yaml_error(
            "parsing".to_string(),
            "settings".to_string(),
            config_path.to_string(),
            e,
        )
    })
}
