/*
 * This file is part of Markpad.
 *
 * Copyright (C) 2025 Markpad contributors
 *
 * Markpad is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Markpad is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Markpad. If not, see <https://www.gnu.org/licenses/>.
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One entry of the mark-type dropdown: machine value plus display label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkTypeOption {
    pub value: String,
    pub label: String,
}

impl MarkTypeOption {
    /// The dropdown's unset sentinel; always the first catalog entry.
    pub fn unset() -> Self {
        MarkTypeOption {
            value: "not-selected".to_string(),
            label: "Не выбрано".to_string(),
        }
    }
}

/// Option catalogs for the mark dialog. Everything is optional in the file;
/// missing sections fall back to the built-in journal defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct JournalConfig {
    #[serde(default = "default_marks")]
    pub marks: Vec<String>,
    #[serde(default = "default_mark_types")]
    pub mark_types: Vec<MarkTypeOption>,
}

fn default_marks() -> Vec<String> {
    (1..=5).map(|v| v.to_string()).collect()
}

fn default_mark_types() -> Vec<MarkTypeOption> {
    let catalog = [
        ("exam", "Экзамен"),
        ("test", "Контрольная"),
        ("classwork", "Классная работа"),
        ("homework", "Домашняя работа"),
        ("oral", "Устный ответ"),
    ];
    let mut types = vec![MarkTypeOption::unset()];
    types.extend(catalog.iter().map(|(value, label)| MarkTypeOption {
        value: value.to_string(),
        label: label.to_string(),
    }));
    types
}

impl Default for JournalConfig {
    fn default() -> Self {
        JournalConfig {
            marks: default_marks(),
            mark_types: default_mark_types(),
        }
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("markpad").join("config.json");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("markpad")
            .join("config.json");
    }
    PathBuf::from("markpad.json")
}

/// Load the default config file; any read/parse/validation problem falls back
/// to `None` so the caller can use the built-in defaults.
pub fn load_saved_config() -> Option<JournalConfig> {
    try_load_config(&config_path()).ok()
}

fn is_safe_value(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 32
        && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

pub fn validate_config(cfg: &JournalConfig) -> Result<(), String> {
    if cfg.marks.is_empty() {
        return Err("no mark values configured".to_string());
    }
    if cfg.marks.len() > 16 {
        return Err("too many mark values (max 16)".to_string());
    }
    for (i, m) in cfg.marks.iter().enumerate() {
        if m.is_empty() || m.len() > 8 || m.chars().any(char::is_whitespace) {
            return Err(format!("invalid mark value #{}", i + 1));
        }
        if cfg.marks[..i].contains(m) {
            return Err(format!("duplicate mark value '{}'", m));
        }
    }
    if cfg.mark_types.is_empty() {
        return Err("no mark types configured".to_string());
    }
    if cfg.mark_types.len() > 32 {
        return Err("too many mark types (max 32)".to_string());
    }
    for (i, t) in cfg.mark_types.iter().enumerate() {
        if !is_safe_value(&t.value) {
            return Err(format!("invalid mark type value #{}", i + 1));
        }
        if t.label.trim().is_empty() || t.label.len() > 64 {
            return Err(format!("invalid mark type label #{}", i + 1));
        }
        if cfg.mark_types[..i].iter().any(|o| o.value == t.value) {
            return Err(format!("duplicate mark type value '{}'", t.value));
        }
    }
    Ok(())
}

pub fn try_load_config(path: &Path) -> Result<JournalConfig, String> {
    let data = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let cfg: JournalConfig =
        serde_json::from_str(&data).map_err(|e| format!("parse error: {}", e))?;
    validate_config(&cfg)?;
    Ok(cfg)
}
