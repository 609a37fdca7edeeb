//! Per-setting resolution policy.
//!
//! Every logical setting records its sources, how a primary and convenience
//! option combine, whether it is required, and which validation applies.
//! The resolver functions in [`crate::resolve`] read these entries instead of
//! hard-coding the rules at each call site.

use crate::error::ResolveError;
use std::ffi::OsStr;
use std::path::PathBuf;

pub const PROJECT_FILE_PATH_ENV: &str = "PROJECT_FILE_PATH";
pub const SRCROOT_ENV: &str = "SRCROOT";
pub const TARGET_NAME_ENV: &str = "TARGET_NAME";

/// Extension of the project bundle accepted by `--project`.
pub const PROJECT_BUNDLE_EXTENSION: &str = "xcodeproj";

/// How values from a primary and a convenience option combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    /// The first source with a value wins; later ones are ignored.
    Override,
    /// Values from both options are concatenated in argv order.
    Merge,
}

/// Rule a resolved value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    None,
    /// Existing directory ending in [`PROJECT_BUNDLE_EXTENSION`].
    ProjectBundle,
    /// Existing directory.
    Directory,
    /// Integer greater than zero.
    Positive,
    /// List with at least one element.
    NonEmpty,
    /// Boolean pair where at most one may be set.
    Exclusive,
}

/// Why a value failed its [`Validation`] rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Reported as a missing value.
    Empty,
    /// Reported as an invalid value with this reason.
    Invalid(&'static str),
}

/// A setting value that can be checked against a [`Validation`] rule.
///
/// Rules that do not apply to the value's type accept it.
pub trait Validate {
    fn check(&self, rule: Validation) -> Result<(), Rejection>;

    /// The value as printed in an invalid-value error.
    fn argument(&self) -> String;
}

impl Validate for PathBuf {
    fn check(&self, rule: Validation) -> Result<(), Rejection> {
        match rule {
            Validation::ProjectBundle => {
                let is_bundle = self.extension() == Some(OsStr::new(PROJECT_BUNDLE_EXTENSION));
                if self.is_dir() && is_bundle {
                    Ok(())
                } else {
                    Err(Rejection::Invalid("Not a valid `.xcodeproj` path"))
                }
            }
            Validation::Directory if !self.is_dir() => {
                Err(Rejection::Invalid("Not a valid directory"))
            }
            _ => Ok(()),
        }
    }

    fn argument(&self) -> String {
        std::path::absolute(self)
            .unwrap_or_else(|_| self.clone())
            .display()
            .to_string()
    }
}

impl Validate for String {
    fn check(&self, _rule: Validation) -> Result<(), Rejection> {
        Ok(())
    }

    fn argument(&self) -> String {
        self.clone()
    }
}

impl Validate for i64 {
    fn check(&self, rule: Validation) -> Result<(), Rejection> {
        match rule {
            Validation::Positive if *self <= 0 => Err(Rejection::Invalid("Not a positive number")),
            _ => Ok(()),
        }
    }

    fn argument(&self) -> String {
        self.to_string()
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn check(&self, rule: Validation) -> Result<(), Rejection> {
        match rule {
            Validation::NonEmpty if self.is_empty() => Err(Rejection::Empty),
            _ => Ok(()),
        }
    }

    fn argument(&self) -> String {
        self.iter().map(Validate::argument).collect::<Vec<_>>().join(",")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingPolicy {
    pub setting: &'static str,
    /// Primary flag, as printed in invalid-value errors.
    pub flag: &'static str,
    /// Canonical usage string, as printed in missing-value errors.
    pub usage: &'static str,
    pub env: Option<&'static str>,
    pub combine: Combine,
    pub required: bool,
    pub validation: Validation,
}

impl SettingPolicy {
    pub fn missing(&self) -> ResolveError {
        ResolveError::missing(self.usage)
    }

    pub fn invalid(&self, value: impl std::fmt::Display, reason: &str) -> ResolveError {
        ResolveError::invalid(format!("{} {value}", self.flag), reason)
    }
}

pub const PROJECT_PATH: SettingPolicy = SettingPolicy {
    setting: "project_path",
    flag: "--project",
    usage: "--project <xcodeproj file path>",
    env: Some(PROJECT_FILE_PATH_ENV),
    combine: Combine::Override,
    required: true,
    validation: Validation::ProjectBundle,
};

pub const SOURCE_ROOT: SettingPolicy = SettingPolicy {
    setting: "source_root",
    flag: "--srcroot",
    usage: "--srcroot <source root path>",
    env: Some(SRCROOT_ENV),
    combine: Combine::Override,
    required: false,
    validation: Validation::None,
};

pub const TARGETS: SettingPolicy = SettingPolicy {
    setting: "targets",
    flag: "--targets",
    usage: "--targets <list of target names>",
    env: Some(TARGET_NAME_ENV),
    combine: Combine::Merge,
    required: true,
    validation: Validation::NonEmpty,
};

pub const SOURCE_TARGETS: SettingPolicy = SettingPolicy {
    setting: "source_targets",
    flag: "--targets",
    usage: "--targets <list of target names>",
    env: None,
    combine: Combine::Merge,
    required: true,
    validation: Validation::NonEmpty,
};

pub const OUTPUTS: SettingPolicy = SettingPolicy {
    setting: "outputs",
    flag: "--outputs",
    usage: "--outputs <list of output file paths>",
    env: None,
    combine: Combine::Merge,
    required: false,
    validation: Validation::None,
};

pub const DESTINATION_TARGET: SettingPolicy = SettingPolicy {
    setting: "destination_target",
    flag: "--destination",
    usage: "--destination <target name>",
    env: None,
    combine: Combine::Override,
    required: true,
    validation: Validation::None,
};

pub const OUTPUT_DIRECTORY: SettingPolicy = SettingPolicy {
    setting: "output_directory",
    flag: "--output",
    usage: "--output <output directory path>",
    env: None,
    combine: Combine::Override,
    required: true,
    validation: Validation::Directory,
};

pub const COUNT: SettingPolicy = SettingPolicy {
    setting: "count",
    flag: "--count",
    usage: "--count <number of source files>",
    env: None,
    combine: Combine::Override,
    required: false,
    validation: Validation::Positive,
};

pub const COMPILATION_CONDITION: SettingPolicy = SettingPolicy {
    setting: "compilation_condition",
    flag: "--condition",
    usage: "--condition <compilation condition>",
    env: None,
    combine: Combine::Override,
    required: false,
    validation: Validation::None,
};

pub const LOG_LEVEL: SettingPolicy = SettingPolicy {
    setting: "log_level",
    flag: "--verbose",
    usage: "--verbose | --quiet",
    env: None,
    combine: Combine::Override,
    required: false,
    validation: Validation::Exclusive,
};
