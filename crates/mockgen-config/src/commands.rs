//! Option sets for each mockgen command.
//!
//! `register` declares a command's options on a registry and keeps the
//! handles; `resolve` turns matched argv plus the environment into that
//! command's typed configuration, stopping at the first invalid setting.

use crate::environment::Environment;
use crate::error::ResolveError;
use crate::log_level::LogLevel;
use crate::options;
use crate::resolve;
use mockgen_argparse::args::Matches;
use mockgen_argparse::registry::{Handle, Registry, RegistryError};
use serde::Serialize;
use std::path::PathBuf;

/// `--verbose` / `--quiet`, shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct GlobalOptions {
    pub verbose: Handle<bool>,
    pub quiet: Handle<bool>,
}

impl GlobalOptions {
    pub fn register(registry: &mut Registry) -> Result<Self, RegistryError> {
        Ok(Self {
            verbose: options::add_verbose_log_level(registry)?,
            quiet: options::add_quiet_log_level(registry)?,
        })
    }

    pub fn resolve(&self, matches: &Matches) -> Result<LogLevel, ResolveError> {
        resolve::log_level(matches, &self.verbose, &self.quiet)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateConfig {
    pub project_path: PathBuf,
    pub source_root: PathBuf,
    pub targets: Vec<String>,
    pub outputs: Option<Vec<PathBuf>>,
    pub compilation_condition: Option<String>,
    pub disable_module_import: bool,
    pub only_protocols: bool,
    pub disable_swiftlint: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub project: Handle<PathBuf>,
    pub srcroot: Handle<PathBuf>,
    pub targets: Handle<Vec<String>>,
    pub target: Handle<Vec<String>>,
    pub outputs: Handle<Vec<PathBuf>>,
    pub output: Handle<Vec<PathBuf>>,
    pub condition: Handle<String>,
    pub disable_module_import: Handle<bool>,
    pub only_protocols: Handle<bool>,
    pub disable_swiftlint: Handle<bool>,
}

impl GenerateOptions {
    pub fn register(registry: &mut Registry) -> Result<Self, RegistryError> {
        Ok(Self {
            project: options::add_project_path(registry)?,
            srcroot: options::add_source_root(registry)?,
            targets: options::add_targets(registry)?,
            target: options::add_target(registry)?,
            outputs: options::add_outputs(registry)?,
            output: options::add_output(registry)?,
            condition: options::add_compilation_condition(registry)?,
            disable_module_import: options::add_disable_module_import(registry)?,
            only_protocols: options::add_only_protocols(registry)?,
            disable_swiftlint: options::add_disable_swiftlint(registry)?,
        })
    }

    pub fn resolve(
        &self,
        matches: &Matches,
        env: &Environment,
    ) -> Result<GenerateConfig, ResolveError> {
        let project_path = resolve::project_path(matches, &self.project, env)?;
        let source_root = resolve::source_root(matches, &self.srcroot, env, &project_path)?;
        Ok(GenerateConfig {
            targets: resolve::targets(matches, &self.targets, &self.target, env)?,
            outputs: resolve::outputs(matches, &self.outputs, &self.output)?,
            compilation_condition: resolve::compilation_condition(matches, &self.condition)?,
            disable_module_import: resolve::flag(matches, &self.disable_module_import),
            only_protocols: resolve::flag(matches, &self.only_protocols),
            disable_swiftlint: resolve::flag(matches, &self.disable_swiftlint),
            project_path,
            source_root,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallConfig {
    pub project_path: PathBuf,
    pub source_root: PathBuf,
    pub source_targets: Vec<String>,
    pub destination_target: String,
    pub outputs: Option<Vec<PathBuf>>,
    pub compilation_condition: Option<String>,
    pub ignore_existing: bool,
    pub asynchronous: bool,
    pub only_protocols: bool,
    pub disable_swiftlint: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct InstallOptions {
    pub project: Handle<PathBuf>,
    pub srcroot: Handle<PathBuf>,
    pub targets: Handle<Vec<String>>,
    pub target: Handle<Vec<String>>,
    pub destination: Handle<String>,
    pub outputs: Handle<Vec<PathBuf>>,
    pub output: Handle<Vec<PathBuf>>,
    pub condition: Handle<String>,
    pub ignore_existing: Handle<bool>,
    pub asynchronous: Handle<bool>,
    pub only_protocols: Handle<bool>,
    pub disable_swiftlint: Handle<bool>,
}

impl InstallOptions {
    pub fn register(registry: &mut Registry) -> Result<Self, RegistryError> {
        Ok(Self {
            project: options::add_project_path(registry)?,
            srcroot: options::add_source_root(registry)?,
            targets: options::add_source_targets(registry)?,
            target: options::add_source_target(registry)?,
            destination: options::add_destination_target(registry)?,
            outputs: options::add_outputs(registry)?,
            output: options::add_output(registry)?,
            condition: options::add_compilation_condition(registry)?,
            ignore_existing: options::add_ignore_existing_run_script(registry)?,
            asynchronous: options::add_asynchronous_generation(registry)?,
            only_protocols: options::add_only_protocols(registry)?,
            disable_swiftlint: options::add_disable_swiftlint(registry)?,
        })
    }

    pub fn resolve(
        &self,
        matches: &Matches,
        env: &Environment,
    ) -> Result<InstallConfig, ResolveError> {
        let project_path = resolve::project_path(matches, &self.project, env)?;
        let source_root = resolve::source_root(matches, &self.srcroot, env, &project_path)?;
        Ok(InstallConfig {
            source_targets: resolve::source_targets(matches, &self.targets, &self.target, env)?,
            destination_target: resolve::destination_target(matches, &self.destination)?,
            outputs: resolve::outputs(matches, &self.outputs, &self.output)?,
            compilation_condition: resolve::compilation_condition(matches, &self.condition)?,
            ignore_existing: resolve::flag(matches, &self.ignore_existing),
            asynchronous: resolve::flag(matches, &self.asynchronous),
            only_protocols: resolve::flag(matches, &self.only_protocols),
            disable_swiftlint: resolve::flag(matches, &self.disable_swiftlint),
            project_path,
            source_root,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UninstallConfig {
    pub project_path: PathBuf,
    pub source_targets: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct UninstallOptions {
    pub project: Handle<PathBuf>,
    pub targets: Handle<Vec<String>>,
    pub target: Handle<Vec<String>>,
}

impl UninstallOptions {
    pub fn register(registry: &mut Registry) -> Result<Self, RegistryError> {
        Ok(Self {
            project: options::add_project_path(registry)?,
            targets: options::add_source_targets(registry)?,
            target: options::add_source_target(registry)?,
        })
    }

    pub fn resolve(
        &self,
        matches: &Matches,
        env: &Environment,
    ) -> Result<UninstallConfig, ResolveError> {
        Ok(UninstallConfig {
            project_path: resolve::project_path(matches, &self.project, env)?,
            source_targets: resolve::source_targets(matches, &self.targets, &self.target, env)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetagenerateConfig {
    pub output_directory: PathBuf,
    pub count: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
pub struct MetagenerateOptions {
    pub output: Handle<PathBuf>,
    pub count: Handle<i64>,
}

impl MetagenerateOptions {
    pub fn register(registry: &mut Registry) -> Result<Self, RegistryError> {
        Ok(Self {
            output: options::add_metagenerate_output(registry)?,
            count: options::add_metagenerate_count(registry)?,
        })
    }

    pub fn resolve(&self, matches: &Matches) -> Result<MetagenerateConfig, ResolveError> {
        Ok(MetagenerateConfig {
            output_directory: resolve::output_directory(matches, &self.output)?,
            count: resolve::count(matches, &self.count)?,
        })
    }
}
