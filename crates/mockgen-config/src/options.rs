//! Declarations for every mockgen option.
//!
//! Each helper registers one flag and returns the handle used later to read
//! its value. Registering the same flag twice on one registry is an error.

use mockgen_argparse::registry::{Completion, Handle, Registry, RegistryError};
use std::path::PathBuf;

pub type AddResult<T> = Result<Handle<T>, RegistryError>;

// Options

pub fn add_project_path(registry: &mut Registry) -> AddResult<PathBuf> {
    registry.add(
        "--project",
        "Path to your project’s `.xcodeproj` file.",
        Some(Completion::Filename),
    )
}

pub fn add_source_root(registry: &mut Registry) -> AddResult<PathBuf> {
    registry.add(
        "--srcroot",
        "The folder containing your project's source files.",
        Some(Completion::Filename),
    )
}

pub fn add_targets(registry: &mut Registry) -> AddResult<Vec<String>> {
    registry.add(
        "--targets",
        "List of target names to generate mocks for.",
        None,
    )
}

/// Convenience for `--targets`. Accepts multiple targets.
pub fn add_target(registry: &mut Registry) -> AddResult<Vec<String>> {
    registry.add("--target", "A target name to generate mocks for.", None)
}

pub fn add_source_targets(registry: &mut Registry) -> AddResult<Vec<String>> {
    registry.add(
        "--targets",
        "List of target names that should generate mocks.",
        None,
    )
}

/// Convenience for source `--targets`. Accepts multiple targets.
pub fn add_source_target(registry: &mut Registry) -> AddResult<Vec<String>> {
    registry.add("--target", "A target name that should generate mocks.", None)
}

pub fn add_destination_target(registry: &mut Registry) -> AddResult<String> {
    registry.add(
        "--destination",
        "The target name where the Run Script Phase will be installed.",
        None,
    )
}

pub fn add_outputs(registry: &mut Registry) -> AddResult<Vec<PathBuf>> {
    registry.add(
        "--outputs",
        "List of mock output file paths for each target.",
        Some(Completion::Filename),
    )
}

/// Convenience for `--outputs`. Accepts multiple outputs.
pub fn add_output(registry: &mut Registry) -> AddResult<Vec<PathBuf>> {
    registry.add("--output", "Mock output file path.", Some(Completion::Filename))
}

pub fn add_compilation_condition(registry: &mut Registry) -> AddResult<String> {
    registry.add(
        "--condition",
        "Compilation condition to wrap all generated mocks in, e.g. `DEBUG`.",
        Some(Completion::values(&[
            ("DEBUG", "Debug build configuration"),
            ("RELEASE", "Release build configuration"),
            ("TEST", "Test build configuration"),
        ])),
    )
}

pub fn add_metagenerate_output(registry: &mut Registry) -> AddResult<PathBuf> {
    registry.add(
        "--output",
        "Output directory to generate source files.",
        Some(Completion::Filename),
    )
}

pub fn add_metagenerate_count(registry: &mut Registry) -> AddResult<i64> {
    registry.add("--count", "Number of source files to generate.", None)
}

// Global options

pub fn add_verbose_log_level(registry: &mut Registry) -> AddResult<bool> {
    registry.add(
        "--verbose",
        "Log all errors, warnings, and debug messages.",
        None,
    )
}

pub fn add_quiet_log_level(registry: &mut Registry) -> AddResult<bool> {
    registry.add("--quiet", "Only log error messages.", None)
}

// Flags

pub fn add_only_protocols(registry: &mut Registry) -> AddResult<bool> {
    registry.add("--only-protocols", "Only generate mocks for protocols.", None)
}

pub fn add_disable_module_import(registry: &mut Registry) -> AddResult<bool> {
    registry.add(
        "--disable-module-import",
        "Omit `@testable import <module>` from generated mocks.",
        None,
    )
}

pub fn add_ignore_existing_run_script(registry: &mut Registry) -> AddResult<bool> {
    registry.add(
        "--ignore-existing",
        "Don’t overwrite existing Run Scripts created by mockgen.",
        None,
    )
}

pub fn add_asynchronous_generation(registry: &mut Registry) -> AddResult<bool> {
    registry.add(
        "--asynchronous",
        "Generate mocks asynchronously in the background when building.",
        None,
    )
}

pub fn add_disable_swiftlint(registry: &mut Registry) -> AddResult<bool> {
    registry.add(
        "--disable-swiftlint",
        "Disable all SwiftLint rules in generated mocks.",
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockgen_argparse::registry::ValueKind;

    #[test]
    fn declarations_keep_flag_names_and_kinds() {
        let mut registry = Registry::new("mockgen generate");
        let project = add_project_path(&mut registry).unwrap();
        let targets = add_targets(&mut registry).unwrap();
        let target = add_target(&mut registry).unwrap();
        let outputs = add_outputs(&mut registry).unwrap();
        let condition = add_compilation_condition(&mut registry).unwrap();

        assert_eq!(registry.decl(&project).flag(), "--project");
        assert_eq!(registry.decl(&project).kind(), ValueKind::Path);
        assert_eq!(registry.decl(&targets).flag(), "--targets");
        assert_eq!(registry.decl(&target).kind(), ValueKind::StringList);
        assert_eq!(registry.decl(&outputs).kind(), ValueKind::PathList);

        let Some(Completion::Values(values)) = registry.decl(&condition).completion() else {
            panic!("expected value completions for --condition");
        };
        let names: Vec<&str> = values.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(names, vec!["DEBUG", "RELEASE", "TEST"]);
    }

    #[test]
    fn output_convenience_collides_with_metagenerate_output() {
        let mut registry = Registry::new("mockgen");
        add_output(&mut registry).unwrap();
        let err = add_metagenerate_output(&mut registry).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateFlag {
                flag: "--output".to_string()
            }
        );
    }
}
