//! Resolution and validation of individual settings.
//!
//! Every function is a pure, single pass over the matched argv, the
//! environment snapshot and (for defaults) settings resolved earlier. The only
//! I/O is read-only filesystem metadata for path validation.
//!
//! Sources, the combine rule, whether a value is required and the validation
//! rule all come from the setting's [`SettingPolicy`].

use crate::environment::{Environment, FromEnv};
use crate::error::ResolveError;
use crate::log_level::LogLevel;
use crate::policy::{self, Combine, Rejection, SettingPolicy, Validate, Validation};
use mockgen_argparse::args::Matches;
use mockgen_argparse::registry::{Handle, OptionValue};
use std::path::{Path, PathBuf};

/// Which link of the precedence chain produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Primary,
    Convenience,
    Environment,
    Default,
}

fn record(policy: &SettingPolicy, source: Source) {
    tracing::debug!(setting = policy.setting, source = ?source, "resolved setting");
}

/// First matched value of `primary`, then `convenience`.
///
/// When both were supplied the convenience value is ignored.
pub fn override_value<T: OptionValue>(
    matches: &Matches,
    primary: &Handle<T>,
    convenience: Option<&Handle<T>>,
) -> Option<(T, Source)> {
    if let Some(value) = matches.get(primary) {
        return Some((value, Source::Primary));
    }
    convenience
        .and_then(|h| matches.get(h))
        .map(|value| (value, Source::Convenience))
}

/// Values of `primary` and `convenience` concatenated in argv order.
///
/// `None` when neither option was supplied.
pub fn merged_list<T>(
    matches: &Matches,
    primary: &Handle<Vec<T>>,
    convenience: Option<&Handle<Vec<T>>>,
) -> Option<(Vec<T>, Source)>
where
    Vec<T>: OptionValue,
{
    let source = if matches.is_present(primary) {
        Source::Primary
    } else {
        Source::Convenience
    };
    let merged = match convenience {
        Some(convenience) => matches.get_merged(&[primary, convenience]),
        None => matches.get_merged(&[primary]),
    };
    merged.map(|values| (values, source))
}

/// Apply `policy`'s required and validation rules to a looked-up value.
///
/// `Ok(None)` only for an optional setting that no source supplied.
pub fn settle<T: Validate>(
    policy: &SettingPolicy,
    found: Option<(T, Source)>,
) -> Result<Option<T>, ResolveError> {
    let Some((value, source)) = found else {
        return if policy.required {
            Err(policy.missing())
        } else {
            Ok(None)
        };
    };
    match value.check(policy.validation) {
        Ok(()) => {}
        Err(Rejection::Empty) => return Err(policy.missing()),
        Err(Rejection::Invalid(reason)) => {
            return Err(policy.invalid(value.argument(), reason));
        }
    }
    record(policy, source);
    Ok(Some(value))
}

fn require<T: Validate>(
    policy: &SettingPolicy,
    found: Option<(T, Source)>,
) -> Result<T, ResolveError> {
    settle(policy, found)?.ok_or_else(|| policy.missing())
}

fn env_value<T: FromEnv>(policy: &SettingPolicy, env: &Environment) -> Option<(T, Source)> {
    policy
        .env
        .and_then(|key| env.get(key))
        .map(|raw| (T::from_env(raw), Source::Environment))
}

/// Walk the argv and environment links of `policy`'s precedence chain.
fn lookup<T: OptionValue + FromEnv>(
    policy: &SettingPolicy,
    matches: &Matches,
    primary: &Handle<T>,
    convenience: Option<&Handle<T>>,
    env: &Environment,
) -> Option<(T, Source)> {
    override_value(matches, primary, convenience).or_else(|| env_value(policy, env))
}

/// List options from argv, combined per `policy.combine`.
fn argv_list<T>(
    policy: &SettingPolicy,
    matches: &Matches,
    primary: &Handle<Vec<T>>,
    convenience: Option<&Handle<Vec<T>>>,
) -> Option<(Vec<T>, Source)>
where
    Vec<T>: OptionValue,
{
    match policy.combine {
        Combine::Merge => merged_list(matches, primary, convenience),
        Combine::Override => override_value(matches, primary, convenience),
    }
}

fn lookup_list<T>(
    policy: &SettingPolicy,
    matches: &Matches,
    primary: &Handle<Vec<T>>,
    convenience: Option<&Handle<Vec<T>>>,
    env: &Environment,
) -> Option<(Vec<T>, Source)>
where
    Vec<T>: OptionValue + FromEnv,
{
    argv_list(policy, matches, primary, convenience).or_else(|| env_value(policy, env))
}

/// `--project`, falling back to `PROJECT_FILE_PATH`.
///
/// The path must be an existing `.xcodeproj` directory.
pub fn project_path(
    matches: &Matches,
    project: &Handle<PathBuf>,
    env: &Environment,
) -> Result<PathBuf, ResolveError> {
    let policy = &policy::PROJECT_PATH;
    require(policy, lookup(policy, matches, project, None, env))
}

/// `--srcroot`, falling back to `SRCROOT`, then to the directory containing
/// the project bundle.
pub fn source_root(
    matches: &Matches,
    srcroot: &Handle<PathBuf>,
    env: &Environment,
    project_path: &Path,
) -> Result<PathBuf, ResolveError> {
    let policy = &policy::SOURCE_ROOT;
    if let Some(path) = settle(policy, lookup(policy, matches, srcroot, None, env))? {
        return Ok(path);
    }

    record(policy, Source::Default);
    Ok(match project_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    })
}

/// `--targets` merged with `--target`, falling back to `TARGET_NAME`.
pub fn targets(
    matches: &Matches,
    targets: &Handle<Vec<String>>,
    target: &Handle<Vec<String>>,
    env: &Environment,
) -> Result<Vec<String>, ResolveError> {
    let policy = &policy::TARGETS;
    require(policy, lookup_list(policy, matches, targets, Some(target), env))
}

/// Source `--targets` merged with `--target`. No environment fallback.
pub fn source_targets(
    matches: &Matches,
    targets: &Handle<Vec<String>>,
    target: &Handle<Vec<String>>,
    env: &Environment,
) -> Result<Vec<String>, ResolveError> {
    let policy = &policy::SOURCE_TARGETS;
    require(policy, lookup_list(policy, matches, targets, Some(target), env))
}

/// `--outputs` merged with `--output`; `None` when neither was supplied.
pub fn outputs(
    matches: &Matches,
    outputs: &Handle<Vec<PathBuf>>,
    output: &Handle<Vec<PathBuf>>,
) -> Result<Option<Vec<PathBuf>>, ResolveError> {
    let policy = &policy::OUTPUTS;
    settle(policy, argv_list(policy, matches, outputs, Some(output)))
}

pub fn destination_target(
    matches: &Matches,
    destination: &Handle<String>,
) -> Result<String, ResolveError> {
    let policy = &policy::DESTINATION_TARGET;
    require(policy, override_value(matches, destination, None))
}

/// Metagenerate `--output`; must be an existing directory.
pub fn output_directory(
    matches: &Matches,
    output: &Handle<PathBuf>,
) -> Result<PathBuf, ResolveError> {
    let policy = &policy::OUTPUT_DIRECTORY;
    require(policy, override_value(matches, output, None))
}

/// Optional `--count`; must be positive when supplied.
pub fn count(matches: &Matches, count: &Handle<i64>) -> Result<Option<usize>, ResolveError> {
    let policy = &policy::COUNT;
    settle(policy, override_value(matches, count, None))?
        .map(|raw| usize::try_from(raw).map_err(|_| policy.invalid(raw, "Not a positive number")))
        .transpose()
}

/// `--condition`; free text, completion values are not enforced.
pub fn compilation_condition(
    matches: &Matches,
    condition: &Handle<String>,
) -> Result<Option<String>, ResolveError> {
    let policy = &policy::COMPILATION_CONDITION;
    settle(policy, override_value(matches, condition, None))
}

/// `--verbose` and `--quiet` are mutually exclusive.
pub fn log_level(
    matches: &Matches,
    verbose: &Handle<bool>,
    quiet: &Handle<bool>,
) -> Result<LogLevel, ResolveError> {
    let policy = &policy::LOG_LEVEL;
    let is_verbose = flag(matches, verbose);
    let is_quiet = flag(matches, quiet);
    if policy.validation == Validation::Exclusive && is_verbose && is_quiet {
        return Err(ResolveError::invalid(
            "--verbose --quiet",
            "Cannot specify both --verbose and --quiet",
        ));
    }
    Ok(if is_verbose {
        LogLevel::Verbose
    } else if is_quiet {
        LogLevel::Quiet
    } else {
        LogLevel::Normal
    })
}

/// Independent boolean flag; absent reads as `false`.
pub fn flag(matches: &Matches, handle: &Handle<bool>) -> bool {
    matches.get(handle).unwrap_or(false)
}
