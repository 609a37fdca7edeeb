use mockgen_argparse::args::Matches;
use mockgen_argparse::registry::{Registry, RegistryError};
use mockgen_config::{
    Environment, GenerateConfig, GenerateOptions, InstallConfig, InstallOptions,
    MetagenerateConfig, MetagenerateOptions, ResolveError, UninstallConfig, UninstallOptions,
};
use serde::Serialize;

/// A subcommand's option set, as seen by the dispatcher.
pub trait CommandOptions: Sized {
    type Config: Serialize;

    const NAME: &'static str;
    const SUMMARY: &'static str;

    fn register(registry: &mut Registry) -> Result<Self, RegistryError>;

    fn resolve(&self, matches: &Matches, env: &Environment) -> Result<Self::Config, ResolveError>;
}

impl CommandOptions for GenerateOptions {
    type Config = GenerateConfig;

    const NAME: &'static str = "generate";
    const SUMMARY: &'static str = "Generate mocks for a set of targets";

    fn register(registry: &mut Registry) -> Result<Self, RegistryError> {
        GenerateOptions::register(registry)
    }

    fn resolve(&self, matches: &Matches, env: &Environment) -> Result<Self::Config, ResolveError> {
        GenerateOptions::resolve(self, matches, env)
    }
}

impl CommandOptions for InstallOptions {
    type Config = InstallConfig;

    const NAME: &'static str = "install";
    const SUMMARY: &'static str = "Install a Run Script Phase that generates mocks";

    fn register(registry: &mut Registry) -> Result<Self, RegistryError> {
        InstallOptions::register(registry)
    }

    fn resolve(&self, matches: &Matches, env: &Environment) -> Result<Self::Config, ResolveError> {
        InstallOptions::resolve(self, matches, env)
    }
}

impl CommandOptions for UninstallOptions {
    type Config = UninstallConfig;

    const NAME: &'static str = "uninstall";
    const SUMMARY: &'static str = "Remove mockgen Run Script Phases";

    fn register(registry: &mut Registry) -> Result<Self, RegistryError> {
        UninstallOptions::register(registry)
    }

    fn resolve(&self, matches: &Matches, env: &Environment) -> Result<Self::Config, ResolveError> {
        UninstallOptions::resolve(self, matches, env)
    }
}

impl CommandOptions for MetagenerateOptions {
    type Config = MetagenerateConfig;

    const NAME: &'static str = "metagenerate";
    const SUMMARY: &'static str = "Generate source files for benchmarking";

    fn register(registry: &mut Registry) -> Result<Self, RegistryError> {
        MetagenerateOptions::register(registry)
    }

    // No environment fallbacks.
    fn resolve(&self, matches: &Matches, _env: &Environment) -> Result<Self::Config, ResolveError> {
        MetagenerateOptions::resolve(self, matches)
    }
}
