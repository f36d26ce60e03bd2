//! Command-line surface.
//!
//! The `grunt` and `gulp` subcommands share one flattened argument
//! struct, so their invocation semantics cannot drift apart.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Run frontend build tasks against an embedded static server.
#[derive(Parser)]
#[command(name = "frontstage", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run a grunt task with the embedded server up
    Grunt(TaskArgs),

    /// Run a gulp task with the embedded server up
    Gulp(TaskArgs),
}

/// Arguments shared by both task subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct TaskArgs {
    /// Runner arguments, passed through verbatim (empty runs the default task)
    #[arg(long, default_value = "")]
    pub arguments: String,

    /// Base directory for the run (usually the directory that contains
    /// package.json); defaults to the current directory
    #[arg(long, value_name = "DIR")]
    pub working_directory: Option<PathBuf>,

    /// Port for the embedded server
    #[arg(long, env = "FRONTSTAGE_PORT")]
    pub port: Option<u16>,

    /// Named context provider ('static' or 'webapp')
    #[arg(long)]
    pub context_provider: Option<String>,

    /// Additional context to serve, as ROOT=DIR (repeatable)
    #[arg(long = "context", value_name = "ROOT=DIR")]
    pub contexts: Vec<String>,

    /// Free-form server property, as KEY=VALUE (repeatable)
    #[arg(long = "config", value_name = "KEY=VALUE")]
    pub config: Vec<String>,

    /// Resolved dependency artifact path to expose as a resource root
    /// (repeatable)
    #[arg(long = "artifact", value_name = "PATH")]
    pub artifacts: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grunt_and_gulp_parse_identically() {
        let grunt = Cli::parse_from(["frontstage", "grunt", "--arguments", "build --prod"]);
        let gulp = Cli::parse_from(["frontstage", "gulp", "--arguments", "build --prod"]);

        let (Some(Commands::Grunt(a)), Some(Commands::Gulp(b))) = (grunt.command, gulp.command)
        else {
            panic!("expected task subcommands");
        };
        assert_eq!(a.arguments, b.arguments);
        assert_eq!(a.arguments, "build --prod");
    }

    #[test]
    fn repeatable_flags_accumulate() {
        let cli = Cli::parse_from([
            "frontstage",
            "grunt",
            "--context",
            "lib=src/main/lib",
            "--context",
            "test/lib=src/test/lib",
            "--config",
            "cors=all",
        ]);

        let Some(Commands::Grunt(args)) = cli.command else {
            panic!("expected grunt");
        };
        assert_eq!(args.contexts.len(), 2);
        assert_eq!(args.config, vec!["cors=all".to_string()]);
        assert_eq!(args.arguments, "");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
