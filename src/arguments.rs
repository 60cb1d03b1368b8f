use crate::gradle::locator::DEFAULT_APP_PROJECT_DIR;
use crate::version::BumpType;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, bin_name = "av")]
pub struct Arguments {
    /// The path to the application source folder in the Android project
    #[arg(
        long,
        short = 'd',
        global = true,
        env = "ANDROID_VERSIONING_APP_PROJECT_DIR",
        default_value = DEFAULT_APP_PROJECT_DIR
    )]
    pub app_project_dir: String,
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Print the value of a property
    GetValue {
        #[arg(long, short)]
        key: String,
    },
    /// Set the value of a property
    SetValue {
        #[arg(long, short)]
        key: String,
        #[arg(long)]
        value: String,
    },
    /// Print the version code of the project
    GetVersionCode,
    /// Print the version name of the project
    GetVersionName,
    /// Increment the version code of the project
    IncrementVersionCode {
        /// Change to a specific version code
        #[arg(long, env = "ANDROID_VERSIONING_VERSION_CODE")]
        version_code: Option<u64>,
    },
    /// Increment the version name of the project
    IncrementVersionName {
        #[arg(
            long,
            short,
            value_enum,
            ignore_case = true,
            env = "ANDROID_VERSIONING_BUMP_TYPE",
            default_value_t = BumpType::Patch
        )]
        bump_type: BumpType,
        /// Change to a specific version name
        #[arg(long, env = "ANDROID_VERSIONING_VERSION_NAME")]
        version_name: Option<String>,
    },
}
