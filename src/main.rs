use android_versioning::{
    actions::{self, PipelineState},
    arguments::{Arguments, Command},
};
use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::path::Path;

fn main() -> Result<()> {
    let args = Arguments::parse();
    pretty_env_logger::env_logger::builder()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .format_timestamp(None)
        .init();

    let project_dir: &Path = args.app_project_dir.as_ref();
    let mut state = PipelineState::default();

    match args.command {
        Command::GetValue { key } => println!("{}", actions::get_value(project_dir, &key)?),
        Command::SetValue { key, value } => actions::set_value(project_dir, &key, &value)?,
        Command::GetVersionCode => println!("{}", actions::get_version_code(project_dir)?),
        Command::GetVersionName => println!("{}", actions::get_version_name(project_dir)?),
        Command::IncrementVersionCode { version_code } => {
            actions::increment_version_code(project_dir, version_code, &mut state)?;
        }
        Command::IncrementVersionName { bump_type, version_name } => {
            actions::increment_version_name(
                project_dir,
                bump_type,
                version_name.as_deref(),
                &mut state,
            )?;
        }
    }

    for (name, value) in state.outputs() {
        println!("{name}={value}");
    }

    Ok(())
}
