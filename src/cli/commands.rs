//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, SizeArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{BinaryTree, TreeBuilder};
use crate::render::{to_text_tree, write_svg};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    execute_with_global(cli, global_config_path().as_deref())
}

/// Like [`execute_command`] with an explicit global config file (`None` skips it).
pub fn execute_with_global(cli: &Cli, global: Option<&Path>) -> CliResult<()> {
    let local_dir = cli
        .config_dir
        .clone()
        .or_else(|| std::env::current_dir().ok());
    let settings = Settings::load_from(global, local_dir.as_deref())?;
    debug!(?settings, "settings loaded");

    match &cli.command {
        Some(Commands::Build { size }) => _build(&builder_for(size, &settings)?),
        Some(Commands::Layout { size }) => _layout(&builder_for(size, &settings)?),
        Some(Commands::Tree { size }) => _tree(&builder_for(size, &settings)?),
        Some(Commands::Render { size, output }) => {
            let path = output.clone().unwrap_or_else(|| settings.output.clone());
            _render(&builder_for(size, &settings)?, &path, &settings)
        }
        Some(Commands::Config { command }) => _config(command, &settings, global, local_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Explicit count, then seed, then the configured default.
pub fn builder_for(size: &SizeArgs, settings: &Settings) -> CliResult<TreeBuilder> {
    match (size.nodes, size.seed.as_deref()) {
        (Some(nodes), _) => Ok(TreeBuilder::new().nodes(nodes)),
        (None, Some("")) => Err(CliError::Usage("--seed must not be empty".into())),
        (None, Some(seed)) => Ok(TreeBuilder::new().seed(seed)),
        (None, None) => Ok(TreeBuilder::new().nodes(settings.default_nodes)),
    }
}

fn title(tree: &BinaryTree) -> String {
    format!("binary tree with {} nodes", tree.len())
}

#[instrument]
fn _build(builder: &TreeBuilder) -> CliResult<()> {
    let tree = builder.build()?;
    let arena = tree.arena();

    output::header(&title(&tree));
    output::action("requested", &builder.requested());
    output::action("root", &tree.root());
    output::action("depth", &arena.depth());
    output::action("leaves", &arena.leaves().iter().join(" "));
    output::action("internal", &arena.internal_nodes().iter().join(" "));
    output::action("dfs order", &tree.dfs_order().iter().join(" "));
    Ok(())
}

#[instrument]
fn _layout(builder: &TreeBuilder) -> CliResult<()> {
    let tree = builder.build()?;
    for &id in tree.dfs_order() {
        if let Some(at) = tree.position(id) {
            output::info(&format!("{id}\t{}\t{}", at.x, at.y));
        }
    }
    Ok(())
}

#[instrument]
fn _tree(builder: &TreeBuilder) -> CliResult<()> {
    let tree = builder.build()?;
    output::header(&title(&tree));
    output::info(&to_text_tree(&tree));
    Ok(())
}

#[instrument(skip(settings))]
fn _render(builder: &TreeBuilder, path: &Path, settings: &Settings) -> CliResult<()> {
    let tree = builder.build()?;
    write_svg(&tree, path, &settings.render)?;
    output::success(&format!("{} -> {}", title(&tree), path.display()));
    Ok(())
}

fn _config(
    command: &ConfigCommands,
    settings: &Settings,
    global: Option<&Path>,
    local_dir: Option<PathBuf>,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Init => output::info(&Settings::template()),
        ConfigCommands::Path => {
            output::header("Config paths");
            match global {
                Some(p) => output::detail(&format!("global: {}", p.display())),
                None => output::detail(&"global: (no home directory)"),
            }
            if let Some(dir) = local_dir {
                output::detail(&format!("local:  {}", local_config_path(&dir).display()));
            }
        }
    }
    Ok(())
}
