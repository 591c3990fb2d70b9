use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use native_installer::config::CONFIG_FILENAME;
use native_installer::{preflight, InstallConfig, InstallLayout, Orchestrator, ShellRunner};
use tracing_subscriber::EnvFilter;

/// Build a native library out of tree and install its headers and shared objects.
#[derive(Parser)]
#[command(name = "native-installer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root (default: current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Config file (default: <root>/install.toml, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the system include root
    #[arg(long, global = true)]
    include_root: Option<PathBuf>,

    /// Override the system library root
    #[arg(long, global = true)]
    lib_root: Option<PathBuf>,

    /// Override the header namespace directory
    #[arg(long, global = true)]
    namespace: Option<String>,

    /// Skip the required-tools check
    #[arg(long, global = true)]
    skip_preflight: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, install headers and shared objects, refresh the loader cache (default)
    Install,

    /// Show what install would run and copy, without doing it
    Plan,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let layout = resolve_layout(&cli)?;

    match cli.command {
        Some(Commands::Install) | None => cmd_install(&cli, &layout),
        Some(Commands::Plan) => cmd_plan(&layout),
    }
}

fn resolve_layout(cli: &Cli) -> Result<InstallLayout> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("resolving current directory")?,
    };

    let (mut config, origin) = match &cli.config {
        Some(path) => (
            InstallConfig::load(path)
                .with_context(|| format!("loading config '{}'", path.display()))?,
            path.clone(),
        ),
        None => (
            InstallConfig::load_or_default(&root)
                .with_context(|| format!("loading config from '{}'", root.display()))?,
            root.join(CONFIG_FILENAME),
        ),
    };

    if let Some(include_root) = &cli.include_root {
        config.include_root = include_root.clone();
    }
    if let Some(lib_root) = &cli.lib_root {
        config.lib_root = lib_root.clone();
    }
    if let Some(namespace) = &cli.namespace {
        config.namespace = namespace.clone();
    }

    InstallLayout::resolve(&root, &config, &origin)
        .with_context(|| format!("resolving install layout for '{}'", root.display()))
}

fn cmd_install(cli: &Cli, layout: &InstallLayout) -> Result<()> {
    if !cli.skip_preflight {
        preflight::check_required_tools(&layout.required_tools).context("preflight")?;
    }
    preflight::warn_if_unprivileged(&[layout.include_root.as_path(), layout.lib_root.as_path()]);

    let report = Orchestrator::new(ShellRunner, layout)
        .run()
        .with_context(|| format!("installing from '{}'", layout.root.display()))?;

    println!(
        "install complete: {} headers into {}, {} shared objects into {}",
        report.headers.len(),
        layout.header_root().display(),
        report.shared_objects.len(),
        layout.lib_root.display()
    );
    println!("manifest: {}", report.manifest.display());
    Ok(())
}

fn cmd_plan(layout: &InstallLayout) -> Result<()> {
    let plan = Orchestrator::new(ShellRunner, layout)
        .plan()
        .context("planning install")?;

    println!("build directory: {}", plan.build_dir.display());
    for (step, command) in &plan.build_commands {
        println!("  [{step}] {command}");
    }

    println!("headers -> {}", layout.header_root().display());
    for batch in &plan.header_batches {
        println!(
            "  {} -> {}",
            batch.source_dir.display(),
            batch.destination_dir.display()
        );
        for file in &batch.files {
            println!("    {}", file.source.display());
        }
    }

    match &plan.shared_objects {
        Some(batch) => {
            println!(
                "shared objects: {} -> {}",
                batch.source_dir.display(),
                batch.destination_dir.display()
            );
            for file in &batch.files {
                println!("    {}", file.source.display());
            }
        }
        None => println!(
            "shared objects: {} not built yet",
            layout.library_output_dir.display()
        ),
    }

    println!("loader cache: {}", plan.refresh_command);
    Ok(())
}
