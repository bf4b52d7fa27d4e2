//! Build automation tasks for the clockit project.
//!
//! Run with: `cargo xtask <command>`

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

/// The firmware binary and the only target it runs on.
const FIRMWARE: &str = "clockit";
const TARGET: &str = "thumbv6m-none-eabi";
const FIRMWARE_FEATURES: &str = "pico1,arm,defmt";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for the clockit firmware", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: build lib and firmware, run host tests, generate docs
    CheckAll,
    /// Build the library for the Pico
    Build {
        /// Also compile per-pass display tracing
        #[arg(long)]
        trace: bool,
    },
    /// Run unit and integration tests on the host
    Test,
    /// Build UF2 firmware file for flashing to Pico
    Uf2 {
        #[arg(long)]
        trace: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Build { trace } => build_lib(trace),
        Commands::Test => run_host_tests(),
        Commands::Uf2 { trace } => build_uf2(trace),
    }
}

fn check_all() -> ExitCode {
    let workspace_root = workspace_root();
    let features = firmware_features(false);

    println!("{}", "==> Building library...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--lib",
        "--target",
        TARGET,
        "--features",
        &features,
        "--no-default-features",
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building firmware...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--bin",
        FIRMWARE,
        "--target",
        TARGET,
        "--features",
        &features,
        "--no-default-features",
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Running host tests...".cyan());
    if run_host_tests() != ExitCode::SUCCESS {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building documentation...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "doc",
        "--target",
        TARGET,
        "--no-deps",
        "--features",
        &features,
        "--no-default-features",
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed! 🎉".green().bold());
    ExitCode::SUCCESS
}

fn build_lib(trace: bool) -> ExitCode {
    let workspace_root = workspace_root();
    let features = firmware_features(trace);
    println!(
        "{}",
        format!("Building library with features: {features}").cyan()
    );

    if run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--lib",
        "--target",
        TARGET,
        "--features",
        &features,
        "--no-default-features",
    ])) {
        println!("{}", "Build successful! ✨".green());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_host_tests() -> ExitCode {
    let workspace_root = workspace_root();
    let host_target = host_target();
    match host_target.as_deref() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }

    let mut test_cmd = Command::new("cargo");
    test_cmd.current_dir(&workspace_root).args(["test"]);

    if let Some(target) = host_target {
        test_cmd.arg("--target").arg(target);
    }

    test_cmd.args(["--no-default-features", "--features", "host"]);

    if run_command(&mut test_cmd) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_uf2(trace: bool) -> ExitCode {
    let workspace_root = workspace_root();
    let features = firmware_features(trace);

    println!("{}", format!("Building UF2 for '{FIRMWARE}'").cyan());
    println!("  Features: {}", features.bright_black());
    println!("  Target: {}", TARGET.bright_black());

    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--bin",
        FIRMWARE,
        "--release",
        "--target",
        TARGET,
        "--features",
        &features,
        "--no-default-features",
    ])) {
        return ExitCode::FAILURE;
    }

    let elf_path = format!("target/{TARGET}/release/{FIRMWARE}");
    let uf2_path = format!("{FIRMWARE}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());

    if run_command(
        Command::new("elf2uf2-rs")
            .current_dir(&workspace_root)
            .args([&elf_path, &uf2_path]),
    ) {
        println!("{}", format!("UF2 created: {uf2_path} 🚀").green().bold());
        println!("{}", "Ready to drag-and-drop to your Pico!".bright_black());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        ExitCode::FAILURE
    }
}

fn firmware_features(trace: bool) -> String {
    if trace {
        format!("{FIRMWARE_FEATURES},display-trace")
    } else {
        FIRMWARE_FEATURES.to_string()
    }
}

fn workspace_root() -> std::path::PathBuf {
    std::env::current_dir().expect("Failed to get current directory")
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("host: "))
        .map(|host| host.trim().to_string())
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
