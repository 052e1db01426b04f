//! hostsguard 主程序入口
//!
//! 设计原则：
//! - 模块化：入口代码简洁，逻辑委托给 core
//! - 安静模式：日志默认只输出警告，--verbose 切换到 debug
//! - 错误处理：详细/安静错误模式，通过 --verbose 切换

use clap::Parser;
use hostsguard::cli::{Cli, Commands};
use hostsguard::config::Settings;
use hostsguard::core::counter::{group_thousands, read_declared_count};
use hostsguard::core::session::serialize;
use hostsguard::core::{
    DryRunInstaller, FileFetcher, Fetcher, Freshness, Grammar, InstallOutcome, Inspection,
    UpdateSession,
};
use hostsguard::utils::{date, digest, paths};
use hostsguard::{Config, OutputFormat, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = init_config(&cli);

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            e.report(config.verbose);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, &settings, &config) {
        e.report(config.verbose);
        std::process::exit(1);
    }
}

/// 初始化日志：RUST_LOG 优先
fn init_logging(verbose: bool) {
    let default_level = if verbose { "hostsguard=debug" } else { "hostsguard=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// 初始化运行选项
fn init_config(cli: &Cli) -> Config {
    let format = match &cli.command {
        Commands::Check { format, .. } => OutputFormat::from(format.as_str()),
        _ => OutputFormat::Text,
    };
    Config {
        verbose: cli.verbose,
        format,
    }
}

/// 运行具体命令
fn run_command(command: Commands, settings: &Settings, config: &Config) -> Result<()> {
    let grammar = Grammar::shared();
    let session = UpdateSession::new(grammar, settings);

    match command {
        Commands::Check { file, .. } => {
            let inspection = session.inspect(&FileFetcher::new(file))?;
            match config.format {
                OutputFormat::Text => {
                    println!("{}", inspection.date);
                    print_inspection(&inspection);
                }
                OutputFormat::Json => {
                    let mut value = serde_json::to_value(&inspection)?;
                    value["sha256"] = digest::sha256_hex(&serialize(&inspection.document)).into();
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
            }
        }

        Commands::Clean { file } => {
            let inspection = session.inspect(&FileFetcher::new(file))?;
            print!("{}", serialize(&inspection.document));
        }

        Commands::Plan { file, yes } => {
            let fetched = session.fetch(&FileFetcher::new(file))?;
            println!("{}", fetched.date);

            // 已是最新时不做统计和清理
            if let Freshness::Current { installed } = session.freshness(&fetched.date)? {
                println!("已安装版本 ({}) 已是最新。\nNothing to do.", installed.stamp());
                return Ok(());
            }

            let inspection = session.inspect_fetched(fetched)?;
            print_inspection(&inspection);

            let installer = DryRunInstaller::new(std::io::stdout());
            match session.install(inspection, yes, &installer)? {
                InstallOutcome::Skipped => println!("Nothing done."),
                InstallOutcome::Installed(_) => println!("Completed (dry run)."),
            }
        }

        Commands::Status => show_status(grammar, settings, config.verbose)?,
    }

    Ok(())
}

/// 打印检查结果 (日期行由调用方打印)
fn print_inspection(inspection: &Inspection) {
    match &inspection.declared.header {
        None => println!(
            "Number of unique domains: {} (calculated)",
            group_thousands(inspection.calculated_before)
        ),
        Some(header) => {
            let header = header.trim_start_matches("# ");
            if inspection.count_matches() {
                println!("{}", header);
            } else {
                println!(
                    "{} (calculated: {})",
                    header,
                    group_thousands(inspection.calculated_before)
                );
            }
        }
    }

    println!(
        "Number of lines: {}   size: {} bytes",
        group_thousands(inspection.lines),
        group_thousands(inspection.bytes)
    );

    print!("# Verify hosts file integrity: ");
    if inspection.flagged.is_empty() {
        println!("OK.");
        return;
    }

    let banner = ">".repeat(60);
    println!();
    println!("{banner}");
    println!(">>>>>>>>>>            Security Warning            >>>>>>>>>>");
    println!("{banner}");
    println!(">>> Problematic lines = {}", inspection.flagged.len());
    for record in &inspection.flagged {
        println!("{}", record);
    }
    println!("{banner}");

    println!("# Clean data:");
    for record in &inspection.repair.removed {
        println!("Removed line {}", record);
    }
    println!("Removed {} lines.", inspection.repair.removed_count());
    println!("Kept {} lines:", inspection.repair.kept.len());
    for record in &inspection.repair.kept {
        println!("Kept line {}", record);
    }
    println!("Total number of lines: {}", group_thousands(inspection.document.len()));
    if inspection.calculated_after != inspection.calculated_before {
        println!(
            "Number of unique domains: {}",
            group_thousands(inspection.calculated_after)
        );
    }
}

/// 显示当前配置和已安装版本
fn show_status(grammar: &Grammar, settings: &Settings, verbose: bool) -> Result<()> {
    match paths::default_config_file() {
        Ok(path) if paths::file_exists(&path) => println!("配置文件: {}", path.display()),
        Ok(path) => println!("配置文件: {} (不存在，使用默认配置)", path.display()),
        Err(_) => println!("配置文件: 无法确定"),
    }

    println!("快照目录: {}", paths::resolve(&settings.database_dir)?.display());
    println!("系统 hosts: {}", settings.system_hosts_path()?.display());

    let latest = settings.latest_path()?;
    if !paths::file_exists(&latest) {
        println!("latest: {} (不存在)", latest.display());
        return Ok(());
    }

    let fetcher = FileFetcher::new(&latest);
    let document = fetcher.fetch()?;
    println!("latest: {} [{} 行]", fetcher.describe(), group_thousands(document.len()));

    match date::parse_header_date(grammar, &document) {
        Ok(d) => println!("  {} ({})", d, d.stamp()),
        Err(e) if verbose => println!("  日期: {}", e),
        Err(_) => println!("  日期: 未知"),
    }

    let count = read_declared_count(grammar, &document);
    match count.header {
        Some(header) => println!("  {}", header.trim_start_matches("# ")),
        None => println!("  Number of unique domains: 未声明"),
    }

    Ok(())
}
