//! kubescribe - run kubectl operations and see exactly which commands ran
//!
//! Every subcommand maps to one operation of the command service. `serve`
//! exposes the same operations as a JSON-lines RPC surface for front-ends.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kubescribe::cli::{self, ConfigSubcommand, render};
use kubescribe::config::ConfigLoader;
use kubescribe::{CommandResult, KubectlService};
use std::sync::Arc;

/// kubescribe - a kubectl front-end that shows its work
#[derive(Parser, Debug)]
#[command(name = "kubescribe")]
#[command(about = "Run common kubectl operations and show the commands behind them", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Print the result envelope as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Print the command transcript after the result
    #[arg(long, global = true)]
    learn: bool,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// List kubeconfig contexts
    Contexts,
    /// Show the current context
    CurrentContext,
    /// Switch the current context
    UseContext {
        /// Context name
        name: String,
    },
    /// List namespaces
    Namespaces {
        /// Context to query instead of the current one
        #[arg(long, default_value = "")]
        context: String,
    },
    /// List pods in a namespace
    Pods {
        #[arg(long, short = 'n')]
        namespace: String,
        #[arg(long, default_value = "")]
        context: String,
    },
    /// Delete a pod
    DeletePod {
        pod: String,
        #[arg(long, short = 'n')]
        namespace: String,
        #[arg(long, default_value = "")]
        context: String,
    },
    /// Show recent pod logs
    Logs {
        pod: String,
        #[arg(long, short = 'n')]
        namespace: String,
        #[arg(long, default_value = "")]
        context: String,
        /// Number of lines (0 uses the configured default)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        tail: i64,
    },
    /// Describe a pod
    Describe {
        pod: String,
        #[arg(long, short = 'n')]
        namespace: String,
        #[arg(long, default_value = "")]
        context: String,
    },
    /// Serve JSON-lines requests on stdin, responses on stdout
    Serve,
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config and version work without kubectl or a valid configuration
    let command = match args.command {
        Command::Config { subcommand } => return cli::handle_config_command(subcommand),
        Command::Version => {
            cli::display_version();
            return Ok(());
        }
        other => other,
    };

    if let Some(log_path) = cli::init_logging(args.debug)? {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let config = ConfigLoader::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration, using defaults: {:#}", e);
        ConfigLoader::load_defaults()
    });
    ConfigLoader::validate(&config).context("Invalid configuration")?;
    tracing::debug!("Configuration loaded: kubectl={}", config.kubectl);

    let service = Arc::new(KubectlService::from_config(&config));

    let result = match command {
        Command::Contexts => service.list_contexts().await,
        Command::CurrentContext => service.current_context().await,
        Command::UseContext { name } => service.set_context(&name).await,
        Command::Namespaces { context } => service.list_namespaces(&context).await,
        Command::Pods { namespace, context } => service.list_pods(&context, &namespace).await,
        Command::DeletePod {
            pod,
            namespace,
            context,
        } => service.delete_pod(&context, &namespace, &pod).await,
        Command::Logs {
            pod,
            namespace,
            context,
            tail,
        } => service.pod_logs(&context, &namespace, &pod, tail).await,
        Command::Describe {
            pod,
            namespace,
            context,
        } => service.describe_pod(&context, &namespace, &pod).await,
        Command::Serve => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            kubescribe::rpc::serve(Arc::clone(&service), stdin, tokio::io::stdout()).await?;
            return Ok(());
        }
        Command::Config { .. } | Command::Version => unreachable!("handled before startup"),
    };

    print_result(&result, args.json)?;

    if args.learn {
        eprintln!("\n{}", render::transcript_lines(&service.transcript()));
    }

    if !result.success() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_result(result: &CommandResult, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
        println!("{}", out);
        return Ok(());
    }

    let rendered = render::render_result(result);
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    if !result.stderr.is_empty() {
        eprintln!("{}", result.stderr.trim_end());
    }
    Ok(())
}
