use clap::{Parser, Subcommand};
use project_analyzer::{Analyzer, Config};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "project-analyzer")]
#[command(about = "Walks a project directory and writes an LLM-generated markdown analysis report")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a project directory and write a markdown report
    Analyze {
        /// Target directory to analyze
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for the report
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the config file (defaults to ~/.project-analyzer.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            config,
            output,
        } => {
            analyze_project(path, config, output).await?;
        }
        Commands::Config { output } => {
            generate_config(output)?;
        }
    }

    Ok(())
}

async fn analyze_project(
    target_path: PathBuf,
    config_path: Option<PathBuf>,
    output_path: PathBuf,
) -> anyhow::Result<()> {
    println!("🚀 Project Analyzer");
    println!("===================");

    let start_time = Instant::now();

    let mut config = if let Some(config_path) = config_path {
        Config::from_file(&config_path)?
    } else {
        Config::load()?
    };

    config.target_directory = target_path.clone();
    config.output_directory = output_path;
    config.resolve_env_credential();

    println!("🎯 Target directory: {}", target_path.display());

    let analyzer = Analyzer::new(config)?;
    let summary = analyzer.run().await?;

    summary.print_summary();
    println!(
        "\n✅ Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn generate_config(output_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path = output_path
        .or_else(Config::default_config_path)
        .unwrap_or_else(|| PathBuf::from("project-analyzer.toml"));

    println!("📝 Generating configuration file: {}", config_path.display());

    std::fs::write(&config_path, Config::create_documented_config())?;

    println!("✅ Configuration file created successfully!");
    println!("💡 Edit the file to customize collection and model settings.");
    println!();
    println!("🔧 Key configuration areas:");
    println!("  • OpenRouter model and API key (or use OPENROUTER_API_KEY)");
    println!("  • Ignore patterns and file extensions to collect");
    println!("  • Retry and prompt-size limits");

    Ok(())
}
