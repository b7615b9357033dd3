use clap::Parser;
use screen_graph::cli::commands::{
    cmd_extract, cmd_maps, cmd_names, cmd_screens, cmd_to_canonical, cmd_to_original,
    cmd_transitions,
};
use screen_graph::cli::config::{Cli, Commands, load_config, log_filter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref());

    // Resolve output format: CLI > config > default
    let format = cli.format.as_deref().unwrap_or(&config.output.format);

    let output = match cli.command {
        Commands::Screens { trace } => cmd_screens(&trace, format)?,
        Commands::Names {
            trace,
            unknown_label,
        } => {
            let label = unknown_label
                .as_deref()
                .unwrap_or(&config.output.unknown_screen_label);
            cmd_names(&trace, format, label)?
        }
        Commands::Transitions { trace, keep_weight } => {
            let strip_weight = config.transitions.strip_weight && !keep_weight;
            cmd_transitions(&trace, format, strip_weight)?
        }
        Commands::Extract { trace } => cmd_extract(&trace, format)?,
        Commands::Maps { trace, output } => cmd_maps(&trace, output.as_deref())?,
        Commands::ToOriginal { source, input } => cmd_to_original(&source, input.as_deref())?,
        Commands::ToCanonical { source, input } => cmd_to_canonical(&source, input.as_deref())?,
    };

    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
