use botflow_graph::layout::Orientation;
use botflow_graph::source::load::read_json;
use botflow_graph::view::{self, PositionOverrides, Selection, ViewMode, ViewOptions};
use botflow_graph::{LayoutConfig, Result, SourceFiles, SourcePaths, build_graph_model};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "botflow-graph")]
#[command(about = "Conversation step and mini-app dependency graph builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph model and write it as JSON.
    Build {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render one graph with orientation, selection and manual positions applied.
    View {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum, default_value_t = GraphArg::Steps)]
        graph: GraphArg,

        /// Step whose mini-app tree to show. Defaults to the selected run's
        /// step, a selected step with a non-trivial tree, then the richest tree.
        #[arg(long)]
        step: Option<String>,

        #[arg(long, value_enum, default_value_t = Orientation::Horizontal)]
        orientation: Orientation,

        /// `<step>` or `<step>/<run>`.
        #[arg(long)]
        select: Option<Selection>,

        /// JSON object of node id -> {"x": .., "y": ..}.
        #[arg(long)]
        positions: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print step order, run counts and the most interesting mini-app tree.
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    #[arg(long)]
    conversation: PathBuf,

    #[arg(long)]
    step_logs: Option<PathBuf>,

    #[arg(long)]
    mini_apps: Option<PathBuf>,

    #[arg(long)]
    run_logs: Option<PathBuf>,

    /// Layout constants (JSON); unspecified fields keep their defaults.
    #[arg(long)]
    layout: Option<PathBuf>,
}

impl InputArgs {
    fn load(&self) -> Result<(SourceFiles, LayoutConfig)> {
        let files = SourceFiles::load(&SourcePaths {
            conversation: self.conversation.clone(),
            step_logs: self.step_logs.clone(),
            mini_apps: self.mini_apps.clone(),
            run_logs: self.run_logs.clone(),
        })?;
        let cfg = match &self.layout {
            Some(path) => LayoutConfig::load(path)?,
            None => LayoutConfig::default(),
        };
        Ok((files, cfg))
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Output file; stdout when omitted.
    #[arg(short = 'o', long)]
    out: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,
}

impl OutputArgs {
    fn write<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        match &self.out {
            Some(path) => {
                std::fs::write(path, json)?;
                println!("Wrote {}", path.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GraphArg {
    Steps,
    MiniApps,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Build { input, output } => {
            let (files, cfg) = input.load()?;
            let model = build_graph_model(&files, &cfg);
            output.write(&model)?;
        }
        Commands::View {
            input,
            graph,
            step,
            orientation,
            select,
            positions,
            output,
        } => {
            let (files, cfg) = input.load()?;
            let model = build_graph_model(&files, &cfg);

            let selection = select.unwrap_or_default();
            let mode = match graph {
                GraphArg::Steps => ViewMode::Steps,
                GraphArg::MiniApps => {
                    let step_id = step
                        .or_else(|| view::mini_app_step(&model, &selection).map(str::to_string))
                        .ok_or_else(|| anyhow::anyhow!("conversation has no steps"))?;
                    ViewMode::MiniApps { step_id }
                }
            };
            let overrides: PositionOverrides = match &positions {
                Some(path) => read_json(path)?,
                None => PositionOverrides::new(),
            };

            let opts = ViewOptions {
                orientation,
                selection,
                overrides,
                margin: cfg.margin,
            };
            output.write(&view::render_view(&model, &mode, &opts))?;
        }
        Commands::Summary { input } => {
            let (files, cfg) = input.load()?;
            let model = build_graph_model(&files, &cfg);

            println!("conversation {}", model.conversation_id);
            for step_id in &model.step_order {
                println!(
                    "  {step_id}: {} mini-apps, {} log events, tree score {:.1}",
                    model.runs(step_id).len(),
                    model.step_logs(step_id).len(),
                    view::tree_score(&model, step_id)
                );
            }
            if let Some(best) = view::best_tree_step(&model) {
                println!("richest mini-app tree: {best}");
            }
        }
    }

    Ok(())
}
