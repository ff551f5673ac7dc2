use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::planner::ColorPolicy;

/// Fuel Planner: stack sports-nutrition products against fluid, carb, and sodium targets.
#[derive(Parser, Debug)]
#[command(name = "fuel_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding drink-mixes.json, drinks.json, gels.json, caps.json.
    #[arg(short, long, global = true, default_value = "data")]
    pub data_dir: String,

    /// Optional JSON config file with default rates, ranges, and color policy.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Segment coloring (overrides the config file).
    #[arg(long, global = true, value_enum)]
    pub color_policy: Option<ColorPolicy>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactively pick products and watch the bars fill up.
    Plan,

    /// List catalog products.
    Catalog {
        /// Only show products matching this text.
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print bars for a fixed selection without prompting.
    Report(ReportArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan
    }
}

#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Carbohydrate target in g/h.
    #[arg(long, allow_hyphen_values = true)]
    pub carbs_per_hour: Option<String>,

    /// Sodium target in mg per liter of fluid.
    #[arg(long, allow_hyphen_values = true)]
    pub sodium_per_liter: Option<String>,

    /// Fluid target in ml/h.
    #[arg(long, allow_hyphen_values = true)]
    pub fluid_per_hour: Option<String>,

    /// Exercise duration in minutes.
    #[arg(long, allow_hyphen_values = true)]
    pub duration: Option<String>,

    /// Selected product as KEY=COUNT (repeatable). Keys are shown by `catalog`.
    #[arg(short = 's', long = "select")]
    pub selections: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}
