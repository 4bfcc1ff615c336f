//! Command implementations and argument parsing for the nullmodel CLI.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use nullmodel_core::{
    DEFAULT_SEED, DEFAULT_TRIALS, DegreeSequence, DegreeSequenceError, Deviation, GraphError,
    MultiGraph, NullModelBuilder, NullModelError, NullModelReport, Statistic, Transitivity,
    TriangleCount, UndefinedPolicy, datasets::karate_club, generate,
};
use rand::{SeedableRng, rngs::SmallRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "nullmodel",
    about = "Compare graph statistics against configuration-model null graphs."
)]
pub struct Cli {
    /// Output format for command results.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Draw one random multigraph realising a degree sequence.
    Generate(GenerateCommand),
    /// Z-score a statistic of an observed graph against its null model.
    Analyze(AnalyzeCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Comma-separated target degree of every node.
    #[arg(
        long,
        required = true,
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub degrees: Vec<i64>,

    /// Seed for the stub shuffle.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Options accepted by the `analyze` command.
#[derive(Debug, Args, Clone)]
pub struct AnalyzeCommand {
    /// Number of null graphs to draw.
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: usize,

    /// Master seed for the trial random sources.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Statistic compared against the null model.
    #[arg(long, value_enum, default_value_t = StatisticKind::Transitivity)]
    pub statistic: StatisticKind,

    /// Standard-deviation divisor used for the z-score.
    #[arg(long, value_enum, default_value_t = DeviationArg::Population)]
    pub deviation: DeviationArg,

    /// Drop null graphs on which the statistic is undefined instead of
    /// failing.
    #[arg(long)]
    pub skip_undefined: bool,

    /// Observed graph.
    #[command(subcommand)]
    pub source: GraphSource,
}

/// Observed graphs accepted by `analyze`.
#[derive(Debug, Subcommand, Clone)]
pub enum GraphSource {
    /// Zachary's karate club (34 nodes, 78 edges).
    Karate,
    /// An edge list given as repeated `--edge U-V` arguments.
    Edges(EdgesArgs),
}

/// Inline edge-list arguments.
#[derive(Debug, Args, Clone)]
pub struct EdgesArgs {
    /// Undirected edge between two zero-based node indices, as `U-V`.
    #[arg(long = "edge", required = true)]
    pub edges: Vec<EdgeArg>,

    /// Node count, for graphs with isolated trailing nodes. Defaults to one
    /// more than the largest endpoint.
    #[arg(long)]
    pub nodes: Option<usize>,
}

/// One `U-V` edge argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeArg {
    /// First endpoint.
    pub left: usize,
    /// Second endpoint.
    pub right: usize,
}

impl FromStr for EdgeArg {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (left, right) = raw
            .split_once('-')
            .ok_or_else(|| format!("expected `U-V`, got `{raw}`"))?;
        let endpoint = |value: &str| {
            value
                .trim()
                .parse::<usize>()
                .map_err(|err| format!("invalid endpoint `{value}` in `{raw}`: {err}"))
        };
        Ok(Self {
            left: endpoint(left)?,
            right: endpoint(right)?,
        })
    }
}

impl fmt::Display for EdgeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.left, self.right)
    }
}

/// Built-in statistics selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatisticKind {
    /// Global clustering coefficient.
    Transitivity,
    /// Number of triangles.
    Triangles,
}

impl StatisticKind {
    fn statistic(self) -> &'static dyn Statistic {
        match self {
            Self::Transitivity => &Transitivity,
            Self::Triangles => &TriangleCount,
        }
    }
}

/// Standard-deviation divisor selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeviationArg {
    /// Divide by `n`.
    Population,
    /// Divide by `n - 1`.
    Sample,
}

impl From<DeviationArg> for Deviation {
    fn from(value: DeviationArg) -> Self {
        match value {
            DeviationArg::Population => Self::Population,
            DeviationArg::Sample => Self::Sample,
        }
    }
}

/// Rendering of command results on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for terminals.
    Human,
    /// A single JSON document.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The degree sequence could not be realised.
    #[error(transparent)]
    DegreeSequence(#[from] DegreeSequenceError),
    /// The observed edge list was malformed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The null-model run failed.
    #[error(transparent)]
    Core(#[from] NullModelError),
    /// An edge endpoint leaves no room for a node count.
    #[error("edge endpoint {node} is too large to infer a node count")]
    NodeCountOverflow {
        /// The offending endpoint.
        node: usize,
    },
}

/// Graph drawn by `generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedGraph {
    /// Seed used for the stub shuffle.
    pub seed: u64,
    /// Degree sequence the graph realises.
    pub degrees: DegreeSequence,
    /// The generated multigraph.
    pub graph: MultiGraph,
}

/// Result of `analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    /// Label of the observed graph.
    pub source: String,
    /// Null-model comparison.
    #[serde(flatten)]
    pub report: NullModelReport,
}

/// Output of any CLI command.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// Output of `generate`.
    Generated(GeneratedGraph),
    /// Output of `analyze`.
    Analyzed(AnalysisSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the input is invalid or the analysis fails.
///
/// # Examples
/// ```
/// use nullmodel_cli::cli::{Cli, Command, CommandOutput, GenerateCommand, OutputFormat, run_cli};
///
/// let cli = Cli {
///     format: OutputFormat::Human,
///     command: Command::Generate(GenerateCommand {
///         degrees: vec![2, 2, 2],
///         seed: 7,
///     }),
/// };
/// let CommandOutput::Generated(generated) = run_cli(cli)? else {
///     unreachable!("generate yields a graph");
/// };
/// assert_eq!(generated.graph.edge_count(), 3);
/// # Ok::<(), nullmodel_cli::cli::CliError>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<CommandOutput, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(command) => {
            span.record("command", field::display("generate"));
            run_generate(command).map(CommandOutput::Generated)
        }
        Command::Analyze(command) => {
            span.record("command", field::display("analyze"));
            run_analyze(command).map(CommandOutput::Analyzed)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(nodes = command.degrees.len(), seed = command.seed),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<GeneratedGraph, CliError> {
    let degrees = DegreeSequence::try_from_signed(&command.degrees)?;
    let mut rng = SmallRng::seed_from_u64(command.seed);
    let graph = generate(&degrees, &mut rng);
    info!(
        edges = graph.edge_count(),
        self_loops = graph.self_loop_count(),
        "graph generated"
    );
    Ok(GeneratedGraph {
        seed: command.seed,
        degrees,
        graph,
    })
}

#[instrument(
    name = "cli.analyze",
    err,
    skip(command),
    fields(
        source = field::Empty,
        statistic = ?command.statistic,
        trials = command.trials,
        seed = command.seed,
    ),
)]
pub(super) fn run_analyze(command: AnalyzeCommand) -> Result<AnalysisSummary, CliError> {
    let policy = if command.skip_undefined {
        UndefinedPolicy::Skip
    } else {
        UndefinedPolicy::Fail
    };
    let model = NullModelBuilder::new()
        .with_trials(command.trials)
        .with_seed(command.seed)
        .with_deviation(command.deviation.into())
        .with_undefined_policy(policy)
        .build()?;

    let (source, observed) = load_graph(command.source)?;
    Span::current().record("source", field::display(&source));

    let report = model.run(&observed, command.statistic.statistic())?;
    info!(
        source = source.as_str(),
        z_score = report.z_score,
        "command completed"
    );
    Ok(AnalysisSummary { source, report })
}

pub(super) fn load_graph(source: GraphSource) -> Result<(String, MultiGraph), CliError> {
    match source {
        GraphSource::Karate => Ok(("karate".to_owned(), karate_club())),
        GraphSource::Edges(args) => {
            let node_count = match args.nodes {
                Some(nodes) => nodes,
                None => infer_node_count(&args.edges)?,
            };
            let graph = MultiGraph::from_edges(
                node_count,
                args.edges.iter().map(|edge| (edge.left, edge.right)),
            )?;
            Ok(("edges".to_owned(), graph))
        }
    }
}

fn infer_node_count(edges: &[EdgeArg]) -> Result<usize, CliError> {
    edges.iter().try_fold(0, |count: usize, edge| {
        let node = edge.left.max(edge.right);
        let needed = node
            .checked_add(1)
            .ok_or(CliError::NodeCountOverflow { node })?;
        Ok(count.max(needed))
    })
}

/// Writes `output` to `writer` in the requested format.
///
/// # Errors
/// Returns [`io::Error`] if writing or JSON encoding fails.
///
/// # Examples
/// ```
/// use nullmodel_cli::cli::{Cli, Command, GenerateCommand, OutputFormat, render_output, run_cli};
///
/// let cli = Cli {
///     format: OutputFormat::Human,
///     command: Command::Generate(GenerateCommand { degrees: vec![1, 1], seed: 0 }),
/// };
/// let output = run_cli(cli)?;
/// let mut buffer = Vec::new();
/// render_output(&output, OutputFormat::Human, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.ends_with("0\t1\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_output(
    output: &CommandOutput,
    format: OutputFormat,
    mut writer: impl Write,
) -> io::Result<()> {
    match (output, format) {
        (CommandOutput::Generated(generated), OutputFormat::Human) => {
            render_generated(generated, writer)
        }
        (CommandOutput::Analyzed(summary), OutputFormat::Human) => render_analysis(summary, writer),
        (CommandOutput::Generated(generated), OutputFormat::Json) => {
            serde_json::to_writer_pretty(&mut writer, generated)?;
            writeln!(writer)
        }
        (CommandOutput::Analyzed(summary), OutputFormat::Json) => {
            serde_json::to_writer_pretty(&mut writer, summary)?;
            writeln!(writer)
        }
    }
}

fn render_generated(generated: &GeneratedGraph, mut writer: impl Write) -> io::Result<()> {
    let graph = &generated.graph;
    writeln!(writer, "seed: {}", generated.seed)?;
    writeln!(writer, "nodes: {}", graph.node_count())?;
    writeln!(writer, "edges: {}", graph.edge_count())?;
    writeln!(writer, "self-loops: {}", graph.self_loop_count())?;
    for edge in graph.edges() {
        writeln!(writer, "{}\t{}", edge.source(), edge.target())?;
    }
    Ok(())
}

fn render_analysis(summary: &AnalysisSummary, mut writer: impl Write) -> io::Result<()> {
    let report = &summary.report;
    let deviation = match report.deviation {
        Deviation::Population => "population",
        Deviation::Sample => "sample",
    };
    writeln!(writer, "source: {}", summary.source)?;
    writeln!(writer, "statistic: {}", report.statistic)?;
    writeln!(writer, "observed: {:.6}", report.observed)?;
    writeln!(writer, "null mean: {:.6}", report.mean)?;
    writeln!(writer, "null std dev ({deviation}): {:.6}", report.std_dev)?;
    writeln!(writer, "z-score: {:.4}", report.z_score)?;
    writeln!(
        writer,
        "trials: {} completed, {} skipped",
        report.completed_trials, report.skipped_trials
    )?;
    writeln!(
        writer,
        "sanitised: {} self-loops removed, {} parallel edges collapsed",
        report.self_loops_removed, report.parallel_edges_collapsed
    )?;
    Ok(())
}
