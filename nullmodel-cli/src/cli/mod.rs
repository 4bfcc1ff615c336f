//! Command-line interface for configuration-model null-model analysis.
//!
//! `generate` draws one random multigraph for a degree sequence. `analyze`
//! z-scores a statistic of an observed graph, either the built-in karate club
//! or an edge list given on the command line, against its null model.

mod commands;

pub use commands::{
    AnalysisSummary, AnalyzeCommand, Cli, CliError, Command, CommandOutput, DeviationArg,
    EdgeArg, EdgesArgs, GenerateCommand, GeneratedGraph, GraphSource, OutputFormat,
    StatisticKind, render_output, run_cli,
};
