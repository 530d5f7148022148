//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use lighter::core::model::{Block, Issue};
use lighter::core::render::{HtmlMode, OutputFormat, RenderConfig, Renderer};
use lighter::core::util::Prepare;
use lighter::fuel::builtin::{self, STANDARD};
use lighter::fuel::{RuleSet, RuleSetConfig};
use lighter::layout::{self, AltLines, RenderMode, RenderOptions};
use lighter::tokenize::{tokenize_report, Strategy};

/// lighter - regex-driven syntax highlighting for source files.
#[derive(Parser, Debug)]
#[command(name = "lighter")]
#[command(
    author,
    version,
    about,
    long_about = r#"lighter tokenizes source text with a rule set (a "fuel") and lays the
tokens out as highlighted lines.

Output formats:
- jsonl: one JSON object per rendered line (default)
- json: a single JSON array of blocks
- html: markup with one span per token
- ansi: colored terminal output
- raw: the reconstructed source (useful for checking nothing was lost)

Examples:
    lighter render app.js
    lighter render page.php --fuel php:dark --format html --html-mode table
    lighter render - --fuel js --format ansi --line-numbers < app.js
    lighter tokens app.js --strategy greedy
    lighter check my-language.json
"#
)]
pub struct Cli {
    /// Output format (jsonl/json/html/ansi/raw).
    #[arg(
        long,
        global = true,
        env = "LIGHTER_FORMAT",
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- html\n\
- ansi\n\
- raw"
    )]
    pub format: String,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. Only the ansi format is affected; the text\n\
is printed without escape sequences."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr. RUST_LOG overrides the level\n\
when set."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Highlight files and render them in the selected format.
    #[command(
        long_about = "Tokenize each FILE with its fuel and render the result.\n\n\
Without --fuel the fuel is picked from the file extension, falling back to\n\
the standard fuel. Use - to read from stdin.\n\n\
Examples:\n\
  lighter render src/app.js --line-numbers\n\
  lighter render a.css b.css --format html --html-mode ol --alt-lines even\n"
    )]
    Render {
        /// Files to render (- for stdin).
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        #[command(flatten)]
        fuel: FuelArgs,

        /// Layout mode (lines/inline).
        #[arg(long, default_value = "lines", value_name = "MODE")]
        mode: String,

        /// Number the rendered lines.
        #[arg(long)]
        line_numbers: bool,

        /// Mark alternate lines (odd/even/hover/every:N).
        #[arg(long, value_name = "SEL")]
        alt_lines: Option<String>,

        /// Replace tabs with N spaces before tokenizing.
        #[arg(long, value_name = "N")]
        indent: Option<usize>,

        /// Strip leading and trailing blank lines.
        #[arg(long)]
        chop: bool,

        /// Decode &lt; &gt; &amp; before tokenizing.
        #[arg(long)]
        unescape_html: bool,

        /// HTML container (inline/pre/ol/div/table).
        #[arg(long, default_value = "pre", value_name = "HTML_MODE")]
        html_mode: String,
    },

    /// Print the token list for a file.
    Tokens {
        /// File to tokenize (- for stdin).
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        fuel: FuelArgs,
    },

    /// List the built-in fuels.
    Fuels,

    /// Compile a JSON language definition and report malformed rules.
    #[command(
        long_about = "Compile a JSON language definition and report every rule whose\n\
pattern does not compile. Exits non-zero when any rule is malformed or the\n\
definition is structurally invalid.\n"
    )]
    Check {
        /// Definition file.
        #[arg(value_name = "DEF")]
        definition: PathBuf,
    },
}

/// Fuel and strategy selection shared by the tokenizing commands
#[derive(clap::Args, Debug, Clone)]
pub struct FuelArgs {
    /// Built-in fuel name, fuel:flame class, or a JSON definition path.
    #[arg(long, env = "LIGHTER_FUEL", value_name = "FUEL")]
    pub fuel: Option<String>,

    /// Scanning strategy (sequential/greedy).
    #[arg(long, default_value = "sequential", value_name = "STRATEGY")]
    pub strategy: String,
}

/// Everything needed to highlight one input
struct Job {
    fuel: Option<String>,
    strategy: Strategy,
    prepare: Prepare,
    options: RenderOptions,
}

/// Summary line for `fuels`
#[derive(Serialize)]
struct FuelInfo {
    name: String,
    rules: usize,
    strict: bool,
}

/// Result of `check`
#[derive(Serialize)]
struct CheckReport {
    path: String,
    fuel: String,
    rules: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<Issue>,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().unwrap_or_else(|e: String| {
        warn!("{}, using jsonl", e);
        OutputFormat::default()
    });
    if cli.no_color {
        colored::control::set_override(false);
    }
    let render_config = RenderConfig::with_pretty(format, cli.pretty).with_color(!cli.no_color);

    match cli.command {
        Commands::Render {
            files,
            fuel,
            mode,
            line_numbers,
            alt_lines,
            indent,
            chop,
            unescape_html,
            html_mode,
        } => {
            let mode: RenderMode = mode.parse().map_err(anyhow::Error::msg)?;
            let alt_lines = alt_lines
                .map(|s| s.parse::<AltLines>())
                .transpose()
                .map_err(anyhow::Error::msg)?;
            let html_mode: HtmlMode = html_mode.parse().map_err(anyhow::Error::msg)?;
            let job = Job {
                fuel: fuel.fuel,
                strategy: parse_strategy(&fuel.strategy)?,
                prepare: Prepare {
                    chop,
                    unescape_html,
                    indent,
                },
                options: RenderOptions::new(mode)
                    .with_line_numbers(line_numbers)
                    .with_alt_lines(alt_lines),
            };
            run_render(&files, &job, render_config.with_html_mode(html_mode))
        }

        Commands::Tokens { file, fuel } => {
            let strategy = parse_strategy(&fuel.strategy)?;
            run_tokens(&file, fuel.fuel.as_deref(), strategy, render_config)
        }

        Commands::Fuels => run_fuels(render_config),

        Commands::Check { definition } => run_check(&definition, render_config),
    }
}

fn parse_strategy(s: &str) -> Result<Strategy> {
    s.parse().map_err(anyhow::Error::msg)
}

/// Render every file, in parallel when the feature is enabled
fn run_render(files: &[PathBuf], job: &Job, config: RenderConfig) -> Result<()> {
    #[cfg(feature = "parallel")]
    let blocks: Vec<Block> = {
        use rayon::prelude::*;
        files
            .par_iter()
            .map(|path| highlight(path, job))
            .collect::<Result<_>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let blocks: Vec<Block> = files
        .iter()
        .map(|path| highlight(path, job))
        .collect::<Result<_>>()?;

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&blocks));

    Ok(())
}

/// Read, tokenize and lay out one input
fn highlight(path: &Path, job: &Job) -> Result<Block> {
    let source = job.prepare.apply(&read_source(path)?);
    let (rule_set, flame) = resolve_fuel(job.fuel.as_deref(), path)?;

    let report = tokenize_report(&source, &rule_set, job.strategy);
    let rendered = layout::render(&source, &report.tokens, &rule_set.aliases(), &job.options);

    let issues: Vec<Issue> = rule_set
        .diagnostics()
        .iter()
        .chain(report.issues.iter())
        .map(Issue::from)
        .collect();
    debug!(path = %path.display(), fuel = rule_set.name(), issues = issues.len(), "highlighted");

    Ok(Block::new(rule_set.name(), rendered)
        .with_path(path.display().to_string())
        .with_flame(flame)
        .with_issues(issues))
}

fn run_tokens(path: &Path, fuel: Option<&str>, strategy: Strategy, config: RenderConfig) -> Result<()> {
    let source = read_source(path)?;
    let (rule_set, _) = resolve_fuel(fuel, path)?;

    let report = tokenize_report(&source, &rule_set, strategy);
    for issue in rule_set.diagnostics().iter().chain(report.issues.iter()) {
        warn!(code = issue.code(), "{}", issue);
    }

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render_tokens(&report.tokens));

    Ok(())
}

fn run_fuels(config: RenderConfig) -> Result<()> {
    let fuels = builtin::available_fuels()
        .iter()
        .map(|name| -> Result<FuelInfo> {
            let rule_set = builtin::fuel(name)?;
            Ok(FuelInfo {
                name: rule_set.name().to_string(),
                rules: rule_set.len(),
                strict: rule_set.is_strict(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render_records(&fuels, |f| format!("{}\t{} rules", f.name, f.rules)));

    Ok(())
}

fn run_check(path: &Path, config: RenderConfig) -> Result<()> {
    let definition = RuleSetConfig::from_file(path)
        .with_context(|| format!("Failed to load definition: {}", path.display()))?;
    definition.validate()?;

    let rule_set = definition.build();
    let report = CheckReport {
        path: path.display().to_string(),
        fuel: rule_set.name().to_string(),
        rules: rule_set.len(),
        issues: rule_set.diagnostics().iter().map(Issue::from).collect(),
    };

    let renderer = Renderer::with_config(config);
    println!(
        "{}",
        renderer.render_records(std::slice::from_ref(&report), |r| {
            let mut out = format!("{}: {} rules", r.fuel, r.rules);
            for issue in &r.issues {
                out.push_str(&format!("\n  {}: {}", issue.code, issue.message));
            }
            out
        })
    );

    if !report.issues.is_empty() {
        bail!("{} malformed rule(s) in {}", report.issues.len(), path.display());
    }
    Ok(())
}

/// Read a file, or stdin for `-`
fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Pick the rule set and flame for an input.
///
/// `spec` may be a built-in name, a `fuel:flame` class or a JSON definition
/// path. Built-in names win; a value only counts as a path when it ends in
/// `.json` or contains a path separator. Without `spec` the file extension
/// decides.
fn resolve_fuel(spec: Option<&str>, path: &Path) -> Result<(RuleSet, String)> {
    let Some(spec) = spec else {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let rule_set = builtin::fuel(ext).unwrap_or_else(|_| RuleSet::builder(STANDARD).build());
        return Ok((rule_set, STANDARD.to_string()));
    };

    let (fuel, flame) = builtin::parse_class(spec);
    if let Ok(rule_set) = builtin::fuel(&fuel) {
        return Ok((rule_set, flame));
    }

    if is_definition_path(spec) {
        let definition = RuleSetConfig::from_file(Path::new(spec))
            .with_context(|| format!("Failed to load definition: {}", spec))?;
        definition.validate()?;
        return Ok((definition.build(), STANDARD.to_string()));
    }

    Ok((builtin::fuel_or_standard(&fuel), flame))
}

fn is_definition_path(spec: &str) -> bool {
    spec.ends_with(".json") || spec.contains('/') || spec.contains(std::path::MAIN_SEPARATOR)
}
