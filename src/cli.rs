//! Minimal CLI: GLSL → (declarations | descriptors | base types)
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::IndexMap;
use rayon::prelude::*;

use glsl_dts::logging::{init_logging, LoggingConfig};
use glsl_dts::{DescriptorJson, GenerateOptions, Generated, GlslParser, RawVariable, ShaderParser};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate compile-time-checked declarations for GLSL shader variables
#[derive(Parser, Debug)]
#[command(name = "glsl-dts", version)]
pub struct CommandLineInterface {
    /// more logging (-v info, -vv debug); RUST_LOG is used otherwise
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate declarations (one namespace per input)
    Dts(DtsOut),
    /// parse GLSL and print the extracted descriptor list as JSON
    Descriptors(DescriptorsOut),
    /// print the base type alias catalog
    Types,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// inputs are descriptor JSON lists rather than GLSL sources
    #[arg(long, default_value_t = false)]
    descriptors: bool,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct OptionFlags {
    /// JSON options file (generateParseResult, generateGLSLTypes, ...)
    #[arg(long)]
    config: Option<PathBuf>,

    /// leave out the `parseResult` constant
    #[arg(long)]
    no_parse_result: bool,

    /// leave out the base type aliases
    #[arg(long)]
    no_glsl_types: bool,

    #[arg(long)]
    inputs_interface: Option<String>,

    #[arg(long)]
    outputs_interface: Option<String>,

    /// name of the aggregate interface
    #[arg(long)]
    interface: Option<String>,

    /// fail when an interface ends up empty
    #[arg(long)]
    strict: bool,

    /// declare `export interface <name> {}` when inputs or outputs end up empty
    #[arg(long)]
    declare_empty_interfaces: bool,
}

#[derive(clap::Parser, Debug)]
struct DtsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    options: OptionFlags,

    /// namespace name (single input only; derived from the file name otherwise)
    #[arg(long)]
    namespace: Option<String>,

    /// combined output file (stdout if omitted)
    #[arg(short, long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// write one `<input file name>.ts` per input into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct DescriptorsOut {
    /// GLSL inputs; literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

struct Job {
    path: PathBuf,
    generated: Generated,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl OptionFlags {
    fn resolve(&self) -> Result<GenerateOptions> {
        let mut options = match self.config.as_ref() {
            Some(path) => {
                let src = std::fs::read(path)
                    .with_context(|| format!("failed to read options file {}", path.display()))?;
                GenerateOptions::from_json_slice(&src)
                    .with_context(|| format!("invalid options file {}", path.display()))?
            }
            None => GenerateOptions::default(),
        };
        if self.no_parse_result {
            options.generate_parse_result = false;
        }
        if self.no_glsl_types {
            options.generate_glsl_types = false;
        }
        if let Some(name) = &self.inputs_interface {
            options.inputs_interface_name = name.clone();
        }
        if let Some(name) = &self.outputs_interface {
            options.outputs_interface_name = name.clone();
        }
        if let Some(name) = &self.interface {
            options.interface_name = name.clone();
        }
        options.strict |= self.strict;
        options.declare_empty_interfaces |= self.declare_empty_interfaces;
        options.validate()?;
        Ok(options)
    }
}

impl DtsOut {
    fn run(&self) -> Result<()> {
        let options = self.options.resolve()?;
        let paths = resolve_file_path_patterns(&self.input_settings.input)?;
        if self.namespace.is_some() && paths.len() > 1 {
            bail!("--namespace needs exactly one input, got {}", paths.len());
        }

        let parser: &(dyn ShaderParser + Sync) = if self.input_settings.descriptors {
            &DescriptorJson
        } else {
            &GlslParser
        };
        // one combined text: the base type aliases may appear only once
        let combined = self.out_dir.is_none();

        let jobs = paths
            .par_iter()
            .enumerate()
            .map(|(index, path)| -> Result<Job> {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let namespace = match &self.namespace {
                    Some(ns) => ns.clone(),
                    None => namespace_from_path(path),
                };
                let mut options = options.clone();
                if combined && index > 0 {
                    options.generate_glsl_types = false;
                }
                let generated = glsl_dts::generate_with(parser, &source, &namespace, &options)
                    .with_context(|| format!("cannot generate declarations for {}", path.display()))?;
                Ok(Job { path: path.clone(), generated })
            })
            .collect::<Result<Vec<_>>>()?;

        for job in &jobs {
            for diag in &job.generated.diagnostics {
                eprintln!("{} {}: {diag}", "warning:".yellow().bold(), job.path.display());
            }
        }

        if let Some(dir) = self.out_dir.as_ref() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            for job in &jobs {
                let file_name = job
                    .path
                    .file_name()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "shader".to_owned());
                let target = dir.join(format!("{file_name}.ts"));
                std::fs::write(&target, &job.generated.text)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                log::info!("wrote {}", target.display());
            }
            return Ok(());
        }

        let text = jobs.iter().map(|job| job.generated.text.as_str()).collect::<Vec<_>>().join("\n");
        write_or_print(self.out.as_deref(), &text)
    }
}

impl DescriptorsOut {
    fn run(&self) -> Result<()> {
        let paths = resolve_file_path_patterns(&self.input)?;
        let parsed = paths
            .par_iter()
            .map(|path| -> Result<(String, Vec<RawVariable>)> {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let vars = GlslParser
                    .parse(&source)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                Ok((path.to_string_lossy().into_owned(), glsl_dts::raw::to_raw(&vars)))
            })
            .collect::<Result<Vec<_>>>()?;

        let json = if parsed.len() == 1 {
            serde_json::to_string_pretty(&parsed[0].1)?
        } else {
            let by_path = parsed.into_iter().collect::<IndexMap<_, _>>();
            serde_json::to_string_pretty(&by_path)?
        };
        write_or_print(self.out.as_deref(), &json)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        init_logging(LoggingConfig::from_verbosity(self.verbose));
        match &self.cmd {
            Command::Dts(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                target.run()
            }
            Command::Descriptors(target) => target.run(),
            Command::Types => {
                print!(
                    "// GLSL base types (catalog v{})\n{}",
                    glsl_dts::catalog::CATALOG_VERSION,
                    glsl_dts::catalog::render()
                );
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_or_print(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, text).with_context(|| format!("failed to write {}", out.display()))?;
            log::info!("wrote {}", out.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// `shaders/basic.frag` → `BasicFrag`
fn namespace_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut ns = file_name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(glsl_dts::decl::capitalize)
        .collect::<String>();
    if ns.is_empty() || ns.starts_with(|c: char| c.is_ascii_digit()) {
        ns.insert(0, '_');
    }
    ns
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched = glob::glob(pattern)
                .with_context(|| format!("invalid glob pattern: {pattern}"))?
                .collect::<Result<Vec<_>, _>>()?;
            if matched.is_empty() {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
            out.append(&mut matched);
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
