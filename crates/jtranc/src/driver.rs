//! The `jtranc` pipeline: load options and a JSON compilation unit, run
//! enum lowering, write the results.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use jtran_ast::{BodyDeclaration, CompilationUnit, NativePlacement, TypeDeclaration, TypeEnv};
use jtran_common::{InternalError, MemoryManagement, TranslateOptions};
use jtran_translate::native::emit_enum_support;
use jtran_translate::{lower_enums, LowerStats};

/// Name of the config file picked up from the working directory.
pub const CONFIG_FILE: &str = "jtran.toml";

/// Why a driver command failed.
#[derive(Debug)]
pub enum DriverError {
    /// Bad input, I/O or configuration.
    Failed(String),
    /// The pass hit a broken invariant.
    Internal(InternalError),
}

impl DriverError {
    pub fn exit_code(&self) -> i32 {
        match self {
            DriverError::Failed(_) => 1,
            DriverError::Internal(_) => 101,
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Failed(msg) => write!(f, "error: {}", msg),
            DriverError::Internal(err) => write!(f, "internal error[{}]: {}", err.code(), err),
        }
    }
}

impl From<String> for DriverError {
    fn from(msg: String) -> Self {
        DriverError::Failed(msg)
    }
}

impl From<InternalError> for DriverError {
    fn from(err: InternalError) -> Self {
        DriverError::Internal(err)
    }
}

/// Option overrides given on the command line.
#[derive(Debug, Default)]
pub struct OptionOverrides {
    pub config: Option<PathBuf>,
    pub swift_friendly: bool,
    pub memory: Option<String>,
}

/// Effective translate options.
///
/// An explicit `--config` must exist; otherwise `jtran.toml` in `cwd` is
/// used when present. Flags win over the file.
pub fn resolve_options(overrides: &OptionOverrides, cwd: &Path) -> Result<TranslateOptions, String> {
    let mut options = match &overrides.config {
        Some(path) => TranslateOptions::from_file(path)?,
        None => {
            let default_path = cwd.join(CONFIG_FILE);
            if default_path.is_file() {
                debug!(path = %default_path.display(), "using config from working directory");
                TranslateOptions::from_file(&default_path)?
            } else {
                TranslateOptions::default()
            }
        }
    };

    if overrides.swift_friendly {
        options.swift_friendly = true;
    }
    if let Some(value) = &overrides.memory {
        options.memory = MemoryManagement::parse(value)
            .ok_or_else(|| format!("Unknown memory management '{}' (expected rc or arc)", value))?;
    }
    if options.indent_width == 0 {
        return Err("indent-width must be at least 1".to_string());
    }
    Ok(options)
}

/// Arguments of `jtranc lower`.
#[derive(Debug)]
pub struct LowerArgs<'a> {
    pub input: &'a Path,
    pub output: Option<&'a Path>,
    pub emit_native: Option<&'a Path>,
    pub stats: Option<&'a Path>,
}

/// Lower the unit in `args.input`.
///
/// The rewritten unit goes to `args.output`, or stdout when absent. With
/// `emit_native`, the attached native blocks are also written as text;
/// with `stats`, the pass counts are written as JSON.
pub fn lower(args: &LowerArgs<'_>, options: &TranslateOptions) -> Result<LowerStats, DriverError> {
    let source = std::fs::read_to_string(args.input)
        .map_err(|e| format!("Failed to read '{}': {}", args.input.display(), e))?;
    let mut unit: CompilationUnit = serde_json::from_str(&source)
        .map_err(|e| format!("Invalid compilation unit '{}': {}", args.input.display(), e))?;
    if unit.source_path.is_none() {
        unit.source_path = Some(args.input.display().to_string());
    }

    let env = TypeEnv::new();
    let stats = lower_enums(&mut unit, &env, options)?;
    info!(
        input = %args.input.display(),
        enums = stats.enums,
        constructors = stats.constructors,
        forwarding_calls = stats.forwarding_calls,
        constants = stats.constants,
        "lowered enums"
    );

    let json = serde_json::to_string_pretty(&unit)
        .map_err(|e| format!("Failed to serialize compilation unit: {}", e))?;
    match args.output {
        Some(path) => write_file(path, &(json + "\n"))?,
        None => println!("{}", json),
    }

    if let Some(path) = args.emit_native {
        write_file(path, &render_native(&unit, &env))?;
    }

    if let Some(path) = args.stats {
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|e| format!("Failed to serialize pass statistics: {}", e))?;
        write_file(path, &(json + "\n"))?;
    }

    Ok(stats)
}

/// Native support text for a single enum, as `jtranc native` prints it.
pub fn native_text(type_name: &str, constant_count: usize, options: &TranslateOptions) -> String {
    let env = TypeEnv::new();
    let support = emit_enum_support(type_name, constant_count, &env, options);
    let mut out = String::new();
    for (label, text) in [
        ("header", &support.inner.header),
        ("header, file scope", &support.outer.header),
        ("implementation", &support.inner.implementation),
        ("implementation, file scope", &support.outer.implementation),
    ] {
        push_section(&mut out, &format!("{} ({})", type_name, label), text);
    }
    out
}

/// Every native block attached to lowered types, headers first.
pub fn render_native(unit: &CompilationUnit, env: &TypeEnv) -> String {
    let mut blocks = Vec::new();
    for decl in &unit.types {
        collect_native(decl, env, &mut blocks);
    }

    let mut out = String::new();
    for (name, block) in &blocks {
        push_section(&mut out, &format!("{} ({})", name, scope_label(block.placement, "header")), &block.header);
    }
    for (name, block) in &blocks {
        push_section(
            &mut out,
            &format!("{} ({})", name, scope_label(block.placement, "implementation")),
            &block.implementation,
        );
    }
    out
}

fn collect_native<'a>(
    decl: &'a TypeDeclaration,
    env: &TypeEnv,
    blocks: &mut Vec<(String, &'a jtran_ast::NativeDeclaration)>,
) {
    for body in decl.body_declarations() {
        match body {
            BodyDeclaration::Native(native) => blocks.push((env.full_name(decl.binding()), native)),
            BodyDeclaration::Type(member) => collect_native(member, env, blocks),
            BodyDeclaration::Method(_) | BodyDeclaration::Field(_) => {}
        }
    }
}

fn scope_label(placement: NativePlacement, kind: &str) -> String {
    match placement {
        NativePlacement::Inner => kind.to_string(),
        NativePlacement::Outer => format!("{}, file scope", kind),
    }
}

fn push_section(out: &mut String, title: &str, text: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("// {}\n", title));
    out.push_str(text);
}

fn write_file(path: &Path, content: &str) -> Result<(), String> {
    std::fs::write(path, content).map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}
