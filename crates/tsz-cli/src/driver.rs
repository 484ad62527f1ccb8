//! Input discovery and per-file analysis.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span, warn};
use walkdir::WalkDir;

use crate::args::CliArgs;
use tsz_class_fields::{ClassInfo, ClassTransformOptions, NameManager, SkipRewriter, get_class_info};
use tsz_common::{Diagnostic, LineMap};
use tsz_scanner::{SyntaxKind, Token, TokenStream, scan};

const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

/// The analysis of one class.
#[derive(Clone, Debug, Serialize)]
pub struct ClassReport {
    pub file: String,
    /// One-based line of the `class` token
    pub line: u32,
    /// One-based column of the `class` token
    pub column: u32,
    /// Source text of each entry in `info.fields`
    pub field_sources: Vec<String>,
    pub info: ClassInfo,
}

/// Everything one run produced.
#[derive(Debug, Default)]
pub struct CompilationResult {
    pub files: Vec<PathBuf>,
    pub classes: Vec<ClassReport>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Analyse every input named by `args`.
pub fn run(args: &CliArgs) -> Result<CompilationResult> {
    let options = resolve_options(args)?;
    let files = collect_input_files(&args.paths)?;
    if files.is_empty() {
        bail!("no TypeScript files found in the given paths");
    }

    let mut result = CompilationResult::default();
    for path in &files {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file = path.to_string_lossy().into_owned();
        let (classes, diagnostics) = analyse_source(&file, &source, &options)?;
        result.classes.extend(classes);
        result.diagnostics.extend(diagnostics);
    }
    result.files = files;
    Ok(result)
}

/// Options from `--config`, overridden by command-line flags.
pub fn resolve_options(args: &CliArgs) -> Result<ClassTransformOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid options in {}", path.display()))?
        }
        None => ClassTransformOptions::default(),
    };
    if args.disable_es_transforms {
        options.disable_es_transforms = true;
    }
    Ok(options)
}

/// Expand directories into the TypeScript sources below them, in a stable
/// order. Files named explicitly are kept whatever their extension.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            if !path.exists() {
                bail!("file not found: {}", path.display());
            }
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
            if entry.file_type().is_file() && is_source_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

fn is_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    if name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts") {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Analyse every class in `source`.
///
/// Problems in the program come back as diagnostics; a failed internal
/// invariant is an error.
pub fn analyse_source(
    file: &str,
    source: &str,
    options: &ClassTransformOptions,
) -> Result<(Vec<ClassReport>, Vec<Diagnostic>)> {
    let _span = info_span!("analyse_source", file).entered();

    let tokens = match scan(source) {
        Ok(tokens) => tokens,
        Err(err) => {
            warn!(%err, "scan failed");
            return Ok((Vec::new(), vec![err.to_diagnostic(file)]));
        }
    };

    let line_map = LineMap::build(source);
    let mut names = NameManager::from_tokens(source, &tokens);
    let mut stream = TokenStream::new(source, &tokens);
    let mut classes = Vec::new();
    let mut diagnostics = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        if token.kind != SyntaxKind::ClassKeyword || token.is_expression.is_none() {
            continue;
        }
        stream.set_index(index);
        match get_class_info(&mut stream, &mut SkipRewriter, &mut names, options) {
            Ok(info) => {
                let position = line_map.offset_to_position(token.start);
                debug!(index, fields = info.fields.len(), "class");
                classes.push(ClassReport {
                    file: file.to_string(),
                    line: position.line + 1,
                    column: position.character + 1,
                    field_sources: info
                        .fields
                        .iter()
                        .map(|field| range_source(source, &tokens, field.start, field.end))
                        .collect(),
                    info,
                });
            }
            Err(err) => match err.to_diagnostic(file, &tokens) {
                Some(diagnostic) => diagnostics.push(diagnostic),
                None => {
                    return Err(err).with_context(|| {
                        format!("internal error analysing class at token {index} of {file}")
                    });
                }
            },
        }
    }
    Ok((classes, diagnostics))
}

fn range_source(source: &str, tokens: &[Token], start: usize, end: usize) -> String {
    if start >= end {
        return String::new();
    }
    let from = tokens[start].start as usize;
    let to = tokens[end - 1].end as usize;
    source.get(from..to).unwrap_or_default().to_string()
}
