//! Check command implementation.

use anyhow::{bail, Context, Result};
use clap::Args;
use gaplint_core::{Analyzer, ConfigLayer, LayeredConfig, PartialConfig, TRANSCRIPT_EXTENSIONS};
use gaplint_rules::builtin_registry;
use std::path::{Path, PathBuf};

use crate::config_resolver;
use crate::OutputFormat;

/// Extensions of GAP source files.
const SOURCE_EXTENSIONS: &[&str] = &["g", "gi", "gd"];

/// Options of `gaplint check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Files or directories to check (default: current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Maximum line width
    #[arg(long)]
    pub columns: Option<usize>,

    /// Indentation unit in spaces
    #[arg(long)]
    pub indentation: Option<usize>,

    /// Stop after this many warnings
    #[arg(long)]
    pub max_warnings: Option<usize>,

    /// Rules to disable, by code or name (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub disable: Vec<String>,

    /// Exclude glob patterns (can be specified multiple times)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Print nothing, report through the exit status only
    #[arg(short, long)]
    pub silent: bool,
}

impl CheckArgs {
    /// The command-line configuration layer.
    fn layer(&self) -> PartialConfig {
        PartialConfig {
            columns: self.columns,
            indentation: self.indentation,
            max_warnings: self.max_warnings,
            disable: (!self.disable.is_empty()).then(|| self.disable.clone()),
        }
    }
}

/// Runs the check command. Returns whether the run was clean.
pub fn run(args: &CheckArgs, explicit_config: Option<&Path>) -> Result<bool> {
    let source = config_resolver::resolve(Path::new("."), explicit_config);
    let file_layer = source.load()?;

    let registry = builtin_registry();
    let config = LayeredConfig::new()
        .layer(ConfigLayer::File, file_layer)
        .layer(ConfigLayer::CommandLine, args.layer())
        .resolve(&registry);

    let excludes = compile_excludes(&args.exclude)?;
    let files = discover_files(&args.paths, &excludes)?;

    let analyzer = Analyzer::builder()
        .registry(registry)
        .config(config)
        .build();

    tracing::info!(
        "Checking {} file(s) with {} rule(s)",
        files.len(),
        analyzer.registry().len()
    );

    let result = analyzer.analyze(&files);

    if !args.silent {
        super::output::print(&result, args.format)?;
    }

    Ok(result.is_clean())
}

fn compile_excludes(patterns: &[String]) -> Result<Vec<glob::Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            glob::Pattern::new(pattern)
                .with_context(|| format!("Invalid exclude pattern: {pattern}"))
        })
        .collect()
}

fn is_gap_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SOURCE_EXTENSIONS.contains(&ext) || TRANSCRIPT_EXTENSIONS.contains(&ext)
        })
}

fn is_excluded(path: &Path, root: &Path, excludes: &[glob::Pattern]) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    excludes
        .iter()
        .any(|pattern| pattern.matches_path(path) || pattern.matches_path(relative))
}

/// Expands the command-line paths into the files to check.
///
/// Files named explicitly are checked whatever their extension. Directories
/// are walked respecting `.gitignore`, keeping GAP sources and transcripts.
fn discover_files(paths: &[PathBuf], excludes: &[glob::Pattern]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for root in paths {
        if root.is_file() {
            if !is_excluded(root, root, excludes) {
                files.push(root.clone());
            }
            continue;
        }
        if !root.is_dir() {
            bail!("No such file or directory: {}", root.display());
        }

        let mut builder = ignore::WalkBuilder::new(root);
        builder
            .hidden(false)
            .git_ignore(true)
            .sort_by_file_name(|a, b| a.cmp(b));

        for entry in builder.build() {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            let path = entry.path();

            if !path.is_file() || !is_gap_file(path) {
                continue;
            }
            if is_excluded(path, root, excludes) {
                tracing::debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x := 1;\n").unwrap();
    }

    fn names(files: &[PathBuf], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn walks_gap_extensions_only() {
        let tmp = TempDir::new().unwrap();
        for file in ["lib/a.gd", "lib/a.gi", "init.g", "tst/a.tst", "doc/a.xml", "README.md"] {
            touch(tmp.path(), file);
        }

        let files = discover_files(&[tmp.path().to_path_buf()], &[]).unwrap();
        assert_eq!(
            names(&files, tmp.path()),
            vec!["doc/a.xml", "init.g", "lib/a.gd", "lib/a.gi", "tst/a.tst"]
        );
    }

    #[test]
    fn excludes_match_relative_paths() {
        let tmp = TempDir::new().unwrap();
        for file in ["lib/a.gi", "tst/a.tst", "tst/deep/b.tst"] {
            touch(tmp.path(), file);
        }

        let excludes = compile_excludes(&["tst/**".to_string()]).unwrap();
        let files = discover_files(&[tmp.path().to_path_buf()], &excludes).unwrap();
        assert_eq!(names(&files, tmp.path()), vec!["lib/a.gi"]);
    }

    #[test]
    fn explicit_file_is_kept_whatever_its_extension() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "script.txt");
        let file = tmp.path().join("script.txt");

        let files = discover_files(&[file.clone()], &[]).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn missing_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = discover_files(&[tmp.path().join("absent")], &[]).unwrap_err();
        assert!(err.to_string().contains("absent"));
    }

    #[test]
    fn invalid_exclude_pattern_is_an_error() {
        assert!(compile_excludes(&["[".to_string()]).is_err());
    }

    #[test]
    fn command_line_layer_sets_only_given_options() {
        let args = CheckArgs {
            paths: vec![PathBuf::from(".")],
            columns: Some(100),
            indentation: None,
            max_warnings: None,
            disable: vec!["W004".to_string(), "tabs".to_string()],
            exclude: Vec::new(),
            format: OutputFormat::Text,
            silent: false,
        };
        let layer = args.layer();
        assert_eq!(layer.columns, Some(100));
        assert_eq!(layer.indentation, None);
        assert_eq!(
            layer.disable,
            Some(vec!["W004".to_string(), "tabs".to_string()])
        );
    }
}
