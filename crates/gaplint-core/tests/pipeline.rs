//! Integration test: configuration, suppression and the parallel run.
//!
//! Uses a small hand-built registry so the engine is exercised without the
//! built-in rule set.

use gaplint_core::{
    Analyzer, Config, ConfigLayer, Finding, LayeredConfig, LineContext, PartialConfig,
    Preprocessor, RuleDefinition, RuleId, RuleRegistry, Stages,
};
use std::path::{Path, PathBuf};

fn semicolons(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    for (i, c) in ctx.clean.chars().enumerate() {
        if c == ';' {
            out.push(Finding::new("semicolon").at_column(i + 1));
        }
    }
}

fn too_long(ctx: &LineContext<'_>, out: &mut Vec<Finding>) {
    if ctx.original.chars().count() > ctx.config.columns {
        out.push(Finding::new("too long"));
    }
}

fn registry() -> RuleRegistry {
    RuleRegistry::new()
        .with(RuleDefinition::modify("M003", "replace-quotes", ""))
        .with(RuleDefinition::modify("M004", "remove-comments", ""))
        .with(RuleDefinition::warning("W002", "line-too-long", "", too_long))
        .with(RuleDefinition::warning("W011", "semicolon", "", semicolons))
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("fixture should be writable");
    path
}

// ── Configuration ──

#[test]
fn file_layer_is_loaded_and_overridden_by_command_line() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write(
        dir.path(),
        "gaplint.toml",
        "columns = 10\nmax_warnings = 50\ndisable = [\"semicolon\"]\n",
    );

    let file = PartialConfig::from_file(&config_path).unwrap();
    let command_line = PartialConfig::new()
        .with_columns(20)
        .with_disable(["W002"]);

    let config = LayeredConfig::new()
        .layer(ConfigLayer::File, file)
        .layer(ConfigLayer::CommandLine, command_line)
        .resolve(&registry());

    assert_eq!(config.columns, 20);
    assert_eq!(config.max_warnings, 50);
    assert_eq!(config.indentation, 2);
    assert!(config.is_disabled(RuleId::new("W011")));
    assert!(config.is_disabled(RuleId::new("W002")));
}

#[test]
fn unknown_keys_and_missing_files_are_errors() {
    assert!(PartialConfig::parse("colums = 80").is_err());

    let dir = tempfile::tempdir().unwrap();
    let err = PartialConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn unknown_disable_tokens_are_ignored() {
    let config = LayeredConfig::new()
        .layer(
            ConfigLayer::CommandLine,
            PartialConfig::new().with_disable(["W999", "no-such-rule", "w011"]),
        )
        .resolve(&registry());
    assert_eq!(config.disabled.len(), 1);
    assert!(config.is_disabled(RuleId::new("W011")));
}

// ── Suppression ──

#[test]
fn directives_add_to_configured_disables() {
    let config = Config {
        columns: 5,
        ..Config::default()
    };
    let analyzer = Analyzer::builder()
        .registry(registry())
        .config(config)
        .build();

    let source = "\
a;
long_line; # gaplint: disable=semicolon
# gaplint: disable(nextline)=W002

another_long_line;
";
    let result = analyzer.analyze_source("t.g", source);
    let reported: Vec<(usize, &str)> = result
        .diagnostics
        .iter()
        .map(|d| (d.location.line, d.code.as_str()))
        .collect();
    assert_eq!(
        reported,
        vec![(1, "W011"), (2, "W002"), (3, "W002"), (5, "W011")]
    );
}

// ── Preprocessing ──

#[test]
fn clean_lines_keep_their_width() {
    let lines = [
        "x := \"a;b\"; # trailing; comment",
        "s := \"\\\"quoted\\\"\";",
        "t := \"\"\"first",
        "still inside;",
        "done\"\"\"; y := 'c';",
        "Print(\"äöü\"); # ü",
    ];
    let mut preprocessor = Preprocessor::new(Stages::all());
    for line in lines {
        let clean = preprocessor.process(line);
        assert_eq!(
            clean.stripped.chars().count(),
            line.chars().count(),
            "{line}"
        );
        assert!(clean.clean.chars().count() <= line.chars().count());
        assert!(!clean.clean.contains('#'));
    }
    assert!(!preprocessor.state().in_string());
}

#[test]
fn strings_hide_semicolons_and_comments() {
    let analyzer = Analyzer::builder().registry(registry()).build();
    let result = analyzer.analyze_source("t.g", "s := \"a;b\"; # c;d\n");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].location.column, Some(11));
}

// ── Parallel run ──

#[test]
fn many_files_report_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<PathBuf> = (0..32)
        .map(|i| write(dir.path(), &format!("f{i:02}.g"), &";\n".repeat(i % 3 + 1)))
        .collect();

    let analyzer = Analyzer::builder().registry(registry()).build();
    let result = analyzer.analyze(&paths);

    assert_eq!(result.files_checked, 32);
    assert!(!result.truncated);
    let expected: usize = (0..32).map(|i| i % 3 + 1).sum();
    assert_eq!(result.diagnostics.len(), expected);

    let mut last_file = 0;
    for d in &result.diagnostics {
        let index = paths
            .iter()
            .position(|p| *p == d.location.file)
            .expect("diagnostic file is an input");
        assert!(index >= last_file);
        last_file = index;
    }
}

#[test]
fn threshold_is_shared_across_files() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<PathBuf> = (0..8)
        .map(|i| write(dir.path(), &format!("g{i}.g"), ";;;\n;;;\n"))
        .collect();

    let analyzer = Analyzer::builder()
        .registry(registry())
        .config(Config {
            max_warnings: 10,
            ..Config::default()
        })
        .build();
    let result = analyzer.analyze(&paths);

    assert_eq!(result.diagnostics.len(), 10);
    assert!(result.truncated);
    assert!(!result.is_clean());
    assert!(result.summary().contains("stopped at the warning threshold"));
}
