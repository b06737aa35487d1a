//! End-to-end tests for the `jtranc` binary.

use std::path::Path;
use std::process::{Command, Output};

use jtran_ast::{
    Block, BodyDeclaration, CompilationUnit, ConstructorInvocation, EnumConstantDeclaration,
    EnumDeclaration, MethodBinding, MethodDeclaration, Statement, TypeBinding,
    TypeDeclaration, VarId, VariableBinding,
};

fn jtranc(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jtranc"))
        .current_dir(dir)
        .env_remove("JTRAN_LOG_LEVEL")
        .env_remove("JTRAN_LOG_FORMAT")
        .args(args)
        .output()
        .expect("failed to run jtranc")
}

/// `enum Color { RED, GREEN; Color() {} Color(int x) { this(); } }`
fn color_unit() -> CompilationUnit {
    let color = TypeBinding::enum_type(Some("com.example"), "Color");
    let int = TypeBinding::primitive("int");
    let nullary = MethodBinding::constructor(color.clone(), vec![]);
    let unary = MethodBinding::constructor(color.clone(), vec![int.clone()]);

    let mut decl = EnumDeclaration::new(color.clone());
    for (i, name) in ["RED", "GREEN"].into_iter().enumerate() {
        decl.constants.push(EnumConstantDeclaration {
            variable: VariableBinding::field(VarId(i as u32), name, color.clone(), color.clone()),
            constructor: nullary.clone(),
            arguments: vec![],
        });
    }
    decl.body_declarations.push(BodyDeclaration::Method(MethodDeclaration::new(
        nullary.clone(),
        vec![],
        Block::default(),
    )));
    decl.body_declarations.push(BodyDeclaration::Method(MethodDeclaration::new(
        unary,
        vec![jtran_ast::SingleVariableDeclaration::new(VariableBinding::parameter(
            VarId(2),
            "x",
            int,
            color,
        ))],
        Block::new(vec![Statement::ConstructorInvocation(ConstructorInvocation {
            method: nullary,
            arguments: vec![],
        })]),
    )));
    CompilationUnit::new(vec![TypeDeclaration::Enum(decl)], 3)
}

fn write_unit(dir: &Path, unit: &CompilationUnit) -> String {
    let path = dir.join("unit.json");
    std::fs::write(&path, serde_json::to_string(unit).unwrap()).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn lower_writes_rewritten_unit() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_unit(dir.path(), &color_unit());
    let out = dir.path().join("out.json");

    let output = jtranc(dir.path(), &["lower", &input, "-o", out.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "jtranc lower failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json = std::fs::read_to_string(&out).unwrap();
    let unit: CompilationUnit = serde_json::from_str(&json).unwrap();
    assert_eq!(unit.next_var_id, 7);
    assert_eq!(unit.source_path.as_deref(), Some(input.as_str()));

    let decl = unit.types[0].as_enum().unwrap();
    assert_eq!(decl.class_init_statements.len(), 2);
    assert_eq!(decl.native_declarations().count(), 2);
    let arities: Vec<usize> = decl.constructors().map(|c| c.binding.arity()).collect();
    assert_eq!(arities, vec![2, 3]);
}

#[test]
fn lower_to_stdout_and_emit_native() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_unit(dir.path(), &color_unit());
    let native = dir.path().join("color.m.txt");

    let output = jtranc(
        dir.path(),
        &["lower", &input, "--emit-native", native.to_str().unwrap(), "--swift-friendly"],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let unit: CompilationUnit = serde_json::from_str(&stdout).unwrap();
    assert_eq!(unit.types.len(), 1);

    let text = std::fs::read_to_string(&native).unwrap();
    assert!(text.starts_with("// ComExampleColor (header)\n"));
    assert!(text.contains("- (ComExampleColor_Enum)toNSEnum;"));
    assert!(text.contains("// ComExampleColor (implementation, file scope)\n"));
    assert!(text.contains("if (ordinal >= 2) {"));
}

#[test]
fn lower_writes_stats_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_unit(dir.path(), &color_unit());
    let stats = dir.path().join("stats.json");

    let output = jtranc(
        dir.path(),
        &["lower", &input, "-o", "out.json", "--stats", stats.to_str().unwrap()],
    );
    assert!(
        output.status.success(),
        "jtranc lower failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&stats).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "enums": 1,
            "constructors": 2,
            "forwarding_calls": 1,
            "constants": 2,
        })
    );
}

#[test]
fn config_file_in_working_directory_is_used() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("jtran.toml"), "[translate]\nmemory = \"arc\"\n").unwrap();

    let output = jtranc(dir.path(), &["native", "--name", "Suit", "--count", "1"]);
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("@throw [[JavaLangIllegalArgumentException alloc] initWithNSString:name];"));

    let output = jtranc(dir.path(), &["native", "--name", "Suit", "--count", "1", "--memory", "rc"]);
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("initWithNSString:name] autorelease];"));
}

#[test]
fn malformed_unit_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.json");
    std::fs::write(&input, "{ not json").unwrap();

    let output = jtranc(dir.path(), &["lower", input.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid compilation unit"), "stderr: {}", stderr);
}

#[test]
fn missing_input_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let output = jtranc(dir.path(), &["lower", "does-not-exist.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn unknown_memory_mode_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let output = jtranc(dir.path(), &["native", "--name", "Suit", "--memory", "gc"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn info_level_logs_pass_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_unit(dir.path(), &color_unit());

    let output = jtranc(dir.path(), &["--log-level", "info", "lower", &input]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lowered enums"), "stderr: {}", stderr);
    assert!(stderr.contains("constants=2"), "stderr: {}", stderr);
}

#[test]
fn json_log_format_emits_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_unit(dir.path(), &color_unit());

    let output = jtranc(
        dir.path(),
        &["lower", &input, "--log-level", "info", "--log-format", "json"],
    );
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr
        .lines()
        .find(|l| l.contains("lowered enums"))
        .expect("summary event");
    let event: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(event["level"], "INFO");
    assert_eq!(event["fields"]["enums"], 1);
}
