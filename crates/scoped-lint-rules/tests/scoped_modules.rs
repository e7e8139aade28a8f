//! End-to-end tests for the scoped-modules rule on real files.

use std::fs;
use std::path::Path;

use scoped_lint_core::fixer::apply_edits;
use scoped_lint_core::{
    Analyzer, DirectoryEntry, DirectoryError, DirectoryReader, Edit, ModuleContext, ModuleParser,
    OsDirectoryReader, Rule, RuleError, Violation,
};
use scoped_lint_rules::scoped_modules::{
    banned_export_message, banned_import_message, MISSING_EXPORTS_MESSAGE,
};
use scoped_lint_rules::ScopedModules;
use scoped_lint_ts::TypeScriptParser;
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, content) in files {
        let path = tmp.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    tmp
}

fn check_with(
    rule: &ScopedModules,
    root: &Path,
    file: &str,
    reader: &dyn DirectoryReader,
) -> Result<Vec<Violation>, RuleError> {
    let path = root.join(file);
    let content = fs::read_to_string(&path).unwrap();
    let ext = path.extension().unwrap().to_str().unwrap();
    let module = TypeScriptParser::new().parse(&content, ext).unwrap();
    let ctx = ModuleContext::new(&path, &content, root);
    rule.check(&ctx, &module, reader)
}

fn check(root: &Path, file: &str) -> Vec<Violation> {
    check_with(&ScopedModules::new(), root, file, &OsDirectoryReader).unwrap()
}

fn replace_text(violation: &Violation) -> &str {
    match violation.edit() {
        Some(Edit::ReplaceModule { text }) => text,
        other => panic!("expected a module rewrite, got {other:?}"),
    }
}

#[test]
fn banned_import_is_removed() {
    let src = "import x from '../@lib/x';\nconsole.log(x);\n";
    let tmp = project(&[("src/app/main.ts", src)]);

    let violations = check(tmp.path(), "src/app/main.ts");
    assert_eq!(violations.len(), 1);

    let v = &violations[0];
    assert_eq!(v.message, banned_import_message("@"));
    assert_eq!((v.location.line, v.location.column), (1, 1));
    let Some(Edit::DeleteSpan { start, end }) = v.edit() else {
        panic!("expected a deletion");
    };
    assert_eq!(&src[*start..*end], "import x from '../@lib/x';");

    let fixed = apply_edits(src, &[v.edit().unwrap()]).unwrap();
    assert_eq!(fixed.text, "\nconsole.log(x);\n");
}

#[test]
fn parent_chain_import_is_allowed() {
    let tmp = project(&[(
        "src/app/main.ts",
        "import a from './@a';\nimport b from '../../@b';\nimport c from '@scope/c';\n",
    )]);
    assert!(check(tmp.path(), "src/app/main.ts").is_empty());
}

#[test]
fn deep_import_is_banned() {
    let tmp = project(&[("main.ts", "import { deep } from '../@internal/deep';\n")]);
    let violations = check(tmp.path(), "main.ts");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, banned_import_message("@"));
}

#[test]
fn reexport_of_internal_module_is_banned_at_any_depth() {
    let tmp = project(&[(
        "lib/main.ts",
        "export * from './@secret';\nexport { a } from '../../@secret';\nexport const ok = 1;\n",
    )]);

    let violations = check(tmp.path(), "lib/main.ts");
    assert_eq!(violations.len(), 2);
    for v in &violations {
        assert_eq!(v.message, banned_export_message("@"));
        assert!(matches!(v.edit(), Some(Edit::DeleteSpan { .. })));
    }
    assert_eq!(violations[1].location.line, 2);
}

#[test]
fn index_gets_missing_reexports_in_listing_order() {
    let tmp = project(&[
        ("foo/index.ts", ""),
        ("foo/bar.ts", "export const bar = 1;\n"),
        ("foo/baz/index.ts", "export const baz = 2;\n"),
    ]);

    let violations = check(tmp.path(), "foo/index.ts");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, MISSING_EXPORTS_MESSAGE);
    assert_eq!(violations[0].location.offset, 0);

    insta::assert_snapshot!(replace_text(&violations[0]), @r"
    export * from './bar';
    export * from './baz';
    ");
}

#[test]
fn missing_exports_are_a_set_difference() {
    let tmp = project(&[
        ("pkg/index.ts", "export * from './a';\n"),
        ("pkg/a.ts", ""),
        ("pkg/b.ts", ""),
        ("pkg/@internal/index.ts", ""),
        ("pkg/c/util.ts", ""),
        ("pkg/README.md", ""),
    ]);

    let violations = check(tmp.path(), "pkg/index.ts");
    assert_eq!(violations.len(), 1);
    assert_eq!(
        replace_text(&violations[0]),
        "export * from './a';\nexport * from './b';\n"
    );
}

#[test]
fn applying_the_barrel_fix_is_idempotent() {
    let tmp = project(&[
        ("foo/index.ts", "export * from './bar';\n\n\n"),
        ("foo/bar.ts", ""),
        ("foo/qux.tsx", ""),
        ("foo/types.d.ts", ""),
    ]);

    let first = check(tmp.path(), "foo/index.ts");
    let text = replace_text(&first[0]).to_string();
    assert_eq!(
        text,
        "export * from './bar';\nexport * from './qux';\nexport * from './types';\n"
    );

    fs::write(tmp.path().join("foo/index.ts"), &text).unwrap();
    assert!(check(tmp.path(), "foo/index.ts").is_empty());
}

#[test]
fn runs_are_deterministic() {
    let tmp = project(&[
        ("m/index.ts", "import x from '../@lib/x';\n"),
        ("m/z.ts", ""),
        ("m/a.ts", ""),
        ("m/k/index.js", ""),
    ]);

    let render = |vs: Vec<Violation>| -> Vec<(String, Option<Edit>)> {
        vs.into_iter()
            .map(|v| (v.message.clone(), v.edit().cloned()))
            .collect()
    };
    let first = render(check(tmp.path(), "m/index.ts"));
    let second = render(check(tmp.path(), "m/index.ts"));
    assert_eq!(first, second);

    // boundary diagnostics first, then the barrel
    assert_eq!(first.len(), 2);
    assert_eq!(first[1].0, MISSING_EXPORTS_MESSAGE);
}

#[test]
fn barrel_check_can_be_disabled() {
    let tmp = project(&[("foo/index.ts", ""), ("foo/bar.ts", "")]);
    let rule = ScopedModules::new().check_barrels(false);
    let violations = check_with(&rule, tmp.path(), "foo/index.ts", &OsDirectoryReader).unwrap();
    assert!(violations.is_empty());
}

#[test]
fn non_index_modules_skip_the_barrel_check() {
    let tmp = project(&[("foo/main.ts", ""), ("foo/bar.ts", "")]);
    assert!(check(tmp.path(), "foo/main.ts").is_empty());
}

struct Unreadable;

impl DirectoryReader for Unreadable {
    fn list(&self, dir: &Path) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        Err(DirectoryError {
            path: dir.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        })
    }
}

#[test]
fn unreadable_directory_is_a_rule_error_with_partial_results() {
    let tmp = project(&[("foo/index.ts", "import x from '../@lib/x';\n")]);

    let err = check_with(&ScopedModules::new(), tmp.path(), "foo/index.ts", &Unreadable)
        .unwrap_err();
    assert_eq!(err.path, tmp.path().join("foo/index.ts"));
    assert!(err.message.contains("cannot list directory"));
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].message, banned_import_message("@"));
}

fn analyzer(root: &Path) -> Analyzer {
    Analyzer::builder()
        .root(root)
        .parser(TypeScriptParser::new())
        .rule(ScopedModules::new())
        .build()
        .unwrap()
}

#[test]
fn analyzer_reports_modules_in_path_order() {
    let tmp = project(&[
        ("a/main.ts", "import x from '../@lib/x';\n"),
        ("b/index.ts", ""),
        ("b/one.ts", ""),
    ]);

    let result = analyzer(tmp.path()).analyze().unwrap();
    assert_eq!(result.files_checked, 3);
    assert!(result.failures.is_empty());

    let files: Vec<_> = result
        .violations
        .iter()
        .map(|v| v.location.file.to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(files, vec!["a/main.ts", "b/index.ts"]);
}

#[test]
fn analyzer_fix_resolves_overlapping_edits_over_passes() {
    let tmp = project(&[
        ("foo/index.ts", "export * from './@secret';\n"),
        ("foo/@secret/index.ts", ""),
        ("foo/a.ts", ""),
    ]);
    let analyzer = analyzer(tmp.path());

    let before = analyzer.analyze().unwrap();
    assert_eq!(before.violations.len(), 2);
    assert_eq!(before.fixable_count(), 2);

    let summary = analyzer.fix().unwrap();
    assert_eq!(summary.files_fixed, 1);
    assert_eq!(summary.edits_applied, 2);

    let fixed = fs::read_to_string(tmp.path().join("foo/index.ts")).unwrap();
    assert_eq!(fixed, "export * from './a';\n");
    assert!(analyzer.analyze().unwrap().violations.is_empty());
}

#[test]
fn analyzer_on_a_single_file_reports_its_name() {
    let tmp = project(&[
        ("src/main.ts", "import x from '../@lib/x/y';\n"),
        ("src/index.ts", ""),
    ]);
    let result = analyzer(&tmp.path().join("src/main.ts")).analyze().unwrap();

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations.len(), 1);
    let location = &result.violations[0].location;
    assert_eq!(location.file, Path::new("main.ts"));
    assert_eq!(location.line, 1);
}

#[test]
fn line_directive_does_not_hide_missing_reexports() {
    let tmp = project(&[
        (
            "foo/index.ts",
            "// scoped-lint: allow(scoped-modules)\nimport x from '../@lib/x/y';\n",
        ),
        ("foo/a.ts", ""),
    ]);

    let result = analyzer(tmp.path()).analyze().unwrap();
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].message, MISSING_EXPORTS_MESSAGE);
}

#[test]
fn module_directive_hides_every_diagnostic_of_the_file() {
    let tmp = project(&[
        (
            "foo/index.ts",
            "import x from '../@lib/x/y';\n// scoped-lint: allow-module(scoped-modules)\n",
        ),
        ("foo/a.ts", ""),
    ]);

    let result = analyzer(tmp.path()).analyze().unwrap();
    assert!(result.violations.is_empty());
}

#[test]
fn every_parsed_extension_is_expected_in_the_barrel() {
    let tmp = project(&[
        ("lib/index.ts", "export * from './a';\n"),
        ("lib/a.ts", ""),
        ("lib/util.mts", ""),
        ("lib/legacy.cjs", ""),
        ("lib/data.json", "{}"),
    ]);

    let violations = check(tmp.path(), "lib/index.ts");
    assert_eq!(violations.len(), 1);
    assert_eq!(
        replace_text(&violations[0]),
        "export * from './a';\nexport * from './legacy';\nexport * from './util';\n"
    );
}
