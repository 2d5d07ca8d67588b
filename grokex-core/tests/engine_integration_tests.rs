//! Integration tests for the pattern engine
//!
//! These tests drive the public API end to end: registration, catalog
//! loading from text, files and directories, compilation and extraction.

use std::fs;

use grokex_core::{Config, GrokError, Grok, OnUnresolved};

#[test]
fn test_literal_pattern_matches_itself() {
    let mut grok = Grok::new();
    for literal in ["abc", "hello world", "12345", "hello_world"] {
        grok.compile(literal).unwrap();
        assert!(grok.is_match(literal).unwrap(), "Failed for: {}", literal);
    }
}

#[test]
fn test_reference_substitution() {
    let mut grok = Grok::new();
    grok.add_pattern("A", r"\d+");
    grok.compile("%{A:num}").unwrap();

    assert!(grok.is_match("42").unwrap());
    let caps = grok.captures("42").unwrap();
    assert_eq!(caps["num"], "42");
}

#[test]
fn test_unresolved_reference_keeps_matcher() {
    let mut grok = Grok::new();
    grok.add_pattern("WORD", r"\w+");
    grok.compile("%{WORD}").unwrap();

    let result = grok.compile("%{UNKNOWN}");
    assert!(matches!(result, Err(GrokError::MissingPattern { ref name }) if name == "UNKNOWN"));

    assert_eq!(grok.compiled_pattern(), Some("%{WORD}"));
    assert_eq!(grok.captures("hi").unwrap()["WORD"], "hi");
}

#[test]
fn test_compile_same_pattern_is_stable() {
    let mut grok = Grok::new();
    grok.add_pattern("NUM", r"\d+");

    grok.compile("%{NUM}").unwrap();
    let first = grok.regex().unwrap().as_str().to_string();
    grok.compile("%{NUM}").unwrap();
    assert_eq!(grok.regex().unwrap().as_str(), first);
    assert_eq!(grok.compiled_pattern(), Some("%{NUM}"));

    grok.compile("x%{NUM}").unwrap();
    assert_eq!(grok.compiled_pattern(), Some("x%{NUM}"));
    assert!(!grok.is_match("12").unwrap());
    assert!(grok.is_match("x12").unwrap());
}

#[test]
fn test_cycle_in_catalog_is_reported() {
    let mut grok = Grok::new();
    let result = grok.add_patterns_from_str("X %{Y}\nY %{X}\n");
    assert!(matches!(result, Err(GrokError::CycleDetected { .. })));
    assert_eq!(grok.pattern_count(), 0);
}

#[test]
fn test_dependency_order_either_declaration_order() {
    for catalog in [
        "BASE [a-z]+\nDERIVED %{BASE}[0-9]\n",
        "DERIVED %{BASE}[0-9]\nBASE [a-z]+\n",
    ] {
        let mut grok = Grok::new();
        assert_eq!(grok.add_patterns_from_str(catalog).unwrap(), 2);

        grok.compile("^%{DERIVED}$").unwrap();
        assert!(grok.is_match("abc9").unwrap(), "catalog: {catalog:?}");
        assert!(!grok.is_match("9abc").unwrap(), "catalog: {catalog:?}");
    }
}

#[test]
fn test_no_match_returns_empty_labels() {
    let mut grok = Grok::new();
    grok.add_pattern("NUM", r"\d+");
    grok.add_pattern("WORD", "[a-z]+");
    grok.compile("%{WORD:w}=%{NUM:n}").unwrap();

    assert!(!grok.is_match("nothing here").unwrap());
    let caps = grok.captures("nothing here").unwrap();
    assert_eq!(caps.len(), 3);
    assert!(caps.values().all(String::is_empty));
    assert!(caps.contains_key("w"));
    assert!(caps.contains_key("n"));
}

#[test]
fn test_alias_versus_name_labels() {
    let mut grok = Grok::new();
    grok.add_pattern("A", "[xy]");

    let caps = grok.parse("%{A}", "x").unwrap();
    assert_eq!(caps["A"], "x");
    assert!(!caps.contains_key("b"));

    let caps = grok.parse("%{A:b}", "y").unwrap();
    assert_eq!(caps["b"], "y");
    assert!(!caps.contains_key("A"));
}

#[test]
fn test_log_line_extraction() {
    let catalog = "\
# basic building blocks
INT [+-]?[0-9]+
WORD \\b\\w+\\b
IPV4 (?:[0-9]{1,3}\\.){3}[0-9]{1,3}
METHOD GET|POST|PUT|DELETE
# composed
REQUEST %{METHOD:verb} /%{WORD:path}
ACCESS %{IPV4:client} %{REQUEST} %{INT:status}
";
    let mut grok = Grok::new();
    grok.add_patterns_from_str(catalog).unwrap();

    let caps = grok
        .parse("%{ACCESS}", "10.0.0.7 POST /login 403")
        .unwrap();
    assert_eq!(caps["client"], "10.0.0.7");
    assert_eq!(caps["verb"], "POST");
    assert_eq!(caps["path"], "login");
    assert_eq!(caps["status"], "403");
    assert_eq!(caps["REQUEST"], "POST /login");
    assert_eq!(caps["ACCESS"], "10.0.0.7 POST /login 403");
}

#[test]
fn test_unresolved_catalog_reference_becomes_empty() {
    let mut grok = Grok::new();
    grok.add_patterns_from_str("A x%{GHOST}y\n").unwrap();
    assert_eq!(grok.pattern("A"), Some("x(?P<GHOST>)y"));

    grok.compile("%{A}").unwrap();
    let caps = grok.captures("xy").unwrap();
    assert_eq!(caps["GHOST"], "");
    assert_eq!(caps["A"], "xy");
}

#[test]
fn test_strict_config_rejects_unresolved_catalog() {
    let mut grok = Grok::with_config(Config::new().with_on_unresolved(OnUnresolved::Fail));
    let result = grok.add_patterns_from_str("A x%{GHOST}y\n");
    assert!(matches!(result, Err(GrokError::MissingPattern { ref name }) if name == "GHOST"));
}

#[test]
fn test_catalog_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("base");
    fs::write(&path, "# numbers\nNUMBER \\d+\nPAIR %{NUMBER:a},%{NUMBER:b}\n").unwrap();

    let mut grok = Grok::new();
    assert_eq!(grok.add_patterns_from_path(&path).unwrap(), 2);

    let caps = grok.parse("%{PAIR}", "3,14").unwrap();
    assert_eq!(caps["a"], "3");
    assert_eq!(caps["b"], "14");
}

#[test]
fn test_catalog_from_directory_across_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b_derived"), "GREETING %{HELLO} %{NAME}\n").unwrap();
    fs::write(dir.path().join("a_base"), "HELLO hi|hello\nNAME [A-Z][a-z]+\n").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("ignored"), "IGNORED x\n").unwrap();

    let mut grok = Grok::new();
    assert_eq!(grok.add_patterns_from_path(dir.path()).unwrap(), 3);
    assert!(grok.pattern("IGNORED").is_none());

    let caps = grok.parse("%{GREETING}", "hello Ada").unwrap();
    assert_eq!(caps["HELLO"], "hello");
    assert_eq!(caps["NAME"], "Ada");
}

#[test]
fn test_catalog_missing_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut grok = Grok::new();
    let result = grok.add_patterns_from_path(dir.path().join("absent"));
    assert!(matches!(result, Err(GrokError::Io { .. })));
}

#[test]
fn test_catalog_malformed_lines_do_not_abort() {
    let mut grok = Grok::new();
    let count = grok
        .add_patterns_from_str("JUSTNAME\nGOOD ok\n")
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(grok.pattern("GOOD"), Some("ok"));
}

#[test]
fn test_diamond_catalog_compiles() {
    let mut grok = Grok::new();
    grok.add_patterns_from_str("A a\nB %{A}\nC %{A}\nD %{B}%{C}\n")
        .unwrap();
    assert_eq!(
        grok.pattern("D"),
        Some("(?P<B>(?P<A>a))(?P<C>(?P<A>a))")
    );

    grok.compile("%{D}").unwrap();
    let caps = grok.captures("aa").unwrap();
    assert_eq!(caps["D"], "aa");
    assert_eq!(caps["B"], "a");
    assert_eq!(caps["C"], "a");
    assert_eq!(caps["A"], "a");
    assert_eq!(caps.len(), 5);
}

#[test]
fn test_repeated_reference_compiles_last_value_wins() {
    let mut grok = Grok::new();
    grok.add_pattern("INT", "[0-9]+");
    grok.compile("%{INT} %{INT}").unwrap();

    let caps = grok.captures("7 42").unwrap();
    assert_eq!(caps["INT"], "42");
    assert_eq!(caps[""], "7 42");

    grok.compile("%{INT:x}-%{INT:x}").unwrap();
    assert_eq!(grok.captures("1-2").unwrap()["x"], "2");
}

#[test]
fn test_catalog_paths_load_as_one_batch() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base");
    let derived = dir.path().join("derived");
    fs::write(&base, "BASE [a-z]+\n").unwrap();
    fs::write(&derived, "DERIVED %{BASE}[0-9]\n").unwrap();

    let mut grok = Grok::new();
    assert_eq!(grok.add_patterns_from_paths([&base, &derived]).unwrap(), 2);
    assert_eq!(grok.pattern("DERIVED"), Some("(?P<BASE>[a-z]+)[0-9]"));

    let caps = grok.parse("%{DERIVED}", "abc9").unwrap();
    assert_eq!(caps["BASE"], "abc");
}

#[cfg(unix)]
#[test]
fn test_catalog_directory_of_symlinks() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("numbers");
    fs::write(&target, "NUMBER \\d+\n").unwrap();
    let catalogs = dir.path().join("catalogs");
    fs::create_dir(&catalogs).unwrap();
    std::os::unix::fs::symlink(&target, catalogs.join("numbers")).unwrap();

    let mut grok = Grok::new();
    assert_eq!(grok.add_patterns_from_path(&catalogs).unwrap(), 1);
    assert_eq!(grok.pattern("NUMBER"), Some(r"\d+"));
}
