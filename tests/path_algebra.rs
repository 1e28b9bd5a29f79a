//! Cross-operation properties of the path algebra

use treestore::PathValue;

#[test]
fn values_never_contain_backslashes() {
    let samples = [
        r"plain",
        r"a\b\c.txt",
        r"mixed/one\two",
        r"\leading",
        r"trailing\",
        "",
    ];
    for raw in samples {
        assert!(
            !PathValue::new(raw).value().contains('\\'),
            "backslash survived normalization of {raw:?}"
        );
    }
}

#[test]
fn join_then_sub_directory_recovers_the_suffix() {
    let cases = [
        ("root", "leaf.txt"),
        ("a/b", "c/d.md"),
        ("./x", "y"),
        ("deep/er/still", "one/more/level.rs"),
    ];
    for (base, suffix) in cases {
        let a = PathValue::new(base);
        let b = PathValue::new(suffix);
        let joined = a.join(&b);
        let recovered = a
            .sub_directory(&joined)
            .map(|p| p.remove_extra_symbols())
            .unwrap_or_default();
        assert!(
            recovered.compare(&b),
            "{base} + {suffix} -> {} recovered {}",
            joined,
            recovered
        );
    }
}

#[test]
fn strip_extension_always_leaves_no_extension() {
    let samples = [
        "a/b/c.txt",
        "archive.tar.gz",
        "no-extension",
        ".hidden",
        "dir.v2/file",
        "trailing.",
        "",
    ];
    for raw in samples {
        assert_eq!(
            PathValue::new(raw).strip_extension().extension(),
            None,
            "{raw}"
        );
    }
}

#[test]
fn decomposition_agrees_with_itself() {
    let p = PathValue::new("a/b/c.txt");
    assert_eq!(p.name(), Some("c"));
    assert_eq!(p.name_with_extension(), Some("c.txt"));
    assert_eq!(p.extension(), Some("txt"));
    assert_eq!(p.parent_directory_path().value(), "a/b");
    // parent + name-with-extension reassembles the original
    let reassembled = p
        .parent_directory_path()
        .join(&PathValue::new(p.name_with_extension().unwrap_or_default()));
    assert!(reassembled.compare(&p));
}

#[test]
fn root_directory_examples() {
    assert_eq!(PathValue::new("a/b").root_directory().value(), "a");
    assert_eq!(PathValue::new("./x/y").root_directory().value(), "./x");
}

#[test]
fn relative_path_scenarios() {
    let cases = [
        ("a/b/c.txt", "a/d/e.txt", "./../d/e.txt"),
        ("a/b/c.txt", "a/b/d.txt", "./d.txt"),
        ("a/b/c/f.txt", "a/x.txt", "./../../x.txt"),
        // an extensionless source counts itself as a directory level
        ("a/b", "a/c.txt", "./../c.txt"),
        ("docs/guide", "docs/guide/intro.md", "./../guide/intro.md"),
    ];
    for (from, to, expected) in cases {
        assert_eq!(
            PathValue::new(from)
                .get_relative_path(&PathValue::new(to))
                .value(),
            expected,
            "from {from} to {to}"
        );
    }
}
