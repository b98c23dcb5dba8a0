use nsdebug::FilterTable;

const SPEC: &str = "test:other,test:child*,-test:child2";

#[test]
fn test_negated_spec_resolves_each_name() {
    let table = FilterTable::parse(SPEC).expect("valid spec");

    assert!(table.resolve("test:other"));
    assert!(table.resolve("test:child1"));
    assert!(
        !table.resolve("test:child2"),
        "exclude must override the matching include"
    );
    assert!(!table.resolve("test"), "parent name is not matched by children's patterns");
}

#[test]
fn test_no_include_match_means_disabled_whatever_the_excludes() {
    let names = ["", "a", "a:b", "zzz", "*"];
    let specs = ["x", "x,-a", "x,-*", "-*", "-a,-a:b"];

    for spec in specs {
        let table = FilterTable::parse(spec).expect("valid spec");
        for name in names {
            if !table.includes().iter().any(|m| m.matches(name)) {
                assert!(
                    !table.resolve(name),
                    "'{name}' has no include match in '{spec}' but resolved enabled"
                );
            }
        }
    }
}

#[test]
fn test_excludes_always_win() {
    let specs = ["*,-db:*", "-db:*,*", "db:query,-db:*", "db:*,-db:query"];

    for spec in specs {
        let table = FilterTable::parse(spec).expect("valid spec");
        assert!(
            !table.resolve("db:query"),
            "exclude should win for 'db:query' under '{spec}'"
        );
    }
}

#[test]
fn test_wildcard_suffix() {
    let table = FilterTable::parse("test:child*").expect("valid spec");
    assert!(table.resolve("test:child1"));
    assert!(table.resolve("test:child2"));
    assert!(!table.resolve("test:other"));
}

#[test]
fn test_empty_spec_disables_every_name() {
    let table = FilterTable::parse("").expect("empty spec is valid");
    for name in ["a", "server:http", "*", " "] {
        assert!(!table.resolve(name), "'{name}' should be disabled");
    }
}

#[test]
fn test_regex_syntax_in_names_is_literal() {
    let table = FilterTable::parse("app.v1:*,-app.v1:(internal)").expect("valid spec");
    assert!(table.resolve("app.v1:http"));
    assert!(!table.resolve("appXv1:http"), "'.' must not act as a wildcard");
    assert!(!table.resolve("app.v1:(internal)"));
    assert!(table.resolve("app.v1:internal"));
}

#[test]
fn test_whitespace_around_tokens_is_ignored() {
    let table = FilterTable::parse("a:* , -a:b").expect("valid spec");
    assert!(table.resolve("a:c"));
    assert!(!table.resolve("a:b"));
}
