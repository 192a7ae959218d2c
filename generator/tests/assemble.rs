#![cfg(unix)]

use std::fs;

use tablesite_generator::{Config, builder::BuilderCommand, build};

/// Stands in for `mkdocs build`: fails unless the project looks right,
/// otherwise drops a `site/index.html`.
fn fake_mkdocs() -> BuilderCommand {
    BuilderCommand {
        program: "sh".to_string(),
        args: vec![
            "-c".to_string(),
            "test -f mkdocs.yml && test -f docs/index.md && mkdir -p site && echo '<html></html>' > site/index.html"
                .to_string(),
        ],
    }
}

fn source_tree(root: &std::path::Path) {
    fs::create_dir_all(root.join("reports")).unwrap();
    fs::write(
        root.join("reports/q1.csv"),
        "region,revenue\nnorth,10\nsouth,20\neast,30\n",
    )
    .unwrap();
    fs::write(root.join("notes.txt"), "hello").unwrap();
}

#[test]
fn end_to_end() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source_dir = tmp.path().join("my_source_files");
    source_tree(&source_dir);

    let config = Config {
        source_dir: source_dir.clone(),
        project_dir: tmp.path().join("site_project"),
        builder: fake_mkdocs(),
        ..Config::default()
    };
    let docs = config.docs_dir();

    let site = build(config).unwrap();

    assert!(docs.join("index.md").is_file());

    let q1 = fs::read_to_string(docs.join("reports/q1.csv.md")).unwrap();
    let q1_path = source_dir.canonicalize().unwrap().join("reports/q1.csv");
    assert!(q1.contains(&format!("read_csv('{}')", q1_path.display())));

    let notes = fs::read_to_string(docs.join("notes.txt.md")).unwrap();
    assert!(notes.contains("```text\nhello\n```"));

    assert!(site.index_html.is_file());
    assert!(site.site_dir.is_absolute());
}

#[test]
fn failing_builder_is_reported() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source_dir = tmp.path().join("my_source_files");
    source_tree(&source_dir);

    let config = Config {
        source_dir,
        project_dir: tmp.path().join("site_project"),
        builder: BuilderCommand {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "echo 'Config value: plugins: The \"table-reader\" plugin is not installed' >&2; exit 1"
                    .to_string(),
            ],
        },
        ..Config::default()
    };

    let err = format!("{:#}", build(config).unwrap_err());
    assert!(err.contains("exit code: 1"));
    assert!(err.contains("table-reader"));
}
