use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use chorus_cli::{Args, run};

/// Collects all .seq files from a directory
fn collect_seq_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("seq")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos live at the workspace root, not inside the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_seq_files(demos_path());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!("{}.json", demo_path.file_stem().unwrap().to_string_lossy());
        let output_path = temp_dir.path().join(output_filename);

        match run(&args_for(demo_path, &output_path)) {
            Ok(()) => {
                let json = fs::read_to_string(&output_path).expect("Output should be written");
                let value: serde_json::Value =
                    serde_json::from_str(&json).expect("Output should be valid JSON");
                let agents = value["agents"].as_array().expect("agents should be a list");
                assert_eq!(agents.first().and_then(|a| a.as_str()), Some("["));
                assert_eq!(agents.last().and_then(|a| a.as_str()), Some("]"));
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_seq_files(demos_path().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.json",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args_for(demo_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(!output_path.exists(), "No output on failure");
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_config_file_sets_default_terminators() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("input.seq");
    let config = temp_dir.path().join("config.toml");
    let output = temp_dir.path().join("out.json");

    fs::write(&input, "A -> B\n").unwrap();
    fs::write(
        &config,
        "[parser]\ndefault_terminators = \"cross\"\n\n[export]\npretty = false\n",
    )
    .unwrap();

    let mut args = args_for(&input, &output);
    args.config = Some(config.to_string_lossy().to_string());
    run(&args).expect("Run should succeed");

    let json = fs::read_to_string(&output).unwrap();
    assert!(!json.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["meta"]["terminators"], "cross");
    assert_eq!(value["stages"][2]["type"], "agent-end");
    assert_eq!(value["stages"][2]["mode"], "cross");
}
