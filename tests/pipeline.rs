use std::io::{Seek, SeekFrom, Write};

use issue_templater::{
    dataset::{read_examples, TrainingExample},
    template::Document,
    Backend, ModelConfig, TemplateModel, TemplaterError,
};

const LOGIN_OUTPUT: &str = "## Bug Report: Crash On Login\n### Description\noriginal text\n### Proposed Tasks\n- [ ] task";

const CORPUS_JSON: &str = r###"[
  {"input": "App crashes on login button tap",
   "output": "## Bug Report: App Crashes on Login Button Tap\n\n### Description\nThe application crashes when users tap the login button.\n\n### Steps to Reproduce\n1. Open the app\n2. Tap login\n\n### Proposed Tasks\n- [ ] Investigate crash logs\n- [ ] Add null checks"},
  {"input": "Database connection times out after 30 seconds",
   "output": "## Performance Issue: Database Connection Timeout\n\n### Description\nConnections to the database time out.\n\n### Error Logs\n```\nTimeoutError\n```\n\n### Proposed Tasks\n- [ ] Tune pool size"},
  {"input": "Need to add dark mode support",
   "output": "## Feature Request: Dark Mode\n\n### Description\nUsers want a dark theme.\n\n### Proposed Tasks\n- [ ] Add theme toggle"}
]"###;

fn corpus_model(backend: Backend) -> TemplateModel {
    let examples = read_examples(CORPUS_JSON.as_bytes()).unwrap();
    let mut model = TemplateModel::new(ModelConfig::new().with_backend(backend)).unwrap();
    model.train_examples(&examples).unwrap();
    model
}

#[test]
fn single_example_scenario() {
    let mut model: TemplateModel = TemplateModel::new(ModelConfig::default()).unwrap();
    model
        .train(vec!["crash on login".to_string()], vec![LOGIN_OUTPUT.to_string()])
        .unwrap();
    let out = model.predict("crash on login").unwrap();

    assert!(out.starts_with("## Bug Report: Crash On Login"));
    let doc = Document::parse(&out);
    let idx = doc.section_content_line("Description").unwrap();
    assert_eq!(doc.lines()[idx].text(), "crash on login");
    assert!(out.ends_with("### Proposed Tasks\n- [ ] task"));
}

#[test]
fn prediction_is_deterministic() {
    let model = corpus_model(Backend::Default);
    for q in ["login crashes", "dark mode please", "db timeout", "nothing in common"] {
        assert_eq!(model.predict(q).unwrap(), model.predict(q).unwrap());
    }
}

#[test]
fn nearest_template_is_adapted() {
    let model = corpus_model(Backend::Default);
    let out = model.predict("database connection times out on startup").unwrap();
    assert!(out.starts_with("## Bug Report: Database Connection Times Out On Startup\n"));
    assert!(out.contains("\n### Description\ndatabase connection times out on startup\n"));
    // untouched structure from the template
    assert!(out.contains("```\nTimeoutError\n```"));
    assert!(out.ends_with("- [ ] Tune pool size"));
}

#[test]
fn unrelated_query_gets_fallback_skeleton() {
    let model = corpus_model(Backend::Default);
    let out = model.predict("zzz qqq").unwrap();
    for section in [
        "Environment",
        "Steps to Reproduce",
        "Expected Behavior",
        "Actual Behavior",
        "Error Logs",
        "Proposed Tasks",
    ] {
        assert!(out.contains(&format!("### {section}")), "missing {section}");
    }
    assert_eq!(out.matches("- [ ]").count(), 5);
}

#[test]
fn long_input_title_is_truncated() {
    let model = corpus_model(Backend::Default);
    let raw = "app crashes on login button tap when the network drops mid way";
    let raw = format!("{raw}{}", " x".repeat(40))[..80].to_string();
    assert_eq!(raw.chars().count(), 80);
    let out = model.predict(&raw).unwrap();
    let heading = out.lines().next().unwrap();
    let title = heading.strip_prefix("## Bug Report: ").unwrap();
    assert_eq!(title.chars().count(), 60);
    assert!(title.ends_with("..."));
}

#[test]
fn save_load_round_trip_through_file() {
    let model = corpus_model(Backend::Default);
    let mut file = tempfile::tempfile().unwrap();
    model.save(&mut file).unwrap();
    file.flush().unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    let restored: TemplateModel = TemplateModel::load(&mut file, Backend::Default).unwrap();

    for q in ["login crashes", "dark mode please", "db timeout", "nothing in common"] {
        assert_eq!(restored.predict(q).unwrap(), model.predict(q).unwrap());
    }
}

#[test]
fn corrupted_vector_width_fails_to_load() {
    let model = corpus_model(Backend::Default);
    let mut data = model.to_data().unwrap();
    data.training_vectors[0].push(0.0);
    let bytes = serde_cbor::to_vec(&data).unwrap();
    let err = TemplateModel::<issue_templater::DefaultTFIDFEngine>::from_bytes(&bytes, Backend::Default).unwrap_err();
    assert!(matches!(err, TemplaterError::DimensionMismatch { row: 0, .. }));
}

#[test]
fn accelerated_backend_gives_identical_output() {
    let plain = corpus_model(Backend::Default);
    let fast = corpus_model(Backend::Accelerated);
    let queries = ["login crashes", "dark mode please", "db timeout", "nothing in common"];
    assert_eq!(plain.predict_batch(&queries).unwrap(), fast.predict_batch(&queries).unwrap());
    assert_eq!(plain.to_data().unwrap(), fast.to_data().unwrap());
}

#[test]
fn evaluation_on_held_out_examples() {
    let model = corpus_model(Backend::Default);
    let held_out = vec![TrainingExample::new("login button crashes app", "")];
    let inputs: Vec<&str> = held_out.iter().map(|e| e.input.as_str()).collect();
    let outputs: Vec<&str> = held_out.iter().map(|e| e.output.as_str()).collect();
    let report = model.evaluate(&inputs, &outputs).unwrap();
    assert_eq!(report.structural_accuracy, 1.0);
    // Description, Steps to Reproduce, Proposed Tasks
    assert!((report.avg_section_coverage - 0.5).abs() < 1e-12);
}
