use issue_templater::{ModelConfig, TemplateModel, TrainingExample};

fn main() {
    // build a tiny corpus
    let examples = vec![
        TrainingExample::new(
            "App crashes on login button tap",
            "## Bug Report: App Crashes on Login Button Tap\n\n### Description\nThe app crashes on login.\n\n### Proposed Tasks\n- [ ] Investigate crash logs\n- [ ] Add tests",
        ),
        TrainingExample::new(
            "Search feature returns no results",
            "## Bug Report: Search Returns No Results\n\n### Description\nSearch is always empty.\n\n### Proposed Tasks\n- [ ] Check the search index",
        ),
    ];

    let mut model: TemplateModel = TemplateModel::new(ModelConfig::default()).expect("valid config");
    let report = model.train_examples(&examples).expect("training");
    println!("{report}");

    for raw in ["Login button crashes the app", "Dark mode colors are wrong on settings page"] {
        println!("Input: {raw}\n{}", "-".repeat(60));
        println!("{}", model.predict(raw).expect("trained model"));
        // debug
        println!("{:#?}\n", model.neighbors(raw).expect("trained model"));
    }
}
