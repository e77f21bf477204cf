#![no_main]

use chrono::{TimeZone, Utc};
use flowstate_core::config::LinksConfig;
use flowstate_core::dataset::ActivityDataset;
use flowstate_core::extract::DateRange;
use flowstate_core::summary::{Dashboard, WorkflowDetail};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(dataset) = ActivityDataset::from_json_str(text) else {
        return;
    };

    // Inference is total: any dataset that parses must summarize without panicking.
    let now = Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0).unwrap();
    let links = LinksConfig::default();
    let _ = dataset.validate();
    for range in DateRange::ALL {
        let dashboard = Dashboard::build(&dataset, &links, range, now);
        let _ = dashboard.counts();
    }
    for workflow in &dataset.workflows {
        let _ = WorkflowDetail::compute(&dataset, &workflow.id, &links, now);
    }
});
