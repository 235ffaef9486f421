//! Aggregate change detection semantics.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{ScriptedPlugin, Signal};
use dataform::ChangeDetector;
use dataform_fields::{EntryContents, FieldDescriptor, FieldPluginRegistry, FormControl};

fn detector(plugins: Vec<ScriptedPlugin>) -> ChangeDetector {
    let mut registry = FieldPluginRegistry::new();
    for plugin in plugins {
        registry.register(Arc::new(plugin)).unwrap();
    }
    ChangeDetector::new(Arc::new(registry))
}

fn fields(types: &[&str]) -> Vec<FieldDescriptor> {
    types
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let id = i as i64 + 1;
            FieldDescriptor::new(id, format!("field{id}"), *t)
        })
        .collect()
}

async fn check(detector: &ChangeDetector, fields: &[FieldDescriptor]) -> bool {
    detector
        .has_changed(fields, &Vec::<FormControl>::new(), &EntryContents::new())
        .await
}

#[test_log::test(tokio::test)]
async fn all_unchanged_reports_false() {
    let detector = detector(vec![
        ScriptedPlugin::new("a").delayed(10),
        ScriptedPlugin::new("b"),
    ]);
    let fields = fields(&["a", "b", "unregistered"]);
    assert!(!check(&detector, &fields).await);
}

#[test_log::test(tokio::test)]
async fn one_change_reports_true() {
    let detector = detector(vec![
        ScriptedPlugin::new("a"),
        ScriptedPlugin::new("b").delayed(10).signal(Signal::Changed),
        ScriptedPlugin::new("c").delayed(20),
    ]);
    assert!(check(&detector, &fields(&["a", "b", "c"])).await);
}

#[test_log::test(tokio::test)]
async fn failed_check_counts_as_change() {
    let detector = detector(vec![
        ScriptedPlugin::new("a"),
        ScriptedPlugin::new("b").signal(Signal::Fails),
    ]);
    assert!(check(&detector, &fields(&["a", "b"])).await);
}

#[test_log::test(tokio::test)]
async fn change_does_not_wait_for_unrelated_fields() {
    let detector = detector(vec![
        ScriptedPlugin::new("stuck").signal(Signal::Hangs),
        ScriptedPlugin::new("changed")
            .delayed(5)
            .signal(Signal::Changed),
    ]);
    let fields = fields(&["stuck", "changed"]);

    let answer = tokio::time::timeout(Duration::from_secs(5), check(&detector, &fields))
        .await
        .expect("change detection waited on a field that never resolves");
    assert!(answer);
}
