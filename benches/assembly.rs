//! Benchmarks for form updates, assembly and wire serialization
//!
//! Covers the per-submission work done before the network call:
//! - Applying a full set of operator edits to a fresh form
//! - Assembling CBS and ETWS requests
//! - Serializing the request document to JSON
//!
//! Platform: Cross-platform (no backend required)

use criterion::{Criterion, criterion_group, criterion_main};
use ecbe::{FormField, FormState, MessageType, assemble};
use std::hint::black_box;

fn cbs_form() -> FormState {
    FormState::new(MessageType::Cbs)
        .update_all([
            (FormField::MessageId, "4370"),
            (FormField::GeographicScope, "cell_wide"),
            (FormField::CharacterSet, "ucs2"),
            (FormField::Text, "Evacuate coastal areas immediately. Move to higher ground."),
        ])
        .expect("valid CBS edits")
}

fn etws_form() -> FormState {
    FormState::new(MessageType::Etws)
        .update_all([
            (FormField::MessageId, "4354"),
            (FormField::WarningType, "earthquake_and_tsuname"),
        ])
        .expect("valid ETWS edits")
}

fn bench_form_updates(c: &mut Criterion) {
    c.bench_function("form_update_all_cbs", |b| b.iter(|| black_box(cbs_form())));
}

fn bench_assembly(c: &mut Criterion) {
    let cbs = cbs_form();
    let etws = etws_form();

    let mut group = c.benchmark_group("assemble");
    group.bench_function("cbs", |b| b.iter(|| black_box(assemble(black_box(&cbs)))));
    group.bench_function("etws", |b| b.iter(|| black_box(assemble(black_box(&etws)))));
    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let request = assemble(&cbs_form()).expect("assembled request");

    c.bench_function("serialize_cbs_request", |b| {
        b.iter(|| black_box(serde_json::to_vec(black_box(&request)).expect("serializable")))
    });
}

criterion_group!(benches, bench_form_updates, bench_assembly, bench_serialization);
criterion_main!(benches);
