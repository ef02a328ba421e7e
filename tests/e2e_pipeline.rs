//! End-to-end pipeline tests: parse → validate → compile → read back.

mod helpers;

use bankc::artifact::{Artifact, FLAG_NAMES_STRIPPED, SOURCE_SOUND};
use bankc::compile::{self, CompileOptions};
use bankc::parse;
use bankc::validate;
use helpers::*;

#[test]
fn end_to_end_minimal_project() {
    let json = include_str!("fixtures/example_project.json");
    let project = parse::parse(json).expect("should parse");
    let validated = validate::validate(&project).expect("should validate");

    let bytes = compile::compile(&validated, &CompileOptions::default());
    let artifact = Artifact::parse(&bytes).expect("should read back");

    assert_eq!(artifact.mix_buses.len(), 1);
    assert_eq!(artifact.event_groups.len(), 1);
    assert_eq!(artifact.events.len(), 1);
    assert_eq!(artifact.sounds.len(), 1);
    assert_eq!(artifact.sound_groups.len(), 0);
    assert_eq!(artifact.wave_banks.len(), 1);
    assert_eq!(artifact.mix_presets.len(), 1);

    let bus = &artifact.mix_buses[0];
    assert_eq!(bus.name, "master");
    assert!(bus.children.is_empty());

    let event = &artifact.events[0];
    assert_eq!(event.name, "explosion");
    assert_eq!(event.bus, 0);
    assert_eq!(event.sources, vec![(SOURCE_SOUND, 0)]);

    let group = &artifact.event_groups[0];
    assert_eq!(group.events, vec![0]);

    assert_eq!(artifact.sounds[0].waves, vec![(0, 0)]);
    assert_eq!(artifact.wave_banks[0].entries[0].path, "explosion.wav");

    assert_eq!(artifact.default_preset, 0);
    let preset = &artifact.mix_presets[0];
    assert!(preset.is_default);
    assert_eq!(preset.parameters[0].bus, 0);
    assert_eq!(preset.parameters[0].left_gain, 0.8);
}

#[test]
fn compilation_is_deterministic() {
    let p = minimal_project();
    let validated = validate::validate(&p).expect("should validate");
    let first = compile::compile(&validated, &CompileOptions::default());
    let second = compile::compile(&validated, &CompileOptions::default());
    assert_eq!(first, second);

    // A fresh validation of the same graph also yields identical bytes.
    let revalidated = validate::validate(&p).expect("should validate");
    let third = compile::compile(&revalidated, &CompileOptions::default());
    assert_eq!(first, third);
}

#[test]
fn duplicate_sound_group_ids_fail_with_one_violation() {
    let json = include_str!("fixtures/duplicate_sound_groups.json");
    let project = parse::parse(json).expect("should parse");
    let violations = validate::validate(&project).expect_err("should fail");

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code, "V001");
    assert!(violations[0].message.contains("sound group"));
    assert!(violations[0].message.contains("'sg1'"));
}

#[test]
fn dangling_bus_reference_names_the_target() {
    let json = include_str!("fixtures/dangling_bus_ref.json");
    let project = parse::parse(json).expect("should parse");
    let violations = validate::validate(&project).expect_err("should fail");

    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.contains("'nonexistent'"));
}

#[test]
fn empty_project_compiles_to_minimal_artifact() {
    let json = include_str!("fixtures/empty_project.json");
    let project = parse::parse(json).expect("should parse");
    let validated = validate::validate(&project).expect("should validate");

    let bytes = compile::compile(&validated, &CompileOptions::default());
    let artifact = Artifact::parse(&bytes).expect("should read back");

    assert_eq!(artifact.events.len(), 0);
    assert_eq!(artifact.wave_banks.len(), 0);
    assert_eq!(artifact.sounds.len(), 0);
    assert_eq!(artifact.mix_buses.len(), 1);
    assert_eq!(artifact.event_groups.len(), 1);
    assert_eq!(artifact.mix_presets.len(), 1);
}

#[test]
fn strip_names_clears_strings_but_not_indices() {
    let p = minimal_project();
    let validated = validate::validate(&p).expect("should validate");

    let full = Artifact::parse(&compile::compile(&validated, &CompileOptions::default()))
        .expect("should read back");
    let stripped_bytes = compile::compile(
        &validated,
        &CompileOptions { strip_names: true },
    );
    let stripped = Artifact::parse(&stripped_bytes).expect("should read back");

    assert_eq!(stripped.flags & FLAG_NAMES_STRIPPED, FLAG_NAMES_STRIPPED);
    assert_eq!(stripped.mix_buses[0].name, "");
    assert_eq!(stripped.events[0].name, "");
    assert_eq!(stripped.wave_banks[0].entries[0].path, "");

    assert_eq!(stripped.events[0].bus, full.events[0].bus);
    assert_eq!(stripped.events[0].sources, full.events[0].sources);
    assert_eq!(stripped.sounds[0].waves, full.sounds[0].waves);
    assert_eq!(stripped.default_preset, full.default_preset);
    assert_eq!(stripped.mix_buses.len(), full.mix_buses.len());
}

#[test]
fn write_artifact_appends_extension_and_round_trips() {
    let p = minimal_project();
    let validated = validate::validate(&p).expect("should validate");

    let dir = std::env::temp_dir().join(format!("bankc-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");

    let written = compile::write_artifact(&validated, &dir.join("demo"), &CompileOptions::default())
        .expect("should write");
    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("abf"));

    let bytes = std::fs::read(&written).expect("should read");
    assert_eq!(bytes, compile::compile(&validated, &CompileOptions::default()));

    // A dotted stem keeps its dots and still gets the artifact extension.
    let dotted =
        compile::write_artifact(&validated, &dir.join("game.proj"), &CompileOptions::default())
            .expect("should write");
    assert_eq!(
        dotted.file_name().and_then(|n| n.to_str()),
        Some("game.proj.abf")
    );

    // An explicit artifact extension is left alone.
    let explicit =
        compile::write_artifact(&validated, &dir.join("keep.abf"), &CompileOptions::default())
            .expect("should write");
    assert_eq!(
        explicit.file_name().and_then(|n| n.to_str()),
        Some("keep.abf")
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn write_artifact_surfaces_io_failure_with_path() {
    let p = minimal_project();
    let validated = validate::validate(&p).expect("should validate");

    let target = std::env::temp_dir()
        .join(format!("bankc-missing-{}", std::process::id()))
        .join("nested")
        .join("demo");
    let err = compile::write_artifact(&validated, &target, &CompileOptions::default())
        .expect_err("should fail");
    assert!(err.to_string().contains("failed to write artifact"));
    assert!(err.to_string().contains("demo.abf"));
}
