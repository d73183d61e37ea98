// ABOUTME: Integration tests for composite package rearrangement.
// ABOUTME: Covers staging, library merging, routing, and failure modes.

mod support;

use skylift::deploy::{rearrange, DeployError};
use skylift::package::{Package, StagingArea};
use skylift::types::ModuleName;
use support::fixtures;
use tempfile::TempDir;

fn module(name: &str) -> ModuleName {
    ModuleName::new(name).unwrap()
}

#[test]
fn plain_package_registers_as_implicit_default() {
    let dir = TempDir::new().unwrap();
    fixtures::write_unit(dir.path(), Some("acme-app"), None);

    let package = Package::open(dir.path()).unwrap();
    let staging = StagingArea::new().unwrap();
    let registry = rearrange(&package, &staging).unwrap();

    assert_eq!(registry.names(), vec!["default"]);
    // No staging happens for a plain package: it deploys from its root.
    assert_eq!(registry.get(&module("default")), Some(package.root()));
}

#[test]
fn composite_stages_each_web_module_with_shared_libraries() {
    let dir = TempDir::new().unwrap();
    fixtures::write_composite_descriptor(
        dir.path(),
        None,
        &[Some("frontend.war"), Some("worker.war")],
    );
    fixtures::write_unit(&dir.path().join("frontend.war"), None, None);
    fixtures::write_unit(&dir.path().join("worker.war"), None, Some("worker"));
    fixtures::write_library(dir.path(), "lib", "shared.jar");
    fixtures::write_library(dir.path(), "lib", "common.jar");

    let package = Package::open(dir.path()).unwrap();
    let staging = StagingArea::new().unwrap();
    let registry = rearrange(&package, &staging).unwrap();

    assert_eq!(registry.names(), vec!["default", "worker"]);

    let frontend = registry.get(&module("default")).unwrap();
    assert_eq!(frontend, staging.root().join("frontend.war"));
    assert!(frontend.join("WEB-INF/appengine-web.xml").is_file());
    assert!(frontend.join("WEB-INF/lib/shared.jar").is_file());
    assert!(frontend.join("WEB-INF/lib/common.jar").is_file());

    let worker = registry.get(&module("worker")).unwrap();
    assert!(worker.join("WEB-INF/lib/shared.jar").is_file());
}

#[test]
fn declared_library_directory_wins_over_fallback() {
    let dir = TempDir::new().unwrap();
    fixtures::write_composite_descriptor(dir.path(), Some("shared-libs"), &[Some("app.war")]);
    fixtures::write_unit(&dir.path().join("app.war"), None, None);
    fixtures::write_library(dir.path(), "shared-libs", "declared.jar");
    fixtures::write_library(dir.path(), "lib", "ignored.jar");

    let package = Package::open(dir.path()).unwrap();
    let staging = StagingArea::new().unwrap();
    let registry = rearrange(&package, &staging).unwrap();

    let staged = registry.get(&module("default")).unwrap();
    assert!(staged.join("WEB-INF/lib/declared.jar").is_file());
    assert!(!staged.join("WEB-INF/lib/ignored.jar").exists());
}

#[test]
fn modules_without_web_facet_are_dropped() {
    let dir = TempDir::new().unwrap();
    fixtures::write_composite_descriptor(dir.path(), None, &[None, Some("app.war")]);
    fixtures::write_unit(&dir.path().join("app.war"), None, Some("web"));

    let package = Package::open(dir.path()).unwrap();
    let staging = StagingArea::new().unwrap();
    let registry = rearrange(&package, &staging).unwrap();

    assert_eq!(registry.names(), vec!["web"]);
}

#[test]
fn duplicate_module_names_abort_the_pass() {
    let dir = TempDir::new().unwrap();
    fixtures::write_composite_descriptor(dir.path(), None, &[Some("a.war"), Some("b.war")]);
    fixtures::write_unit(&dir.path().join("a.war"), None, Some("web"));
    fixtures::write_unit(&dir.path().join("b.war"), None, Some("web"));

    let package = Package::open(dir.path()).unwrap();
    let staging = StagingArea::new().unwrap();
    let err = rearrange(&package, &staging).unwrap_err();

    match err {
        DeployError::DuplicateModule { name, existing } => {
            assert_eq!(name, "web");
            assert!(existing.contains("a.war"));
        }
        other => panic!("expected DuplicateModule, got {other:?}"),
    }
    // The collision is caught before any unit is copied.
    assert_eq!(std::fs::read_dir(staging.root()).unwrap().count(), 0);
}

#[test]
fn two_unnamed_units_collide_on_default() {
    let dir = TempDir::new().unwrap();
    fixtures::write_composite_descriptor(dir.path(), None, &[Some("a.war"), Some("b.war")]);
    fixtures::write_unit(&dir.path().join("a.war"), None, None);
    fixtures::write_unit(&dir.path().join("b.war"), None, None);

    let package = Package::open(dir.path()).unwrap();
    let staging = StagingArea::new().unwrap();
    let err = rearrange(&package, &staging).unwrap_err();

    assert!(matches!(err, DeployError::DuplicateModule { .. }));
    assert_eq!(std::fs::read_dir(staging.root()).unwrap().count(), 0);
}

#[test]
fn web_uri_escaping_the_package_is_rejected() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("pkg");
    fixtures::write_composite_descriptor(&root, None, &[Some("../outside")]);
    fixtures::write_unit(&dir.path().join("outside"), None, None);

    let package = Package::open(&root).unwrap();
    let staging = StagingArea::new().unwrap();
    let err = rearrange(&package, &staging).unwrap_err();

    match err {
        DeployError::Io(e) => assert!(e.to_string().contains("escapes")),
        other => panic!("expected Io, got {other:?}"),
    }
    assert_eq!(std::fs::read_dir(staging.root()).unwrap().count(), 0);
}

#[test]
fn unit_without_descriptor_is_an_error() {
    let dir = TempDir::new().unwrap();
    fixtures::write_composite_descriptor(dir.path(), None, &[Some("bare.war")]);
    fixtures::write_bare_unit(&dir.path().join("bare.war"));

    let package = Package::open(dir.path()).unwrap();
    let staging = StagingArea::new().unwrap();
    let err = rearrange(&package, &staging).unwrap_err();

    match err {
        DeployError::MissingUnitDescriptor { unit, .. } => assert_eq!(unit, "bare.war"),
        other => panic!("expected MissingUnitDescriptor, got {other:?}"),
    }
}

#[test]
fn declared_but_absent_unit_is_an_error() {
    let dir = TempDir::new().unwrap();
    fixtures::write_composite_descriptor(dir.path(), None, &[Some("ghost.war")]);

    let package = Package::open(dir.path()).unwrap();
    let staging = StagingArea::new().unwrap();
    let err = rearrange(&package, &staging).unwrap_err();

    match err {
        DeployError::Configuration(msg) => assert!(msg.contains("ghost.war")),
        other => panic!("expected Configuration, got {other:?}"),
    }
}

#[test]
fn malformed_composite_descriptor_is_reported_with_its_path() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("META-INF")).unwrap();
    std::fs::write(
        dir.path().join("META-INF/application.xml"),
        "<application><module></mismatch></application>",
    )
    .unwrap();

    let package = Package::open(dir.path()).unwrap();
    let staging = StagingArea::new().unwrap();
    let err = rearrange(&package, &staging).unwrap_err();

    match err {
        DeployError::MalformedDescriptor { path, .. } => {
            assert_eq!(path, "META-INF/application.xml");
        }
        other => panic!("expected MalformedDescriptor, got {other:?}"),
    }
}

#[test]
fn invalid_module_name_in_unit_descriptor_is_rejected() {
    let dir = TempDir::new().unwrap();
    fixtures::write_composite_descriptor(dir.path(), None, &[Some("app.war")]);
    fixtures::write_unit(&dir.path().join("app.war"), None, Some("Bad Name"));

    let package = Package::open(dir.path()).unwrap();
    let staging = StagingArea::new().unwrap();
    let err = rearrange(&package, &staging).unwrap_err();

    assert!(matches!(err, DeployError::Configuration(_)));
}
