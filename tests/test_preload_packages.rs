//! Preloading from an installed packages directory.

use std::fs;
use std::path::{Path, PathBuf};

use autoload::{Autoloader, LoadCollector, PreloadConfig, Preloader};
use rstest::{fixture, rstest};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, source: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, source).unwrap();
}

fn real(path: &Path) -> PathBuf {
    path.canonicalize().unwrap()
}

/// A vendor directory with two runtime packages, one dev package, and
/// view templates that must never be scanned.
#[fixture]
fn vendor() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "debug/src/Debugger.php", "<?php\nnamespace Acme\\Debug;\n\nclass Debugger\n{\n}\n");
    write(root, "debug/src/Views/panel.php", "<?php\nnamespace Acme\\Debug\\Views;\nclass Panel {}\n");
    write(root, "log/src/Logger.php", "<?php\nnamespace Acme\\Log;\n\nclass Logger\n{\n}\n");
    write(root, "coding-standard/src/Config.php", "<?php\nnamespace Acme\\CodingStandard;\n\nclass Config\n{\n}\n");
    write(root, "debug/tests/DebuggerTest.php", "<?php\nnamespace Tests\\Debug;\n\nclass DebuggerTest\n{\n}\n");
    dir
}

fn config(vendor: &TempDir) -> PreloadConfig {
    PreloadConfig::new()
        .with_packages_dir(vendor.path())
        .with_package_namespaces(["Acme\\Debug", "Acme\\Log"])
        .with_dev_namespaces(["Acme\\CodingStandard"])
        .with_excluded_paths(["/src/Views/"])
}

#[rstest]
fn test_packages_dir_is_canonical(vendor: TempDir) {
    let preloader = Preloader::new(Autoloader::new(), config(&vendor)).unwrap();

    let dir = preloader.packages_dir().unwrap();
    assert!(dir.to_string_lossy().ends_with(std::path::MAIN_SEPARATOR));
    assert_eq!(real(dir), real(vendor.path()));
}

#[rstest]
fn test_list_packages_files(vendor: TempDir) {
    let mut preloader = Preloader::new(Autoloader::new(), config(&vendor)).unwrap();

    let files = preloader.list_packages_files();
    assert_eq!(
        files,
        vec![
            real(&vendor.path().join("debug/src/Debugger.php")),
            real(&vendor.path().join("log/src/Logger.php")),
        ]
    );
    let autoloader = preloader.autoloader();
    assert!(autoloader.override_path("Acme\\Debug\\Debugger").is_some());
    assert!(autoloader.override_path("Acme\\Debug\\Views\\Panel").is_none());
    assert!(autoloader.override_path("Acme\\CodingStandard\\Config").is_none());
    assert!(autoloader.override_path("Tests\\Debug\\DebuggerTest").is_none());
}

#[rstest]
fn test_packages_need_opt_in(vendor: TempDir) {
    let mut preloader = Preloader::new(Autoloader::new(), config(&vendor)).unwrap();
    assert!(preloader.list_files().is_empty());

    let files = preloader.with_packages().list_files();
    assert!(files.contains(&real(&vendor.path().join("debug/src/Debugger.php"))));
    assert!(!files.contains(&real(&vendor.path().join("coding-standard/src/Config.php"))));
    assert!(preloader.autoloader().override_path("Acme\\CodingStandard\\Config").is_none());

    let files = preloader.with_dev_packages().list_files();
    let config_file = real(&vendor.path().join("coding-standard/src/Config.php"));
    assert!(files.contains(&config_file));
    assert_eq!(
        preloader.autoloader().override_path("Acme\\CodingStandard\\Config"),
        Some(config_file.as_path())
    );
}

#[rstest]
fn test_list_files_mixes_namespaces_and_packages(vendor: TempDir) {
    let app = tempfile::tempdir().unwrap();
    write(app.path(), "Kernel.php", "<?php\nnamespace App;\n\nclass Kernel\n{\n}\n");
    write(app.path(), "bootstrap.php", "<?php\nreturn new App\\Kernel();\n");

    let mut autoloader = Autoloader::new();
    autoloader.set_namespace("App", [app.path()]).unwrap();
    let mut preloader = Preloader::new(autoloader, config(&vendor)).unwrap();

    let files = preloader.with_packages().list_files();
    assert_eq!(
        files,
        {
            let mut expected = vec![
                real(&app.path().join("Kernel.php")),
                real(&vendor.path().join("debug/src/Debugger.php")),
                real(&vendor.path().join("log/src/Logger.php")),
            ];
            expected.sort();
            expected
        }
    );
}

#[rstest]
fn test_load_materializes_each_file_once(vendor: TempDir) {
    let mut preloader = Preloader::new(Autoloader::new(), config(&vendor)).unwrap();
    preloader.with_packages();

    let mut seen: Vec<PathBuf> = Vec::new();
    let loaded = preloader.load(&mut |file: &Path| seen.push(file.to_path_buf()));

    assert_eq!(loaded.len(), 2);
    assert_eq!(seen, loaded);
}

#[rstest]
fn test_autoload_after_preload_is_recorded(vendor: TempDir) {
    let mut preloader = Preloader::new(Autoloader::new(), config(&vendor)).unwrap();
    preloader.list_packages_files();

    let mut autoloader = preloader.into_autoloader();
    autoloader.set_collector(LoadCollector::new("default"));
    let mut hook = |_: &Path| {};
    assert!(autoloader.load("\\Acme\\Log\\Logger", &mut hook));
    assert!(!autoloader.load("Acme\\Log\\Missing", &mut hook));

    let collector = autoloader.take_collector().unwrap();
    let file = real(&vendor.path().join("log/src/Logger.php"));
    assert_eq!(
        collector.record_by_file(&file).map(|r| r.symbol.as_str()),
        Some("Acme\\Log\\Logger")
    );
    assert_eq!(collector.records().iter().filter(|r| r.loaded).count(), 1);
}
