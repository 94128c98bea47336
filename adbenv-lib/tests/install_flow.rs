mod common;

use adbenv_lib::{AdbEnvError, Config, Installer};
use common::{platform_tools_zip, profile_dir, tree, FixedArchive, MemoryEnvStore, StatusSource};
use std::fs;

#[tokio::test]
async fn install_extracts_tools_and_registers_path() {
    let tmp = tempfile::tempdir().unwrap();
    let (profile, target) = profile_dir(&tmp);

    let installer = Installer::new(
        Config::default(),
        FixedArchive::new(platform_tools_zip()),
        MemoryEnvStore::new(r"C:\Windows;C:\Windows\System32"),
    );

    let report = installer.install(&profile).await.unwrap();

    assert_eq!(report.target_dir, target);
    assert!(report.path_updated);
    assert_eq!(report.extracted.files, 3);
    assert_eq!(
        tree(&target),
        vec!["adb.exe", "fastboot.exe", "lib64/", "lib64/libc++.so"]
    );
    assert!(!target.join("platform-tools.zip").exists());
    assert_eq!(
        fs::read_to_string(target.join("adb.exe")).unwrap(),
        "adb"
    );
}

#[tokio::test]
async fn install_appends_entry_to_existing_path() {
    let tmp = tempfile::tempdir().unwrap();
    let (profile, _) = profile_dir(&tmp);
    let store = MemoryEnvStore::new(r"C:\Windows;C:\Tools");

    let installer = Installer::new(
        Config::default(),
        FixedArchive::new(platform_tools_zip()),
        store,
    );
    installer.install(&profile).await.unwrap();

    let status = installer.status(&profile).unwrap();
    assert!(status.on_path);
    assert!(status.installed);
    assert_eq!(status.file_count, 3);
}

#[tokio::test]
async fn reinstall_keeps_path_and_replaces_files() {
    let tmp = tempfile::tempdir().unwrap();
    let (profile, target) = profile_dir(&tmp);

    let installer = Installer::new(
        Config::default(),
        FixedArchive::new(platform_tools_zip()),
        MemoryEnvStore::new(r"C:\Windows;%USERPROFILE%\.adb-env"),
    );

    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("stale.txt"), "left over").unwrap();

    let report = installer.install(&profile).await.unwrap();
    assert!(!report.path_updated);
    assert!(!target.join("stale.txt").exists());

    let again = installer.install(&profile).await.unwrap();
    assert!(!again.path_updated);
    assert_eq!(
        tree(&target),
        vec!["adb.exe", "fastboot.exe", "lib64/", "lib64/libc++.so"]
    );
}

#[tokio::test]
async fn empty_profile_aborts_before_any_work() {
    let source = FixedArchive::new(platform_tools_zip());
    let store = MemoryEnvStore::new("");
    let installer = Installer::new(Config::default(), source, store);

    let err = installer.install("").await.unwrap_err();

    assert!(matches!(err, AdbEnvError::MissingUserProfile));
    assert!(err.to_string().contains("USERPROFILE"));
}

#[tokio::test]
async fn empty_profile_never_fetches_or_touches_registry() {
    let source = FixedArchive::new(platform_tools_zip());
    let store = MemoryEnvStore::new("");

    let installer = Installer::new(Config::default(), &source, &store);
    assert!(installer.install("").await.is_err());

    assert_eq!(source.calls(), 0);
    assert!(!store.touched());
}

#[tokio::test]
async fn non_200_status_leaves_no_extracted_files() {
    let tmp = tempfile::tempdir().unwrap();
    let (profile, target) = profile_dir(&tmp);
    let store = MemoryEnvStore::new(r"C:\Windows");

    let installer = Installer::new(Config::default(), StatusSource(404), &store);
    let err = installer.install(&profile).await.unwrap_err();

    assert!(matches!(err, AdbEnvError::HttpStatus(404)));
    assert_eq!(err.to_string(), "Server returned non-200 status code: 404");
    assert!(target.is_dir());
    assert!(!target.join("adb.exe").exists());
    assert!(!store.touched());
    assert_eq!(store.value(), r"C:\Windows");
}

#[tokio::test]
async fn corrupt_archive_aborts_before_registry() {
    let tmp = tempfile::tempdir().unwrap();
    let (profile, _) = profile_dir(&tmp);
    let store = MemoryEnvStore::new(r"C:\Windows");

    let installer = Installer::new(
        Config::default(),
        FixedArchive::new(b"definitely not a zip".to_vec()),
        &store,
    );
    let err = installer.install(&profile).await.unwrap_err();

    assert!(matches!(err, AdbEnvError::Archive(_)));
    assert!(!store.touched());
}

#[tokio::test]
async fn uninstall_removes_directory_and_entry() {
    let tmp = tempfile::tempdir().unwrap();
    let (profile, target) = profile_dir(&tmp);
    let store = MemoryEnvStore::new(r"C:\Windows");

    let installer = Installer::new(
        Config::default(),
        FixedArchive::new(platform_tools_zip()),
        &store,
    );
    installer.install(&profile).await.unwrap();
    assert_eq!(store.value(), r"C:\Windows;%USERPROFILE%\.adb-env");

    let report = installer.uninstall(&profile).unwrap();
    assert!(report.removed_dir);
    assert!(report.path_updated);
    assert!(!target.exists());
    assert_eq!(store.value(), r"C:\Windows");

    let again = installer.uninstall(&profile).unwrap();
    assert!(!again.removed_dir);
    assert!(!again.path_updated);
}

#[test]
fn status_of_fresh_profile() {
    let tmp = tempfile::tempdir().unwrap();
    let (profile, target) = profile_dir(&tmp);

    let installer = Installer::new(
        Config::default(),
        StatusSource(500),
        MemoryEnvStore::new(""),
    );
    let status = installer.status(&profile).unwrap();

    assert_eq!(status.target_dir, target);
    assert!(!status.installed);
    assert_eq!(status.file_count, 0);
    assert!(!status.on_path);
}

#[tokio::test]
async fn status_and_uninstall_work_without_an_archive_source() {
    let tmp = tempfile::tempdir().unwrap();
    let (profile, target) = profile_dir(&tmp);
    let store = MemoryEnvStore::new(r"C:\Windows;%USERPROFILE%\.adb-env");
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("adb.exe"), "adb").unwrap();

    let installer = Installer::new(Config::default(), (), &store);

    let status = installer.status(&profile).unwrap();
    assert!(status.installed);
    assert!(status.on_path);
    assert_eq!(status.file_count, 1);

    let report = installer.uninstall(&profile).unwrap();
    assert!(report.removed_dir);
    assert_eq!(store.value(), r"C:\Windows");
}
