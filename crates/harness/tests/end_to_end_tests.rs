//! End-to-end scenario: provision a tool from a stubbed distribution
//! server, prepare a fixture workspace, run the tool and inspect the
//! report.

#![cfg(unix)]

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};

use toolchest_harness::{ProcessRunner, WorkspaceManager};
use toolchest_provision::{Result, ToolKind, ToolProvisioner, Transport};

/// Serves one pre-built archive from disk.
struct StubTransport {
    archive: PathBuf,
}

#[async_trait]
impl Transport for StubTransport {
    async fn fetch(&self, _uri: &str, dest: &Path) -> Result<()> {
        tokio::fs::copy(&self.archive, dest).await?;
        Ok(())
    }
}

fn create_tool_zip(dir: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
    let zip_path = dir.join("distribution.zip");
    let file = std::fs::File::create(&zip_path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default().unix_permissions(0o755);

    for (path, content) in entries {
        writer.start_file(*path, options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap();
    zip_path
}

#[tokio::test]
async fn echo_fixture_reports_status_and_captured_lines() {
    let temp = tempfile::TempDir::new().unwrap();

    // A "gradle" distribution whose launcher echoes and fails.
    let archive = create_tool_zip(
        temp.path(),
        &[(
            "gradle-1.2.3/bin/gradle",
            b"#!/bin/sh\necho hello\nexit 1\n" as &[u8],
        )],
    );

    let provisioner = ToolProvisioner::with_transport(
        temp.path().join("test-tools"),
        temp.path().to_path_buf(),
        Box::new(StubTransport { archive }),
    );
    let executable = provisioner
        .provision(ToolKind::Gradle, "1.2.3")
        .await
        .unwrap();
    assert!(executable.is_absolute());

    // Fixture template with a build file the tool would consume.
    let projects = temp.path().join("projects");
    std::fs::create_dir_all(projects.join("demo")).unwrap();
    std::fs::write(projects.join("demo/build.gradle"), "// demo").unwrap();

    let manager = WorkspaceManager::new(temp.path().join("test-workspace"), projects);
    let workspace = manager.prepare("demo").unwrap();

    let report = ProcessRunner::new()
        .run(&workspace, &executable, &["build"])
        .await
        .unwrap();

    assert_eq!(report.status(), 1);
    let stdout_lines: Vec<String> = std::fs::read_to_string(report.stdout())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect();
    assert_eq!(stdout_lines, vec!["hello"]);
    assert_eq!(
        std::fs::read_to_string(report.stderr()).unwrap(),
        "",
        "stderr is not empty"
    );
}

#[tokio::test]
async fn repeated_runs_reuse_the_cache_and_reset_the_workspace() {
    let temp = tempfile::TempDir::new().unwrap();

    let archive = create_tool_zip(
        temp.path(),
        &[(
            "gradle-1.2.3/bin/gradle",
            b"#!/bin/sh\necho run > marker.txt\nexit 0\n" as &[u8],
        )],
    );

    let provisioner = ToolProvisioner::with_transport(
        temp.path().join("test-tools"),
        temp.path().to_path_buf(),
        Box::new(StubTransport { archive }),
    );

    let projects = temp.path().join("projects");
    std::fs::create_dir_all(projects.join("demo")).unwrap();
    std::fs::write(projects.join("demo/build.gradle"), "// demo").unwrap();
    let manager = WorkspaceManager::new(temp.path().join("test-workspace"), projects);

    let first_exe = provisioner.provision(ToolKind::Gradle, "1.2.3").await.unwrap();
    let workspace = manager.prepare("demo").unwrap();
    let report = ProcessRunner::new()
        .run(&workspace, &first_exe, &[])
        .await
        .unwrap();
    assert_eq!(report.status(), 0);
    assert!(workspace.join("marker.txt").exists());

    // Second run: same executable path, fresh workspace.
    let second_exe = provisioner.provision(ToolKind::Gradle, "1.2.3").await.unwrap();
    assert_eq!(first_exe, second_exe);

    let workspace = manager.prepare("demo").unwrap();
    assert!(
        !workspace.join("marker.txt").exists(),
        "previous run's artifacts survived preparation"
    );
}
