//! CLI 集成测试
//!
//! 使用 assert_cmd 进行命令行集成测试

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HOSTS: &str = "\
# Title: StevenBlack/hosts
# Date: 14 October 2026 14:23:11 (UTC)
# Number of unique domains: 4
#
127.0.0.1 localhost
127.0.0.1 localhost.localdomain
127.0.0.1 local
255.255.255.255 broadcasthost
::1 localhost
fe80::1%lo0 localhost
0.0.0.0 0.0.0.0
0.0.0.0 ads.example.com
0.0.0.0 tracker.example.net # telemetry
0.0.0.0 sub_domain.cdn.example.org
0.0.0.0 bad-8
0.0.0.0 phish.example.com\x0b0.0.0.0 other.com
";

/// 创建临时测试环境
fn create_test_env() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// 在临时目录里写一份只指向临时路径的配置
fn write_config(dir: &Path) -> PathBuf {
    let content = format!(
        "database_dir = {:?}\nlatest_file = {:?}\nbasename = \"hosts-ghsb\"\nsystem_hosts = {:?}\n",
        dir.join("db"),
        dir.join("hosts_latest"),
        dir.join("system_hosts"),
    );
    write_file(dir, "config.toml", &content)
}

fn hostsguard(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hostsguard").unwrap();
    cmd.arg("--config").arg(write_config(dir)).current_dir(dir);
    cmd
}

mod basic_commands {
    use super::*;

    #[test]
    fn test_help_command() {
        Command::cargo_bin("hostsguard")
            .unwrap()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("hostsguard"));
    }

    #[test]
    fn test_missing_file_fails() {
        let temp_dir = create_test_env();
        hostsguard(temp_dir.path())
            .arg("check")
            .arg("no-such-hosts")
            .assert()
            .failure()
            .stderr(predicate::str::contains("no-such-hosts"));
    }

    #[test]
    fn test_bad_config_fails() {
        let temp_dir = create_test_env();
        let config = write_file(temp_dir.path(), "bad.toml", "nonsense = 1\n");
        let hosts = write_file(temp_dir.path(), "hosts", HOSTS);

        Command::cargo_bin("hostsguard")
            .unwrap()
            .arg("--config")
            .arg(config)
            .arg("check")
            .arg(hosts)
            .assert()
            .failure();
    }
}

mod check_command {
    use super::*;

    #[test]
    fn test_check_reports_problem_lines() {
        let temp_dir = create_test_env();
        let hosts = write_file(temp_dir.path(), "hosts", HOSTS);

        hostsguard(temp_dir.path())
            .arg("check")
            .arg(&hosts)
            .assert()
            .success()
            .stdout(predicate::str::contains("Date: 14 October 2026"))
            .stdout(predicate::str::contains(
                "Number of unique domains: 4 (calculated: 5)",
            ))
            .stdout(predicate::str::contains("Security Warning"))
            .stdout(predicate::str::contains(">>> Problematic lines = 3"))
            .stdout(predicate::str::contains("Removed line 14: 0.0.0.0 bad-8"))
            .stdout(predicate::str::contains("Removed 2 lines."))
            .stdout(predicate::str::contains(
                "Kept line 13: 0.0.0.0 sub_domain.cdn.example.org",
            ));
    }

    #[test]
    fn test_check_clean_file_is_ok() {
        let temp_dir = create_test_env();
        let hosts = write_file(
            temp_dir.path(),
            "hosts",
            "# Date: 1 May 2026\n# Number of unique domains: 1\n0.0.0.0 a.com\n",
        );

        hostsguard(temp_dir.path())
            .arg("check")
            .arg(&hosts)
            .assert()
            .success()
            .stdout(predicate::str::contains("Number of unique domains: 1\n"))
            .stdout(predicate::str::contains("# Verify hosts file integrity: OK."));
    }

    #[test]
    fn test_check_json() {
        let temp_dir = create_test_env();
        let hosts = write_file(temp_dir.path(), "hosts", HOSTS);

        let output = hostsguard(temp_dir.path())
            .arg("check")
            .arg(&hosts)
            .arg("--format")
            .arg("json")
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["calculated_before"], 5);
        assert_eq!(report["calculated_after"], 3);
        assert_eq!(report["declared"]["declared"], 4);
        assert_eq!(report["flagged"].as_array().unwrap().len(), 3);
        assert_eq!(report["repair"]["kept"][0]["index"], 13);
        assert_eq!(report["sha256"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_check_without_date_fails() {
        let temp_dir = create_test_env();
        let hosts = write_file(temp_dir.path(), "hosts", "0.0.0.0 a.com\n");

        hostsguard(temp_dir.path())
            .arg("check")
            .arg(&hosts)
            .assert()
            .failure()
            .stderr(predicate::str::contains("日期"));
    }
}

mod clean_command {
    use super::*;

    #[test]
    fn test_clean_prints_repaired_document() {
        let temp_dir = create_test_env();
        let hosts = write_file(temp_dir.path(), "hosts", HOSTS);

        hostsguard(temp_dir.path())
            .arg("clean")
            .arg(&hosts)
            .assert()
            .success()
            .stdout(predicate::str::contains("# Number of unique domains: 3\n"))
            .stdout(predicate::str::contains("0.0.0.0 sub_domain.cdn.example.org\n"))
            .stdout(predicate::str::contains("bad-8").not())
            .stdout(predicate::str::contains("phish").not())
            .stdout(predicate::str::contains("127.0.0.1 localhost.localdomain\n"));
    }

    #[test]
    fn test_removal_without_header_fails() {
        let temp_dir = create_test_env();
        let hosts = write_file(temp_dir.path(), "hosts", "# Date: 1 May 2026\njunk\n");

        hostsguard(temp_dir.path())
            .arg("clean")
            .arg(&hosts)
            .assert()
            .failure()
            .stdout(predicate::str::is_empty());
    }
}

mod plan_command {
    use super::*;

    #[test]
    fn test_plan_without_confirmation_does_nothing() {
        let temp_dir = create_test_env();
        let hosts = write_file(temp_dir.path(), "hosts", HOSTS);

        hostsguard(temp_dir.path())
            .arg("plan")
            .arg(&hosts)
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "Date: 14 October 2026 14:23:11 (UTC)\n",
            ))
            .stdout(predicate::str::contains("Nothing done."));
    }

    #[test]
    fn test_plan_confirmed_prints_targets_without_writing() {
        let temp_dir = create_test_env();
        let hosts = write_file(temp_dir.path(), "hosts", HOSTS);

        hostsguard(temp_dir.path())
            .arg("plan")
            .arg(&hosts)
            .arg("--yes")
            .assert()
            .success()
            .stdout(predicate::str::contains("hosts-ghsb-261014"))
            .stdout(predicate::str::contains("sha256: "))
            .stdout(predicate::str::contains("Completed (dry run)."));

        assert!(!temp_dir.path().join("db").exists());
        assert!(!temp_dir.path().join("hosts_latest").exists());
        assert!(!temp_dir.path().join("system_hosts").exists());
    }

    #[test]
    fn test_plan_up_to_date() {
        let temp_dir = create_test_env();
        let hosts = write_file(temp_dir.path(), "hosts", HOSTS);
        write_file(
            temp_dir.path(),
            "hosts_latest",
            "# Date: 20 October 2026 08:00:00 (UTC)\n",
        );

        hostsguard(temp_dir.path())
            .arg("plan")
            .arg(&hosts)
            .arg("--yes")
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing to do."))
            .stdout(predicate::str::contains("Completed").not());
    }

    #[test]
    fn test_plan_up_to_date_skips_cleaning() {
        let temp_dir = create_test_env();
        // 有需要删除的行但没有数量头部，清理会失败
        let hosts = write_file(temp_dir.path(), "hosts", "# Date: 1 May 2026\njunk\n");
        write_file(temp_dir.path(), "hosts_latest", "# Date: 2 May 2026\n");

        hostsguard(temp_dir.path())
            .arg("plan")
            .arg(&hosts)
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Date: 1 May 2026\n"))
            .stdout(predicate::str::contains("Nothing to do."));
    }

    #[test]
    fn test_plan_missing_loopback_aborts() {
        let temp_dir = create_test_env();
        let hosts = write_file(
            temp_dir.path(),
            "hosts",
            "# Date: 1 May 2026\n# Number of unique domains: 1\n0.0.0.0 a.com\n",
        );

        hostsguard(temp_dir.path())
            .arg("plan")
            .arg(&hosts)
            .arg("--yes")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Completed").not())
            .stderr(predicate::str::contains("127.0.0.1 localhost"));
    }
}

mod status_command {
    use super::*;

    #[test]
    fn test_status_with_latest_file() {
        let temp_dir = create_test_env();
        write_file(
            temp_dir.path(),
            "hosts_latest",
            "# Date: 20 October 2026\n# Number of unique domains: 12,345\n",
        );

        hostsguard(temp_dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("(261020)"))
            .stdout(predicate::str::contains("Number of unique domains: 12,345"));
    }
}
