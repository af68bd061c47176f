use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_data: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
    log_file: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_data = base.join("xdg-data");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_data).expect("failed to create XDG_DATA_HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        let log_file = base.join("log.txt");
        seed_log_fixture(&log_file);

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_data,
            xdg_config,
            xdg_state,
            log_file,
        }
    }

    fn db_path(&self) -> PathBuf {
        self.xdg_data.join("runstreak/runlog.db")
    }
}

fn seed_log_fixture(path: &PathBuf) {
    // 11 consecutive qualifying days plus a broken single day, so the
    // default 10-day threshold matches exactly one streak
    let mut content = String::from("Date\tType\tSubType\tDistance\tDistanceUnit\tDuration\n");
    for day in 1..=11 {
        content.push_str(&format!(
            "2023-03-{:02}\tRun\tEasy\t3\tMile\t00:30:00\n",
            day
        ));
    }
    content.push_str("2023-03-20\tRun\t\t5\tMile\t00:45:00\n");
    content.push_str("2023-03-20\tBike\t\t20\tMile\t01:00:00\n");
    fs::write(path, content).expect("failed to write log fixture");
}

fn run_cli(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("runstreak"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_DATA_HOME", &env.xdg_data)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute runstreak: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let rendered_args = args
        .iter()
        .map(|arg| OsString::from(arg).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "runstreak {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

#[test]
fn load_populates_db_and_reports_work() {
    let env = CliTestEnv::new();
    let log_arg = env.log_file.to_string_lossy().into_owned();

    let load_args = ["load", log_arg.as_str()];
    let output = run_cli(&env, &load_args);
    assert_success(&load_args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Load complete:"));
    assert!(stdout.contains("Records loaded:   12"));
    assert!(stdout.contains("Rows skipped:     1"));

    assert!(
        env.db_path().exists(),
        "database file should exist at {}",
        env.db_path().display()
    );

    // Default threshold (10, strict): only the 11-day streak qualifies
    let streaks_args = ["streaks"];
    let output = run_cli(&env, &streaks_args);
    assert_success(&streaks_args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2023-03-01"));
    assert!(stdout.contains("2023-03-11"));
    assert!(!stdout.contains("2023-03-20"));

    let yearly_args = ["yearly"];
    let output = run_cli(&env, &yearly_args);
    assert_success(&yearly_args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2023"));
    assert!(stdout.contains("38.00"));
}

#[test]
fn streaks_threshold_is_strict_and_overridable() {
    let env = CliTestEnv::new();
    let log_arg = env.log_file.to_string_lossy().into_owned();

    let load_args = ["load", log_arg.as_str()];
    assert_success(&load_args, &run_cli(&env, &load_args));

    // Threshold 11 excludes the 11-day streak (strict inequality)
    let args = ["streaks", "--min-days", "11"];
    let output = run_cli(&env, &args);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No streaks longer than 11 days."));

    // Threshold 0 includes everything
    let args = ["streaks", "--min-days", "0"];
    let output = run_cli(&env, &args);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2023-03-11"));
    assert!(stdout.contains("2023-03-20"));
}

#[test]
fn reports_on_fresh_db_do_not_fail() {
    let env = CliTestEnv::new();

    let args = ["streaks"];
    let output = run_cli(&env, &args);
    assert_success(&args, &output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("No streaks"));

    let args = ["yearly"];
    let output = run_cli(&env, &args);
    assert_success(&args, &output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("No mileage recorded."));
}

#[test]
fn load_fails_cleanly_on_log_with_no_runs() {
    let env = CliTestEnv::new();
    let empty_log = env.home.join("empty.txt");
    fs::write(
        &empty_log,
        "Date\tType\tSubType\tDistance\tDistanceUnit\tDuration\n2023-01-01\tBike\t\t20\tMile\t01:00:00\n",
    )
    .unwrap();

    let log_arg = empty_log.to_string_lossy().into_owned();
    let args = ["load", log_arg.as_str()];
    let output = run_cli(&env, &args);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no qualifying activity rows"),
        "expected empty-log diagnostic, got:\n{stderr}"
    );
}
