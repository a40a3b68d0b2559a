// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! End-to-end tests of the `dlc-run` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const NETWORK: &str = r#"{
    "name": "tiny",
    "inputs":  [{ "name": "input:0", "dims": [1, 2] }],
    "outputs": [{ "name": "prob/Softmax:0", "dims": [1, 3] }]
}"#;

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new(network: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let raw: Vec<u8> = [0.5f32, 1.5].iter().flat_map(|v| v.to_le_bytes()).collect();
        std::fs::write(dir.path().join("in0.raw"), raw).expect("write raw input");
        std::fs::write(
            dir.path().join("list.txt"),
            format!("{}\n", dir.path().join("in0.raw").display()),
        )
        .expect("write input list");
        std::fs::write(dir.path().join("net.dlc"), network).expect("write container");
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Runs the binary with `-d`, `-i` and `-o` pointing into the workspace.
    fn run(&self, extra: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_dlc-run"))
            .arg("-d")
            .arg(self.path("net.dlc"))
            .arg("-i")
            .arg(self.path("list.txt"))
            .arg("-o")
            .arg(self.path("output"))
            .args(extra)
            .env_remove("RUST_LOG")
            .output()
            .expect("run dlc-run")
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn read_f32(path: &Path) -> Vec<f32> {
    std::fs::read(path)
        .expect("read output")
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

#[test]
fn help_exits_zero() {
    let output = Command::new(env!("CARGO_BIN_EXE_dlc-run"))
        .arg("-h")
        .output()
        .expect("run dlc-run -h");
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("--runtime-order"), "help output: {text}");
    assert!(text.contains("--buffer-type"));
}

#[test]
fn unknown_flag_exits_one() {
    let output = Command::new(env!("CARGO_BIN_EXE_dlc-run"))
        .arg("-k")
        .output()
        .expect("run dlc-run -k");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn default_run_writes_results() {
    let ws = Workspace::new(NETWORK);
    let output = ws.run(&[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("batchSize = 1"), "stdout: {text}");

    let result = ws.path("output/Result_0/prob_Softmax_0.raw");
    assert_eq!(read_f32(&result), vec![1.0, 1.0 + 1.0 / 3.0, 1.0 + 2.0 / 3.0]);
}

#[test]
fn conflicting_runtime_options_exit_one() {
    let ws = Workspace::new(NETWORK);
    for args in [["-r", "gpu", "-l", "cpu,gpu"], ["-l", "cpu,gpu", "-r", "gpu"]] {
        let output = ws.run(&args);
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("cannot mix runtime order"));
    }
    assert!(!ws.path("output").exists());
}

#[test]
fn duplicate_runtime_exits_one() {
    let ws = Workspace::new(NETWORK);
    let output = ws.run(&["-l", "cpu,tpu,cpu"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("duplicate entry"), "stderr: {err}");
    assert!(err.contains("-l"));
}

#[test]
fn unknown_runtime_exits_one() {
    let ws = Workspace::new(NETWORK);
    let output = ws.run(&["-l", "cpu,tpu"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown runtime 'tpu'"));
}

#[test]
fn invalid_quantization_token_exits_one() {
    let ws = Workspace::new(NETWORK);
    let output = ws.run(&["-q", "yes"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("static quantization value 'yes'"));
}

#[test]
fn build_failure_is_reported() {
    let ws = Workspace::new(&NETWORK.replace(r#""name": "tiny","#, r#""name": "tiny", "runtimes": ["gpu"],"#));
    let output = ws.run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error while building object"));
}

#[test]
fn init_caching_persists_a_record() {
    let ws = Workspace::new(NETWORK);
    let output = ws.run(&["-c"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Saved container into archive successfully"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(ws.path("net.dlc")).unwrap()).unwrap();
    let records = saved["init_cache"].as_array().expect("init_cache array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["runtime"], "cpu_float32");
}

#[test]
fn zero_resizable_dim_exits_one() {
    let ws = Workspace::new(NETWORK);
    let output = ws.run(&["-b", "USERBUFFER_FLOAT", "-z", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("resizable dimension"));
}

#[test]
fn gl_buffer_source_exits_one() {
    let ws = Workspace::new(NETWORK);
    let output = ws.run(&["-b", "USERBUFFER_FLOAT", "-s", "GLBUFFER"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("GLBUFFER"));
}

#[test]
fn quantized_user_buffers_run() {
    let ws = Workspace::new(NETWORK);
    let output = ws.run(&["-b", "USERBUFFER_TF8", "-z", "4"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(ws.path("output/Result_0/prob_Softmax_0.raw").exists());
}

#[test]
fn missing_container_exits_one() {
    let ws = Workspace::new(NETWORK);
    std::fs::remove_file(ws.path("net.dlc")).unwrap();
    let output = ws.run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("missing or unreadable"));
}

#[test]
fn config_file_supplies_defaults() {
    let ws = Workspace::new(NETWORK);
    std::fs::write(
        ws.path("harness.toml"),
        format!(
            "container = {:?}\ninput_list = {:?}\noutput_dir = {:?}\nruntime_order = \"cpu\"\n",
            ws.path("net.dlc").display().to_string(),
            ws.path("list.txt").display().to_string(),
            ws.path("from_config").display().to_string(),
        ),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_dlc-run"))
        .arg("--config")
        .arg(ws.path("harness.toml"))
        .output()
        .expect("run dlc-run --config");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(ws.path("from_config/Result_0/prob_Softmax_0.raw").exists());
}

#[test]
fn missing_extension_package_exits_one() {
    let ws = Workspace::new(NETWORK);
    let output = ws.run(&["-u", "/nonexistent.so"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Failed to load extension package(s)"), "stderr: {err}");
    assert!(!ws.path("output").exists());
}

#[test]
fn cpu_fixed_point_needs_a_quantized_network() {
    let ws = Workspace::new(NETWORK);
    let output = ws.run(&["-x"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error while building object"));

    let quantized = Workspace::new(&NETWORK.replace(r#""name": "tiny","#, r#""name": "tiny", "quantized": true,"#));
    let output = quantized.run(&["-x"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn platform_options_are_validated() {
    let ws = Workspace::new(NETWORK);
    let output = ws.run(&["-p", "unsignedPD:ON"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = ws.run(&["-p", "unsignedPD"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("platform options"));
}
