use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Output};
use std::thread;

use tempfile::tempdir;

const PROXY_VARS: &[&str] = &[
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
];

fn newsrank(dir: &Path, args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_newsrank"));
    command.current_dir(dir).args(args).env_remove("NEWSRANK_QUERY");
    for var in PROXY_VARS {
        command.env_remove(var);
    }
    command
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_dataset(dir: &Path) {
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(
        dir.join("data").join("dataset.jsonl"),
        "{\"title\": \"Cats\", \"content\": \"Cats are great pets.\"}\n\
         {\"title\": \"Dogs\", \"content\": \"Dogs are loyal companions!\"}\n",
    )
    .unwrap();
}

/// Answer one chat completion request with a fixed expansion.
fn serve_completion(content: &'static str) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/v1/chat/completions", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut content_length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            if line == "\r\n" {
                break;
            }
        }
        let mut body = vec![0; content_length];
        reader.read_exact(&mut body).unwrap();

        let response = format!(r#"{{"choices":[{{"message":{{"role":"assistant","content":"{content}"}}}}]}}"#);
        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{response}",
            response.len()
        )
        .unwrap();
        stream.flush().unwrap();
    });

    (url, handle)
}

#[test]
fn test_no_arguments_prints_usage() {
    let dir = tempdir().unwrap();
    let output = newsrank(dir.path(), &[]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn test_unknown_argument_prints_usage() {
    let dir = tempdir().unwrap();

    for args in [&["index"][..], &["search", "extra"][..]] {
        let output = newsrank(dir.path(), args).output().unwrap();
        assert_eq!(output.status.code(), Some(1), "args: {args:?}");
        assert!(stderr(&output).contains("Usage"), "args: {args:?}");
    }
}

#[test]
fn test_help_exits_successfully() {
    let dir = tempdir().unwrap();
    let output = newsrank(dir.path(), &["--help"]).output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("preprocess"));
}

#[test]
fn test_preprocess_missing_input_fails_without_output() {
    let dir = tempdir().unwrap();
    let output = newsrank(dir.path(), &["preprocess"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error:"));
    assert!(!dir.path().join("data").join("preprocessed_dataset.jsonl").exists());
}

#[test]
fn test_preprocess_writes_dataset() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path());

    let output = newsrank(dir.path(), &["PREPROCESS"]).output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Preprocessing data...\n"));
    assert!(out.contains("Data preprocessed and saved to data/preprocessed_dataset.jsonl"));

    let written = fs::read_to_string(dir.path().join("data").join("preprocessed_dataset.jsonl")).unwrap();
    assert_eq!(written.lines().count(), 2);
    assert!(written.contains(r#""processed_text":"cat great pet""#));
}

#[test]
fn test_search_without_credential_fails() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path());
    assert!(newsrank(dir.path(), &["preprocess"]).output().unwrap().status.success());

    let output = newsrank(dir.path(), &["search", "--query", "cats"])
        .env_remove("OPENAI_API_KEY")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("OPENAI_API_KEY is not set."));
    assert!(stderr(&output).contains("Error: Query expansion failed"));
    assert!(!dir.path().join("plots").exists());
}

#[test]
fn test_search_end_to_end() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path());
    assert!(newsrank(dir.path(), &["preprocess"]).output().unwrap().status.success());

    let (url, server) = serve_completion("kitten feline pet");
    let config = dir.path().join("newsrank.json");
    fs::write(
        &config,
        format!(
            r#"{{"credential_source": {{"env_var": "NEWSRANK_TEST_KEY"}}, "expansion": {{"endpoint": "{url}", "timeout_secs": 10}}, "chart": {{"width": 600, "height": 400}}}}"#
        ),
    )
    .unwrap();

    let output = newsrank(dir.path(), &["search", "--config", "newsrank.json", "--query", "cats"])
        .env("NEWSRANK_TEST_KEY", "sk-test-123456")
        .output()
        .unwrap();
    server.join().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("NEWSRANK_TEST_KEY is set: sk-te..."));
    assert!(!out.contains("sk-test-123456"));
    assert!(out.contains("Below is the overview of the preprocessed data"));
    assert!(out.contains("Original Query: cats"));
    assert!(out.contains("Expanded Query: kitten feline pet"));
    assert!(out.contains("Precision: "));

    let expanded_table = out.find("Top results with expanded query:").unwrap();
    let simple_table = out.find("Top results with simple query:").unwrap();
    assert!(expanded_table < simple_table);

    for name in [
        "top_ranked_results_expanded_query.png",
        "top_ranked_results_simple_query.png",
    ] {
        assert!(out.contains(&format!("Plot saved to plots/{name}")));
        assert!(dir.path().join("plots").join(name).exists());
    }
}
