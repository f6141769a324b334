//! Long-lived editor session over JSON lines.
//!
//! An editor host keeps one `cpcode serve` process running and writes one
//! request per line to its stdin. Each request gets exactly one JSON line
//! back. The URL cache lives as long as the process, so repeated copies
//! in the same project skip the remote lookup.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;

use cpcode_core::commands::{Clipboard, CopyLinkError, CopyLinkOptions};
use cpcode_core::context::AppContext;
use cpcode_core::link::LineRange;
use cpcode_core::selection::Selection;

use crate::actions;

/// A single request from the editor host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    /// Copy a link for the selected lines (0-based, inclusive)
    Copy {
        file: PathBuf,
        start_line: u32,
        end_line: u32,
        /// Selected text; read from the file when omitted
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        workspace: Option<PathBuf>,
        #[serde(default)]
        force_refresh: bool,
    },
    /// Drop every cached resolution
    ClearCache,
    /// Drop the cached resolution for one project
    Invalidate { project: String },
}

/// Reply written for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub ok: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
}

impl Response {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            artifact: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            artifact: None,
        }
    }
}

/// Dispatches requests against one application context.
pub struct Session<'a> {
    ctx: &'a AppContext,
    runtime: &'a Runtime,
    clipboard: &'a mut dyn Clipboard,
}

impl<'a> Session<'a> {
    pub fn new(ctx: &'a AppContext, runtime: &'a Runtime, clipboard: &'a mut dyn Clipboard) -> Self {
        Self {
            ctx,
            runtime,
            clipboard,
        }
    }

    /// Serve requests until `reader` reaches end of input.
    pub fn run(&mut self, reader: impl BufRead, mut writer: impl Write) -> anyhow::Result<()> {
        tracing::info!("Session started");
        for line in reader.lines() {
            let line = line.context("Failed to read request")?;
            if line.trim().is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<Request>(&line) {
                Ok(request) => self.handle(request),
                Err(err) => Response::failure(format!("Invalid request: {}", err)),
            };

            serde_json::to_writer(&mut writer, &response).context("Failed to encode response")?;
            writer.write_all(b"\n").context("Failed to write response")?;
            writer.flush().context("Failed to flush response")?;
        }
        tracing::info!("Session ended");
        Ok(())
    }

    /// Handle one request.
    pub fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::Copy {
                file,
                start_line,
                end_line,
                text,
                workspace,
                force_refresh,
            } => {
                let selection = match self.selection(file, start_line, end_line, text) {
                    Ok(selection) => selection,
                    Err(err) => return Response::failure(format!("{:#}", err)),
                };
                let options = CopyLinkOptions {
                    workspace_root: workspace,
                    force_refresh,
                };
                let command = self.ctx.copy_link_command();
                let result = self.runtime.block_on(command.execute(
                    Some(&selection),
                    &options,
                    &mut *self.clipboard,
                ));
                match result {
                    Ok(report) => Response {
                        ok: true,
                        message: actions::copied_message(&report),
                        artifact: Some(report.artifact.snippet),
                    },
                    Err(err) => Response::failure(err.to_string()),
                }
            }
            Request::ClearCache => {
                self.ctx.clear_cache_command().execute();
                Response::success(actions::CACHE_CLEARED_MESSAGE)
            }
            Request::Invalidate { project } => {
                self.ctx.clear_cache_command().invalidate(&project);
                Response::success(format!("Cache cleared for '{}'", project))
            }
        }
    }

    fn selection(
        &self,
        file: PathBuf,
        start_line: u32,
        end_line: u32,
        text: Option<String>,
    ) -> anyhow::Result<Selection> {
        if LineRange::from_zero_based(start_line, end_line).is_none() {
            return Err(CopyLinkError::InvalidLineRange {
                start: start_line,
                end: end_line,
            }
            .into());
        }
        let file = actions::absolute_file(&file)?;
        match text {
            Some(text) => Ok(Selection::new(file, text, start_line, end_line)),
            None => actions::selection_from_file(&file, start_line, end_line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpcode_core::config::CpcodeConfig;
    use std::path::Path;
    use std::process::Command;
    use tempfile::TempDir;

    #[derive(Default)]
    struct MemoryClipboard {
        writes: Vec<String>,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
            self.writes.push(text.to_string());
            Ok(())
        }
    }

    fn run_git(repo: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(repo)
            .status()
            .expect("Failed to invoke git");
        assert!(status.success(), "git command failed: {:?}", args);
    }

    fn init_repo(repo: &Path) {
        std::fs::create_dir_all(repo).unwrap();
        run_git(repo, &["init"]);
        run_git(repo, &["config", "user.email", "test@example.com"]);
        run_git(repo, &["config", "user.name", "Test User"]);
        run_git(repo, &["config", "commit.gpgsign", "false"]);
        std::fs::write(repo.join("main.rs"), "fn main() {\n    println!(\"hi\");\n}\n").unwrap();
        run_git(repo, &["add", "."]);
        run_git(repo, &["commit", "-m", "init"]);
        run_git(
            repo,
            &["remote", "add", "origin", "git@git.example.com:org/demo.git"],
        );
    }

    fn serve(ctx: &AppContext, input: &str) -> (Vec<serde_json::Value>, MemoryClipboard) {
        let runtime = Runtime::new().unwrap();
        let mut clipboard = MemoryClipboard::default();
        let mut output = Vec::new();
        Session::new(ctx, &runtime, &mut clipboard)
            .run(input.as_bytes(), &mut output)
            .unwrap();
        let responses = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (responses, clipboard)
    }

    #[test]
    fn parses_copy_request_with_defaults() {
        let request: Request =
            serde_json::from_str(r#"{"action":"copy","file":"a.py","start_line":1,"end_line":2}"#)
                .unwrap();
        assert_eq!(
            request,
            Request::Copy {
                file: PathBuf::from("a.py"),
                start_line: 1,
                end_line: 2,
                text: None,
                workspace: None,
                force_refresh: false,
            }
        );
    }

    #[test]
    fn parses_cache_requests() {
        let clear: Request = serde_json::from_str(r#"{"action":"clear_cache"}"#).unwrap();
        let invalidate: Request =
            serde_json::from_str(r#"{"action":"invalidate","project":"demo"}"#).unwrap();
        assert_eq!(clear, Request::ClearCache);
        assert_eq!(
            invalidate,
            Request::Invalidate {
                project: "demo".to_string()
            }
        );
    }

    #[test]
    fn copy_then_clear_cache() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("demo");
        init_repo(&repo);
        let file = repo.join("main.rs");
        let ctx = AppContext::new(CpcodeConfig::default()).unwrap();

        let input = format!(
            "{}\n\n{}\n",
            serde_json::json!({"action": "copy", "file": file, "start_line": 0, "end_line": 2}),
            serde_json::json!({"action": "clear_cache"}),
        );
        let (responses, clipboard) = serve(&ctx, &input);

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["ok"], true);
        assert_eq!(responses[0]["message"], "Copied to clipboard: main.rs L1-L3");
        let artifact = responses[0]["artifact"].as_str().unwrap();
        assert!(artifact.starts_with("[main.rs](https://git.example.com/org/demo/blob/"));
        assert!(artifact.contains("/main.rs#L1-L3)\n\n```rust=1\nfn main() {\n"));
        assert_eq!(clipboard.writes, vec![artifact.to_string()]);

        assert_eq!(responses[1]["ok"], true);
        assert_eq!(responses[1]["message"], "Cache cleared");
        assert!(responses[1].get("artifact").is_none());
        assert!(ctx.cache().is_empty());
    }

    #[test]
    fn cache_persists_between_requests() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("demo");
        init_repo(&repo);
        let file = repo.join("main.rs");
        let ctx = AppContext::new(CpcodeConfig::default()).unwrap();

        let copy = serde_json::json!({"action": "copy", "file": file, "start_line": 1, "end_line": 1, "text": "println!"});
        let (responses, _) = serve(&ctx, &format!("{copy}\n"));
        assert_eq!(responses[0]["ok"], true);
        assert_eq!(ctx.cache().len(), 1);

        let (responses, _) = serve(
            &ctx,
            &format!("{}\n", serde_json::json!({"action": "invalidate", "project": "demo"})),
        );
        assert_eq!(responses[0]["message"], "Cache cleared for 'demo'");
        assert!(ctx.cache().is_empty());
    }

    #[test]
    fn failures_are_reported_not_fatal() {
        let temp = TempDir::new().unwrap();
        let loose = temp.path().join("loose.py");
        std::fs::write(&loose, "x = 1\n").unwrap();
        let ctx = AppContext::new(CpcodeConfig::default()).unwrap();

        let input = format!(
            "not json\n{}\n{}\n",
            serde_json::json!({"action": "copy", "file": loose, "start_line": 0, "end_line": 0, "text": ""}),
            serde_json::json!({"action": "copy", "file": loose, "start_line": 0, "end_line": 0}),
        );
        let (responses, clipboard) = serve(&ctx, &input);

        assert_eq!(responses.len(), 3);
        assert!(responses.iter().all(|r| r["ok"] == false));
        assert!(
            responses[0]["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid request")
        );
        assert_eq!(responses[1]["message"], "Select some code first");
        assert_eq!(
            responses[2]["message"],
            "The current directory is not a Git repository"
        );
        assert!(clipboard.writes.is_empty());
    }

    #[test]
    fn invalid_line_ranges_are_reported_and_session_continues() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("demo");
        init_repo(&repo);
        let file = repo.join("main.rs");
        let ctx = AppContext::new(CpcodeConfig::default()).unwrap();

        let input = format!(
            "{}\n{}\n{}\n{}\n",
            serde_json::json!({"action": "copy", "file": file, "start_line": 0, "end_line": u32::MAX}),
            serde_json::json!({"action": "copy", "file": file, "start_line": u32::MAX, "end_line": u32::MAX, "text": "x"}),
            serde_json::json!({"action": "copy", "file": file, "start_line": 5, "end_line": 2, "text": "abc"}),
            serde_json::json!({"action": "copy", "file": file, "start_line": 0, "end_line": 0}),
        );
        let (responses, clipboard) = serve(&ctx, &input);

        assert_eq!(responses.len(), 4);
        assert_eq!(responses[0]["ok"], false);
        assert_eq!(responses[0]["message"], "Invalid line range: 0-4294967295");
        assert_eq!(responses[1]["ok"], false);
        assert_eq!(responses[1]["message"], "Invalid line range: 4294967295-4294967295");
        assert_eq!(responses[2]["ok"], false);
        assert_eq!(responses[2]["message"], "Invalid line range: 5-2");
        assert_eq!(responses[3]["ok"], true);
        assert_eq!(clipboard.writes.len(), 1);
    }

    #[test]
    fn lines_past_end_of_file_are_reported() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("demo");
        init_repo(&repo);
        let file = repo.join("main.rs");
        let ctx = AppContext::new(CpcodeConfig::default()).unwrap();

        let input = format!(
            "{}\n",
            serde_json::json!({"action": "copy", "file": file, "start_line": 1, "end_line": 9}),
        );
        let (responses, _) = serve(&ctx, &input);

        assert_eq!(responses[0]["ok"], false);
        let message = responses[0]["message"].as_str().unwrap();
        assert!(message.starts_with("Lines 2-10 are outside"), "{message}");
    }
}
