use std::path::Path;
use std::sync::{Arc, Mutex};

use clipbatch::adapters::{MockProcessRunner, ScriptedResponse, StdFsAdapter, TokioProcessRunner};
use clipbatch::app::{AppContainer, DefaultAppContainer};
use clipbatch::*;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Test utilities for batch runs
mod test_utils {
    use super::*;

    /// Container wired to a scripted runner and the real disk
    pub fn mock_container(runner: &Arc<MockProcessRunner>) -> DefaultAppContainer {
        DefaultAppContainer::with_ports(
            runner.clone(),
            Arc::new(StdFsAdapter::new()),
            ToolsConfig::default(),
        )
    }

    /// Write a stand-in source file
    pub fn create_source(dir: &Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"not really a video").unwrap();
        path
    }

    /// Whether a program can be started from PATH
    pub fn tool_available(program: &str) -> bool {
        std::process::Command::new(program)
            .arg("-version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

use test_utils::*;

#[tokio::test]
async fn test_single_clip_example() {
    let dir = TempDir::new().unwrap();
    let source = create_source(dir.path(), "local.mp4");
    let runner = Arc::new(MockProcessRunner::new());
    let container = mock_container(&runner);
    let progress = Mutex::new(Vec::new());
    let record = |completed: usize, total: usize| progress.lock().unwrap().push((completed, total));

    let request = BatchRequest::new(
        vec![ClipRequest::new("00:00:00", "00:00:05", "a")],
        SourceDescriptor::Local { path: source },
        dir.path(),
    );
    let report = container
        .batch_interactor()
        .run(&request, &record, &NullSink, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(runner.calls_to("ffmpeg").len(), 1);
    assert_eq!(report.total(), 1);
    assert!(report.results[0].is_success());
    assert_eq!(report.results[0].output_path, dir.path().join("a.mp4"));
    assert_eq!(*progress.lock().unwrap(), vec![(1, 1)]);
}

#[tokio::test]
async fn test_duplicate_example_spawns_nothing() {
    let dir = TempDir::new().unwrap();
    let runner = Arc::new(MockProcessRunner::new());
    let container = mock_container(&runner);

    let request = BatchRequest::new(
        vec![
            ClipRequest::new("00:00:10", "00:00:20", "intro"),
            ClipRequest::new("00:00:10", "00:00:20", " intro "),
        ],
        SourceDescriptor::Remote {
            url: "https://example.com/v".to_string(),
            quality: QualityTier::default(),
        },
        dir.path(),
    );
    let err = container
        .batch_interactor()
        .run(&request, &NullSink, &NullSink, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ClipperError::DuplicateName { .. }));
    assert!(runner.invocations().is_empty());
}

#[tokio::test]
async fn test_every_entry_runs_even_when_some_fail() {
    let dir = TempDir::new().unwrap();
    let source = create_source(dir.path(), "match.mkv");
    let runner = Arc::new(MockProcessRunner::new());
    runner.set_default("ffmpeg", ScriptedResponse::exit(1, "Invalid argument"));
    runner.push("ffmpeg", ScriptedResponse::success(""));
    let container = mock_container(&runner);

    let clips: Vec<ClipRequest> = (0..5)
        .map(|i| {
            ClipRequest::new(
                format!("00:0{}:00", i),
                format!("00:0{}:30", i),
                format!("part{}", i),
            )
        })
        .collect();
    let mut request = BatchRequest::new(clips, SourceDescriptor::Local { path: source.clone() }, dir.path());
    request.format = OutputFormat::Mkv;

    let report = container
        .batch_interactor()
        .run(&request, &NullSink, &NullSink, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(runner.calls_to("ffmpeg").len(), 5);
    assert_eq!(report.total(), 5);
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 4);
    assert!(report.results[0].is_success());
    for (i, result) in report.results.iter().enumerate() {
        assert_eq!(result.entry.name(), format!("part{}", i));
        assert_eq!(result.entry.row(), i + 1);
    }
    assert!(source.exists());
}

#[tokio::test]
async fn test_remote_source_lifecycle() {
    for keep_original in [false, true] {
        let dir = TempDir::new().unwrap();
        let runner = Arc::new(MockProcessRunner::new());
        runner.push("yt-dlp", ScriptedResponse::success("").creating_file_after("-o"));
        let container = mock_container(&runner);

        let mut request = BatchRequest::new(
            vec![ClipRequest::new("00:00:01", "00:00:02.5", "")],
            SourceDescriptor::Remote {
                url: "https://example.com/v".to_string(),
                quality: QualityTier::P1440,
            },
            dir.path(),
        );
        request.keep_original = keep_original;

        let report = container
            .batch_interactor()
            .run(&request, &NullSink, &NullSink, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.source.path.exists(), keep_original);
        let cut = &runner.calls_to("ffmpeg")[0];
        assert_eq!(cut.arg_after("-ss"), Some("00:00:01.000"));
        assert_eq!(cut.arg_after("-t"), Some("00:00:01.500"));
        assert_eq!(report.results[0].output_path, dir.path().join("clip_1.mp4"));
        assert_eq!(
            runner.calls_to("yt-dlp")[0].arg_after("-f"),
            Some("bv[height<=1440]+ba/best")
        );
    }
}

#[tokio::test]
async fn test_report_serializes() {
    let dir = TempDir::new().unwrap();
    let source = create_source(dir.path(), "local.mp4");
    let runner = Arc::new(MockProcessRunner::new());
    let container = mock_container(&runner);

    let request = BatchRequest::new(
        vec![ClipRequest::new("00:00:00", "00:00:05", "a")],
        SourceDescriptor::Local { path: source },
        dir.path(),
    );
    let report = container
        .batch_interactor()
        .run(&request, &NullSink, &NullSink, &CancellationToken::new())
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["results"][0]["outcome"], "succeeded");
    assert_eq!(json["results"][0]["entry"]["name"], "a");
    assert_eq!(json["cancelled"], false);
}

/// Cuts a real clip when ffmpeg is installed
#[tokio::test]
async fn test_real_ffmpeg_stream_copy() {
    if !tool_available("ffmpeg") {
        eprintln!("Skipping test: ffmpeg not available");
        return;
    }

    let dir = TempDir::new().unwrap();
    let source = dir.path().join("source.mp4");
    let status = std::process::Command::new("ffmpeg")
        .args(["-f", "lavfi", "-i", "testsrc=duration=6:size=160x120:rate=25"])
        .args(["-c:v", "mpeg4", "-y"])
        .arg(&source)
        .output()
        .unwrap();
    if !status.status.success() {
        eprintln!("Skipping test: could not generate a source video");
        return;
    }

    let container = DefaultAppContainer::with_ports(
        Arc::new(TokioProcessRunner::new()),
        Arc::new(StdFsAdapter::new()),
        ToolsConfig::default(),
    );
    let request = BatchRequest::new(
        vec![
            ClipRequest::new("00:00:00", "00:00:02", "first"),
            ClipRequest::new("00:00:02", "00:00:04", "second"),
        ],
        SourceDescriptor::Local { path: source.clone() },
        dir.path(),
    );

    let report = container
        .batch_interactor()
        .run(&request, &NullSink, &NullSink, &CancellationToken::new())
        .await
        .unwrap();

    assert!(report.all_succeeded(), "{:?}", report.results);
    assert!(dir.path().join("first.mp4").exists());
    assert!(dir.path().join("second.mp4").exists());
    assert!(source.exists());
}
