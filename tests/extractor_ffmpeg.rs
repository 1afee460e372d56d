// Runs the real ffmpeg. Skipped (passes trivially) when ffmpeg is not on PATH.

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::path::Path;
use std::time::Duration;

use framediff::exec::{ProcessHandle, RunContext};
use framediff::extract::{FFMPEG, FrameDiffExtractor};

type TestResult = Result<(), Box<dyn Error>>;

const SCENE_CUT: &str = "if(mod(floor(T),2),255,0)";
const SCENE_CUT_INV: &str = "if(mod(floor(T),2),0,255)";

/// 10 s of 64x64 video at 10 fps whose picture flips every second.
async fn make_flipping_video(ffmpeg: &ProcessHandle, out: &Path) -> TestResult {
    let filter = format!("format=yuv420p,geq=lum='{SCENE_CUT}':cb='{SCENE_CUT_INV}':cr='{SCENE_CUT}'");
    let out = out.to_string_lossy().into_owned();

    let ctx = RunContext::with_timeout(Duration::from_secs(30));
    ffmpeg
        .run(
            &ctx,
            [
                "-hide_banner",
                "-loglevel",
                "error",
                "-f",
                "lavfi",
                "-i",
                "color=c=black:s=64x64:r=10:d=10",
                "-vf",
                filter.as_str(),
                "-c:v",
                "ffv1",
                "-y",
                out.as_str(),
            ],
        )
        .await?;
    Ok(())
}

#[tokio::test]
async fn test_one_scene_cut_per_second() -> TestResult {
    init_tracing();

    let Ok(mut ffmpeg) = ProcessHandle::resolve(FFMPEG) else {
        eprintln!("ffmpeg not found on PATH; skipping");
        return Ok(());
    };
    ffmpeg.disable_stderr_forwarding();

    let dir = tempfile::tempdir()?;
    let video = dir.path().join("flip.mkv");
    make_flipping_video(&ffmpeg, &video).await?;

    let extractor = FrameDiffExtractor::with_handle(ffmpeg).with_temp_dir(dir.path());
    let ctx = RunContext::with_timeout(Duration::from_secs(30));
    let frames = extractor
        .frame_diffs(&ctx, &video.to_string_lossy())
        .await?;

    assert_eq!(frames.len(), 100);

    let mut cuts = 0;
    for (index, frame) in frames.iter().enumerate() {
        let secs = frame.time().as_secs_f64();
        let on_second = secs > 0.0 && (secs.round() - secs).abs() < 0.02;
        if on_second {
            assert!(
                frame.scene_score() > 0.5,
                "frame {index} at {secs}s should be a cut: {frame:?}"
            );
            cuts += 1;
        } else {
            assert!(
                frame.scene_score() < 0.5,
                "frame {index} at {secs}s should not be a cut: {frame:?}"
            );
        }
    }
    assert_eq!(cuts, 9);

    // Only the video remains; the metadata file is gone.
    let remaining: Vec<_> = std::fs::read_dir(dir.path())?.collect();
    assert_eq!(remaining.len(), 1);
    Ok(())
}
