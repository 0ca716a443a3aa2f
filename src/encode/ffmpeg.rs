use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{BannerError, BannerResult};
use crate::render::frame::FrameRGBA;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    pub out_path: PathBuf,
    /// Replace `out_path` if it exists; otherwise `begin` fails.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Records the banner to an H.264 MP4 by piping frames into the system `ffmpeg`.
///
/// Banner frames are opaque (the renderer paints the palette background first), so pixels are
/// piped unchanged. The video size is fixed at `begin`: a surface resize mid-recording is an
/// error, since the scene rebuilds at the new size and the stream cannot follow.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
    size: (u32, u32),
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            size: (0, 0),
            last_idx: None,
        }
    }
}

/// Reject sizes libx264/yuv420p cannot encode before spawning anything.
pub(crate) fn check_video_size(width: u32, height: u32) -> BannerResult<()> {
    if width == 0 || height == 0 {
        return Err(BannerError::validation(format!(
            "cannot record a {width}x{height} banner"
        )));
    }
    if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
        return Err(BannerError::validation(format!(
            "mp4 output needs even dimensions, banner is {width}x{height}"
        )));
    }
    Ok(())
}

/// A frame must match the recording size and cover the whole picture.
pub(crate) fn check_frame(
    size: (u32, u32),
    idx: FrameIndex,
    frame: &FrameRGBA,
) -> BannerResult<()> {
    if (frame.width, frame.height) != size {
        return Err(BannerError::validation(format!(
            "banner resized to {}x{} at tick {} while recording a {}x{} mp4; \
             render resizing scripts to a png sequence instead",
            frame.width, frame.height, idx.0, size.0, size.1
        )));
    }
    if !frame.is_opaque() {
        return Err(BannerError::validation(
            "mp4 output needs an opaque palette background",
        ));
    }
    Ok(())
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> BannerResult<()> {
        check_video_size(cfg.width, cfg.height)?;
        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(BannerError::validation(format!(
                "'{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(BannerError::encode("`ffmpeg` was not found on PATH"));
        }

        self.encoder = Some(Encoder::spawn(&self.opts, cfg)?);
        self.size = (cfg.width, cfg.height);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BannerResult<()> {
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(BannerError::encode("mp4 recording has not started"));
        };
        if self.last_idx.is_some_and(|last| idx <= last) {
            return Err(BannerError::encode(format!(
                "tick {} arrived after tick {}",
                idx.0,
                self.last_idx.map_or(0, |l| l.0)
            )));
        }
        self.last_idx = Some(idx);

        check_frame(self.size, idx, frame)?;
        encoder.write(&frame.data)
    }

    fn end(&mut self) -> BannerResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| BannerError::encode("mp4 recording has not started"))?;
        encoder.finish()?;
        tracing::debug!(out = %self.opts.out_path.display(), "mp4 written");
        Ok(())
    }
}

/// A running `ffmpeg` child reading rawvideo RGBA from stdin.
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<Vec<u8>>,
}

impl Encoder {
    fn spawn(opts: &FfmpegSinkOpts, cfg: SinkConfig) -> BannerResult<Self> {
        let mut cmd = Command::new("ffmpeg");
        cmd.arg(if opts.overwrite { "-y" } else { "-n" })
            .args(["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba"])
            .args(["-s", &format!("{}x{}", cfg.width, cfg.height)])
            .args(["-r", &format!("{}/{}", cfg.fps.num, cfg.fps.den)])
            .args(["-i", "pipe:0", "-an", "-c:v", "libx264", "-pix_fmt", "yuv420p"])
            .args(["-movflags", "+faststart"])
            .arg(&opts.out_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| BannerError::encode(format!("failed to start ffmpeg: {e}")))?;
        let (Some(stdin), Some(mut stderr)) = (child.stdin.take(), child.stderr.take()) else {
            return Err(BannerError::encode("ffmpeg pipes were not opened"));
        };
        // ffmpeg blocks if its stderr pipe fills up.
        let stderr = std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf);
            buf
        });
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn write(&mut self, rgba: &[u8]) -> BannerResult<()> {
        self.stdin
            .write_all(rgba)
            .map_err(|e| BannerError::encode(format!("ffmpeg stopped accepting frames: {e}")))
    }

    fn finish(self) -> BannerResult<()> {
        let Self {
            mut child,
            stdin,
            stderr,
        } = self;
        drop(stdin);
        let status = child
            .wait()
            .map_err(|e| BannerError::encode(format!("waiting for ffmpeg: {e}")))?;
        let log = stderr.join().unwrap_or_default();
        if !status.success() {
            return Err(BannerError::encode(format!(
                "ffmpeg exited with {status}: {}",
                String::from_utf8_lossy(&log).trim()
            )));
        }
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> BannerResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
