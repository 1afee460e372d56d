#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use framediff::exec::ProcessHandle;

/// A fake `ffmpeg`: a shell script installed in a private directory.
///
/// It honours the extractor's argument contract: it locates the `-vf`
/// argument, takes everything after `file=` as the metadata path, and copies
/// a canned dump there. It can also write to stderr, sleep, and exit with a
/// chosen code.
pub struct FakeTool {
    dir: TempDir,
    name: String,
}

/// What the fake tool does when run.
#[derive(Debug, Clone, Default)]
pub struct FakeToolBehaviour {
    /// Copied to the metadata file named in the `-vf` argument.
    pub dump: Option<String>,
    /// Written to stderr before anything else.
    pub stderr: Option<String>,
    /// Seconds to sleep before writing the dump.
    pub sleep_secs: Option<f64>,
    /// Exit code (default 0).
    pub exit_code: i32,
}

impl FakeTool {
    pub fn install(name: &str, behaviour: FakeToolBehaviour) -> Result<Self> {
        let dir = tempfile::tempdir().context("creating fake tool dir")?;

        if let Some(ref dump) = behaviour.dump {
            fs::write(dir.path().join("dump.txt"), dump).context("writing canned dump")?;
        }
        if let Some(ref stderr) = behaviour.stderr {
            fs::write(dir.path().join("stderr.txt"), stderr).context("writing canned stderr")?;
        }

        let script = render_script(dir.path(), &behaviour);
        let path = dir.path().join(name);
        {
            let mut file = fs::File::create(&path).context("creating fake tool script")?;
            file.write_all(script.as_bytes())?;
            file.sync_all()?;
        }
        make_executable(&path)?;

        Ok(Self {
            dir,
            name: name.to_string(),
        })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join(&self.name)
    }

    /// Resolve the fake tool through its private search path.
    pub fn handle(&self) -> Result<ProcessHandle> {
        Ok(ProcessHandle::resolve_in(&self.name, self.dir.path())?)
    }
}

fn render_script(dir: &Path, behaviour: &FakeToolBehaviour) -> String {
    let dir = dir.display();
    let mut script = String::from("#!/bin/sh\n");

    if behaviour.stderr.is_some() {
        script.push_str(&format!("cat '{dir}/stderr.txt' >&2\n"));
    }
    if let Some(secs) = behaviour.sleep_secs {
        script.push_str(&format!("sleep {secs}\n"));
    }

    script.push_str(
        "vf=''\n\
         while [ $# -gt 0 ]; do\n\
         \x20 if [ \"$1\" = '-vf' ]; then vf=\"$2\"; shift; fi\n\
         \x20 shift\n\
         done\n\
         out=\"${vf##*file=}\"\n",
    );

    if behaviour.dump.is_some() {
        script.push_str(&format!("cat '{dir}/dump.txt' > \"$out\"\n"));
    }
    script.push_str(&format!("exit {}\n", behaviour.exit_code));
    script
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).context("marking fake tool executable")?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
