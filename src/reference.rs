//! API reference generation through the external build system.

use log::{debug, info};
use std::ffi::OsString;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::settings::LoaderSettings;

/// A single external command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// `<program> --build <build_dir> -t <target>`
    pub fn build_target(program: &str, build_dir: &Path, target: &str) -> Self {
        Self {
            program: program.to_string(),
            args: vec![
                "--build".into(),
                build_dir.as_os_str().to_owned(),
                "-t".into(),
                target.into(),
            ],
        }
    }

    /// Shell-like rendering for log output
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// How the command finished. Recorded for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub code: Option<i32>,
}

impl Completion {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands to completion.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, invocation: &Invocation) -> Result<Completion>;
}

/// Spawns processes with inherited stdio and waits for them.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<Completion> {
        let status = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .await
            .map_err(|source| ConfigError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        Ok(Completion {
            code: status.code(),
        })
    }
}

/// Build the reference target once and wait for it.
///
/// The exit status is not acted upon; a command that cannot be launched at
/// all is returned as an error.
pub async fn build_reference<R: CommandRunner>(
    runner: &R,
    settings: &LoaderSettings,
    build_dir: &Path,
) -> Result<Completion> {
    let invocation =
        Invocation::build_target(&settings.build_program, build_dir, &settings.reference_target);
    info!("Building API reference: {}", invocation.display());

    let completion = runner.run(&invocation).await?;
    debug!("Reference build finished with code {:?}", completion.code);
    Ok(completion)
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingRunner;
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_invocation_shape() {
        let invocation = Invocation::build_target("cmake", Path::new("/g/build"), "usr");
        assert_eq!(invocation.program, "cmake");
        assert_eq!(invocation.args, vec!["--build", "/g/build", "-t", "usr"]);
    }

    #[tokio::test]
    async fn test_build_reference_runs_once() {
        let runner = RecordingRunner::new();
        let build_dir = PathBuf::from("/g/build");

        build_reference(&runner, &LoaderSettings::default(), &build_dir)
            .await
            .unwrap();

        let calls = runner.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "cmake");
        assert_eq!(calls[0].args[1], "/g/build");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_build_dir_is_passed_through() {
        use std::os::unix::ffi::OsStrExt;

        let raw = std::ffi::OsStr::from_bytes(b"/g/bu\xffild");
        let invocation = Invocation::build_target("cmake", Path::new(raw), "usr");
        assert_eq!(invocation.args[1].as_bytes(), b"/g/bu\xffild");
    }

    #[tokio::test]
    async fn test_failed_exit_code_is_not_an_error() {
        let runner = RecordingRunner::with_exit_code(Some(2));
        let completion = build_reference(&runner, &LoaderSettings::default(), Path::new("/g/build"))
            .await
            .unwrap();
        assert!(!completion.success());
    }

    #[tokio::test]
    async fn test_missing_program_fails_to_spawn() {
        let settings = LoaderSettings {
            build_program: "ginkgo-docs-no-such-program".to_string(),
            ..LoaderSettings::default()
        };
        let result = build_reference(&ProcessRunner, &settings, Path::new("/g/build")).await;
        assert!(matches!(result, Err(ConfigError::Spawn { .. })));
    }
}
