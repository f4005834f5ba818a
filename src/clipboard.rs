use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::io::{IsTerminal, Write};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("terminal rejected the clipboard sequence: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("no clipboard tool available")]
    Unavailable,
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard helpers tried in order when no terminal is attached. The flag
/// marks tools that only make sense under Wayland.
const NATIVE_TOOLS: &[(&str, &[&str], bool)] = &[
    ("wl-copy", &[], true),
    ("xclip", &["-selection", "clipboard"], false),
    ("xsel", &["--clipboard", "--input"], false),
    ("pbcopy", &[], false),
];

/// Where copied text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardTarget {
    /// OSC 52 escape sequence on stdout, wrapped for tmux when needed.
    Terminal { tmux: bool },
    /// An external helper program.
    Native,
}

#[derive(Debug)]
pub struct SystemClipboard {
    target: ClipboardTarget,
}

impl SystemClipboard {
    /// OSC 52 only reaches a clipboard when stdout is a terminal; otherwise
    /// the native helpers are used.
    pub fn detect() -> SystemClipboard {
        let target = if std::io::stdout().is_terminal() {
            ClipboardTarget::Terminal {
                tmux: std::env::var_os("TMUX").is_some(),
            }
        } else {
            ClipboardTarget::Native
        };
        SystemClipboard { target }
    }

    pub fn target(&self) -> ClipboardTarget {
        self.target
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        match self.target {
            ClipboardTarget::Terminal { tmux } => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(osc52_sequence(text, tmux).as_bytes())?;
                stdout.flush()?;
                Ok(())
            }
            ClipboardTarget::Native => copy_with_native_tool(text),
        }
    }
}

pub fn osc52_sequence(text: &str, tmux: bool) -> String {
    let payload = STANDARD.encode(text);
    if tmux {
        // tmux passthrough doubles the inner ESC
        format!("\x1bPtmux;\x1b\x1b]52;c;{payload}\x07\x1b\\")
    } else {
        format!("\x1b]52;c;{payload}\x07")
    }
}

fn copy_with_native_tool(text: &str) -> Result<(), ClipboardError> {
    let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
    for (program, args, wayland_only) in NATIVE_TOOLS {
        if *wayland_only && !wayland {
            continue;
        }
        match pipe_into(program, args, text) {
            Ok(()) => return Ok(()),
            Err(e) => log::debug!("clipboard tool {program} unavailable: {e}"),
        }
    }
    Err(ClipboardError::Unavailable)
}

fn pipe_into(program: &str, args: &[&str], text: &str) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("{program} exited with {status}")))
    }
}

/// In-process clipboard, used by tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
